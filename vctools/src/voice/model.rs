use std::{fmt::Display, sync::Arc};

use twilight_model::{
    channel::{Channel, ChannelType},
    id::{
        Id,
        marker::{ChannelMarker, GuildMarker, UserMarker},
    },
};

use crate::core::konst::text::UNNAMED_CHANNEL;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelKind {
    Voice,
    Stage,
}

impl ChannelKind {
    /// Only voice and stage channels have participants that can be moderated.
    pub const fn from_channel_type(kind: ChannelType) -> Option<Self> {
        match kind {
            ChannelType::GuildVoice => Some(Self::Voice),
            ChannelType::GuildStageVoice => Some(Self::Stage),
            _ => None,
        }
    }

    pub const fn emoji(self) -> &'static str {
        match self {
            Self::Voice => "🔊",
            Self::Stage => "🎙️",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoiceChannel {
    pub id: Id<ChannelMarker>,
    pub guild_id: Id<GuildMarker>,
    pub name: Arc<str>,
    pub kind: ChannelKind,
    pub position: i32,
}

impl VoiceChannel {
    pub fn from_channel(channel: &Channel) -> Option<Self> {
        let kind = ChannelKind::from_channel_type(channel.kind)?;

        Some(Self {
            id: channel.id,
            guild_id: channel.guild_id?,
            name: channel.name.as_deref().unwrap_or(UNNAMED_CHANNEL).into(),
            kind,
            position: channel.position.unwrap_or_default(),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Participant {
    pub user_id: Id<UserMarker>,
    pub session_id: Arc<str>,
}

/// What happens to a member's voice connection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChannelPatch {
    #[default]
    Untouched,
    Disconnect,
    MoveTo(Id<ChannelMarker>),
}

/// The voice fields of a guild member update, applied alike to every target of one action.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PatchPayload {
    pub channel: ChannelPatch,
    pub mute: Option<bool>,
    pub deaf: Option<bool>,
}

impl PatchPayload {
    pub const DISCONNECT: Self = Self {
        channel: ChannelPatch::Disconnect,
        mute: None,
        deaf: None,
    };

    pub const fn move_to(channel_id: Id<ChannelMarker>) -> Self {
        Self {
            channel: ChannelPatch::MoveTo(channel_id),
            mute: None,
            deaf: None,
        }
    }

    pub const fn mute(mute: bool) -> Self {
        Self {
            channel: ChannelPatch::Untouched,
            mute: Some(mute),
            deaf: None,
        }
    }

    pub const fn deaf(deaf: bool) -> Self {
        Self {
            channel: ChannelPatch::Untouched,
            mute: None,
            deaf: Some(deaf),
        }
    }

    pub const fn mute_and_deaf(flag: bool) -> Self {
        Self {
            channel: ChannelPatch::Untouched,
            mute: Some(flag),
            deaf: Some(flag),
        }
    }
}

impl Display for PatchPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut fields = Vec::with_capacity(3);
        match self.channel {
            ChannelPatch::Untouched => {}
            ChannelPatch::Disconnect => fields.push(String::from("channel_id: null")),
            ChannelPatch::MoveTo(id) => fields.push(format!("channel_id: {id}")),
        }
        if let Some(mute) = self.mute {
            fields.push(format!("mute: {mute}"));
        }
        if let Some(deaf) = self.deaf {
            fields.push(format!("deaf: {deaf}"));
        }
        write!(f, "{{{}}}", fields.join(", "))
    }
}

#[cfg(test)]
mod test {
    use rstest::rstest;
    use twilight_model::{channel::ChannelType, id::Id};

    use super::{ChannelKind, PatchPayload};

    #[rstest]
    #[case(ChannelType::GuildVoice, Some(ChannelKind::Voice))]
    #[case(ChannelType::GuildStageVoice, Some(ChannelKind::Stage))]
    #[case(ChannelType::GuildText, None)]
    #[case(ChannelType::GuildCategory, None)]
    #[case(ChannelType::GuildForum, None)]
    fn only_voice_and_stage_are_actionable(
        #[case] kind: ChannelType,
        #[case] expected: Option<ChannelKind>,
    ) {
        assert_eq!(ChannelKind::from_channel_type(kind), expected);
    }

    #[rstest]
    #[case(PatchPayload::DISCONNECT, "{channel_id: null}")]
    #[case(PatchPayload::move_to(Id::new(42)), "{channel_id: 42}")]
    #[case(PatchPayload::mute(true), "{mute: true}")]
    #[case(PatchPayload::deaf(false), "{deaf: false}")]
    #[case(PatchPayload::mute_and_deaf(true), "{mute: true, deaf: true}")]
    #[case(PatchPayload::default(), "{}")]
    fn payload_display(#[case] payload: PatchPayload, #[case] expected: &str) {
        assert_eq!(payload.to_string(), expected);
    }
}
