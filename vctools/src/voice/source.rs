use std::{error::Error, sync::Arc};

use futures::{FutureExt, future::BoxFuture};
use itertools::Itertools;
use twilight_cache_inmemory::InMemoryCache;
use twilight_model::id::{
    Id,
    marker::{ChannelMarker, GuildMarker, UserMarker},
};

use super::model::{ChannelPatch, Participant, PatchPayload, VoiceChannel};

pub trait VoiceStateSource {
    fn participants(&self, channel_id: Id<ChannelMarker>) -> Vec<Participant>;

    fn participant_count(&self, channel_id: Id<ChannelMarker>) -> usize {
        self.participants(channel_id).len()
    }
}

pub trait ChannelDirectory {
    /// The channel, if it is a guild voice or stage channel.
    fn voice_channel(&self, channel_id: Id<ChannelMarker>) -> Option<VoiceChannel>;

    /// Every voice and stage channel of the guild, in sidebar order.
    fn guild_voice_channels(&self, guild_id: Id<GuildMarker>) -> Vec<VoiceChannel>;
}

pub trait ActingUser {
    fn acting_user_id(&self) -> Option<Id<UserMarker>>;
}

pub trait MemberPatcher {
    type Error: Error + Send + Sync + 'static;

    fn patch_member(
        &self,
        guild_id: Id<GuildMarker>,
        user_id: Id<UserMarker>,
        payload: PatchPayload,
    ) -> BoxFuture<'static, Result<(), Self::Error>>;
}

impl VoiceStateSource for InMemoryCache {
    fn participants(&self, channel_id: Id<ChannelMarker>) -> Vec<Participant> {
        self.voice_channel_states(channel_id)
            .map_or_else(Vec::new, |states| {
                states
                    .map(|state| Participant {
                        user_id: state.user_id(),
                        session_id: state.session_id().into(),
                    })
                    .collect()
            })
    }

    fn participant_count(&self, channel_id: Id<ChannelMarker>) -> usize {
        self.voice_channel_states(channel_id)
            .map_or(0, Iterator::count)
    }
}

impl ChannelDirectory for InMemoryCache {
    fn voice_channel(&self, channel_id: Id<ChannelMarker>) -> Option<VoiceChannel> {
        let channel = self.channel(channel_id)?;
        VoiceChannel::from_channel(&channel)
    }

    fn guild_voice_channels(&self, guild_id: Id<GuildMarker>) -> Vec<VoiceChannel> {
        let Some(channel_ids) = self.guild_channels(guild_id) else {
            return Vec::new();
        };

        channel_ids
            .iter()
            .filter_map(|&id| self.voice_channel(id))
            .sorted_by_key(|channel| (channel.position, channel.id))
            .collect()
    }
}

impl ActingUser for Option<Id<UserMarker>> {
    fn acting_user_id(&self) -> Option<Id<UserMarker>> {
        *self
    }
}

impl MemberPatcher for Arc<twilight_http::Client> {
    type Error = twilight_http::Error;

    fn patch_member(
        &self,
        guild_id: Id<GuildMarker>,
        user_id: Id<UserMarker>,
        payload: PatchPayload,
    ) -> BoxFuture<'static, Result<(), Self::Error>> {
        let http = self.clone();
        async move {
            let mut request = http.update_guild_member(guild_id, user_id);
            match payload.channel {
                ChannelPatch::Untouched => {}
                ChannelPatch::Disconnect => request = request.channel_id(None),
                ChannelPatch::MoveTo(channel_id) => request = request.channel_id(Some(channel_id)),
            }
            if let Some(mute) = payload.mute {
                request = request.mute(mute);
            }
            if let Some(deaf) = payload.deaf {
                request = request.deaf(deaf);
            }

            request.await?;
            Ok(())
        }
        .boxed()
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;
    use twilight_cache_inmemory::InMemoryCache;
    use twilight_model::{
        channel::Channel,
        gateway::payload::incoming::{ChannelCreate, VoiceStateUpdate},
        id::Id,
        voice::VoiceState,
    };

    use super::{ChannelDirectory, VoiceStateSource};
    use crate::voice::model::ChannelKind;

    const GUILD: u64 = 1;

    fn create_channel(cache: &InMemoryCache, id: u64, kind: u8, name: &str, position: i32) {
        let channel = serde_json::from_value::<Channel>(json!({
            "id": id.to_string(),
            "type": kind,
            "guild_id": GUILD.to_string(),
            "name": name,
            "position": position,
        }))
        .expect("channel payload must be valid");
        cache.update(&ChannelCreate(channel));
    }

    fn join(cache: &InMemoryCache, user_id: u64, channel_id: u64) {
        let state = serde_json::from_value::<VoiceState>(json!({
            "channel_id": channel_id.to_string(),
            "guild_id": GUILD.to_string(),
            "user_id": user_id.to_string(),
            "session_id": format!("session-{user_id}"),
            "deaf": false,
            "mute": false,
            "self_deaf": false,
            "self_mute": false,
            "self_stream": false,
            "self_video": false,
            "suppress": false,
            "request_to_speak_timestamp": null,
        }))
        .expect("voice state payload must be valid");
        cache.update(&VoiceStateUpdate(state));
    }

    fn guild() -> InMemoryCache {
        let cache = InMemoryCache::new();
        create_channel(&cache, 10, 2, "Lounge", 1);
        create_channel(&cache, 11, 13, "Stage", 0);
        create_channel(&cache, 12, 2, "AFK", 1);
        create_channel(&cache, 13, 0, "general", 0);
        cache
    }

    #[test]
    fn participants_come_from_voice_states() {
        let cache = guild();
        join(&cache, 100, 10);
        join(&cache, 101, 10);
        join(&cache, 102, 11);

        let mut participants = cache
            .participants(Id::new(10))
            .into_iter()
            .map(|p| (p.user_id.get(), p.session_id.to_string()))
            .collect::<Vec<_>>();
        participants.sort_unstable();
        assert_eq!(
            participants,
            [
                (100, String::from("session-100")),
                (101, String::from("session-101")),
            ]
        );
        assert_eq!(cache.participant_count(Id::new(10)), 2);
        assert_eq!(cache.participant_count(Id::new(11)), 1);
        assert_eq!(cache.participant_count(Id::new(12)), 0);
        assert!(cache.participants(Id::new(12)).is_empty());
    }

    #[test]
    fn switching_channels_moves_the_participant() {
        let cache = guild();
        join(&cache, 100, 10);
        join(&cache, 100, 12);

        assert_eq!(cache.participant_count(Id::new(10)), 0);
        assert_eq!(cache.participant_count(Id::new(12)), 1);
    }

    #[test]
    fn only_voice_and_stage_channels_are_listed() {
        let cache = guild();

        assert_eq!(
            cache.voice_channel(Id::new(11)).map(|c| c.kind),
            Some(ChannelKind::Stage)
        );
        assert!(cache.voice_channel(Id::new(13)).is_none());
        assert!(cache.voice_channel(Id::new(99)).is_none());
    }

    #[test]
    fn guild_channels_are_in_sidebar_order() {
        let cache = guild();

        let channels = cache
            .guild_voice_channels(Id::new(GUILD))
            .into_iter()
            .map(|c| (c.id.get(), c.name.to_string()))
            .collect::<Vec<_>>();
        assert_eq!(
            channels,
            [
                (11, String::from("Stage")),
                (10, String::from("Lounge")),
                (12, String::from("AFK")),
            ]
        );
        assert!(cache.guild_voice_channels(Id::new(2)).is_empty());
    }
}
