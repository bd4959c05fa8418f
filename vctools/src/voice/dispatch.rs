use std::error::Error;

use futures::{FutureExt, TryFutureExt, future::BoxFuture};
use tokio::task::JoinHandle;
use twilight_model::id::{
    Id,
    marker::{ChannelMarker, UserMarker},
};

use super::{
    menu::MenuAction,
    model::{PatchPayload, VoiceChannel},
    source::{ActingUser, MemberPatcher, VoiceStateSource},
    throttle::{PacingMode, ThrottleConfig, run_issued, run_paced},
};
use crate::{core::traced, error::voice::DispatchError};

type Outcome<E> = BoxFuture<'static, Result<usize, DispatchError<E>>>;

/// The requests sent to the members of one channel.
pub struct Dispatch<E: Error + 'static> {
    channel_id: Id<ChannelMarker>,
    requested: usize,
    outcome: Outcome<E>,
}

impl<E: Error + Send + Sync + 'static> Dispatch<E> {
    fn empty(channel_id: Id<ChannelMarker>) -> Self {
        Self {
            channel_id,
            requested: 0,
            outcome: futures::future::ready(Ok(0)).boxed(),
        }
    }

    pub const fn channel_id(&self) -> Id<ChannelMarker> {
        self.channel_id
    }

    pub const fn requested(&self) -> usize {
        self.requested
    }

    /// Resolves to the number of settled requests, or the first failure.
    pub async fn settle(self) -> Result<usize, DispatchError<E>> {
        self.outcome.await
    }

    /// Lets the requests settle in the background, logging a failure.
    pub fn detach(self) {
        traced::tokio_spawn(settle_logged(self));
    }
}

#[tracing::instrument(skip_all, name = "dispatch", fields(channel = %dispatch.channel_id, requested = dispatch.requested))]
async fn settle_logged<E: Error + Send + Sync + 'static>(
    dispatch: Dispatch<E>,
) -> Result<(), DispatchError<E>> {
    let settled = dispatch.settle().await?;
    tracing::debug!("{settled} request(s) settled");
    Ok(())
}

pub struct Batch<E: Error + 'static>(Vec<Dispatch<E>>);

impl<E: Error + Send + Sync + 'static> Batch<E> {
    pub fn requested(&self) -> usize {
        self.0.iter().map(Dispatch::requested).sum()
    }

    pub fn channel_ids(&self) -> impl Iterator<Item = Id<ChannelMarker>> + '_ {
        self.0
            .iter()
            .filter(|dispatch| dispatch.requested > 0)
            .map(Dispatch::channel_id)
    }

    pub fn detach(self) {
        self.0.into_iter().for_each(Dispatch::detach);
    }

    #[cfg(test)]
    pub async fn settle(self) -> Vec<Result<usize, DispatchError<E>>> {
        futures::future::join_all(self.0.into_iter().map(Dispatch::settle)).await
    }
}

impl<E: Error + 'static> From<Dispatch<E>> for Batch<E> {
    fn from(dispatch: Dispatch<E>) -> Self {
        Self(vec![dispatch])
    }
}

impl<E: Error + 'static> FromIterator<Dispatch<E>> for Batch<E> {
    fn from_iter<T: IntoIterator<Item = Dispatch<E>>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

async fn flatten_join<E: Error + 'static>(
    handle: JoinHandle<Result<(), E>>,
) -> Result<(), DispatchError<E>> {
    handle.await?.map_err(DispatchError::Patch)
}

pub struct Dispatcher<'a, V: ?Sized, P> {
    voice: &'a V,
    patcher: P,
    acting_user_id: Option<Id<UserMarker>>,
    config: ThrottleConfig,
}

impl<'a, V, P> Dispatcher<'a, V, P>
where
    V: VoiceStateSource + ?Sized,
    P: MemberPatcher + Clone + Send + Sync + 'static,
{
    pub fn new(
        voice: &'a V,
        patcher: P,
        acting_user: &impl ActingUser,
        config: ThrottleConfig,
    ) -> Self {
        Self {
            voice,
            patcher,
            acting_user_id: acting_user.acting_user_id(),
            config,
        }
    }

    fn targets(&self, channel: &VoiceChannel, bypass: bool) -> Vec<Id<UserMarker>> {
        let participants = self.voice.participants(channel.id);
        let skipped = if bypass {
            None
        } else {
            let Some(acting_user_id) = self.acting_user_id else {
                tracing::warn!(
                    "acting user is unknown, refusing to act on {} participant(s)",
                    participants.len()
                );
                return Vec::new();
            };
            Some(acting_user_id)
        };

        participants
            .into_iter()
            .filter(|p| Some(p.user_id) != skipped)
            .inspect(|p| tracing::trace!(user = %p.user_id, session = %p.session_id, "targeting participant"))
            .map(|p| p.user_id)
            .collect()
    }

    /// Sends `payload` to every participant of `channel`, skipping the acting user unless `bypass` is set.
    #[tracing::instrument(skip_all, fields(channel = %channel.id, payload = %payload, bypass = bypass))]
    pub fn send_patch(
        &self,
        channel: &VoiceChannel,
        payload: PatchPayload,
        bypass: bool,
    ) -> Dispatch<P::Error> {
        let targets = self.targets(channel, bypass);
        if targets.is_empty() {
            tracing::debug!("no participants to act on");
            return Dispatch::empty(channel.id);
        }

        let guild_id = channel.guild_id;
        let requested = targets.len();
        let pace = self.config.pace();
        tracing::debug!("requesting {requested} member update(s)");

        let outcome = match self.config.pacing {
            PacingMode::Observe => {
                let pending = targets
                    .into_iter()
                    .map(|user_id| tokio::spawn(self.patcher.patch_member(guild_id, user_id, payload)))
                    .collect::<Vec<_>>();
                async move {
                    run_paced(pending.into_iter().map(flatten_join), pace)
                        .await
                        .map(|settled| settled.len())
                }
                .boxed()
            }
            PacingMode::Issue => {
                let patcher = self.patcher.clone();
                async move {
                    let operations = targets.into_iter().map(|user_id| {
                        let patcher = &patcher;
                        move || {
                            patcher
                                .patch_member(guild_id, user_id, payload)
                                .map_err(DispatchError::Patch)
                        }
                    });
                    run_issued(operations, pace).await.map(|settled| settled.len())
                }
                .boxed()
            }
        };

        Dispatch {
            channel_id: channel.id,
            requested,
            outcome,
        }
    }

    pub fn disconnect_all(&self, channel: &VoiceChannel) -> Dispatch<P::Error> {
        self.send_patch(channel, PatchPayload::DISCONNECT, false)
    }

    pub fn disconnect_all_global(&self, channels: &[VoiceChannel]) -> Batch<P::Error> {
        self.populated(channels)
            .map(|channel| self.disconnect_all(channel))
            .collect()
    }

    pub fn mute_all(&self, channel: &VoiceChannel) -> Dispatch<P::Error> {
        self.send_patch(channel, PatchPayload::mute(true), false)
    }

    pub fn unmute_all(&self, channel: &VoiceChannel) -> Dispatch<P::Error> {
        self.send_patch(channel, PatchPayload::mute(false), false)
    }

    pub fn deafen_all(&self, channel: &VoiceChannel) -> Dispatch<P::Error> {
        self.send_patch(channel, PatchPayload::deaf(true), false)
    }

    pub fn undeafen_all(&self, channel: &VoiceChannel) -> Dispatch<P::Error> {
        self.send_patch(channel, PatchPayload::deaf(false), false)
    }

    pub fn mute_and_deafen_all(&self, channel: &VoiceChannel) -> Dispatch<P::Error> {
        self.send_patch(channel, PatchPayload::mute_and_deaf(true), false)
    }

    pub fn unmute_and_undeafen_all(&self, channel: &VoiceChannel) -> Dispatch<P::Error> {
        self.send_patch(channel, PatchPayload::mute_and_deaf(false), false)
    }

    /// Moves everyone in `channel`, the acting user included.
    pub fn move_all(
        &self,
        channel: &VoiceChannel,
        target: Id<ChannelMarker>,
    ) -> Dispatch<P::Error> {
        self.send_patch(channel, PatchPayload::move_to(target), true)
    }

    /// Moves everyone connected to any channel of the guild into `target`.
    ///
    /// `target` itself is skipped, and the source channel is not: members already in `target` get
    /// no request, while everyone in every other occupied channel is moved, the acting user
    /// included.
    pub fn move_all_global(
        &self,
        target: Id<ChannelMarker>,
        channels: &[VoiceChannel],
    ) -> Batch<P::Error> {
        self.populated(channels)
            .filter(|channel| channel.id != target)
            .map(|channel| self.move_all(channel, target))
            .collect()
    }

    fn populated<'c>(
        &self,
        channels: &'c [VoiceChannel],
    ) -> impl Iterator<Item = &'c VoiceChannel> {
        channels
            .iter()
            .filter(|channel| self.voice.participant_count(channel.id) > 0)
    }

    pub fn perform(
        &self,
        action: MenuAction,
        source: &VoiceChannel,
        guild_channels: &[VoiceChannel],
    ) -> Batch<P::Error> {
        match action {
            MenuAction::DisconnectAll => self.disconnect_all(source).into(),
            MenuAction::DisconnectAllGlobal => self.disconnect_all_global(guild_channels),
            MenuAction::MuteAll => self.mute_all(source).into(),
            MenuAction::UnmuteAll => self.unmute_all(source).into(),
            MenuAction::DeafenAll => self.deafen_all(source).into(),
            MenuAction::UndeafenAll => self.undeafen_all(source).into(),
            MenuAction::UnmuteAndUndeafenAll => self.unmute_and_undeafen_all(source).into(),
            MenuAction::MuteAndDeafenAll => self.mute_and_deafen_all(source).into(),
            MenuAction::MoveAll(target) => self.move_all(source, target).into(),
            MenuAction::MoveAllGlobal(target) => self.move_all_global(target, guild_channels),
        }
    }
}
