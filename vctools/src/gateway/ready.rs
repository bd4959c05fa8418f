use twilight_gateway::ShardId;
use twilight_model::gateway::payload::incoming::Ready;

use crate::error::gateway::ProcessResult;

use super::model::Process;

pub(super) struct ReadyContext<'a> {
    inner: &'a Ready,
    shard_id: ShardId,
}

impl<'a> ReadyContext<'a> {
    pub(super) const fn new(inner: &'a Ready, shard_id: ShardId) -> Self {
        Self { inner, shard_id }
    }
}

impl Process for ReadyContext<'_> {
    async fn process(self) -> ProcessResult {
        let guild_count = self.inner.guilds.len();
        tracing::info!(
            "shard {} ready as {}, running in {guild_count} guild(s)",
            self.shard_id,
            self.inner.user.name,
        );
        Ok(())
    }
}
