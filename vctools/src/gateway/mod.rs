mod interaction;
mod model;
mod ready;

use twilight_gateway::{Event, ShardId};

use crate::{core::model::OwnedBotState, error::gateway::ProcessResult};

use self::{model::Process, ready::ReadyContext};

#[tracing::instrument(skip_all, name = "gateway", fields(shard = %shard_id))]
pub async fn process(bot: OwnedBotState, event: Event, shard_id: ShardId) -> ProcessResult {
    match event {
        Event::Ready(ref e) => ReadyContext::new(e, shard_id).process().await,
        Event::InteractionCreate(e) => bot.into_interaction_create_context(e).process().await,
        _ => Ok(()),
    }
}
