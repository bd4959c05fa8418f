use std::sync::Arc;

use twilight_cache_inmemory::InMemoryCache;
use twilight_http::Client;
use twilight_interactions::command::CreateCommand;
use twilight_model::{
    application::interaction::message_component::MessageComponentInteractionData,
    gateway::payload::incoming::InteractionCreate,
    id::{
        Id,
        marker::{GuildMarker, UserMarker},
    },
};

use crate::{
    core::{
        http::Interface,
        model::{CacheAware, OwnedBotState, OwnedHttpAware, SettingsAware},
    },
    error::CommandResult,
    settings::SettingsStore,
};

pub struct Ctx<T> {
    inner: Box<InteractionCreate>,
    bot: OwnedBotState,
    data: T,
}

pub type SlashCtx = Ctx<()>;
pub type ComponentCtx = Ctx<Box<MessageComponentInteractionData>>;

impl<T> Ctx<T> {
    pub const fn from_parts(inner: Box<InteractionCreate>, bot: OwnedBotState, data: T) -> Self {
        Self { inner, bot, data }
    }

    pub fn guild_id(&self) -> Option<Id<GuildMarker>> {
        self.inner.guild_id
    }

    pub fn author_id(&self) -> Option<Id<UserMarker>> {
        self.inner.author_id()
    }

    pub fn interface(&self) -> Interface {
        self.bot.interaction().interface(&self.inner)
    }
}

impl ComponentCtx {
    pub fn custom_id(&self) -> &str {
        &self.data.custom_id
    }

    pub fn values(&self) -> &[String] {
        &self.data.values
    }
}

impl<T> CacheAware for Ctx<T> {
    fn cache(&self) -> &InMemoryCache {
        self.bot.cache()
    }
}

impl<T> OwnedHttpAware for Ctx<T> {
    fn http_owned(&self) -> Arc<Client> {
        self.bot.http_owned()
    }
}

impl<T> SettingsAware for Ctx<T> {
    fn settings(&self) -> &SettingsStore {
        self.bot.settings()
    }
}

pub trait BotSlashCommand: CreateCommand {
    async fn run(self, ctx: SlashCtx) -> CommandResult;
}
