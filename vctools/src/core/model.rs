use std::{fmt::Debug, sync::Arc};

use twilight_cache_inmemory::InMemoryCache;
use twilight_http::Client;
use twilight_model::id::{Id, marker::ApplicationMarker};

use crate::{error::core::ConfigError, settings::SettingsStore};

pub use crate::core::http::Client as InteractionClient;

pub struct Config {
    pub token: String,
    pub database_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let token = dotenvy::var("BOT_TOKEN").map_err(ConfigError::MissingToken)?;
        let database_url = dotenvy::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        Ok(Self {
            token,
            database_url,
        })
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("token", &"<redacted>")
            .field("database_url", &self.database_url.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

pub type OwnedBotState = Arc<BotState>;

pub trait CacheAware {
    fn cache(&self) -> &InMemoryCache;
}

pub trait OwnedHttpAware {
    fn http_owned(&self) -> Arc<Client>;
}

pub trait SettingsAware {
    fn settings(&self) -> &SettingsStore;
}

pub struct BotState {
    cache: Arc<InMemoryCache>,
    http: Arc<Client>,
    settings: SettingsStore,
    application_id: Id<ApplicationMarker>,
}

impl BotState {
    pub const fn new(
        http: Arc<Client>,
        cache: Arc<InMemoryCache>,
        settings: SettingsStore,
        application_id: Id<ApplicationMarker>,
    ) -> Self {
        Self {
            cache,
            http,
            settings,
            application_id,
        }
    }

    pub fn interaction(&self) -> InteractionClient {
        InteractionClient::new(self.http.clone(), self.application_id)
    }
}

impl CacheAware for BotState {
    fn cache(&self) -> &InMemoryCache {
        &self.cache
    }
}

impl OwnedHttpAware for BotState {
    fn http_owned(&self) -> Arc<Client> {
        self.http.clone()
    }
}

impl SettingsAware for BotState {
    fn settings(&self) -> &SettingsStore {
        &self.settings
    }
}
