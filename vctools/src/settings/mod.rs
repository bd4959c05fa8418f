use std::{collections::HashMap, str::FromStr};

use log::LevelFilter;
use sqlx::{
    ConnectOptions, PgPool,
    postgres::{PgConnectOptions, PgPoolOptions},
};
use tokio::sync::RwLock;
use twilight_model::id::{Id, marker::GuildMarker};
use vctools_ext::num::u64_to_i64_truncating;

use crate::{
    error::settings::{ConnectError, StoreError, ThrottleConfigError},
    voice::{PacingMode, ThrottleConfig, ThrottleConfigPatch, WaitAfter, WaitSeconds},
};

type Row = (i16, i16, bool);

fn from_row((wait_after, wait_half_seconds, issue_paced): Row) -> Result<ThrottleConfig, ThrottleConfigError> {
    Ok(ThrottleConfig {
        wait_after: WaitAfter::new(i64::from(wait_after))?,
        wait_seconds: WaitSeconds::from_half_seconds(wait_half_seconds)?,
        pacing: PacingMode::from_issue_paced(issue_paced),
    })
}

/// Per-guild throttle settings, persisted in Postgres when a database is configured.
pub enum SettingsStore {
    Postgres(PgPool),
    Memory(RwLock<HashMap<Id<GuildMarker>, ThrottleConfig>>),
}

impl SettingsStore {
    pub async fn connect(database_url: Option<&str>) -> Result<Self, ConnectError> {
        let Some(database_url) = database_url else {
            tracing::warn!("`DATABASE_URL` is not set, guild settings will not be persisted");
            return Ok(Self::memory());
        };

        let options =
            PgConnectOptions::from_str(database_url)?.log_statements(LevelFilter::Debug);
        let db = PgPoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;
        sqlx::migrate!("./migrations").run(&db).await?;

        tracing::info!("connected to the settings database");
        Ok(Self::Postgres(db))
    }

    pub fn memory() -> Self {
        Self::Memory(RwLock::default())
    }

    pub async fn get(&self, guild_id: Id<GuildMarker>) -> Result<ThrottleConfig, StoreError> {
        match self {
            Self::Postgres(db) => {
                let row = sqlx::query_as::<_, Row>(
                    "--sql
                    SELECT wait_after, wait_half_seconds, issue_paced FROM voice_tools_settings WHERE id = $1
                    ",
                )
                .bind(u64_to_i64_truncating(guild_id.get()))
                .fetch_optional(db)
                .await?;

                Ok(row.map(from_row).transpose()?.unwrap_or_default())
            }
            Self::Memory(map) => Ok(map.read().await.get(&guild_id).copied().unwrap_or_default()),
        }
    }

    /// Applies `patch` over the guild's current settings and returns the result.
    pub async fn update(
        &self,
        guild_id: Id<GuildMarker>,
        patch: ThrottleConfigPatch,
    ) -> Result<ThrottleConfig, StoreError> {
        match self {
            Self::Postgres(db) => {
                let defaults = ThrottleConfig::default();
                let row = sqlx::query_as::<_, Row>(
                    "--sql
                    INSERT INTO voice_tools_settings (id, wait_after, wait_half_seconds, issue_paced)
                    VALUES ($1, COALESCE($2, $5), COALESCE($3, $6), COALESCE($4, $7))
                    ON CONFLICT (id) DO UPDATE SET
                        wait_after = COALESCE($2, voice_tools_settings.wait_after),
                        wait_half_seconds = COALESCE($3, voice_tools_settings.wait_half_seconds),
                        issue_paced = COALESCE($4, voice_tools_settings.issue_paced)
                    RETURNING wait_after, wait_half_seconds, issue_paced
                    ",
                )
                .bind(u64_to_i64_truncating(guild_id.get()))
                .bind(patch.wait_after.map(|w| i16::from(w.get())))
                .bind(patch.wait_seconds.map(WaitSeconds::half_seconds))
                .bind(patch.pacing.map(PacingMode::is_issue_paced))
                .bind(i16::from(defaults.wait_after.get()))
                .bind(defaults.wait_seconds.half_seconds())
                .bind(defaults.pacing.is_issue_paced())
                .fetch_one(db)
                .await?;

                Ok(from_row(row)?)
            }
            Self::Memory(map) => {
                let mut map = map.write().await;
                let config = map.entry(guild_id).or_default();
                *config = patch.apply(*config);
                Ok(*config)
            }
        }
    }

    pub async fn close(&self) {
        if let Self::Postgres(db) = self {
            db.close().await;
        }
    }
}
