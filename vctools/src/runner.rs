use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use tokio::task::JoinHandle;
use twilight_cache_inmemory::{InMemoryCache, ResourceType};
use twilight_gateway::{
    CloseFrame, Config as ShardConfig, Event, EventTypeFlags, Intents, MessageSender, Shard,
    StreamExt, error::StartRecommendedError,
};
use twilight_http::{Client, client::ClientBuilder};
use twilight_model::{
    channel::message::AllowedMentions,
    id::{Id, marker::ApplicationMarker},
};

use super::{
    command::declare::commands,
    core::{
        model::{BotState, CacheAware, Config, SettingsAware},
        traced,
    },
    error::{
        core::DeserialiseBodyFromHttpError,
        runner::{StartError, WaitForSignalError, WaitUntilShutdownError},
    },
    gateway,
    settings::SettingsStore,
};

const INTENTS: Intents = Intents::GUILDS.union(Intents::GUILD_VOICE_STATES);

static SHUTDOWN: AtomicBool = AtomicBool::new(false);

fn build_http_client(config: &Config) -> Arc<Client> {
    ClientBuilder::default()
        .default_allowed_mentions(AllowedMentions::default())
        .token(config.token.clone())
        .build()
        .into()
}

fn build_cache() -> Arc<InMemoryCache> {
    InMemoryCache::builder()
        .resource_types(ResourceType::CHANNEL | ResourceType::GUILD | ResourceType::VOICE_STATE)
        .build()
        .into()
}

pub async fn start(config: Config) -> Result<(), StartError> {
    tracing::debug!("began starting the bot");

    let settings = SettingsStore::connect(config.database_url.as_deref()).await?;
    let http = build_http_client(&config);
    let cache = build_cache();
    let application_id = fetch_application_id(&http).await?;

    let shards = build_and_split_shards(&http, &config).await?;
    let shards_len = shards.len();
    let mut senders = Vec::with_capacity(shards_len);
    let mut tasks = Vec::with_capacity(shards_len);
    let bot = Arc::new(BotState::new(http, cache, settings, application_id));
    bot.interaction().set_global_commands(&commands()).await?;

    for shard in shards {
        senders.push(shard.sender());
        tasks.push(tokio::spawn(handle_gateway_events(shard, bot.clone())));
    }

    tracing::info!("started with {shards_len} shard(s)");
    Ok(wait_until_shutdown(senders, tasks, &bot).await?)
}

async fn fetch_application_id(
    http: &Client,
) -> Result<Id<ApplicationMarker>, DeserialiseBodyFromHttpError> {
    Ok(http.current_user_application().await?.model().await?.id)
}

async fn build_and_split_shards(
    client: &Client,
    config: &Config,
) -> Result<impl ExactSizeIterator<Item = Shard> + use<>, StartRecommendedError> {
    let shard_config = ShardConfig::new(config.token.clone(), INTENTS);
    let shards =
        twilight_gateway::create_recommended(client, shard_config, |_, builder| builder.build())
            .await?;
    Ok(shards)
}

#[tracing::instrument(skip_all, name = "gateway")]
async fn handle_gateway_events(mut shard: Shard, bot: Arc<BotState>) {
    while let Some(item) = shard.next_event(EventTypeFlags::all()).await {
        let event = match item {
            Ok(Event::GatewayClose(_)) if SHUTDOWN.load(Ordering::Relaxed) => break,
            Ok(event) => event,
            Err(source) => {
                tracing::warn!(?source, "error receiving event");

                continue;
            }
        };

        tracing::trace!(?event, shard = ?shard.id(), "received event");
        bot.cache().update(&event);
        traced::tokio_spawn(gateway::process(bot.clone(), event, shard.id()));
    }
}

#[tracing::instrument]
async fn wait_for_signal() -> Result<(), WaitForSignalError> {
    #[cfg(target_family = "unix")]
    {
        use tokio::signal::unix::{self, SignalKind};

        let mut sigint = unix::signal(SignalKind::interrupt())?;
        let mut sigterm = unix::signal(SignalKind::terminate())?;

        tokio::select! {
            _ = sigint.recv() => tracing::debug!("received SIGINT"),
            _ = sigterm.recv() => tracing::debug!("received SIGTERM"),
        }
    }

    #[cfg(not(target_family = "unix"))]
    {
        use tokio::signal;

        signal::ctrl_c().await?;
    }

    Ok(())
}

#[tracing::instrument(skip_all, name = "shutdown")]
async fn wait_until_shutdown(
    senders: Vec<MessageSender>,
    tasks: Vec<JoinHandle<()>>,
    bot: &BotState,
) -> Result<(), WaitUntilShutdownError> {
    wait_for_signal().await?;
    SHUTDOWN.store(true, Ordering::Relaxed);
    tracing::info!("gracefully shutting down...");

    tracing::debug!("sending close frames to all shards...");
    for sender in senders {
        let _ = sender.close(CloseFrame::NORMAL);
    }

    tracing::debug!("killing all shard gateway event handlers...");
    for jh in tasks {
        let _ = jh.await;
    }

    tracing::debug!("closing the settings store...");
    bot.settings().close().await;

    tracing::info!("shut down gracefully");
    Ok(())
}
