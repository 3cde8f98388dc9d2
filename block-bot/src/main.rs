use std::sync::Arc;

use anyhow::Context as _;
use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use twilight_gateway::{
    Config as ShardConfig, ConfigBuilder, EventTypeFlags, Intents, Shard, ShardId,
    StreamExt as _,
};
use twilight_http::Client;
use twilight_model::gateway::{
    event::Event,
    payload::outgoing::update_presence::UpdatePresencePayload,
    presence::{ActivityType, MinimalActivity, Status},
};

use rustls::crypto::ring::default_provider;

use block_commands::handle_message;
use block_core::{Config, Context, twilight::TwilightTransport};
use block_utils::prefix::DISPLAY_PREFIX;

// Members for `server` and `user`, content for prefix parsing
const INTENTS: Intents = Intents::GUILDS
    .union(Intents::GUILD_MESSAGES)
    .union(Intents::GUILD_MEMBERS)
    .union(Intents::DIRECT_MESSAGES)
    .union(Intents::MESSAGE_CONTENT);

/// Identify settings for the single shard, presence included.
fn shard_config(token: String) -> anyhow::Result<ShardConfig> {
    let activity = MinimalActivity {
        kind: ActivityType::Playing,
        name: format!("{DISPLAY_PREFIX} help | Blockhouse"),
        url: None,
    };
    let presence = UpdatePresencePayload::new(vec![activity.into()], false, None, Status::Online)
        .context("building gateway presence")?;

    Ok(ConfigBuilder::new(token, INTENTS).presence(presence).build())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install rustls ring provider"))?;

    // Load the .env file
    dotenvy::dotenv().ok();

    let config = Config::from_env().context("reading startup configuration")?;

    // One shared HTTP client for every handler
    let http = Arc::new(Client::new(config.token.clone()));
    let (latency_tx, latency_rx) = watch::channel(None);
    let transport = TwilightTransport::new(Arc::clone(&http), latency_rx);
    let ctx = Context::new(Arc::new(transport));

    let mut shard = Shard::with_config(ShardId::ONE, shard_config(config.token)?);

    info!("BlockBot is connecting...");

    while let Some(item) = shard.next_event(EventTypeFlags::all()).await {
        latency_tx.send_replace(shard.latency().average());

        let event = match item {
            Ok(event) => event,
            Err(source) => {
                error!(?source, "gateway event stream error");
                continue;
            }
        };

        match event {
            Event::Ready(ready) => {
                info!(
                    user = %ready.user.name,
                    guilds = ready.guilds.len(),
                    "BlockBot is online"
                );
            }
            Event::MessageCreate(msg) => {
                // A slow command must not stall the gateway
                tokio::spawn(handle_message(ctx.clone(), msg));
            }
            _ => {}
        }
    }

    Ok(())
}
