//! Waypoint quest server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), overlays
//! `WAYPOINT_*` environment variables, and serves the event endpoint over
//! HTTP. Participant progress lives in memory for the life of the process.
//!
//! ```
//! cargo run -p waypoint-bot -- --config config.toml --check-config
//! ```

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use waypoint_bot::{AppState, BotConfig};
use waypoint_store_memory::MemoryStore;

#[derive(Parser)]
#[command(author, version, about = "Waypoint quest bot server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Validate the configuration, print a summary, and exit.
  #[arg(long)]
  check_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config.clone()).required(false))
    .add_source(
      config::Environment::with_prefix("WAYPOINT")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("participants"),
    )
    .build()
    .with_context(|| format!("failed to read config from {:?}", cli.config))?;

  let bot_cfg: BotConfig = settings
    .try_deserialize()
    .context("failed to deserialise BotConfig")?;

  let quest = bot_cfg
    .build_quest(MemoryStore::new())
    .context("invalid quest configuration")?;

  if cli.check_config {
    println!(
      "ok: {} tasks, {} zones, {} participants, moderator {}",
      quest.catalog().len(),
      quest.zones().len(),
      bot_cfg.participants.len(),
      bot_cfg.moderator_id,
    );
    return Ok(());
  }

  if bot_cfg.webhook_secret.is_none() {
    tracing::warn!("no webhook_secret configured; /events accepts unauthenticated requests");
  }

  tracing::info!(
    tasks = quest.catalog().len(),
    zones = quest.zones().len(),
    participants = bot_cfg.participants.len(),
    "quest loaded"
  );

  let state = AppState::new(quest, bot_cfg.webhook_secret.as_deref());
  let app = waypoint_bot::router(state);
  let address = format!("{}:{}", bot_cfg.host, bot_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
