//! splanto - prune week-old songs from a "plan to hear" playlist
//!
//! Authorizes against Spotify, finds the playlist by its description, reports
//! which entries are older than a week, and removes them after confirmation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use splanto::deletion::{ConfirmationProvider, PresetAnswer, StdinConfirmation};
use splanto::pipeline::{self, DEFAULT_MARKER};
use splanto::spotify::auth::DEFAULT_REDIRECT_URI;
use splanto::spotify::{OAuthSessionProvider, SessionConfig, SpotifyClient};
use splanto_common::config::{resolve_credentials, TomlConfig};

const BANNER: &str = r"  _________      .__                 __
 /   _____/_____ |  | _____    _____/  |_  ____
 \_____  \\____ \|  | \__  \  /    \   __\/  _ \
 /        \  |_> >  |__/ __ \|   |  \  | (  <_> )
/_______  /   __/|____(____  /___|  /__|  \____/
        \/|__|             \/     \/
";

/// Command-line arguments for splanto
#[derive(Parser, Debug)]
#[command(name = "splanto")]
#[command(about = "Remove songs older than a week from a Spotify playlist")]
#[command(version)]
struct Args {
    /// Spotify application client id (falls back to SPLANTO_CLIENT_ID)
    #[arg(long)]
    client_id: Option<String>,

    /// Spotify application client secret (falls back to SPLANTO_CLIENT_SECRET)
    #[arg(long)]
    client_secret: Option<String>,

    /// TOML config file holding client_id / client_secret
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Exact description of the playlist to curate
    #[arg(short, long, default_value = DEFAULT_MARKER)]
    marker: String,

    /// Redirect URI registered for the application
    #[arg(long, default_value = DEFAULT_REDIRECT_URI)]
    redirect_uri: String,

    /// Remove without asking
    #[arg(short, long)]
    yes: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("ERROR: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "splanto=info,splanto_common=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    info!(
        "Starting splanto v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    println!("{}", BANNER);

    let toml = TomlConfig::load_or_default(args.config.as_deref())?;
    let credentials = resolve_credentials(
        args.client_id.as_deref(),
        args.client_secret.as_deref(),
        &toml,
    )?;

    info!("Authorizing");
    let session_config = SessionConfig::new(credentials, args.redirect_uri);
    let session = OAuthSessionProvider::new()?
        .get_session(&session_config)
        .await?;

    let client = SpotifyClient::new(&session).context("Failed to build HTTP client")?;

    let mut confirmation: Box<dyn ConfirmationProvider> = if args.yes {
        Box::new(PresetAnswer::yes())
    } else {
        Box::new(StdinConfirmation)
    };

    let mut stdout = std::io::stdout();
    pipeline::run(
        &client,
        &args.marker,
        splanto_common::time::now(),
        confirmation.as_mut(),
        &mut stdout,
    )
    .await?;

    Ok(())
}
