//! `lbstats` command line interface
//!
//! Commands print JSON on stdout (`sample-config` prints TOML); logs go to stderr.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use lbstats_application::ports::registry::list_cache_providers;
use lbstats_domain::error::{Error, Result};
use lbstats_domain::value_objects::{AggregateKind, AggregateRequest, TimeWindow};
use lbstats_infrastructure::config::loader::to_toml;
use lbstats_infrastructure::config::{AppConfig, ConfigLoader};
use lbstats_infrastructure::di::{AppContext, init_app};
use lbstats_infrastructure::logging::init_logging;
use serde_json::json;

/// Command line interface for lbstats
#[derive(Parser, Debug)]
#[command(name = "lbstats")]
#[command(about = "ListenBrainz statistics served from cache or computed from the backing stores")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Service status: load, listen count, queue sizes, user count
    Status,
    /// Number of registered users
    UserCount,
    /// Total number of stored listens
    ListenCount,
    /// Depth of a broker queue (-1 when the broker is unreachable)
    Queue {
        /// Queue name, e.g. `incoming`
        name: String,
    },
    /// Length of the importer list (-1 when unreachable)
    ImporterQueue,
    /// Most-listened entities of a user
    Top {
        entity: TopEntity,
        /// User name
        user: String,
        /// Restrict to a trailing window, e.g. "7 DAY"
        #[arg(long)]
        window: Option<TimeWindow>,
    },
    /// List registered cache backends
    Providers,
    /// Print a configuration file with every default filled in
    SampleConfig,
}

/// Entity ranked by `top`
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopEntity {
    Recordings,
    Artists,
    Releases,
}

impl TopEntity {
    pub fn kind(self) -> AggregateKind {
        match self {
            Self::Recordings => AggregateKind::TopRecordings,
            Self::Artists => AggregateKind::TopArtists,
            Self::Releases => AggregateKind::TopReleases,
        }
    }
}

impl Command {
    /// False for commands answered without configuration or backing stores
    pub fn needs_backends(&self) -> bool {
        !matches!(self, Self::Providers | Self::SampleConfig)
    }
}

/// Render a command that needs no backing store
pub fn render_offline(command: &Command) -> Result<String> {
    match command {
        Command::Providers => {
            let providers: Vec<_> = list_cache_providers()
                .into_iter()
                .map(|(name, description)| json!({ "name": name, "description": description }))
                .collect();
            Ok(serde_json::to_string_pretty(&providers)?)
        }
        Command::SampleConfig => to_toml(&AppConfig::default()),
        other => Err(Error::internal(format!("{other:?} needs backing stores"))),
    }
}

/// Run a command against the wired services and render its output
pub async fn execute(context: &AppContext, command: &Command) -> Result<String> {
    let resolver = context.resolver();

    let value = match command {
        Command::Status => serde_json::to_value(context.status().current_status().await?)?,
        Command::UserCount => {
            serde_json::to_value(resolver.scalar(&AggregateRequest::user_count()).await?)?
        }
        Command::ListenCount => {
            serde_json::to_value(resolver.scalar(&AggregateRequest::listen_count()).await?)?
        }
        Command::Queue { name } => serde_json::to_value(
            resolver
                .scalar(&AggregateRequest::queue_depth(name.as_str()))
                .await?,
        )?,
        Command::ImporterQueue => serde_json::to_value(
            resolver
                .scalar(&AggregateRequest::importer_queue_size())
                .await?,
        )?,
        Command::Top {
            entity,
            user,
            window,
        } => {
            let request = AggregateRequest::top(entity.kind(), user.as_str(), *window);
            resolver.top_entities(&request).await?.to_json()
        }
        Command::Providers | Command::SampleConfig => return render_offline(command),
    };
    Ok(serde_json::to_string_pretty(&value)?)
}

/// Entry point used by the binary
pub async fn run(cli: Cli) -> std::result::Result<(), Box<dyn std::error::Error>> {
    if !cli.command.needs_backends() {
        println!("{}", render_offline(&cli.command)?);
        return Ok(());
    }

    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    let config = loader.load()?;
    init_logging(&config.logging)?;

    let context = init_app(config)?;
    println!("{}", execute(&context, &cli.command).await?);
    Ok(())
}
