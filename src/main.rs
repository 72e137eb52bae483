use anyhow::Context;
use clap::{Parser, Subcommand};
use indice_manager::{
    config::Config,
    engine::{create_engine, IndexDefinition},
    IndiceManager, SearchRequest,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "indice-manager")]
#[command(about = "Blue-green index lifecycle manager", long_about = None, version)]
struct Cli {
    /// Configuration file
    #[arg(short, long, env = "INDICE_MANAGER_CONFIG")]
    config: Option<PathBuf>,

    /// Override the engine URL from configuration
    #[arg(short, long)]
    url: Option<String>,

    /// Emit JSON log lines
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create both physical indices and pin the alias
    Create {
        #[arg(value_name = "INDICE")]
        indice: String,

        /// JSON file with `settings` and `mappings`
        #[arg(short, long)]
        definition: Option<PathBuf>,
    },

    /// Copy documents from the used index into the unused one
    Reindex {
        #[arg(value_name = "INDICE")]
        indice: String,
    },

    /// Move the alias to the unused index
    Swap {
        #[arg(value_name = "INDICE")]
        indice: String,
    },

    /// Drop and recreate the unused index
    Clear {
        #[arg(value_name = "INDICE")]
        indice: String,

        /// JSON file with `settings` and `mappings`
        #[arg(short, long)]
        definition: Option<PathBuf>,
    },

    /// Show physical indices and alias designation
    Status {
        #[arg(value_name = "INDICE")]
        indice: String,
    },

    /// Refresh a physical index or alias
    Refresh {
        #[arg(value_name = "INDEX")]
        index: String,
    },

    /// Run a paginated search
    Search {
        #[arg(value_name = "INDEX")]
        index: String,

        #[arg(short, long, default_value = "10")]
        limit: u64,

        /// Page number
        #[arg(short, long, default_value = "0")]
        offset: u64,

        /// JSON request body
        #[arg(short, long)]
        body: Option<String>,
    },
}

fn init_tracing(config: &Config, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.logging.level.clone().into());

    let registry = tracing_subscriber::registry().with(filter);

    if json || config.logging.json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn load_definition(path: Option<PathBuf>) -> anyhow::Result<IndexDefinition> {
    match path {
        Some(path) => IndexDefinition::from_file(&path)
            .with_context(|| format!("loading index definition {}", path.display())),
        None => Ok(IndexDefinition::default()),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("loading configuration")?;

    if let Some(url) = cli.url {
        config.engine.url = url;
    }

    init_tracing(&config, cli.json_logs);

    config
        .validate()
        .map_err(|e| anyhow::anyhow!("invalid configuration: {}", e))?;

    let engine = create_engine(&config.engine)?;
    let manager = IndiceManager::new(engine, config.manager_options());

    match cli.command {
        Commands::Create { indice, definition } => {
            let definition = load_definition(definition)?;
            let creation = manager.create_indice(&indice, &definition).await?;
            print_json(&creation)?;
        }

        Commands::Reindex { indice } => {
            let populated = manager.reindex_indice(&indice).await?;
            print_json(&serde_json::json!({ "indice": indice, "populated": populated }))?;
        }

        Commands::Swap { indice } => {
            let state = manager.swap_indice(&indice).await?;
            print_json(&state)?;
        }

        Commands::Clear { indice, definition } => {
            let definition = load_definition(definition)?;
            let cleared = manager.clear_indice(&indice, &definition).await?;
            print_json(&serde_json::json!({ "indice": indice, "cleared": cleared }))?;
        }

        Commands::Status { indice } => {
            let status = manager.status(&indice).await?;
            print_json(&status)?;
        }

        Commands::Refresh { index } => {
            manager.refresh_index(&index).await?;
            tracing::info!(index = %index, "Index refreshed");
        }

        Commands::Search {
            index,
            limit,
            offset,
            body,
        } => {
            let body = match body {
                Some(raw) => serde_json::from_str(&raw).context("parsing search body")?,
                None => serde_json::Value::Null,
            };

            let request = SearchRequest::new(index)
                .with_pagination(limit, offset)
                .with_body(body);
            let response = manager.search(&request).await?;
            print_json(&response)?;
        }
    }

    Ok(())
}
