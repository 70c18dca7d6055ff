use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "aide")]
#[command(about = "AIDE - AI assistant configuration console", long_about = None)]
struct Cli {
    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory of the durable store (overrides the config file)
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,

    /// Skip the simulated confirmation and reply delays
    #[arg(long, global = true)]
    no_delay: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all assistants
    List {
        /// Print the collection as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one assistant, including its training rules
    Show { id: String },
    /// Create an assistant
    Create {
        #[command(flatten)]
        fields: commands::assistant::AssistantFields,
    },
    /// Update an assistant's settings; omitted fields keep their value
    Update {
        id: String,
        #[command(flatten)]
        fields: commands::assistant::AssistantUpdateFields,
    },
    /// Delete an assistant
    Delete { id: String },
    /// Replace an assistant's training rules
    Train { id: String, rules: String },
    /// Chat with the simulated assistant
    Chat {
        #[arg(required = true)]
        messages: Vec<String>,
    },
    /// Remove the stored collection and return to the starting assistants
    Reset,
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("AIDE_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let context = commands::context::ConsoleContext::open(
        cli.config,
        cli.storage_dir,
        cli.no_delay,
    )?;

    match cli.command {
        Commands::List { json } => commands::assistant::list(&context, json).await?,
        Commands::Show { id } => commands::assistant::show(&context, &id).await?,
        Commands::Create { fields } => commands::assistant::create(&context, fields).await?,
        Commands::Update { id, fields } => {
            commands::assistant::update(&context, &id, fields).await?
        }
        Commands::Delete { id } => commands::assistant::delete(&context, &id).await?,
        Commands::Train { id, rules } => commands::assistant::train(&context, &id, &rules).await?,
        Commands::Chat { messages } => commands::chat::run(&context, &messages).await?,
        Commands::Reset => commands::assistant::reset(&context).await?,
    }

    Ok(())
}
