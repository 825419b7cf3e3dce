mod display;

use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use triage_ai::Coordinator;
use triage_core::TriageConfig;
use triage_core::config::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use triage_dispatch::{DispatchOutcome, Dispatcher};
use triage_store::{MemoryStore, TicketRepository};

#[derive(Parser)]
#[command(name = "triage", version, about = "Support-ticket triage pipeline")]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct ConfigArgs {
    /// Credential for the model service; without it triage runs on keyword
    /// rules alone.
    #[arg(long, env = "MODEL_API_CREDENTIAL", hide_env_values = true)]
    api_credential: Option<String>,

    /// Model name sent to the service.
    #[arg(long, env = "MODEL_NAME", default_value = DEFAULT_MODEL)]
    model: String,

    /// Endpoint root of an OpenAI-compatible chat-completions service.
    #[arg(long, env = "MODEL_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Defer enrichment to the worker queue instead of running it inline.
    #[arg(long, env = "ASYNC_ENRICHMENT", default_value_t = false)]
    async_enrichment: bool,
}

impl ConfigArgs {
    fn into_config(self) -> TriageConfig {
        TriageConfig {
            api_credential: self.api_credential.filter(|c| !c.trim().is_empty()),
            model: self.model,
            base_url: self.base_url,
            async_enrichment: self.async_enrichment,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Classify a title/description and print the enrichment record.
    Analyze {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        /// Print the record as JSON instead of a table.
        #[arg(long)]
        json: bool,
        /// Ignore any configured credential and use keyword rules only.
        #[arg(long)]
        offline: bool,
    },
    /// Create a ticket in an in-memory store and run the full dispatch path.
    Enrich {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let mut config = cli.config.into_config();

    match cli.command {
        Command::Analyze {
            title,
            description,
            json,
            offline,
        } => {
            if offline {
                config.api_credential = None;
            }
            let coordinator = Coordinator::new(&config);
            let result = coordinator.analyze(&title, &description).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                display::print_result(&result);
            }
        }
        Command::Enrich { title, description } => {
            let store = Arc::new(MemoryStore::new());
            let ticket = store.create(title, description).await;
            let dispatcher = Dispatcher::new(store.clone(), Coordinator::new(&config), &config);

            let outcome = dispatcher.dispatch(ticket.id).await;
            if outcome == DispatchOutcome::Deferred {
                // Drain the queue so the demo observes the final state.
                dispatcher.shutdown().await;
            }
            tracing::info!(id = ticket.id, ?outcome, "dispatch finished");

            match store.find_by_id(ticket.id).await? {
                Some(ticket) => display::print_ticket(&ticket),
                None => println!("ticket {} no longer exists", ticket.id),
            }
        }
    }

    Ok(())
}
