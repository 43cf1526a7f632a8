use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use traincost_cli::render::render_report;
use traincost_core::{
    CourseItem, Document, DocumentStore, FallbackStore, Program, SCALAR_FIELDS, StoreConfig,
    StoreError, StoreRegistry, ToolItem, compute_report, parse_or_zero,
};
use traincost_store_json::JsonStoreFactory;
use traincost_store_sqlite::SqliteStoreFactory;

/// Annual training cost comparison for the current and proposed providers.
#[derive(Parser, Debug)]
#[command(name = "traincost")]
#[command(version, about, long_about = None)]
struct Cli {
    /// SQLite database URL for the primary store
    #[arg(long, default_value = "sqlite:traincost.db?mode=rwc")]
    database: String,

    /// Path of the local JSON fallback store
    #[arg(long, default_value = "traincost-backup.json")]
    fallback_file: PathBuf,

    /// Use the primary store only, failing instead of degrading
    #[arg(long, default_value_t = false)]
    no_fallback: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ProgramArg {
    Current,
    Proposed,
}

impl From<ProgramArg> for Program {
    fn from(arg: ProgramArg) -> Self {
        match arg {
            ProgramArg::Current => Program::Current,
            ProgramArg::Proposed => Program::Proposed,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute and print the full cost and labor report
    Report,
    /// Print the saved document as JSON
    Show,
    /// Save the default document, overwriting any saved one
    Init,
    /// Edit one scalar field by its document name and save
    Set {
        /// Field name as it appears in the document (e.g. totalEmployees)
        field: String,
        /// New value; non-numeric input becomes 0
        value: String,
    },
    /// Append a core course to a program and save
    AddCourse {
        #[arg(long, value_enum)]
        program: ProgramArg,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "0")]
        cost: String,
        #[arg(long, default_value = "0")]
        hours: String,
    },
    /// Remove the core course at a position (0-based) and save
    RemoveCourse {
        #[arg(long, value_enum)]
        program: ProgramArg,
        #[arg(long)]
        position: usize,
    },
    /// Append an ancillary tool to the current program and save
    AddTool {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "0")]
        cost: String,
    },
    /// Remove the tool at a position (0-based) and save
    RemoveTool {
        #[arg(long)]
        position: usize,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Builds the store stack: SQLite primary, JSON file secondary, joined by
/// the fallback policy. With `--no-fallback` the primary stands alone and
/// its failures surface. An unavailable primary otherwise degrades to the
/// fallback store on its own.
async fn build_store(cli: &Cli) -> Result<Box<dyn DocumentStore>> {
    let mut registry = StoreRegistry::new();
    registry.register(Box::new(SqliteStoreFactory));
    registry.register(Box::new(JsonStoreFactory));

    let primary_config = StoreConfig {
        backend: "sqlite".to_string(),
        location: cli.database.clone(),
    };

    if cli.no_fallback {
        return registry
            .create(&primary_config)
            .await
            .with_context(|| format!("failed to open primary store '{}'", cli.database));
    }

    let secondary = registry
        .create(&StoreConfig {
            backend: "json".to_string(),
            location: cli.fallback_file.display().to_string(),
        })
        .await
        .with_context(|| {
            format!(
                "failed to open fallback store '{}'",
                cli.fallback_file.display()
            )
        })?;

    match registry.create(&primary_config).await {
        Ok(primary) => Ok(Box::new(FallbackStore::new(primary, secondary))),
        Err(error) => {
            warn!(%error, "primary store unavailable, using fallback store only");
            Ok(secondary)
        }
    }
}

/// Loads the saved document, falling back to the defaults when nothing has
/// been saved yet or no store can be read.
async fn load_document(store: &dyn DocumentStore) -> Document {
    match store.load().await {
        Ok(document) => document,
        Err(StoreError::NotFound) => {
            info!("no saved document, starting from defaults");
            Document::default()
        }
        Err(error) => {
            warn!(%error, "could not load saved document, starting from defaults");
            Document::default()
        }
    }
}

async fn save_document(
    store: &dyn DocumentStore,
    document: &Document,
) -> Result<()> {
    let receipt = store
        .save(document)
        .await
        .context("failed to save changes")?;
    if receipt.used_fallback {
        println!("Saved at {} (fallback store)", receipt.timestamp.to_rfc3339());
    } else {
        println!("Saved at {}", receipt.timestamp.to_rfc3339());
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let store = build_store(&cli).await?;

    match cli.command {
        Commands::Report => {
            let document = load_document(store.as_ref()).await;
            let report = compute_report(&document.to_inputs());
            print!("{}", render_report(&document, &report));
        }

        Commands::Show => {
            let document = load_document(store.as_ref()).await;
            println!("{}", serde_json::to_string_pretty(&document)?);
        }

        Commands::Init => {
            save_document(store.as_ref(), &Document::default()).await?;
        }

        Commands::Set { field, value } => {
            let mut document = load_document(store.as_ref()).await;
            if let Err(error) = document.set_scalar(&field, &value) {
                anyhow::bail!("{error}; valid fields: {}", SCALAR_FIELDS.join(", "));
            }
            println!("{field} = {}", document.scalar(&field).unwrap_or_default());
            save_document(store.as_ref(), &document).await?;
        }

        Commands::AddCourse {
            program,
            name,
            cost,
            hours,
        } => {
            let mut document = load_document(store.as_ref()).await;
            document.state.add_course(
                program.into(),
                CourseItem {
                    name,
                    cost_per_seat: parse_or_zero(&cost),
                    hours_per_seat: parse_or_zero(&hours),
                },
            );
            save_document(store.as_ref(), &document).await?;
        }

        Commands::RemoveCourse { program, position } => {
            let mut document = load_document(store.as_ref()).await;
            match document.state.remove_course(program.into(), position) {
                Some(removed) => {
                    println!("Removed course '{}'", removed.name);
                    save_document(store.as_ref(), &document).await?;
                }
                None => anyhow::bail!(
                    "no course at position {position} in the {} program",
                    Program::from(program).as_str()
                ),
            }
        }

        Commands::AddTool { name, cost } => {
            let mut document = load_document(store.as_ref()).await;
            document.state.add_tool(ToolItem {
                name,
                annual_cost: parse_or_zero(&cost),
            });
            save_document(store.as_ref(), &document).await?;
        }

        Commands::RemoveTool { position } => {
            let mut document = load_document(store.as_ref()).await;
            match document.state.remove_tool(position) {
                Some(removed) => {
                    println!("Removed tool '{}'", removed.name);
                    save_document(store.as_ref(), &document).await?;
                }
                None => anyhow::bail!("no tool at position {position}"),
            }
        }
    }

    Ok(())
}
