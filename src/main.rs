use std::sync::Arc;

use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use edutrail::cli::{Session, browse};
use edutrail::navigation::Level;
use edutrail::persistence::JsonFilePersistence;
use edutrail_config::{GatewayConfig, LogConfig, StateConfig};
use edutrail_gateway::HttpGateway;
use edutrail_models::Section;

#[derive(Parser)]
#[command(name = "edutrail")]
#[command(about = "Browse classes, subjects, chapters, topics and resources", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current listing (default)
    Status,
    /// Go to the class listing, optionally filtered by section
    Classes {
        /// FRANCOPHONE or ANGLOPHONE
        #[arg(short, long)]
        section: Option<Section>,
    },
    /// Open the entry with this id in the current listing
    Open { id: i64 },
    /// Go up one level
    Back,
    /// Jump to a shallower level (classes, subjects, chapters, topics)
    Jump { level: Level },
    /// Move the chapter or topic at position FROM to position TO (1-based)
    Reorder { from: usize, to: usize },
    /// Resend positions that failed to save
    RetryReorders,
    /// Reload listings lost since the last run
    Restore,
    /// Forget the saved navigation and start from the class listing
    Reset,
    /// Browse interactively
    Browse,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let cli = Cli::parse();

    edutrail_observability::init_logging(&LogConfig::from_env())?;

    let persistence = JsonFilePersistence::new(StateConfig::from_env().state_path);
    let command = cli.command.unwrap_or(Commands::Status);

    if let Commands::Reset = command {
        edutrail::cli::reset(&persistence)?;
        println!("🧹 Navigation reset");
        return Ok(());
    }

    let gateway = Arc::new(HttpGateway::new(GatewayConfig::from_env())?);
    let (session, _) = Session::open(gateway, persistence).await?;

    match command {
        Commands::Status => {}
        Commands::Classes { section } => session.handle_classes(section).await?,
        Commands::Open { id } => {
            session.handle_open(id).await?;
        }
        Commands::Back => session.handle_back().await?,
        Commands::Jump { level } => session.handle_jump(level).await?,
        Commands::Reorder { from, to } => session.handle_reorder(from, to).await?,
        Commands::RetryReorders => session.handle_retry_reorders().await?,
        Commands::Restore => {
            session.handle_restore().await;
        }
        Commands::Reset => return Ok(()),
        Commands::Browse => {
            browse::run(&session).await?;
            return session.save();
        }
    }

    session.print_view();
    session.save()
}
