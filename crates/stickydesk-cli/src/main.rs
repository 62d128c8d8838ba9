use std::path::PathBuf;

use clap::{Parser, Subcommand};
use stickydesk_core::StorePaths;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "stickydesk", version, about = "StickyDesk CLI")]
struct Cli {
    /// Directory holding the data and config documents
    /// (defaults to $STICKYDESK_DATA_DIR, then ~/.config/stickydesk)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calendar events
    Calendar {
        #[command(subcommand)]
        action: commands::calendar::CalendarAction,
    },
    /// To-do list
    Todo {
        #[command(subcommand)]
        action: commands::todo::TodoAction,
    },
    /// Day, week and month planners
    Plan {
        #[command(subcommand)]
        planner: commands::plan::PlanAction,
    },
    /// Pomodoro timer
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Widget colors, geometry and expansion
    Widget {
        #[command(subcommand)]
        action: commands::widget::WidgetAction,
    },
    /// Show document locations and check that they parse
    Doctor,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("stickydesk_core=warn,stickydesk=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let paths = StorePaths::resolve(cli.data_dir.as_deref());
    tracing::debug!(data = %paths.data.display(), config = %paths.config.display(), "resolved document paths");

    let result = match cli.command {
        Commands::Calendar { action } => commands::calendar::run(action, &paths),
        Commands::Todo { action } => commands::todo::run(action, &paths),
        Commands::Plan { planner } => commands::plan::run(planner, &paths),
        Commands::Timer { action } => commands::timer::run(action, &paths),
        Commands::Widget { action } => commands::widget::run(action, &paths),
        Commands::Doctor => commands::doctor::run(&paths),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
