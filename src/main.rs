//! Placement Prep - job description analysis and résumé readiness
//!
//! A local-first tool that analyzes job descriptions, builds a preparation
//! plan, and scores a résumé draft, keeping everything in a local database.

use anyhow::Result;
use placement_prep::cli::{
    analyze, checklist, export, handle_config, history, resume, show, toggle, Cli, Commands,
};
use placement_prep::{AppConfig, Database};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse_args();

    // Setup logging on stderr so JSON output stays clean
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config_path = cli.config.clone().unwrap_or_else(AppConfig::default_path);
    let config = AppConfig::load_or_default(&config_path)?;

    if let Commands::Config(args) = &cli.command {
        return handle_config(&config_path, &config, args, cli.format);
    }

    let db_path = cli.db.clone().unwrap_or_else(|| config.database_path.clone());
    let db = Database::open(&db_path)?;

    // Execute command
    match &cli.command {
        Commands::Analyze(args) => {
            analyze(&db, &config, args, cli.format)?;
        }

        Commands::History(args) => {
            history(&db, &config, args.all, cli.format)?;
        }

        Commands::Show(args) => {
            show(&db, args.id.as_deref(), cli.format)?;
        }

        Commands::Toggle(args) => {
            toggle(&db, &args.skill, args.id.as_deref(), cli.format)?;
        }

        Commands::Export(args) => {
            export(&db, args)?;
        }

        Commands::Resume(args) => {
            resume(&db, &args.action, cli.format)?;
        }

        Commands::Checklist(args) => {
            checklist(&db, args.action.as_ref(), cli.format)?;
        }

        Commands::Config(_) => {}
    }

    Ok(())
}
