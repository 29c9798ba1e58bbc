use clap::Parser;

use odds_cli::app::AppController;
use odds_cli::cli::{Cli, Commands};
use odds_cli::config::AppConfig;
use odds_cli::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = AppConfig::from_env();
    if let Some(prefs) = cli.prefs {
        config.prefs_path = prefs;
    }
    if let Some(dir) = cli.export_dir {
        config.export_dir = dir;
    }

    let mut controller = AppController::new(config);
    match cli.command.unwrap_or(Commands::Dashboard) {
        Commands::Dashboard => controller.run_dashboard().await,
        Commands::Export { format } => controller.run_export(format),
        Commands::Sites => {
            controller.list_sites();
            Ok(())
        }
    }
}
