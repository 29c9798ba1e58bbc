use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::export::ExportFormat;

#[derive(Parser)]
#[command(name = "odds-cli")]
#[command(about = "Terminal dashboard for comparing betting odds across bookmakers")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Preferences file location.
    #[arg(long)]
    pub prefs: Option<PathBuf>,

    /// Directory export artifacts are written to.
    #[arg(long)]
    pub export_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive odds dashboard
    Dashboard,

    /// Export the current odds snapshot to a file
    Export {
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,
    },

    /// List the tracked bookmaker sites
    Sites,
}
