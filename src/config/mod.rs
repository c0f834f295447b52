pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "modality-advisor")]
#[command(about = "Recommend a yacht ownership modality from onboarding answers")]
pub struct CliConfig {
    #[arg(long, help = "Path to a JSON answers file, or '-' for stdin")]
    pub answers: String,

    #[arg(long, help = "Optional TOML configuration file")]
    pub config: Option<String>,

    #[arg(long, help = "Persist the result for this user id")]
    pub user: Option<String>,

    #[arg(long, help = "Override [storage] path from the configuration")]
    pub store_path: Option<String>,

    #[arg(long, help = "Catalog TOML used to suggest matching yachts")]
    pub catalog: Option<String>,

    #[arg(long, help = "Reject out-of-range answers instead of clamping")]
    pub strict: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}
