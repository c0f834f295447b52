use anyhow::Context;
use clap::Parser;
use modality_advisor::config::toml_config::BatchSettings;
use modality_advisor::core::ConfigProvider;
use modality_advisor::utils::error::ErrorSeverity;
use modality_advisor::utils::{logger, validation::Validate};
use modality_advisor::{AdvisorConfig, BatchPipeline, BatchRunner, LocalStore};

#[derive(Parser)]
#[command(name = "batch-advisor")]
#[command(about = "Score a CSV export of onboarding answers")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Store root; overrides [storage] path
    #[arg(long)]
    store_path: Option<String>,

    /// Input CSV key relative to the store root; overrides [batch] input
    #[arg(short, long)]
    input: Option<String>,

    /// Output prefix relative to the store root; overrides [batch] output_prefix
    #[arg(short, long)]
    output: Option<String>,

    /// Reject malformed rows instead of skipping them
    #[arg(long)]
    strict: bool,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Validate configuration and input location without scoring
    #[arg(long)]
    dry_run: bool,
}

fn load_config(args: &Args) -> anyhow::Result<AdvisorConfig> {
    let mut config = match &args.config {
        Some(path) => AdvisorConfig::from_file(path)
            .with_context(|| format!("Failed to load config file '{}'", path))?,
        None => AdvisorConfig::default(),
    };

    if let Some(path) = &args.store_path {
        config.storage.path = path.clone();
    }
    if let Some(input) = &args.input {
        config.batch.input = input.clone();
    }
    if let Some(output) = &args.output {
        config.batch.output_prefix = output.clone();
    }
    if args.strict {
        config.validation.mode = modality_advisor::core::weights::ValidationMode::Strict;
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.json_logs {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting batch-advisor");

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let settings = BatchSettings::from_config(&config);

    tracing::info!("📋 Store root: {}", config.storage_path());
    tracing::info!("📥 Input: {}", settings.input_key());
    tracing::info!("📤 Output prefix: {}", settings.output_prefix());
    tracing::info!("🔧 Validation mode: {:?}", settings.validation_mode());

    if args.dry_run {
        let input = std::path::Path::new(config.storage_path()).join(settings.input_key());
        if input.exists() {
            tracing::info!("🔍 DRY RUN - input found at {}", input.display());
        } else {
            tracing::warn!("🔍 DRY RUN - input missing at {}", input.display());
        }
        return Ok(());
    }

    let store = LocalStore::new(config.storage_path().to_string());
    let pipeline = BatchPipeline::new(store, settings);
    let runner = BatchRunner::new(pipeline);

    match runner.run().await {
        Ok(output_key) => {
            println!("✅ Batch scoring completed successfully!");
            println!("📁 Output saved to: {}/{}", config.storage_path(), output_key);
        }
        Err(e) => {
            tracing::error!(
                "❌ Batch scoring failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 4,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}
