use clap::Parser;
use modality_advisor::core::listings::suggest_listings;
use modality_advisor::core::weights::ValidationMode;
use modality_advisor::utils::error::ErrorSeverity;
use modality_advisor::utils::{logger, validation::Validate};
use modality_advisor::{
    AdvisorConfig, CliConfig, LocalStore, OnboardingAdvisor, Result, StaticCatalog, SurveyAnswers,
};
use std::io::Read;

fn read_answers(source: &str) -> Result<SurveyAnswers> {
    let content = if source == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(source)?
    };
    Ok(serde_json::from_str(&content)?)
}

fn load_config(cli: &CliConfig) -> Result<AdvisorConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            AdvisorConfig::from_file(path)?
        }
        None => AdvisorConfig::default(),
    };

    if cli.strict {
        config.validation.mode = ValidationMode::Strict;
    }
    if let Some(path) = &cli.store_path {
        config.storage.path = path.clone();
    }

    config.validate()?;
    Ok(config)
}

async fn run(cli: &CliConfig) -> Result<serde_json::Value> {
    let config = load_config(cli)?;
    let answers = read_answers(&cli.answers)?;
    tracing::debug!("Survey answers: {:?}", answers);

    let recommender = config.recommender();
    let (answers, result) = match &cli.user {
        Some(user) => {
            let store = LocalStore::new(config.storage_path().to_string());
            let advisor = OnboardingAdvisor::new(recommender, store);
            let stored = advisor.complete_answers(user, &answers).await?;
            tracing::info!("💾 Saved result for {} under {}", user, config.storage_path());
            (stored.answers, stored.result)
        }
        None => {
            let prepared = recommender.prepare(&answers)?;
            let result = recommender.recommend(&prepared)?;
            (prepared, result)
        }
    };

    let catalog_path = cli
        .catalog
        .clone()
        .or_else(|| config.catalog.as_ref().map(|c| c.path.clone()));

    let listings = match catalog_path {
        Some(path) => {
            let catalog = StaticCatalog::from_file(&path)?;
            suggest_listings(&catalog, &result, &answers, config.suggestion_limit())?
        }
        None => Vec::new(),
    };

    Ok(serde_json::json!({
        "recommendation": result,
        "listings": listings,
    }))
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);
    tracing::info!("Starting modality-advisor");

    match run(&cli).await {
        Ok(output) => {
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Err(e) => {
            tracing::error!(
                "❌ Recommendation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            // 依錯誤嚴重程度決定退出碼
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
