use crate::core::recommender::Recommender;
use crate::core::weights::{ScoringConfig, ScoringThresholds, ScoringWeights, ValidationMode};
use crate::core::ConfigProvider;
use crate::utils::error::{AdvisorError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_range, validate_store_key, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Upper bound for any single scoring weight.
pub const MAX_WEIGHT: u32 = 1_000;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdvisorConfig {
    pub advisor: AdvisorSection,
    #[serde(default)]
    pub weights: ScoringWeights,
    #[serde(default)]
    pub thresholds: ScoringThresholds,
    #[serde(default)]
    pub validation: ValidationSection,
    #[serde(default)]
    pub storage: StorageSection,
    pub catalog: Option<CatalogSection>,
    #[serde(default)]
    pub batch: BatchSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisorSection {
    pub name: String,
    pub description: Option<String>,
    pub version: String,
}

impl Default for AdvisorSection {
    fn default() -> Self {
        Self {
            name: "modality-advisor".to_string(),
            description: None,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationSection {
    #[serde(default)]
    pub mode: ValidationMode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSection {
    pub path: String,
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            path: "./.advisor".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSection {
    pub path: String,
    pub suggestion_limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSection {
    pub input: String,
    pub output_prefix: String,
}

impl Default for BatchSection {
    fn default() -> Self {
        Self {
            input: "input.csv".to_string(),
            output_prefix: "reports".to_string(),
        }
    }
}

impl AdvisorConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AdvisorError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AdvisorError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${ADVISOR_STORE})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AdvisorError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("advisor.name", &self.advisor.name)?;
        validate_path("storage.path", &self.storage.path)?;

        let t = &self.thresholds;
        validate_range("thresholds.max_usage_days", t.max_usage_days, 1, 366)?;
        validate_range("thresholds.low_usage_days", t.low_usage_days, 0, t.max_usage_days)?;
        validate_range(
            "thresholds.high_usage_days",
            t.high_usage_days,
            t.low_usage_days + 1,
            t.max_usage_days,
        )?;
        validate_range(
            "thresholds.full_purchase_budget",
            t.full_purchase_budget,
            0,
            i64::MAX,
        )?;

        let w = &self.weights;
        validate_range("weights.goal", w.goal, 0, MAX_WEIGHT)?;
        validate_range("weights.usage_priority", w.usage_priority, 0, MAX_WEIGHT)?;
        validate_range(
            "weights.usage_priority_secondary",
            w.usage_priority_secondary,
            0,
            MAX_WEIGHT,
        )?;
        validate_range("weights.usage_days", w.usage_days, 0, MAX_WEIGHT)?;
        validate_range("weights.budget", w.budget, 0, MAX_WEIGHT)?;
        validate_range("weights.financing", w.financing, 0, MAX_WEIGHT)?;

        // 使用天數、預算與貸款只在有意圖訊號時計分
        if w.goal == 0 && w.usage_priority == 0 {
            return Err(AdvisorError::ConfigValidationError {
                field: "weights".to_string(),
                message: "goal or usage_priority must be positive, otherwise every survey falls back to a flat split".to_string(),
            });
        }

        if let Some(catalog) = &self.catalog {
            validate_path("catalog.path", &catalog.path)?;
            if let Some(limit) = catalog.suggestion_limit {
                validate_range("catalog.suggestion_limit", limit, 1, 100)?;
            }
        }

        validate_store_key(&self.batch.input).map_err(|_| invalid_key("batch.input", &self.batch.input))?;
        if !self.batch.output_prefix.is_empty() {
            validate_store_key(&self.batch.output_prefix)
                .map_err(|_| invalid_key("batch.output_prefix", &self.batch.output_prefix))?;
        }

        Ok(())
    }

    pub fn scoring_config(&self) -> ScoringConfig {
        ScoringConfig {
            weights: self.weights,
            thresholds: self.thresholds,
        }
    }

    pub fn recommender(&self) -> Recommender {
        Recommender::new(self.scoring_config(), self.validation.mode)
    }

    pub fn storage_path(&self) -> &str {
        &self.storage.path
    }

    pub fn suggestion_limit(&self) -> usize {
        self.catalog
            .as_ref()
            .and_then(|c| c.suggestion_limit)
            .unwrap_or(3)
    }
}

fn invalid_key(field: &str, value: &str) -> AdvisorError {
    AdvisorError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: "Must be a relative key without '..' segments".to_string(),
    }
}

/// Holds the derived scoring config so `ConfigProvider::scoring` can lend it.
#[derive(Debug, Clone)]
pub struct BatchSettings {
    scoring: ScoringConfig,
    mode: ValidationMode,
    input_key: String,
    output_prefix: String,
}

impl BatchSettings {
    pub fn from_config(config: &AdvisorConfig) -> Self {
        Self {
            scoring: config.scoring_config(),
            mode: config.validation.mode,
            input_key: config.batch.input.clone(),
            output_prefix: config.batch.output_prefix.clone(),
        }
    }
}

impl ConfigProvider for BatchSettings {
    fn scoring(&self) -> &ScoringConfig {
        &self.scoring
    }

    fn validation_mode(&self) -> ValidationMode {
        self.mode
    }

    fn input_key(&self) -> &str {
        &self.input_key
    }

    fn output_prefix(&self) -> &str {
        &self.output_prefix
    }
}

impl Validate for AdvisorConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_minimal_config_uses_defaults() {
        let toml_content = r#"
[advisor]
name = "onboarding"
version = "1.0.0"
"#;

        let config = AdvisorConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.advisor.name, "onboarding");
        assert_eq!(config.weights, ScoringWeights::default());
        assert_eq!(config.thresholds.full_purchase_budget, 150_000);
        assert_eq!(config.validation.mode, ValidationMode::Clamp);
        assert_eq!(config.storage_path(), "./.advisor");
        assert_eq!(config.suggestion_limit(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[advisor]
name = "onboarding"
description = "EU marketplace"
version = "2.1"

[weights]
goal = 4
financing = 0

[thresholds]
full_purchase_budget = 200000

[validation]
mode = "strict"

[storage]
path = "/var/lib/advisor"

[catalog]
path = "fixtures/catalog.toml"
suggestion_limit = 5

[batch]
input = "exports/survey.csv"
output_prefix = "exports/scored"
"#;

        let config = AdvisorConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.weights.goal, 4);
        assert_eq!(config.weights.financing, 0);
        assert_eq!(config.weights.budget, 2);
        assert_eq!(config.thresholds.full_purchase_budget, 200_000);
        assert_eq!(config.thresholds.high_usage_days, 100);
        assert_eq!(config.validation.mode, ValidationMode::Strict);
        assert_eq!(config.suggestion_limit(), 5);
        assert_eq!(config.recommender().mode(), ValidationMode::Strict);

        let settings = BatchSettings::from_config(&config);
        assert_eq!(settings.input_key(), "exports/survey.csv");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("MODALITY_ADVISOR_TEST_STORE", "/tmp/advisor-store");

        let toml_content = r#"
[advisor]
name = "test"
version = "1.0"

[storage]
path = "${MODALITY_ADVISOR_TEST_STORE}"
"#;

        let config = AdvisorConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.storage.path, "/tmp/advisor-store");

        std::env::remove_var("MODALITY_ADVISOR_TEST_STORE");
    }

    #[test]
    fn test_threshold_validation() {
        let toml_content = r#"
[advisor]
name = "test"
version = "1.0"

[thresholds]
low_usage_days = 100
high_usage_days = 20
"#;

        let config = AdvisorConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_all_zero_weights_rejected() {
        let toml_content = r#"
[advisor]
name = "test"
version = "1.0"

[weights]
goal = 0
usage_priority = 0
usage_priority_secondary = 0
usage_days = 0
budget = 0
financing = 0
"#;

        let config = AdvisorConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_oversized_weight_rejected() {
        let toml_content = r#"
[advisor]
name = "test"
version = "1.0"

[weights]
goal = 4294967295
usage_priority = 1
"#;

        let config = AdvisorConfig::from_toml_str(toml_content).unwrap();
        match config.validate() {
            Err(AdvisorError::InvalidConfigValueError { field, .. }) => {
                assert_eq!(field, "weights.goal")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_refining_only_weights_rejected() {
        let toml_content = r#"
[advisor]
name = "test"
version = "1.0"

[weights]
goal = 0
usage_priority = 0
usage_days = 2
budget = 2
financing = 1
"#;

        let config = AdvisorConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(AdvisorError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_escaping_batch_key_rejected() {
        let toml_content = r#"
[advisor]
name = "test"
version = "1.0"

[batch]
input = "../survey.csv"
output_prefix = "reports"
"#;

        let config = AdvisorConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(AdvisorError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_unknown_validation_mode_fails_to_parse() {
        let toml_content = r#"
[advisor]
name = "test"
version = "1.0"

[validation]
mode = "lenient"
"#;
        assert!(AdvisorConfig::from_toml_str(toml_content).is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[advisor]
name = "file-test"
version = "1.0"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = AdvisorConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.advisor.name, "file-test");
    }
}
