use crate::domain::catalog::Yacht;
use crate::domain::ports::CatalogRepository;
use crate::utils::error::{AdvisorError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    yachts: Vec<Yacht>,
}

/// Fixed catalog, usually loaded from a TOML fixture.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    yachts: Vec<Yacht>,
}

impl StaticCatalog {
    pub fn new(yachts: Vec<Yacht>) -> Result<Self> {
        let mut seen = HashSet::new();
        for yacht in &yachts {
            if !seen.insert(yacht.id.as_str()) {
                return Err(AdvisorError::InvalidConfigValueError {
                    field: "yachts.id".to_string(),
                    value: yacht.id.clone(),
                    reason: "Duplicate yacht id".to_string(),
                });
            }

            let mut modalities = HashSet::new();
            for offer in &yacht.offers {
                if !modalities.insert(offer.modality()) {
                    return Err(AdvisorError::InvalidConfigValueError {
                        field: format!("yachts[{}].offers", yacht.id),
                        value: offer.modality().to_string(),
                        reason: "A yacht can list each modality only once".to_string(),
                    });
                }
            }
        }
        Ok(Self { yachts })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: CatalogFile =
            toml::from_str(content).map_err(|e| AdvisorError::ConfigValidationError {
                field: "catalog".to_string(),
                message: format!("TOML parsing error: {}", e),
            })?;
        tracing::debug!("Loaded {} yachts from catalog", file.yachts.len());
        Self::new(file.yachts)
    }

    pub fn len(&self) -> usize {
        self.yachts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.yachts.is_empty()
    }
}

impl CatalogRepository for StaticCatalog {
    fn yachts(&self) -> Result<Vec<Yacht>> {
        Ok(self.yachts.clone())
    }
}
