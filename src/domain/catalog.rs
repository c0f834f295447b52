use crate::domain::model::Modality;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnConfig {
    pub price: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarnConfig {
    pub price: u64,
    pub expected_yield_pct: f64,
    pub owner_usage_days: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoOwnConfig {
    pub share_price: u64,
    pub total_shares: u32,
    pub usage_days_per_share: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestConfig {
    pub min_ticket: u64,
    pub expected_yield_pct: f64,
}

/// Per-yacht terms for one modality. Each variant carries only the data
/// that modality needs, so an EARN offer cannot exist without yield data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "modality", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModalityOffer {
    Own(OwnConfig),
    Earn(EarnConfig),
    CoOwn(CoOwnConfig),
    Invest(InvestConfig),
}

impl ModalityOffer {
    pub fn modality(&self) -> Modality {
        match self {
            ModalityOffer::Own(_) => Modality::Own,
            ModalityOffer::Earn(_) => Modality::Earn,
            ModalityOffer::CoOwn(_) => Modality::CoOwn,
            ModalityOffer::Invest(_) => Modality::Invest,
        }
    }

    /// Capital needed to enter this offer.
    pub fn entry_price(&self) -> u64 {
        match self {
            ModalityOffer::Own(c) => c.price,
            ModalityOffer::Earn(c) => c.price,
            ModalityOffer::CoOwn(c) => c.share_price,
            ModalityOffer::Invest(c) => c.min_ticket,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Yacht {
    pub id: String,
    pub name: String,
    pub model: String,
    pub length_ft: f64,
    pub home_port: String,
    #[serde(default)]
    pub offers: Vec<ModalityOffer>,
}

impl Yacht {
    pub fn offer_for(&self, modality: Modality) -> Option<&ModalityOffer> {
        self.offers.iter().find(|o| o.modality() == modality)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offer_entry_price() {
        let share = ModalityOffer::CoOwn(CoOwnConfig {
            share_price: 85_000,
            total_shares: 5,
            usage_days_per_share: 28,
        });
        assert_eq!(share.modality(), Modality::CoOwn);
        assert_eq!(share.entry_price(), 85_000);
    }

    #[test]
    fn test_earn_offer_requires_yield() {
        let json = r#"{"modality": "EARN", "price": 300000, "owner_usage_days": 30}"#;
        assert!(serde_json::from_str::<ModalityOffer>(json).is_err());

        let json = r#"{"modality": "EARN", "price": 300000, "expected_yield_pct": 6.5, "owner_usage_days": 30}"#;
        let offer: ModalityOffer = serde_json::from_str(json).unwrap();
        assert_eq!(offer.modality(), Modality::Earn);
    }
}
