use crate::domain::catalog::Yacht;
use crate::domain::model::{Modality, RecommendationResult, SurveyAnswers};
use crate::domain::ports::CatalogRepository;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingSuggestion {
    pub yacht_id: String,
    pub name: String,
    pub modality: Modality,
    pub entry_price: u64,
}

/// Yachts offering the recommended modality at an entry price the user
/// can afford, cheapest first.
pub fn suggest_listings<C: CatalogRepository + ?Sized>(
    catalog: &C,
    result: &RecommendationResult,
    answers: &SurveyAnswers,
    limit: usize,
) -> Result<Vec<ListingSuggestion>> {
    let budget = u64::try_from(answers.budget_max.max(0)).unwrap_or(0);
    let yachts = catalog.yachts()?;

    let mut suggestions: Vec<ListingSuggestion> = yachts
        .iter()
        .filter_map(|yacht: &Yacht| {
            let offer = yacht.offer_for(result.primary)?;
            let entry_price = offer.entry_price();
            (entry_price <= budget).then(|| ListingSuggestion {
                yacht_id: yacht.id.clone(),
                name: yacht.name.clone(),
                modality: result.primary,
                entry_price,
            })
        })
        .collect();

    suggestions.sort_by(|a, b| {
        a.entry_price
            .cmp(&b.entry_price)
            .then_with(|| a.yacht_id.cmp(&b.yacht_id))
    });
    suggestions.truncate(limit);

    tracing::debug!(
        "Found {} listings for {} within budget {}",
        suggestions.len(),
        result.primary,
        budget
    );
    Ok(suggestions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::catalog::StaticCatalog;
    use crate::core::recommender::recommend;
    use crate::domain::catalog::{CoOwnConfig, ModalityOffer, OwnConfig};
    use crate::domain::model::{GeoPreference, Goal, UsagePriority};

    fn yacht(id: &str, offers: Vec<ModalityOffer>) -> Yacht {
        Yacht {
            id: id.to_string(),
            name: id.to_uppercase(),
            model: "Test 40".to_string(),
            length_ft: 40.0,
            home_port: "Split".to_string(),
            offers,
        }
    }

    fn share(price: u64) -> ModalityOffer {
        ModalityOffer::CoOwn(CoOwnConfig {
            share_price: price,
            total_shares: 4,
            usage_days_per_share: 35,
        })
    }

    fn fractional_answers() -> SurveyAnswers {
        SurveyAnswers {
            goals: [Goal::ShareOwnership].into_iter().collect(),
            budget_min: 40_000,
            budget_max: 90_000,
            monthly_payment_comfort: 1_000,
            open_to_financing: true,
            usage_vs_yield: Some(UsagePriority::LifestylePlusIncome),
            geo_preference: GeoPreference::Region,
            expected_usage_days: 60,
        }
    }

    #[test]
    fn test_suggests_affordable_offers_for_primary() {
        let catalog = StaticCatalog::new(vec![
            yacht("c", vec![share(70_000)]),
            yacht("a", vec![share(95_000)]),
            yacht("b", vec![share(70_000)]),
            yacht("d", vec![ModalityOffer::Own(OwnConfig { price: 60_000 })]),
        ])
        .unwrap();

        let answers = fractional_answers();
        let result = recommend(&answers);
        assert_eq!(result.primary, Modality::CoOwn);

        let suggestions = suggest_listings(&catalog, &result, &answers, 10).unwrap();
        let ids: Vec<&str> = suggestions.iter().map(|s| s.yacht_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
        assert!(suggestions.iter().all(|s| s.modality == Modality::CoOwn));
    }

    #[test]
    fn test_limit_truncates() {
        let catalog = StaticCatalog::new(vec![
            yacht("a", vec![share(10_000)]),
            yacht("b", vec![share(20_000)]),
            yacht("c", vec![share(30_000)]),
        ])
        .unwrap();

        let answers = fractional_answers();
        let result = recommend(&answers);
        let suggestions = suggest_listings(&catalog, &result, &answers, 2).unwrap();
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].entry_price, 10_000);
    }
}
