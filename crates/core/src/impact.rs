use serde::{Deserialize, Serialize};

use crate::{BucketTotals, Category};

/// Emission avoided per detected item of a category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactFactor {
    pub category: Category,
    pub kg_co2e_per_item: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ImpactEstimate {
    pub co2e_saved_kg: f64,
    pub diverted_items: u64,
    pub landfill_items: u64,
}

/// Categories without a factor contribute nothing; when a category appears
/// more than once the first factor wins.
pub fn estimate_impact(totals: &BucketTotals, factors: &[ImpactFactor]) -> ImpactEstimate {
    let mut co2e_saved_kg = 0.0;
    for category in Category::ALL {
        if let Some(factor) = factors.iter().find(|factor| factor.category == category) {
            co2e_saved_kg += totals.count(category) as f64 * factor.kg_co2e_per_item;
        }
    }
    ImpactEstimate {
        co2e_saved_kg,
        diverted_items: totals.diverted(),
        landfill_items: totals.trash,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimate_sums_per_category_factors() {
        let totals = BucketTotals {
            total: 10,
            trash: 2,
            recycle: 5,
            compost: 3,
        };
        let factors = [
            ImpactFactor {
                category: Category::Recycle,
                kg_co2e_per_item: 0.1,
            },
            ImpactFactor {
                category: Category::Compost,
                kg_co2e_per_item: 0.05,
            },
        ];

        let estimate = estimate_impact(&totals, &factors);

        assert!((estimate.co2e_saved_kg - (0.5 + 0.15)).abs() < 1e-9);
        assert_eq!(estimate.diverted_items, 8);
        assert_eq!(estimate.landfill_items, 2);
    }

    #[test]
    fn estimate_without_factors_is_zero() {
        let totals = BucketTotals {
            total: 1,
            trash: 0,
            recycle: 1,
            compost: 0,
        };
        let estimate = estimate_impact(&totals, &[]);
        assert_eq!(estimate.co2e_saved_kg, 0.0);
        assert_eq!(estimate.diverted_items, 1);
    }
}
