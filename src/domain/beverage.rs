//! Beverage catalog entries and the seeded reference table.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A drink users can log. Catalog data, not user-owned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Beverage {
    /// Row identifier.
    pub id: Uuid,
    /// Stable machine name, unique across the catalog.
    pub slug: String,
    /// Display name.
    pub name: String,
    /// Fraction of the consumed volume that counts as hydration.
    pub hydration_factor: f64,
    /// Plain water.
    pub is_water: bool,
    /// Contains alcohol; consumption yields a net dehydration value.
    pub is_alcoholic: bool,
    /// Only premium users may log it.
    pub is_premium: bool,
    /// Inactive beverages are hidden and cannot be logged.
    pub is_active: bool,
}

/// One row of the seeded catalog.
#[derive(Debug, Clone, Copy)]
pub struct BeverageSeed {
    /// Unique slug.
    pub slug: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Hydration factor.
    pub hydration_factor: f64,
    /// Plain water flag.
    pub is_water: bool,
    /// Alcoholic flag.
    pub is_alcoholic: bool,
    /// Premium-only flag.
    pub is_premium: bool,
}

const fn seed(
    slug: &'static str,
    name: &'static str,
    hydration_factor: f64,
    is_water: bool,
    is_alcoholic: bool,
    is_premium: bool,
) -> BeverageSeed {
    BeverageSeed {
        slug,
        name,
        hydration_factor,
        is_water,
        is_alcoholic,
        is_premium,
    }
}

/// Reference catalog inserted at startup when missing.
///
/// Alcoholic factors are hand-picked reference values, not derived from
/// alcohol content.
pub const BEVERAGE_CATALOG: [BeverageSeed; 12] = [
    seed("water", "Water", 1.00, true, false, false),
    seed("sparkling_water", "Sparkling water", 1.00, true, false, false),
    seed("tea", "Tea", 0.90, false, false, false),
    seed("coffee", "Coffee", 0.80, false, false, false),
    seed("milk", "Milk", 0.90, false, false, false),
    seed("juice", "Fruit juice", 0.85, false, false, false),
    seed("soda", "Soft drink", 0.85, false, false, false),
    seed("sports_drink", "Sports drink", 1.00, false, false, true),
    seed("coconut_water", "Coconut water", 1.00, false, false, true),
    seed("beer", "Beer", 0.50, false, true, false),
    seed("wine", "Wine", 0.40, false, true, false),
    seed("spirits", "Spirits", 0.30, false, true, false),
];

impl From<&BeverageSeed> for Beverage {
    fn from(seed: &BeverageSeed) -> Self {
        Self {
            id: Uuid::new_v4(),
            slug: seed.slug.to_string(),
            name: seed.name.to_string(),
            hydration_factor: seed.hydration_factor,
            is_water: seed.is_water,
            is_alcoholic: seed.is_alcoholic,
            is_premium: seed.is_premium,
            is_active: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn slugs_are_unique() {
        let slugs: HashSet<_> = BEVERAGE_CATALOG.iter().map(|s| s.slug).collect();
        assert_eq!(slugs.len(), BEVERAGE_CATALOG.len());
    }

    #[test]
    fn factors_are_fractions() {
        for s in &BEVERAGE_CATALOG {
            assert!(s.hydration_factor > 0.0 && s.hydration_factor <= 1.0, "{}", s.slug);
        }
    }

    #[test]
    fn alcoholic_drinks_hydrate_less_than_water() {
        for s in BEVERAGE_CATALOG.iter().filter(|s| s.is_alcoholic) {
            assert!(s.hydration_factor < 1.0);
            assert!(!s.is_water);
        }
    }
}
