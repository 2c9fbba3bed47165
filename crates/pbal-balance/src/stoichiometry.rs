//! Conversion/selectivity yields and reaction heat.
//!
//! The yield model works from conversion and selectivity alone; the reaction
//! string is carried through to the result but is not parsed into a balanced
//! equation.

use std::collections::BTreeMap;

use pbal_core::units::constants::SECONDS_PER_HOUR;
use serde::{Deserialize, Serialize};

pub const MAIN_PRODUCT: &str = "main";
pub const SIDE_PRODUCT: &str = "side";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldInput {
    /// Free-text reaction label, e.g. "CH4 + H2O -> CO + 3H2".
    pub reaction: String,
    pub feed_rate: f64,
    /// Percent of feed reacted.
    pub conversion_pct: f64,
    /// Percent of reacted feed going to the desired product.
    pub selectivity_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldResult {
    pub reaction: String,
    pub products: BTreeMap<String, f64>,
    pub byproducts: BTreeMap<String, f64>,
    pub unreacted_feed: f64,
}

pub fn calculate_yields(input: &YieldInput) -> YieldResult {
    let reacted = input.feed_rate * input.conversion_pct / 100.0;
    let unreacted = input.feed_rate - reacted;
    let desired = reacted * input.selectivity_pct / 100.0;
    let byproducts = reacted - desired;

    YieldResult {
        reaction: input.reaction.clone(),
        products: BTreeMap::from([(MAIN_PRODUCT.to_string(), desired)]),
        byproducts: BTreeMap::from([(SIDE_PRODUCT.to_string(), byproducts)]),
        unreacted_feed: unreacted,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    Exothermic,
    Endothermic,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReactionHeat {
    /// Magnitude of the heat released or absorbed [kW].
    pub heat_duty_kw: f64,
    pub kind: ReactionKind,
}

/// Heat duty of a reaction from molar flow [kmol/hr] and heat of reaction
/// [kJ/mol]. Negative heat of reaction means heat is released.
pub fn calculate_reaction_heat(flow_rate: f64, heat_of_reaction: f64) -> ReactionHeat {
    ReactionHeat {
        heat_duty_kw: (flow_rate * heat_of_reaction / SECONDS_PER_HOUR).abs(),
        kind: if heat_of_reaction < 0.0 {
            ReactionKind::Exothermic
        } else {
            ReactionKind::Endothermic
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pbal_core::{Tolerances, nearly_equal};

    #[test]
    fn yields_split_feed() {
        let result = calculate_yields(&YieldInput {
            reaction: "C6H12O6 -> 2 C2H5OH + 2 CO2".into(),
            feed_rate: 1000.0,
            conversion_pct: 90.0,
            selectivity_pct: 80.0,
        });
        let tol = Tolerances::default();
        assert!(nearly_equal(result.products[MAIN_PRODUCT], 720.0, tol));
        assert!(nearly_equal(result.byproducts[SIDE_PRODUCT], 180.0, tol));
        assert!(nearly_equal(result.unreacted_feed, 100.0, tol));
        assert_eq!(result.reaction, "C6H12O6 -> 2 C2H5OH + 2 CO2");
    }

    #[test]
    fn yields_conserve_feed() {
        let result = calculate_yields(&YieldInput {
            reaction: String::new(),
            feed_rate: 37.5,
            conversion_pct: 63.0,
            selectivity_pct: 41.0,
        });
        let total =
            result.products[MAIN_PRODUCT] + result.byproducts[SIDE_PRODUCT] + result.unreacted_feed;
        assert!(nearly_equal(total, 37.5, Tolerances::default()));
    }

    #[test]
    fn methane_combustion_is_exothermic() {
        // 36 kmol/hr at -802 kJ/mol
        let heat = calculate_reaction_heat(36.0, -802.0);
        assert_eq!(heat.kind, ReactionKind::Exothermic);
        assert!(nearly_equal(heat.heat_duty_kw, 8.02, Tolerances::default()));
    }

    #[test]
    fn reforming_is_endothermic() {
        let heat = calculate_reaction_heat(10.0, 206.0);
        assert_eq!(heat.kind, ReactionKind::Endothermic);
        assert!(heat.heat_duty_kw > 0.0);
    }

    #[test]
    fn zero_heat_counts_as_endothermic() {
        let heat = calculate_reaction_heat(10.0, 0.0);
        assert_eq!(heat.kind, ReactionKind::Endothermic);
        assert_eq!(heat.heat_duty_kw, 0.0);
    }
}
