//! Stream composition as mole fractions keyed by formula.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::component::Component;
use crate::error::{PropsError, PropsResult};
use crate::registry;

/// Mole fractions keyed by formula (or free-text species name such as "biomass").
///
/// Fractions are taken as given: they are not normalized and are not required
/// to sum to 1. Keys are kept in sorted order so every computation over a
/// composition is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Composition {
    fractions: BTreeMap<String, f64>,
}

impl Composition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-species composition with mole fraction 1.
    pub fn pure(key: impl Into<String>) -> Self {
        Self::new().with(key, 1.0)
    }

    /// Build from `(key, fraction)` pairs, rejecting negative or non-finite fractions.
    pub fn from_pairs<K, I>(pairs: I) -> PropsResult<Self>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, f64)>,
    {
        let mut fractions = BTreeMap::new();
        for (key, frac) in pairs {
            let key = key.into();
            if key.trim().is_empty() {
                return Err(PropsError::InvalidArg {
                    what: "empty component key".into(),
                });
            }
            if !frac.is_finite() || frac < 0.0 {
                return Err(PropsError::NonPhysical {
                    what: format!("mole fraction of {key}"),
                });
            }
            fractions.insert(key, frac);
        }
        Ok(Self { fractions })
    }

    /// Builder-style insert; later values for the same key replace earlier ones.
    pub fn with(mut self, key: impl Into<String>, fraction: f64) -> Self {
        self.fractions.insert(key.into(), fraction);
        self
    }

    /// Mole fraction under this exact key (0.0 if absent).
    pub fn mole_fraction(&self, key: &str) -> f64 {
        self.fractions.get(key).copied().unwrap_or(0.0)
    }

    /// Mole fraction of a cataloged component, summed over every key that
    /// parses to it (so "H2O" and "water" both count).
    pub fn component_fraction(&self, component: Component) -> f64 {
        self.fractions
            .iter()
            .filter(|(key, _)| key.parse::<Component>().ok() == Some(component))
            .map(|(_, frac)| *frac)
            .fold(0.0_f64, |acc, v| acc + v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.fractions.iter().map(|(k, f)| (k.as_str(), *f))
    }

    pub fn is_empty(&self) -> bool {
        self.fractions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fractions.len()
    }

    /// Sum of all mole fractions (not necessarily 1).
    pub fn total_fraction(&self) -> f64 {
        self.fractions.values().fold(0.0_f64, |acc, v| acc + v)
    }

    /// Mixture molecular weight [g/mol]: Σ xᵢ·MWᵢ, with uncataloged keys at the
    /// registry default.
    pub fn molecular_weight(&self) -> f64 {
        self.fractions
            .iter()
            .map(|(key, frac)| frac * registry::lookup(key).molecular_weight)
            .fold(0.0_f64, |acc, v| acc + v)
    }

    /// Keys that resolve to the registry default rather than a cataloged entry.
    pub fn unregistered(&self) -> Vec<&str> {
        self.fractions
            .keys()
            .filter(|key| !registry::is_registered(key))
            .map(String::as_str)
            .collect()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use pbal_core::{Tolerances, nearly_equal};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn molecular_weight_is_linear_in_fractions(
            fracs in prop::collection::vec(0.0_f64..1.0_f64, 1..5),
            scale in 0.1_f64..10.0_f64,
        ) {
            let keys = ["H2", "O2", "N2", "CO2", "CH4"];
            let comp = Composition::from_pairs(
                fracs.iter().enumerate().map(|(i, &f)| (keys[i], f)),
            ).unwrap();
            let scaled = Composition::from_pairs(
                fracs.iter().enumerate().map(|(i, &f)| (keys[i], f * scale)),
            ).unwrap();
            let tol = Tolerances { abs: 1e-9, rel: 1e-9 };
            prop_assert!(nearly_equal(
                scaled.molecular_weight(),
                comp.molecular_weight() * scale,
                tol,
            ));
        }
    }
}
