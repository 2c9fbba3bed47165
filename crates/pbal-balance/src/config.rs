//! Tunable constants of the balance engine.

use pbal_core::{PbalError, PbalResult};
use pbal_props::PropertyModel;
use serde::{Deserialize, Serialize};

/// Default relative closure tolerance for material balances.
pub const DEFAULT_MASS_TOLERANCE: f64 = 0.01;
/// Default relative closure tolerance for the energy balance.
pub const DEFAULT_ENERGY_TOLERANCE: f64 = 0.02;
/// Default fraction of total energy input booked as plant losses.
pub const DEFAULT_LOSS_FRACTION: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceConfig {
    pub mass_tolerance: f64,
    pub energy_tolerance: f64,
    /// Radiative/convective losses as a fraction of total energy in. Not
    /// derived from any stream or equipment data.
    pub loss_fraction: f64,
    pub property_model: PropertyModel,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            mass_tolerance: DEFAULT_MASS_TOLERANCE,
            energy_tolerance: DEFAULT_ENERGY_TOLERANCE,
            loss_fraction: DEFAULT_LOSS_FRACTION,
            property_model: PropertyModel::default(),
        }
    }
}

impl BalanceConfig {
    /// Reject tolerances that are not positive and loss fractions outside [0, 1).
    pub fn validate(&self) -> PbalResult<()> {
        for (what, tol) in [
            ("mass_tolerance", self.mass_tolerance),
            ("energy_tolerance", self.energy_tolerance),
        ] {
            if !tol.is_finite() || tol <= 0.0 {
                return Err(PbalError::InvalidArg {
                    what: format!("{what} must be positive and finite (got {tol})"),
                });
            }
        }
        if !(0.0..1.0).contains(&self.loss_fraction) {
            return Err(PbalError::InvalidArg {
                what: format!(
                    "loss_fraction must be in [0, 1) (got {})",
                    self.loss_fraction
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_engine_constants() {
        let cfg = BalanceConfig::default();
        assert_eq!(cfg.mass_tolerance, 0.01);
        assert_eq!(cfg.energy_tolerance, 0.02);
        assert_eq!(cfg.loss_fraction, 0.05);
        assert_eq!(cfg.property_model.latent_heat_kj_per_kg, 2257.0);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_override_keeps_defaults() {
        let cfg: BalanceConfig =
            serde_json::from_str(r#"{"loss_fraction": 0.08, "property_model": {"average_cp_kj_per_kg_k": 4.18}}"#)
                .unwrap();
        assert_eq!(cfg.loss_fraction, 0.08);
        assert_eq!(cfg.mass_tolerance, 0.01);
        assert_eq!(cfg.property_model.average_cp_kj_per_kg_k, 4.18);
        assert_eq!(cfg.property_model.reference_temperature_c, 25.0);
    }

    #[test]
    fn validate_rejects_bad_values() {
        let zero_tol = BalanceConfig {
            mass_tolerance: 0.0,
            ..BalanceConfig::default()
        };
        assert!(zero_tol.validate().is_err());

        let full_loss = BalanceConfig {
            loss_fraction: 1.0,
            ..BalanceConfig::default()
        };
        assert!(full_loss.validate().is_err());

        let nan_loss = BalanceConfig {
            loss_fraction: f64::NAN,
            ..BalanceConfig::default()
        };
        assert!(nan_loss.validate().is_err());
    }
}
