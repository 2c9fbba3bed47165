//! Case validation logic.

use std::collections::{BTreeMap, HashSet};

use pbal_core::PbalError;
use pbal_props::PropsError;

use crate::schema::BalanceCase;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Invalid stream: {0}")]
    InvalidStream(#[from] PropsError),

    #[error("Invalid config: {0}")]
    InvalidConfig(#[from] PbalError),

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

/// Reject malformed cases before any balance is computed.
///
/// Streams with all-zero flows pass; they just produce empty balances.
pub fn validate_case(case: &BalanceCase) -> Result<(), ValidationError> {
    if case.version > crate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: case.version,
        });
    }

    let mut stream_ids = HashSet::new();
    for stream in &case.streams {
        stream.validate()?;
        if !stream_ids.insert(&stream.id) {
            return Err(ValidationError::DuplicateId {
                id: stream.id.clone(),
                context: format!("case '{}' streams", case.name),
            });
        }
    }

    validate_energy_map("heat_duties", &case.auxiliary.heat_duties, true)?;
    validate_energy_map("power_loads", &case.auxiliary.power_loads, false)?;
    validate_energy_map("fuel_inputs", &case.auxiliary.fuel_inputs, false)?;

    case.config.validate()?;
    let model = &case.config.property_model;
    for (field, v) in [
        ("average_cp_kj_per_kg_k", model.average_cp_kj_per_kg_k),
        ("reference_temperature_c", model.reference_temperature_c),
        ("latent_heat_kj_per_kg", model.latent_heat_kj_per_kg),
    ] {
        if !v.is_finite() {
            return Err(ValidationError::InvalidValue {
                field: format!("config property_model {field}"),
                value: v.to_string(),
                reason: "must be finite".to_string(),
            });
        }
    }

    Ok(())
}

fn validate_energy_map(
    field: &str,
    values: &BTreeMap<String, f64>,
    signed: bool,
) -> Result<(), ValidationError> {
    for (name, kw) in values {
        if !kw.is_finite() || (!signed && *kw < 0.0) {
            return Err(ValidationError::InvalidValue {
                field: format!("auxiliary {field} '{name}'"),
                value: kw.to_string(),
                reason: if signed {
                    "must be finite".to_string()
                } else {
                    "must be non-negative and finite".to_string()
                },
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pbal_balance::{AuxiliaryEnergyData, BalanceConfig};
    use pbal_props::{Composition, ProcessStream};

    fn feed(id: &str) -> ProcessStream {
        ProcessStream::new(id, "feed", 1)
            .with_composition(Composition::pure("H2O"))
            .with_molar_flow(10.0)
    }

    #[test]
    fn accepts_minimal_case() {
        let case = BalanceCase::new("minimal").with_stream(feed("s1"));
        assert!(validate_case(&case).is_ok());
    }

    #[test]
    fn rejects_duplicate_stream_ids() {
        let case = BalanceCase::new("dup")
            .with_stream(feed("s1"))
            .with_stream(feed("s1"));
        let err = validate_case(&case).unwrap_err();
        assert!(matches!(err, ValidationError::DuplicateId { .. }));
    }

    #[test]
    fn rejects_negative_flow() {
        let case = BalanceCase::new("neg").with_stream(feed("s1").with_molar_flow(-3.0));
        let err = validate_case(&case).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidStream(_)));
    }

    #[test]
    fn cooling_duty_may_be_negative_but_power_may_not() {
        let ok = BalanceCase::new("hx")
            .with_auxiliary(AuxiliaryEnergyData::default().with_heat_duty("cooler", -20.0));
        assert!(validate_case(&ok).is_ok());

        let bad = BalanceCase::new("pump")
            .with_auxiliary(AuxiliaryEnergyData::default().with_power_load("pump", -1.0));
        let err = validate_case(&bad).unwrap_err();
        assert!(err.to_string().contains("power_loads"));
    }

    #[test]
    fn rejects_bad_config() {
        let case = BalanceCase::new("cfg").with_config(BalanceConfig {
            loss_fraction: 1.5,
            ..BalanceConfig::default()
        });
        assert!(matches!(
            validate_case(&case),
            Err(ValidationError::InvalidConfig(_))
        ));
    }

    #[test]
    fn rejects_non_finite_property_model() {
        let mut cfg = BalanceConfig::default();
        cfg.property_model.latent_heat_kj_per_kg = f64::INFINITY;
        let case = BalanceCase::new("model").with_config(cfg);
        let err = validate_case(&case).unwrap_err();
        assert!(err.to_string().contains("latent_heat_kj_per_kg"));
    }

    #[test]
    fn rejects_future_version() {
        let mut case = BalanceCase::new("future");
        case.version = crate::LATEST_VERSION + 1;
        assert!(matches!(
            validate_case(&case),
            Err(ValidationError::UnsupportedVersion { .. })
        ));
    }
}
