//! Overall energy balance across the system boundary.

use std::collections::BTreeMap;

use pbal_core::relative_error;
use pbal_core::units::constants::SECONDS_PER_HOUR;
use pbal_props::{ProcessStream, PropertyModel, StreamRole};
use serde::{Deserialize, Serialize};

use crate::config::{BalanceConfig, DEFAULT_ENERGY_TOLERANCE, DEFAULT_LOSS_FRACTION};

pub const ENERGY_UNIT: &str = "kW";

/// Equipment-level energy data supplied alongside the streams [kW].
///
/// Heat duties are signed: positive means heat added to the process,
/// negative means heat removed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuxiliaryEnergyData {
    pub heat_duties: BTreeMap<String, f64>,
    pub power_loads: BTreeMap<String, f64>,
    pub fuel_inputs: BTreeMap<String, f64>,
}

impl AuxiliaryEnergyData {
    pub fn with_heat_duty(mut self, equipment: impl Into<String>, kw: f64) -> Self {
        self.heat_duties.insert(equipment.into(), kw);
        self
    }

    pub fn with_power_load(mut self, equipment: impl Into<String>, kw: f64) -> Self {
        self.power_loads.insert(equipment.into(), kw);
        self
    }

    pub fn with_fuel_input(mut self, fuel: impl Into<String>, kw: f64) -> Self {
        self.fuel_inputs.insert(fuel.into(), kw);
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EnergyIn {
    pub feedstock_enthalpy: f64,
    pub heat_duty: f64,
    pub work_input: f64,
    pub fuel: f64,
    /// Electrical share of `work_input`. Reported for breakdowns only; it is
    /// not added to `total_in` a second time.
    pub electricity: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EnergyOut {
    pub product_enthalpy: f64,
    pub heat_removed: f64,
    pub losses: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyBalance {
    pub unit: String,
    pub energy_in: EnergyIn,
    pub energy_out: EnergyOut,
    pub total_in: f64,
    pub total_out: f64,
    /// `total_in − total_out`
    pub convergence: f64,
    pub converged: bool,
}

/// Computes the energy balance over a fixed stream set.
///
/// Losses are booked as a fixed fraction of total input, so the balance is
/// biased toward closing by construction. Streams without an enthalpy carry
/// none unless a property model is set, in which case it estimates one from
/// temperature and phase.
#[derive(Debug, Clone)]
pub struct EnergyBalanceCalculator<'a> {
    streams: &'a [ProcessStream],
    tolerance: f64,
    loss_fraction: f64,
    property_model: Option<PropertyModel>,
}

impl<'a> EnergyBalanceCalculator<'a> {
    pub fn new(streams: &'a [ProcessStream], tolerance: f64) -> Self {
        Self {
            streams,
            tolerance,
            loss_fraction: DEFAULT_LOSS_FRACTION,
            property_model: None,
        }
    }

    pub fn with_default_tolerance(streams: &'a [ProcessStream]) -> Self {
        Self::new(streams, DEFAULT_ENERGY_TOLERANCE)
    }

    pub fn with_config(streams: &'a [ProcessStream], config: &BalanceConfig) -> Self {
        Self::new(streams, config.energy_tolerance)
            .with_loss_fraction(config.loss_fraction)
            .with_property_model(config.property_model)
    }

    pub fn with_loss_fraction(mut self, loss_fraction: f64) -> Self {
        self.loss_fraction = loss_fraction;
        self
    }

    /// Estimate missing stream enthalpies with `model`.
    pub fn with_property_model(mut self, model: PropertyModel) -> Self {
        self.property_model = Some(model);
        self
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Specific enthalpy [kJ/kg] used for `stream`.
    fn specific_enthalpy(&self, stream: &ProcessStream) -> f64 {
        match (stream.enthalpy, &self.property_model) {
            (Some(h), _) => h.kj_per_kg,
            (None, Some(model)) => model.enthalpy(stream.temperature(), stream.phase).kj_per_kg,
            (None, None) => 0.0,
        }
    }

    /// Enthalpy flow [kW] of streams on one side of the boundary.
    fn enthalpy_flow(&self, role: StreamRole) -> f64 {
        sum_kw(
            self.streams
                .iter()
                .filter(|s| s.effective_role() == role)
                .map(|s| s.flow_rate.mass_kg_per_hr * self.specific_enthalpy(s) / SECONDS_PER_HOUR),
        )
    }

    pub fn calculate_energy_balance(&self, aux: &AuxiliaryEnergyData) -> EnergyBalance {
        let duties = || aux.heat_duties.values().copied();
        let heat_duty = sum_kw(duties().filter(|q| *q > 0.0));
        let heat_removed = sum_kw(duties().filter(|q| *q < 0.0).map(f64::abs));
        let work_input = sum_kw(aux.power_loads.values().copied());
        let fuel = sum_kw(aux.fuel_inputs.values().copied());

        let energy_in = EnergyIn {
            feedstock_enthalpy: self.enthalpy_flow(StreamRole::Inlet),
            heat_duty,
            work_input,
            fuel,
            electricity: work_input,
        };
        let total_in =
            energy_in.feedstock_enthalpy + energy_in.heat_duty + energy_in.work_input + energy_in.fuel;

        let energy_out = EnergyOut {
            product_enthalpy: self.enthalpy_flow(StreamRole::Outlet),
            heat_removed,
            losses: total_in * self.loss_fraction,
        };
        let total_out = energy_out.product_enthalpy + energy_out.heat_removed + energy_out.losses;

        let convergence = total_in - total_out;
        let converged = relative_error(convergence, total_in) < self.tolerance;

        if convergence.is_nan() {
            tracing::warn!("energy balance is NaN, reporting not converged");
        }
        tracing::debug!(total_in, total_out, convergence, converged, "energy balance closed");

        EnergyBalance {
            unit: ENERGY_UNIT.to_string(),
            energy_in,
            energy_out,
            total_in,
            total_out,
            convergence,
            converged,
        }
    }
}

/// Sum that stays +0.0 when empty.
fn sum_kw(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(0.0_f64, |acc, q| acc + q)
}
