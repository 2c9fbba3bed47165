//! Stream property estimation.
//!
//! Deliberately simplified correlations: mole-weighted molecular weight,
//! ideal-gas or tabulated densities, and a constant-Cp sensible-heat enthalpy
//! with a flat latent-heat adder for vapor. Nothing here raises; a zero
//! density or temperature simply propagates as inf/NaN.

use pbal_core::units::constants::{
    GAS_CONSTANT_J_PER_MOL_K, KG_M3_TO_LB_FT3, KJ_KG_TO_BTU_LB, KJ_PER_MJ, SECONDS_PER_HOUR,
};
use pbal_core::units::{Pressure, Temperature, degc, to_kelvin, to_pascal};
use serde::{Deserialize, Serialize};

use crate::composition::Composition;
use crate::registry;
use crate::stream::{ProcessStream, StreamPhase};

/// Density assumed for a condensed-phase component with no tabulated value [kg/m³].
pub const DEFAULT_CONDENSED_DENSITY: f64 = 1000.0;

/// Constants of the sensible-heat enthalpy model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyModel {
    /// Composition-independent average heat capacity [kJ/(kg·K)]
    pub average_cp_kj_per_kg_k: f64,
    /// Enthalpy datum [°C]
    pub reference_temperature_c: f64,
    /// Latent heat added to every vapor stream [kJ/kg]; water's by default.
    pub latent_heat_kj_per_kg: f64,
}

impl Default for PropertyModel {
    fn default() -> Self {
        Self {
            average_cp_kj_per_kg_k: 2.0,
            reference_temperature_c: 25.0,
            latent_heat_kj_per_kg: 2257.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DensityEstimate {
    pub kg_per_m3: f64,
    pub lb_per_ft3: f64,
}

impl DensityEstimate {
    fn from_si(kg_per_m3: f64) -> Self {
        Self {
            kg_per_m3,
            lb_per_ft3: kg_per_m3 * KG_M3_TO_LB_FT3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnthalpyEstimate {
    pub kj_per_kg: f64,
    pub btu_per_lb: f64,
}

/// Mixture molecular weight [g/mol]. Fractions are used as given.
pub fn molecular_weight(composition: &Composition) -> f64 {
    composition.molecular_weight()
}

/// Density of a stream at `t`, `p`.
///
/// Condensed phases take the mole-weighted average of tabulated component
/// densities; vapor and mixed streams use ρ = P·MW / (R·T).
pub fn density(
    composition: &Composition,
    t: Temperature,
    p: Pressure,
    phase: StreamPhase,
) -> DensityEstimate {
    let kg_per_m3 = if phase.is_condensed() {
        composition
            .iter()
            .map(|(key, frac)| {
                frac * registry::lookup(key)
                    .density
                    .unwrap_or(DEFAULT_CONDENSED_DENSITY)
            })
            .fold(0.0_f64, |acc, v| acc + v)
    } else {
        let mw_kg_per_mol = composition.molecular_weight() / 1000.0;
        to_pascal(p) * mw_kg_per_mol / (GAS_CONSTANT_J_PER_MOL_K * to_kelvin(t))
    };
    DensityEstimate::from_si(kg_per_m3)
}

impl PropertyModel {
    /// Sensible heat above the reference temperature, plus the latent heat
    /// when the stream is vapor.
    ///
    /// Composition and pressure do not enter this model.
    pub fn enthalpy(&self, t: Temperature, phase: StreamPhase) -> EnthalpyEstimate {
        let dt = to_kelvin(t) - to_kelvin(degc(self.reference_temperature_c));
        let mut kj_per_kg = self.average_cp_kj_per_kg_k * dt;
        if phase == StreamPhase::Vapor {
            kj_per_kg += self.latent_heat_kj_per_kg;
        }
        EnthalpyEstimate {
            kj_per_kg,
            btu_per_lb: kj_per_kg * KJ_KG_TO_BTU_LB,
        }
    }
}

/// Volumetric flow [m³/hr] from mass flow [kg/hr] and density [kg/m³].
pub fn volumetric_flow(mass_flow_kg_per_hr: f64, density_kg_per_m3: f64) -> f64 {
    mass_flow_kg_per_hr / density_kg_per_m3
}

/// Everything the calculator derives for one stream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StreamProperties {
    pub molecular_weight: f64,
    pub density: DensityEstimate,
    pub enthalpy: EnthalpyEstimate,
    pub volumetric_flow_m3_per_hr: f64,
}

pub fn stream_properties(stream: &ProcessStream, model: &PropertyModel) -> StreamProperties {
    let density = density(
        &stream.composition,
        stream.temperature(),
        stream.pressure(),
        stream.phase,
    );
    StreamProperties {
        molecular_weight: molecular_weight(&stream.composition),
        density,
        enthalpy: model.enthalpy(stream.temperature(), stream.phase),
        volumetric_flow_m3_per_hr: volumetric_flow(
            stream.flow_rate.mass_kg_per_hr,
            density.kg_per_m3,
        ),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeatingValueBasis {
    #[default]
    Lower,
    Higher,
}

/// Chemical energy carried by a stream [kW] from tabulated heating values.
///
/// Components without a heating value contribute nothing.
pub fn fuel_energy_kw(stream: &ProcessStream, basis: HeatingValueBasis) -> f64 {
    stream
        .composition
        .iter()
        .map(|(key, frac)| {
            let props = registry::lookup(key);
            let heating_value = match basis {
                HeatingValueBasis::Lower => props.lower_heating_value,
                HeatingValueBasis::Higher => props.higher_heating_value,
            }
            .unwrap_or(0.0);
            let kg_per_hr = stream.flow_rate.molar_kmol_per_hr * frac * props.molecular_weight;
            kg_per_hr * heating_value * KJ_PER_MJ / SECONDS_PER_HOUR
        })
        .fold(0.0_f64, |acc, v| acc + v)
}
