//! Process stream data model.
//!
//! Streams are produced by the flow-diagram builder and only read here.

use pbal_core::units::{Pressure, Temperature, k, mpa};
use serde::{Deserialize, Serialize};

use crate::composition::Composition;
use crate::error::{PropsError, PropsResult};

/// Stream numbers below this are treated as feeds by [`infer_role`].
pub const INLET_STREAM_NUMBER_LIMIT: u32 = 100;

const INLET_NAME_MARKERS: [&str; 3] = ["feed", "inlet", "input"];
const RECYCLE_NAME_MARKERS: [&str; 2] = ["recycle", "return"];

/// Thermodynamic phase of a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamPhase {
    #[default]
    #[serde(alias = "gas")]
    Vapor,
    Liquid,
    /// Two-phase; estimated as vapor.
    Mixed,
    Solid,
}

impl StreamPhase {
    /// Condensed phases use tabulated densities; everything else is treated
    /// as an ideal gas.
    pub fn is_condensed(self) -> bool {
        matches!(self, StreamPhase::Liquid | StreamPhase::Solid)
    }
}

/// Where a stream sits relative to the system boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamRole {
    Inlet,
    Outlet,
    /// Loops back inside the boundary; never crosses it.
    InternalRecycle,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowRate {
    /// Molar flow [kmol/hr]
    #[serde(default)]
    pub molar_kmol_per_hr: f64,
    /// Mass flow [kg/hr]
    #[serde(default)]
    pub mass_kg_per_hr: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StreamEnthalpy {
    #[serde(default)]
    pub kj_per_kg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessStream {
    pub id: String,
    pub name: String,
    pub stream_number: u32,
    #[serde(default)]
    pub composition: Composition,
    #[serde(default)]
    pub flow_rate: FlowRate,
    /// Temperature [K]
    pub temperature_k: f64,
    /// Pressure [MPa]
    pub pressure_mpa: f64,
    #[serde(default)]
    pub phase: StreamPhase,
    /// Specific enthalpy from the flowsheet. When absent, energy balances built
    /// from a `PropertyModel` estimate it from temperature and phase.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enthalpy: Option<StreamEnthalpy>,
    /// Boundary role set by the flow-diagram builder. When absent the role is
    /// inferred from the name and stream number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<StreamRole>,
}

impl ProcessStream {
    /// A stream at 25 °C and atmospheric pressure with no flow.
    pub fn new(id: impl Into<String>, name: impl Into<String>, stream_number: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            stream_number,
            composition: Composition::new(),
            flow_rate: FlowRate::default(),
            temperature_k: 298.15,
            pressure_mpa: 0.101325,
            phase: StreamPhase::default(),
            enthalpy: None,
            role: None,
        }
    }

    pub fn with_composition(mut self, composition: Composition) -> Self {
        self.composition = composition;
        self
    }

    pub fn with_molar_flow(mut self, kmol_per_hr: f64) -> Self {
        self.flow_rate.molar_kmol_per_hr = kmol_per_hr;
        self
    }

    pub fn with_mass_flow(mut self, kg_per_hr: f64) -> Self {
        self.flow_rate.mass_kg_per_hr = kg_per_hr;
        self
    }

    pub fn with_conditions(mut self, temperature_k: f64, pressure_mpa: f64) -> Self {
        self.temperature_k = temperature_k;
        self.pressure_mpa = pressure_mpa;
        self
    }

    pub fn with_phase(mut self, phase: StreamPhase) -> Self {
        self.phase = phase;
        self
    }

    pub fn with_enthalpy(mut self, kj_per_kg: f64) -> Self {
        self.enthalpy = Some(StreamEnthalpy { kj_per_kg });
        self
    }

    pub fn with_role(mut self, role: StreamRole) -> Self {
        self.role = Some(role);
        self
    }

    pub fn temperature(&self) -> Temperature {
        k(self.temperature_k)
    }

    pub fn pressure(&self) -> Pressure {
        mpa(self.pressure_mpa)
    }

    /// Explicit role if tagged, otherwise [`infer_role`].
    pub fn effective_role(&self) -> StreamRole {
        self.role
            .unwrap_or_else(|| infer_role(&self.name, self.stream_number))
    }

    pub fn is_inlet(&self) -> bool {
        self.effective_role() == StreamRole::Inlet
    }

    /// Internal recycle as the water balance sees it: tagged as such, or named
    /// like one.
    pub fn is_internal_recycle(&self) -> bool {
        self.role == Some(StreamRole::InternalRecycle) || has_recycle_name(&self.name)
    }

    /// Mass flow of one composition entry [kg/hr basis of the balance tables]:
    /// molar flow × mole fraction × MW / 1000.
    pub fn component_mass_flow(&self, key: &str, molecular_weight: f64) -> f64 {
        self.flow_rate.molar_kmol_per_hr * self.composition.mole_fraction(key) * molecular_weight
            / 1000.0
    }

    /// Boundary check for callers that want to reject malformed streams before
    /// computing balances. All-zero flows pass.
    pub fn validate(&self) -> PropsResult<()> {
        if self.id.trim().is_empty() {
            return Err(PropsError::InvalidArg {
                what: "empty stream id".into(),
            });
        }
        check_non_negative(self.flow_rate.molar_kmol_per_hr, &self.id, "molar flow")?;
        check_non_negative(self.flow_rate.mass_kg_per_hr, &self.id, "mass flow")?;
        check_non_negative(self.pressure_mpa, &self.id, "pressure")?;
        if !self.temperature_k.is_finite() || self.temperature_k <= 0.0 {
            return Err(PropsError::NonPhysical {
                what: format!("temperature of stream {}", self.id),
            });
        }
        if self.enthalpy.is_some_and(|h| !h.kj_per_kg.is_finite()) {
            return Err(PropsError::NonPhysical {
                what: format!("enthalpy of stream {}", self.id),
            });
        }
        for (key, frac) in self.composition.iter() {
            if !frac.is_finite() || frac < 0.0 {
                return Err(PropsError::NonPhysical {
                    what: format!("mole fraction of {key} in stream {}", self.id),
                });
            }
        }
        Ok(())
    }
}

fn check_non_negative(v: f64, id: &str, what: &str) -> PropsResult<()> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(PropsError::NonPhysical {
            what: format!("{what} of stream {id}"),
        })
    }
}

/// Naming heuristic for untagged streams: a name mentioning feed/inlet/input,
/// or a stream number below 100, marks an inlet. Everything else is an outlet.
pub fn infer_role(name: &str, stream_number: u32) -> StreamRole {
    let lower = name.to_lowercase();
    if INLET_NAME_MARKERS.iter().any(|m| lower.contains(m))
        || stream_number < INLET_STREAM_NUMBER_LIMIT
    {
        StreamRole::Inlet
    } else {
        StreamRole::Outlet
    }
}

pub fn has_recycle_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    RECYCLE_NAME_MARKERS.iter().any(|m| lower.contains(m))
}
