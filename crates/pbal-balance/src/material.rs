//! Material balances: carbon, water and single components.
//!
//! All balances are steady-state (`accumulation` is always 0) and are
//! computed on the mass basis `molar flow × mole fraction × MW / 1000`.
//! Nothing here returns an error; streams with missing data contribute zero
//! and NaN inputs surface as `converged == false`.

use std::collections::BTreeMap;

use pbal_core::relative_error;
use pbal_core::units::constants::CARBON_ATOMIC_MASS;
use pbal_props::{Component, ProcessStream, StreamRole, registry};
use serde::{Deserialize, Serialize};

use crate::config::{BalanceConfig, DEFAULT_MASS_TOLERANCE};

pub const MASS_UNIT: &str = "kg/hr";

/// Free-text species names treated as carbon-bearing.
const CARBON_NAME_MARKERS: [&str; 2] = ["biomass", "coal"];

/// Closure of one tracked quantity across the system boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialBalance {
    pub component: String,
    pub unit: String,
    /// Flow per inlet stream id.
    pub inlet: BTreeMap<String, f64>,
    /// Flow per outlet stream id.
    pub outlet: BTreeMap<String, f64>,
    pub accumulation: f64,
    /// `total_in − total_out`
    pub convergence: f64,
    pub converged: bool,
}

impl MaterialBalance {
    fn close(
        component: impl Into<String>,
        inlet: BTreeMap<String, f64>,
        outlet: BTreeMap<String, f64>,
        tolerance: f64,
    ) -> Self {
        let total_in = sum_flows(inlet.values());
        let total_out = sum_flows(outlet.values());
        let convergence = total_in - total_out;
        let converged = relative_error(convergence, total_in) < tolerance;
        let component = component.into();

        if convergence.is_nan() {
            tracing::warn!(component = %component, "material balance is NaN, reporting not converged");
        }
        tracing::debug!(
            component = %component,
            total_in,
            total_out,
            convergence,
            converged,
            "material balance closed"
        );

        Self {
            component,
            unit: MASS_UNIT.to_string(),
            inlet,
            outlet,
            accumulation: 0.0,
            convergence,
            converged,
        }
    }

    pub fn total_in(&self) -> f64 {
        sum_flows(self.inlet.values())
    }

    pub fn total_out(&self) -> f64 {
        sum_flows(self.outlet.values())
    }
}

/// Water balance with internal recycle tracked separately from the boundary
/// closure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterBalance {
    #[serde(flatten)]
    pub balance: MaterialBalance,
    /// `raw_water_withdrawal + internal_recycle`
    pub water_demand: f64,
    pub internal_recycle: f64,
    /// Total water in across the boundary.
    pub raw_water_withdrawal: f64,
    /// Total water out across the boundary.
    pub process_discharge: f64,
    /// Water physically lost to the process (reaction, evaporation). Same
    /// arithmetic as `balance.convergence` but a physical quantity rather than
    /// a closure check.
    pub consumption: f64,
}

/// Outcome of checking the carbon and water balances together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialBalanceCheck {
    pub carbon_balance: MaterialBalance,
    pub water_balance: WaterBalance,
    pub all_balances_converged: bool,
    pub issues: Vec<String>,
}

/// Carbon atoms per molecule for carbon-bearing species. Cataloged components
/// are resolved through their aliases first, so "EtOH" counts two like
/// "C2H5OH". Anything else that qualifies as carbon-bearing (biomass, coal)
/// counts as one.
///
/// Propane is listed here but not in the component registry, so its carbon
/// fraction is computed against the default molecular weight.
pub fn carbon_atoms(formula: &str) -> u32 {
    if let Ok(component) = formula.parse::<Component>() {
        return match component {
            Component::Ethanol => 2,
            _ => 1,
        };
    }
    match formula.trim().to_uppercase().as_str() {
        "C3H8" | "PROPANE" => 3,
        _ => 1,
    }
}

/// Species counted by the carbon balance: CO2, CO, CH4, ethanol, and any
/// name containing "biomass" or "coal".
pub fn is_carbon_bearing(key: &str) -> bool {
    if let Ok(component) = key.parse::<Component>() {
        return matches!(
            component,
            Component::CO2 | Component::CO | Component::CH4 | Component::Ethanol
        );
    }
    let lower = key.to_lowercase();
    CARBON_NAME_MARKERS.iter().any(|m| lower.contains(m))
}

/// Computes material balances over a fixed stream set.
#[derive(Debug, Clone)]
pub struct MaterialBalanceCalculator<'a> {
    streams: &'a [ProcessStream],
    tolerance: f64,
}

impl<'a> MaterialBalanceCalculator<'a> {
    pub fn new(streams: &'a [ProcessStream], tolerance: f64) -> Self {
        Self { streams, tolerance }
    }

    pub fn with_default_tolerance(streams: &'a [ProcessStream]) -> Self {
        Self::new(streams, DEFAULT_MASS_TOLERANCE)
    }

    pub fn with_config(streams: &'a [ProcessStream], config: &BalanceConfig) -> Self {
        Self::new(streams, config.mass_tolerance)
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Streams that cross the boundary, with their side.
    fn boundary_streams(&self) -> impl Iterator<Item = (&'a ProcessStream, StreamRole)> + '_ {
        self.streams
            .iter()
            .map(|s| (s, s.effective_role()))
            .filter(|(_, role)| *role != StreamRole::InternalRecycle)
    }

    /// Elemental carbon carried by every carbon-bearing species.
    ///
    /// Every boundary stream gets an entry, including ones carrying no carbon.
    pub fn calculate_carbon_balance(&self) -> MaterialBalance {
        let mut inlet = BTreeMap::new();
        let mut outlet = BTreeMap::new();

        for (stream, role) in self.boundary_streams() {
            let carbon = stream
                .composition
                .iter()
                .filter(|(key, _)| is_carbon_bearing(key))
                .map(|(key, _)| {
                    let mw = registry::lookup(key).molecular_weight;
                    let mass_flow = stream.component_mass_flow(key, mw);
                    let carbon_fraction = f64::from(carbon_atoms(key)) * CARBON_ATOMIC_MASS / mw;
                    mass_flow * carbon_fraction
                })
                .fold(0.0_f64, |acc, c| acc + c);
            accumulate(side(role, &mut inlet, &mut outlet), &stream.id, carbon);
        }

        MaterialBalance::close("Carbon", inlet, outlet, self.tolerance)
    }

    /// H2O balance with a third, internal-recycle category.
    ///
    /// Recycle streams (tagged, or named "recycle"/"return") stay out of the
    /// closure but count toward total water demand. Streams without water are
    /// skipped.
    pub fn calculate_water_balance(&self) -> WaterBalance {
        let mw = Component::H2O.molecular_weight();
        let mut inlet = BTreeMap::new();
        let mut outlet = BTreeMap::new();
        let mut internal_recycle = 0.0;

        for stream in self.streams {
            let water = stream.flow_rate.molar_kmol_per_hr
                * stream.composition.component_fraction(Component::H2O)
                * mw
                / 1000.0;
            if water == 0.0 {
                continue;
            }
            if stream.is_internal_recycle() {
                internal_recycle += water;
                continue;
            }
            accumulate(
                side(stream.effective_role(), &mut inlet, &mut outlet),
                &stream.id,
                water,
            );
        }

        let balance = MaterialBalance::close("Water", inlet, outlet, self.tolerance);
        let total_in = balance.total_in();
        let total_out = balance.total_out();
        WaterBalance {
            balance,
            water_demand: total_in + internal_recycle,
            internal_recycle,
            raw_water_withdrawal: total_in,
            process_discharge: total_out,
            consumption: total_in - total_out,
        }
    }

    /// Balance of one species. A name that parses to a cataloged component
    /// ("water", "H2O") matches every alias of it in the compositions; any other
    /// name matches its exact key. Streams where the flow is exactly zero
    /// (absent, or present at zero fraction) are skipped.
    pub fn calculate_component_balance(&self, component: &str) -> MaterialBalance {
        let cataloged = component.parse::<Component>().ok();
        let mw = registry::lookup(component).molecular_weight;
        let mut inlet = BTreeMap::new();
        let mut outlet = BTreeMap::new();

        for (stream, role) in self.boundary_streams() {
            let fraction = match cataloged {
                Some(c) => stream.composition.component_fraction(c),
                None => stream.composition.mole_fraction(component),
            };
            let flow = stream.flow_rate.molar_kmol_per_hr * fraction * mw / 1000.0;
            if flow == 0.0 {
                continue;
            }
            accumulate(side(role, &mut inlet, &mut outlet), &stream.id, flow);
        }

        MaterialBalance::close(component, inlet, outlet, self.tolerance)
    }

    /// Carbon and water together, with one issue line per open balance.
    ///
    /// Percent errors are reported against the summed inlet flow of each
    /// balance.
    pub fn validate_all_balances(&self) -> MaterialBalanceCheck {
        let carbon_balance = self.calculate_carbon_balance();
        let water_balance = self.calculate_water_balance();

        let issues: Vec<String> = [&carbon_balance, &water_balance.balance]
            .into_iter()
            .filter(|b| !b.converged)
            .map(|b| {
                let pct = b.convergence / b.total_in() * 100.0;
                format!(
                    "{} balance not converged: {:.4} {} imbalance ({:.2}%)",
                    b.component, b.convergence, b.unit, pct
                )
            })
            .collect();

        MaterialBalanceCheck {
            all_balances_converged: issues.is_empty(),
            carbon_balance,
            water_balance,
            issues,
        }
    }
}

fn side<'m>(
    role: StreamRole,
    inlet: &'m mut BTreeMap<String, f64>,
    outlet: &'m mut BTreeMap<String, f64>,
) -> &'m mut BTreeMap<String, f64> {
    match role {
        StreamRole::Inlet => inlet,
        _ => outlet,
    }
}

fn sum_flows<'v>(values: impl Iterator<Item = &'v f64>) -> f64 {
    values.fold(0.0_f64, |acc, v| acc + v)
}

fn accumulate(map: &mut BTreeMap<String, f64>, id: &str, flow: f64) {
    *map.entry(id.to_string()).or_insert(0.0) += flow;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pbal_core::{Tolerances, nearly_equal};
    use pbal_props::Composition;

    fn tol() -> Tolerances {
        Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        }
    }

    fn water(id: &str, name: &str, number: u32, kmol: f64) -> ProcessStream {
        ProcessStream::new(id, name, number)
            .with_composition(Composition::pure("H2O"))
            .with_molar_flow(kmol)
    }

    #[test]
    fn carbon_atom_table() {
        assert_eq!(carbon_atoms("CO2"), 1);
        assert_eq!(carbon_atoms("CH4"), 1);
        assert_eq!(carbon_atoms("C2H5OH"), 2);
        assert_eq!(carbon_atoms("C3H8"), 3);
        assert_eq!(carbon_atoms("biomass"), 1);
    }

    #[test]
    fn ethanol_aliases_carry_two_carbons() {
        for key in ["C2H5OH", "EtOH", "C2H6O", "ethanol"] {
            assert_eq!(carbon_atoms(key), 2, "{key}");
            let streams = vec![
                ProcessStream::new("f", "feed", 1)
                    .with_composition(Composition::pure(key))
                    .with_molar_flow(1.0),
            ];
            let bal = MaterialBalanceCalculator::with_default_tolerance(&streams)
                .calculate_carbon_balance();
            assert!(
                nearly_equal(bal.inlet["f"], 2.0 * 12.01 / 1000.0, tol()),
                "{key}: {}",
                bal.inlet["f"]
            );
        }
    }

    #[test]
    fn component_balance_resolves_aliases() {
        let streams = vec![
            water("s1", "feed-1", 1, 100.0),
            ProcessStream::new("s2", "product-1", 101)
                .with_composition(Composition::pure("water"))
                .with_molar_flow(100.0),
        ];
        let calc = MaterialBalanceCalculator::with_default_tolerance(&streams);
        for name in ["water", "H2O"] {
            let bal = calc.calculate_component_balance(name);
            assert!(nearly_equal(bal.inlet["s1"], 1.8015, tol()), "{name}");
            assert!(nearly_equal(bal.outlet["s2"], 1.8015, tol()), "{name}");
            assert!(bal.converged);
        }
    }

    #[test]
    fn empty_totals_are_positive_zero() {
        let bal = MaterialBalanceCalculator::with_default_tolerance(&[])
            .calculate_component_balance("H2");
        assert!(bal.total_in().is_sign_positive());
        assert!(bal.convergence.is_sign_positive());
        let json = serde_json::to_string(&bal).unwrap();
        assert!(!json.contains("-0.0"), "{json}");
    }

    #[test]
    fn carbon_bearing_set() {
        assert!(is_carbon_bearing("CO2"));
        assert!(is_carbon_bearing("ethanol"));
        assert!(is_carbon_bearing("Wood Biomass"));
        assert!(is_carbon_bearing("coal"));
        assert!(!is_carbon_bearing("H2O"));
        assert!(!is_carbon_bearing("C3H8"));
    }

    #[test]
    fn carbon_balance_counts_every_stream() {
        let streams = vec![
            ProcessStream::new("f", "feed", 1)
                .with_composition(Composition::pure("CH4"))
                .with_molar_flow(10.0),
            water("p", "product", 200, 5.0),
        ];
        let bal = MaterialBalanceCalculator::with_default_tolerance(&streams)
            .calculate_carbon_balance();
        assert_eq!(bal.unit, "kg/hr");
        assert_eq!(bal.outlet.get("p"), Some(&0.0));
        assert!(nearly_equal(bal.inlet["f"], 10.0 * 12.01 / 1000.0, tol()));
        assert!(!bal.converged);
    }

    #[test]
    fn ethanol_carries_two_carbons() {
        let streams = vec![
            ProcessStream::new("f", "feed", 1)
                .with_composition(Composition::pure("C2H5OH"))
                .with_molar_flow(1.0),
        ];
        let bal = MaterialBalanceCalculator::with_default_tolerance(&streams)
            .calculate_carbon_balance();
        assert!(nearly_equal(bal.inlet["f"], 2.0 * 12.01 / 1000.0, tol()));
    }

    #[test]
    fn balanced_water_converges() {
        let streams = vec![
            water("s1", "feed-1", 1, 100.0),
            water("s2", "product-1", 101, 100.0),
        ];
        let wb = MaterialBalanceCalculator::with_default_tolerance(&streams)
            .calculate_water_balance();
        assert!(wb.balance.convergence.abs() < 1e-12);
        assert!(wb.balance.converged);
        assert_eq!(wb.balance.accumulation, 0.0);
        assert_eq!(wb.consumption, wb.balance.convergence);
    }

    #[test]
    fn recycle_is_excluded_from_closure_but_counts_as_demand() {
        let streams = vec![
            water("s1", "feed-1", 1, 100.0),
            water("s2", "product-1", 101, 90.0),
            water("r1", "recycle-1", 150, 50.0),
        ];
        let wb = MaterialBalanceCalculator::with_default_tolerance(&streams)
            .calculate_water_balance();
        let unit = 18.015 / 1000.0;
        assert!(!wb.balance.inlet.contains_key("r1"));
        assert!(!wb.balance.outlet.contains_key("r1"));
        assert!(nearly_equal(wb.internal_recycle, 50.0 * unit, tol()));
        assert!(nearly_equal(wb.raw_water_withdrawal, 100.0 * unit, tol()));
        assert!(nearly_equal(wb.process_discharge, 90.0 * unit, tol()));
        assert!(nearly_equal(wb.water_demand, 150.0 * unit, tol()));
        assert!(nearly_equal(wb.consumption, 10.0 * unit, tol()));
    }

    #[test]
    fn tagged_recycle_is_excluded_everywhere() {
        let streams = vec![
            ProcessStream::new("f", "feed", 1)
                .with_composition(Composition::pure("CO2"))
                .with_molar_flow(1.0),
            ProcessStream::new("loop", "loop", 300)
                .with_composition(Composition::pure("CO2"))
                .with_molar_flow(7.0)
                .with_role(StreamRole::InternalRecycle),
            ProcessStream::new("p", "stack", 301)
                .with_composition(Composition::pure("CO2"))
                .with_molar_flow(1.0),
        ];
        let calc = MaterialBalanceCalculator::with_default_tolerance(&streams);
        let carbon = calc.calculate_carbon_balance();
        assert!(!carbon.outlet.contains_key("loop"));
        assert!(carbon.converged);
        let co2 = calc.calculate_component_balance("CO2");
        assert!(!co2.outlet.contains_key("loop"));
        assert!(co2.converged);
    }

    #[test]
    fn component_balance_skips_zero_flows() {
        let streams = vec![
            ProcessStream::new("f", "feed", 1)
                .with_composition(Composition::new().with("N2", 0.79).with("O2", 0.21))
                .with_molar_flow(100.0),
            ProcessStream::new("p", "exhaust", 200)
                .with_composition(Composition::new().with("N2", 0.79).with("O2", 0.0))
                .with_molar_flow(100.0),
        ];
        let calc = MaterialBalanceCalculator::with_default_tolerance(&streams);
        let o2 = calc.calculate_component_balance("O2");
        assert!(o2.inlet.contains_key("f"));
        assert!(o2.outlet.is_empty());
        assert!(!o2.converged);

        let n2 = calc.calculate_component_balance("N2");
        assert!(n2.converged);
        assert!(nearly_equal(n2.convergence, 0.0, tol()));
    }

    #[test]
    fn empty_stream_list_converges_trivially() {
        let bal = MaterialBalanceCalculator::with_default_tolerance(&[])
            .calculate_component_balance("H2");
        assert_eq!(bal.convergence, 0.0);
        assert!(bal.converged);
    }

    #[test]
    fn nan_flow_reads_as_not_converged() {
        let streams = vec![water("s1", "feed", 1, f64::NAN), water("s2", "out", 200, 1.0)];
        let wb = MaterialBalanceCalculator::with_default_tolerance(&streams)
            .calculate_water_balance();
        assert!(wb.balance.convergence.is_nan());
        assert!(!wb.balance.converged);
    }

    #[test]
    fn validate_all_reports_open_balances() {
        let streams = vec![
            water("s1", "feed-1", 1, 100.0),
            water("s2", "product-1", 101, 80.0),
        ];
        let check = MaterialBalanceCalculator::with_default_tolerance(&streams)
            .validate_all_balances();
        assert!(check.carbon_balance.converged);
        assert!(!check.water_balance.balance.converged);
        assert!(!check.all_balances_converged);
        assert_eq!(check.issues.len(), 1);
        assert!(check.issues[0].starts_with("Water balance not converged"));
        assert!(check.issues[0].contains("(20.00%)"), "{}", check.issues[0]);
    }

    #[test]
    fn recomputation_is_idempotent() {
        let streams = vec![
            water("s1", "feed-1", 1, 100.0),
            water("s2", "product-1", 101, 97.0),
        ];
        let calc = MaterialBalanceCalculator::with_default_tolerance(&streams);
        assert_eq!(calc.validate_all_balances(), calc.validate_all_balances());
    }
}
