//! Component property registry.
//!
//! A process-lifetime constant table shared by reference across every
//! calculator. Lookups never fail: formulas that are not cataloged resolve to
//! [`DEFAULT_COMPONENT`], whose molecular weight is that of CO2 (44 g/mol).
//! That fallback keeps sketch process models computable but silently skews
//! mass figures for exotic species; use [`try_lookup`] or
//! [`is_registered`] to detect it.

use crate::component::{Component, Phase};

/// Tabulated properties of one component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComponentProperties {
    pub name: &'static str,
    pub formula: &'static str,
    /// Molecular weight [g/mol]
    pub molecular_weight: f64,
    pub phase: Phase,
    /// Density at STP [kg/m³]
    pub density: Option<f64>,
    /// Specific heat [kJ/(kg·K)]
    pub specific_heat: Option<f64>,
    /// Lower heating value [MJ/kg]
    pub lower_heating_value: Option<f64>,
    /// Higher heating value [MJ/kg]
    pub higher_heating_value: Option<f64>,
}

/// Molecular weight assumed for anything not in the table [g/mol].
pub const DEFAULT_MOLECULAR_WEIGHT: f64 = 44.0;

/// Entry returned for uncataloged formulas.
pub const DEFAULT_COMPONENT: ComponentProperties = ComponentProperties {
    name: "Unknown",
    formula: "?",
    molecular_weight: DEFAULT_MOLECULAR_WEIGHT,
    phase: Phase::Gas,
    density: None,
    specific_heat: None,
    lower_heating_value: None,
    higher_heating_value: None,
};

// Indexed in `Component::ALL` order.
static COMPONENT_TABLE: [ComponentProperties; 8] = [
    ComponentProperties {
        name: "Carbon Dioxide",
        formula: "CO2",
        molecular_weight: 44.01,
        phase: Phase::Gas,
        density: Some(1.977),
        specific_heat: Some(0.844),
        lower_heating_value: None,
        higher_heating_value: None,
    },
    ComponentProperties {
        name: "Water",
        formula: "H2O",
        molecular_weight: 18.015,
        phase: Phase::Liquid,
        density: Some(1000.0),
        specific_heat: Some(4.18),
        lower_heating_value: None,
        higher_heating_value: None,
    },
    ComponentProperties {
        name: "Hydrogen",
        formula: "H2",
        molecular_weight: 2.016,
        phase: Phase::Gas,
        density: Some(0.0899),
        specific_heat: Some(14.3),
        lower_heating_value: Some(120.0),
        higher_heating_value: Some(141.8),
    },
    ComponentProperties {
        name: "Oxygen",
        formula: "O2",
        molecular_weight: 32.0,
        phase: Phase::Gas,
        density: Some(1.429),
        specific_heat: Some(0.918),
        lower_heating_value: None,
        higher_heating_value: None,
    },
    ComponentProperties {
        name: "Nitrogen",
        formula: "N2",
        molecular_weight: 28.014,
        phase: Phase::Gas,
        density: Some(1.251),
        specific_heat: Some(1.04),
        lower_heating_value: None,
        higher_heating_value: None,
    },
    ComponentProperties {
        name: "Methane",
        formula: "CH4",
        molecular_weight: 16.04,
        phase: Phase::Gas,
        density: Some(0.717),
        specific_heat: Some(2.22),
        lower_heating_value: Some(50.0),
        higher_heating_value: Some(55.5),
    },
    ComponentProperties {
        name: "Carbon Monoxide",
        formula: "CO",
        molecular_weight: 28.01,
        phase: Phase::Gas,
        density: Some(1.25),
        specific_heat: Some(1.02),
        lower_heating_value: Some(10.1),
        higher_heating_value: Some(10.1),
    },
    ComponentProperties {
        name: "Ethanol",
        formula: "C2H5OH",
        molecular_weight: 46.07,
        phase: Phase::Liquid,
        density: Some(789.0),
        specific_heat: Some(2.44),
        lower_heating_value: Some(26.8),
        higher_heating_value: Some(29.7),
    },
];

impl Component {
    /// Tabulated properties for this component.
    pub fn properties(&self) -> &'static ComponentProperties {
        &COMPONENT_TABLE[*self as usize]
    }

    /// Molecular weight [g/mol].
    pub fn molecular_weight(&self) -> f64 {
        self.properties().molecular_weight
    }
}

/// All cataloged entries.
pub fn registry() -> &'static [ComponentProperties] {
    &COMPONENT_TABLE
}

/// Look up a formula (or alias) without falling back.
pub fn try_lookup(formula: &str) -> Option<&'static ComponentProperties> {
    formula
        .parse::<Component>()
        .ok()
        .map(|component| component.properties())
}

/// Look up a formula, falling back to [`DEFAULT_COMPONENT`] when unknown.
pub fn lookup(formula: &str) -> &'static ComponentProperties {
    match try_lookup(formula) {
        Some(props) => props,
        None => {
            tracing::debug!(
                formula,
                molecular_weight = DEFAULT_MOLECULAR_WEIGHT,
                "uncataloged component, using default properties"
            );
            &DEFAULT_COMPONENT
        }
    }
}

pub fn is_registered(formula: &str) -> bool {
    try_lookup(formula).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn table_order_matches_component_order() {
        for component in Component::ALL {
            assert_eq!(component.properties().formula, component.key());
        }
    }

    #[test]
    fn formulas_are_unique() {
        let mut seen = HashSet::new();
        for entry in registry() {
            assert!(
                seen.insert(entry.formula),
                "duplicate formula: {}",
                entry.formula
            );
        }
    }

    #[test]
    fn unknown_formula_falls_back_to_co2_weight() {
        let props = lookup("XYZ");
        assert_eq!(props.molecular_weight, 44.0);
        assert_eq!(props, &DEFAULT_COMPONENT);
        assert!(!is_registered("XYZ"));
    }

    #[test]
    fn propane_is_not_cataloged() {
        assert!(try_lookup("C3H8").is_none());
        assert_eq!(lookup("C3H8").molecular_weight, DEFAULT_MOLECULAR_WEIGHT);
    }

    #[test]
    fn lookup_accepts_aliases() {
        assert_eq!(lookup("water").formula, "H2O");
        assert_eq!(lookup("ethanol").molecular_weight, 46.07);
    }

    #[test]
    fn fuels_carry_heating_values() {
        let h2 = lookup("H2");
        assert_eq!(h2.lower_heating_value, Some(120.0));
        assert!(h2.higher_heating_value > h2.lower_heating_value);
        assert_eq!(lookup("N2").lower_heating_value, None);
    }
}
