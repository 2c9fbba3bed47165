//! Cataloged chemical components.

/// Reference phase of a pure component at standard conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Gas,
    Liquid,
    Solid,
}

/// Chemical components with tabulated properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Component {
    /// Carbon dioxide (CO₂)
    CO2,
    /// Water (H₂O)
    H2O,
    /// Hydrogen (H₂)
    H2,
    /// Oxygen (O₂)
    O2,
    /// Nitrogen (N₂)
    N2,
    /// Methane (CH₄)
    CH4,
    /// Carbon monoxide (CO)
    CO,
    /// Ethanol (C₂H₅OH)
    Ethanol,
}

impl Component {
    pub const ALL: [Component; 8] = [
        Component::CO2,
        Component::H2O,
        Component::H2,
        Component::O2,
        Component::N2,
        Component::CH4,
        Component::CO,
        Component::Ethanol,
    ];

    /// Canonical formula key, as used in stream compositions.
    pub fn key(&self) -> &'static str {
        match self {
            Component::CO2 => "CO2",
            Component::H2O => "H2O",
            Component::H2 => "H2",
            Component::O2 => "O2",
            Component::N2 => "N2",
            Component::CH4 => "CH4",
            Component::CO => "CO",
            Component::Ethanol => "C2H5OH",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Component::CO2 => "Carbon Dioxide",
            Component::H2O => "Water",
            Component::H2 => "Hydrogen",
            Component::O2 => "Oxygen",
            Component::N2 => "Nitrogen",
            Component::CH4 => "Methane",
            Component::CO => "Carbon Monoxide",
            Component::Ethanol => "Ethanol",
        }
    }
}

impl std::fmt::Display for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for Component {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CO2" | "CARBONDIOXIDE" | "CARBON DIOXIDE" => Ok(Component::CO2),
            "H2O" | "WATER" | "STEAM" => Ok(Component::H2O),
            "H2" | "HYDROGEN" => Ok(Component::H2),
            "O2" | "OXYGEN" => Ok(Component::O2),
            "N2" | "NITROGEN" => Ok(Component::N2),
            "CH4" | "METHANE" => Ok(Component::CH4),
            "CO" | "CARBONMONOXIDE" | "CARBON MONOXIDE" => Ok(Component::CO),
            "C2H5OH" | "C2H6O" | "ETOH" | "ETHANOL" => Ok(Component::Ethanol),
            _ => Err("unknown component"),
        }
    }
}
