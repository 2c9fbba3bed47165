// pbal-core/src/units.rs

use uom::si::f64::{
    Pressure as UomPressure, ThermodynamicTemperature as UomThermodynamicTemperature,
};

// Stream state inputs (SI, f64)
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;

#[inline]
pub fn mpa(v: f64) -> Pressure {
    use uom::si::pressure::megapascal;
    Pressure::new::<megapascal>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn degc(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_celsius;
    Temperature::new::<degree_celsius>(v)
}

/// Read a temperature back in kelvin.
#[inline]
pub fn to_kelvin(t: Temperature) -> f64 {
    use uom::si::thermodynamic_temperature::kelvin;
    t.get::<kelvin>()
}

/// Read a pressure back in pascal.
#[inline]
pub fn to_pascal(p: Pressure) -> f64 {
    use uom::si::pressure::pascal;
    p.get::<pascal>()
}

pub mod constants {
    /// Universal gas constant [J/(mol·K)].
    pub const GAS_CONSTANT_J_PER_MOL_K: f64 = 8.314;

    /// Atomic mass of carbon [g/mol].
    pub const CARBON_ATOMIC_MASS: f64 = 12.01;

    pub const SECONDS_PER_HOUR: f64 = 3600.0;

    /// kg/m³ → lb/ft³
    pub const KG_M3_TO_LB_FT3: f64 = 0.062428;

    /// kJ/kg → BTU/lb
    pub const KJ_KG_TO_BTU_LB: f64 = 0.42992;

    /// MJ → kJ
    pub const KJ_PER_MJ: f64 = 1000.0;
}
