//! pbal-balance: material and energy balance engine.
//!
//! Provides:
//! - Material balances (carbon, water with internal recycle, any single component)
//! - The overall energy balance with a fixed-fraction loss term
//! - Conversion/selectivity yields and reaction heat
//! - Convergence grading (none/minor/major/critical) and a plaintext report
//!
//! Every calculation is a pure function of the stream list and configuration.
//! Balances that cannot close, including ones fed NaN, are reported as not
//! converged rather than returned as errors.
//!
//! # Example
//!
//! ```
//! use pbal_balance::{AuxiliaryEnergyData, BalanceConfig, validate_process_balances};
//! use pbal_props::{Composition, ProcessStream};
//!
//! let streams = vec![
//!     ProcessStream::new("s1", "feed-1", 1)
//!         .with_composition(Composition::pure("H2O"))
//!         .with_molar_flow(100.0),
//!     ProcessStream::new("s2", "product-1", 101)
//!         .with_composition(Composition::pure("H2O"))
//!         .with_molar_flow(100.0),
//! ];
//!
//! let result = validate_process_balances(
//!     &streams,
//!     &AuxiliaryEnergyData::default(),
//!     &BalanceConfig::default(),
//! );
//! assert!(result.water_balance.balance.converged);
//! println!("{}", result.report);
//! ```

pub mod config;
pub mod energy;
pub mod material;
pub mod report;
pub mod stoichiometry;
pub mod validator;

pub use config::BalanceConfig;
pub use energy::{AuxiliaryEnergyData, EnergyBalance, EnergyBalanceCalculator, EnergyIn, EnergyOut};
pub use material::{
    MaterialBalance, MaterialBalanceCalculator, MaterialBalanceCheck, WaterBalance, carbon_atoms,
    is_carbon_bearing,
};
pub use report::{ProcessValidation, render_report, validate_process_balances};
pub use stoichiometry::{
    ReactionHeat, ReactionKind, YieldInput, YieldResult, calculate_reaction_heat, calculate_yields,
};
pub use validator::{
    Balance, BalanceCheck, Severity, ValidationResult, ValidationSummary, validate_all_balances,
    validate_convergence,
};
