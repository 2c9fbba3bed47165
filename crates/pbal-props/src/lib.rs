//! pbal-props: component data, stream model and property estimation.
//!
//! Provides:
//! - The component property registry (CO2, H2O, H2, O2, N2, CH4, CO, ethanol)
//! - Composition maps keyed by formula
//! - The `ProcessStream` input model with boundary roles
//! - Simplified stream property estimation (MW, density, enthalpy, volumetric flow)
//!
//! # Example
//!
//! ```
//! use pbal_props::{Composition, ProcessStream, PropertyModel, StreamPhase, stream_properties};
//!
//! let stream = ProcessStream::new("s1", "hydrogen feed", 1)
//!     .with_composition(Composition::pure("H2"))
//!     .with_mass_flow(10.0)
//!     .with_phase(StreamPhase::Vapor);
//!
//! let props = stream_properties(&stream, &PropertyModel::default());
//! assert!(props.density.kg_per_m3 > 0.08);
//! ```

pub mod component;
pub mod composition;
pub mod error;
pub mod properties;
pub mod registry;
pub mod stream;

// Re-exports for ergonomics
pub use component::{Component, Phase};
pub use composition::Composition;
pub use error::{PropsError, PropsResult};
pub use properties::{
    DensityEstimate, EnthalpyEstimate, HeatingValueBasis, PropertyModel, StreamProperties,
    density, fuel_energy_kw, molecular_weight, stream_properties, volumetric_flow,
};
pub use registry::{ComponentProperties, DEFAULT_COMPONENT, lookup, try_lookup};
pub use stream::{
    FlowRate, ProcessStream, StreamEnthalpy, StreamPhase, StreamRole, has_recycle_name,
    infer_role,
};
