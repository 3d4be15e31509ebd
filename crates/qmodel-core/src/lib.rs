//! Binary quadratic and polynomial models over SPIN and BINARY variables.
//!
//! [`BinaryQuadraticModel`] stores linear and pairwise biases in a dense or
//! sparse interaction store; [`BinaryPolynomialModel`] stores terms of any
//! arity. Both are generic over the variable label type, see
//! [`qmodel_labels::Label`].

pub mod bpm;
pub mod bqm;
pub mod dispatch;
pub(crate) mod document;
pub mod error;
pub mod options;
pub(crate) mod pretty;
pub mod types;
pub mod utils;

pub use bpm::{
    BinaryPolynomialModel, MAX_CONVERSION_ARITY, Polynomial, PolynomialNormalizeOptions,
    PolynomialScaleOptions,
};
pub use bqm::{
    BinaryQuadraticModel, Linear, Quadratic, QuadraticNormalizeOptions, QuadraticScaleOptions,
};
pub use dispatch::{AnyPolynomialModel, AnyQuadraticModel};
pub use error::ModelError;
pub use options::{NormalizeOptions, ScaleOptions};
pub use types::{Backing, Sample, Vartype};
pub use utils::{EnergyModel, state_and_energy};
