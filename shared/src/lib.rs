//! Crop recommendation and price forecasting engine
//!
//! This crate holds the pure computation shared by the backend service and
//! the browser-side calculators (via WASM): suitability scoring, yield and
//! profit estimation, recommendation ranking, land allocation and six-month
//! price forecasting. It performs no I/O.

pub mod catalog;
pub mod engine;
pub mod error;
pub mod models;
pub mod types;
pub mod validation;

pub use catalog::*;
pub use engine::*;
pub use error::*;
pub use models::*;
pub use types::*;
pub use validation::*;
