//! HTTP request handlers

pub mod crops;
pub mod health;
pub mod planning;
pub mod recommendations;

pub use crops::*;
pub use health::*;
pub use planning::*;
pub use recommendations::*;
