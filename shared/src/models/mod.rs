//! Domain models for the crop advisory engine

mod crop;
mod forecast;
mod observation;
mod recommendation;

pub use crop::*;
pub use forecast::*;
pub use observation::*;
pub use recommendation::*;
