//! Business logic services for the Agri Advisor service

pub mod catalog;
pub mod forecast;
pub mod planning;
pub mod recommendation;

pub use catalog::CatalogService;
pub use forecast::{ForecastLocks, ForecastService};
pub use planning::PlanningService;
pub use recommendation::RecommendationService;
