//! Sizing engine and its input/output types.

pub mod engine;
/// Named policy constants (derating, margins, durations, fuel assumptions).
pub mod policy;
/// Catalog model matching.
pub mod selection;
pub mod types;

pub use engine::{SizingEngine, compute};
pub use policy::SizingPolicy;
pub use types::{CalculationResult, FitStatus, FuelSavings, LoadItem, Scenario, SiteInput};
