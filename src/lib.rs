//! Battery energy storage sizing for construction-site power.
//!
//! Given a site's electrical supply and its surging equipment, the engine
//! works out the power gap a battery has to bridge, picks a unit from the
//! catalog, and (in generator hybrid mode) projects diesel savings.

pub mod catalog;
pub mod config;
pub mod io;
pub mod logging;
pub mod report;
/// Supply ceiling, load totals, gap analysis, and model selection.
pub mod sizing;

#[cfg(feature = "api")]
pub mod api;
#[cfg(feature = "tui")]
pub mod tui;
