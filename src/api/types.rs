//! API response types.

use serde::Serialize;

use crate::catalog::{BessModel, SCENARIOS, STARTER_TYPES, ScenarioInfo, StarterOption};
use crate::config::{ConfigError, SiteConfig};
use crate::report::{LoadBar, ProposalReport, load_profile};
use crate::sizing::{CalculationResult, SiteInput, SizingEngine, SizingPolicy};

/// Sizing outcome with everything a client needs to render it.
#[derive(Debug, Serialize)]
pub struct SizingResponse {
    /// Engine input derived from the request (load ids assigned).
    pub site: SiteInput,
    /// Engine output.
    pub result: CalculationResult,
    /// Proposal document text.
    pub proposal: String,
    /// Load-profile bars for charting against `result.effective_grid_limit_kw`.
    pub profile: Vec<LoadBar>,
}

impl SizingResponse {
    /// Validates a site configuration and sizes it.
    ///
    /// # Errors
    ///
    /// Returns every validation error if the configuration has non-finite values.
    pub fn build(engine: &SizingEngine, cfg: &SiteConfig) -> Result<Self, Vec<ConfigError>> {
        let errors = cfg.validate();
        if !errors.is_empty() {
            return Err(errors);
        }
        let site = cfg.to_site_input();
        let result = engine.compute(&site);
        let proposal = ProposalReport::new(&site, &result).to_string();
        let profile = load_profile(&site);
        Ok(Self {
            site,
            result,
            proposal,
            profile,
        })
    }
}

/// Catalog tables and the policy constants in effect.
#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub models: Vec<BessModel>,
    pub scenarios: Vec<ScenarioInfo>,
    pub starters: Vec<StarterOption>,
    pub policy: SizingPolicy,
}

impl CatalogResponse {
    pub fn from_engine(engine: &SizingEngine) -> Self {
        Self {
            models: engine.catalog().models().to_vec(),
            scenarios: SCENARIOS.to_vec(),
            starters: STARTER_TYPES.to_vec(),
            policy: *engine.policy(),
        }
    }
}

/// Error response body for 4xx errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    /// Joins validation errors into one message.
    pub fn from_config_errors(errors: &[ConfigError]) -> Self {
        let joined = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Self::new(joined)
    }
}
