//! TOML-based site configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::StarterType;
use crate::sizing::{LoadItem, Scenario, SiteInput};

/// Top-level site configuration parsed from TOML or JSON.
///
/// All fields have defaults matching the grid augmentation demo site. Load
/// from TOML with [`SiteConfig::from_toml_file`] or use
/// [`SiteConfig::grid_augmentation`] for the built-in default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Electrical supply and economic parameters.
    #[serde(default)]
    pub site: SiteSection,
    /// Equipment list, in insertion order.
    #[serde(default = "default_loads")]
    pub loads: Vec<LoadConfig>,
}

/// Electrical supply and economic parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    /// Operating scenario (`grid_augmentation`, ... or letter code `A`-`D`).
    pub scenario: Scenario,
    /// Transformer nameplate rating (kVA).
    pub transformer_kva: f64,
    /// Contract demand limit or MCCB rating (kW).
    pub contract_kw: f64,
    /// Steady base load (kW).
    pub base_load_kw: f64,
    /// Genset rating (kVA), hybrid mode.
    pub genset_kva: f64,
    /// Diesel price per liter, hybrid mode.
    pub diesel_price_per_liter: f64,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            scenario: Scenario::GridAugmentation,
            transformer_kva: 500.0,
            contract_kw: 400.0,
            base_load_kw: 30.0,
            genset_kva: 250.0,
            diesel_price_per_liter: 32.0,
        }
    }
}

/// One equipment entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoadConfig {
    /// Display name.
    pub name: String,
    /// Rated power (kW). Omitted means not yet entered.
    #[serde(default)]
    pub kw: Option<f64>,
    /// Starter technology; sets the multiplier unless `multiplier` is given.
    #[serde(default)]
    pub starter: Option<StarterType>,
    /// Explicit start-up multiplier.
    #[serde(default)]
    pub multiplier: Option<f64>,
}

impl LoadConfig {
    /// Creates a load entry driven by a starter type.
    pub fn new(name: &str, kw: f64, starter: StarterType) -> Self {
        Self {
            name: name.to_string(),
            kw: Some(kw),
            starter: Some(starter),
            multiplier: None,
        }
    }

    /// Effective start-up multiplier: explicit value, else the starter's.
    pub fn resolved_multiplier(&self) -> f64 {
        self.multiplier
            .unwrap_or_else(|| self.starter.unwrap_or_default().multiplier())
    }
}

fn default_loads() -> Vec<LoadConfig> {
    vec![
        LoadConfig::new("Tower Crane 1", 45.0, StarterType::Vfd),
        LoadConfig::new("Passenger Hoist", 30.0, StarterType::SoftStarter),
    ]
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"site.transformer_kva"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::grid_augmentation()
    }
}

impl SiteConfig {
    /// Available preset names.
    pub const PRESETS: &[&str] = &[
        "grid_augmentation",
        "peak_shaving",
        "power_stability",
        "generator_hybrid",
    ];

    /// Returns the demo site: undersized transformer feeding a crane and a hoist.
    pub fn grid_augmentation() -> Self {
        Self {
            site: SiteSection::default(),
            loads: default_loads(),
        }
    }

    /// Returns the peak-shaving preset: tight contract limit, two cranes and a hoist.
    pub fn peak_shaving() -> Self {
        Self {
            site: SiteSection {
                scenario: Scenario::PeakShaving,
                transformer_kva: 800.0,
                contract_kw: 300.0,
                base_load_kw: 60.0,
                ..SiteSection::default()
            },
            loads: vec![
                LoadConfig::new("Tower Crane 1", 55.0, StarterType::Vfd),
                LoadConfig::new("Tower Crane 2", 55.0, StarterType::Vfd),
                LoadConfig::new("Passenger Hoist", 30.0, StarterType::SoftStarter),
            ],
        }
    }

    /// Returns the power-stability preset: old DOL batching plant on a small transformer.
    pub fn power_stability() -> Self {
        Self {
            site: SiteSection {
                scenario: Scenario::PowerStability,
                transformer_kva: 315.0,
                contract_kw: 300.0,
                base_load_kw: 40.0,
                ..SiteSection::default()
            },
            loads: vec![
                LoadConfig::new("Batching Plant", 37.0, StarterType::DirectOnLine),
                LoadConfig::new("Tower Crane 1", 45.0, StarterType::Vfd),
            ],
        }
    }

    /// Returns the generator-hybrid preset: off-grid site on a 250 kVA genset.
    pub fn generator_hybrid() -> Self {
        Self {
            site: SiteSection {
                scenario: Scenario::GeneratorHybrid,
                transformer_kva: 0.0,
                contract_kw: 0.0,
                ..SiteSection::default()
            },
            loads: vec![LoadConfig::new("Tower Crane 1", 45.0, StarterType::Vfd)],
        }
    }

    /// Loads a site from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "grid_augmentation" => Ok(Self::grid_augmentation()),
            "peak_shaving" => Ok(Self::peak_shaving()),
            "power_stability" => Ok(Self::power_stability()),
            "generator_hybrid" => Ok(Self::generator_hybrid()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a site from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("site", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a site from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Checks that every numeric field is finite.
    ///
    /// This is the engine's only input requirement; zero and negative
    /// values are accepted. Returns an empty vector if the site is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let s = &self.site;
        let site_fields = [
            ("site.transformer_kva", s.transformer_kva),
            ("site.contract_kw", s.contract_kw),
            ("site.base_load_kw", s.base_load_kw),
            ("site.genset_kva", s.genset_kva),
            ("site.diesel_price_per_liter", s.diesel_price_per_liter),
        ];
        for (field, value) in site_fields {
            if !value.is_finite() {
                errors.push(ConfigError::new(field, "must be a finite number"));
            }
        }

        for (i, load) in self.loads.iter().enumerate() {
            if load.kw.is_some_and(|kw| !kw.is_finite()) {
                errors.push(ConfigError::new(
                    format!("loads[{i}].kw"),
                    "must be a finite number",
                ));
            }
            if load.multiplier.is_some_and(|m| !m.is_finite()) {
                errors.push(ConfigError::new(
                    format!("loads[{i}].multiplier"),
                    "must be a finite number",
                ));
            }
        }

        errors
    }

    /// Builds the engine input, assigning load ids in insertion order from 1.
    ///
    /// Unusual but finite values are logged, not rejected.
    pub fn to_site_input(&self) -> SiteInput {
        let loads = self
            .loads
            .iter()
            .zip(1_u64..)
            .map(|(load, id)| {
                let multiplier = load.resolved_multiplier();
                if StarterType::from_multiplier(multiplier).is_none() {
                    tracing::warn!(
                        load = %load.name,
                        multiplier,
                        "multiplier is not a catalog starter value"
                    );
                }
                if load.kw.is_some_and(|kw| kw < 0.0) {
                    tracing::warn!(load = %load.name, kw = load.kw, "negative rated power");
                }
                LoadItem {
                    id,
                    name: load.name.clone(),
                    kw: load.kw,
                    multiplier,
                }
            })
            .collect();

        let s = &self.site;
        SiteInput {
            scenario: s.scenario,
            transformer_kva: s.transformer_kva,
            contract_kw: s.contract_kw,
            base_load_kw: s.base_load_kw,
            loads,
            genset_kva: s.genset_kva,
            diesel_price_per_liter: s.diesel_price_per_liter,
        }
    }
}
