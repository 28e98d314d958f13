//! Static product and policy tables: BESS models, scenarios, starter types.
//!
//! The tables are fixed and ordered. A [`Catalog`] wraps the model table so
//! an alternate product line can be injected into the engine, either built
//! in code or loaded from TOML.

use std::borrow::Cow;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::sizing::types::Scenario;

/// One battery product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BessModel {
    /// Stable identifier (e.g. `bess-500hd`).
    pub id: Cow<'static, str>,
    /// Marketing name.
    pub name: Cow<'static, str>,
    /// Rated continuous power (kW).
    pub power_kw: f64,
    /// Usable energy (kWh).
    pub energy_kwh: f64,
    /// Short-duration surge power limit (kW).
    pub surge_kw: f64,
    /// Rated C-rate.
    pub c_rate: f64,
    /// Shipping weight (tonnes).
    pub weight_t: f64,
    /// Physical dimensions, L x W x H.
    pub dims: Cow<'static, str>,
    /// Cell technology.
    pub tech: Cow<'static, str>,
    /// Short product description.
    pub description: Cow<'static, str>,
}

impl BessModel {
    /// Usable energy per kW of rated power (hours at full output).
    ///
    /// Zero for a model with no rated power.
    pub fn energy_to_power_ratio(&self) -> f64 {
        if self.power_kw > 0.0 {
            self.energy_kwh / self.power_kw
        } else {
            0.0
        }
    }
}

/// The standard product line, in catalog order.
pub static STANDARD_MODELS: [BessModel; 3] = [
    BessModel {
        id: Cow::Borrowed("bess-300"),
        name: Cow::Borrowed("JP Nelson BESS-300"),
        power_kw: 300.0,
        energy_kwh: 176.6,
        surge_kw: 519.0,
        c_rate: 1.7,
        weight_t: 5.2,
        dims: Cow::Borrowed("2.34m x 2.00m x 2.20m"),
        tech: Cow::Borrowed("Semi-Solid State LFP"),
        description: Cow::Borrowed("Compact unit for smaller sites."),
    },
    BessModel {
        id: Cow::Borrowed("bess-500"),
        name: Cow::Borrowed("JP Nelson BESS-500"),
        power_kw: 500.0,
        energy_kwh: 353.2,
        surge_kw: 864.0,
        c_rate: 1.4,
        weight_t: 5.5,
        dims: Cow::Borrowed("2.34m x 2.00m x 2.20m"),
        tech: Cow::Borrowed("Semi-Solid State LFP"),
        description: Cow::Borrowed("Standard solution for Tower Cranes."),
    },
    BessModel {
        id: Cow::Borrowed("bess-500hd"),
        name: Cow::Borrowed("JP Nelson BESS-500/HD"),
        power_kw: 500.0,
        energy_kwh: 529.8,
        surge_kw: 864.0,
        c_rate: 0.9,
        weight_t: 8.0,
        dims: Cow::Borrowed("3.00m x 2.20m x 2.25m"),
        tech: Cow::Borrowed("Semi-Solid State LFP"),
        description: Cow::Borrowed("High Capacity optimized for Diesel Saving."),
    },
];

/// Display metadata for a scenario.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ScenarioInfo {
    pub scenario: Scenario,
    pub label: &'static str,
    pub description: &'static str,
}

/// Scenario labels and descriptions, in catalog order.
pub static SCENARIOS: [ScenarioInfo; 4] = [
    ScenarioInfo {
        scenario: Scenario::PeakShaving,
        label: "Peak Shaving (Cost Saving)",
        description: "Reduce MEA Demand Charges by capping grid usage.",
    },
    ScenarioInfo {
        scenario: Scenario::PowerStability,
        label: "Power Stability",
        description: "Prevent voltage dips and nuisance trips on sensitive sites.",
    },
    ScenarioInfo {
        scenario: Scenario::GeneratorHybrid,
        label: "Generator Hybrid",
        description: "Reduce Diesel Consumption (Up to 74% Saving based on JP Nelson trials).",
    },
    ScenarioInfo {
        scenario: Scenario::GridAugmentation,
        label: "Grid Augmentation",
        description: "The Transformer is physically too small for the site peak load.",
    },
];

/// Looks up the display metadata for a scenario.
pub fn scenario_info(scenario: Scenario) -> &'static ScenarioInfo {
    // SCENARIOS lists every variant in `Scenario::ALL` order.
    let idx = Scenario::ALL
        .iter()
        .position(|s| *s == scenario)
        .unwrap_or_default();
    &SCENARIOS[idx]
}

/// Motor starter technology, which sets the start-up multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StarterType {
    /// Variable frequency drive / inverter (new cranes).
    #[default]
    Vfd,
    /// Soft starter (new hoists).
    SoftStarter,
    /// Star-delta or direct-on-line (old equipment).
    DirectOnLine,
}

/// Display metadata and multiplier for a starter type.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StarterOption {
    pub starter: StarterType,
    pub label: &'static str,
    pub multiplier: f64,
    pub description: &'static str,
}

/// Starter catalog, in display order.
pub static STARTER_TYPES: [StarterOption; 3] = [
    StarterOption {
        starter: StarterType::Vfd,
        label: "VFD / Inverter (New Crane)",
        multiplier: 4.0,
        description: "4x Rated Power",
    },
    StarterOption {
        starter: StarterType::SoftStarter,
        label: "Soft Starter (New Hoist)",
        multiplier: 6.0,
        description: "6x Rated Power",
    },
    StarterOption {
        starter: StarterType::DirectOnLine,
        label: "Star-Delta / DOL (Old Equipment)",
        multiplier: 10.0,
        description: "10x Rated Power",
    },
];

impl StarterType {
    /// Start-up multiplier for this starter type.
    pub fn multiplier(self) -> f64 {
        self.option().multiplier
    }

    /// Catalog entry for this starter type.
    pub fn option(self) -> &'static StarterOption {
        match self {
            Self::Vfd => &STARTER_TYPES[0],
            Self::SoftStarter => &STARTER_TYPES[1],
            Self::DirectOnLine => &STARTER_TYPES[2],
        }
    }

    /// Next starter type in catalog order, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Self::Vfd => Self::SoftStarter,
            Self::SoftStarter => Self::DirectOnLine,
            Self::DirectOnLine => Self::Vfd,
        }
    }

    /// Finds the starter type whose multiplier equals `multiplier`.
    pub fn from_multiplier(multiplier: f64) -> Option<Self> {
        STARTER_TYPES
            .iter()
            .find(|o| o.multiplier == multiplier)
            .map(|o| o.starter)
    }
}

impl fmt::Display for StarterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Vfd => "vfd",
            Self::SoftStarter => "soft_starter",
            Self::DirectOnLine => "direct_on_line",
        };
        f.write_str(s)
    }
}

impl FromStr for StarterType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vfd" | "inverter" => Ok(Self::Vfd),
            "soft_starter" | "soft" => Ok(Self::SoftStarter),
            "direct_on_line" | "dol" | "star_delta" => Ok(Self::DirectOnLine),
            other => Err(ConfigError::new(
                "starter",
                format!("unknown starter type \"{other}\", expected vfd, soft_starter or direct_on_line"),
            )),
        }
    }
}

/// An immutable, ordered BESS model table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Catalog {
    models: Vec<BessModel>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl Catalog {
    /// Returns the standard product line.
    pub fn standard() -> Self {
        Self {
            models: STANDARD_MODELS.to_vec(),
        }
    }

    /// Builds a catalog from an explicit model list, keeping its order.
    pub fn new(models: Vec<BessModel>) -> Self {
        Self { models }
    }

    /// Models in catalog order.
    pub fn models(&self) -> &[BessModel] {
        &self.models
    }

    /// Finds a model by identifier.
    pub fn find(&self, id: &str) -> Option<&BessModel> {
        self.models.iter().find(|m| m.id == id)
    }

    /// Parses a catalog from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or is not a valid catalog.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("catalog", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a catalog from a TOML string of `[[models]]` tables.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid, the table is empty,
    /// or a numeric field is not finite.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let catalog: Self =
            toml::from_str(s).map_err(|e| ConfigError::new("catalog", e.to_string()))?;
        if catalog.models.is_empty() {
            return Err(ConfigError::new("catalog.models", "must list at least one model"));
        }
        for (i, m) in catalog.models.iter().enumerate() {
            let fields = [
                ("power_kw", m.power_kw),
                ("energy_kwh", m.energy_kwh),
                ("surge_kw", m.surge_kw),
                ("c_rate", m.c_rate),
                ("weight_t", m.weight_t),
            ];
            if let Some((name, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
                return Err(ConfigError::new(
                    format!("catalog.models[{i}].{name}"),
                    "must be a finite number",
                ));
            }
        }
        Ok(catalog)
    }
}
