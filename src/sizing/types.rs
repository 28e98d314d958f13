//! Core sizing types: operating scenario, equipment loads, and calculation output.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::BessModel;

/// Operating mode the site falls under.
///
/// Selected once per calculation. Determines which supply-limit formula,
/// discharge duration, and model-selection policy the engine applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    /// Cap grid import to reduce demand charges.
    #[serde(alias = "A")]
    PeakShaving,
    /// Prevent voltage dips and nuisance trips.
    #[serde(alias = "B")]
    PowerStability,
    /// Genset-fed site; battery offsets diesel consumption.
    #[serde(alias = "C")]
    GeneratorHybrid,
    /// Transformer is physically too small for the site peak.
    #[serde(alias = "D")]
    GridAugmentation,
}

impl Scenario {
    /// All scenarios in catalog order.
    pub const ALL: [Scenario; 4] = [
        Scenario::PeakShaving,
        Scenario::PowerStability,
        Scenario::GeneratorHybrid,
        Scenario::GridAugmentation,
    ];

    /// Short letter code used on sales collateral (A-D).
    pub fn code(self) -> char {
        match self {
            Self::PeakShaving => 'A',
            Self::PowerStability => 'B',
            Self::GeneratorHybrid => 'C',
            Self::GridAugmentation => 'D',
        }
    }

    /// Snake-case identifier, as accepted in site files.
    pub fn key(self) -> &'static str {
        match self {
            Self::PeakShaving => "peak_shaving",
            Self::PowerStability => "power_stability",
            Self::GeneratorHybrid => "generator_hybrid",
            Self::GridAugmentation => "grid_augmentation",
        }
    }

    /// Returns `true` for the genset-fed hybrid mode.
    pub fn is_hybrid(self) -> bool {
        matches!(self, Self::GeneratorHybrid)
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Error returned when a scenario name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown scenario \"{0}\", expected one of: peak_shaving, power_stability, generator_hybrid, grid_augmentation (or A-D)")]
pub struct ParseScenarioError(pub String);

impl FromStr for Scenario {
    type Err = ParseScenarioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Scenario::ALL
            .into_iter()
            .find(|sc| {
                sc.key().eq_ignore_ascii_case(trimmed)
                    || trimmed.eq_ignore_ascii_case(&sc.code().to_string())
            })
            .ok_or_else(|| ParseScenarioError(s.to_string()))
    }
}

/// One piece of site equipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadItem {
    /// Unique key within the load list.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Rated power (kW). `None` while the operator is still editing the field.
    pub kw: Option<f64>,
    /// Start-up multiplier applied to the rated power during a surge.
    pub multiplier: f64,
}

impl LoadItem {
    /// Creates a load with a set rated power.
    pub fn new(id: u64, name: impl Into<String>, kw: f64, multiplier: f64) -> Self {
        Self {
            id,
            name: name.into(),
            kw: Some(kw),
            multiplier,
        }
    }

    /// Rated power, treating an unset value as zero.
    pub fn rated_kw(&self) -> f64 {
        self.kw.unwrap_or(0.0)
    }

    /// Worst-case start-up power (kW).
    pub fn peak_kw(&self) -> f64 {
        self.rated_kw() * self.multiplier
    }
}

/// Complete set of engine inputs for one calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteInput {
    /// Operating scenario.
    pub scenario: Scenario,
    /// Transformer nameplate rating (kVA).
    pub transformer_kva: f64,
    /// Contractual demand limit or MCCB rating (kW).
    pub contract_kw: f64,
    /// Steady site load that is always present (kW).
    pub base_load_kw: f64,
    /// Equipment list, in insertion order.
    pub loads: Vec<LoadItem>,
    /// Genset rating (kVA), used in hybrid mode.
    pub genset_kva: f64,
    /// Diesel price per liter, used in hybrid mode.
    pub diesel_price_per_liter: f64,
}

/// Terminal classification of how well the recommended model fits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitStatus {
    /// No shortfall and not hybrid mode: no hardware recommended.
    NoneSelected,
    /// A single unit covers both power and energy.
    Perfect,
    /// Power is covered by the largest unit, energy may need more capacity.
    CheckEnergy,
    /// Even the largest unit lacks power: parallel units required.
    Multiple,
}

impl fmt::Display for FitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NoneSelected => "none_selected",
            Self::Perfect => "perfect",
            Self::CheckEnergy => "check_energy",
            Self::Multiple => "multiple",
        };
        f.write_str(s)
    }
}

/// Projected diesel savings for hybrid mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelSavings {
    /// Diesel saved per working day (liters).
    pub daily_liters: f64,
    /// Savings per month in the diesel price currency.
    pub monthly_currency: f64,
}

/// Output of one sizing calculation. Every field is derived from the inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Continuous-duty transformer capacity (kW).
    pub physical_limit_kw: f64,
    /// Supply ceiling after scenario policy (kW).
    pub effective_grid_limit_kw: f64,
    /// Worst-case simultaneous start-up demand (kW).
    pub total_peak_load_kw: f64,
    /// Steady-state demand without surges (kW).
    pub total_rated_load_kw: f64,
    /// Peak demand above the supply ceiling (kW, >= 0).
    pub shortfall_kw: f64,
    /// Battery power rating needed, including safety margin (kW).
    pub required_bess_power_kw: f64,
    /// Battery usable energy needed (kWh).
    pub required_bess_energy_kwh: f64,
    /// Recommended catalog model, if selection ran.
    pub recommended_model: Option<BessModel>,
    /// Fit classification of the recommendation.
    pub fit_status: FitStatus,
    /// Fuel projection, hybrid mode only.
    pub fuel_savings: Option<FuelSavings>,
}

impl fmt::Display for CalculationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Sizing Result ---")?;
        writeln!(f, "Physical limit:        {:.1} kW", self.physical_limit_kw)?;
        writeln!(f, "Effective grid limit:  {:.1} kW", self.effective_grid_limit_kw)?;
        writeln!(f, "Total rated load:      {:.1} kW", self.total_rated_load_kw)?;
        writeln!(f, "Total peak load:       {:.1} kW", self.total_peak_load_kw)?;
        writeln!(f, "Shortfall:             {:.1} kW", self.shortfall_kw)?;
        writeln!(f, "Required BESS power:   {:.1} kW", self.required_bess_power_kw)?;
        writeln!(f, "Required BESS energy:  {:.1} kWh", self.required_bess_energy_kwh)?;
        match &self.recommended_model {
            Some(m) => writeln!(
                f,
                "Recommended model:     {} ({} kW / {} kWh)",
                m.name, m.power_kw, m.energy_kwh
            )?,
            None => writeln!(f, "Recommended model:     none")?,
        }
        if let Some(fuel) = &self.fuel_savings {
            writeln!(f, "Diesel offset:         {:.1} L/day", fuel.daily_liters)?;
            writeln!(f, "Monthly saving:        {:.0}", fuel.monthly_currency)?;
        }
        write!(f, "Fit status:            {}", self.fit_status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_parses_keys_and_codes() {
        assert_eq!("peak_shaving".parse(), Ok(Scenario::PeakShaving));
        assert_eq!("C".parse(), Ok(Scenario::GeneratorHybrid));
        assert_eq!("d".parse(), Ok(Scenario::GridAugmentation));
        assert_eq!(" Power_Stability ".parse(), Ok(Scenario::PowerStability));
    }

    #[test]
    fn scenario_rejects_unknown() {
        let err = "island".parse::<Scenario>().unwrap_err();
        assert!(err.to_string().contains("island"));
    }

    #[test]
    fn scenario_display_round_trips() {
        for sc in Scenario::ALL {
            assert_eq!(sc.to_string().parse(), Ok(sc));
        }
    }

    #[test]
    fn unset_kw_counts_as_zero() {
        let load = LoadItem {
            id: 1,
            name: "Hoist".to_string(),
            kw: None,
            multiplier: 6.0,
        };
        assert_eq!(load.rated_kw(), 0.0);
        assert_eq!(load.peak_kw(), 0.0);
    }

    #[test]
    fn peak_applies_multiplier() {
        let load = LoadItem::new(1, "Tower Crane", 45.0, 4.0);
        assert_eq!(load.peak_kw(), 180.0);
    }

    #[test]
    fn fit_status_serializes_snake_case() {
        let json = serde_json::to_string(&FitStatus::CheckEnergy).unwrap();
        assert_eq!(json, "\"check_energy\"");
    }

    #[test]
    fn fit_status_display_matches_json() {
        for status in [
            FitStatus::NoneSelected,
            FitStatus::Perfect,
            FitStatus::CheckEnergy,
            FitStatus::Multiple,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{status}\""));
        }
    }
}
