//! Client proposal text and load-profile chart data.

use std::fmt;

use serde::Serialize;

use crate::catalog::scenario_info;
use crate::sizing::{CalculationResult, FitStatus, SiteInput};

const RULE: &str = "------------------------------------------------------------";

/// One bar of the load-profile chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadBar {
    /// Bar label: "Base Load" or the equipment name.
    pub label: String,
    /// Whether this is the steady base load or a surging item.
    pub kind: BarKind,
    /// Bar height (kW): base load, or rated kW times multiplier.
    pub peak_kw: f64,
}

/// Kind of bar in the load profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BarKind {
    Base,
    Surge,
}

impl fmt::Display for BarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Base => "base",
            Self::Surge => "surge",
        })
    }
}

/// Chart data: one bar for the base load, then one per equipment item.
pub fn load_profile(site: &SiteInput) -> Vec<LoadBar> {
    std::iter::once(LoadBar {
        label: "Base Load".to_string(),
        kind: BarKind::Base,
        peak_kw: site.base_load_kw,
    })
    .chain(site.loads.iter().map(|l| LoadBar {
        label: l.name.clone(),
        kind: BarKind::Surge,
        peak_kw: l.peak_kw(),
    }))
    .collect()
}

/// Advisory shown alongside the recommendation, if the fit needs one.
pub fn fit_advisory(status: FitStatus) -> Option<&'static str> {
    match status {
        FitStatus::Multiple => Some(
            "HIGH LOAD DETECTED: SITE PEAK EXCEEDS SINGLE UNIT OUTPUT. \
             WE RECOMMEND MULTIPLE UNITS IN PARALLEL.",
        ),
        FitStatus::CheckEnergy => Some(
            "CAPACITY VERIFICATION: POWER SURGE IS HANDLED, BUT HIGH SUSTAINED \
             LOADS MAY REQUIRE ADDITIONAL kWh CAPACITY.",
        ),
        FitStatus::NoneSelected | FitStatus::Perfect => None,
    }
}

/// Client-facing proposal document for one sizing result.
///
/// Rendering is through [`fmt::Display`].
pub struct ProposalReport<'a> {
    site: &'a SiteInput,
    result: &'a CalculationResult,
}

impl<'a> ProposalReport<'a> {
    pub fn new(site: &'a SiteInput, result: &'a CalculationResult) -> Self {
        Self { site, result }
    }
}

impl fmt::Display for ProposalReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.result;
        let mode = scenario_info(self.site.scenario).label.to_uppercase();

        writeln!(f, "SUBJECT: JP NELSON BESS SYSTEM SIZING & SITE ANALYSIS")?;
        writeln!(f)?;
        writeln!(f, "ATTN: PROJECT MANAGER / ELECTRICAL ENGINEER")?;
        writeln!(f)?;
        writeln!(
            f,
            "BASED ON THE SITE PARAMETERS PROVIDED, JP NELSON EQUIPMENT GROUP HAS \
             COMPLETED THE ENERGY STORAGE SIZING ANALYSIS."
        )?;
        writeln!(f)?;

        writeln!(f, "[1] SITE CAPACITY ANALYSIS:")?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "- OPERATIONAL MODE: {mode}")?;
        writeln!(f, "- SITE SUSTAINED LIMIT: {:.0} kW", whole(r.effective_grid_limit_kw))?;
        writeln!(f, "- CALCULATED PEAK SURGE: {:.0} kW", whole(r.total_peak_load_kw))?;
        writeln!(
            f,
            "- POWER GAP TO BRIDGE: {:.0} kW (+20% SAFETY BUFFER APPLIED)",
            whole(r.shortfall_kw)
        )?;
        writeln!(f)?;

        writeln!(f, "[2] BESS RECOMMENDATION:")?;
        writeln!(f, "{RULE}")?;
        match &r.recommended_model {
            Some(m) => {
                writeln!(f, "- RECOMMENDED UNIT: {}", m.name.to_uppercase())?;
                writeln!(f, "- POWER CAPABILITY: {} kW", m.power_kw)?;
                writeln!(f, "- STORAGE CAPACITY: {} kWh", m.energy_kwh)?;
                writeln!(f, "- CELL TECHNOLOGY: SEMI-SOLID STATE LFP (ULTRA-SAFE)")?;
                writeln!(f, "- UNIT FOOTPRINT: {}", m.dims)?;
            }
            None => {
                writeln!(f, "- RECOMMENDED UNIT: CUSTOM MULTI-UNIT ARRAY")?;
                writeln!(f, "- POWER CAPABILITY: CALCULATED kW")?;
                writeln!(f, "- STORAGE CAPACITY: CALCULATED kWh")?;
                writeln!(f, "- CELL TECHNOLOGY: SEMI-SOLID STATE LFP (ULTRA-SAFE)")?;
                writeln!(f, "- UNIT FOOTPRINT: MODULAR")?;
            }
        }
        if let Some(note) = fit_advisory(r.fit_status) {
            writeln!(f, "- NOTE: {note}")?;
        }

        if let Some(fuel) = &r.fuel_savings {
            writeln!(f)?;
            writeln!(f, "[3] ECONOMIC IMPACT (HYBRID MODE):")?;
            writeln!(f, "{RULE}")?;
            writeln!(
                f,
                "- EST. MONTHLY SAVING: {} THB",
                group_thousands(fuel.monthly_currency)
            )?;
            writeln!(f, "- EST. DIESEL OFFSET: {:.0} L / DAY", whole(fuel.daily_liters))?;
            writeln!(f, "- CARBON OFFSET: SIGNIFICANT REDUCTION IN EMISSIONS & NOISE")?;
        }
        writeln!(f)?;

        writeln!(f, "[4] TECHNICAL JUSTIFICATION:")?;
        writeln!(f, "{RULE}")?;
        write!(
            f,
            "THE PROPOSED JP NELSON BESS WILL ACT AS A HIGH-SPEED POWER BUFFER. \
             IT WILL DISCHARGE INSTANTANEOUSLY DURING CRANE STARTUP (SURGE PHASES) \
             AND RECHARGE DURING THE \"DWELL\" TIMES FROM YOUR GRID/GENSET SUPPLY. \
             THIS ENSURES THE SOURCE NEVER SEES THE PEAK LOAD, RESULTING IN ZERO \
             TRIPS AND STABLE VOLTAGE."
        )?;
        writeln!(f)?;
        writeln!(f)?;
        writeln!(f, "PREPARED BY:")?;
        writeln!(f, "JP NELSON SALES ENGINEERING TEAM")?;
        write!(f, "WWW.JPNELSON.CO.TH")
    }
}

/// Rounds half away from zero, as the printed collateral does.
fn whole(value: f64) -> f64 {
    value.round()
}

/// Formats a value with comma thousands separators and up to three decimals.
fn group_thousands(value: f64) -> String {
    let rounded = format!("{:.3}", value.abs());
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && rounded.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };
    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac_part}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::sizing::SizingEngine;

    fn render(cfg: &SiteConfig) -> String {
        let site = cfg.to_site_input();
        let result = SizingEngine::new().compute(&site);
        ProposalReport::new(&site, &result).to_string()
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(384_800.0), "384,800");
        assert_eq!(group_thousands(1_234_567.25), "1,234,567.25");
        assert_eq!(group_thousands(999.0), "999");
        assert_eq!(group_thousands(0.0), "0");
        assert_eq!(group_thousands(-1500.5), "-1,500.5");
    }

    #[test]
    fn profile_has_base_then_loads() {
        let site = SiteConfig::grid_augmentation().to_site_input();
        let bars = load_profile(&site);
        assert_eq!(bars.len(), 3);
        assert_eq!(bars[0].kind, BarKind::Base);
        assert_eq!(bars[0].peak_kw, 30.0);
        assert_eq!(bars[1].label, "Tower Crane 1");
        assert_eq!(bars[1].peak_kw, 180.0);
        assert_eq!(bars[2].peak_kw, 180.0);
    }

    #[test]
    fn no_shortfall_proposal_uses_placeholders() {
        let text = render(&SiteConfig::grid_augmentation());
        assert!(text.contains("- OPERATIONAL MODE: GRID AUGMENTATION"));
        assert!(text.contains("- SITE SUSTAINED LIMIT: 400 kW"));
        assert!(text.contains("- CALCULATED PEAK SURGE: 390 kW"));
        assert!(text.contains("CUSTOM MULTI-UNIT ARRAY"));
        assert!(text.contains("- UNIT FOOTPRINT: MODULAR"));
        assert!(!text.contains("[3] ECONOMIC IMPACT"));
    }

    #[test]
    fn hybrid_proposal_includes_economics() {
        let text = render(&SiteConfig::generator_hybrid());
        assert!(text.contains("- RECOMMENDED UNIT: JP NELSON BESS-500/HD"));
        assert!(text.contains("- EST. MONTHLY SAVING: 384,800 THB"));
        assert!(text.contains("- EST. DIESEL OFFSET: 463 L / DAY"));
        assert!(text.contains("- UNIT FOOTPRINT: 3.00m x 2.20m x 2.25m"));
    }

    #[test]
    fn proposal_ends_with_signature_block() {
        let text = render(&SiteConfig::grid_augmentation());
        assert!(text.ends_with(
            "STABLE VOLTAGE.\n\nPREPARED BY:\nJP NELSON SALES ENGINEERING TEAM\nWWW.JPNELSON.CO.TH"
        ));
    }

    #[test]
    fn check_energy_advisory_present() {
        let text = render(&SiteConfig::peak_shaving());
        assert!(text.contains("CAPACITY VERIFICATION"));
    }

    #[test]
    fn advisories_by_status() {
        assert!(fit_advisory(FitStatus::Perfect).is_none());
        assert!(fit_advisory(FitStatus::NoneSelected).is_none());
        assert!(fit_advisory(FitStatus::Multiple).is_some_and(|s| s.contains("PARALLEL")));
    }
}
