//! Sizing engine: supply ceiling, load aggregation, gap, energy, fuel, and model matching.
//!
//! Every stage is a small pure function parameterized by the scenario so
//! the policy differences between modes sit in one place.

use crate::catalog::Catalog;

use super::policy::SizingPolicy;
use super::selection::select_model;
use super::types::{CalculationResult, FuelSavings, LoadItem, Scenario, SiteInput};

/// Continuous-duty and policy-adjusted supply ceilings (kW).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SupplyCeiling {
    /// Transformer continuous-duty capacity.
    pub physical_limit_kw: f64,
    /// Binding limit for the scenario.
    pub effective_limit_kw: f64,
}

/// Steady and worst-case site demand (kW).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadTotals {
    pub rated_kw: f64,
    pub peak_kw: f64,
}

/// Power gap and battery requirements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GapAnalysis {
    pub shortfall_kw: f64,
    pub required_power_kw: f64,
    pub required_energy_kwh: f64,
}

/// Stage 1: transformer and scenario supply ceilings.
///
/// Hybrid sites run from the genset, so the grid contract and transformer
/// do not bind. Everywhere else the tighter of transformer capacity and
/// contract demand limit applies.
pub fn supply_ceiling(
    policy: &SizingPolicy,
    scenario: Scenario,
    transformer_kva: f64,
    contract_kw: f64,
    genset_kva: f64,
) -> SupplyCeiling {
    let physical_limit_kw = transformer_kva * policy.continuous_duty_derating;
    let effective_limit_kw = match scenario {
        Scenario::GeneratorHybrid => genset_kva * policy.continuous_duty_derating,
        Scenario::PeakShaving | Scenario::PowerStability | Scenario::GridAugmentation => {
            physical_limit_kw.min(contract_kw)
        }
    };
    SupplyCeiling {
        physical_limit_kw,
        effective_limit_kw,
    }
}

/// Stage 2: sums base load with rated and start-up load of every item.
///
/// No diversity is applied: the power rating has to cover every surge at once.
pub fn load_totals(base_load_kw: f64, loads: &[LoadItem]) -> LoadTotals {
    loads.iter().fold(
        LoadTotals {
            rated_kw: base_load_kw,
            peak_kw: base_load_kw,
        },
        |acc, load| LoadTotals {
            rated_kw: acc.rated_kw + load.rated_kw(),
            peak_kw: acc.peak_kw + load.peak_kw(),
        },
    )
}

/// Discharge duration assumed for the scenario (hours).
pub fn discharge_hours(policy: &SizingPolicy, scenario: Scenario) -> f64 {
    match scenario {
        Scenario::GeneratorHybrid => policy.hybrid_discharge_hours,
        Scenario::PeakShaving | Scenario::PowerStability | Scenario::GridAugmentation => {
            policy.peak_discharge_hours
        }
    }
}

/// Stages 3 and 4: shortfall, battery power with margin, and diversified energy.
pub fn gap_analysis(
    policy: &SizingPolicy,
    scenario: Scenario,
    peak_kw: f64,
    effective_limit_kw: f64,
) -> GapAnalysis {
    let shortfall_kw = (peak_kw - effective_limit_kw).max(0.0);
    let required_power_kw = if shortfall_kw > 0.0 {
        shortfall_kw * policy.power_safety_margin
    } else {
        0.0
    };
    let required_energy_kwh =
        required_power_kw * discharge_hours(policy, scenario) * policy.diversity_factor;
    GapAnalysis {
        shortfall_kw,
        required_power_kw,
        required_energy_kwh,
    }
}

/// Stage 5: diesel offset for hybrid sites, `None` for every other scenario.
pub fn fuel_savings(
    policy: &SizingPolicy,
    scenario: Scenario,
    genset_kva: f64,
    diesel_price_per_liter: f64,
) -> Option<FuelSavings> {
    if !scenario.is_hybrid() {
        return None;
    }
    let daily_consumption =
        genset_kva * policy.genset_liters_per_kva_hour * policy.genset_hours_per_day;
    let daily_liters = daily_consumption * policy.fuel_saving_ratio;
    Some(FuelSavings {
        daily_liters,
        monthly_currency: daily_liters * diesel_price_per_liter * policy.working_days_per_month,
    })
}

/// Stateless sizing engine bound to a model catalog and policy.
///
/// Holds only immutable data, so one instance can be shared freely.
#[derive(Debug, Clone, Default)]
pub struct SizingEngine {
    catalog: Catalog,
    policy: SizingPolicy,
}

impl SizingEngine {
    /// Creates an engine with the standard catalog and published policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with an alternate model catalog.
    pub fn with_catalog(catalog: Catalog) -> Self {
        Self {
            catalog,
            policy: SizingPolicy::default(),
        }
    }

    /// Replaces the policy constants.
    pub fn with_policy(mut self, policy: SizingPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Model catalog used for selection.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Policy constants in effect.
    pub fn policy(&self) -> &SizingPolicy {
        &self.policy
    }

    /// Runs every stage for the given site.
    ///
    /// Never panics for finite inputs. Zero, negative, or empty inputs
    /// produce degenerate but consistent figures.
    pub fn compute(&self, site: &SiteInput) -> CalculationResult {
        let policy = &self.policy;
        let ceiling = supply_ceiling(
            policy,
            site.scenario,
            site.transformer_kva,
            site.contract_kw,
            site.genset_kva,
        );
        let totals = load_totals(site.base_load_kw, &site.loads);
        let gap = gap_analysis(
            policy,
            site.scenario,
            totals.peak_kw,
            ceiling.effective_limit_kw,
        );
        let fuel = fuel_savings(
            policy,
            site.scenario,
            site.genset_kva,
            site.diesel_price_per_liter,
        );
        let selection = select_model(
            site.scenario,
            self.catalog.models(),
            gap.required_power_kw,
            gap.required_energy_kwh,
        );

        tracing::debug!(
            scenario = %site.scenario,
            effective_limit_kw = ceiling.effective_limit_kw,
            peak_kw = totals.peak_kw,
            shortfall_kw = gap.shortfall_kw,
            required_power_kw = gap.required_power_kw,
            model = selection.model.map(|m| m.id.as_ref()),
            fit = %selection.fit_status,
            "sizing computed"
        );

        CalculationResult {
            physical_limit_kw: ceiling.physical_limit_kw,
            effective_grid_limit_kw: ceiling.effective_limit_kw,
            total_peak_load_kw: totals.peak_kw,
            total_rated_load_kw: totals.rated_kw,
            shortfall_kw: gap.shortfall_kw,
            required_bess_power_kw: gap.required_power_kw,
            required_bess_energy_kwh: gap.required_energy_kwh,
            recommended_model: selection.model.cloned(),
            fit_status: selection.fit_status,
            fuel_savings: fuel,
        }
    }
}

/// Sizes a site with the standard catalog and published policy.
///
/// # Examples
///
/// ```
/// use bess_sizer::sizing::{compute, FitStatus, LoadItem, Scenario};
///
/// let loads = [LoadItem::new(1, "Tower Crane", 45.0, 4.0)];
/// let r = compute(Scenario::GridAugmentation, 500.0, 400.0, 30.0, &loads, 0.0, 0.0);
/// assert_eq!(r.total_peak_load_kw, 210.0);
/// assert_eq!(r.fit_status, FitStatus::NoneSelected);
/// ```
pub fn compute(
    scenario: Scenario,
    transformer_kva: f64,
    contract_kw: f64,
    base_load_kw: f64,
    loads: &[LoadItem],
    genset_kva: f64,
    diesel_price_per_liter: f64,
) -> CalculationResult {
    SizingEngine::new().compute(&SiteInput {
        scenario,
        transformer_kva,
        contract_kw,
        base_load_kw,
        loads: loads.to_vec(),
        genset_kva,
        diesel_price_per_liter,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> SizingPolicy {
        SizingPolicy::default()
    }

    #[test]
    fn grid_limit_takes_tighter_constraint() {
        let c = supply_ceiling(&policy(), Scenario::PeakShaving, 500.0, 350.0, 999.0);
        assert_eq!(c.physical_limit_kw, 400.0);
        assert_eq!(c.effective_limit_kw, 350.0);

        let c = supply_ceiling(&policy(), Scenario::PeakShaving, 250.0, 350.0, 999.0);
        assert_eq!(c.effective_limit_kw, 200.0);
    }

    #[test]
    fn hybrid_limit_uses_genset_only() {
        let c = supply_ceiling(&policy(), Scenario::GeneratorHybrid, 500.0, 10.0, 250.0);
        assert_eq!(c.physical_limit_kw, 400.0);
        assert_eq!(c.effective_limit_kw, 200.0);
    }

    #[test]
    fn empty_loads_total_base_load() {
        let t = load_totals(30.0, &[]);
        assert_eq!(t.rated_kw, 30.0);
        assert_eq!(t.peak_kw, 30.0);
    }

    #[test]
    fn totals_apply_multipliers_to_peak_only() {
        let loads = [
            LoadItem::new(1, "Crane", 45.0, 4.0),
            LoadItem::new(2, "Hoist", 30.0, 6.0),
        ];
        let t = load_totals(30.0, &loads);
        assert_eq!(t.rated_kw, 105.0);
        assert_eq!(t.peak_kw, 390.0);
    }

    #[test]
    fn no_gap_means_no_requirement() {
        let g = gap_analysis(&policy(), Scenario::GridAugmentation, 390.0, 400.0);
        assert_eq!(g.shortfall_kw, 0.0);
        assert_eq!(g.required_power_kw, 0.0);
        assert_eq!(g.required_energy_kwh, 0.0);
    }

    #[test]
    fn gap_applies_margin_duration_and_diversity() {
        let g = gap_analysis(&policy(), Scenario::GridAugmentation, 530.0, 400.0);
        assert_eq!(g.shortfall_kw, 130.0);
        assert!((g.required_power_kw - 156.0).abs() < 1e-9);
        assert!((g.required_energy_kwh - 195.0).abs() < 1e-9);

        let g = gap_analysis(&policy(), Scenario::GeneratorHybrid, 300.0, 200.0);
        assert!((g.required_power_kw - 120.0).abs() < 1e-9);
        assert!((g.required_energy_kwh - 240.0).abs() < 1e-9);
    }

    #[test]
    fn durations_per_scenario() {
        assert_eq!(discharge_hours(&policy(), Scenario::GeneratorHybrid), 4.0);
        for sc in [
            Scenario::PeakShaving,
            Scenario::PowerStability,
            Scenario::GridAugmentation,
        ] {
            assert_eq!(discharge_hours(&policy(), sc), 2.5);
        }
    }

    #[test]
    fn fuel_savings_only_for_hybrid() {
        assert!(fuel_savings(&policy(), Scenario::PeakShaving, 250.0, 32.0).is_none());
        let f = fuel_savings(&policy(), Scenario::GeneratorHybrid, 250.0, 32.0);
        let f = f.expect("hybrid should project savings");
        assert!((f.daily_liters - 462.5).abs() < 1e-9);
        assert!((f.monthly_currency - 384_800.0).abs() < 1e-6);
    }

    #[test]
    fn negative_inputs_do_not_panic() {
        let loads = [LoadItem::new(1, "Odd", -10.0, 4.0)];
        let r = compute(Scenario::PeakShaving, -100.0, -50.0, -5.0, &loads, -1.0, -2.0);
        assert_eq!(r.physical_limit_kw, -80.0);
        assert_eq!(r.effective_grid_limit_kw, -80.0);
        assert_eq!(r.total_peak_load_kw, -45.0);
        assert_eq!(r.shortfall_kw, 35.0);
        assert_eq!(r.fit_status, crate::sizing::FitStatus::Perfect);
    }

    #[test]
    fn custom_policy_flows_through() {
        let engine = SizingEngine::new().with_policy(SizingPolicy {
            power_safety_margin: 1.0,
            ..SizingPolicy::default()
        });
        let site = SiteInput {
            scenario: Scenario::GridAugmentation,
            transformer_kva: 500.0,
            contract_kw: 400.0,
            base_load_kw: 500.0,
            loads: Vec::new(),
            genset_kva: 0.0,
            diesel_price_per_liter: 0.0,
        };
        let r = engine.compute(&site);
        assert_eq!(r.required_bess_power_kw, 100.0);
    }
}
