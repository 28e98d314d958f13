//! Hardware matching against the model catalog.

use crate::catalog::BessModel;

use super::types::{FitStatus, Scenario};

/// Outcome of model matching.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection<'a> {
    /// Chosen model, if any.
    pub model: Option<&'a BessModel>,
    /// Fit classification.
    pub fit_status: FitStatus,
}

impl Selection<'_> {
    fn none() -> Self {
        Self {
            model: None,
            fit_status: FitStatus::NoneSelected,
        }
    }
}

/// Picks a catalog model for the required power and energy.
///
/// Hybrid mode always recommends the model with the most energy per kW,
/// since its purpose is fuel offset rather than gap filling. Other modes
/// only select when there is a power requirement, taking the smallest unit
/// that covers both power and energy, else falling back to the largest unit.
///
/// # Arguments
///
/// * `scenario` - Operating scenario
/// * `models` - Catalog models in catalog order
/// * `required_power_kw` - Power requirement including safety margin
/// * `required_energy_kwh` - Energy requirement
pub fn select_model(
    scenario: Scenario,
    models: &[BessModel],
    required_power_kw: f64,
    required_energy_kwh: f64,
) -> Selection<'_> {
    if scenario.is_hybrid() {
        return select_for_hybrid(models);
    }
    if required_power_kw > 0.0 {
        return select_for_gap(models, required_power_kw, required_energy_kwh);
    }
    Selection::none()
}

fn select_for_hybrid(models: &[BessModel]) -> Selection<'_> {
    // First of equal ratios wins, so catalog order breaks ties.
    let best = models.iter().reduce(|best, m| {
        if m.energy_to_power_ratio() > best.energy_to_power_ratio() {
            m
        } else {
            best
        }
    });
    match best {
        Some(model) => Selection {
            model: Some(model),
            fit_status: FitStatus::Perfect,
        },
        None => Selection::none(),
    }
}

fn select_for_gap(
    models: &[BessModel],
    required_power_kw: f64,
    required_energy_kwh: f64,
) -> Selection<'_> {
    let mut by_power: Vec<&BessModel> = models.iter().collect();
    // Stable: equal-power models keep catalog order.
    by_power.sort_by(|a, b| a.power_kw.total_cmp(&b.power_kw));

    if let Some(model) = by_power
        .iter()
        .copied()
        .find(|m| m.power_kw >= required_power_kw && m.energy_kwh >= required_energy_kwh)
    {
        return Selection {
            model: Some(model),
            fit_status: FitStatus::Perfect,
        };
    }

    let Some(largest) = by_power.last().copied() else {
        return Selection::none();
    };
    let fit_status = if largest.power_kw >= required_power_kw {
        FitStatus::CheckEnergy
    } else {
        FitStatus::Multiple
    };
    Selection {
        model: Some(largest),
        fit_status,
    }
}
