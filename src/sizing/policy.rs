//! Numeric sizing policy.
//!
//! These figures are business assumptions shared with existing sales
//! collateral. Proposal outputs must keep matching that collateral, so the
//! defaults are exact and should only be changed deliberately.

use serde::{Deserialize, Serialize};

/// Continuous-duty derating applied to transformer and genset nameplates.
pub const CONTINUOUS_DUTY_DERATING: f64 = 0.8;
/// Safety margin applied to the power shortfall.
pub const POWER_SAFETY_MARGIN: f64 = 1.2;
/// Share of the peak assumed to be drawn for the full discharge duration.
pub const DIVERSITY_FACTOR: f64 = 0.5;
/// Discharge duration for genset hybrid operation (hours).
pub const HYBRID_DISCHARGE_HOURS: f64 = 4.0;
/// Discharge duration for transient peak support (hours).
pub const PEAK_DISCHARGE_HOURS: f64 = 2.5;
/// Genset fuel burn (L per kVA per hour).
pub const GENSET_LITERS_PER_KVA_HOUR: f64 = 0.25;
/// Genset operating hours per working day.
pub const GENSET_HOURS_PER_DAY: f64 = 10.0;
/// Working days per month.
pub const WORKING_DAYS_PER_MONTH: f64 = 26.0;
/// Claimed share of diesel saved in hybrid mode.
pub const FUEL_SAVING_RATIO: f64 = 0.74;

/// The full set of policy constants consumed by the engine.
///
/// [`SizingPolicy::default`] returns the published figures above.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SizingPolicy {
    pub continuous_duty_derating: f64,
    pub power_safety_margin: f64,
    pub diversity_factor: f64,
    pub hybrid_discharge_hours: f64,
    pub peak_discharge_hours: f64,
    pub genset_liters_per_kva_hour: f64,
    pub genset_hours_per_day: f64,
    pub working_days_per_month: f64,
    pub fuel_saving_ratio: f64,
}

impl Default for SizingPolicy {
    fn default() -> Self {
        Self {
            continuous_duty_derating: CONTINUOUS_DUTY_DERATING,
            power_safety_margin: POWER_SAFETY_MARGIN,
            diversity_factor: DIVERSITY_FACTOR,
            hybrid_discharge_hours: HYBRID_DISCHARGE_HOURS,
            peak_discharge_hours: PEAK_DISCHARGE_HOURS,
            genset_liters_per_kva_hour: GENSET_LITERS_PER_KVA_HOUR,
            genset_hours_per_day: GENSET_HOURS_PER_DAY,
            working_days_per_month: WORKING_DAYS_PER_MONTH,
            fuel_saving_ratio: FUEL_SAVING_RATIO,
        }
    }
}
