//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use bess_sizer::catalog::BessModel;
use bess_sizer::sizing::{LoadItem, Scenario, SiteInput};

/// VFD start-up multiplier.
pub const VFD: f64 = 4.0;
/// Soft starter start-up multiplier.
pub const SOFT: f64 = 6.0;
/// Direct-on-line start-up multiplier.
pub const DOL: f64 = 10.0;

/// Demo site: 500 kVA transformer, 400 kW contract, 30 kW base load,
/// a 45 kW VFD crane and a 30 kW soft-start hoist.
pub fn demo_site(scenario: Scenario) -> SiteInput {
    SiteInput {
        scenario,
        transformer_kva: 500.0,
        contract_kw: 400.0,
        base_load_kw: 30.0,
        loads: demo_loads(45.0),
        genset_kva: 250.0,
        diesel_price_per_liter: 32.0,
    }
}

/// Demo equipment with the crane at `crane_kw`.
pub fn demo_loads(crane_kw: f64) -> Vec<LoadItem> {
    vec![
        LoadItem::new(1, "Tower Crane 1", crane_kw, VFD),
        LoadItem::new(2, "Passenger Hoist", 30.0, SOFT),
    ]
}

/// Demo site with the crane upgraded to 80 kW (peak 530 kW).
pub fn upgraded_site() -> SiteInput {
    SiteInput {
        loads: demo_loads(80.0),
        ..demo_site(Scenario::GridAugmentation)
    }
}

/// A catalog entry with only the sizing-relevant fields filled in.
pub fn model(id: &'static str, power_kw: f64, energy_kwh: f64) -> BessModel {
    BessModel {
        id: id.into(),
        name: id.into(),
        power_kw,
        energy_kwh,
        surge_kw: power_kw * 1.5,
        c_rate: if power_kw > 0.0 { power_kw / energy_kwh } else { 0.0 },
        weight_t: 1.0,
        dims: "1m x 1m x 1m".into(),
        tech: "LFP".into(),
        description: "test unit".into(),
    }
}
