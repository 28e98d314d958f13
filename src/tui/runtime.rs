//! TUI application state: the site being edited and its live sizing result.

use crate::catalog::StarterType;
use crate::config::{LoadConfig, SiteConfig, SiteSection};
use crate::report::{LoadBar, load_profile};
use crate::sizing::{CalculationResult, Scenario, SiteInput, SizingEngine};

/// kW added or removed per adjustment key press on a load.
pub const KW_STEP: f64 = 5.0;

/// Name given to equipment added from the editor.
pub const NEW_LOAD_NAME: &str = "New Equipment";

/// Editable supply and economic field of the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteField {
    TransformerKva,
    ContractKw,
    BaseLoadKw,
    GensetKva,
    DieselPrice,
}

impl SiteField {
    /// Fields in panel order.
    pub const ALL: [SiteField; 5] = [
        SiteField::TransformerKva,
        SiteField::ContractKw,
        SiteField::BaseLoadKw,
        SiteField::GensetKva,
        SiteField::DieselPrice,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::TransformerKva => "Transformer (kVA)",
            Self::ContractKw => "Contract limit (kW)",
            Self::BaseLoadKw => "Base load (kW)",
            Self::GensetKva => "Genset (kVA)",
            Self::DieselPrice => "Diesel price (/L)",
        }
    }

    /// Amount one `+`/`-` press moves the field.
    pub fn step(self) -> f64 {
        match self {
            Self::TransformerKva | Self::GensetKva => 25.0,
            Self::ContractKw => 10.0,
            Self::BaseLoadKw => 5.0,
            Self::DieselPrice => 1.0,
        }
    }

    pub fn get(self, site: &SiteSection) -> f64 {
        match self {
            Self::TransformerKva => site.transformer_kva,
            Self::ContractKw => site.contract_kw,
            Self::BaseLoadKw => site.base_load_kw,
            Self::GensetKva => site.genset_kva,
            Self::DieselPrice => site.diesel_price_per_liter,
        }
    }

    fn slot(self, site: &mut SiteSection) -> &mut f64 {
        match self {
            Self::TransformerKva => &mut site.transformer_kva,
            Self::ContractKw => &mut site.contract_kw,
            Self::BaseLoadKw => &mut site.base_load_kw,
            Self::GensetKva => &mut site.genset_kva,
            Self::DieselPrice => &mut site.diesel_price_per_liter,
        }
    }
}

/// Which panel `+`/`-` and the arrow keys act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Loads,
    Site(SiteField),
}

impl Focus {
    /// Next focus target: the load list, then each site field in turn.
    pub fn next(self) -> Self {
        match self {
            Self::Loads => Self::Site(SiteField::ALL[0]),
            Self::Site(field) => {
                let i = SiteField::ALL.iter().position(|f| *f == field).unwrap_or(0);
                SiteField::ALL
                    .get(i + 1)
                    .map_or(Self::Loads, |f| Self::Site(*f))
            }
        }
    }
}

/// TUI application state.
pub struct App {
    engine: SizingEngine,
    /// Header label: preset name or site file.
    pub title: String,
    /// Site being edited.
    pub config: SiteConfig,
    /// Engine input derived from `config`.
    pub site: SiteInput,
    /// Latest sizing result, recomputed on every edit.
    pub result: CalculationResult,
    /// Index of the selected load, if any loads exist.
    pub selected: Option<usize>,
    /// Panel receiving adjustments.
    pub focus: Focus,
    /// Set while keystrokes edit the selected load's name.
    pub renaming: bool,
    /// Index into `SiteConfig::PRESETS` that `p` advances from.
    pub preset_idx: usize,
    /// Whether the user has requested quit.
    pub quit: bool,
}

impl App {
    /// Creates a new app from a preset name, falling back to the default site.
    pub fn new(preset: &str, engine: SizingEngine) -> Self {
        let preset_idx = SiteConfig::PRESETS
            .iter()
            .position(|p| *p == preset)
            .unwrap_or_default();
        let name = SiteConfig::PRESETS[preset_idx];
        let config = SiteConfig::from_preset(name).unwrap_or_default();
        Self::with_config(config, name, preset_idx, engine)
    }

    /// Creates a new app editing an explicit site.
    pub fn with_config(
        config: SiteConfig,
        title: impl Into<String>,
        preset_idx: usize,
        engine: SizingEngine,
    ) -> Self {
        let site = config.to_site_input();
        let result = engine.compute(&site);
        let selected = if config.loads.is_empty() { None } else { Some(0) };
        Self {
            engine,
            title: title.into(),
            config,
            site,
            result,
            selected,
            focus: Focus::Loads,
            renaming: false,
            preset_idx,
            quit: false,
        }
    }

    fn recompute(&mut self) {
        self.site = self.config.to_site_input();
        self.result = self.engine.compute(&self.site);
    }

    fn selected_load(&mut self) -> Option<&mut LoadConfig> {
        self.selected.and_then(|i| self.config.loads.get_mut(i))
    }

    /// Switches the operating scenario.
    pub fn set_scenario(&mut self, scenario: Scenario) {
        self.config.site.scenario = scenario;
        self.recompute();
    }

    /// Moves focus to the next panel or site field.
    pub fn cycle_focus(&mut self) {
        self.focus = self.focus.next();
    }

    /// Moves the selection down, wrapping.
    pub fn select_next(&mut self) {
        let n = self.config.loads.len();
        self.selected = self.selected.map(|i| (i + 1) % n.max(1));
    }

    /// Moves the selection up, wrapping.
    pub fn select_prev(&mut self) {
        let n = self.config.loads.len();
        self.selected = self.selected.map(|i| if i == 0 { n.saturating_sub(1) } else { i - 1 });
    }

    /// Applies one `+` (`steps = 1`) or `-` (`steps = -1`) to the focused item.
    pub fn adjust_focused(&mut self, steps: f64) {
        match self.focus {
            Focus::Loads => self.adjust_selected_kw(steps * KW_STEP),
            Focus::Site(field) => self.adjust_site(field, steps * field.step()),
        }
    }

    /// Adds `delta_kw` to the selected load's rated power, never below zero.
    pub fn adjust_selected_kw(&mut self, delta_kw: f64) {
        let Some(load) = self.selected_load() else {
            return;
        };
        let kw = load.kw.unwrap_or(0.0) + delta_kw;
        load.kw = Some(kw.max(0.0));
        self.recompute();
    }

    /// Adds `delta` to a site field, never below zero.
    pub fn adjust_site(&mut self, field: SiteField, delta: f64) {
        let slot = field.slot(&mut self.config.site);
        *slot = (*slot + delta).max(0.0);
        self.recompute();
    }

    /// Cycles the selected load to the next starter type.
    pub fn cycle_starter(&mut self) {
        let Some(load) = self.selected_load() else {
            return;
        };
        let current = match load.multiplier {
            Some(m) => StarterType::from_multiplier(m).unwrap_or_default(),
            None => load.starter.unwrap_or_default(),
        };
        load.starter = Some(current.next());
        load.multiplier = None;
        self.recompute();
    }

    /// Appends a 0 kW VFD load and selects it.
    pub fn add_load(&mut self) {
        self.config
            .loads
            .push(LoadConfig::new(NEW_LOAD_NAME, 0.0, StarterType::Vfd));
        self.selected = Some(self.config.loads.len() - 1);
        self.focus = Focus::Loads;
        self.recompute();
    }

    /// Removes the selected load; the selection stays at the same row if possible.
    pub fn remove_selected(&mut self) {
        let Some(i) = self.selected.filter(|i| *i < self.config.loads.len()) else {
            return;
        };
        self.config.loads.remove(i);
        let n = self.config.loads.len();
        self.selected = (n > 0).then(|| i.min(n - 1));
        self.renaming = false;
        self.recompute();
    }

    /// Starts editing the selected load's name.
    pub fn begin_rename(&mut self) {
        self.renaming = self.selected.is_some();
    }

    /// Stops editing the name.
    pub fn end_rename(&mut self) {
        self.renaming = false;
    }

    /// Appends a character to the selected load's name.
    pub fn push_name_char(&mut self, ch: char) {
        if let Some(load) = self.selected_load() {
            load.name.push(ch);
            self.recompute();
        }
    }

    /// Deletes the last character of the selected load's name.
    pub fn pop_name_char(&mut self) {
        if let Some(load) = self.selected_load() {
            load.name.pop();
            self.recompute();
        }
    }

    /// Loads the next preset, discarding edits.
    pub fn next_preset(&mut self) {
        let idx = (self.preset_idx + 1) % SiteConfig::PRESETS.len();
        let name = SiteConfig::PRESETS[idx];
        if let Ok(config) = SiteConfig::from_preset(name) {
            *self = Self::with_config(config, name, idx, self.engine.clone());
        }
    }

    /// Chart bars for the current site.
    pub fn profile(&self) -> Vec<LoadBar> {
        load_profile(&self.site)
    }
}
