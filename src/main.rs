//! bess-sizer entry point: CLI wiring around the sizing engine.

use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgGroup, Parser, ValueEnum};

use bess_sizer::catalog::Catalog;
use bess_sizer::config::SiteConfig;
use bess_sizer::io::export::export_csv;
use bess_sizer::logging::init_tracing;
use bess_sizer::report::{ProposalReport, load_profile};
use bess_sizer::sizing::{Scenario, SizingEngine};

/// Output format for the sizing result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Result summary followed by the client proposal.
    Text,
    /// Site, result, proposal, and load profile as one JSON document.
    Json,
}

#[derive(Parser)]
#[command(
    name = "bess-sizer",
    version,
    about = "Size a battery energy storage system for a construction site"
)]
#[command(group(ArgGroup::new("input").args(["site", "preset"])))]
struct Cli {
    /// Path to a TOML site file.
    #[arg(long)]
    site: Option<PathBuf>,

    /// Built-in site: grid_augmentation, peak_shaving, power_stability, generator_hybrid.
    #[arg(long)]
    preset: Option<String>,

    /// Override the site's scenario (key or letter code A-D).
    #[arg(long)]
    scenario: Option<Scenario>,

    /// Path to a TOML catalog replacing the standard models.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Write the load profile to CSV.
    #[arg(long)]
    profile_out: Option<PathBuf>,

    /// Print the catalog tables and exit.
    #[arg(long, default_value_t = false)]
    list_catalog: bool,

    /// Log at info level unless BESS_LOG says otherwise.
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    /// Start the REST API server instead of sizing once.
    #[cfg(feature = "api")]
    #[arg(
        long,
        default_value_t = false,
        conflicts_with_all = ["site", "preset", "scenario", "format", "profile_out"]
    )]
    serve: bool,

    /// API server port.
    #[cfg(feature = "api")]
    #[arg(long, default_value_t = 3000)]
    port: u16,

    /// Open the interactive editor on the selected site.
    #[cfg(feature = "tui")]
    #[arg(long, default_value_t = false, conflicts_with_all = ["format", "profile_out"])]
    tui: bool,
}

fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("{msg}");
    process::exit(1);
}

fn load_engine(catalog: Option<&Path>) -> SizingEngine {
    match catalog {
        Some(path) => match Catalog::from_toml_file(path) {
            Ok(cat) => SizingEngine::with_catalog(cat),
            Err(e) => fail(e),
        },
        None => SizingEngine::new(),
    }
}

/// Resolves the site from `--site`, `--preset` or the default, applies
/// `--scenario`, and exits on validation errors.
fn load_site(cli: &Cli) -> SiteConfig {
    let loaded = if let Some(ref path) = cli.site {
        SiteConfig::from_toml_file(path)
    } else if let Some(ref name) = cli.preset {
        SiteConfig::from_preset(name)
    } else {
        Ok(SiteConfig::grid_augmentation())
    };
    let mut cfg = loaded.unwrap_or_else(|e| fail(e));
    if let Some(scenario) = cli.scenario {
        cfg.site.scenario = scenario;
    }

    let errors = cfg.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }
    cfg
}

/// Header label for the site: the file path or preset name.
#[cfg(feature = "tui")]
fn site_title(cli: &Cli) -> String {
    match (&cli.site, &cli.preset) {
        (Some(path), _) => path.display().to_string(),
        (None, Some(name)) => name.clone(),
        (None, None) => "grid_augmentation".to_string(),
    }
}

fn print_catalog(engine: &SizingEngine) {
    println!("--- BESS Models ---");
    for m in engine.catalog().models() {
        println!(
            "{:<12} {:<24} {:>6} kW {:>7} kWh  surge {:>5} kW  {}C  {} t  {}",
            m.id, m.name, m.power_kw, m.energy_kwh, m.surge_kw, m.c_rate, m.weight_t, m.dims
        );
    }
    println!("\n--- Scenarios ---");
    for s in &bess_sizer::catalog::SCENARIOS {
        println!("{} {:<18} {}", s.scenario.code(), s.scenario.key(), s.label);
    }
    println!("\n--- Starter Types ---");
    for s in &bess_sizer::catalog::STARTER_TYPES {
        println!("{:<16} x{}", s.label, s.multiplier);
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(if cli.verbose { "info" } else { "warn" });

    let engine = load_engine(cli.catalog.as_deref());

    if cli.list_catalog {
        print_catalog(&engine);
        return;
    }

    #[cfg(feature = "tui")]
    if cli.tui {
        use bess_sizer::tui::runtime::App;

        let cfg = load_site(&cli);
        let preset_idx = cli
            .preset
            .as_deref()
            .and_then(|name| SiteConfig::PRESETS.iter().position(|p| *p == name))
            .unwrap_or_default();
        let app = App::with_config(cfg, site_title(&cli), preset_idx, engine);
        if let Err(e) = bess_sizer::tui::run(app) {
            fail(format!("error: TUI crashed: {e}"));
        }
        return;
    }

    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(bess_sizer::api::AppState { engine });
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new()
            .unwrap_or_else(|e| fail(format!("error: failed to create tokio runtime: {e}")));
        if let Err(e) = rt.block_on(bess_sizer::api::serve(state, addr)) {
            fail(format!("error: API server failed: {e}"));
        }
        return;
    }

    let cfg = load_site(&cli);
    let site = cfg.to_site_input();
    let result = engine.compute(&site);
    let profile = load_profile(&site);
    let proposal = ProposalReport::new(&site, &result);

    match cli.format {
        Format::Text => {
            println!("{result}");
            println!("\n{proposal}");
        }
        Format::Json => {
            let doc = serde_json::json!({
                "site": site,
                "result": result,
                "proposal": proposal.to_string(),
                "profile": profile,
            });
            match serde_json::to_string_pretty(&doc) {
                Ok(s) => println!("{s}"),
                Err(e) => fail(format!("error: failed to encode JSON: {e}")),
            }
        }
    }

    if let Some(ref path) = cli.profile_out {
        if let Err(e) = export_csv(&profile, result.effective_grid_limit_kw, path) {
            fail(format!("error: failed to write CSV: {e}"));
        }
        tracing::info!(path = %path.display(), "load profile written");
    }
}
