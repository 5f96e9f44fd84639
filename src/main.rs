// LeadDesk - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Config loading and logging initialisation (debug mode support)
// 3. Dataset loading (file, data-dir default, or built-in demo)
// 4. Either a plain-text report (--print) or the eframe GUI launch

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod gui;

// Re-export modules from the library crate so that `gui.rs` and other
// binary-side code can still use `crate::app::...`, `crate::core::...` etc.
pub use leaddesk::app;

pub use leaddesk::core;
pub use leaddesk::platform;
pub use leaddesk::ui;
pub use leaddesk::util;

use crate::app::dataset_mgr::load_startup_dataset;
use crate::app::report::{self, ReportView};
use crate::app::session;
use crate::app::state::{DeskSettings, DeskState, Tab};
use crate::core::call_queue::CallPolicy;
use crate::core::clock::Clock;
use crate::core::filter::{SortDirection, SortKey, SortState};
use crate::core::model::{LeadScore, PipelineStage};
use crate::platform::config::{AppConfig, PlatformPaths};
use crate::util::error::LeadDeskError;
use chrono::{DateTime, Utc};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;

/// `all`, or one specific value, for the --stage and --score flags.
#[derive(Debug, Clone, Copy)]
enum Choice<T> {
    All,
    Only(T),
}

impl<T: FromStr<Err = String>> FromStr for Choice<T> {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Choice::All)
        } else {
            s.parse().map(Choice::Only)
        }
    }
}

impl<T> Choice<T> {
    fn into_option(self) -> Option<T> {
        match self {
            Choice::All => None,
            Choice::Only(v) => Some(v),
        }
    }
}

/// LeadDesk - lead pipeline and call-queue dashboard for a training centre.
///
/// Opens the GUI on a dataset file (TOML or JSON). Without one, uses
/// dataset.toml in the data directory, or else the built-in demo data.
#[derive(Parser, Debug)]
#[command(name = "LeadDesk", version, about)]
struct Cli {
    /// Dataset file to open (.toml or .json).
    dataset: Option<PathBuf>,

    /// Directory holding config.toml (overrides the platform default).
    #[arg(short = 'c', long = "config-dir")]
    config_dir: Option<PathBuf>,

    /// Pin the current instant (RFC 3339), e.g. 2026-10-18T10:00:00Z.
    #[arg(long)]
    now: Option<DateTime<Utc>>,

    /// Shift the dataset's timestamps so its [meta] anchor lands on "now".
    #[arg(long)]
    rebase: bool,

    /// View to open: dashboard, pipeline, leads, follow-ups, calls, targets, analytics, settings.
    #[arg(long)]
    view: Option<Tab>,

    /// Print a view as text and exit: calls, follow-ups, leads, pipeline, dashboard, analytics, targets.
    #[arg(short = 'p', long = "print", value_name = "VIEW")]
    print: Option<ReportView>,

    /// Lead table search (name, email, phone).
    #[arg(short = 'q', long)]
    query: Option<String>,

    /// Lead table stage filter ("all" or a stage id such as interested).
    #[arg(long)]
    stage: Option<Choice<PipelineStage>>,

    /// Lead table score filter ("all", hot, warm, cold).
    #[arg(long)]
    score: Option<Choice<LeadScore>>,

    /// Lead table sort column: name, created, score, stage.
    #[arg(long)]
    sort: Option<SortKey>,

    /// Sort ascending.
    #[arg(long, conflicts_with = "desc")]
    asc: bool,

    /// Sort descending.
    #[arg(long)]
    desc: bool,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

/// Configure fonts for the egui context.
///
/// The default egui fonts have no glyph for the taka sign (U+09F3), so a
/// system font with Bengali coverage is appended as a fallback when one is
/// installed. Latin text keeps the egui defaults.
fn configure_fonts(ctx: &egui::Context) {
    #[cfg(target_os = "windows")]
    let candidates: &[(&str, &str)] = &[("Nirmala UI", r"C:\Windows\Fonts\Nirmala.ttf")];
    #[cfg(target_os = "macos")]
    let candidates: &[(&str, &str)] = &[(
        "Bangla Sangam MN",
        "/System/Library/Fonts/Supplemental/Bangla Sangam MN.ttc",
    )];
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    let candidates: &[(&str, &str)] = &[
        (
            "Noto Sans Bengali",
            "/usr/share/fonts/truetype/noto/NotoSansBengali-Regular.ttf",
        ),
        (
            "Noto Sans Bengali",
            "/usr/share/fonts/noto/NotoSansBengali-Regular.ttf",
        ),
    ];

    let mut fonts = egui::FontDefinitions::default();
    for (name, path) in candidates {
        match std::fs::read(path) {
            Ok(data) => {
                fonts
                    .font_data
                    .insert((*name).to_owned(), egui::FontData::from_owned(data).into());
                for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
                    if let Some(list) = fonts.families.get_mut(&family) {
                        list.push((*name).to_owned());
                    }
                }
                ctx.set_fonts(fonts);
                tracing::info!(font = name, "Fallback font configured for currency symbol");
                return;
            }
            Err(e) => {
                tracing::debug!(font = name, error = %e, "Fallback font not available");
            }
        }
    }
    tracing::debug!("No Bengali fallback font found; the currency symbol may render as a box");
}

fn desk_settings(config: &AppConfig) -> DeskSettings {
    DeskSettings {
        organisation_name: config.organisation_name.clone(),
        branch: config.branch.clone(),
        currency_symbol: config.currency_symbol.clone(),
        call_policy: CallPolicy {
            stale_contact_hours: config.stale_contact_hours,
        },
        daily_call_target: config.daily_call_target,
        upcoming_window_days: config.upcoming_window_days,
        recent_activity_limit: config.recent_activity_limit,
        trend_weeks: config.trend_weeks,
    }
}

/// Apply view, filter, and sort flags on top of any restored session.
fn apply_cli_overrides(cli: &Cli, state: &mut DeskState) {
    if let Some(view) = cli.view {
        state.active_tab = view;
    }

    let mut filter = state.filter.clone();
    if let Some(ref query) = cli.query {
        filter.query = query.clone();
    }
    if let Some(stage) = cli.stage {
        filter.stage = stage.into_option();
    }
    if let Some(score) = cli.score {
        filter.score = score.into_option();
    }

    if let Some(key) = cli.sort {
        state.sort = SortState {
            key,
            direction: SortDirection::Asc,
        };
    }
    if cli.asc {
        state.sort.direction = SortDirection::Asc;
    } else if cli.desc {
        state.sort.direction = SortDirection::Desc;
    }

    state.set_filter(filter);
}

fn run(cli: Cli) -> Result<(), LeadDeskError> {
    let platform_paths = match cli.config_dir {
        Some(ref dir) => PlatformPaths::rooted_at(dir),
        None => PlatformPaths::resolve(),
    };

    // Config first so its log level can seed the subscriber; its warnings
    // are replayed once logging is live.
    let (config, config_warnings) = platform::config::load_config(&platform_paths.config_dir);
    util::logging::init(
        cli.debug,
        config.log_level.as_deref(),
        config.log_file.as_deref(),
    );
    for warning in &config_warnings {
        tracing::warn!("{}", warning);
    }

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "LeadDesk starting"
    );

    let now = cli.now.unwrap_or_else(Utc::now);
    let fallback = platform_paths.default_dataset_path();
    let (snapshot, source) =
        load_startup_dataset(cli.dataset.as_deref(), Some(&fallback), now, cli.rebase)?;

    let mut state = DeskState::new(snapshot, source.label(), desk_settings(&config), cli.debug);
    state.dark_mode = config.dark_mode;
    state.warnings = config_warnings;

    let session_file = session::session_path(&platform_paths.data_dir);

    // Printed reports depend only on the dataset and flags, never on the
    // last GUI session.
    if let Some(view) = cli.print {
        apply_cli_overrides(&cli, &mut state);
        let clock = Clock::new(now, config.offset_at(now));
        let text = report::render(view, &state, &clock);
        std::io::stdout()
            .write_all(text.as_bytes())
            .map_err(|e| LeadDeskError::Io {
                path: PathBuf::from("<stdout>"),
                operation: "write report",
                source: e,
            })?;
        return Ok(());
    }

    if let Some(saved) = session::load(&session_file) {
        saved.restore_into(&mut state);
    }
    apply_cli_overrides(&cli, &mut state);

    tracing::info!(leads = state.snapshot.leads.len(), "Ready to launch GUI");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "{} v{} - {}",
                util::constants::APP_NAME,
                util::constants::APP_VERSION,
                config.organisation_name
            ))
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([900.0, 560.0]),
        ..Default::default()
    };

    let pinned_now = cli.now;
    let utc_offset = config.utc_offset;
    let result = eframe::run_native(
        util::constants::APP_NAME,
        native_options,
        Box::new(move |cc| {
            configure_fonts(&cc.egui_ctx);
            Ok(Box::new(gui::LeadDeskApp::new(state, pinned_now, utc_offset, session_file)))
        }),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to launch GUI");
        eprintln!("Error: Failed to launch LeadDesk GUI: {e}");
        std::process::exit(1);
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!(error = %e, "Startup failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
