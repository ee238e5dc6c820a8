// main.rs - Contribution calendar window with pattern triggers

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use calendar_engine::grid::SEEDS;
use calendar_engine::trigger::TriggerPad;
use calendar_engine::{Engine, EngineConfig, EngineEvent, SharedEngine, Ticker};
use eframe::egui;
use egui::Color32;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod data;  // Stand-in contribution counts
mod ui;    // eframe::App impl

use data::ContributionGrid;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let app = CalendarApp::new(EngineConfig::default())?;
    info!("calendar_view starting");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 360.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Contribution Calendar",
        options,
        Box::new(|_cc| Box::new(app)),
    )?;
    Ok(())
}

pub struct CalendarApp {
    engine: SharedEngine,
    pad: TriggerPad,
    data: ContributionGrid,

    /// Set on `Started`, cleared on `Stopped`; decides which grid is drawn.
    /// Grid edits made from the controls also set it, so they are visible.
    show_simulation: Arc<AtomicBool>,
    pub selected_seed: usize,

    pub live_color: Color32,
    pub dead_color: Color32,

    ticker: Option<Ticker>,
    runtime: tokio::runtime::Runtime,
}

impl CalendarApp {
    fn new(config: EngineConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let rows = config.rows;
        let cols = config.cols;
        let engine = SharedEngine::new(Engine::new(config)?);

        let show_simulation = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&show_simulation);
        engine.subscribe(move |event: &EngineEvent| match event {
            EngineEvent::Started { .. } => flag.store(true, Ordering::Release),
            EngineEvent::Stopped { .. } => flag.store(false, Ordering::Release),
            EngineEvent::PatternChanged { .. } => {}
        });

        let runtime = tokio::runtime::Runtime::new()?;
        let ticker = Ticker::spawn(engine.clone(), runtime.handle());

        Ok(Self {
            engine,
            pad: TriggerPad::default(),
            data: ContributionGrid::synthetic(rows, cols, &mut rand::thread_rng()),
            show_simulation,
            selected_seed: 0,
            live_color: Color32::from_rgb(57, 211, 83),
            dead_color: Color32::from_rgb(22, 27, 34),
            ticker: Some(ticker),
            runtime,
        })
    }

    fn showing_simulation(&self) -> bool {
        self.show_simulation.load(Ordering::Acquire)
    }

    fn show_engine_grid(&self, visible: bool) {
        self.show_simulation.store(visible, Ordering::Release);
    }

    /// Clear the engine grid and show it. Halts a running animation, which
    /// fires no `Stopped`, so the view switches here instead.
    fn reset_grid(&self) {
        self.engine.reset();
        self.show_engine_grid(true);
    }

    fn randomize_grid(&self) {
        self.engine.randomize();
        self.show_engine_grid(true);
    }

    /// Stamp the selected seed onto the engine grid and show it.
    fn apply_selected_seed(&self) {
        if let Some(seed) = SEEDS.get(self.selected_seed) {
            self.engine.with(|engine| engine.seed(seed));
            self.show_engine_grid(true);
        }
    }

    /// Back to the contribution data; ignored while an animation runs.
    fn show_calendar(&self) {
        if !self.engine.is_running() {
            self.show_engine_grid(false);
        }
    }

    /// Respawn the ticker if its task died.
    fn ensure_ticker(&mut self) {
        if self.ticker.as_ref().is_some_and(Ticker::is_finished) {
            warn!("Ticker task ended, respawning");
            self.ticker = Some(Ticker::spawn(self.engine.clone(), self.runtime.handle()));
        }
    }
}

impl Drop for CalendarApp {
    fn drop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.shutdown();
        }
    }
}
