// ui.rs - Draws the calendar and routes trigger clicks to the engine

use std::time::{Duration, Instant};

use calendar_engine::grid::SEEDS;
use calendar_engine::trigger::{TRIGGER_PATTERNS, TriggerAction};
use eframe::egui;
use egui::{Color32, Rect, Stroke, Vec2};
use tracing::debug;

use crate::CalendarApp;
use crate::data::{self, LEVELS};

/// Dark-theme calendar shades, empty day first.
const LEVEL_COLORS: [Color32; LEVELS] = [
    Color32::from_rgb(22, 27, 34),
    Color32::from_rgb(14, 68, 41),
    Color32::from_rgb(0, 109, 50),
    Color32::from_rgb(38, 166, 65),
    Color32::from_rgb(57, 211, 83),
];

impl eframe::App for CalendarApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ensure_ticker();

        let state = self.engine.state();
        let simulating = self.showing_simulation();
        let grid = self.engine.snapshot();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Contribution Calendar");

            // Triggers
            ui.horizontal(|ui| {
                for (index, pattern) in TRIGGER_PATTERNS.iter().enumerate() {
                    let active = state.is_running && state.active_letter == Some(index);
                    let label = format!("{} {}", index + 1, pattern.name());
                    if ui.selectable_label(active, label).clicked() {
                        let action = self.pad.press(index, Instant::now(), &mut self.engine);
                        if action != TriggerAction::Debounced {
                            debug!(index, ?action, "Trigger pressed");
                        }
                    }
                }
            });

            ui.horizontal(|ui| {
                if ui.button("⏹ Reset").clicked() {
                    self.reset_grid();
                }

                if ui.button("🎲 Random").clicked() {
                    self.randomize_grid();
                }

                ui.separator();

                // Seed dropdown
                ui.label("Seed:");
                let selected = SEEDS.get(self.selected_seed).map_or("", |seed| seed.name);
                egui::ComboBox::from_id_source("seed_selector")
                    .selected_text(selected)
                    .show_ui(ui, |ui| {
                        for (i, seed) in SEEDS.iter().enumerate() {
                            ui.selectable_value(&mut self.selected_seed, i, seed.name);
                        }
                    });

                if ui.button("Apply Seed").clicked() {
                    self.apply_selected_seed();
                }

                if ui.add_enabled(!state.is_running, egui::Button::new("📅 Calendar")).clicked() {
                    self.show_calendar();
                }

                ui.separator();

                let status = if state.is_running { "running" } else { "idle" };
                ui.label(format!("Pattern: {}", state.current_pattern));
                ui.label(format!("Generation: {}", state.generation));
                ui.label(status);
            });

            ui.separator();

            // Draw the grid
            let box_size = 13.0;
            let spacing = 3.0;
            let (rows, cols) = grid.dimensions();

            let start_pos = ui.cursor().min;
            let total_size = Vec2::new(
                (box_size + spacing) * cols as f32 - spacing,
                (box_size + spacing) * rows as f32 - spacing,
            );

            let (_response, painter) = ui.allocate_painter(total_size, egui::Sense::hover());

            painter.rect_filled(
                Rect::from_min_size(start_pos, total_size),
                0.0,
                Color32::from_rgb(13, 17, 23),
            );

            // Weeks run left to right, weekdays top to bottom
            for row in 0..rows {
                for col in 0..cols {
                    let x = start_pos.x + col as f32 * (box_size + spacing);
                    let y = start_pos.y + row as f32 * (box_size + spacing);

                    let rect = Rect::from_min_size(
                        egui::pos2(x, y),
                        Vec2::splat(box_size),
                    );

                    let cell_color = if simulating {
                        if grid.is_live(row, col) { self.live_color } else { self.dead_color }
                    } else {
                        LEVEL_COLORS[data::level(self.data.count(row, col))]
                    };

                    painter.rect_filled(rect, 2.0, cell_color);
                    painter.rect_stroke(rect, 2.0, Stroke::new(0.5, Color32::from_gray(40)));
                }
            }

            ui.separator();

            ui.horizontal(|ui| {
                if simulating {
                    ui.label(format!("Live cells: {}", grid.live_count()));
                } else {
                    ui.label(format!("Contributions: {}", self.data.total()));
                    ui.label(format!("Active days: {}", self.data.active_days()));
                }
            });
        });

        // Keep frames coming while the ticker is stepping
        if state.is_running {
            ctx.request_repaint_after(Duration::from_millis(16));
        }
    }
}
