use crate::board::{file_label, Board};
use crate::export;
use crate::settings::{Settings, MAX_STEP_INTERVAL_MS, MIN_STEP_INTERVAL_MS};
use crate::solver::{HillClimber, SearchState, Signal};
use crate::theme::Theme;
use eframe::egui;
use std::time::Duration;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;
#[cfg(target_arch = "wasm32")]
use web_time::Instant;

/// Step cap for the fast-forward button; plateau shuffles may never converge.
pub const FAST_FORWARD_LIMIT: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Start,
    Step,
    FastForward,
    Reset,
    Export,
}

pub struct HillClimbApp {
    solver: HillClimber,
    /// Seed the current solver was built with.
    solver_seed: Option<u64>,
    settings: Settings,
    theme: Theme,
    paused: bool,
    last_step: Instant,
    status: String,
    result: Option<String>,
}

impl HillClimbApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings = Settings::load(cc.storage);
        let app = Self::with_settings(settings);
        app.apply_style(&cc.egui_ctx);
        app
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            solver: HillClimber::from_board(Board::initial(), settings.seed),
            solver_seed: settings.seed,
            theme: Theme::named(&settings.theme),
            settings,
            paused: false,
            last_step: Instant::now(),
            status: String::new(),
            result: None,
        }
    }

    fn apply_style(&self, ctx: &egui::Context) {
        ctx.set_visuals(self.theme.visuals());
    }

    fn step_interval(&self) -> Duration {
        Duration::from_millis(self.settings.step_interval_ms)
    }

    fn run(&mut self, command: Command) {
        match command {
            Command::Start => {
                self.solver.start();
                self.paused = false;
                self.last_step = Instant::now();
                self.status.clear();
            }
            Command::Step => {
                self.solver.start();
                self.paused = true;
                let step = self.solver.step();
                if step.signal == Signal::Stop {
                    self.finish();
                }
            }
            Command::FastForward => {
                match self.solver.run(FAST_FORWARD_LIMIT) {
                    Some(_) => self.finish(),
                    None => {
                        self.paused = true;
                        self.status = format!("No solution within {} steps", FAST_FORWARD_LIMIT);
                    }
                }
            }
            Command::Reset => {
                if self.settings.seed != self.solver_seed {
                    self.solver = HillClimber::from_board(Board::initial(), self.settings.seed);
                    self.solver_seed = self.settings.seed;
                } else {
                    self.solver.reset();
                }
                self.paused = false;
                self.status.clear();
                self.result = None;
            }
            Command::Export => self.export(),
        }
    }

    fn finish(&mut self) {
        let message = self.solver.result_message();
        log::info!("{}", message);
        self.result = Some(message);
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn export(&mut self) {
        let n = self.solver.board().size();
        match export::save_with_dialog(self.solver.trace(), n) {
            Ok(Some(path)) => self.status = format!("Saved {}", path.display()),
            Ok(None) => {}
            Err(e) => {
                log::error!("trace export failed: {}", e);
                self.status = format!("Export failed: {}", e);
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn export(&mut self) {
        let n = self.solver.board().size();
        if let Err(e) = export::download(self.solver.trace(), n) {
            log::error!("trace export failed: {}", e);
            self.status = format!("Export failed: {}", e);
        }
    }

    /// Pumps the solver once per interval while a search is running.
    fn tick(&mut self, ctx: &egui::Context) {
        if self.solver.state() != SearchState::Searching || self.paused {
            return;
        }
        let interval = self.step_interval();
        let elapsed = self.last_step.elapsed();
        if elapsed >= interval {
            self.last_step = Instant::now();
            if self.solver.step().signal == Signal::Stop {
                self.finish();
                return;
            }
            ctx.request_repaint_after(interval);
        } else {
            ctx.request_repaint_after(interval - elapsed);
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) -> Option<Command> {
        let mut command = None;
        let searching = self.solver.state() == SearchState::Searching;

        ui.vertical_centered(|ui| {
            ui.add_space(8.0);
            ui.label(
                egui::RichText::new("♛ Five Queens")
                    .size(24.0)
                    .strong()
                    .color(self.theme.text_color),
            );
            ui.label("Hill climbing with random restarts");
        });
        ui.add_space(16.0);

        ui.label(egui::RichText::new("Search").strong().color(self.theme.text_color));
        ui.separator();
        ui.horizontal_wrapped(|ui| {
            let btn_size = egui::vec2(64.0, 36.0);
            let can_start = !searching || self.paused;
            if ui
                .add_enabled(can_start, egui::Button::new("▶ Start").min_size(btn_size))
                .clicked()
            {
                command = Some(Command::Start);
            }
            if ui.add(egui::Button::new("|▶ Step").min_size(btn_size)).clicked() {
                command = Some(Command::Step);
            }
            if ui.add(egui::Button::new("⏩ Solve").min_size(btn_size)).clicked() {
                command = Some(Command::FastForward);
            }
            if ui.add(egui::Button::new("⟲ Reset").min_size(btn_size)).clicked() {
                command = Some(Command::Reset);
            }
        });

        ui.add_space(10.0);
        ui.label("Step interval");
        ui.add(
            egui::Slider::new(
                &mut self.settings.step_interval_ms,
                MIN_STEP_INTERVAL_MS..=MAX_STEP_INTERVAL_MS,
            )
            .suffix(" ms"),
        );

        ui.add_space(10.0);
        ui.checkbox(&mut self.settings.show_threats, "Show Threatened Squares");

        ui.horizontal(|ui| {
            let mut fixed = self.settings.seed.is_some();
            if ui.checkbox(&mut fixed, "Fixed seed").changed() {
                self.settings.seed = fixed.then_some(0);
            }
            if let Some(seed) = self.settings.seed.as_mut() {
                ui.add(egui::DragValue::new(seed));
            }
        });
        if self.settings.seed != self.solver_seed {
            ui.label(egui::RichText::new("Seed applies on reset").small().weak());
        }

        ui.add_space(10.0);
        ui.label("Theme:");
        let before = self.settings.theme.clone();
        egui::ComboBox::from_id_salt("theme_picker")
            .selected_text(self.settings.theme.as_str())
            .show_ui(ui, |ui| {
                for preset in Theme::presets() {
                    ui.selectable_value(&mut self.settings.theme, preset.name.to_owned(), preset.name);
                }
            });
        if self.settings.theme != before {
            self.theme = Theme::named(&self.settings.theme);
            self.apply_style(ui.ctx());
        }

        ui.add_space(20.0);
        let state = match self.solver.state() {
            SearchState::Idle => "Idle",
            SearchState::Searching if self.paused => "Paused",
            SearchState::Searching => "Searching",
            SearchState::Solved => "Solved",
        };
        ui.label(
            egui::RichText::new(format!("{} · {} threats", state, self.solver.score()))
                .strong()
                .size(16.0),
        );
        ui.label(format!("Steps: {}", self.solver.trace().len()));
        ui.label(format!("Solutions: {}", self.solver.solutions()));
        ui.label(egui::RichText::new(self.solver.board().to_string()).monospace());
        if !self.status.is_empty() {
            ui.label(egui::RichText::new(&self.status).color(self.theme.accent_color));
        }

        ui.add_space(10.0);
        if ui
            .add_enabled(!self.solver.trace().is_empty(), egui::Button::new("Export to CSV"))
            .clicked()
        {
            command = Some(Command::Export);
        }

        ui.add_space(10.0);
        ui.label(egui::RichText::new("Trace").strong().color(self.theme.text_color));
        ui.separator();
        egui::ScrollArea::vertical()
            .max_height(240.0)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                for entry in self.solver.trace() {
                    ui.label(
                        egui::RichText::new(format!(
                            "#{} {} [{}] {}",
                            entry.step,
                            entry.kind.label(),
                            entry.board,
                            entry.score
                        ))
                        .monospace()
                        .size(12.0),
                    );
                }
            });

        command
    }

    fn draw_board(&self, ui: &mut egui::Ui) {
        let board = self.solver.board();
        let n = board.size();
        let available_rect = ui.available_rect_before_wrap();
        let margin = 60.0;
        let size = (available_rect.height() - margin)
            .min(available_rect.width() - margin)
            .max(0.0);
        let board_rect = egui::Rect::from_center_size(available_rect.center(), egui::vec2(size, size));
        let cell_size = size / n as f32;
        let painter = ui.painter();

        painter.rect_filled(board_rect.expand(5.0), 5.0, self.theme.text_color.linear_multiply(0.2));

        for row in 0..n {
            for col in 0..n {
                let min = board_rect.min + egui::vec2(col as f32 * cell_size, row as f32 * cell_size);
                let cell_rect = egui::Rect::from_min_size(min, egui::vec2(cell_size, cell_size));
                let color = if (row + col) % 2 == 0 {
                    self.theme.board_light
                } else {
                    self.theme.board_dark
                };
                painter.rect_filled(cell_rect, 0.0, color);

                if self.settings.show_threats && board.is_threatened(row, col) {
                    painter.rect_filled(cell_rect.shrink(2.0), 2.0, self.theme.threat_color);
                }

                if board.column(row) == col {
                    painter.text(
                        cell_rect.center(),
                        egui::Align2::CENTER_CENTER,
                        "♛",
                        egui::FontId::proportional(cell_size * 0.7),
                        self.theme.queen_color,
                    );
                }
            }
        }

        let font_id = egui::FontId::proportional((cell_size * 0.15).max(10.0));
        for i in 0..n {
            let file = file_label(i);
            let x = board_rect.min.x + i as f32 * cell_size + cell_size / 2.0;
            painter.text(
                egui::pos2(x, board_rect.max.y + 10.0),
                egui::Align2::CENTER_TOP,
                file,
                font_id.clone(),
                self.theme.text_color,
            );

            let y = board_rect.min.y + i as f32 * cell_size + cell_size / 2.0;
            painter.text(
                egui::pos2(board_rect.min.x - 10.0, y),
                egui::Align2::RIGHT_CENTER,
                (i + 1).to_string(),
                font_id.clone(),
                self.theme.text_color,
            );
        }
    }

    fn result_window(&mut self, ctx: &egui::Context) {
        let Some(message) = self.result.clone() else {
            return;
        };
        let mut close = false;
        egui::Window::new("Result")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(egui::RichText::new(message).size(18.0));
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    if ui.button("OK").clicked() {
                        close = true;
                    }
                });
            });
        if close {
            self.result = None;
        }
    }
}

impl eframe::App for HillClimbApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.tick(ctx);

        let panel_frame = egui::Frame::none()
            .fill(self.theme.panel_background)
            .inner_margin(12.0)
            .rounding(10.0)
            .stroke(egui::Stroke::new(1.0, egui::Color32::from_white_alpha(20)));

        let command = egui::SidePanel::right("controls")
            .frame(panel_frame)
            .min_width(300.0)
            .resizable(true)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .show(ui, |ui| self.controls(ui))
                    .inner
            })
            .inner;

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(self.theme.background))
            .show(ctx, |ui| self.draw_board(ui));

        self.result_window(ctx);

        if let Some(command) = command {
            log::debug!("command {:?}", command);
            self.run(command);
            ctx.request_repaint();
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.settings.save(storage);
    }
}
