use std::time::{Duration, Instant};

use chrono::{Datelike, Local};
use eframe::{App, Frame, CreationContext, egui};
use egui::{Ui, RichText, Color32, Layout, Align, Sense, Stroke, Pos2};
use egui_extras::{Column, TableBuilder};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use gymflow::config::AppConfig;
use gymflow::history::{History, Metric};
use gymflow::log_store::LogStore;
use gymflow::models::{ExerciseTarget, Program, LOG_HEADER};
use gymflow::session::Session;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            warn!("ignoring config file: {e}");
            AppConfig::default()
        }
    };
    let program = load_program(&config)?;
    let store = LogStore::open(&config.log_path)?;
    info!(log = %store.path().display(), days = program.days.len(), "starting GymFlow");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([960.0, 1080.0]),
        ..Default::default()
    };

    eframe::run_native(
        "GymFlow",
        options,
        Box::new(|cc| Ok(Box::new(WorkoutApp::new(cc, config, program, store)))),
    )?;
    Ok(())
}

fn load_program(config: &AppConfig) -> gymflow::error::Result<Program> {
    if let Some(path) = &config.program_path {
        match Program::load(path) {
            Ok(program) => return Ok(program),
            Err(e) => warn!(path = %path.display(), "falling back to built-in program: {e}"),
        }
    }
    Program::builtin()
}

#[derive(PartialEq, Clone, Copy)]
enum DisplayMode {
    Today,
    History,
}

struct WorkoutApp {
    config: AppConfig,
    program: Program,
    store: LogStore,
    session: Session,
    history: History,
    display_mode: DisplayMode,
    chart_exercise: Option<String>,
    chart_metric: Metric,
}

impl WorkoutApp {
    fn new(cc: &CreationContext, config: AppConfig, program: Program, store: LogStore) -> Self {
        let mut style = (*cc.egui_ctx.style()).clone();
        style.text_styles.insert(
            egui::TextStyle::Body,
            egui::FontId::new(18.0, egui::FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Heading,
            egui::FontId::new(30.0, egui::FontFamily::Proportional),
        );
        cc.egui_ctx.set_style(style);

        let today = program
            .default_day(Local::now().weekday())
            .map(|d| d.day.clone())
            .unwrap_or_default();
        let session = Session::new(&today, &config);
        let history = match store.read_all() {
            Ok(records) => History::new(records),
            Err(e) => {
                warn!("could not read workout history: {e}");
                History::default()
            }
        };

        WorkoutApp {
            config,
            program,
            store,
            session,
            history,
            display_mode: DisplayMode::Today,
            chart_exercise: None,
            chart_metric: Metric::OneRepMax,
        }
    }
}

impl App for WorkoutApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.with_layout(Layout::top_down(Align::Min), |ui| {
                ui.heading(RichText::new("My Training Lab").strong());
                ui.add_space(10.0);

                ui.horizontal(|ui| {
                    if ui.selectable_label(self.display_mode == DisplayMode::Today, "Today").clicked() {
                        self.display_mode = DisplayMode::Today;
                    }
                    if ui.selectable_label(self.display_mode == DisplayMode::History, "Progress History").clicked() {
                        self.display_mode = DisplayMode::History;
                    }
                });
                ui.separator();

                match self.display_mode {
                    DisplayMode::Today => self.show_today_display(ui),
                    DisplayMode::History => self.show_history_display(ui),
                }

                if let Some(status) = &self.session.status {
                    ui.separator();
                    ui.label(RichText::new(status).italics());
                }
            });
        });

        if self.session.rest_timer.is_running(Instant::now()) {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }
}

impl WorkoutApp {
    fn show_today_display(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.label("Training day:");
            for name in self.program.day_names() {
                if ui.selectable_label(self.session.day == name, name).clicked() {
                    self.session.select_day(name);
                }
            }
        });

        let Ok(day) = self.program.day(&self.session.day) else {
            ui.label("No training scheduled for this day.");
            return;
        };

        let (done, planned) = self.session.progress.day_summary(day);
        ui.add_space(5.0);
        ui.add(
            egui::ProgressBar::new(if planned == 0 { 0.0 } else { done as f32 / planned as f32 })
                .text(format!("{done} of {planned} sets done")),
        );
        ui.add_space(5.0);

        show_rest_timer(ui, &mut self.session);
        ui.separator();

        let mut to_log: Option<ExerciseTarget> = None;
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.set_width(ui.available_width());
            for target in &day.exercises {
                egui::CollapsingHeader::new(RichText::new(format!("➔ {}", target.name)).strong())
                    .default_open(true)
                    .show(ui, |ui| {
                        if show_exercise(ui, &mut self.session, target, self.config.weight_step) {
                            to_log = Some(target.clone());
                        }
                    });
            }
        });

        if let Some(target) = to_log {
            match self.session.log_set(&self.store, &target) {
                Ok(record) => self.history.push(record),
                Err(e) => {
                    error!(exercise = %target.name, "could not log set: {e}");
                    self.session.status = Some(format!("Not saved: {e}"));
                }
            }
        }
    }

    fn show_history_display(&mut self, ui: &mut Ui) {
        if self.history.is_empty() {
            ui.label("No logs yet. Go lift something!");
            return;
        }

        ui.label(RichText::new("Recent sets").strong());
        let rows = self.history.recent(self.config.history_rows);
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .columns(Column::auto().at_least(60.0), LOG_HEADER.len() - 1)
            .column(Column::remainder())
            .header(24.0, |mut header| {
                for title in LOG_HEADER {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for record in rows {
                    body.row(22.0, |mut row| {
                        row.col(|ui| {
                            ui.label(record.timestamp.format("%Y-%m-%d %H:%M").to_string());
                        });
                        row.col(|ui| {
                            ui.label(&record.day);
                        });
                        row.col(|ui| {
                            ui.label(&record.exercise);
                        });
                        row.col(|ui| {
                            ui.label(format!("{}", record.weight));
                        });
                        row.col(|ui| {
                            ui.label(format!("{}", record.reps));
                        });
                        row.col(|ui| {
                            ui.label(record.set_number.map(|n| n.to_string()).unwrap_or_default());
                        });
                        row.col(|ui| {
                            ui.label(format!("{}", record.one_rep_max));
                        });
                    });
                }
            });

        ui.add_space(20.0);
        let exercises = self.history.exercises();
        let selected = self
            .chart_exercise
            .clone()
            .filter(|name| exercises.contains(&name.as_str()))
            .unwrap_or_else(|| exercises[0].to_string());

        ui.horizontal(|ui| {
            let mut choice = selected.clone();
            egui::ComboBox::from_label("Exercise")
                .selected_text(choice.as_str())
                .show_ui(ui, |ui| {
                    for name in &exercises {
                        ui.selectable_value(&mut choice, name.to_string(), *name);
                    }
                });
            self.chart_exercise = Some(choice);

            egui::ComboBox::from_label("Chart")
                .selected_text(self.chart_metric.label())
                .show_ui(ui, |ui| {
                    for metric in Metric::ALL {
                        ui.selectable_value(&mut self.chart_metric, metric, metric.label());
                    }
                });
        });

        if let Some(best) = self.history.best_one_rep_max(&selected) {
            ui.label(format!("Best estimated 1RM for {selected}: {best} kg"));
        }
        let series = self.history.series(&selected, self.chart_metric);
        draw_chart(ui, &series);
    }
}

fn show_rest_timer(ui: &mut Ui, session: &mut Session) {
    let now = Instant::now();
    let timer = &mut session.rest_timer;
    ui.horizontal(|ui| {
        if timer.is_running(now) {
            ui.label(
                RichText::new(format!("Rest: {}s", timer.seconds_left(now)))
                    .size(24.0)
                    .color(Color32::LIGHT_BLUE)
                    .strong(),
            );
            ui.add(egui::ProgressBar::new(timer.fraction_elapsed(now)).desired_width(200.0));
            if ui.button("Skip rest").clicked() {
                timer.cancel();
            }
        } else {
            if timer.is_finished(now) {
                ui.label(RichText::new("Rest over, next set!").color(Color32::GREEN).strong());
            }
            if ui.button(format!("Start {}s rest", timer.length().as_secs())).clicked() {
                timer.start(now);
            }
        }
        ui.checkbox(&mut session.start_rest_after_set, "Rest after each set");
    });
}

/// Inputs and log button for one exercise. Returns true when the set should be logged.
fn show_exercise(ui: &mut Ui, session: &mut Session, target: &ExerciseTarget, weight_step: f64) -> bool {
    ui.horizontal(|ui| {
        ui.label(
            RichText::new(format!("{}", target.target_sets))
                .color(Color32::LIGHT_BLUE)
                .strong(),
        );
        ui.label("sets x");
        ui.label(
            RichText::new(format!("{}", target.target_reps))
                .color(Color32::LIGHT_RED)
                .strong(),
        );
        ui.label(format!("reps @ {} kg", target.target_weight));
        if !target.note.is_empty() {
            ui.label(RichText::new(format!("({})", target.note)).weak());
        }
    });

    let counter = *session.progress.counter(&session.day, target);
    let draft = session.draft(target);
    let mut clicked = false;
    ui.horizontal(|ui| {
        ui.label("Weight");
        ui.add(
            egui::DragValue::new(&mut draft.weight)
                .speed(weight_step)
                .range(0.0..=1000.0)
                .suffix(" kg"),
        );
        ui.label("Reps");
        ui.add(egui::DragValue::new(&mut draft.reps).range(0..=100));

        let label = match counter.next_set() {
            Some(n) => format!("Log set {n}"),
            None => "Done".to_string(),
        };
        clicked = ui.add_enabled(!counter.is_complete(), egui::Button::new(label)).clicked();
    });
    ui.add(
        egui::ProgressBar::new(counter.fraction())
            .desired_width(300.0)
            .text(format!("Set {} of {}", counter.completed(), counter.target())),
    );
    clicked
}

fn draw_chart(ui: &mut Ui, points: &[(chrono::NaiveDateTime, f64)]) {
    let size = egui::vec2(ui.available_width(), 260.0);
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let rect = response.rect.shrink(30.0);
    let axis = Stroke::new(1.0, ui.visuals().weak_text_color());
    painter.line_segment([rect.left_bottom(), rect.right_bottom()], axis);
    painter.line_segment([rect.left_bottom(), rect.left_top()], axis);

    if points.is_empty() {
        return;
    }

    let times: Vec<i64> = points.iter().map(|(t, _)| t.and_utc().timestamp()).collect();
    let (t_min, t_max) = (times[0], times[times.len() - 1]);
    let v_max = points.iter().map(|(_, v)| *v).fold(0.0, f64::max);
    let v_top = if v_max > 0.0 { v_max * 1.1 } else { 1.0 };

    let screen: Vec<Pos2> = times
        .iter()
        .zip(points)
        .map(|(t, (_, v))| {
            let x = if t_max > t_min {
                (t - t_min) as f32 / (t_max - t_min) as f32
            } else {
                0.5
            };
            let y = (*v / v_top) as f32;
            Pos2::new(rect.left() + x * rect.width(), rect.bottom() - y * rect.height())
        })
        .collect();

    let color = Color32::LIGHT_BLUE;
    painter.add(egui::Shape::line(screen.clone(), Stroke::new(2.0, color)));
    for p in &screen {
        painter.circle_filled(*p, 3.0, color);
    }

    let font = egui::FontId::proportional(12.0);
    let text_color = ui.visuals().text_color();
    painter.text(
        rect.left_top(),
        egui::Align2::RIGHT_CENTER,
        format!("{v_top:.0}"),
        font.clone(),
        text_color,
    );
    painter.text(
        rect.left_bottom() + egui::vec2(0.0, 4.0),
        egui::Align2::LEFT_TOP,
        points[0].0.format("%Y-%m-%d").to_string(),
        font.clone(),
        text_color,
    );
    painter.text(
        rect.right_bottom() + egui::vec2(0.0, 4.0),
        egui::Align2::RIGHT_TOP,
        points[points.len() - 1].0.format("%Y-%m-%d").to_string(),
        font,
        text_color,
    );
}
