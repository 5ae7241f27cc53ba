//! Interactive axis leaf geometry viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns an [`AxisConfig`] and the
//! [`AxisLayout`] computed from it, and implements [`eframe::App`] to draw
//! the stem, ligules and leaves and to edit the parameters.

use axis_core::{AxisConfig, AxisLayout, InvalidParameter, ParameterRanges, sample_config};
use eframe::App;
use glam::Vec2;
use rand::rng;

/// Fraction of the axis height used for the longest drawn leaf.
const LEAF_SPAN: f32 = 0.35;

/// Main application state for the viewer.
///
/// [`Viewer`] glues together:
/// - The distribution core: an [`AxisConfig`] and its [`AxisLayout`].
/// - UI state (pan/zoom, pending fit request).
/// - eframe/egui callbacks for drawing and editing.
///
/// The layout is recomputed whenever a parameter changes; an invalid
/// parameter set keeps the [`InvalidParameter`] for display instead.
///
/// ### Fields
/// - `cfg` - Parameters currently being edited.
/// - `layout` - Result of running both distributions on `cfg`.
/// - `ranges` - Bounds used by the Randomize button.
/// - `rng` - Random number generator used for sampling configs.
/// - `zoom` - Zoom factor for world-to-screen coordinate mapping.
/// - `pan` - Screen-space pan offset in pixels.
/// - `fit_requested` - Refit the view to the axis on the next frame.
pub struct Viewer {
    cfg: AxisConfig,
    layout: Result<AxisLayout, InvalidParameter>,
    ranges: ParameterRanges,

    rng: rand::rngs::ThreadRng,

    zoom: f32,
    pan: egui::Vec2,
    fit_requested: bool,
}

impl Viewer {
    /// Creates a viewer showing `cfg`.
    ///
    /// The view is fitted to the axis on the first frame.
    pub fn new(cfg: AxisConfig) -> Self {
        let layout = AxisLayout::from_config(&cfg);
        Self {
            cfg,
            layout,
            ranges: ParameterRanges::default(),
            rng: rng(),
            zoom: 2.0,
            pan: egui::vec2(0.0, 0.0),
            fit_requested: true,
        }
    }

    /// Reruns both distributions on the current config.
    fn recompute(&mut self) {
        self.layout = AxisLayout::from_config(&self.cfg);
        if let Err(err) = &self.layout {
            tracing::debug!(%err, "config rejected");
        }
    }

    /// Restores the default config and refits the view.
    fn reset(&mut self) {
        self.cfg = AxisConfig::default();
        self.recompute();
        self.fit_requested = true;
    }

    /// Replaces the config with one drawn from `ranges`.
    fn randomize(&mut self) {
        match sample_config(&self.ranges, &mut self.rng) {
            Ok(cfg) => {
                tracing::info!(?cfg, "sampled axis config");
                self.cfg = cfg;
                self.recompute();
                self.fit_requested = true;
            }
            Err(err) => tracing::warn!(%err, "cannot sample from current ranges"),
        }
    }

    /// Converts a world-space position to screen-space.
    ///
    /// World coordinates are scaled by `zoom`, offset by `pan`, and then
    /// centered inside the given `rect`. The y-axis is flipped so that
    /// positive y goes up the stem.
    fn world_to_screen(&self, p: Vec2, rect: egui::Rect) -> egui::Pos2 {
        let center = rect.center();
        egui::pos2(
            center.x + p.x * self.zoom + self.pan.x,
            center.y - p.y * self.zoom + self.pan.y,
        )
    }

    /// Inverse of [`Viewer::world_to_screen`].
    fn screen_to_world(&self, p: egui::Pos2, rect: egui::Rect) -> Vec2 {
        let center = rect.center();
        let x = (p.x - center.x - self.pan.x) / self.zoom;
        let y = (center.y - p.y + self.pan.y) / self.zoom;
        Vec2::new(x, y)
    }

    /// Zooms so the whole axis fills most of `rect`, base near the bottom.
    fn fit_view(&mut self, rect: egui::Rect) {
        let top = match &self.layout {
            Ok(layout) => layout.top_height() as f32,
            Err(_) => self.cfg.height as f32,
        };
        if top > 0.0 && top.is_finite() {
            self.zoom = (0.8 * rect.height() / top).clamp(0.01, 100.0);
        }
        self.pan = egui::vec2(0.0, 0.4 * rect.height());
    }

    /// World-space segments for every leaf, lowest leaf first.
    ///
    /// Each leaf starts at its ligule on the stem and points left or right
    /// alternately, with a length proportional to its share of the largest
    /// leaf's area.
    fn leaf_segments(&self) -> Vec<(Vec2, Vec2)> {
        let Ok(layout) = &self.layout else {
            return Vec::new();
        };
        let Some(largest) = layout.largest_leaf() else {
            return Vec::new();
        };

        let span = LEAF_SPAN * layout.top_height() as f32;
        layout
            .phytomers()
            .iter()
            .map(|p| {
                let side = if p.rank % 2 == 1 { -1.0 } else { 1.0 };
                let len = span * (p.leaf_area / largest.leaf_area) as f32;
                let base = Vec2::new(0.0, p.ligule_height as f32);
                (base, base + Vec2::new(side * len, 0.15 * len))
            })
            .collect()
    }

    /// Helper to draw a labeled `usize` [`egui::DragValue`].
    fn labeled_drag_usize(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut usize,
        range: std::ops::RangeInclusive<usize>,
        speed: f64,
    ) -> bool {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed))
                .changed()
        })
        .inner
    }

    /// Helper to draw a labeled `f64` [`egui::DragValue`].
    fn labeled_drag_f64(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut f64,
        range: std::ops::RangeInclusive<f64>,
        speed: f64,
    ) -> bool {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed))
                .changed()
        })
        .inner
    }

    /// Builds the top panel UI (randomize, reset, fit, zoom).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("🎲 Randomize").clicked() {
                    self.randomize();
                }

                if ui.button("Reset").clicked() {
                    self.reset();
                }

                if ui.button("Fit").clicked() {
                    self.fit_requested = true;
                }

                ui.separator();
                ui.add(egui::Slider::new(&mut self.zoom, 0.01..=100.0).text("Zoom"));
            });
        });
    }

    /// Builds the bottom status bar (leaf count, total area, errors).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                match &self.layout {
                    Ok(layout) => {
                        ui.label(format!("total area = {:.1}", layout.total_leaf_area()));
                        ui.label(format!("top ligule = {:.1}", layout.top_height()));
                        if let Some(p) = layout.largest_leaf() {
                            ui.label(format!("largest leaf = #{}", p.rank));
                        }
                        ui.label(format!("leaves = {}", layout.len()));
                    }
                    Err(err) => {
                        ui.colored_label(egui::Color32::LIGHT_RED, err.to_string());
                    }
                }
            });
        });
    }

    /// Builds the right-hand panel for axis parameters.
    fn ui_config_panel(&mut self, ctx: &egui::Context) {
        let mut changed = false;

        egui::SidePanel::right("config_panel")
            .resizable(true)
            .default_width(240.0)
            .show(ctx, |ui| {
                ui.heading("Axis");

                ui.separator();
                ui.label("Stem");
                changed |=
                    Self::labeled_drag_f64(ui, "height:", &mut self.cfg.height, 0.0..=1000.0, 1.0);
                changed |= Self::labeled_drag_usize(
                    ui,
                    "phytomer_count:",
                    &mut self.cfg.phytomer_count,
                    0..=60,
                    0.2,
                );
                changed |=
                    Self::labeled_drag_f64(ui, "stem_q:", &mut self.cfg.stem_q, 0.0..=3.0, 0.01);
                changed |= Self::labeled_drag_f64(
                    ui,
                    "pseudostem_height:",
                    &mut self.cfg.pseudostem_height,
                    0.0..=1000.0,
                    0.5,
                );
                changed |= ui
                    .checkbox(
                        &mut self.cfg.apply_pseudostem_offset,
                        "lift ligules above pseudostem",
                    )
                    .changed();

                ui.separator();
                ui.label("Leaves");
                changed |= Self::labeled_drag_f64(
                    ui,
                    "leaf_area:",
                    &mut self.cfg.leaf_area,
                    0.0..=50_000.0,
                    10.0,
                );
                changed |=
                    Self::labeled_drag_f64(ui, "rmax:", &mut self.cfg.rmax, 0.0..=1.0, 0.005);
                changed |=
                    Self::labeled_drag_f64(ui, "skew:", &mut self.cfg.skew, 0.0..=1.0, 0.0001);

                ui.separator();
                if let Ok(layout) = &self.layout {
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        egui::Grid::new("phytomer_table").striped(true).show(ui, |ui| {
                            ui.label("#");
                            ui.label("ligule");
                            ui.label("area");
                            ui.end_row();
                            for p in layout.phytomers() {
                                ui.label(p.rank.to_string());
                                ui.label(format!("{:.1}", p.ligule_height));
                                ui.label(format!("{:.1}", p.leaf_area));
                                ui.end_row();
                            }
                        });
                    });
                }
            });

        if changed {
            self.recompute();
        }
    }

    /// Builds the central panel where the axis is drawn.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::click_and_drag());
            let rect = response.rect;
            let painter = ui.painter_at(rect);

            if self.fit_requested {
                self.fit_view(rect);
                self.fit_requested = false;
            }

            // Pan with drag.
            if response.dragged() {
                self.pan += response.drag_delta();
            }

            // Zoom around the mouse cursor.
            let scroll = ui.ctx().input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0 {
                let pointer_screen = response.hover_pos().unwrap_or(rect.center());
                let world_before = self.screen_to_world(pointer_screen, rect);

                let factor = (1.0 + scroll * 0.001).clamp(0.5, 2.0);
                self.zoom = (self.zoom * factor).clamp(0.01, 100.0);

                let screen_after = self.world_to_screen(world_before, rect);
                self.pan += pointer_screen - screen_after;
            }

            let Ok(layout) = &self.layout else {
                return;
            };

            // Ground line.
            let ground_a = self.world_to_screen(Vec2::new(-1000.0, 0.0), rect);
            let ground_b = self.world_to_screen(Vec2::new(1000.0, 0.0), rect);
            painter.line_segment(
                [ground_a, ground_b],
                egui::Stroke::new(1.0, egui::Color32::GRAY),
            );

            // Pseudostem, drawn thicker.
            if self.cfg.pseudostem_height > 0.0 {
                let pseudostem_top = Vec2::new(0.0, self.cfg.pseudostem_height as f32);
                let a = self.world_to_screen(Vec2::ZERO, rect);
                let b = self.world_to_screen(pseudostem_top, rect);
                painter.line_segment([a, b], egui::Stroke::new(4.0, egui::Color32::DARK_GREEN));
            }

            // Stem.
            let base = self.world_to_screen(Vec2::ZERO, rect);
            let top = self.world_to_screen(Vec2::new(0.0, layout.top_height() as f32), rect);
            painter.line_segment(
                [base, top],
                egui::Stroke::new(2.0, egui::Color32::LIGHT_GREEN),
            );

            // Leaves, with the largest one highlighted.
            let largest_rank = layout.largest_leaf().map(|p| p.rank);
            for ((a, b), p) in self.leaf_segments().into_iter().zip(layout.phytomers()) {
                let color = if Some(p.rank) == largest_rank {
                    egui::Color32::YELLOW
                } else {
                    egui::Color32::GREEN
                };
                let sa = self.world_to_screen(a, rect);
                let sb = self.world_to_screen(b, rect);
                painter.line_segment([sa, sb], egui::Stroke::new(2.0, color));
                painter.circle_filled(sa, 2.5, egui::Color32::LIGHT_BLUE);
            }
        });
    }
}

impl App for Viewer {
    /// eframe callback that builds all UI panels for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_config_panel(ctx);
        self.ui_central_panel(ctx);
    }
}
