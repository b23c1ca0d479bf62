//! Interactive plant growth viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns a small collection of
//! plants plus the random source and configuration that shape them, and
//! implements [`eframe::App`] to drive them with a day slider and care
//! actions while painting the primitive stream of each plant.

use eframe::App;
use glam::Vec2;
use grow_core::{
    GrowthConfig, Plant,
    draw::Primitive,
    persist,
    render::plant_primitives,
    types::{Days, Rgb},
};
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::console::Console;

/// Horizontal world distance between neighbouring plants.
const PLANT_SPACING: f32 = 160.0;

/// Start-up state handed to [`Viewer::new`].
///
/// ### Fields
/// - `cfg` - Growth constants for every plant.
/// - `seed` - Seed of the viewer's random source.
/// - `plants` - Initial plants, drawn left to right.
/// - `file_path` - Initial target of the save and load buttons.
/// - `console` - Console shared with the installed logger.
pub struct ViewerSettings {
    pub cfg: GrowthConfig,
    pub seed: u64,
    pub plants: Vec<Plant>,
    pub file_path: String,
    pub console: Console,
}

/// Main application state for the interactive viewer.
///
/// [`Viewer`] glues together:
/// - The growth model: [`Plant`]s, [`GrowthConfig`] and a seeded [`StdRng`].
/// - A cache of each plant's primitives, rebuilt only when plants change.
///   Each plant draws its jitter from its own geometry seed, so rebuilding
///   after a change to one plant leaves the others' shapes untouched.
/// - UI state (pan/zoom, selected plant, file path, console).
///
/// ### Fields
/// - `plants` - Specimens drawn side by side, left to right.
/// - `geometry_seeds` - One jitter seed per plant, parallel to `plants`.
/// - `selected` - Index of the plant targeted by single-plant actions.
/// - `cfg` - Growth constants; also bounds the day slider.
/// - `rng` - Source for hermie trials, cloning, breeding and new geometry seeds.
/// - `day` - Current slider position, applied to every plant.
/// - `shapes` - Cached primitives, one list per plant.
/// - `dirty` - Whether `shapes` must be rebuilt before the next paint.
/// - `zoom` / `pan` - World-to-screen mapping.
/// - `file_path` - Target of the save and load buttons.
/// - `console` - Log lines shown in the bottom panel.
pub struct Viewer {
    plants: Vec<Plant>,
    geometry_seeds: Vec<u64>,
    selected: usize,
    cfg: GrowthConfig,
    rng: StdRng,

    day: Days,
    shapes: Vec<Vec<Primitive>>,
    dirty: bool,

    zoom: f32,
    pan: egui::Vec2,

    file_path: String,
    console: Console,
}

impl Viewer {
    /// Creates a viewer over the plants in `settings`.
    ///
    /// The day slider starts at the first plant's age, and every initial
    /// plant receives a geometry seed from the seeded random source.
    ///
    /// ### Parameters
    /// - `settings` - Configuration, seed, plants, file path and console.
    ///
    /// ### Returns
    /// A fully-initialized [`Viewer`] ready to be passed to `eframe::run_native`.
    pub fn new(settings: ViewerSettings) -> Self {
        let mut rng = StdRng::seed_from_u64(settings.seed);
        let day = settings.plants.first().map_or(0, |p| p.age);
        let geometry_seeds = settings.plants.iter().map(|_| rng.random()).collect();
        Self {
            plants: settings.plants,
            geometry_seeds,
            selected: 0,
            cfg: settings.cfg,
            rng,
            day,
            shapes: Vec::new(),
            dirty: true,
            zoom: 1.5,
            pan: egui::vec2(0.0, 150.0),
            file_path: settings.file_path,
            console: settings.console,
        }
    }

    /// Appends `plant` with a fresh geometry seed and marks shapes dirty.
    ///
    /// ### Returns
    /// The index of the new plant.
    fn add_plant(&mut self, plant: Plant) -> usize {
        self.plants.push(plant);
        self.geometry_seeds.push(self.rng.random());
        self.dirty = true;
        self.plants.len() - 1
    }

    /// World position of the stem foot of plant `index`.
    ///
    /// Plants are spaced [`PLANT_SPACING`] apart and centred on the origin.
    fn base_of(&self, index: usize) -> Vec2 {
        let offset = (self.plants.len().saturating_sub(1)) as f32 * 0.5;
        Vec2::new((index as f32 - offset) * PLANT_SPACING, 0.0)
    }

    /// Returns the plant targeted by single-plant actions, if any.
    fn selected_plant(&self) -> Option<&Plant> {
        self.plants.get(self.selected)
    }

    /// Regenerates cached primitives if any plant changed.
    ///
    /// Each plant is rendered with a generator seeded from its own
    /// geometry seed, so an unchanged plant reproduces the same jitter.
    fn rebuild_shapes(&mut self) {
        if !self.dirty {
            return;
        }
        let shapes = self
            .plants
            .iter()
            .zip(&self.geometry_seeds)
            .enumerate()
            .map(|(i, (plant, &seed))| {
                let mut jitter = StdRng::seed_from_u64(seed);
                plant_primitives(plant, self.base_of(i), &self.cfg, &mut jitter)
            })
            .collect();
        self.shapes = shapes;
        self.dirty = false;
    }

    /// Moves every plant to `day`, running one hermie trial per plant.
    ///
    /// ### Parameters
    /// - `day` - New age for every plant; not bounded here.
    fn set_day(&mut self, day: Days) {
        self.day = day;
        for plant in &mut self.plants {
            plant.advance_day(day, &self.cfg, &mut self.rng);
        }
        self.dirty = true;
    }

    /// Resets hydration of every plant ("Water" button).
    fn water_all(&mut self) {
        for plant in &mut self.plants {
            plant.water();
        }
        log::info!("Watered all plants.");
    }

    /// Resets nutrients of every plant ("Feed" button).
    fn feed_all(&mut self) {
        for plant in &mut self.plants {
            plant.feed();
        }
        log::info!("Fed all plants.");
    }

    /// Applies STS to the selected plant.
    fn apply_sts(&mut self) {
        if let Some(plant) = self.plants.get_mut(self.selected) {
            plant.apply_sts();
            self.dirty = true;
        }
    }

    /// Takes a cutting of the selected plant and appends it if it roots.
    fn clone_selected(&mut self) {
        let Some(plant) = self.plants.get(self.selected) else {
            return;
        };
        if let Some(cutting) = plant.take_clone(&mut self.rng) {
            self.add_plant(cutting);
        }
    }

    /// Breeds the selected plant with the next one in the list.
    ///
    /// The selected plant is the mother; the father wraps around to the
    /// first plant when the last one is selected. Logs a warning and does
    /// nothing with fewer than two plants.
    fn breed_selected(&mut self) {
        if self.plants.len() < 2 {
            log::warn!("Breeding needs at least two plants.");
            return;
        }
        let father = (self.selected + 1) % self.plants.len();
        let seed = Plant::breed(&self.plants[self.selected], &self.plants[father], &mut self.rng);
        self.add_plant(seed);
    }

    /// Writes the selected plant to `file_path`, logging any failure.
    fn save_selected(&self) {
        let Some(plant) = self.selected_plant() else {
            return;
        };
        if let Err(e) = persist::save_plant(plant, &self.file_path) {
            log::error!("{e}");
        }
    }

    /// Loads a plant from `file_path`, appends it and selects it.
    fn load_into_list(&mut self) {
        match persist::load_plant(&self.file_path) {
            Ok(plant) => self.selected = self.add_plant(plant),
            Err(e) => log::error!("{e}"),
        }
    }

    /// Converts a world-space position to screen-space.
    ///
    /// World coordinates are scaled by `zoom`, offset by `pan`, and then
    /// centered inside the given `rect`. The y-axis is flipped so that
    /// positive y goes up in world space.
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

    /// Builds the top toolbar: day slider, care actions and view controls.
    ///
    /// ### Parameters
    /// - `ctx` - egui context for the current frame.
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let mut day = self.day;
                let slider = egui::Slider::new(&mut day, 0..=self.cfg.max_age).text("Day");
                if ui.add(slider).changed() {
                    self.set_day(day);
                }

                ui.separator();
                if ui.button("Water").clicked() {
                    self.water_all();
                }
                if ui.button("Feed").clicked() {
                    self.feed_all();
                }
                if ui.button("Apply STS").clicked() {
                    self.apply_sts();
                }
                if ui.button("Clone").clicked() {
                    self.clone_selected();
                }
                if ui.button("Breed").clicked() {
                    self.breed_selected();
                }

                ui.separator();
                ui.add(egui::Slider::new(&mut self.zoom, 0.1..=10.0).text("Zoom"));
                if ui.button("Reset view").clicked() {
                    self.zoom = 1.5;
                    self.pan = egui::vec2(0.0, 150.0);
                }
            });
        });
    }

    /// Builds the left side panel.
    ///
    /// Lists every plant by label, exposes the selected plant's resources
    /// as sliders, and offers the save/load file actions.
    ///
    /// ### Parameters
    /// - `ctx` - egui context for the current frame.
    fn ui_plant_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("plant_panel")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading("Plants");
                for i in 0..self.plants.len() {
                    let label = grow_core::render::plant_label(&self.plants[i]);
                    if ui.selectable_label(i == self.selected, label).clicked() {
                        self.selected = i;
                    }
                }

                if let Some(plant) = self.plants.get_mut(self.selected) {
                    ui.separator();
                    ui.label(format!("Strain: {}", plant.genome.strain));
                    ui.label(format!("Stem height: {:.1}", plant.stem_height()));
                    ui.label(format!("Stress: {:.1}", plant.growth_stress(&self.cfg)));
                    ui.add(egui::Slider::new(&mut plant.hydration, 0.0..=1.0).text("Hydration"));
                    ui.add(egui::Slider::new(&mut plant.nutrients, 0.0..=1.0).text("Nutrients"));
                    ui.add(egui::Slider::new(&mut plant.health, 0.0..=1.0).text("Health"));
                }

                ui.separator();
                ui.label("Plant file");
                ui.text_edit_singleline(&mut self.file_path);
                ui.horizontal(|ui| {
                    if ui.button("Save Plant").clicked() {
                        self.save_selected();
                    }
                    if ui.button("Load Plant").clicked() {
                        self.load_into_list();
                    }
                });
            });
    }

    /// Builds the bottom console panel, newest line kept in view.
    ///
    /// ### Parameters
    /// - `ctx` - egui context for the current frame.
    fn ui_console(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("console")
            .resizable(true)
            .default_height(120.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for line in self.console.lines() {
                            ui.monospace(line);
                        }
                    });
            });
    }

    /// Paints one primitive in screen space.
    ///
    /// Stroke widths and ellipse radii scale with `zoom`; strokes never
    /// thin below one pixel.
    ///
    /// ### Parameters
    /// - `painter` - Painter clipped to the canvas.
    /// - `rect` - Canvas rectangle used for the world-to-screen mapping.
    /// - `prim` - Primitive in world coordinates.
    fn paint_primitive(&self, painter: &egui::Painter, rect: egui::Rect, prim: &Primitive) {
        match prim {
            Primitive::Segment {
                from,
                to,
                width,
                color,
            } => {
                let a = self.world_to_screen(*from, rect);
                let b = self.world_to_screen(*to, rect);
                let stroke = egui::Stroke::new((width * self.zoom * 0.5).max(1.0), to_color32(*color));
                painter.line_segment([a, b], stroke);
            }
            Primitive::Ellipse {
                center,
                radii,
                color,
                ..
            } => {
                let c = self.world_to_screen(*center, rect);
                let r = egui::vec2(radii.x, radii.y) * self.zoom;
                painter.add(egui::Shape::ellipse_filled(c, r, to_color32(*color)));
            }
            Primitive::Label { pos, text, color } => {
                painter.text(
                    self.world_to_screen(*pos, rect),
                    egui::Align2::CENTER_TOP,
                    text,
                    egui::FontId::proportional(14.0),
                    to_color32(*color),
                );
            }
        }
    }

    /// Builds the canvas: handles pan/zoom input and paints every plant.
    ///
    /// Cached shapes are rebuilt first if any plant changed.
    ///
    /// ### Parameters
    /// - `ctx` - egui context for the current frame.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        self.rebuild_shapes();

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(egui::Color32::BLACK))
            .show(ctx, |ui| {
                let response =
                    ui.allocate_response(ui.available_size(), egui::Sense::click_and_drag());
                let rect = response.rect;
                let painter = ui.painter_at(rect);

                if response.dragged() {
                    self.pan += response.drag_delta();
                }

                // Zoom around the mouse cursor.
                let scroll = ui.ctx().input(|i| i.raw_scroll_delta.y);
                if scroll != 0.0 {
                    let pointer_screen = response.hover_pos().unwrap_or(rect.center());
                    let world_before = self.screen_to_world(pointer_screen, rect);

                    let factor = (1.0 + scroll * 0.001).clamp(0.5, 2.0);
                    self.zoom = (self.zoom * factor).clamp(0.1, 10.0);

                    let screen_after = self.world_to_screen(world_before, rect);
                    self.pan += pointer_screen - screen_after;
                }

                // Ground line and selection marker.
                let ground = egui::Stroke::new(1.0, egui::Color32::DARK_GRAY);
                let left = self.world_to_screen(Vec2::new(-10_000.0, 0.0), rect);
                let right = self.world_to_screen(Vec2::new(10_000.0, 0.0), rect);
                painter.line_segment([left, right], ground);
                if self.selected < self.plants.len() {
                    let base = self.world_to_screen(self.base_of(self.selected), rect);
                    painter.circle_filled(base, 4.0, egui::Color32::LIGHT_RED);
                }

                for shape in &self.shapes {
                    for prim in shape {
                        self.paint_primitive(&painter, rect, prim);
                    }
                }
            });
    }
}

/// Converts a model colour to an egui colour.
///
/// ### Returns
/// The colour with each channel saturated to `0..=255`.
fn to_color32(c: Rgb) -> egui::Color32 {
    let [r, g, b] = c.to_rgb8();
    egui::Color32::from_rgb(r, g, b)
}

impl App for Viewer {
    /// eframe callback that builds all UI panels for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_console(ctx);
        self.ui_plant_panel(ctx);
        self.ui_central_panel(ctx);
    }
}
