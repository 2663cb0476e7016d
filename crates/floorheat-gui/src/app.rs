use std::path::PathBuf;
use std::sync::mpsc;

use floorheat_core::compose::raster::RasterTarget;
use floorheat_core::compose::{compose, DrawCommand};
use floorheat_core::config::FloorheatConfig;
use floorheat_core::geometry::Point;
use floorheat_core::heat::{HeatLayer, HeatSynthesizer};
use floorheat_core::interaction::{AppState, InputEvent, Outcome};
use image::RgbaImage;
use tracing::{info, warn};

use crate::convert::rgba_to_color_image;
use crate::messages::FileMessage;
use crate::panels;

pub struct FloorheatApp {
    pub state: AppState,
    pub config: FloorheatConfig,
    pub synth: HeatSynthesizer,
    pub base: Option<RgbaImage>,
    pub heat: Option<HeatLayer>,
    pub base_texture: Option<egui::TextureHandle>,
    pub heat_texture: Option<egui::TextureHandle>,
    /// Set when regions, values, the image or heat settings change.
    pub heat_dirty: bool,
    pub image_path: Option<PathBuf>,
    pub values_path: Option<PathBuf>,
    pub new_region_name: String,
    /// Canvas size in points, updated every frame by the canvas panel.
    pub canvas_size: Option<Point>,
    /// Pointer position in image space while over the canvas.
    pub hover: Option<Point>,
    pub log_messages: Vec<String>,
    pub msg_tx: mpsc::Sender<FileMessage>,
    pub msg_rx: mpsc::Receiver<FileMessage>,
    pub ctx: egui::Context,
    pub show_about: bool,
}

impl FloorheatApp {
    pub fn new(ctx: &egui::Context) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        let config = FloorheatConfig::default();

        Self {
            state: AppState::new().with_cancel_policy(config.interaction.cancel_policy),
            config,
            synth: HeatSynthesizer::new(),
            base: None,
            heat: None,
            base_texture: None,
            heat_texture: None,
            heat_dirty: false,
            image_path: None,
            values_path: None,
            new_region_name: String::new(),
            canvas_size: None,
            hover: None,
            log_messages: Vec::new(),
            msg_tx,
            msg_rx,
            ctx: ctx.clone(),
            show_about: false,
        }
    }

    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
    }

    /// Apply an input event. Rejections are logged, never fatal.
    pub fn dispatch(&mut self, event: InputEvent) -> bool {
        match self.state.apply(&event) {
            Ok(outcome) => {
                if outcome == Outcome::SceneChanged {
                    self.heat_dirty = true;
                }
                true
            }
            Err(e) => {
                warn!(error = %e, "Input rejected");
                self.add_log(format!("{e}"));
                false
            }
        }
    }

    /// Run `job` on a background thread (file dialogs block) and deliver its
    /// result to the UI thread.
    pub fn spawn_file_job(&self, job: impl FnOnce() -> Option<FileMessage> + Send + 'static) {
        let tx = self.msg_tx.clone();
        let ctx = self.ctx.clone();
        std::thread::spawn(move || {
            if let Some(msg) = job() {
                let _ = tx.send(msg);
                ctx.request_repaint();
            }
        });
    }

    pub fn set_config(&mut self, config: FloorheatConfig) {
        self.config = config.sanitized();
        self.state = std::mem::take(&mut self.state)
            .with_cancel_policy(self.config.interaction.cancel_policy);
        self.heat_dirty = true;
    }

    pub fn fit_to_canvas(&mut self) {
        let (Some((w, h)), Some(canvas)) = (self.state.image_size(), self.canvas_size) else {
            return;
        };
        self.state
            .viewport_mut()
            .fit(Point::new(w as f32, h as f32), canvas);
    }

    pub fn frame_commands(&self) -> Vec<DrawCommand> {
        compose(
            &self.state,
            self.heat.is_some(),
            &self.config.heat,
            &self.config.render,
        )
    }

    /// Composite at the base image's native size with the current viewport
    /// replaced by the identity, so the export covers the whole plan.
    pub fn render_export(&self) -> Option<RgbaImage> {
        let base = self.base.as_ref()?;
        let mut state = self.state.clone();
        state.viewport_mut().reset();
        let commands = compose(
            &state,
            self.heat.is_some(),
            &self.config.heat,
            &self.config.render,
        );
        Some(RasterTarget::new(base, self.heat.as_ref()).render(&commands))
    }

    fn poll_messages(&mut self, ctx: &egui::Context) {
        while let Ok(msg) = self.msg_rx.try_recv() {
            match msg {
                FileMessage::ImageOpened { path, image } => {
                    let (width, height) = image.dimensions();
                    self.add_log(format!("Opened: {} ({width}x{height})", path.display()));
                    self.base_texture = Some(ctx.load_texture(
                        "base",
                        rgba_to_color_image(&image),
                        egui::TextureOptions::LINEAR,
                    ));
                    self.base = Some(image);
                    self.image_path = Some(path);
                    self.dispatch(InputEvent::ImageLoaded { width, height });
                }
                FileMessage::ValuesOpened { path, values } => {
                    self.add_log(format!(
                        "Values: {} ({} entries)",
                        path.display(),
                        values.len()
                    ));
                    self.values_path = Some(path);
                    self.dispatch(InputEvent::ValuesLoaded(values));
                }
                FileMessage::ConfigImported { path, config } => {
                    self.add_log(format!("Config imported from {}", path.display()));
                    self.set_config(config);
                }
                FileMessage::Saved { path } => {
                    self.add_log(format!("Saved: {}", path.display()));
                }
                FileMessage::Error { message } => {
                    self.add_log(format!("ERROR: {message}"));
                }
            }
        }
    }

    fn refresh_heat(&mut self, ctx: &egui::Context) {
        if !self.heat_dirty {
            return;
        }
        self.heat_dirty = false;

        self.heat = match &self.base {
            Some(base) => self.synth.synthesize(
                self.state.regions(),
                self.state.max_value(),
                base.width(),
                base.height(),
                &self.config.heat,
            ),
            None => None,
        };
        self.heat_texture = self.heat.as_ref().map(|layer| {
            ctx.load_texture(
                "heat",
                rgba_to_color_image(&layer.image),
                egui::TextureOptions::LINEAR,
            )
        });
        if self.heat.is_none() {
            info!("Heat layer cleared");
        }
    }
}

impl eframe::App for FloorheatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_messages(ctx);

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::regions::show(ctx, self);
        // Synthesize after the side panel so slider changes land this frame.
        self.refresh_heat(ctx);
        panels::canvas::show(ctx, self);
        if self.heat_dirty {
            ctx.request_repaint();
        }

        if self.show_about {
            egui::Window::new("About Floorheat")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Floorheat");
                        ui.label("Floor-plan sales heat maps");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.show_about = false;
                        }
                    });
                });
        }
    }
}
