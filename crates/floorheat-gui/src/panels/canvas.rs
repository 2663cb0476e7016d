use floorheat_core::compose::{Color, DrawCommand, Stroke};
use floorheat_core::geometry::{bounds, Point};
use floorheat_core::heat::fill::scanline_spans;
use floorheat_core::interaction::{InputEvent, Mode};

use crate::app::FloorheatApp;
use crate::convert::{color32, to_point, to_vec2};

pub fn show(ctx: &egui::Context, app: &mut FloorheatApp) {
    egui::CentralPanel::default()
        .frame(egui::Frame::NONE)
        .show(ctx, |ui| {
            let rect = ui.available_rect_before_wrap();
            app.canvas_size = Some(to_point(rect.size()));
            let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());

            handle_pointer(ui, &response, app, rect);
            handle_keys(ui, app);

            let commands = app.frame_commands();
            let mut target = CanvasTarget {
                painter: ui.painter_at(rect),
                origin: rect.min,
                pan: Point::ZERO,
                zoom: 1.0,
                base: app.base_texture.as_ref().map(|t| (t.id(), t.size())),
                heat: app.heat_texture.as_ref().map(|t| (t.id(), t.size())),
            };
            for command in &commands {
                target.execute(command);
            }

            if app.base.is_none() {
                show_placeholder(ui, rect);
            }
        });
}

/// Translate egui pointer input into device-space events. Device space is
/// canvas-local: the canvas's top-left corner is the origin.
fn handle_pointer(
    ui: &egui::Ui,
    response: &egui::Response,
    app: &mut FloorheatApp,
    rect: egui::Rect,
) {
    let device = |pos: egui::Pos2| to_point(pos - rect.min);
    app.hover = response
        .hover_pos()
        .map(|pos| app.state.viewport().to_image_space(device(pos)));

    if response.drag_started_by(egui::PointerButton::Primary) {
        let origin = ui
            .input(|i| i.pointer.press_origin())
            .or(response.interact_pointer_pos());
        if let Some(pos) = origin {
            app.dispatch(InputEvent::PointerDown(device(pos)));
        }
    }
    if response.dragged_by(egui::PointerButton::Primary) {
        if let Some(pos) = response.interact_pointer_pos() {
            app.dispatch(InputEvent::PointerMove(device(pos)));
        }
    }
    if response.drag_stopped() {
        app.dispatch(InputEvent::PointerUp);
    }

    if response.double_clicked() && app.state.mode() == Mode::View {
        app.fit_to_canvas();
    } else if response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            app.dispatch(InputEvent::Click(device(pos)));
        }
    }

    if response.hovered() {
        let scroll = ui.input(|i| i.raw_scroll_delta.y);
        if scroll != 0.0 {
            if let Some(pos) = ui.input(|i| i.pointer.hover_pos()) {
                app.dispatch(InputEvent::Wheel {
                    at: device(pos),
                    direction: scroll.signum() as i32,
                });
            }
        }
    }
}

/// Enter finishes and Escape cancels the region being drawn, unless a text
/// field has focus.
fn handle_keys(ui: &egui::Ui, app: &mut FloorheatApp) {
    if !matches!(app.state.mode(), Mode::Draw(_)) || ui.ctx().memory(|m| m.focused().is_some()) {
        return;
    }
    if ui.input(|i| i.key_pressed(egui::Key::Enter)) {
        app.dispatch(InputEvent::FinishDrawing);
    } else if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.dispatch(InputEvent::CancelDrawing);
    }
}

/// Replays draw commands through the egui painter, mirroring the raster
/// executor but with real text.
struct CanvasTarget {
    painter: egui::Painter,
    origin: egui::Pos2,
    pan: Point,
    zoom: f32,
    base: Option<(egui::TextureId, [usize; 2])>,
    heat: Option<(egui::TextureId, [usize; 2])>,
}

impl CanvasTarget {
    fn execute(&mut self, command: &DrawCommand) {
        match command {
            DrawCommand::Clear { color } => {
                self.painter
                    .rect_filled(self.painter.clip_rect(), 0.0, color32(*color));
            }
            DrawCommand::PushTransform { pan, zoom } => {
                self.pan = *pan;
                self.zoom = *zoom;
            }
            DrawCommand::PopTransform => {
                self.pan = Point::ZERO;
                self.zoom = 1.0;
            }
            DrawCommand::BaseImage => {
                if let Some(texture) = self.base {
                    self.draw_texture(texture, egui::Color32::WHITE);
                }
            }
            DrawCommand::HeatLayer { opacity } => {
                if let Some(texture) = self.heat {
                    let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
                    self.draw_texture(texture, egui::Color32::from_white_alpha(alpha));
                }
            }
            DrawCommand::Polygon {
                points,
                fill,
                stroke,
            } => {
                let screen: Vec<egui::Pos2> = points.iter().map(|p| self.to_screen(*p)).collect();
                if let Some(color) = fill {
                    self.fill_polygon(&screen, *color);
                }
                self.painter
                    .add(egui::Shape::closed_line(screen, self.stroke(*stroke)));
            }
            DrawCommand::Polyline {
                points,
                stroke,
                dash,
            } => {
                let screen: Vec<egui::Pos2> = points.iter().map(|p| self.to_screen(*p)).collect();
                let stroke = self.stroke(*stroke);
                match dash {
                    Some([on, off]) => self.painter.extend(egui::Shape::dashed_line(
                        &screen,
                        stroke,
                        on * self.zoom,
                        off * self.zoom,
                    )),
                    None => {
                        self.painter.add(egui::Shape::line(screen, stroke));
                    }
                }
            }
            DrawCommand::Marker {
                center,
                radius,
                color,
            } => {
                self.painter.circle_filled(
                    self.to_screen(*center),
                    radius * self.zoom,
                    color32(*color),
                );
            }
            DrawCommand::Label {
                anchor,
                text,
                font_size,
                color,
            } => {
                let galley = self.painter.layout_no_wrap(
                    text.clone(),
                    egui::FontId::proportional(font_size * self.zoom),
                    color32(*color),
                );
                let rect = egui::Align2::CENTER_CENTER
                    .anchor_size(self.to_screen(*anchor), galley.size());
                self.painter.rect_filled(
                    rect.expand(2.0),
                    2.0,
                    egui::Color32::from_white_alpha(170),
                );
                self.painter
                    .galley(rect.min, galley, egui::Color32::PLACEHOLDER);
            }
            DrawCommand::HintText {
                position,
                text,
                font_size,
                color,
            } => {
                let pos = self.origin + to_vec2(*position);
                let galley = self.painter.layout_no_wrap(
                    text.clone(),
                    egui::FontId::proportional(*font_size),
                    color32(*color),
                );
                let rect = egui::Rect::from_min_size(pos, galley.size());
                self.painter.rect_filled(
                    rect.expand(4.0),
                    3.0,
                    egui::Color32::from_black_alpha(140),
                );
                self.painter
                    .galley(pos, galley, egui::Color32::PLACEHOLDER);
            }
        }
    }

    fn to_screen(&self, p: Point) -> egui::Pos2 {
        self.origin + to_vec2(p * self.zoom + self.pan)
    }

    fn stroke(&self, stroke: Stroke) -> egui::Stroke {
        egui::Stroke::new(stroke.width * self.zoom, color32(stroke.color))
    }

    fn draw_texture(&self, (id, size): (egui::TextureId, [usize; 2]), tint: egui::Color32) {
        let min = self.to_screen(Point::ZERO);
        let max = self.to_screen(Point::new(size[0] as f32, size[1] as f32));
        self.painter.image(
            id,
            egui::Rect::from_min_max(min, max),
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            tint,
        );
    }

    /// Even-odd fill as one mesh of one-pixel scanline strips, so concave
    /// outlines fill the same pixels the heat synthesizer does.
    fn fill_polygon(&self, screen: &[egui::Pos2], color: Color) {
        let poly: Vec<Point> = screen.iter().map(|p| Point::new(p.x, p.y)).collect();
        let Some((lo, hi)) = bounds(&poly) else {
            return;
        };
        let clip = self.painter.clip_rect();
        let color = color32(color);
        let mut mesh = egui::Mesh::default();

        let mut y = lo.y.max(clip.min.y).floor();
        let y_end = hi.y.min(clip.max.y).ceil();
        while y < y_end {
            for (x0, x1) in scanline_spans(&poly, y + 0.5) {
                mesh.add_colored_rect(
                    egui::Rect::from_min_max(egui::pos2(x0, y), egui::pos2(x1, y + 1.0)),
                    color,
                );
            }
            y += 1.0;
        }
        self.painter.add(egui::Shape::mesh(mesh));
    }
}

fn show_placeholder(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        "Open a floor plan to begin",
        egui::FontId::proportional(18.0),
        egui::Color32::from_gray(100),
    );
}
