use floorheat_core::compose::format_value;
use floorheat_core::config::CancelPolicy;
use floorheat_core::consts::{BLUR_RADIUS_RANGE, MIN_REGION_POINTS, OPACITY_RANGE};
use floorheat_core::heat::colormap::ColorScale;
use floorheat_core::interaction::{InputEvent, Mode};

use super::section_header;
use crate::app::FloorheatApp;
use crate::panels::menu_bar;

const LEFT_PANEL_WIDTH: f32 = 280.0;

pub fn show(ctx: &egui::Context, app: &mut FloorheatApp) {
    egui::SidePanel::left("regions")
        .default_width(LEFT_PANEL_WIDTH)
        .resizable(true)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.set_min_width(LEFT_PANEL_WIDTH - 20.0);

                inputs_section(ui, app);
                ui.separator();
                drawing_section(ui, app);
                ui.separator();
                region_list_section(ui, app);
                ui.separator();
                heat_section(ui, app);
            });
        });
}

fn file_label(path: Option<&std::path::Path>) -> String {
    path.and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "none".to_string())
}

fn inputs_section(ui: &mut egui::Ui, app: &mut FloorheatApp) {
    section_header(ui, "Inputs", None);
    ui.add_space(4.0);

    ui.horizontal(|ui| {
        if ui.button("Open Image...").clicked() {
            menu_bar::open_image(app);
        }
        ui.label(file_label(app.image_path.as_deref()));
    });
    ui.horizontal(|ui| {
        if ui.button("Load Values...").clicked() {
            menu_bar::open_values(app);
        }
        ui.label(file_label(app.values_path.as_deref()));
    });
    if let Some((w, h)) = app.state.image_size() {
        ui.small(format!("{w}x{h}, {} values", app.state.values().len()));
    }
}

fn drawing_section(ui: &mut egui::Ui, app: &mut FloorheatApp) {
    let mode = app.state.mode();
    section_header(ui, "Draw", Some(mode.to_string().as_str()));
    ui.add_space(4.0);

    match mode {
        Mode::View => {
            ui.horizontal(|ui| {
                let edit = ui.add(
                    egui::TextEdit::singleline(&mut app.new_region_name)
                        .hint_text("Department name")
                        .desired_width(150.0),
                );
                let submit = edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if ui.button("Create").clicked() || submit {
                    let name = app.new_region_name.clone();
                    if app.dispatch(InputEvent::CreateRegion(name)) {
                        app.new_region_name.clear();
                    }
                }
            });
        }
        Mode::Draw(_) => {
            let (name, count) = match app.state.active_region() {
                Some(r) => (r.name().to_string(), r.points().len()),
                None => (String::new(), 0),
            };
            ui.label(format!("Drawing \"{name}\": {count} points"));
            ui.small("Click on the plan to add points");
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(count >= MIN_REGION_POINTS, egui::Button::new("Finish"))
                    .clicked()
                {
                    app.dispatch(InputEvent::FinishDrawing);
                }
                if ui.button("Cancel").clicked() {
                    app.dispatch(InputEvent::CancelDrawing);
                }
            });
        }
    }
}

fn region_list_section(ui: &mut egui::Ui, app: &mut FloorheatApp) {
    let snapshot = app.state.regions().snapshot();
    let count = format!("{}", snapshot.len());
    section_header(ui, "Regions", Some(count.as_str()));
    ui.add_space(4.0);

    if snapshot.is_empty() {
        ui.small("No regions yet");
        return;
    }

    let viewing = app.state.mode() == Mode::View;
    let active = app.state.active_region().map(|r| r.id());
    let mut pending = Vec::new();

    egui::Grid::new("region_list")
        .num_columns(3)
        .striped(true)
        .show(ui, |ui| {
            for region in &snapshot {
                let mut title = egui::RichText::new(&region.name);
                if Some(region.id) == active {
                    title = title.strong();
                }
                ui.label(title);

                let detail = if region.complete {
                    format_value(region.value)
                } else {
                    format!("{} pts (open)", region.point_count)
                };
                ui.small(detail);

                ui.horizontal(|ui| {
                    if ui
                        .add_enabled(viewing, egui::Button::new("Edit").small())
                        .clicked()
                    {
                        pending.push(InputEvent::SelectRegion(region.id));
                    }
                    if ui.small_button("Clear").clicked() {
                        pending.push(InputEvent::ClearPoints(region.id));
                    }
                    if ui.small_button("Delete").clicked() {
                        pending.push(InputEvent::DeleteRegion(region.id));
                    }
                });
                ui.end_row();
            }
        });

    for event in pending {
        app.dispatch(event);
    }
}

fn heat_section(ui: &mut egui::Ui, app: &mut FloorheatApp) {
    let status = if app.heat.is_some() { "shown" } else { "off" };
    section_header(ui, "Heat Map", Some(status));
    ui.add_space(4.0);

    let heat = &mut app.config.heat;
    let mut changed = ui.checkbox(&mut heat.enabled, "Show heat layer").changed();

    ui.add_enabled_ui(heat.enabled, |ui| {
        changed |= ui
            .add(
                egui::Slider::new(&mut heat.blur_radius, BLUR_RADIUS_RANGE.0..=BLUR_RADIUS_RANGE.1)
                    .text("Blur")
                    .suffix(" px"),
            )
            .changed();
        changed |= ui
            .add(egui::Slider::new(&mut heat.opacity, OPACITY_RANGE.0..=OPACITY_RANGE.1).text("Opacity"))
            .changed();

        egui::ComboBox::from_label("Colors")
            .selected_text(heat.color_scale.to_string())
            .show_ui(ui, |ui| {
                for scale in ColorScale::ALL {
                    changed |= ui
                        .selectable_value(&mut heat.color_scale, *scale, scale.to_string())
                        .changed();
                }
            });
    });

    if changed {
        app.heat_dirty = true;
    }

    ui.add_space(4.0);
    let mut policy = app.config.interaction.cancel_policy;
    egui::ComboBox::from_label("Cancel empty")
        .selected_text(policy.to_string())
        .show_ui(ui, |ui| {
            for option in [CancelPolicy::DiscardEmpty, CancelPolicy::KeepAll] {
                ui.selectable_value(&mut policy, option, option.to_string());
            }
        });
    if policy != app.config.interaction.cancel_policy {
        let mut config = app.config.clone();
        config.interaction.cancel_policy = policy;
        app.set_config(config);
    }
}
