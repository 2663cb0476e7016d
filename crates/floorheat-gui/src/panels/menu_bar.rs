use floorheat_core::config::FloorheatConfig;

use crate::app::FloorheatApp;
use crate::messages;

pub fn show(ctx: &egui::Context, app: &mut FloorheatApp) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                let open_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O);
                if ui.add(egui::Button::new("Open Image...").shortcut_text(ctx.format_shortcut(&open_shortcut))).clicked() {
                    ui.close();
                    open_image(app);
                }

                if ui.button("Load Values...").clicked() {
                    ui.close();
                    open_values(app);
                }

                let save_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::S);
                if ui
                    .add_enabled(
                        app.base.is_some(),
                        egui::Button::new("Export PNG...").shortcut_text(ctx.format_shortcut(&save_shortcut)),
                    )
                    .clicked()
                {
                    ui.close();
                    export_png(app);
                }

                ui.separator();

                if ui.button("Import Config...").clicked() {
                    ui.close();
                    import_config(app);
                }

                if ui.button("Export Config...").clicked() {
                    ui.close();
                    export_config(app);
                }

                ui.separator();

                let quit_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q);
                if ui.add(egui::Button::new("Quit").shortcut_text(ctx.format_shortcut(&quit_shortcut))).clicked() {
                    ui.close();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("Edit", |ui| {
                if ui.button("Reset Defaults").clicked() {
                    ui.close();
                    app.set_config(FloorheatConfig::default());
                    app.add_log("Config reset to defaults".into());
                }
            });

            ui.menu_button("View", |ui| {
                if ui.button("Fit to Window").clicked() {
                    ui.close();
                    app.fit_to_canvas();
                }
                if ui.button("Actual Size").clicked() {
                    ui.close();
                    app.state.viewport_mut().reset();
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    ui.close();
                    app.show_about = true;
                }
            });
        });

        // Keyboard shortcuts (consumed outside menus)
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O))) {
            open_image(app);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::S))) {
            export_png(app);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q))) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

pub(crate) fn open_image(app: &FloorheatApp) {
    app.spawn_file_job(|| {
        let path = rfd::FileDialog::new()
            .add_filter("Images", &["png", "jpg", "jpeg", "bmp", "tif", "tiff", "webp"])
            .add_filter("All files", &["*"])
            .pick_file()?;
        Some(messages::open_image(path))
    });
}

pub(crate) fn open_values(app: &FloorheatApp) {
    app.spawn_file_job(|| {
        let path = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .pick_file()?;
        Some(messages::open_values(path))
    });
}

fn export_png(app: &mut FloorheatApp) {
    let Some(image) = app.render_export() else {
        app.add_log("Open an image before exporting".into());
        return;
    };
    app.spawn_file_job(move || {
        let path = rfd::FileDialog::new()
            .add_filter("PNG", &["png"])
            .set_file_name("heatmap.png")
            .save_file()?;
        Some(messages::export_png(&image, path))
    });
}

fn import_config(app: &FloorheatApp) {
    app.spawn_file_job(|| {
        let path = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .pick_file()?;
        Some(messages::import_config(path))
    });
}

fn export_config(app: &FloorheatApp) {
    let config = app.config.clone();
    app.spawn_file_job(move || {
        let path = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .set_file_name("floorheat.toml")
            .save_file()?;
        Some(messages::export_config(&config, path))
    });
}
