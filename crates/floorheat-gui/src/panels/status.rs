use floorheat_core::compose::label_text;

use crate::app::FloorheatApp;

pub fn show(ctx: &egui::Context, app: &mut FloorheatApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        // Log area: fixed height for 4 lines, scrollable.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 4.0 + spacing * 3.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if app.log_messages.is_empty() {
                    // Reserve space for 4 empty lines to prevent layout jump.
                    for _ in 0..4 {
                        ui.label("");
                    }
                } else {
                    for msg in &app.log_messages {
                        ui.label(msg);
                    }
                }
            });

        ui.horizontal(|ui| {
            ui.label(format!("Mode: {}", app.state.mode()));
            ui.separator();
            if let Some((w, h)) = app.state.image_size() {
                ui.label(format!("{w}x{h}"));
                ui.separator();
            }
            ui.label(format!("Zoom: {:.0}%", app.state.viewport().zoom * 100.0));
            ui.separator();
            ui.label(format!(
                "Regions: {} ({} complete)",
                app.state.regions().len(),
                app.state.regions().complete().count()
            ));
            if let Some(region) = app.hover.and_then(|p| app.state.regions().region_at(p)) {
                ui.separator();
                ui.label(label_text(region));
            }
        });

        ui.add_space(2.0);
    });
}
