use crate::app::TimelineApp;
use crate::ui::theme;
use egui::{menu, RichText, Ui};
use egui_phosphor::regular as icons;

/// Render the top toolbar / menu bar.
pub fn show_toolbar(app: &mut TimelineApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  ").font(theme::font_menu()), |ui| {
            if ui.button(format!("{} Open Items...", icons::FOLDER_OPEN)).clicked() {
                app.open_items();
                ui.close_menu();
            }
            if ui.button(format!("{} Import CSV...", icons::FILE_CSV)).clicked() {
                app.import_csv();
                ui.close_menu();
            }
            ui.separator();
            if ui.button(format!("{} Sample Timeline", icons::SPARKLE)).clicked() {
                app.load_sample();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  View  ").font(theme::font_menu()), |ui| {
            let mut interactive = app.config.interactive;
            if ui.checkbox(&mut interactive, "Interactive").changed() {
                app.config.interactive = interactive;
                app.apply_config();
            }
            let mut popups = app.config.popup_enabled;
            if ui.checkbox(&mut popups, "Popups").changed() {
                app.config.popup_enabled = popups;
                app.apply_config();
            }
            let mut compact = app.has_custom_popup();
            if ui.checkbox(&mut compact, "Compact Popups").changed() {
                if compact {
                    app.set_popup_content(crate::ui::popup::compact_body);
                } else {
                    app.clear_popup_content();
                }
            }
            ui.separator();
            if ui.button(format!("{} Reload Config", icons::ARROWS_CLOCKWISE)).clicked() {
                app.reload_config();
                ui.close_menu();
            }
            if ui.button(format!("{} Open Config Folder", icons::FOLDER)).clicked() {
                app.open_config_folder();
                ui.close_menu();
            }
        });

        // Right-aligned source name
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(RichText::new(app.source_name()).size(11.0).weak());
        });
    });
}
