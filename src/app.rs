use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::TimelineConfig;
use crate::error::{Diagnostic, TimelineError};
use crate::focus::{Effect, FocusCallbacks, FocusMachine, ItemDisplay};
use crate::layout::TimelineLayout;
use crate::model::{Item, Rgba, YearMonth};
use crate::ui;
use crate::ui::popup::PopupContent;
use crate::ui::timeline_view::TimelineViewState;

/// Main application state.
pub struct TimelineApp {
    pub items: Vec<Item>,
    pub layout: Option<TimelineLayout>,
    pub config: TimelineConfig,
    pub focus: FocusMachine,
    pub view: TimelineViewState,
    pub source: Option<PathBuf>,
    /// Item most recently confirmed by the display callback.
    pub highlighted: Option<usize>,
    pub diagnostics: Vec<Diagnostic>,
    /// Replaces the default popup body when set.
    pub popup_content: Option<PopupContent>,

    // Status message
    pub status_message: String,
}

impl TimelineApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        Self::with_config(TimelineConfig::load_or(Self::sample_config))
    }

    /// App state without a window, showing the sample timeline.
    pub fn with_config(config: TimelineConfig) -> Self {
        let mut app = Self {
            items: Vec::new(),
            layout: None,
            focus: FocusMachine::new(config.focus()),
            config,
            view: TimelineViewState::default(),
            source: None,
            highlighted: None,
            diagnostics: Vec::new(),
            popup_content: None,
            status_message: "Ready".to_string(),
        };
        app.load_sample();
        app
    }

    /// Config used when the user has none: light lines for the dark canvas.
    fn sample_config() -> TimelineConfig {
        TimelineConfig {
            timeline_color: crate::model::Rgba::rgb(255, 255, 255),
            line_thickness: 4.0,
            popup_width: 300.0,
            ..TimelineConfig::default()
        }
    }

    /// A small career history.
    pub fn sample_items() -> Vec<Item> {
        vec![
            Item::new(YearMonth::new(2012, 8), YearMonth::new(2013, 12))
                .with_title("Employment1")
                .with_summary("Did some cool stuff"),
            Item::new(YearMonth::new(2014, 5), YearMonth::new(2015, 12))
                .with_title("Employment2")
                .with_summary("Did some even cooler stuff"),
            Item::new(YearMonth::new(2013, 8), YearMonth::new(2015, 4))
                .with_title("Contract Work")
                .with_summary(
                    "Vivamus luctus, ipsum et pharetra auctor, diam quam lacinia odio, \
                     eu rutrum odio metus eget orci. Donec aliquam faucibus neque.",
                ),
            Item::new(YearMonth::new(2012, 2), YearMonth::new(2016, 8))
                .with_title("Graduate School")
                .with_summary("Learned some super useful things"),
        ]
    }

    pub fn source_name(&self) -> String {
        self.source
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Sample timeline".to_string())
    }

    // --- Item list ---

    pub fn load_sample(&mut self) {
        self.set_items(Self::sample_items(), None);
    }

    /// Replace the item list and recompute everything derived from it.
    pub fn set_items(&mut self, items: Vec<Item>, source: Option<PathBuf>) {
        self.items = items;
        self.source = source;
        self.highlighted = None;
        self.focus.reset();
        self.recompute_layout();
    }

    fn recompute_layout(&mut self) {
        match TimelineLayout::compute(&self.items, &self.config.layout()) {
            Ok(layout) => {
                self.diagnostics = layout.diagnostics.clone();
                self.status_message = match self.diagnostics.len() {
                    0 => format!("{} items in {} rows", self.items.len(), layout.row_count()),
                    n => format!("{} items in {} rows ({} warnings)", self.items.len(), layout.row_count(), n),
                };
                self.layout = Some(layout);
            }
            Err(TimelineError::EmptyTimeline) => {
                self.diagnostics.clear();
                self.layout = None;
                self.status_message = "Nothing to render".to_string();
            }
            Err(e) => {
                self.layout = None;
                self.status_message = format!("Layout failed: {}", e);
            }
        }
    }

    pub fn open_items(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Timeline Items", &["json"])
            .pick_file()
        {
            match crate::io::load_items(&path) {
                Ok(items) => self.set_items(items, Some(path)),
                Err(e) => self.status_message = format!("Error loading: {}", e),
            }
        }
    }

    pub fn import_csv(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv", "txt"])
            .pick_file()
        {
            match crate::io::import_csv(&path) {
                Ok((items, skipped)) => {
                    let count = items.len();
                    self.set_items(items, Some(path));
                    if skipped > 0 {
                        self.status_message =
                            format!("Imported {} items ({} rows skipped)", count, skipped);
                    }
                }
                Err(e) => self.status_message = format!("CSV import failed: {}", e),
            }
        }
    }

    // --- Popup ---

    pub fn set_popup_content(&mut self, content: impl Fn(&mut egui::Ui, &Item, Rgba) + 'static) {
        self.popup_content = Some(Box::new(content));
    }

    pub fn clear_popup_content(&mut self) {
        self.popup_content = None;
    }

    pub fn has_custom_popup(&self) -> bool {
        self.popup_content.is_some()
    }

    // --- Config ---

    /// Push the current config into the focus machine and layout.
    pub fn apply_config(&mut self) {
        self.focus.set_config(self.config.focus());
        self.recompute_layout();
    }

    pub fn reload_config(&mut self) {
        self.config = TimelineConfig::load_or(Self::sample_config);
        self.apply_config();
    }

    pub fn open_config_folder(&mut self) {
        let Some(dir) = TimelineConfig::default_path().and_then(|p| p.parent().map(PathBuf::from)) else {
            self.status_message = "No config directory on this system".to_string();
            return;
        };
        self.open_folder(&dir);
    }

    fn open_folder(&mut self, dir: &Path) {
        if let Err(e) = std::fs::create_dir_all(dir) {
            tracing::warn!(dir = %dir.display(), error = %e, "failed to create folder");
            self.status_message = format!("Could not create {}: {}", dir.display(), e);
            return;
        }
        if let Err(e) = open::that(dir) {
            self.status_message = format!("Could not open {}: {}", dir.display(), e);
        }
    }

    // --- Focus ---

    pub fn run_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            effect.apply(self);
        }
    }
}

impl FocusCallbacks for TimelineApp {
    fn item_displayed(&mut self, display: Option<&ItemDisplay>) {
        self.highlighted = display.map(|d| d.index);
        if let Some(d) = display {
            let title = self
                .items
                .get(d.index)
                .and_then(|i| i.title.as_deref())
                .unwrap_or("Untitled");
            let row = self
                .layout
                .as_ref()
                .and_then(|l| l.levels.row_of(d.index))
                .map(|r| format!(" in row {}", r + 1))
                .unwrap_or_default();
            self.status_message = format!(
                "Showing '{}'{} ({:.1}% → {:.1}%)",
                title,
                row,
                d.left_pct,
                100.0 - d.right_pct
            );
        }
    }

    fn left(&mut self) {
        self.status_message = "Ready".to_string();
    }
}

impl eframe::App for TimelineApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx);

        let now_ms = (ctx.input(|i| i.time) * 1000.0) as u64;
        let effects = self.focus.tick(now_ms);
        self.run_effects(effects);

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_STATUS)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .font(ui::theme::font_status())
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!("Items: {}", self.items.len()))
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                        if let Some(layout) = &self.layout {
                            ui.label(
                                egui::RichText::new(format!(
                                    "{}–{} · {} rows · ",
                                    layout.first_year(),
                                    layout.last_year(),
                                    layout.row_count()
                                ))
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                            );
                        }
                    });
                });
            });

        // Central panel: timeline + diagnostics
        let chart_frame = egui::Frame::default()
            .fill(ui::theme::BG_DARK)
            .inner_margin(egui::Margin::same(ui::theme::CANVAS_MARGIN));
        let events = egui::CentralPanel::default()
            .frame(chart_frame)
            .show(ctx, |ui| {
                let events = match &self.layout {
                    Some(layout) => ui::timeline_view::show_timeline(
                        &self.items,
                        layout,
                        self.focus.state(),
                        &self.config,
                        &mut self.view,
                        self.popup_content.as_ref(),
                        now_ms,
                        ui,
                    ),
                    None => {
                        ui.centered_and_justified(|ui| {
                            ui.label(egui::RichText::new("No items to display").color(ui::theme::TEXT_DIM));
                        });
                        Vec::new()
                    }
                };

                if !self.diagnostics.is_empty() {
                    ui.add_space(16.0);
                    for diagnostic in &self.diagnostics {
                        let color = if diagnostic.is_error() {
                            ui::theme::TEXT_ERROR
                        } else {
                            ui::theme::TEXT_SECONDARY
                        };
                        ui.label(egui::RichText::new(diagnostic.to_string()).small().color(color));
                    }
                }
                events
            })
            .inner;

        for event in events {
            let effects = self.focus.handle(event);
            self.run_effects(effects);
        }

        if let Some(deadline) = self.focus.state().next_deadline() {
            ctx.request_repaint_after(Duration::from_millis(deadline.saturating_sub(now_ms)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_lays_out_in_three_rows() {
        let app = TimelineApp::with_config(TimelineConfig::default());
        let layout = app.layout.as_ref().unwrap();
        assert_eq!(layout.row_count(), 3);
        assert!(app.diagnostics.is_empty());
    }

    #[test]
    fn empty_item_list_renders_nothing() {
        let mut app = TimelineApp::with_config(TimelineConfig::default());
        app.set_items(Vec::new(), None);
        assert!(app.layout.is_none());
        assert_eq!(app.status_message, "Nothing to render");
    }

    #[test]
    fn effects_drive_highlight_and_status() {
        let mut app = TimelineApp::with_config(TimelineConfig::default());
        let target = ItemDisplay::from(app.layout.as_ref().unwrap().placement(2).unwrap());
        let mut effects = app.focus.enter(target, 0);
        effects.extend(app.focus.tick(100));
        app.run_effects(effects);
        assert_eq!(app.highlighted, Some(2));
        assert!(app.status_message.contains("Contract Work"));
        assert!(app.status_message.contains("in row 2"));

        let mut effects = app.focus.leave(200);
        effects.extend(app.focus.tick(300));
        app.run_effects(effects);
        assert_eq!(app.highlighted, None);
        assert_eq!(app.status_message, "Ready");
    }

    #[test]
    fn popup_content_hook_can_be_swapped() {
        let mut app = TimelineApp::with_config(TimelineConfig::default());
        assert!(!app.has_custom_popup());
        app.set_popup_content(ui::popup::compact_body);
        assert!(app.has_custom_popup());
        app.clear_popup_content();
        assert!(!app.has_custom_popup());
    }

    #[test]
    fn folder_creation_failure_is_reported() {
        let mut app = TimelineApp::with_config(TimelineConfig::default());
        let file = tempfile::NamedTempFile::new().unwrap();
        let dir = file.path().join("config");
        app.open_folder(&dir);
        assert!(app.status_message.starts_with("Could not create"));
        assert!(!dir.exists());
    }
}
