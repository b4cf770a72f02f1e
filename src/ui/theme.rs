use egui::{Color32, FontId, Rounding, Stroke, Visuals};

use crate::model::Rgba;

// ── Palette ──────────────────────────────────────────────────────────────────

pub const BG_DARK: Color32 = Color32::from_rgb(24, 24, 32);
pub const BG_PANEL: Color32 = Color32::from_rgb(30, 30, 40);
pub const BG_STATUS: Color32 = Color32::from_rgb(26, 26, 36);

pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(50, 52, 64);
pub const ACCENT: Color32 = Color32::from_rgb(80, 140, 220);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(230, 232, 240);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(155, 160, 178);
pub const TEXT_DIM: Color32 = Color32::from_rgb(100, 105, 120);
pub const TEXT_ERROR: Color32 = Color32::from_rgb(240, 110, 110);

// ── Sizes ────────────────────────────────────────────────────────────────────

/// Space reserved above the rows for the popup and its arrow.
pub const POPUP_AREA_HEIGHT: f32 = 150.0;
pub const POPUP_PADDING: f32 = 12.0;
pub const POPUP_COLOR_BAR: f32 = 4.0;
pub const ARROW_SIZE: f32 = 10.0;
pub const MAJOR_TICK: f32 = 10.0;
pub const MINOR_TICK: f32 = 5.0;
pub const CANVAS_MARGIN: f32 = 24.0;
pub const STATUS_BAR_HEIGHT: f32 = 24.0;

/// Alpha of the tint behind a hovered item (20%).
pub const HOVER_TINT_ALPHA: u8 = 51;

// ── Fonts ────────────────────────────────────────────────────────────────────

pub fn font_year() -> FontId {
    FontId::proportional(11.0)
}

pub fn font_title() -> FontId {
    FontId::proportional(18.0)
}

pub fn font_summary() -> FontId {
    FontId::proportional(12.5)
}

pub fn font_status() -> FontId {
    FontId::proportional(11.0)
}

pub fn font_menu() -> FontId {
    FontId::proportional(13.0)
}

// ── Conversions ──────────────────────────────────────────────────────────────

pub fn color32(c: Rgba) -> Color32 {
    Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
}

pub fn hover_tint(c: Rgba) -> Color32 {
    color32(c.with_alpha(HOVER_TINT_ALPHA))
}

// ── Apply custom visuals ─────────────────────────────────────────────────────

pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = Visuals::dark();

    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.panel_fill = BG_PANEL;
    visuals.window_fill = BG_PANEL;

    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, TEXT_SECONDARY);
    visuals.widgets.noninteractive.rounding = Rounding::same(4.0);

    visuals.widgets.inactive.bg_fill = Color32::from_rgb(42, 44, 56);
    visuals.widgets.inactive.rounding = Rounding::same(4.0);

    visuals.widgets.hovered.bg_fill = Color32::from_rgb(52, 54, 68);
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.widgets.hovered.rounding = Rounding::same(4.0);

    visuals.widgets.active.bg_fill = Color32::from_rgb(60, 62, 76);
    visuals.widgets.active.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.widgets.active.rounding = Rounding::same(4.0);

    visuals.window_rounding = Rounding::same(8.0);
    visuals.window_stroke = Stroke::new(1.0, BORDER_SUBTLE);

    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 4.0);
    style.spacing.button_padding = egui::vec2(8.0, 4.0);
    ctx.set_style(style);
}
