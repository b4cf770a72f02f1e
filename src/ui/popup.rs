//! Speech-bubble popup drawn above the timeline rows.

use std::sync::Arc;

use egui::{Color32, Galley, Painter, Pos2, Rect, Rounding, Stroke, Ui, Vec2};

use crate::config::TimelineConfig;
use crate::focus::FocusState;
use crate::model::{Item, Rgba};
use crate::ui::theme;

/// Host-supplied popup body. Replaces the colour bar, title and summary; the
/// bubble, arrow and open animation stay the same.
pub type PopupContent = Box<dyn Fn(&mut Ui, &Item, Rgba)>;

/// Draw the popup for `item` inside `area`.
///
/// `scale` is the open animation factor: `0.0` hidden, `1.0` fully open.
/// The body is centred on `state.popup_pos` and the arrow on
/// `state.arrow_pos`, so a clamped body still points at its item. With
/// `content` set the body fills the popup area and the host draws into it.
#[allow(clippy::too_many_arguments)]
pub fn draw_popup(
    ui: &mut Ui,
    area: Rect,
    item: &Item,
    color: Rgba,
    state: &FocusState,
    config: &TimelineConfig,
    scale: f32,
    content: Option<&PopupContent>,
) {
    if scale <= 0.01 {
        return;
    }
    let painter = ui.painter().clone();
    let width = area.width();
    let arrow_x = area.left() + (state.arrow_pos / 100.0) as f32 * width;
    let popup_x = area.left() + (state.popup_pos / 100.0) as f32 * width;

    let default_body = content.is_none().then(|| {
        let wrap = (config.popup_width - theme::POPUP_PADDING * 2.0).max(20.0);
        let title = painter.layout(
            item.title.clone().unwrap_or_default(),
            theme::font_title(),
            theme::TEXT_PRIMARY,
            wrap,
        );
        let summary = painter.layout(
            item.summary.clone().unwrap_or_default(),
            theme::font_summary(),
            theme::TEXT_SECONDARY,
            wrap,
        );
        (title, summary)
    });
    let content_height = match &default_body {
        Some((title, summary)) => {
            theme::POPUP_PADDING * 2.0
                + theme::POPUP_COLOR_BAR
                + 8.0
                + title.size().y
                + 6.0
                + summary.size().y
        }
        None => area.height(),
    };

    let full = body_rect(area, popup_x, config.popup_width, content_height);
    let body = Rect::from_center_size(full.center(), full.size() * scale);
    painter.rect_filled(body, Rounding::same(6.0), theme::color32(config.popup_background));

    // Arrow
    let body_bottom = full.bottom();
    let s = theme::ARROW_SIZE * scale;
    painter.add(egui::Shape::convex_polygon(
        vec![
            Pos2::new(arrow_x - s, body_bottom),
            Pos2::new(arrow_x + s, body_bottom),
            Pos2::new(arrow_x, body_bottom + s),
        ],
        theme::color32(config.popup_background),
        Stroke::NONE,
    ));

    // Content only once the bubble is (nearly) full size
    if scale < 0.9 {
        return;
    }
    if let Some(content) = content {
        let mut child = ui.new_child(
            egui::UiBuilder::new()
                .max_rect(body.shrink(theme::POPUP_PADDING))
                .layout(egui::Layout::top_down(egui::Align::Min))
                .id_salt(egui::Id::new("popup-content").with(state.displayed)),
        );
        child.set_clip_rect(body);
        content(&mut child, item, color);
    } else if let Some((title, summary)) = default_body {
        paint_default_body(&painter, body, color, title, summary);
    }
}

/// Body rectangle of `width` centred on `center_x`, resting on the arrow at
/// the bottom of `area`. Its height is capped so body and arrow fit.
fn body_rect(area: Rect, center_x: f32, width: f32, content_height: f32) -> Rect {
    let max_height = (area.height() - theme::ARROW_SIZE).max(0.0);
    let height = content_height.clamp(0.0, max_height);
    let bottom = area.bottom() - theme::ARROW_SIZE;
    Rect::from_min_max(
        Pos2::new(center_x - width / 2.0, bottom - height),
        Pos2::new(center_x + width / 2.0, bottom),
    )
}

fn paint_default_body(
    painter: &Painter,
    body: Rect,
    color: Rgba,
    title: Arc<Galley>,
    summary: Arc<Galley>,
) {
    let clipped = painter.with_clip_rect(body);
    let mut cursor = body.min + Vec2::splat(theme::POPUP_PADDING);
    clipped.rect_filled(
        Rect::from_min_size(
            cursor,
            Vec2::new(body.width() - theme::POPUP_PADDING * 2.0, theme::POPUP_COLOR_BAR),
        ),
        Rounding::same(2.0),
        theme::color32(color),
    );
    cursor.y += theme::POPUP_COLOR_BAR + 8.0;
    let title_height = title.size().y;
    clipped.galley(cursor, title, Color32::TRANSPARENT);
    cursor.y += title_height + 6.0;
    clipped.galley(cursor, summary, Color32::TRANSPARENT);
}

/// A one-line popup body: title and date range.
pub fn compact_body(ui: &mut Ui, item: &Item, color: Rgba) {
    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new(item.title.as_deref().unwrap_or("Untitled"))
                .font(theme::font_title())
                .color(theme::color32(color)),
        );
        ui.label(
            egui::RichText::new(format!("{} – {}", item.start, item.end))
                .font(theme::font_summary())
                .color(theme::TEXT_SECONDARY),
        );
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area() -> Rect {
        Rect::from_min_size(Pos2::new(0.0, 0.0), Vec2::new(800.0, theme::POPUP_AREA_HEIGHT))
    }

    #[test]
    fn body_sits_on_the_arrow() {
        let rect = body_rect(area(), 400.0, 300.0, 60.0);
        assert_eq!(rect.bottom(), theme::POPUP_AREA_HEIGHT - theme::ARROW_SIZE);
        assert_eq!(rect.height(), 60.0);
        assert_eq!(rect.left(), 250.0);
        assert_eq!(rect.right(), 550.0);
    }

    #[test]
    fn tall_content_is_capped_to_the_area() {
        let rect = body_rect(area(), 400.0, 300.0, 10_000.0);
        assert_eq!(rect.top(), 0.0);
        assert_eq!(rect.height(), theme::POPUP_AREA_HEIGHT - theme::ARROW_SIZE);
    }
}
