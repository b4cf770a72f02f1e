use egui::{Pos2, Rect, Sense, Stroke, Ui, Vec2};

use crate::config::TimelineConfig;
use crate::focus::{touch_event, FocusEvent, FocusState, HitTest, ItemDisplay, LayoutHitTest, TouchPhase};
use crate::layout::TimelineLayout;
use crate::model::Item;
use crate::ui::popup::{self, PopupContent};
use crate::ui::theme;

/// Per-view state that lives across frames.
#[derive(Debug, Clone, Default)]
pub struct TimelineViewState {
    pointer_inside: bool,
}

/// Render the timeline (popup area, rows, axis) and translate pointer and
/// touch input into focus events for the caller to apply.
///
/// `popup_content` replaces the default popup body when set.
#[allow(clippy::too_many_arguments)]
pub fn show_timeline(
    items: &[Item],
    layout: &TimelineLayout,
    focus: &FocusState,
    config: &TimelineConfig,
    view: &mut TimelineViewState,
    popup_content: Option<&PopupContent>,
    now_ms: u64,
    ui: &mut Ui,
) -> Vec<FocusEvent> {
    let mut events = Vec::new();
    let width = ui.available_width();
    let (response, painter) = ui.allocate_painter(
        Vec2::new(width, theme::POPUP_AREA_HEIGHT + layout.container_height),
        Sense::hover(),
    );
    let origin = response.rect.min;

    if (focus.container_width - width).abs() > 0.5 {
        events.push(FocusEvent::Resize {
            container_width: width,
        });
    }

    let popup_area = Rect::from_min_size(origin, Vec2::new(width, theme::POPUP_AREA_HEIGHT));
    let strip = Rect::from_min_size(
        origin + Vec2::new(0.0, theme::POPUP_AREA_HEIGHT),
        Vec2::new(width, layout.container_height),
    );

    draw_axis(&painter, strip, layout, config);
    draw_items(&painter, strip, layout, focus, config);

    if config.popup_enabled {
        let scale = ui.ctx().animate_bool_with_time(
            response.id.with("popup-open"),
            focus.open,
            config.popup_delay_ms as f32 / 1000.0,
        );
        if let Some((item, placement)) = focus
            .displayed
            .and_then(|i| Some((items.get(i)?, layout.placement(i)?)))
        {
            popup::draw_popup(
                ui,
                popup_area,
                item,
                placement.color,
                focus,
                config,
                scale,
                popup_content,
            );
        }
    }

    let hit = LayoutHitTest::new(layout, width, config.line_thickness);

    let touches: Vec<(TouchPhase, Pos2)> = ui.input(|i| {
        i.events
            .iter()
            .filter_map(|e| match e {
                egui::Event::Touch { phase, pos, .. } => Some((touch_phase(*phase), *pos)),
                _ => None,
            })
            .collect()
    });

    if touches.is_empty() {
        let inside = response.contains_pointer();
        if let Some(pos) = response.hover_pos() {
            let local = pos - strip.min;
            if let Some(placement) = hit
                .hit_test(local.x, local.y)
                .and_then(|i| layout.placement(i))
            {
                if config.interactive {
                    ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                }
                events.push(FocusEvent::Enter {
                    target: ItemDisplay::from(placement),
                    now_ms,
                });
            }
        }
        if view.pointer_inside && !inside {
            events.push(FocusEvent::Leave { now_ms });
        }
        view.pointer_inside = inside;
    } else {
        for (phase, pos) in touches {
            let local = pos - strip.min;
            events.extend(touch_event(&hit, layout, phase, local.x, local.y, now_ms));
        }
        view.pointer_inside = false;
    }

    events
}

fn touch_phase(phase: egui::TouchPhase) -> TouchPhase {
    match phase {
        egui::TouchPhase::Start => TouchPhase::Start,
        egui::TouchPhase::Move => TouchPhase::Move,
        egui::TouchPhase::End => TouchPhase::End,
        egui::TouchPhase::Cancel => TouchPhase::Cancel,
    }
}

fn pct_to_x(strip: Rect, pct: f64) -> f32 {
    strip.left() + (pct / 100.0) as f32 * strip.width()
}

fn draw_axis(painter: &egui::Painter, strip: Rect, layout: &TimelineLayout, config: &TimelineConfig) {
    let color = theme::color32(config.timeline_color);
    let stroke = Stroke::new(1.0, color);
    let baseline = strip.top() + layout.rows_height();

    painter.line_segment(
        [Pos2::new(strip.left(), baseline), Pos2::new(strip.right(), baseline)],
        stroke,
    );

    for tick in layout.year_ticks(config.sub_segments) {
        let x = pct_to_x(strip, tick.left_pct);
        painter.line_segment(
            [Pos2::new(x, baseline), Pos2::new(x, baseline + theme::MAJOR_TICK)],
            stroke,
        );
        for minor in &tick.minor_pct {
            let mx = pct_to_x(strip, *minor);
            painter.line_segment(
                [Pos2::new(mx, baseline), Pos2::new(mx, baseline + theme::MINOR_TICK)],
                stroke,
            );
        }
        painter.text(
            Pos2::new(x + 3.0, baseline + theme::MAJOR_TICK),
            egui::Align2::LEFT_CENTER,
            tick.year.to_string(),
            theme::font_year(),
            color,
        );
    }

    // Closing tick at the end of the last year
    painter.line_segment(
        [
            Pos2::new(strip.right(), baseline),
            Pos2::new(strip.right(), baseline + theme::MAJOR_TICK),
        ],
        stroke,
    );
}

fn draw_items(
    painter: &egui::Painter,
    strip: Rect,
    layout: &TimelineLayout,
    focus: &FocusState,
    config: &TimelineConfig,
) {
    // Back rows first so the front row paints on top.
    for placement in layout.placements.iter().rev() {
        let x0 = pct_to_x(strip, placement.left_pct);
        let x1 = pct_to_x(strip, placement.right_edge_pct());
        let y = strip.top() + placement.top_px;

        if focus.hovered == Some(placement.index) {
            painter.rect_filled(
                Rect::from_min_max(Pos2::new(x0, y), Pos2::new(x1, y + layout.row_gap)),
                0.0,
                theme::hover_tint(placement.color),
            );
        }
        painter.rect_filled(
            Rect::from_min_max(Pos2::new(x0, y), Pos2::new(x1, y + config.line_thickness)),
            0.0,
            theme::color32(placement.color),
        );
    }
}
