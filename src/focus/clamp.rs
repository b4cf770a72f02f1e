/// Horizontal position of the popup body, in percent of the container.
///
/// The popup is centred on `arrow_pct` unless that would push it past either
/// container edge, in which case it is shifted to sit flush with that edge.
/// The arrow is never moved. When the popup is wider than the container the
/// left edge wins. A container that has not been measured (`width <= 0`)
/// leaves the popup on the arrow.
pub fn popup_position(arrow_pct: f64, container_width: f32, popup_width: f32) -> f64 {
    let width = f64::from(container_width);
    if width <= 0.0 {
        return arrow_pct;
    }
    let half = f64::from(popup_width) / 2.0;
    let arrow_px = arrow_pct / 100.0 * width;
    let min_px = half;
    let max_px = width - half;
    if arrow_px < min_px {
        min_px / width * 100.0
    } else if arrow_px > max_px {
        max_px / width * 100.0
    } else {
        arrow_pct
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centred_arrow_is_unchanged() {
        assert_eq!(popup_position(50.0, 1000.0, 400.0), 50.0);
    }

    #[test]
    fn clamps_to_left_edge() {
        assert_eq!(popup_position(5.0, 1000.0, 400.0), 20.0);
    }

    #[test]
    fn clamps_to_right_edge() {
        assert_eq!(popup_position(95.0, 1000.0, 400.0), 80.0);
    }

    #[test]
    fn exact_boundaries_are_not_shifted() {
        assert_eq!(popup_position(20.0, 1000.0, 400.0), 20.0);
        assert_eq!(popup_position(80.0, 1000.0, 400.0), 80.0);
    }

    #[test]
    fn popup_wider_than_container_prefers_left() {
        assert_eq!(popup_position(10.0, 300.0, 400.0), 200.0 / 300.0 * 100.0);
    }

    #[test]
    fn unmeasured_container_follows_arrow() {
        assert_eq!(popup_position(3.0, 0.0, 400.0), 3.0);
    }
}
