pub mod bubbles;
pub mod chrome;
pub mod motifs;
pub mod slides;

use std::time::Duration;

use eframe::egui;

use crate::controller::scene::Element;
use crate::theme::Theme;

/// How long the styling layer takes to ease an opacity change.
pub const OPACITY_TRANSITION: Duration = Duration::from_millis(500);

/// Fraction of the remaining distance the slide strip covers per frame.
const STRIP_EASE: f32 = 0.15;

/// Reference resolution all sizes are authored against.
pub fn compute_scale(rect: egui::Rect) -> f32 {
    let ref_w = 1920.0;
    let ref_h = 1080.0;
    (rect.width() / ref_w).min(rect.height() / ref_h)
}

/// Move `position` toward `target`. Returns the new position and whether it
/// is still moving.
pub fn ease_toward(position: f32, target: f32) -> (f32, bool) {
    let diff = target - position;
    if diff.abs() < 0.001 {
        (target, false)
    } else {
        (position + diff * STRIP_EASE, true)
    }
}

fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Opacity an element shows at `now`, easing from its previous value.
pub fn displayed_opacity(el: &Element, now: Duration) -> f32 {
    let elapsed = now.saturating_sub(el.opacity_changed_at);
    if elapsed >= OPACITY_TRANSITION {
        return el.opacity;
    }
    let t = ease_in_out(elapsed.as_secs_f32() / OPACITY_TRANSITION.as_secs_f32());
    el.previous_opacity + (el.opacity - el.previous_opacity) * t
}

/// Vertical water gradient behind everything.
pub fn draw_water(ui: &egui::Ui, rect: egui::Rect, theme: &Theme) {
    let top = theme.water_at(0.0);
    let bottom = theme.water_at(1.0);

    let mut mesh = egui::Mesh::default();
    mesh.colored_vertex(rect.left_top(), top);
    mesh.colored_vertex(rect.right_top(), top);
    mesh.colored_vertex(rect.left_bottom(), bottom);
    mesh.colored_vertex(rect.right_bottom(), bottom);
    mesh.add_triangle(0, 2, 1);
    mesh.add_triangle(1, 2, 3);

    ui.painter().add(egui::Shape::mesh(mesh));
}

/// Shimmer overlays: two faint light pools blended over the slides.
pub fn draw_overlay(ui: &egui::Ui, rect: egui::Rect, theme: &Theme, opacity: f32) {
    if opacity <= 0.0 {
        return;
    }
    let pools = [
        (egui::vec2(0.30, 0.20), 0.12, 0.10),
        (egui::vec2(0.75, 0.80), 0.10, 0.06),
    ];
    for (at, radius, strength) in pools {
        let center = rect.min + egui::vec2(rect.width() * at.x, rect.height() * at.y);
        let r = rect.width().max(rect.height()) * radius;
        // Concentric rings approximate the radial falloff.
        for ring in (1..=6).rev() {
            let f = ring as f32 / 6.0;
            let alpha = strength * opacity * (1.0 - f) * 0.6;
            ui.painter()
                .circle_filled(center, r * f, Theme::with_opacity(theme.shimmer, alpha));
        }
    }
    let wash = Theme::with_opacity(theme.shimmer, 0.03 * opacity);
    ui.painter().rect_filled(rect, 0.0, wash);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::scene::{ElementKind, Layer};

    fn overlay(previous: f32, opacity: f32, at_ms: u64) -> Element {
        Element {
            kind: ElementKind::Overlay,
            layer: Layer::Overlay,
            parent: None,
            created_at: Duration::ZERO,
            opacity,
            previous_opacity: previous,
            opacity_changed_at: Duration::from_millis(at_ms),
        }
    }

    #[test]
    fn test_opacity_eases_over_transition() {
        let el = overlay(0.0, 1.0, 100);
        assert_eq!(displayed_opacity(&el, Duration::from_millis(100)), 0.0);
        let mid = displayed_opacity(&el, Duration::from_millis(350));
        assert!((mid - 0.5).abs() < 1e-4);
        assert_eq!(displayed_opacity(&el, Duration::from_millis(600)), 1.0);
    }

    #[test]
    fn test_opacity_before_change_uses_previous() {
        // Clock readings earlier than the change saturate to the start.
        let el = overlay(0.2, 0.8, 1000);
        assert_eq!(displayed_opacity(&el, Duration::from_millis(10)), 0.2);
    }

    #[test]
    fn test_ease_toward_settles() {
        let (mut pos, mut moving) = (0.0, true);
        let mut frames = 0;
        while moving {
            (pos, moving) = ease_toward(pos, -3.0);
            frames += 1;
            assert!(frames < 200);
        }
        assert_eq!(pos, -3.0);
    }

    #[test]
    fn test_scale_uses_limiting_axis() {
        let rect = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(960.0, 1080.0));
        assert_eq!(compute_scale(rect), 0.5);
    }
}
