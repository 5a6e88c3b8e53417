use std::time::Duration;

use eframe::egui;

use crate::controller::scene::{Bubble, Element, ElementKind, Layer, Scene};
use crate::theme::Theme;

/// Where a bubble is in its rise, 0.0 at the bottom edge and 1.0 at the top.
/// Ambient bubbles loop; burst bubbles run once and hold at the top.
pub fn rise_phase(bubble: &Bubble, age: Duration, looping: bool) -> f32 {
    let cycle = bubble.duration.as_secs_f32().max(0.001);
    let t = age.as_secs_f32() / cycle;
    if looping { t.fract() } else { t.min(1.0) }
}

#[allow(clippy::too_many_arguments)]
fn draw_bubble(
    ui: &egui::Ui,
    rect: egui::Rect,
    bubble: &Bubble,
    el: &Element,
    now: Duration,
    looping: bool,
    theme: &Theme,
    scale: f32,
) {
    let age = now.saturating_sub(el.created_at);
    let phase = rise_phase(bubble, age, looping);
    let radius = bubble.size * scale / 2.0;

    // Slight sideways wobble while rising.
    let wobble = (phase * std::f32::consts::TAU * 2.0).sin() * 6.0 * scale;
    let x = rect.left() + rect.width() * bubble.left / 100.0 + wobble;
    let travel = rect.height() + bubble.size * scale * 2.0;
    let y = rect.bottom() + radius - phase * travel;

    // Rise and fade: full strength for the lower half, then fade out.
    let fade = if phase < 0.5 { 1.0 } else { 1.0 - (phase - 0.5) * 2.0 };
    let alpha = super::displayed_opacity(el, now) * fade;
    if alpha <= 0.0 {
        return;
    }

    let center = egui::pos2(x, y);
    let fill = Theme::with_opacity(theme.bubble, alpha * 0.18);
    let rim = Theme::with_opacity(theme.bubble, alpha * 0.7);
    ui.painter().circle_filled(center, radius, fill);
    ui.painter()
        .circle_stroke(center, radius, egui::Stroke::new(1.2 * scale.max(0.5), rim));
    // Highlight
    ui.painter().circle_filled(
        center + egui::vec2(-radius * 0.35, -radius * 0.35),
        radius * 0.22,
        Theme::with_opacity(theme.bubble, alpha * 0.8),
    );
}

/// Paint every bubble in `layer`.
pub fn draw_layer(
    ui: &egui::Ui,
    scene: &Scene,
    layer: Layer,
    rect: egui::Rect,
    now: Duration,
    theme: &Theme,
    scale: f32,
) {
    let looping = layer == Layer::Ambient;
    for (_, el) in scene.elements() {
        if el.layer != layer {
            continue;
        }
        if let ElementKind::Bubble(bubble) = &el.kind {
            draw_bubble(ui, rect, bubble, el, now, looping, theme, scale);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bubble(secs: u64) -> Bubble {
        Bubble {
            left: 10.0,
            size: 12.0,
            duration: Duration::from_secs(secs),
        }
    }

    #[test]
    fn test_ambient_phase_loops() {
        let b = bubble(10);
        assert_eq!(rise_phase(&b, Duration::from_secs(0), true), 0.0);
        assert!((rise_phase(&b, Duration::from_secs(15), true) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_burst_phase_holds_at_top() {
        let b = bubble(2);
        assert_eq!(rise_phase(&b, Duration::from_secs(5), false), 1.0);
    }
}
