use std::time::Duration;

use eframe::egui;

use crate::controller::scene::{Motif, MotifFilter};
use crate::theme::Theme;

/// Drop shadow for a motif filter: (vertical offset, blur-ish spread, alpha).
fn shadow(filter: MotifFilter) -> (f32, f32, f32) {
    match filter {
        MotifFilter::Intense => (10.0, 30.0, 0.35),
        MotifFilter::Mild => (6.0, 12.0, 0.25),
    }
}

/// Horizontal progress of fish `index` across the screen, in 0..1.
/// A paused fish stays where it started.
pub fn swim_progress(index: usize, now: Duration, running: bool) -> f32 {
    let seed = (index as f32 * 0.618_034).fract();
    if !running {
        return seed;
    }
    let lap = 28.0 + seed * 22.0;
    (seed + now.as_secs_f32() / lap).fract()
}

fn fish_outline(
    center: egui::Pos2,
    length: f32,
    facing_right: bool,
) -> (Vec<egui::Pos2>, Vec<egui::Pos2>) {
    let dir = if facing_right { 1.0 } else { -1.0 };
    let half = length / 2.0;
    let height = length * 0.42;

    let body: Vec<egui::Pos2> = (0..16)
        .map(|i| {
            let a = i as f32 / 16.0 * std::f32::consts::TAU;
            egui::pos2(center.x + a.cos() * half, center.y + a.sin() * height / 2.0)
        })
        .collect();

    let tail_root = egui::pos2(center.x - dir * half * 0.9, center.y);
    let tail = vec![
        tail_root,
        egui::pos2(tail_root.x - dir * length * 0.35, center.y - height * 0.45),
        egui::pos2(tail_root.x - dir * length * 0.35, center.y + height * 0.45),
    ];
    (body, tail)
}

pub fn draw(
    ui: &egui::Ui,
    motifs: &[Motif],
    rect: egui::Rect,
    now: Duration,
    theme: &Theme,
    scale: f32,
) {
    for (i, motif) in motifs.iter().enumerate() {
        let progress = swim_progress(i, now, motif.running);
        let facing_right = i % 2 == 0;
        let dir = if facing_right { 1.0 } else { -1.0 };
        let length = (70.0 + (i % 3) as f32 * 25.0) * scale;
        let span = rect.width() + length * 3.0;
        let x = if facing_right {
            rect.left() - length * 1.5 + progress * span
        } else {
            rect.right() + length * 1.5 - progress * span
        };
        let lane = ((i as f32 * 0.37).fract() * 0.6 + 0.2) * rect.height();
        let bob = (now.as_secs_f32() * 0.8 + i as f32).sin() * 8.0 * scale;
        let center = egui::pos2(x, rect.top() + lane + bob);

        let (offset, spread, alpha) = shadow(motif.filter);
        let shadow_center = center + egui::vec2(0.0, offset * scale);
        let (shadow_body, _) =
            fish_outline(shadow_center, length + spread * scale * 0.3, facing_right);
        ui.painter().add(egui::Shape::convex_polygon(
            shadow_body,
            Theme::with_opacity(egui::Color32::BLACK, alpha),
            egui::Stroke::NONE,
        ));

        let (body, tail) = fish_outline(center, length, facing_right);
        let color = Theme::with_opacity(theme.fish, 0.85);
        ui.painter()
            .add(egui::Shape::convex_polygon(tail, color, egui::Stroke::NONE));
        ui.painter()
            .add(egui::Shape::convex_polygon(body, color, egui::Stroke::NONE));

        let eye = egui::pos2(center.x + dir * length * 0.28, center.y - length * 0.05);
        let pupil = Theme::with_opacity(egui::Color32::BLACK, 0.8);
        ui.painter().circle_filled(eye, length * 0.045, pupil);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paused_fish_do_not_move() {
        let a = swim_progress(2, Duration::from_secs(1), false);
        let b = swim_progress(2, Duration::from_secs(90), false);
        assert_eq!(a, b);
    }

    #[test]
    fn test_running_fish_progress_stays_in_unit_range() {
        for i in 0..12 {
            for s in [0, 7, 30, 600] {
                let p = swim_progress(i, Duration::from_secs(s), true);
                assert!((0.0..1.0).contains(&p));
            }
        }
    }

    #[test]
    fn test_intense_shadow_is_stronger() {
        let (mild_off, _, mild_alpha) = shadow(MotifFilter::Mild);
        let (int_off, _, int_alpha) = shadow(MotifFilter::Intense);
        assert!(int_off > mild_off);
        assert!(int_alpha > mild_alpha);
    }
}
