use eframe::egui;

use crate::controller::input::Affordance;
use crate::controller::scene::Scene;
use crate::theme::Theme;

/// Centers of the indicator dots along the bottom edge.
pub fn indicator_positions(rect: egui::Rect, count: usize, scale: f32) -> Vec<egui::Pos2> {
    let gap = 28.0 * scale;
    let total = gap * count.saturating_sub(1) as f32;
    let start = rect.center().x - total / 2.0;
    let y = rect.bottom() - 48.0 * scale;
    (0..count)
        .map(|i| egui::pos2(start + i as f32 * gap, y))
        .collect()
}

fn arrow_button(
    ui: &egui::Ui,
    center: egui::Pos2,
    forward: bool,
    id: egui::Id,
    theme: &Theme,
    scale: f32,
) -> bool {
    let radius = 30.0 * scale;
    let hit = egui::Rect::from_center_size(center, egui::vec2(radius * 2.0, radius * 2.0));
    let response = ui.interact(hit, id, egui::Sense::click());

    let strength = if response.hovered() { 0.55 } else { 0.3 };
    ui.painter()
        .circle_filled(center, radius, Theme::with_opacity(theme.panel, strength));

    let dir = if forward { 1.0 } else { -1.0 };
    let tip = center + egui::vec2(dir * radius * 0.35, 0.0);
    let back = center - egui::vec2(dir * radius * 0.2, 0.0);
    let stroke = egui::Stroke::new(3.0 * scale, Theme::with_opacity(theme.foreground, 0.9));
    ui.painter()
        .line_segment([back + egui::vec2(0.0, -radius * 0.35), tip], stroke);
    ui.painter()
        .line_segment([back + egui::vec2(0.0, radius * 0.35), tip], stroke);

    response.clicked()
}

/// Draw the navigation affordances and report the one clicked this frame.
pub fn draw_controls(
    ui: &egui::Ui,
    scene: &Scene,
    rect: egui::Rect,
    theme: &Theme,
    scale: f32,
) -> Option<Affordance> {
    let mut clicked = None;
    let id = ui.id().with("nav");
    let margin = 56.0 * scale;

    if arrow_button(
        ui,
        egui::pos2(rect.left() + margin, rect.center().y),
        false,
        id.with("prev"),
        theme,
        scale,
    ) {
        clicked = Some(Affordance::Previous);
    }
    if arrow_button(
        ui,
        egui::pos2(rect.right() - margin, rect.center().y),
        true,
        id.with("next"),
        theme,
        scale,
    ) {
        clicked = Some(Affordance::Next);
    }

    let radius = 7.0 * scale;
    for (i, center) in indicator_positions(rect, scene.indicators().len(), scale)
        .into_iter()
        .enumerate()
    {
        let active = scene.indicators()[i];
        let hit = egui::Rect::from_center_size(center, egui::vec2(radius * 3.0, radius * 3.0));
        let response = ui.interact(hit, id.with(("dot", i)), egui::Sense::click());
        if response.clicked() {
            clicked = Some(Affordance::Indicator(i));
        }

        if active {
            ui.painter()
                .circle_filled(center, radius, Theme::with_opacity(theme.accent, 0.95));
        } else {
            let alpha = if response.hovered() { 0.7 } else { 0.4 };
            ui.painter().circle_stroke(
                center,
                radius,
                egui::Stroke::new(2.0 * scale, Theme::with_opacity(theme.foreground, alpha)),
            );
        }
    }

    clicked
}

pub fn draw_counter(
    ui: &egui::Ui,
    current: usize,
    total: usize,
    rect: egui::Rect,
    theme: &Theme,
    scale: f32,
) {
    let text = format!("{} / {}", current + 1, total);
    let color = Theme::with_opacity(theme.foreground, 0.4);
    let galley = ui
        .painter()
        .layout_no_wrap(text, egui::FontId::monospace(14.0 * scale), color);
    let pos = egui::pos2(
        rect.right() - galley.rect.width() - 16.0 * scale,
        rect.bottom() - 30.0 * scale,
    );
    ui.painter().galley(pos, galley, color);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indicators_are_centered() {
        let rect = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(1000.0, 500.0));
        let dots = indicator_positions(rect, 5, 1.0);
        assert_eq!(dots.len(), 5);
        assert_eq!(dots[2].x, 500.0);
        assert_eq!(dots[0].x + dots[4].x, 1000.0);
    }

    #[test]
    fn test_single_indicator() {
        let rect = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(800.0, 600.0));
        let dots = indicator_positions(rect, 1, 1.0);
        assert_eq!(dots, vec![egui::pos2(400.0, 552.0)]);
    }
}
