use eframe::egui;

use crate::controller::scene::Scene;
use crate::deck::{Deck, SlideContent};
use crate::theme::Theme;

/// Paint the horizontal slide strip. `position` is the strip translation in
/// viewport widths (0 shows the first slide, -2 the third).
pub fn draw_strip(
    ui: &egui::Ui,
    deck: &Deck,
    scene: &Scene,
    rect: egui::Rect,
    position: f32,
    theme: &Theme,
    scale: f32,
) {
    let w = rect.width();
    for (i, content) in deck.slides.iter().enumerate() {
        let offset = (i as f32 + position) * w;
        if offset.abs() >= w {
            continue;
        }
        let slide_rect = rect.translate(egui::vec2(offset, 0.0));
        let active = scene.slides().get(i).is_some_and(|s| s.active);
        // Inactive slides dim as they slide away.
        let opacity = if active {
            1.0
        } else {
            (1.0 - offset.abs() / w).clamp(0.0, 1.0)
        };
        let focused = scene.focused() == Some(i);
        draw_slide(ui, content, slide_rect, opacity, focused, theme, scale);
    }
}

fn draw_slide(
    ui: &egui::Ui,
    slide: &SlideContent,
    rect: egui::Rect,
    opacity: f32,
    focused: bool,
    theme: &Theme,
    scale: f32,
) {
    let padding = 120.0 * scale;
    let content_rect = rect.shrink(padding);
    let mut y = content_rect.top() + 40.0 * scale;

    if let Some(heading) = &slide.heading {
        let color = Theme::with_opacity(theme.heading_color, opacity);
        let galley = ui.painter().layout(
            heading.clone(),
            egui::FontId::proportional(theme.heading_size * scale),
            color,
            content_rect.width(),
        );
        let h = galley.rect.height();
        ui.painter()
            .galley(egui::pos2(content_rect.left(), y), galley, color);
        y += h + 16.0 * scale;

        if focused {
            let accent = Theme::with_opacity(theme.accent, opacity);
            ui.painter().line_segment(
                [
                    egui::pos2(content_rect.left(), y),
                    egui::pos2(content_rect.left() + 120.0 * scale, y),
                ],
                egui::Stroke::new(4.0 * scale, accent),
            );
        }
        y += 40.0 * scale;
    }

    if !slide.body.is_empty() {
        let color = Theme::with_opacity(theme.foreground, opacity);
        let galley = ui.painter().layout(
            slide.body.clone(),
            egui::FontId::proportional(theme.body_size * scale),
            color,
            content_rect.width(),
        );
        ui.painter()
            .galley(egui::pos2(content_rect.left(), y), galley, color);
    }
}
