use eframe::egui;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::controller::input::Key;
use crate::controller::scene::Layer;
use crate::controller::{Controller, ControllerOptions};
use crate::deck::Deck;
use crate::render;
use crate::theme::Theme;

/// Frames longer than this (window dragged, machine asleep) are clamped so
/// timers do not all fire in one burst.
const MAX_FRAME_STEP: Duration = Duration::from_millis(250);
/// Repaint pace when only the ambient water is moving.
const AMBIENT_FRAME: Duration = Duration::from_millis(33);
const TOAST_HOLD: Duration = Duration::from_millis(1000);
const TOAST_FADE: Duration = Duration::from_millis(500);

const SHORTCUTS: &[(&str, &str)] = &[
    ("\u{2192} PgDn", "next"),
    ("\u{2190} PgUp", "previous"),
    ("Home End", "first / last"),
    ("D", "theme"),
    ("F", "fullscreen"),
    ("H", "help"),
    ("Q", "quit"),
];

/// A short status message that holds, then fades out.
struct Toast {
    message: String,
    shown_at: Instant,
}

impl Toast {
    fn new(message: String) -> Self {
        Self {
            message,
            shown_at: Instant::now(),
        }
    }

    fn opacity_after(elapsed: Duration) -> f32 {
        match elapsed.checked_sub(TOAST_HOLD) {
            None => 1.0,
            Some(fading) => 1.0 - (fading.as_secs_f32() / TOAST_FADE.as_secs_f32()).min(1.0),
        }
    }

    fn opacity(&self) -> f32 {
        Self::opacity_after(self.shown_at.elapsed())
    }

    fn is_expired(&self) -> bool {
        self.shown_at.elapsed() >= TOAST_HOLD + TOAST_FADE
    }
}

struct PresentationApp {
    deck: Deck,
    controller: Controller,
    theme: Theme,
    /// Animated strip translation chasing the scene's target offset.
    strip_position: f32,
    last_frame: Instant,
    show_hud: bool,
    toast: Option<Toast>,
}

/// Map an egui key onto the navigation keys the controller understands.
fn nav_key(key: egui::Key) -> Option<Key> {
    match key {
        egui::Key::ArrowRight => Some(Key::ArrowRight),
        egui::Key::ArrowLeft => Some(Key::ArrowLeft),
        egui::Key::PageDown => Some(Key::PageDown),
        egui::Key::PageUp => Some(Key::PageUp),
        egui::Key::Home => Some(Key::Home),
        egui::Key::End => Some(Key::End),
        _ => None,
    }
}

impl PresentationApp {
    fn new(deck: Deck, controller: Controller, theme: Theme) -> Self {
        let strip_position = controller.scene().strip_offset();
        Self {
            deck,
            controller,
            theme,
            strip_position,
            last_frame: Instant::now(),
            show_hud: false,
            toast: None,
        }
    }

    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        self.toast = Some(Toast::new(format!("Theme: {}", self.theme.name)));
    }

    /// Feed keyboard and touch events to the controller in arrival order.
    /// Paging keys the controller claims are removed so nothing else reacts.
    fn handle_navigation_input(&mut self, ctx: &egui::Context) {
        ctx.input_mut(|i| {
            let mut suppressed: Vec<egui::Key> = Vec::new();
            for event in &i.events {
                match event {
                    egui::Event::Key {
                        key,
                        pressed: true,
                        modifiers,
                        ..
                    } if modifiers.is_none() => {
                        if let Some(nav) = nav_key(*key) {
                            if self.controller.key(nav) {
                                suppressed.push(*key);
                            }
                        }
                    }
                    egui::Event::Touch { phase, pos, .. } => match phase {
                        egui::TouchPhase::Start => self.controller.touch_start(pos.x, pos.y),
                        egui::TouchPhase::End => self.controller.touch_end(pos.x, pos.y),
                        _ => {}
                    },
                    _ => {}
                }
            }
            if !suppressed.is_empty() {
                i.events.retain(|e| {
                    !matches!(e, egui::Event::Key { key, .. } if suppressed.contains(key))
                });
            }
        });
    }
}

impl eframe::App for PresentationApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).min(MAX_FRAME_STEP);
        self.last_frame = now;
        self.controller.tick(dt);

        self.handle_navigation_input(ctx);

        // Collect viewport commands to send AFTER the input closure
        // (sending inside ctx.input() causes RwLock deadlock)
        let mut viewport_cmds: Vec<egui::ViewportCommand> = Vec::new();
        let mut toggle_theme = false;

        ctx.input(|i| {
            if i.key_pressed(egui::Key::Q) {
                viewport_cmds.push(egui::ViewportCommand::Close);
                return;
            }
            if i.key_pressed(egui::Key::F) {
                viewport_cmds.push(egui::ViewportCommand::Fullscreen(
                    !i.viewport().fullscreen.unwrap_or(false),
                ));
            }
            if i.key_pressed(egui::Key::D) {
                toggle_theme = true;
            }
            if i.key_pressed(egui::Key::H) {
                self.show_hud = !self.show_hud;
            }
        });

        for cmd in viewport_cmds {
            ctx.send_viewport_cmd(cmd);
        }
        if toggle_theme {
            self.toggle_theme();
        }

        if self.toast.as_ref().is_some_and(|t| t.is_expired()) {
            self.toast = None;
        }

        let (position, strip_moving) =
            render::ease_toward(self.strip_position, self.controller.scene().strip_offset());
        self.strip_position = position;

        let clock = self.controller.now();
        let mut clicked = None;

        egui::CentralPanel::default()
            .frame(egui::Frame::new().inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                let scale = render::compute_scale(rect);
                let scene = self.controller.scene();

                render::draw_water(ui, rect, &self.theme);
                render::bubbles::draw_layer(
                    ui,
                    scene,
                    Layer::Ambient,
                    rect,
                    clock,
                    &self.theme,
                    scale,
                );
                render::motifs::draw(ui, scene.motifs(), rect, clock, &self.theme, scale);
                render::slides::draw_strip(
                    ui,
                    &self.deck,
                    scene,
                    rect,
                    self.strip_position,
                    &self.theme,
                    scale,
                );

                for (_, el) in scene.elements() {
                    if el.layer == Layer::Overlay {
                        let opacity = render::displayed_opacity(el, clock);
                        render::draw_overlay(ui, rect, &self.theme, opacity);
                    }
                }
                render::bubbles::draw_layer(
                    ui,
                    scene,
                    Layer::Burst,
                    rect,
                    clock,
                    &self.theme,
                    scale,
                );

                clicked = render::chrome::draw_controls(ui, scene, rect, &self.theme, scale);
                render::chrome::draw_counter(
                    ui,
                    self.controller.current(),
                    self.controller.total(),
                    rect,
                    &self.theme,
                    scale,
                );

                if let Some(ref toast) = self.toast {
                    draw_toast(ui, toast, &self.theme, rect, scale);
                }
                if self.show_hud {
                    draw_hud(ui, &self.theme, rect, scale);
                }
            });

        if let Some(target) = clicked {
            self.controller.click(target);
        }

        // Ambient bubbles never stop moving; transitions get every frame.
        if strip_moving || self.controller.is_animating() || self.toast.is_some() {
            ctx.request_repaint();
        } else {
            ctx.request_repaint_after(AMBIENT_FRAME);
        }
    }
}

fn draw_toast(ui: &egui::Ui, toast: &Toast, theme: &Theme, rect: egui::Rect, scale: f32) {
    let opacity = toast.opacity();
    if opacity <= 0.0 {
        return;
    }
    let color = Theme::with_opacity(theme.foreground, opacity);
    let galley = ui.painter().layout_no_wrap(
        toast.message.clone(),
        egui::FontId::proportional(18.0 * scale),
        color,
    );
    let pill = egui::Rect::from_center_size(
        egui::pos2(rect.center().x, rect.top() + 48.0 * scale),
        galley.rect.size() + egui::vec2(40.0, 18.0) * scale,
    );
    ui.painter().rect_filled(
        pill,
        pill.height() / 2.0,
        Theme::with_opacity(theme.panel, opacity * 0.8),
    );
    ui.painter()
        .galley(pill.center() - galley.rect.size() / 2.0, galley, color);
}

/// Shortcut help as a row of key badges above the indicator dots, wrapping
/// onto extra rows when the window is narrow.
fn draw_hud(ui: &egui::Ui, theme: &Theme, rect: egui::Rect, scale: f32) {
    let painter = ui.painter();
    let font = egui::FontId::proportional(14.0 * scale);
    let key_font = egui::FontId::monospace(13.0 * scale);
    let gap = 18.0 * scale;
    let row_height = 30.0 * scale;
    let max_width = rect.width() - 120.0 * scale;

    let items: Vec<_> = SHORTCUTS
        .iter()
        .map(|(key, label)| {
            let key = painter.layout_no_wrap(key.to_string(), key_font.clone(), theme.accent);
            let label = painter.layout_no_wrap(label.to_string(), font.clone(), theme.foreground);
            let width = key.rect.width() + 12.0 * scale + 6.0 * scale + label.rect.width();
            (key, label, width)
        })
        .collect();

    let mut rows: Vec<Vec<usize>> = vec![Vec::new()];
    let mut row_width = 0.0;
    for (i, (_, _, width)) in items.iter().enumerate() {
        let extra = if row_width > 0.0 { gap + width } else { *width };
        if row_width > 0.0 && row_width + extra > max_width {
            rows.push(Vec::new());
            row_width = *width;
        } else {
            row_width += extra;
        }
        if let Some(row) = rows.last_mut() {
            row.push(i);
        }
    }

    let band_height = rows.len() as f32 * row_height + 16.0 * scale;
    let band = egui::Rect::from_min_max(
        egui::pos2(rect.left(), rect.bottom() - 80.0 * scale - band_height),
        egui::pos2(rect.right(), rect.bottom() - 80.0 * scale),
    );
    painter.rect_filled(band, 0.0, Theme::with_opacity(theme.panel, 0.75));

    for (r, row) in rows.iter().enumerate() {
        let width: f32 =
            row.iter().map(|&i| items[i].2).sum::<f32>() + gap * row.len().saturating_sub(1) as f32;
        let mut x = rect.center().x - width / 2.0;
        let y = band.top() + 8.0 * scale + r as f32 * row_height + row_height / 2.0;
        for &i in row {
            let (key, label, width) = &items[i];
            let badge = egui::Rect::from_min_size(
                egui::pos2(x, y - key.rect.height() / 2.0 - 3.0 * scale),
                key.rect.size() + egui::vec2(12.0, 6.0) * scale,
            );
            painter.rect_stroke(
                badge,
                4.0 * scale,
                egui::Stroke::new(1.0, Theme::with_opacity(theme.accent, 0.7)),
                egui::StrokeKind::Inside,
            );
            let label_x = badge.right() + 6.0 * scale;
            painter.galley(badge.min + egui::vec2(6.0, 3.0) * scale, key.clone(), theme.accent);
            painter.galley(
                egui::pos2(label_x, y - label.rect.height() / 2.0),
                label.clone(),
                theme.foreground,
            );
            x += width + gap;
        }
    }
}

pub fn run(file: PathBuf, windowed: bool, start_slide: Option<usize>) -> anyhow::Result<()> {
    let deck = Deck::load(&file)?;
    let config = Config::load_or_default();
    let windowed = windowed || config.windowed();

    let options = ControllerOptions {
        start_slide: start_slide.map(|s| s.saturating_sub(1)).unwrap_or(0),
        motifs: config.motifs(),
        seed: None,
    };
    let controller = Controller::new(deck.len(), options)?;
    let theme = Theme::from_name(config.theme());

    let title = format!("{} \u{2014} aquadeck", deck.title);
    log::info!(
        "presenting {} ({} slides, {})",
        file.display(),
        deck.len(),
        if windowed { "windowed" } else { "fullscreen" }
    );

    let viewport = if windowed {
        egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title(&title)
    } else {
        egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_title(&title)
    };

    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        &title,
        native_options,
        Box::new(move |_cc| Ok(Box::new(PresentationApp::new(deck, controller, theme)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
