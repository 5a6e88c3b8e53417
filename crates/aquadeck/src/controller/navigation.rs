use super::Stage;
use super::effects::TransitionEmitter;
use super::scene::Scene;

/// Why the active slide designation was (re)applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeCause {
    /// Initial render. No transition effects are emitted.
    Startup,
    Navigation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideChange {
    pub previous: Option<usize>,
    pub current: usize,
    pub cause: ChangeCause,
}

/// Receives a notification after every render of the active slide,
/// including navigation that lands on the slide that was already current.
pub trait SlideObserver {
    fn slide_changed(&mut self, change: &SlideChange, scene: &mut Scene);
}

/// Owner of the current slide index and sole writer of the active slide.
pub struct Navigator {
    current: usize,
    total: usize,
    started: bool,
    emitter: TransitionEmitter,
    observers: Vec<Box<dyn SlideObserver>>,
}

impl Navigator {
    /// `total` must be at least one.
    pub fn new(total: usize, emitter: TransitionEmitter) -> Self {
        debug_assert!(total > 0, "navigator needs at least one slide");
        Self {
            current: 0,
            total,
            started: false,
            emitter,
            observers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, observer: Box<dyn SlideObserver>) {
        self.observers.push(observer);
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn clamp(&self, index: isize) -> usize {
        let last = self.total.saturating_sub(1);
        if index < 0 {
            0
        } else {
            (index as usize).min(last)
        }
    }

    /// Apply the initial render at `index` without transition effects.
    pub fn start(&mut self, index: isize, stage: &mut Stage) {
        self.current = self.clamp(index);
        self.started = true;
        self.render(stage);
        self.notify(None, ChangeCause::Startup, &mut stage.scene);
    }

    /// Move to `index`, clamped into range.
    ///
    /// Always re-renders and always emits transition effects, even when the
    /// clamped index equals the current one.
    pub fn go_to(&mut self, index: isize, stage: &mut Stage) {
        let previous = self.started.then_some(self.current);
        self.current = self.clamp(index);
        self.started = true;
        log::debug!(
            "navigate: requested {index}, now {} of {}",
            self.current + 1,
            self.total
        );

        self.render(stage);
        self.notify(previous, ChangeCause::Navigation, &mut stage.scene);
        self.emitter.emit(stage);
    }

    pub fn next(&mut self, stage: &mut Stage) {
        self.go_to(self.current as isize + 1, stage);
    }

    pub fn previous(&mut self, stage: &mut Stage) {
        self.go_to(self.current as isize - 1, stage);
    }

    pub fn last(&mut self, stage: &mut Stage) {
        self.go_to(self.total as isize - 1, stage);
    }

    fn render(&self, stage: &mut Stage) {
        let scene = &mut stage.scene;
        for i in 0..self.total {
            scene.set_indicator_active(i, i == self.current);
            scene.set_slide_active(i, i == self.current);
        }
        scene.set_strip_offset(-(self.current as f32));
        scene.focus_slide(self.current);
    }

    fn notify(&mut self, previous: Option<usize>, cause: ChangeCause, scene: &mut Scene) {
        let change = SlideChange {
            previous,
            current: self.current,
            cause,
        };
        for observer in &mut self.observers {
            observer.slide_changed(&change, scene);
        }
    }
}
