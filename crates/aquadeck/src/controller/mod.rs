pub mod effects;
pub mod hook;
pub mod input;
pub mod navigation;
pub mod particles;
pub mod scene;
pub mod scheduler;

use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;

use effects::TransitionEmitter;
use hook::MotifHook;
use input::{Affordance, Intent, Key, SwipeTracker};
use navigation::{Navigator, SlideObserver};
use particles::ParticlePool;
use scene::Scene;
use scheduler::{Scheduler, Task};

#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("cannot present an empty deck")]
    NoSlides,
}

/// The render surface together with the clock that drives its deferred
/// updates.
#[derive(Debug)]
pub struct Stage {
    pub scene: Scene,
    pub timers: Scheduler,
}

impl Stage {
    pub fn new(slide_count: usize, motif_count: usize) -> Self {
        Self {
            scene: Scene::new(slide_count, motif_count),
            timers: Scheduler::new(),
        }
    }

    /// Advance the clock and apply every due element update. Tasks that need
    /// more than the scene (pool maintenance) are handed back.
    pub fn run(&mut self, dt: Duration) -> Vec<Task> {
        let now = self.timers.now() + dt;
        let mut unhandled = Vec::new();
        for task in self.timers.advance(dt) {
            match task {
                Task::SetOpacity { id, milli } => {
                    if !self.scene.set_opacity(id, f32::from(milli) / 1000.0, now) {
                        log::trace!("opacity update for removed element {id:?}");
                    }
                }
                Task::Remove(id) => {
                    if !self.scene.remove(id) {
                        log::trace!("element {id:?} already removed");
                    }
                }
                Task::PoolMaintenance => unhandled.push(task),
            }
        }
        unhandled
    }
}

#[derive(Debug, Clone)]
pub struct ControllerOptions {
    /// Slide shown first, zero-based. Clamped into range.
    pub start_slide: usize,
    pub motifs: usize,
    /// Fixed seed for the particle generators. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            start_slide: 0,
            motifs: 5,
            seed: None,
        }
    }
}

/// Slide navigation and transition controller.
///
/// All input channels funnel into [`Controller::dispatch`]; all timing is
/// driven by [`Controller::tick`].
pub struct Controller {
    stage: Stage,
    navigator: Navigator,
    swipe: SwipeTracker,
    pool: ParticlePool,
}

impl Controller {
    pub fn new(slide_count: usize, options: ControllerOptions) -> Result<Self, InitError> {
        if slide_count == 0 {
            return Err(InitError::NoSlides);
        }

        let (emitter_rng, pool_rng) = match options.seed {
            Some(seed) => (
                StdRng::seed_from_u64(seed),
                StdRng::seed_from_u64(seed.wrapping_add(1)),
            ),
            None => (StdRng::from_entropy(), StdRng::from_entropy()),
        };

        let mut stage = Stage::new(slide_count, options.motifs);
        let mut navigator = Navigator::new(slide_count, TransitionEmitter::new(emitter_rng));
        navigator.subscribe(Box::new(MotifHook));

        let mut pool = ParticlePool::new(pool_rng);
        pool.start(&mut stage);
        let start = isize::try_from(options.start_slide).unwrap_or(isize::MAX);
        navigator.start(start, &mut stage);

        log::info!(
            "controller ready: {} slides, starting at {}",
            slide_count,
            navigator.current() + 1
        );

        Ok(Self {
            stage,
            navigator,
            swipe: SwipeTracker::default(),
            pool,
        })
    }

    /// Register another observer of active slide changes.
    pub fn subscribe(&mut self, observer: Box<dyn SlideObserver>) {
        self.navigator.subscribe(observer);
    }

    pub fn current(&self) -> usize {
        self.navigator.current()
    }

    pub fn total(&self) -> usize {
        self.navigator.total()
    }

    pub fn scene(&self) -> &Scene {
        &self.stage.scene
    }

    pub fn now(&self) -> Duration {
        self.stage.timers.now()
    }

    pub fn particle_population(&self) -> usize {
        self.pool.population()
    }

    /// Programmatic navigation entry point. Out-of-range indices clamp.
    pub fn go_to(&mut self, index: isize) {
        self.navigator.go_to(index, &mut self.stage);
    }

    pub fn next(&mut self) {
        self.navigator.next(&mut self.stage);
    }

    pub fn previous(&mut self) {
        self.navigator.previous(&mut self.stage);
    }

    pub fn dispatch(&mut self, intent: Intent) {
        match intent {
            Intent::Next => self.next(),
            Intent::Previous => self.previous(),
            Intent::GoTo(index) => self.go_to(index),
            Intent::Last => self.navigator.last(&mut self.stage),
        }
    }

    /// Handle a navigation key. Returns whether the key's default behaviour
    /// should be suppressed.
    pub fn key(&mut self, key: Key) -> bool {
        let response = input::key_response(key);
        self.dispatch(response.intent);
        response.suppress_default
    }

    pub fn click(&mut self, target: Affordance) {
        self.dispatch(input::click_intent(target));
    }

    pub fn touch_start(&mut self, x: f32, y: f32) {
        self.swipe.begin(x, y);
    }

    pub fn touch_end(&mut self, x: f32, y: f32) {
        if let Some(intent) = self.swipe.end(x, y) {
            self.dispatch(intent);
        }
    }

    /// Advance the controller clock by one frame.
    pub fn tick(&mut self, dt: Duration) {
        for task in self.stage.run(dt) {
            if task == Task::PoolMaintenance {
                self.pool.maintain(&mut self.stage);
            }
        }
    }

    /// True while transition effects are still in flight.
    pub fn is_animating(&self) -> bool {
        self.stage.scene.count_in(scene::Layer::Overlay) > 0
            || self.stage.scene.count_in(scene::Layer::Burst) > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scene::Layer;

    fn controller(total: usize) -> Controller {
        Controller::new(
            total,
            ControllerOptions {
                seed: Some(3),
                ..Default::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn test_empty_deck_is_rejected() {
        assert!(matches!(
            Controller::new(0, ControllerOptions::default()),
            Err(InitError::NoSlides)
        ));
    }

    #[test]
    fn test_startup_state() {
        let c = controller(5);
        assert_eq!(c.current(), 0);
        assert_eq!(c.particle_population(), particles::SEED_COUNT);
        assert!(!c.is_animating());
        assert!(c.scene().motifs().iter().all(|m| m.running));
    }

    #[test]
    fn test_start_slide_is_clamped() {
        let c = Controller::new(
            3,
            ControllerOptions {
                start_slide: 10,
                seed: Some(1),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(c.current(), 2);
        assert_eq!(c.scene().strip_offset(), -2.0);
    }

    #[test]
    fn test_huge_start_slide_clamps_to_last() {
        let c = Controller::new(
            3,
            ControllerOptions {
                start_slide: usize::MAX - 1,
                seed: Some(1),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(c.current(), 2);
    }

    #[test]
    fn test_motifs_swim_when_starting_past_first_slide() {
        let mut c = Controller::new(
            4,
            ControllerOptions {
                start_slide: 2,
                seed: Some(5),
                ..Default::default()
            },
        )
        .unwrap();
        let swimming = |c: &Controller| c.scene().motifs().iter().all(|m| m.running);
        assert!(swimming(&c));
        assert!(c.scene().motifs().iter().all(|m| m.filter == scene::MotifFilter::Mild));

        c.next();
        c.previous();
        assert!(swimming(&c));
    }

    #[test]
    fn test_swipes_from_second_slide() {
        let mut c = controller(5);
        c.go_to(1);
        c.touch_start(300.0, 200.0);
        c.touch_end(240.0, 205.0);
        assert_eq!(c.current(), 2);

        let mut c = controller(5);
        c.go_to(1);
        c.touch_start(300.0, 200.0);
        c.touch_end(360.0, 205.0);
        assert_eq!(c.current(), 0);
    }

    #[test]
    fn test_vertical_gesture_does_not_navigate() {
        let mut c = controller(5);
        c.go_to(1);
        c.touch_start(300.0, 200.0);
        c.touch_end(330.0, 240.0);
        assert_eq!(c.current(), 1);
    }

    #[test]
    fn test_home_and_end() {
        let mut c = controller(5);
        c.go_to(2);
        assert!(!c.key(Key::End));
        assert_eq!(c.current(), 4);
        assert!(!c.key(Key::Home));
        assert_eq!(c.current(), 0);
        assert!(c.key(Key::PageDown));
        assert_eq!(c.current(), 1);
    }

    #[test]
    fn test_indicator_click() {
        let mut c = controller(5);
        c.click(Affordance::Indicator(3));
        assert_eq!(c.current(), 3);
        assert_eq!(c.scene().indicators().iter().filter(|d| **d).count(), 1);
        c.click(Affordance::Previous);
        assert_eq!(c.current(), 2);
    }

    #[test]
    fn test_overlay_appears_then_disappears() {
        let mut c = controller(5);
        c.next();
        let overlay = c
            .scene()
            .elements()
            .find(|(_, el)| el.layer == Layer::Overlay)
            .map(|(id, _)| id)
            .unwrap();

        assert_eq!(c.scene().get(overlay).unwrap().opacity, 0.0);
        c.tick(Duration::from_millis(16));
        assert_eq!(c.scene().get(overlay).unwrap().opacity, 1.0);
        c.tick(Duration::from_millis(500));
        assert_eq!(c.scene().get(overlay).unwrap().opacity, 0.0);
        c.tick(Duration::from_millis(500));
        assert!(c.scene().get(overlay).is_none());
    }

    #[test]
    fn test_rapid_navigation_leaves_nothing_behind() {
        let mut c = controller(5);
        for _ in 0..20 {
            c.next();
            c.tick(Duration::from_millis(30));
        }
        assert_eq!(c.scene().count_in(Layer::Overlay), 20);
        c.tick(Duration::from_secs(3));
        assert!(!c.is_animating());
    }

    #[test]
    fn test_maintenance_runs_on_interval() {
        let mut c = controller(2);
        c.tick(Duration::from_millis(5999));
        assert_eq!(c.particle_population(), particles::SEED_COUNT);
        c.tick(Duration::from_millis(1));
        assert_eq!(c.particle_population(), particles::SEED_COUNT + particles::REFILL_COUNT);
    }

    #[test]
    fn test_navigation_does_not_touch_ambient_pool() {
        let mut c = controller(4);
        c.next();
        c.next();
        assert_eq!(c.scene().count_in(Layer::Ambient), particles::SEED_COUNT);
    }
}
