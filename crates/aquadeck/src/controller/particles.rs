use std::collections::VecDeque;
use std::time::Duration;

use rand::Rng;
use rand::rngs::StdRng;

use super::Stage;
use super::scene::{Bubble, ElementId, ElementKind, Layer};
use super::scheduler::Task;

pub const SEED_COUNT: usize = 26;
pub const MAINTENANCE_INTERVAL: Duration = Duration::from_secs(6);
/// Population above which a maintenance tick culls. Soft: spawns between
/// ticks may push the pool past it.
pub const SOFT_CAP: usize = 60;
pub const CULL_COUNT: usize = 12;
pub const REFILL_COUNT: usize = 6;

/// Ambient bubble field behind the slides.
///
/// Tracks bubbles in insertion order only; "oldest" means first spawned.
#[derive(Debug)]
pub struct ParticlePool {
    order: VecDeque<ElementId>,
    rng: StdRng,
}

impl ParticlePool {
    pub fn new(rng: StdRng) -> Self {
        Self {
            order: VecDeque::new(),
            rng,
        }
    }

    /// Seed the field and install the recurring maintenance tick.
    pub fn start(&mut self, stage: &mut Stage) {
        self.spawn(stage, SEED_COUNT);
        stage
            .timers
            .every(MAINTENANCE_INTERVAL, Task::PoolMaintenance);
    }

    pub fn population(&self) -> usize {
        self.order.len()
    }

    pub fn spawn(&mut self, stage: &mut Stage, count: usize) {
        let now = stage.timers.now();
        for _ in 0..count {
            let bubble = Bubble {
                left: self.rng.gen_range(0.0..100.0),
                size: self.rng.gen_range(6.0..34.0),
                duration: Duration::from_secs_f32(self.rng.gen_range(6.0..20.0)),
            };
            let opacity = self.rng.gen_range(0.7..1.0);
            let id = stage.scene.append(
                Layer::Ambient,
                None,
                ElementKind::Bubble(bubble),
                opacity,
                now,
            );
            self.order.push_back(id);
        }
    }

    /// One maintenance tick: cull the oldest batch when over the soft cap,
    /// then top up.
    pub fn maintain(&mut self, stage: &mut Stage) {
        self.order.retain(|id| stage.scene.contains(*id));

        let before = self.order.len();
        if before > SOFT_CAP {
            for id in self.order.drain(..CULL_COUNT) {
                stage.scene.remove(id);
            }
        }
        self.spawn(stage, REFILL_COUNT);

        log::trace!(
            "particle pool maintenance: {} -> {}",
            before,
            self.order.len()
        );
    }
}
