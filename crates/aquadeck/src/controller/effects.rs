use std::time::Duration;

use rand::Rng;
use rand::rngs::StdRng;

use super::Stage;
use super::scene::{Bubble, ElementId, ElementKind, Layer};
use super::scheduler::Task;

/// Opacity the shimmer overlay reaches on the frame after it is created.
pub const OVERLAY_PEAK_MILLI: u16 = 1000;
pub const OVERLAY_FADE_AFTER: Duration = Duration::from_millis(420);
pub const OVERLAY_REMOVE_AFTER: Duration = Duration::from_millis(1000);

pub const BURST_BUBBLES: usize = 8;
pub const BURST_REMOVE_AFTER: Duration = Duration::from_millis(1600);

/// Elements created for one navigation event.
#[derive(Debug, Clone, PartialEq)]
pub struct Emission {
    pub overlay: ElementId,
    pub burst: ElementId,
    pub bubbles: Vec<ElementId>,
}

/// Spawns the shimmer overlay and bubble burst that accompany every
/// navigation.
///
/// Each emission owns its own timers. Nothing is shared between emissions,
/// so rapid navigation simply overlaps them.
#[derive(Debug)]
pub struct TransitionEmitter {
    rng: StdRng,
}

impl TransitionEmitter {
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }

    pub fn emit(&mut self, stage: &mut Stage) -> Emission {
        let now = stage.timers.now();

        let overlay = stage
            .scene
            .append(Layer::Overlay, None, ElementKind::Overlay, 0.0, now);
        stage.timers.on_next_frame(Task::SetOpacity {
            id: overlay,
            milli: OVERLAY_PEAK_MILLI,
        });
        stage.timers.after(
            OVERLAY_FADE_AFTER,
            Task::SetOpacity {
                id: overlay,
                milli: 0,
            },
        );
        stage.timers.after(OVERLAY_REMOVE_AFTER, Task::Remove(overlay));

        let burst = stage
            .scene
            .append(Layer::Burst, None, ElementKind::BurstContainer, 1.0, now);
        let mut bubbles = Vec::with_capacity(BURST_BUBBLES);
        for _ in 0..BURST_BUBBLES {
            let lifetime = Duration::from_secs_f32(self.rng.gen_range(1.2..2.8));
            let bubble = Bubble {
                left: self.rng.gen_range(20.0..80.0),
                size: self.rng.gen_range(6.0..28.0),
                duration: lifetime,
            };
            let id = stage.scene.append(
                Layer::Burst,
                Some(burst),
                ElementKind::Bubble(bubble),
                1.0,
                now,
            );
            // Bubbles outliving the container go with it; this timer then
            // finds nothing to remove.
            stage.timers.after(lifetime, Task::Remove(id));
            bubbles.push(id);
        }
        stage.timers.after(BURST_REMOVE_AFTER, Task::Remove(burst));

        log::trace!(
            "transition emitted: overlay {:?}, burst {:?} ({} bubbles)",
            overlay,
            burst,
            bubbles.len()
        );

        Emission {
            overlay,
            burst,
            bubbles,
        }
    }
}
