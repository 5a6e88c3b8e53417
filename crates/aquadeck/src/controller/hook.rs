use super::navigation::{SlideChange, SlideObserver};
use super::scene::{MotifFilter, Scene};

/// Per-slide cosmetic tweaks to the fish motifs.
///
/// The opening slide gets the heavier shadow and makes sure the fish are
/// swimming; every other slide gets the milder shadow.
#[derive(Debug, Default)]
pub struct MotifHook;

impl SlideObserver for MotifHook {
    fn slide_changed(&mut self, change: &SlideChange, scene: &mut Scene) {
        let opening = change.current == 0;
        for motif in scene.motifs_mut() {
            if opening {
                motif.filter = MotifFilter::Intense;
                motif.running = true;
            } else {
                motif.filter = MotifFilter::Mild;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::navigation::ChangeCause;

    fn change(current: usize) -> SlideChange {
        SlideChange {
            previous: None,
            current,
            cause: ChangeCause::Navigation,
        }
    }

    #[test]
    fn test_opening_slide_intensifies_and_runs() {
        let mut scene = Scene::new(3, 4);
        MotifHook.slide_changed(&change(0), &mut scene);
        assert!(
            scene
                .motifs()
                .iter()
                .all(|m| m.filter == MotifFilter::Intense && m.running)
        );
    }

    #[test]
    fn test_other_slides_soften_but_keep_running() {
        let mut scene = Scene::new(3, 2);
        MotifHook.slide_changed(&change(0), &mut scene);
        MotifHook.slide_changed(&change(2), &mut scene);
        assert!(
            scene
                .motifs()
                .iter()
                .all(|m| m.filter == MotifFilter::Mild && m.running)
        );
    }

    #[test]
    fn test_no_motifs_is_fine() {
        let mut scene = Scene::new(3, 0);
        MotifHook.slide_changed(&change(1), &mut scene);
        assert!(scene.motifs().is_empty());
    }
}
