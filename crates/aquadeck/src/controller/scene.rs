use std::collections::BTreeMap;
use std::time::Duration;

/// Handle to an element in the scene. Ids are never reused, so a stale id
/// simply stops resolving once its element is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub u64);

/// Where an element lives. Painted bottom to top in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    /// Full-window ambient bubble field behind the slides.
    Ambient,
    /// Shimmer overlay above the slides.
    Overlay,
    /// Transition burst containers and their bubbles, above the overlay.
    Burst,
}

/// Visual parameters of one bubble. Positions are relative so the styling
/// layer can lay them out against any surface size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bubble {
    /// Horizontal position in percent of the containing width.
    pub left: f32,
    /// Diameter in logical pixels.
    pub size: f32,
    /// Length of one rise-and-fade cycle.
    pub duration: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ElementKind {
    Bubble(Bubble),
    Overlay,
    BurstContainer,
}

#[derive(Debug, Clone)]
pub struct Element {
    pub kind: ElementKind,
    pub layer: Layer,
    pub parent: Option<ElementId>,
    pub created_at: Duration,
    pub opacity: f32,
    /// Opacity before the last change, for eased rendering.
    pub previous_opacity: f32,
    pub opacity_changed_at: Duration,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlideState {
    pub active: bool,
    /// Reachable by keyboard focus. Set the first time a slide is shown.
    pub tab_stop: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotifFilter {
    Mild,
    Intense,
}

/// A decorative fish drifting across the background.
#[derive(Debug, Clone, PartialEq)]
pub struct Motif {
    pub filter: MotifFilter,
    pub running: bool,
}

/// Retained render surface.
///
/// Holds the signals the controller produces (active flags, indicator
/// state, strip offset, focus, motif filters) and the short-lived
/// decorative elements. The painter reads it; it never interprets visuals.
#[derive(Debug, Clone)]
pub struct Scene {
    slides: Vec<SlideState>,
    indicators: Vec<bool>,
    /// Horizontal translation of the slide strip, in viewport widths.
    strip_offset: f32,
    focused: Option<usize>,
    motifs: Vec<Motif>,
    elements: BTreeMap<ElementId, Element>,
    next_id: u64,
}

impl Scene {
    pub fn new(slide_count: usize, motif_count: usize) -> Self {
        Self {
            slides: vec![SlideState::default(); slide_count],
            indicators: vec![false; slide_count],
            strip_offset: 0.0,
            focused: None,
            motifs: vec![
                Motif {
                    filter: MotifFilter::Mild,
                    running: true,
                };
                motif_count
            ],
            elements: BTreeMap::new(),
            next_id: 1,
        }
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn slides(&self) -> &[SlideState] {
        &self.slides
    }

    pub fn set_slide_active(&mut self, index: usize, active: bool) {
        if let Some(slide) = self.slides.get_mut(index) {
            slide.active = active;
        }
    }

    /// Move keyboard focus to a slide. Focus never scrolls the strip; only
    /// `set_strip_offset` does.
    pub fn focus_slide(&mut self, index: usize) {
        if let Some(slide) = self.slides.get_mut(index) {
            slide.tab_stop = true;
            self.focused = Some(index);
        }
    }

    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    pub fn indicators(&self) -> &[bool] {
        &self.indicators
    }

    pub fn set_indicator_active(&mut self, index: usize, active: bool) {
        if let Some(dot) = self.indicators.get_mut(index) {
            *dot = active;
        }
    }

    pub fn strip_offset(&self) -> f32 {
        self.strip_offset
    }

    pub fn set_strip_offset(&mut self, offset: f32) {
        self.strip_offset = offset;
    }

    pub fn motifs(&self) -> &[Motif] {
        &self.motifs
    }

    pub fn motifs_mut(&mut self) -> &mut [Motif] {
        &mut self.motifs
    }

    pub fn append(
        &mut self,
        layer: Layer,
        parent: Option<ElementId>,
        kind: ElementKind,
        opacity: f32,
        now: Duration,
    ) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        self.elements.insert(
            id,
            Element {
                kind,
                layer,
                parent,
                created_at: now,
                opacity,
                previous_opacity: opacity,
                opacity_changed_at: now,
            },
        );
        id
    }

    /// Returns `false` if the element no longer exists.
    pub fn set_opacity(&mut self, id: ElementId, opacity: f32, now: Duration) -> bool {
        match self.elements.get_mut(&id) {
            Some(el) => {
                el.previous_opacity = el.opacity;
                el.opacity = opacity;
                el.opacity_changed_at = now;
                true
            }
            None => false,
        }
    }

    /// Remove an element and everything parented to it.
    ///
    /// Removing an element that is already gone is a no-op that returns
    /// `false`.
    pub fn remove(&mut self, id: ElementId) -> bool {
        if self.elements.remove(&id).is_none() {
            return false;
        }
        let children: Vec<ElementId> = self
            .elements
            .iter()
            .filter(|(_, el)| el.parent == Some(id))
            .map(|(child, _)| *child)
            .collect();
        for child in children {
            self.remove(child);
        }
        true
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    /// All elements in insertion order.
    pub fn elements(&self) -> impl Iterator<Item = (ElementId, &Element)> {
        self.elements.iter().map(|(id, el)| (*id, el))
    }

    pub fn children(&self, parent: ElementId) -> impl Iterator<Item = (ElementId, &Element)> {
        self.elements()
            .filter(move |(_, el)| el.parent == Some(parent))
    }

    pub fn count_in(&self, layer: Layer) -> usize {
        self.elements.values().filter(|el| el.layer == layer).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bubble() -> ElementKind {
        ElementKind::Bubble(Bubble {
            left: 50.0,
            size: 10.0,
            duration: Duration::from_secs(2),
        })
    }

    #[test]
    fn test_remove_cascades_to_children() {
        let mut scene = Scene::new(3, 0);
        let now = Duration::ZERO;
        let burst = scene.append(Layer::Burst, None, ElementKind::BurstContainer, 1.0, now);
        let a = scene.append(Layer::Burst, Some(burst), bubble(), 1.0, now);
        let b = scene.append(Layer::Burst, Some(burst), bubble(), 1.0, now);

        assert!(scene.remove(burst));
        assert!(!scene.contains(a));
        assert!(!scene.contains(b));
        assert_eq!(scene.count_in(Layer::Burst), 0);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut scene = Scene::new(1, 0);
        let id = scene.append(Layer::Overlay, None, ElementKind::Overlay, 0.0, Duration::ZERO);
        assert!(scene.remove(id));
        assert!(!scene.remove(id));
        assert!(!scene.set_opacity(id, 1.0, Duration::ZERO));
    }

    #[test]
    fn test_set_opacity_remembers_previous() {
        let mut scene = Scene::new(1, 0);
        let id = scene.append(Layer::Overlay, None, ElementKind::Overlay, 0.0, Duration::ZERO);
        scene.set_opacity(id, 1.0, Duration::from_millis(16));
        let el = scene.get(id).unwrap();
        assert_eq!(el.previous_opacity, 0.0);
        assert_eq!(el.opacity, 1.0);
        assert_eq!(el.opacity_changed_at, Duration::from_millis(16));
    }

    #[test]
    fn test_out_of_range_slide_updates_are_ignored() {
        let mut scene = Scene::new(2, 0);
        scene.set_slide_active(5, true);
        scene.set_indicator_active(5, true);
        scene.focus_slide(5);
        assert!(scene.slides().iter().all(|s| !s.active));
        assert!(scene.indicators().iter().all(|d| !d));
        assert_eq!(scene.focused(), None);
    }

    #[test]
    fn test_elements_iterate_in_insertion_order() {
        let mut scene = Scene::new(1, 0);
        let ids: Vec<ElementId> = (0..4)
            .map(|_| scene.append(Layer::Ambient, None, bubble(), 1.0, Duration::ZERO))
            .collect();
        let seen: Vec<ElementId> = scene.elements().map(|(id, _)| id).collect();
        assert_eq!(seen, ids);
    }
}
