//! The scene model.
//!
//! A [`Scene`] is an ordered collection of [`SceneElement`]s. Insertion order
//! is render order. Elements are never mutated in place: they are added,
//! removed, or replaced wholesale when the scene is rebuilt from source text.

mod element;
mod style;

use indexmap::IndexMap;
use log::trace;

pub use element::{
    AxisConfig, Domain, ElementId, ElementKind, ElementParams, ElementSpec, PlotParams,
    SceneElement, ShapeParams, TextParams,
};
pub use style::{ArrowHead, DEFAULT_LINE_WIDTH, DEFAULT_OPACITY, LineStyle, Style};

/// An ordered set of drawable elements keyed by [`ElementId`].
///
/// # Examples
///
/// ```
/// use tikzsync_core::geometry::Point;
/// use tikzsync_core::scene::{ElementSpec, Scene};
///
/// let mut scene = Scene::new();
/// let first = scene.add(ElementSpec::circle(Point::new(0.0, 0.0), 2.0));
/// let second = scene.add(ElementSpec::text(Point::new(1.0, 1.0), "A"));
///
/// assert_eq!(scene.len(), 2);
/// assert_ne!(first, second);
///
/// scene.remove(first);
/// assert_eq!(scene.len(), 1);
/// assert_eq!(scene.iter().next().map(|el| el.id()), Some(second));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Scene {
    elements: IndexMap<ElementId, SceneElement>,
    next_id: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a scene from specs, in order.
    pub fn from_specs(specs: impl IntoIterator<Item = ElementSpec>) -> Self {
        let mut scene = Self::new();
        for spec in specs {
            scene.add(spec);
        }
        scene
    }

    /// Appends an element and returns its freshly allocated id.
    pub fn add(&mut self, spec: ElementSpec) -> ElementId {
        self.next_id += 1;
        let id = ElementId::new(self.next_id);
        trace!(id:%, kind:% = spec.kind(); "Adding scene element");
        self.elements.insert(id, SceneElement::from_spec(id, spec));
        id
    }

    /// Removes an element, preserving the order of the rest.
    ///
    /// Returns the removed element, or `None` if the id is unknown.
    pub fn remove(&mut self, id: ElementId) -> Option<SceneElement> {
        let removed = self.elements.shift_remove(&id);
        trace!(id:%, found = removed.is_some(); "Removing scene element");
        removed
    }

    pub fn get(&self, id: ElementId) -> Option<&SceneElement> {
        self.elements.get(&id)
    }

    /// Iterates elements in render order.
    pub fn iter(&self) -> impl Iterator<Item = &SceneElement> {
        self.elements.values()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterates plot elements in scene order.
    pub fn plots(&self) -> impl Iterator<Item = &SceneElement> {
        self.iter().filter(|el| el.kind() == ElementKind::Plot)
    }

    /// Iterates non-plot elements in scene order.
    pub fn others(&self) -> impl Iterator<Item = &SceneElement> {
        self.iter().filter(|el| el.kind() != ElementKind::Plot)
    }

    /// Removes every element. Ids are not reused afterwards.
    pub fn clear(&mut self) {
        trace!(removed = self.elements.len(); "Clearing scene");
        self.elements.clear();
    }

    /// Replaces the whole content with new elements. Ids keep counting up.
    pub fn replace_all(&mut self, specs: impl IntoIterator<Item = ElementSpec>) {
        self.clear();
        for spec in specs {
            self.add(spec);
        }
    }

    /// Returns true if both scenes hold the same content.
    ///
    /// Non-plot elements must match pairwise in order, and plot elements must
    /// match pairwise in order. Ids and the interleaving of plots with other
    /// elements are ignored, since all plots serialize into one axis block.
    pub fn is_equivalent(&self, other: &Scene) -> bool {
        fn pairwise<'a>(
            mut a: impl Iterator<Item = &'a SceneElement>,
            mut b: impl Iterator<Item = &'a SceneElement>,
        ) -> bool {
            loop {
                match (a.next(), b.next()) {
                    (None, None) => return true,
                    (Some(x), Some(y)) if x.same_content(y) => {}
                    _ => return false,
                }
            }
        }

        pairwise(self.others(), other.others()) && pairwise(self.plots(), other.plots())
    }
}

impl<'a> IntoIterator for &'a Scene {
    type Item = &'a SceneElement;
    type IntoIter = indexmap::map::Values<'a, ElementId, SceneElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    fn plot(expr: &str) -> ElementSpec {
        ElementSpec::plot(expr, AxisConfig::default())
    }

    #[test]
    fn test_ids_are_unique_and_not_reused() {
        let mut scene = Scene::new();
        let a = scene.add(ElementSpec::circle(Point::default(), 1.0));
        scene.remove(a);
        let b = scene.add(ElementSpec::circle(Point::default(), 1.0));
        assert_ne!(a, b);

        scene.clear();
        let c = scene.add(ElementSpec::circle(Point::default(), 1.0));
        assert_ne!(b, c);
        assert_eq!(c.to_string(), "el-3");
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut scene = Scene::new();
        let a = scene.add(ElementSpec::text(Point::default(), "a"));
        let b = scene.add(ElementSpec::text(Point::default(), "b"));
        let c = scene.add(ElementSpec::text(Point::default(), "c"));

        assert!(scene.remove(b).is_some());
        assert!(scene.remove(b).is_none());

        let ids: Vec<_> = scene.iter().map(|el| el.id()).collect();
        assert_eq!(ids, vec![a, c]);
        assert!(scene.get(b).is_none());
    }

    #[test]
    fn test_partition_plots() {
        let scene = Scene::from_specs([
            plot("x"),
            ElementSpec::circle(Point::default(), 1.0),
            plot("x^2"),
        ]);

        assert_eq!(scene.plots().count(), 2);
        assert_eq!(scene.others().count(), 1);
    }

    #[test]
    fn test_replace_all() {
        let mut scene = Scene::from_specs([ElementSpec::circle(Point::default(), 1.0)]);
        scene.replace_all([
            ElementSpec::line(Point::new(0.0, 0.0), Point::new(1.0, 0.0)),
            ElementSpec::text(Point::default(), "t"),
        ]);

        assert_eq!(scene.len(), 2);
        let kinds: Vec<_> = scene.iter().map(|el| el.kind()).collect();
        assert_eq!(kinds, vec![ElementKind::Shape, ElementKind::Text]);
    }

    #[test]
    fn test_equivalence_ignores_plot_interleaving() {
        let circle = ElementSpec::circle(Point::default(), 2.0);
        let a = Scene::from_specs([plot("sin(x)"), circle.clone()]);
        let b = Scene::from_specs([circle.clone(), plot("sin(x)")]);
        assert!(a.is_equivalent(&b));

        let c = Scene::from_specs([circle, plot("cos(x)")]);
        assert!(!a.is_equivalent(&c));
    }

    #[test]
    fn test_equivalence_respects_order_and_length() {
        let a = ElementSpec::text(Point::default(), "a");
        let b = ElementSpec::text(Point::default(), "b");

        let ab = Scene::from_specs([a.clone(), b.clone()]);
        let ba = Scene::from_specs([b.clone(), a.clone()]);
        let only_a = Scene::from_specs([a]);

        assert!(ab.is_equivalent(&ab.clone()));
        assert!(!ab.is_equivalent(&ba));
        assert!(!ab.is_equivalent(&only_a));
        assert!(Scene::new().is_equivalent(&Scene::new()));
    }

    #[test]
    fn test_equivalence_compares_style() {
        let plain = ElementSpec::circle(Point::default(), 1.0);
        let dashed = plain
            .clone()
            .with_style(Style::default().with_line_style(LineStyle::Dashed));

        let a = Scene::from_specs([plain]);
        let b = Scene::from_specs([dashed]);
        assert!(!a.is_equivalent(&b));
    }
}
