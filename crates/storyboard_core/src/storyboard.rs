//! Ordered collections of scenes.

use crate::Scene;
use serde::{Deserialize, Serialize};

/// Ordered scenes from one script analysis.
///
/// Order is the order analysis returned; the storyboard is mutated in place
/// one scene at a time and never reordered. Restarting analysis replaces it.
///
/// # Examples
///
/// ```
/// use storyboard_core::{Scene, Storyboard};
///
/// let storyboard = Storyboard::new(vec![
///     Scene::new(1, "Arrival.", "A train pulls into a snowy station."),
///     Scene::new(2, "Meeting.", "Two strangers shake hands on the platform."),
/// ]);
///
/// assert_eq!(storyboard.len(), 2);
/// assert_eq!(storyboard.pending_indices(), vec![0, 1]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Storyboard {
    scenes: Vec<Scene>,
}

impl Storyboard {
    /// Creates a storyboard from scenes in display order.
    pub fn new(scenes: Vec<Scene>) -> Self {
        Self { scenes }
    }

    /// Number of scenes.
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Whether the storyboard has no scenes.
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Scene at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Scene> {
        self.scenes.get(index)
    }

    /// Mutable scene at `index`, if any.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Scene> {
        self.scenes.get_mut(index)
    }

    /// Scenes in display order.
    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    /// Iterates scenes in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, Scene> {
        self.scenes.iter()
    }

    /// Indices of scenes that do not have an image yet.
    pub fn pending_indices(&self) -> Vec<usize> {
        self.scenes
            .iter()
            .enumerate()
            .filter(|(_, scene)| !scene.has_image())
            .map(|(index, _)| index)
            .collect()
    }

    /// Indices of scenes with an outstanding synthesis call.
    pub fn in_flight_indices(&self) -> Vec<usize> {
        self.scenes
            .iter()
            .enumerate()
            .filter(|(_, scene)| scene.generation_in_flight())
            .map(|(index, _)| index)
            .collect()
    }
}

impl<'a> IntoIterator for &'a Storyboard {
    type Item = &'a Scene;
    type IntoIter = std::slice::Iter<'a, Scene>;

    fn into_iter(self) -> Self::IntoIter {
        self.scenes.iter()
    }
}

impl FromIterator<Scene> for Storyboard {
    fn from_iter<I: IntoIterator<Item = Scene>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
