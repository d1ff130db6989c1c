// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Value types describing the position of a running batch process within one
//! or more nested enumeration dimensions.
//!
//! These are pure data carriers: the runtime computes them, presentation
//! adapters consume them. The only behavior they carry is the arithmetic
//! needed to turn positions into normalized completion fractions.

use serde::{Deserialize, Serialize};

/// Position within a single enumeration dimension.
///
/// A position is either *indexed* (`index` out of `total` items, with a
/// fraction derived from both), *overridden* (a pre-computed fraction used
/// when several nested dimensions were already flattened into one number), or
/// not applicable at all. The three cases are mutually exclusive by
/// construction, so a consumer never has to guess which representation is
/// active.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ProgressPosition {
    /// The `index`-th item of `total`. `total` is always non-zero.
    Indexed {
        /// Zero-based index of the item currently being processed.
        index: usize,
        /// Number of items in this dimension.
        total: usize,
    },
    /// A pre-computed completion fraction in `[0, 1]`.
    Overridden(f32),
    /// This dimension does not apply to the running process.
    NotApplicable,
}

impl ProgressPosition {
    /// Creates an indexed position.
    ///
    /// A `total` of zero has no meaningful fraction, so it degrades to
    /// [`ProgressPosition::NotApplicable`].
    pub fn indexed(index: usize, total: usize) -> Self {
        if total == 0 {
            Self::NotApplicable
        } else {
            Self::Indexed { index, total }
        }
    }

    /// Creates an overridden position from a pre-computed fraction.
    ///
    /// The fraction is clamped to `[0, 1]`.
    pub fn overridden(fraction: f32) -> Self {
        Self::Overridden(fraction.clamp(0.0, 1.0))
    }

    /// Normalized completion fraction for this dimension.
    ///
    /// Indexed positions report `(index + 1) / total`, reaching exactly `1.0`
    /// on the last item. Returns `None` when the dimension does not apply.
    pub fn fraction(&self) -> Option<f32> {
        match self {
            Self::Indexed { index, total } => Some((*index as f32 + 1.0) / *total as f32),
            Self::Overridden(fraction) => Some(*fraction),
            Self::NotApplicable => None,
        }
    }

    /// The zero-based index, when this position is indexed.
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Indexed { index, .. } => Some(*index),
            _ => None,
        }
    }

    /// The item count of this dimension, when this position is indexed.
    pub fn total(&self) -> Option<usize> {
        match self {
            Self::Indexed { total, .. } => Some(*total),
            _ => None,
        }
    }

    /// Returns `true` unless the dimension is [`ProgressPosition::NotApplicable`].
    pub fn is_applicable(&self) -> bool {
        !matches!(self, Self::NotApplicable)
    }
}

/// Progress of a process enumerating across nested dimensions.
///
/// Scene-tree traversal reports up to three dimensions (scene, root within
/// the scene, object within the tree); flat traversals fill only the object
/// dimension. `total` is the flattened completion fraction across all active
/// dimensions and is what progress bars should display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HierarchicalProgress {
    /// Position within the set of scenes being processed.
    pub scenes: ProgressPosition,
    /// Position within the current scene's root objects.
    pub roots: ProgressPosition,
    /// Position within a flat object or item list.
    pub objects: ProgressPosition,
    /// Flattened completion fraction across all active dimensions.
    pub total: f32,
}

impl HierarchicalProgress {
    /// Progress for a flat, single-dimension enumeration.
    pub fn from_position(position: ProgressPosition) -> Self {
        Self {
            scenes: ProgressPosition::NotApplicable,
            roots: ProgressPosition::NotApplicable,
            total: position.fraction().unwrap_or(0.0),
            objects: position,
        }
    }

    /// Progress for a root-based scene traversal.
    ///
    /// The flattened fraction advances root-by-root within a scene before the
    /// scene counter advances; see [`HierarchicalProgress::linearize`].
    pub fn from_roots(
        current_scene: usize,
        scene_count: usize,
        current_root: usize,
        root_count: usize,
    ) -> Self {
        Self {
            scenes: ProgressPosition::indexed(current_scene, scene_count),
            roots: ProgressPosition::indexed(current_root, root_count),
            objects: ProgressPosition::NotApplicable,
            total: Self::linearize(current_root, root_count, current_scene, scene_count),
        }
    }

    /// Flattens a (scene, root) pair into one completion fraction.
    ///
    /// Computed as `(current_root + current_scene * root_count) /
    /// (root_count * scene_count)`. This linearization advances root-by-root
    /// within a scene before advancing the scene counter, so a traversal that
    /// visits roots in that order reports a non-decreasing fraction even when
    /// scenes have different root counts. Zero-sized dimensions report `0.0`.
    pub fn linearize(
        current_root: usize,
        root_count: usize,
        current_scene: usize,
        scene_count: usize,
    ) -> f32 {
        if root_count == 0 || scene_count == 0 {
            return 0.0;
        }
        (current_root as f32 + (current_scene * root_count) as f32)
            / (root_count * scene_count) as f32
    }
}

/// Monotonic clamp over a stream of completion fractions.
///
/// Blocking-mode progress surfaces redraw after every item, and a traversal
/// crossing a dimension boundary can momentarily report a smaller local
/// fraction. Feeding the stream through a `HighWater` keeps the displayed
/// value at the maximum observed so far, so progress never appears to move
/// backward.
#[derive(Debug, Default, Clone, Copy)]
pub struct HighWater(f32);

impl HighWater {
    /// Creates a high-water mark starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one fraction into the mark and returns the value to display.
    pub fn observe(&mut self, fraction: f32) -> f32 {
        if fraction > self.0 {
            self.0 = fraction;
        }
        self.0
    }

    /// The maximum fraction observed so far.
    pub fn value(&self) -> f32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn indexed_fraction_matches_definition() {
        for total in 1..=7usize {
            for index in 0..total {
                let position = ProgressPosition::indexed(index, total);
                let expected = (index as f32 + 1.0) / total as f32;
                assert_relative_eq!(position.fraction().unwrap(), expected);
            }
        }
    }

    #[test]
    fn indexed_fraction_is_strictly_increasing_and_ends_at_one() {
        let total = 12;
        let mut previous = 0.0;
        for index in 0..total {
            let fraction = ProgressPosition::indexed(index, total).fraction().unwrap();
            assert!(fraction > previous, "fraction must strictly increase");
            previous = fraction;
        }
        assert_relative_eq!(previous, 1.0);
    }

    #[test]
    fn zero_total_is_not_applicable() {
        let position = ProgressPosition::indexed(0, 0);
        assert!(!position.is_applicable());
        assert_eq!(position.fraction(), None);
        assert_eq!(position.index(), None);
        assert_eq!(position.total(), None);
    }

    #[test]
    fn overridden_ignores_index_and_total() {
        let position = ProgressPosition::overridden(0.25);
        assert_relative_eq!(position.fraction().unwrap(), 0.25);
        assert_eq!(position.index(), None);
        assert_eq!(position.total(), None);
    }

    #[test]
    fn overridden_is_clamped_to_unit_interval() {
        assert_relative_eq!(ProgressPosition::overridden(1.5).fraction().unwrap(), 1.0);
        assert_relative_eq!(ProgressPosition::overridden(-0.5).fraction().unwrap(), 0.0);
    }

    #[test]
    fn linearized_fraction_is_non_decreasing_across_scene_boundaries() {
        // Two scenes with different root counts. The fraction at the start of
        // scene 1 must not fall below the fraction at the end of scene 0.
        let root_counts = [3usize, 5usize];
        let scene_count = root_counts.len();
        let mut previous = 0.0;
        for (scene, &root_count) in root_counts.iter().enumerate() {
            for root in 0..root_count {
                let total =
                    HierarchicalProgress::linearize(root, root_count, scene, scene_count);
                assert!(
                    total >= previous,
                    "progress went backward: {total} < {previous} at scene {scene} root {root}"
                );
                previous = total;
            }
        }
    }

    #[test]
    fn flat_progress_mirrors_its_object_position() {
        let progress = HierarchicalProgress::from_position(ProgressPosition::indexed(4, 10));
        assert!(!progress.scenes.is_applicable());
        assert!(!progress.roots.is_applicable());
        assert_relative_eq!(progress.total, 0.5);
    }

    #[test]
    fn high_water_never_regresses() {
        let mut mark = HighWater::new();
        assert_relative_eq!(mark.observe(0.3), 0.3);
        assert_relative_eq!(mark.observe(0.1), 0.3);
        assert_relative_eq!(mark.observe(0.7), 0.7);
        assert_relative_eq!(mark.value(), 0.7);
    }
}
