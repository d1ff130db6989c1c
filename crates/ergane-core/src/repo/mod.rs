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

//! Contracts for the asset and scene storage backends.
//!
//! The runtime never talks to concrete storage. Hosts implement these traits
//! over whatever project database and scene graph they own; the enumeration
//! strategies only rely on the guarantees spelled out here:
//!
//! - [`AssetRepository::find_matches`] returns identifiers in an order that
//!   is stable for the duration of one enumeration.
//! - [`SceneProvider::children_of`] returns children in the host's native
//!   child order, which fixes the depth-first visit order.
//!
//! The backing store is assumed not to be mutated concurrently while a
//! single tick's advance phase runs; the single-threaded cooperative model
//! makes this automatic.

mod metadata;

pub use metadata::*;

use crate::process::{ComponentSearchType, SceneSaveMode};
use std::fmt::Debug;

/// A queryable source of flat items (assets, prefab-like containers).
pub trait AssetRepository: Send + 'static {
    /// The resolved item handle this repository hands out.
    type Handle: Clone + Send + 'static;

    /// Returns the identifiers matching a filter expression.
    ///
    /// The order is unspecified but must remain stable while one enumeration
    /// is running over the result.
    fn find_matches(&self, filter: &str) -> Vec<ItemId>;

    /// Resolves one identifier into item metadata.
    ///
    /// An identifier that no longer resolves reports metadata with
    /// `is_valid = false` rather than an error.
    fn resolve(&self, id: &ItemId) -> ItemMetadata<Self::Handle>;
}

/// A repository whose items carry attached components.
pub trait ComponentSource: AssetRepository {
    /// The component type attached to this repository's items.
    type Component: Send + 'static;

    /// Returns the components of an item selected by the search type, in a
    /// stable order.
    fn components_of(
        &self,
        handle: &Self::Handle,
        search: ComponentSearchType,
    ) -> Vec<Self::Component>;
}

/// A hierarchical scene backend: scenes, their root objects, and each
/// object's children.
pub trait SceneProvider: Send + 'static {
    /// Identifies one scene.
    type SceneId: Clone + Debug + Send + 'static;
    /// One object in a scene's hierarchy.
    type Node: Clone + Debug + Send + 'static;

    /// Returns the scenes matching a filter expression, in a stable order.
    fn find_scenes(&self, filter: &str) -> Vec<Self::SceneId>;

    /// The scene currently open in the host.
    fn current_scene(&self) -> Self::SceneId;

    /// The top-level objects of a scene, in the host's native order.
    fn root_objects(&self, scene: &Self::SceneId) -> Vec<Self::Node>;

    /// The children of an object, in the host's native child order.
    fn children_of(&self, node: &Self::Node) -> Vec<Self::Node>;

    /// Persists a scene after its full subtree was processed.
    ///
    /// Called once per scene, only after the last object in it was visited,
    /// and never with [`SceneSaveMode::None`]. How
    /// [`SceneSaveMode::PromptIfDirty`] prompts is host policy.
    fn save_scene(&mut self, scene: &Self::SceneId, mode: SceneSaveMode) -> anyhow::Result<()>;
}
