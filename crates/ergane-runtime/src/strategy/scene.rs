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

//! Depth-first enumeration over scene object hierarchies.
//!
//! Three selection modes:
//!
//! - *auto roots*: every scene matched by the filter, each scene's top-level
//!   objects recursed depth-first;
//! - *manual roots*: caller-specified roots recursed depth-first, restricted
//!   to the current scene;
//! - *flat selection*: an explicit object list iterated without recursion,
//!   restricted to the current scene.
//!
//! Combining manual roots with a flat selection, or either with a scene
//! filter, is a configuration error caught before enumeration begins.
//!
//! The traversal is pre-order: a node is visited (predicate, callback,
//! visited-counter) before any of its children, and children are taken in
//! the host's native order. Recursion state lives on an explicit stack of
//! per-level child cursors, so a suspension at any depth resumes at exactly
//! the next untaken child. A scene is saved only after its full subtree
//! finished, never per-node.

use crate::step::{StepSequence, StepSignal};
use ergane_core::error::ProcessError;
use ergane_core::filter::{accept_all, NodePredicate};
use ergane_core::presentation::ProgressPresenter;
use ergane_core::process::{DoneCallback, ObjectCallback, ProcessConfig, SceneSaveMode};
use ergane_core::progress::{HierarchicalProgress, ProgressPosition};
use ergane_core::repo::SceneProvider;

/// Configuration and callbacks for one scene-object enumeration process.
///
/// `config.filter` selects the scenes to process; leave it empty to operate
/// on the scene currently open in the host. Root and selection lists carry
/// `Option<Node>` entries because hosts hand over arrays whose slots may
/// have gone stale: a `None` entry is logged and skipped, never fatal.
pub struct SceneBatchDescriptor<P: SceneProvider> {
    /// Common per-invocation configuration.
    pub config: ProcessConfig,
    /// Caller-specified roots to recurse from, instead of auto-discovery.
    pub roots: Option<Vec<Option<P::Node>>>,
    /// Explicit flat object selection, iterated without recursion.
    pub selection: Option<Vec<Option<P::Node>>>,
    /// What to do with each scene after its subtree finished.
    pub save_mode: SceneSaveMode,
    /// Selects which visited objects reach the callback.
    pub predicate: NodePredicate<P::Node>,
    /// Invoked once per matched object.
    pub on_object: Option<ObjectCallback<P::Node>>,
    /// Invoked exactly once with the final outcome.
    pub on_done: Option<DoneCallback>,
    /// Progress surface for this process; defaults to none.
    pub presenter: Option<Box<dyn ProgressPresenter>>,
}

impl<P: SceneProvider> Default for SceneBatchDescriptor<P> {
    fn default() -> Self {
        Self {
            config: ProcessConfig::default(),
            roots: None,
            selection: None,
            save_mode: SceneSaveMode::None,
            predicate: accept_all(),
            on_object: None,
            on_done: None,
            presenter: None,
        }
    }
}

impl<P: SceneProvider> SceneBatchDescriptor<P> {
    /// Fail-fast validation of the selection-mode combination.
    pub fn validate(&self) -> Result<(), ProcessError> {
        if self.roots.is_some() && self.selection.is_some() {
            return Err(ProcessError::InvalidConfiguration(
                "manual root objects and an explicit object selection cannot be combined"
                    .to_string(),
            ));
        }
        if (self.roots.is_some() || self.selection.is_some())
            && !self.config.filter.trim().is_empty()
        {
            return Err(ProcessError::InvalidConfiguration(
                "manual root objects or an explicit selection restrict processing to the \
                 current scene and cannot be combined with a scene filter"
                    .to_string(),
            ));
        }
        self.config.validate()
    }
}

/// One recursion level: the children of a visited node and a cursor into
/// them.
struct Frame<N> {
    children: Vec<N>,
    cursor: usize,
}

enum SceneMode<N> {
    /// Depth-first over roots; `None` auto-discovers each scene's roots.
    Roots(Option<Vec<Option<N>>>),
    /// Flat iteration over an explicit selection.
    Flat(Vec<Option<N>>),
}

/// Resumable state of a scene-object enumeration.
pub struct SceneEnumeration<P: SceneProvider> {
    provider: P,
    filter: String,
    mode: SceneMode<P::Node>,
    save_mode: SceneSaveMode,
    predicate: NodePredicate<P::Node>,
    on_object: Option<ObjectCallback<P::Node>>,
    config_error: Option<String>,
    scenes: Option<Vec<P::SceneId>>,
    scene_cursor: usize,
    roots: Vec<Option<P::Node>>,
    root_cursor: usize,
    stack: Vec<Frame<P::Node>>,
    visited: usize,
}

impl<P: SceneProvider> SceneEnumeration<P> {
    /// Builds the enumeration from a provider and a descriptor.
    ///
    /// The descriptor's `on_done` and `presenter` slots are the scheduler's
    /// concern and are ignored here.
    pub fn new(provider: P, descriptor: SceneBatchDescriptor<P>) -> Self {
        let config_error = descriptor.validate().err().map(|e| e.to_string());
        let mode = match descriptor.selection {
            Some(selection) => SceneMode::Flat(selection),
            None => SceneMode::Roots(descriptor.roots),
        };
        Self {
            provider,
            filter: descriptor.config.filter,
            mode,
            save_mode: descriptor.save_mode,
            predicate: descriptor.predicate,
            on_object: descriptor.on_object,
            config_error,
            scenes: None,
            scene_cursor: 0,
            roots: Vec::new(),
            root_cursor: 0,
            stack: Vec::new(),
            visited: 0,
        }
    }

    /// Number of objects visited so far, matched or not.
    pub fn visited(&self) -> usize {
        self.visited
    }

    fn scene_count(&self) -> usize {
        self.scenes.as_ref().map(Vec::len).unwrap_or(0)
    }

    /// Progress of the root whose subtree is currently being traversed.
    fn root_progress(&self, root_index: usize) -> HierarchicalProgress {
        HierarchicalProgress::from_roots(
            self.scene_cursor,
            self.scene_count(),
            root_index,
            self.roots.len(),
        )
    }

    fn visit(&mut self, node: &P::Node, progress: &HierarchicalProgress) {
        self.visited += 1;
        log::trace!("visiting {node:?}");
        if (self.predicate)(node) {
            if let Some(on_object) = &mut self.on_object {
                on_object(node, progress);
            }
        }
    }

    /// Loads the root list of the scene at `scene_cursor`.
    fn enter_scene(&mut self) {
        self.root_cursor = 0;
        self.stack.clear();
        self.roots = match (&self.mode, self.scenes.as_ref()) {
            (SceneMode::Roots(Some(manual)), _) => manual.clone(),
            (SceneMode::Roots(None), Some(scenes)) => {
                match scenes.get(self.scene_cursor) {
                    Some(scene) => self
                        .provider
                        .root_objects(scene)
                        .into_iter()
                        .map(Some)
                        .collect(),
                    None => Vec::new(),
                }
            }
            _ => Vec::new(),
        };
    }

    fn save_current_scene(&mut self) -> Result<(), String> {
        if self.save_mode == SceneSaveMode::None {
            return Ok(());
        }
        let scene = match self.scenes.as_ref().and_then(|s| s.get(self.scene_cursor)) {
            Some(scene) => scene.clone(),
            None => return Ok(()),
        };
        self.provider
            .save_scene(&scene, self.save_mode)
            .map_err(|e| format!("failed to save scene {scene:?}: {e:#}"))
    }

    /// One step of the depth-first traversal.
    fn step_roots(&mut self) -> StepSignal {
        // Descend: find the deepest level with an untaken child. Exhausted
        // levels are popped without consuming the step.
        while let Some(frame) = self.stack.last_mut() {
            if frame.cursor < frame.children.len() {
                let child = frame.children[frame.cursor].clone();
                frame.cursor += 1;
                let progress = self.root_progress(self.root_cursor.saturating_sub(1));
                self.visit(&child, &progress);
                let children = self.provider.children_of(&child);
                self.stack.push(Frame {
                    children,
                    cursor: 0,
                });
                return StepSignal::Advanced(progress);
            }
            self.stack.pop();
        }

        // Stack empty: start the next root of the current scene.
        if self.root_cursor < self.roots.len() {
            let index = self.root_cursor;
            let entry = self.roots[index].clone();
            self.root_cursor += 1;
            let progress = self.root_progress(index);
            match entry {
                Some(root) => {
                    self.visit(&root, &progress);
                    let children = self.provider.children_of(&root);
                    self.stack.push(Frame {
                        children,
                        cursor: 0,
                    });
                }
                None => {
                    log::warn!("skipping missing root object at index {index}");
                }
            }
            return StepSignal::Advanced(progress);
        }

        // Scene subtree finished: persist it, then move to the next scene.
        if let Err(message) = self.save_current_scene() {
            return StepSignal::Aborted(message);
        }
        self.scene_cursor += 1;
        if self.scene_cursor < self.scene_count() {
            self.enter_scene();
            let boundary = HierarchicalProgress::from_roots(
                self.scene_cursor,
                self.scene_count(),
                0,
                self.roots.len().max(1),
            );
            return StepSignal::Advanced(boundary);
        }
        StepSignal::Done
    }

    /// One step of the flat-selection iteration.
    fn step_flat(&mut self) -> StepSignal {
        let selection_len = match &self.mode {
            SceneMode::Flat(selection) => selection.len(),
            _ => 0,
        };

        if self.root_cursor < selection_len {
            let index = self.root_cursor;
            let entry = match &self.mode {
                SceneMode::Flat(selection) => selection[index].clone(),
                _ => None,
            };
            self.root_cursor += 1;
            let position = ProgressPosition::indexed(index, selection_len);
            let progress = HierarchicalProgress::from_position(position);
            match entry {
                Some(node) => self.visit(&node, &progress),
                None => log::warn!("skipping missing object at selection index {index}"),
            }
            return StepSignal::Advanced(progress);
        }

        if let Err(message) = self.save_current_scene() {
            return StepSignal::Aborted(message);
        }
        // Step past the scene so a further advance cannot save it twice.
        self.scene_cursor += 1;
        StepSignal::Done
    }
}

impl<P: SceneProvider> StepSequence for SceneEnumeration<P> {
    fn advance(&mut self) -> StepSignal {
        if let Some(message) = self.config_error.take() {
            return StepSignal::Aborted(message);
        }

        if self.scenes.is_none() {
            let scenes = match &self.mode {
                SceneMode::Roots(None) if !self.filter.trim().is_empty() => {
                    self.provider.find_scenes(&self.filter)
                }
                _ => vec![self.provider.current_scene()],
            };
            if scenes.is_empty() {
                log::warn!("scene filter '{}' matched no scenes", self.filter);
                self.scenes = Some(scenes);
                return StepSignal::Done;
            }
            self.scenes = Some(scenes);
            self.enter_scene();
        }

        match self.mode {
            SceneMode::Roots(_) => self.step_roots(),
            SceneMode::Flat(_) => self.step_flat(),
        }
    }
}
