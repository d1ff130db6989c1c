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

//! Enumeration over container items and their attached components.
//!
//! Extends the flat engine with component expansion. Two granularities:
//!
//! - **Container mode** treats the container itself as the unit of work. A
//!   container is matched when at least one component on its *root* passes
//!   the component predicate; the item callback fires once per matched
//!   container.
//! - **Component mode** expands each container into its component set per
//!   the configured [`ComponentSearchType`] and fires the component callback
//!   once per matching component. Each invocation is its own step, because
//!   component counts per container are unbounded and must not overrun the
//!   host's tick budget uninterrupted.

use crate::step::{StepSequence, StepSignal};
use ergane_core::filter::{accept_all, ComponentPredicate, MetadataPredicate};
use ergane_core::presentation::ProgressPresenter;
use ergane_core::process::{
    ComponentCallback, ComponentSearchType, DoneCallback, ItemCallback, ProcessConfig,
    ResultsCallback,
};
use ergane_core::progress::{HierarchicalProgress, ProgressPosition};
use ergane_core::repo::{ComponentSource, ItemId, ItemMetadata};
use std::collections::VecDeque;

/// Unit of work for a component batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentBatchMode {
    /// Match whole containers; a matching component must exist on the root.
    Containers,
    /// Match individual components across the configured search scope.
    Components,
}

/// Configuration and callbacks for one component enumeration process.
pub struct ComponentBatchDescriptor<R: ComponentSource> {
    /// Common per-invocation configuration.
    pub config: ProcessConfig,
    /// Granularity of this batch.
    pub mode: ComponentBatchMode,
    /// Component scope used in [`ComponentBatchMode::Components`] mode.
    pub search: ComponentSearchType,
    /// Selects which resolved containers are considered.
    pub predicate: MetadataPredicate<R::Handle>,
    /// Selects which components count as matches.
    pub component_predicate: ComponentPredicate<R::Component>,
    /// Invoked once per matched container (container mode).
    pub on_item: Option<ItemCallback<R::Handle>>,
    /// Invoked once per matched component (component mode).
    pub on_component: Option<ComponentCallback<R::Component, R::Handle>>,
    /// Invoked once on success with every container that produced a match.
    pub on_results: Option<ResultsCallback<R::Handle>>,
    /// Invoked exactly once with the final outcome.
    pub on_done: Option<DoneCallback>,
    /// Progress surface for this process; defaults to none.
    pub presenter: Option<Box<dyn ProgressPresenter>>,
}

impl<R: ComponentSource> Default for ComponentBatchDescriptor<R> {
    fn default() -> Self {
        Self {
            config: ProcessConfig::default(),
            mode: ComponentBatchMode::Containers,
            search: ComponentSearchType::RootOnly,
            predicate: accept_all(),
            component_predicate: accept_all(),
            on_item: None,
            on_component: None,
            on_results: None,
            on_done: None,
            presenter: None,
        }
    }
}

/// Resumable state of a component enumeration.
pub struct ComponentEnumeration<R: ComponentSource> {
    repo: R,
    filter: String,
    mode: ComponentBatchMode,
    search: ComponentSearchType,
    predicate: MetadataPredicate<R::Handle>,
    component_predicate: ComponentPredicate<R::Component>,
    on_item: Option<ItemCallback<R::Handle>>,
    on_component: Option<ComponentCallback<R::Component, R::Handle>>,
    on_results: Option<ResultsCallback<R::Handle>>,
    results: Vec<ItemMetadata<R::Handle>>,
    config_error: Option<String>,
    ids: Option<Vec<ItemId>>,
    cursor: usize,
    // Matched components of the container at `cursor - 1`, drained one per step.
    pending: VecDeque<R::Component>,
    current: Option<(ItemMetadata<R::Handle>, ProgressPosition)>,
}

impl<R: ComponentSource> ComponentEnumeration<R> {
    /// Builds the enumeration from a repository and a descriptor.
    ///
    /// The descriptor's `on_done` and `presenter` slots are the scheduler's
    /// concern and are ignored here.
    pub fn new(repo: R, descriptor: ComponentBatchDescriptor<R>) -> Self {
        Self {
            repo,
            config_error: descriptor.config.validate().err().map(|e| e.to_string()),
            filter: descriptor.config.filter,
            mode: descriptor.mode,
            search: descriptor.search,
            predicate: descriptor.predicate,
            component_predicate: descriptor.component_predicate,
            on_item: descriptor.on_item,
            on_component: descriptor.on_component,
            on_results: descriptor.on_results,
            results: Vec::new(),
            ids: None,
            cursor: 0,
            pending: VecDeque::new(),
            current: None,
        }
    }

    fn deliver_results(&mut self) {
        if let Some(on_results) = self.on_results.take() {
            on_results(std::mem::take(&mut self.results));
        }
    }

    /// Fires the component callback for one pending component.
    fn emit_pending(&mut self) -> StepSignal {
        let component = match self.pending.pop_front() {
            Some(component) => component,
            None => return StepSignal::Done,
        };
        if let Some((metadata, position)) = &self.current {
            if let Some(on_component) = &mut self.on_component {
                on_component(&component, metadata, position);
            }
            return StepSignal::Advanced(HierarchicalProgress::from_position(*position));
        }
        StepSignal::Done
    }
}

impl<R: ComponentSource> StepSequence for ComponentEnumeration<R> {
    fn advance(&mut self) -> StepSignal {
        if let Some(message) = self.config_error.take() {
            return StepSignal::Aborted(message);
        }

        if !self.pending.is_empty() {
            return self.emit_pending();
        }

        if self.ids.is_none() {
            let ids = self.repo.find_matches(&self.filter);
            if ids.is_empty() {
                log::warn!("filter '{}' matched no containers", self.filter);
            }
            self.ids = Some(ids);
        }

        let (id, total) = match self.ids.as_ref() {
            Some(ids) if self.cursor < ids.len() => (ids[self.cursor].clone(), ids.len()),
            _ => {
                self.deliver_results();
                return StepSignal::Done;
            }
        };

        let position = ProgressPosition::indexed(self.cursor, total);
        self.cursor += 1;

        let metadata = self.repo.resolve(&id);
        if !metadata.is_valid || !(self.predicate)(&metadata) {
            return StepSignal::Advanced(HierarchicalProgress::from_position(position));
        }
        let handle = match &metadata.handle {
            Some(handle) => handle.clone(),
            None => return StepSignal::Advanced(HierarchicalProgress::from_position(position)),
        };

        match self.mode {
            ComponentBatchMode::Containers => {
                let on_root = self
                    .repo
                    .components_of(&handle, ComponentSearchType::RootOnly);
                if on_root.iter().any(|c| (self.component_predicate)(c)) {
                    if let Some(on_item) = &mut self.on_item {
                        on_item(&metadata, &position);
                    }
                    if self.on_results.is_some() {
                        self.results.push(metadata);
                    }
                }
                StepSignal::Advanced(HierarchicalProgress::from_position(position))
            }
            ComponentBatchMode::Components => {
                self.pending = self
                    .repo
                    .components_of(&handle, self.search)
                    .into_iter()
                    .filter(|c| (self.component_predicate)(c))
                    .collect();
                if self.pending.is_empty() {
                    return StepSignal::Advanced(HierarchicalProgress::from_position(position));
                }
                if self.on_results.is_some() {
                    self.results.push(metadata.clone());
                }
                self.current = Some((metadata, position));
                // The container's first matched component is this step's work.
                self.emit_pending()
            }
        }
    }
}
