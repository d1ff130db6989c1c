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

//! Flat enumeration over a queryable item repository.
//!
//! One generic engine serves every flat entity kind: query identifiers with
//! the configured filter, resolve each to metadata, gate on validity, apply
//! the match predicate, invoke the item callback, optionally accumulate
//! results. Per-entity variants are instantiations of this engine, not
//! copies of it.

use crate::step::{StepSequence, StepSignal};
use ergane_core::filter::{accept_all, MetadataPredicate};
use ergane_core::process::{
    DoneCallback, ItemCallback, ProcessConfig, ResultsCallback,
};
use ergane_core::presentation::ProgressPresenter;
use ergane_core::progress::{HierarchicalProgress, ProgressPosition};
use ergane_core::repo::{AssetRepository, ItemId, ItemMetadata};

/// Configuration and callbacks for one flat enumeration process.
///
/// Fields are public so descriptors compose with struct-update syntax:
///
/// ```ignore
/// let descriptor = AssetBatchDescriptor {
///     config: ProcessConfig::new(ExecutionPolicy::Async).with_filter("t:Texture"),
///     on_item: Some(Box::new(|meta, _pos| println!("{}", meta.name))),
///     ..AssetBatchDescriptor::default()
/// };
/// ```
pub struct AssetBatchDescriptor<R: AssetRepository> {
    /// Common per-invocation configuration.
    pub config: ProcessConfig,
    /// Selects which resolved items are processed.
    pub predicate: MetadataPredicate<R::Handle>,
    /// Invoked once per matched item.
    pub on_item: Option<ItemCallback<R::Handle>>,
    /// Invoked once on success with every matched item, in visit order.
    pub on_results: Option<ResultsCallback<R::Handle>>,
    /// Invoked exactly once with the final outcome.
    pub on_done: Option<DoneCallback>,
    /// Progress surface for this process; defaults to none.
    pub presenter: Option<Box<dyn ProgressPresenter>>,
}

impl<R: AssetRepository> Default for AssetBatchDescriptor<R> {
    fn default() -> Self {
        Self {
            config: ProcessConfig::default(),
            predicate: accept_all(),
            on_item: None,
            on_results: None,
            on_done: None,
            presenter: None,
        }
    }
}

/// Resumable state of a flat enumeration.
///
/// The repository query is issued on the first advance, not at construction,
/// so a process queued this tick observes the repository as of the tick it
/// actually starts enumerating.
pub struct FlatEnumeration<R: AssetRepository> {
    repo: R,
    filter: String,
    predicate: MetadataPredicate<R::Handle>,
    on_item: Option<ItemCallback<R::Handle>>,
    on_results: Option<ResultsCallback<R::Handle>>,
    results: Vec<ItemMetadata<R::Handle>>,
    config_error: Option<String>,
    ids: Option<Vec<ItemId>>,
    cursor: usize,
}

impl<R: AssetRepository> FlatEnumeration<R> {
    /// Builds the enumeration from a repository and a descriptor.
    ///
    /// The descriptor's `on_done` and `presenter` slots are the scheduler's
    /// concern and are ignored here.
    pub fn new(repo: R, descriptor: AssetBatchDescriptor<R>) -> Self {
        Self {
            repo,
            config_error: descriptor.config.validate().err().map(|e| e.to_string()),
            filter: descriptor.config.filter,
            predicate: descriptor.predicate,
            on_item: descriptor.on_item,
            on_results: descriptor.on_results,
            results: Vec::new(),
            ids: None,
            cursor: 0,
        }
    }

    /// Number of items the query matched, once the query has run.
    pub fn item_count(&self) -> Option<usize> {
        self.ids.as_ref().map(Vec::len)
    }

    fn deliver_results(&mut self) {
        if let Some(on_results) = self.on_results.take() {
            on_results(std::mem::take(&mut self.results));
        }
    }
}

impl<R: AssetRepository> StepSequence for FlatEnumeration<R> {
    fn advance(&mut self) -> StepSignal {
        if let Some(message) = self.config_error.take() {
            return StepSignal::Aborted(message);
        }

        if self.ids.is_none() {
            let ids = self.repo.find_matches(&self.filter);
            if ids.is_empty() {
                log::warn!("filter '{}' matched no items", self.filter);
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
        if metadata.is_valid && (self.predicate)(&metadata) {
            if let Some(on_item) = &mut self.on_item {
                on_item(&metadata, &position);
            }
            if self.on_results.is_some() {
                self.results.push(metadata);
            }
        }

        StepSignal::Advanced(HierarchicalProgress::from_position(position))
    }
}
