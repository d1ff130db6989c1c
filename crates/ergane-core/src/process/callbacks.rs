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

//! Callback slot types for the three user hooks a process carries.
//!
//! Callbacks are boxed so the scheduler can own heterogeneous processes in
//! one registry. All of them must be `Send` because the process-wide default
//! scheduler lives behind a `Mutex`.
//!
//! The runtime does not guard callback invocations: a panic inside a user
//! callback unwinds into the host tick that drove it.

use super::ProcessOutcome;
use crate::progress::{HierarchicalProgress, ProgressPosition};
use crate::repo::ItemMetadata;

/// Fires exactly once when the process terminates, with its final outcome.
pub type DoneCallback = Box<dyn FnOnce(ProcessOutcome) + Send>;

/// Fires once per matched item during flat enumeration.
pub type ItemCallback<H> = Box<dyn FnMut(&ItemMetadata<H>, &ProgressPosition) + Send>;

/// Fires once per matched component during component enumeration.
pub type ComponentCallback<C, H> =
    Box<dyn FnMut(&C, &ItemMetadata<H>, &ProgressPosition) + Send>;

/// Fires once per matched scene object during tree traversal.
pub type ObjectCallback<N> = Box<dyn FnMut(&N, &HierarchicalProgress) + Send>;

/// Fires once on success with every item the process matched, in visit order.
pub type ResultsCallback<H> = Box<dyn FnOnce(Vec<ItemMetadata<H>>) + Send>;
