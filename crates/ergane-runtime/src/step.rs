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

//! The resumable-step contract every enumeration strategy implements.
//!
//! A step sequence is an explicit state object holding its loop cursors (and,
//! for tree traversal, its recursion stack). The driver advances it one unit
//! of work at a time; because all position lives in the state object, a
//! sequence suspended mid-run resumes at exactly the item after the last one
//! it processed. Each item is therefore processed exactly once across any
//! number of suspensions.

use ergane_core::progress::HierarchicalProgress;

/// Result of advancing a step sequence by one unit of work.
#[derive(Debug)]
pub enum StepSignal {
    /// One unit of work was performed; the position reached is attached.
    /// More work may be ready immediately; whether to keep going or to
    /// return control to the host is the policy driver's decision.
    Advanced(HierarchicalProgress),
    /// The sequence is exhausted. Advancing an exhausted sequence keeps
    /// returning `Done`.
    Done,
    /// The sequence terminated itself with a diagnostic, before or during
    /// enumeration. No further work will be performed.
    Aborted(String),
}

/// A resumable enumeration expressed as discrete, bounded steps.
///
/// One call to [`advance`](Self::advance) performs bounded work: processing
/// exactly one item or one tree node. Implementations must tolerate being
/// advanced again after returning [`StepSignal::Done`].
pub trait StepSequence: Send {
    /// Performs the next unit of work.
    fn advance(&mut self) -> StepSignal;
}
