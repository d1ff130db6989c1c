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

//! The enumeration strategies, each expressed as a resumable
//! [`StepSequence`](crate::step::StepSequence).
//!
//! Every strategy pairs a descriptor (configuration plus callback slots)
//! with a state machine holding the loop cursors that survive suspension.
//! The scheduler constructs the state machine from the descriptor at start;
//! hosts that embed the runtime differently can drive the state machines by
//! hand.

mod component;
mod flat;
mod scene;

pub use component::*;
pub use flat::*;
pub use scene::*;
