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

//! Identity, configuration, and outcome types for batch processes.
//!
//! A *process* is one invocation of an enumeration-plus-callbacks operation.
//! It is identified by an opaque [`ProcessHandle`], configured by an
//! immutable [`ProcessConfig`], and terminates in exactly one
//! [`ProcessOutcome`].

mod callbacks;
mod config;
mod handle;
mod outcome;

pub use callbacks::*;
pub use config::*;
pub use handle::*;
pub use outcome::*;
