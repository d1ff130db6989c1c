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

//! # Ergane Runtime
//!
//! The cooperative batch-processing runtime: resumable step sequences, the
//! three enumeration strategies, the policy driver, and the process
//! scheduler.
//!
//! Concurrency is strictly single-threaded cooperative multitasking: the
//! host's main-loop update is the sole driver, one step of one process runs
//! at a time, and the registry is mutated only at the cleanup barriers that
//! bracket each tick's advance phase.

#![warn(missing_docs)]

pub mod driver;
pub mod scheduler;
pub mod step;
pub mod strategy;

pub use scheduler::{default_scheduler, ProcessScheduler};
