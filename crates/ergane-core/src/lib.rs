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

//! # Ergane Core
//!
//! Foundational crate containing traits, core types, and interface contracts
//! for the Ergane batch asset-processing framework.
//!
//! This crate knows nothing about how enumeration runs; it defines the
//! language the runtime and its hosts share: progress value types, process
//! identity/configuration/outcome, match predicates, the repository and
//! presentation adapter contracts, and the deferred control channel.

#![warn(missing_docs)]

pub mod control;
pub mod error;
pub mod filter;
pub mod presentation;
pub mod process;
pub mod progress;
pub mod repo;
pub mod utils;

pub use utils::timer::Stopwatch;
