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

use std::fmt;

/// Error type for process configuration.
///
/// Configuration errors never cross the scheduler boundary as `Err` values:
/// a misconfigured process starts, aborts immediately with the error's
/// message, and terminates with status `Failed` before any item is
/// processed. The type is public so hosts can pre-validate configuration
/// before starting anything.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessError {
    /// The per-invocation configuration combines incompatible options.
    InvalidConfiguration(String),
    /// The tick budget is not a positive duration.
    InvalidTickBudget(f64),
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::InvalidConfiguration(reason) => {
                write!(f, "Invalid process configuration: {reason}")
            }
            ProcessError::InvalidTickBudget(seconds) => {
                write!(f, "Invalid tick budget: {seconds}s (must be > 0)")
            }
        }
    }
}

impl std::error::Error for ProcessError {}
