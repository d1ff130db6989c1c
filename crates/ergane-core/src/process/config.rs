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

use crate::error::ProcessError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default wall-clock budget one async process may consume per host tick.
pub const DEFAULT_TICK_BUDGET: Duration = Duration::from_millis(100);

/// Governs how a process is interleaved with the host's main update loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionPolicy {
    /// The whole process runs to completion within a single host tick while
    /// a modal progress surface is shown.
    Blocking,
    /// Like [`ExecutionPolicy::Blocking`], but the progress surface may
    /// request cancellation between items.
    BlockingCancelable,
    /// The process is sliced across ticks: it suspends whenever its
    /// wall-clock budget for the current tick is exhausted.
    Async,
}

/// Which components of an item are considered during component enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComponentSearchType {
    /// Only components attached to the item's root object.
    RootOnly,
    /// Components on the root and on active descendants.
    ActiveChildren,
    /// Components on the root and on all descendants, including inactive ones.
    AllChildren,
}

/// What to do with a scene after its full subtree has been processed.
///
/// Saving happens only once per scene, after the last object in it was
/// visited, never per-node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SceneSaveMode {
    /// Leave the scene untouched.
    None,
    /// Ask the host to save if it considers the scene dirty.
    PromptIfDirty,
    /// Save unconditionally.
    AlwaysSave,
}

/// Per-invocation configuration shared by every enumeration strategy.
///
/// A config is owned by the caller and consumed when the process starts; the
/// scheduler never mutates it afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessConfig {
    /// Execution policy for this process.
    pub policy: ExecutionPolicy,
    /// Wall-clock budget per host tick, honored under [`ExecutionPolicy::Async`].
    pub tick_budget: Duration,
    /// Filter expression handed to the repository query.
    pub filter: String,
}

impl ProcessConfig {
    /// Creates a config with the given policy, the default tick budget and an
    /// empty filter.
    pub fn new(policy: ExecutionPolicy) -> Self {
        Self {
            policy,
            tick_budget: DEFAULT_TICK_BUDGET,
            filter: String::new(),
        }
    }

    /// Sets the repository filter expression.
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    /// Sets the per-tick wall-clock budget.
    pub fn with_tick_budget(mut self, budget: Duration) -> Self {
        self.tick_budget = budget;
        self
    }

    /// Checks the config for values that cannot drive a process.
    pub fn validate(&self) -> Result<(), ProcessError> {
        if self.tick_budget.is_zero() {
            return Err(ProcessError::InvalidTickBudget(
                self.tick_budget.as_secs_f64(),
            ));
        }
        Ok(())
    }
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self::new(ExecutionPolicy::Blocking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ProcessConfig::default();
        assert_eq!(config.policy, ExecutionPolicy::Blocking);
        assert_eq!(config.tick_budget, DEFAULT_TICK_BUDGET);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_tick_budget_is_rejected() {
        let config = ProcessConfig::new(ExecutionPolicy::Async).with_tick_budget(Duration::ZERO);
        assert!(matches!(
            config.validate(),
            Err(ProcessError::InvalidTickBudget(_))
        ));
    }
}
