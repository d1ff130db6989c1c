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

use super::ProcessHandle;
use serde::{Deserialize, Serialize};

/// Terminal state of a batch process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcessStatus {
    /// The enumeration ran to exhaustion.
    Success,
    /// A user or caller requested cancellation before exhaustion.
    Cancelled,
    /// The process was aborted, either by fail-fast validation or by an
    /// explicit abort request carrying a diagnostic message.
    Failed,
}

/// Emitted exactly once per process when it reaches a terminal state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessOutcome {
    /// The handle of the process that terminated.
    pub handle: ProcessHandle,
    /// How the process terminated.
    pub status: ProcessStatus,
    /// Diagnostic message; present for [`ProcessStatus::Failed`].
    pub message: Option<String>,
    /// Wall-clock seconds between start and termination.
    pub elapsed_seconds: f64,
}

impl ProcessOutcome {
    /// Outcome for a process that ran to exhaustion.
    pub fn success(handle: ProcessHandle, elapsed_seconds: f64) -> Self {
        Self {
            handle,
            status: ProcessStatus::Success,
            message: None,
            elapsed_seconds,
        }
    }

    /// Outcome for a cancelled process. Cancellation is not an error and
    /// carries no message.
    pub fn cancelled(handle: ProcessHandle, elapsed_seconds: f64) -> Self {
        Self {
            handle,
            status: ProcessStatus::Cancelled,
            message: None,
            elapsed_seconds,
        }
    }

    /// Outcome for an aborted process with its diagnostic message.
    pub fn failed(
        handle: ProcessHandle,
        message: impl Into<String>,
        elapsed_seconds: f64,
    ) -> Self {
        Self {
            handle,
            status: ProcessStatus::Failed,
            message: Some(message.into()),
            elapsed_seconds,
        }
    }
}
