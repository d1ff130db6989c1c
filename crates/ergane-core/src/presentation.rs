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

//! Contracts for progress surfaces: modal dialogs, in-panel bars, input
//! blockers.
//!
//! The runtime pushes progress and lifecycle events into a
//! [`ProgressPresenter`]; it never pulls anything from the GUI beyond the
//! boolean cancel request returned by [`ProgressPresenter::on_progress`].

use crate::process::{ProcessHandle, ProcessOutcome};
use crate::progress::HierarchicalProgress;

/// Consumer of progress and lifecycle events for one process.
///
/// The runtime drives one presenter per process, on the host's main thread
/// only. The fraction handed to [`on_progress`](Self::on_progress) is already
/// clamped to the process's high-water mark, so implementations can render it
/// directly without worrying about regressions.
pub trait ProgressPresenter: Send {
    /// The process started and was handed this handle.
    fn on_process_start(&mut self, _handle: ProcessHandle) {}

    /// One unit of work finished; returns `true` to request cancellation.
    ///
    /// The request is honored only under
    /// [`ExecutionPolicy::BlockingCancelable`](crate::process::ExecutionPolicy::BlockingCancelable);
    /// other policies present the progress but ignore the return value.
    fn on_progress(&mut self, progress: &HierarchicalProgress) -> bool;

    /// The process reached a terminal state.
    fn on_process_done(&mut self, _outcome: &ProcessOutcome) {}
}

/// A presenter that shows nothing and never requests cancellation.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPresenter;

impl ProgressPresenter for NullPresenter {
    fn on_progress(&mut self, _progress: &HierarchicalProgress) -> bool {
        false
    }
}

/// A presenter that reports through the `log` facade.
///
/// Progress lines are emitted only when the displayed percentage changes, so
/// a thousand fast items do not flood the log.
#[derive(Debug, Default)]
pub struct LogPresenter {
    last_percent: Option<u32>,
}

impl LogPresenter {
    /// Creates a log-backed presenter.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressPresenter for LogPresenter {
    fn on_process_start(&mut self, handle: ProcessHandle) {
        log::info!("process {handle} started");
    }

    fn on_progress(&mut self, progress: &HierarchicalProgress) -> bool {
        let percent = (progress.total * 100.0) as u32;
        if self.last_percent != Some(percent) {
            self.last_percent = Some(percent);
            log::debug!("progress {percent}%");
        }
        false
    }

    fn on_process_done(&mut self, outcome: &ProcessOutcome) {
        log::info!(
            "process {} finished with {:?} after {:.3}s",
            outcome.handle,
            outcome.status,
            outcome.elapsed_seconds
        );
    }
}
