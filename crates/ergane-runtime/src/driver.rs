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

//! Policy-aware driving of one step sequence.
//!
//! The [`PolicyDriver`] sits between the scheduler and a strategy's step
//! sequence. The scheduler pumps it once per tick; how far one pump advances
//! the sequence is the execution policy's decision:
//!
//! - Blocking policies exhaust the whole remaining sequence within the pump,
//!   presenting high-water progress after every item and, under
//!   `BlockingCancelable`, honoring the presenter's cancel request.
//! - The async policy advances until the wall-clock spent in this pump
//!   exceeds the configured tick budget, then suspends until the next tick.

use crate::step::{StepSequence, StepSignal};
use ergane_core::presentation::ProgressPresenter;
use ergane_core::process::{ExecutionPolicy, ProcessHandle, ProcessOutcome, ProcessStatus};
use ergane_core::progress::{HierarchicalProgress, HighWater};
use ergane_core::Stopwatch;
use std::time::Duration;

/// Result of pumping a process once.
#[derive(Debug)]
pub enum Pump {
    /// The process ran out of tick budget; pump again next tick.
    Suspended,
    /// The process reached a terminal state.
    Finished(ProcessStatus, Option<String>),
}

/// A type-erased, pumpable process as the scheduler stores it.
pub trait ProcessPump: Send {
    /// Advances the process according to its policy.
    fn pump(&mut self) -> Pump;

    /// Forwards process start to the presentation adapter.
    fn notify_start(&mut self, handle: ProcessHandle);

    /// Forwards the terminal outcome to the presentation adapter.
    fn notify_done(&mut self, outcome: &ProcessOutcome);
}

/// Drives a [`StepSequence`] under one [`ExecutionPolicy`].
pub struct PolicyDriver<S: StepSequence> {
    sequence: S,
    policy: ExecutionPolicy,
    tick_budget: Duration,
    presenter: Box<dyn ProgressPresenter>,
    high_water: HighWater,
}

impl<S: StepSequence> PolicyDriver<S> {
    /// Wraps a sequence with its policy, tick budget, and presenter.
    pub fn new(
        sequence: S,
        policy: ExecutionPolicy,
        tick_budget: Duration,
        presenter: Box<dyn ProgressPresenter>,
    ) -> Self {
        Self {
            sequence,
            policy,
            tick_budget,
            presenter,
            high_water: HighWater::new(),
        }
    }

    /// Presents one step's progress, clamped to the high-water mark, and
    /// returns whether the surface requested cancellation.
    fn present(&mut self, progress: &mut HierarchicalProgress) -> bool {
        progress.total = self.high_water.observe(progress.total);
        self.presenter.on_progress(progress)
    }

    fn pump_blocking(&mut self) -> Pump {
        let cancelable = self.policy == ExecutionPolicy::BlockingCancelable;
        loop {
            match self.sequence.advance() {
                StepSignal::Advanced(mut progress) => {
                    let cancel_requested = self.present(&mut progress);
                    if cancelable && cancel_requested {
                        return Pump::Finished(ProcessStatus::Cancelled, None);
                    }
                }
                StepSignal::Done => return Pump::Finished(ProcessStatus::Success, None),
                StepSignal::Aborted(message) => {
                    return Pump::Finished(ProcessStatus::Failed, Some(message))
                }
            }
        }
    }

    fn pump_async(&mut self) -> Pump {
        let slice = Stopwatch::new();
        loop {
            match self.sequence.advance() {
                StepSignal::Advanced(mut progress) => {
                    // Cancel requests from the surface are ignored here; async
                    // processes are cancelled through the scheduler.
                    let _ = self.present(&mut progress);
                    if slice.elapsed() >= self.tick_budget {
                        return Pump::Suspended;
                    }
                }
                StepSignal::Done => return Pump::Finished(ProcessStatus::Success, None),
                StepSignal::Aborted(message) => {
                    return Pump::Finished(ProcessStatus::Failed, Some(message))
                }
            }
        }
    }
}

impl<S: StepSequence> ProcessPump for PolicyDriver<S> {
    fn pump(&mut self) -> Pump {
        match self.policy {
            ExecutionPolicy::Blocking | ExecutionPolicy::BlockingCancelable => {
                self.pump_blocking()
            }
            ExecutionPolicy::Async => self.pump_async(),
        }
    }

    fn notify_start(&mut self, handle: ProcessHandle) {
        self.presenter.on_process_start(handle);
    }

    fn notify_done(&mut self, outcome: &ProcessOutcome) {
        self.presenter.on_process_done(outcome);
    }
}
