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

//! The cooperative process scheduler.
//!
//! A [`ProcessScheduler`] owns the registry of running processes and drives
//! every one of them forward once per host tick. Termination requests are
//! never applied while the registry is being iterated: they are buffered
//! (flagged handles plus a queue, fed both by the scheduler's own methods
//! and by the [`ControlHandle`] channel) and drained only at the cleanup
//! barriers that bracket the advance phase. A process marked for termination
//! is therefore never advanced again, and `on_done` fires exactly once,
//! synchronously, inside a cleanup phase.
//!
//! The scheduler is an explicit instance wired into the host's update loop;
//! [`default_scheduler`] offers a process-wide instance for tooling that has
//! no natural owner for one.

use crate::driver::{PolicyDriver, ProcessPump, Pump};
use crate::strategy::{
    AssetBatchDescriptor, ComponentBatchDescriptor, ComponentEnumeration, FlatEnumeration,
    SceneBatchDescriptor, SceneEnumeration,
};
use ergane_core::control::{ControlBus, ControlHandle, ControlRequest};
use ergane_core::presentation::NullPresenter;
use ergane_core::process::{DoneCallback, ProcessHandle, ProcessOutcome, ProcessStatus};
use ergane_core::repo::{AssetRepository, ComponentSource, SceneProvider};
use ergane_core::Stopwatch;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, OnceLock};

/// How a process leaves the registry.
enum Termination {
    /// An external cancel request.
    Cancel,
    /// An external abort request with its diagnostic.
    Abort(String),
    /// The process's own step sequence reached a terminal state.
    Finished(ProcessStatus, Option<String>),
}

/// Scheduler-internal record of one running process.
struct ProcessRecord {
    driver: Box<dyn ProcessPump>,
    on_done: Option<DoneCallback>,
    stopwatch: Stopwatch,
}

/// Registry and tick driver for cooperative batch processes.
pub struct ProcessScheduler {
    registry: HashMap<ProcessHandle, ProcessRecord>,
    /// Advancement order; insertion order, kept separate because `HashMap`
    /// iteration order is unstable.
    order: Vec<ProcessHandle>,
    /// Handles already marked for termination. Guards both idempotence of
    /// `cancel`/`abort` and the no-advance-after-marking invariant.
    flagged: HashSet<ProcessHandle>,
    pending: Vec<(ProcessHandle, Termination)>,
    control: ControlBus,
}

impl ProcessScheduler {
    /// Creates a scheduler with an empty registry.
    pub fn new() -> Self {
        Self {
            registry: HashMap::new(),
            order: Vec::new(),
            flagged: HashSet::new(),
            pending: Vec::new(),
            control: ControlBus::new(),
        }
    }

    /// Starts a flat asset enumeration.
    pub fn start_assets<R: AssetRepository>(
        &mut self,
        repo: R,
        mut descriptor: AssetBatchDescriptor<R>,
    ) -> ProcessHandle {
        let policy = descriptor.config.policy;
        let budget = descriptor.config.tick_budget;
        let presenter = descriptor
            .presenter
            .take()
            .unwrap_or_else(|| Box::new(NullPresenter));
        let on_done = descriptor.on_done.take();
        let sequence = FlatEnumeration::new(repo, descriptor);
        self.register(
            Box::new(PolicyDriver::new(sequence, policy, budget, presenter)),
            on_done,
        )
    }

    /// Starts a container/component enumeration.
    pub fn start_components<R: ComponentSource>(
        &mut self,
        repo: R,
        mut descriptor: ComponentBatchDescriptor<R>,
    ) -> ProcessHandle {
        let policy = descriptor.config.policy;
        let budget = descriptor.config.tick_budget;
        let presenter = descriptor
            .presenter
            .take()
            .unwrap_or_else(|| Box::new(NullPresenter));
        let on_done = descriptor.on_done.take();
        let sequence = ComponentEnumeration::new(repo, descriptor);
        self.register(
            Box::new(PolicyDriver::new(sequence, policy, budget, presenter)),
            on_done,
        )
    }

    /// Starts a scene-object enumeration.
    ///
    /// An invalid selection-mode combination still returns a handle: the
    /// process aborts on its first step and terminates `Failed` with the
    /// validation message, before any object is visited.
    pub fn start_scene_objects<P: SceneProvider>(
        &mut self,
        provider: P,
        mut descriptor: SceneBatchDescriptor<P>,
    ) -> ProcessHandle {
        if let Err(error) = descriptor.validate() {
            log::error!("scene batch rejected: {error}");
        }
        let policy = descriptor.config.policy;
        let budget = descriptor.config.tick_budget;
        let presenter = descriptor
            .presenter
            .take()
            .unwrap_or_else(|| Box::new(NullPresenter));
        let on_done = descriptor.on_done.take();
        let sequence = SceneEnumeration::new(provider, descriptor);
        self.register(
            Box::new(PolicyDriver::new(sequence, policy, budget, presenter)),
            on_done,
        )
    }

    fn register(
        &mut self,
        mut driver: Box<dyn ProcessPump>,
        on_done: Option<DoneCallback>,
    ) -> ProcessHandle {
        let handle = ProcessHandle::new();
        driver.notify_start(handle);
        self.registry.insert(
            handle,
            ProcessRecord {
                driver,
                on_done,
                stopwatch: Stopwatch::new(),
            },
        );
        self.order.push(handle);
        log::debug!("process {handle} registered");
        handle
    }

    /// Requests cancellation of a running process.
    ///
    /// Returns `true` when the handle names a running process that was not
    /// already marked for termination; the termination itself is applied at
    /// the next cleanup barrier. Idempotent: a second call on the same
    /// handle, or a call with an unknown handle, returns `false`.
    pub fn cancel(&mut self, handle: ProcessHandle) -> bool {
        if !self.registry.contains_key(&handle) || !self.flagged.insert(handle) {
            return false;
        }
        log::debug!("process {handle} marked for cancellation");
        self.pending.push((handle, Termination::Cancel));
        true
    }

    /// Requests abortion of a running process with a diagnostic message.
    ///
    /// Same deferral and idempotence rules as [`cancel`](Self::cancel); the
    /// process terminates with status `Failed` carrying the message.
    pub fn abort(&mut self, handle: ProcessHandle, message: impl Into<String>) -> bool {
        if !self.registry.contains_key(&handle) || !self.flagged.insert(handle) {
            return false;
        }
        let message = message.into();
        log::debug!("process {handle} marked for abort: {message}");
        self.pending.push((handle, Termination::Abort(message)));
        true
    }

    /// Returns a cloneable remote control for this scheduler.
    ///
    /// The handle is safe to use from inside item callbacks; its requests
    /// are buffered and drained at the cleanup barriers.
    pub fn control_handle(&self) -> ControlHandle {
        self.control.handle()
    }

    /// Whether a handle still names a registered process.
    pub fn is_running(&self, handle: ProcessHandle) -> bool {
        self.registry.contains_key(&handle)
    }

    /// Number of registered processes.
    pub fn running_count(&self) -> usize {
        self.registry.len()
    }

    /// Drives every registered process forward once.
    ///
    /// Call this from the host's main-loop update. The tick runs three
    /// phases: a cleanup applying termination requests queued since the last
    /// tick, an advance pumping each process still registered and unflagged,
    /// and a second cleanup applying requests raised during advancement plus
    /// the completions the advance produced.
    ///
    /// User callbacks run inside the advance phase; a panic in one unwinds
    /// out of this call.
    pub fn tick(&mut self) {
        // Cleanup (pre): nothing queued here may see another step.
        self.drain_control();
        self.apply_pending();

        // Advance. Iterates a snapshot: the registry itself is only mutated
        // in the cleanup phases.
        let handles: Vec<ProcessHandle> = self.order.clone();
        for handle in handles {
            if self.flagged.contains(&handle) {
                continue;
            }
            let Some(record) = self.registry.get_mut(&handle) else {
                continue;
            };
            match record.driver.pump() {
                Pump::Suspended => {}
                Pump::Finished(status, message) => {
                    self.flagged.insert(handle);
                    self.pending
                        .push((handle, Termination::Finished(status, message)));
                }
            }
        }

        // Cleanup (post): completions from this tick and requests raised by
        // callbacks during it.
        self.drain_control();
        self.apply_pending();
    }

    /// Cancels every running process and applies the terminations
    /// immediately, emitting their outcomes.
    pub fn shutdown(&mut self) {
        let handles: Vec<ProcessHandle> = self.order.clone();
        for handle in handles {
            self.cancel(handle);
        }
        self.drain_control();
        self.apply_pending();
    }

    /// Routes buffered channel requests through the same marking logic as
    /// the direct methods; stale requests fall out via their idempotence.
    fn drain_control(&mut self) {
        for request in self.control.drain() {
            match request {
                ControlRequest::Cancel(handle) => {
                    self.cancel(handle);
                }
                ControlRequest::Abort(handle, message) => {
                    self.abort(handle, message);
                }
            }
        }
    }

    fn apply_pending(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        for (handle, termination) in pending {
            let Some(mut record) = self.registry.remove(&handle) else {
                self.flagged.remove(&handle);
                continue;
            };
            self.order.retain(|h| *h != handle);
            self.flagged.remove(&handle);

            let elapsed = record.stopwatch.elapsed_secs_f64();
            let outcome = match termination {
                Termination::Cancel => ProcessOutcome::cancelled(handle, elapsed),
                Termination::Abort(message) => ProcessOutcome::failed(handle, message, elapsed),
                Termination::Finished(status, message) => ProcessOutcome {
                    handle,
                    status,
                    message,
                    elapsed_seconds: elapsed,
                },
            };
            log::debug!(
                "process {handle} terminated with {:?} after {:.3}s",
                outcome.status,
                outcome.elapsed_seconds
            );
            record.driver.notify_done(&outcome);
            if let Some(on_done) = record.on_done.take() {
                on_done(outcome);
            }
        }
    }
}

impl Default for ProcessScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// The process-wide default scheduler.
///
/// A convenience for editor tooling with no natural owner for a scheduler
/// instance; the host must still drive it by calling `tick` on the lock's
/// contents each update. Prefer an explicit [`ProcessScheduler`] wherever
/// one can be injected.
pub fn default_scheduler() -> &'static Mutex<ProcessScheduler> {
    static DEFAULT: OnceLock<Mutex<ProcessScheduler>> = OnceLock::new();
    DEFAULT.get_or_init(|| Mutex::new(ProcessScheduler::new()))
}
