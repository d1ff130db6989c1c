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

//! Deferred cancel/abort requests for running processes.
//!
//! Item callbacks run while the scheduler is iterating its registry, so they
//! must not mutate it directly. Instead they (and any other foreign context)
//! hold a cheap, cloneable [`ControlHandle`] that enqueues requests onto a
//! channel; the scheduler drains the channel only at the cleanup barriers
//! that bracket its advance phase.

use crate::process::ProcessHandle;

/// A buffered request against a running process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlRequest {
    /// Terminate the process with status `Cancelled`.
    Cancel(ProcessHandle),
    /// Terminate the process with status `Failed` and a diagnostic message.
    Abort(ProcessHandle, String),
}

/// Owner side of the control channel.
///
/// The scheduler owns the bus, hands out [`ControlHandle`]s, and drains
/// buffered requests at its cleanup barriers.
#[derive(Debug)]
pub struct ControlBus {
    sender: flume::Sender<ControlRequest>,
    receiver: flume::Receiver<ControlRequest>,
}

impl ControlBus {
    /// Creates a bus with an unbounded request channel.
    pub fn new() -> Self {
        let (sender, receiver) = flume::unbounded();
        Self { sender, receiver }
    }

    /// Returns a new handle able to enqueue requests onto this bus.
    pub fn handle(&self) -> ControlHandle {
        ControlHandle {
            sender: self.sender.clone(),
        }
    }

    /// Drains every request buffered so far, in arrival order.
    pub fn drain(&self) -> Vec<ControlRequest> {
        self.receiver.try_iter().collect()
    }
}

impl Default for ControlBus {
    fn default() -> Self {
        Self::new()
    }
}

/// A cloneable remote control for a scheduler.
///
/// Safe to use from inside item callbacks: requests are buffered, never
/// applied while the registry is being iterated. Requests against unknown or
/// already-terminated handles are dropped silently when drained.
#[derive(Debug, Clone)]
pub struct ControlHandle {
    sender: flume::Sender<ControlRequest>,
}

impl ControlHandle {
    /// Requests cancellation of a process.
    pub fn cancel(&self, handle: ProcessHandle) {
        self.send(ControlRequest::Cancel(handle));
    }

    /// Requests abortion of a process with a diagnostic message.
    pub fn abort(&self, handle: ProcessHandle, message: impl Into<String>) {
        self.send(ControlRequest::Abort(handle, message.into()));
    }

    fn send(&self, request: ControlRequest) {
        if let Err(e) = self.sender.send(request) {
            log::error!("Failed to enqueue control request: {e}. Scheduler likely shut down.");
        }
    }
}
