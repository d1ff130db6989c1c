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

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// An opaque, unique identifier for one running batch process.
///
/// A handle is minted when a process starts and keys the scheduler's
/// registry for the lifetime of that process. Callers hold onto it to
/// request cancellation or abortion; once the process reaches a terminal
/// state the handle no longer resolves to anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProcessHandle(Uuid);

impl ProcessHandle {
    /// Mints a new, random (version 4) handle.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ProcessHandle {
    /// Mints a new, random (version 4) handle.
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProcessHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
