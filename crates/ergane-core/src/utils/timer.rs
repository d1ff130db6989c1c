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

//! Wall-clock timing.

use std::time::{Duration, Instant};

/// A wall-clock stopwatch.
///
/// Starts running when created. The scheduler keeps one per process for the
/// elapsed time reported in the final outcome, and the async policy driver
/// keeps one per tick slice to enforce the tick budget.
#[derive(Debug, Clone)]
pub struct Stopwatch {
    start: Instant,
}

impl Stopwatch {
    /// Creates a stopwatch that starts immediately.
    #[inline]
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Time elapsed since the stopwatch started or was last restarted.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Elapsed time in seconds.
    #[inline]
    pub fn elapsed_secs_f64(&self) -> f64 {
        self.elapsed().as_secs_f64()
    }

    /// Restarts the stopwatch from now.
    #[inline]
    pub fn restart(&mut self) {
        self.start = Instant::now();
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn elapsed_grows_with_time() {
        let watch = Stopwatch::new();
        thread::sleep(Duration::from_millis(10));
        assert!(watch.elapsed() >= Duration::from_millis(10));
    }

    #[test]
    fn restart_resets_elapsed() {
        let mut watch = Stopwatch::new();
        thread::sleep(Duration::from_millis(10));
        watch.restart();
        assert!(watch.elapsed() < Duration::from_millis(10));
    }
}
