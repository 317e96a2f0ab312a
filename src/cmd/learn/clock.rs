// Copyright 2025 Fernando Borretti
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

use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use serde::Serialize;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio::time::interval;

use vhdltutor_core::circuit::CircuitBoard;

/// The periodic clock behind the circuit visualization: a cancellable timer
/// that flips the board once per half-period while running.
///
/// The timer is started by an explicit user action and stopped by the same
/// control, by reset, or by server shutdown. Aborting the task guarantees
/// no ticks are delivered after cancellation.
#[derive(Clone)]
pub struct SimClock {
    inner: Arc<Mutex<ClockInner>>,
    half_period: Duration,
}

struct ClockInner {
    board: CircuitBoard,
    task: Option<JoinHandle<()>>,
}

/// The board plus the timer's running flag, as reported to the page.
#[derive(Serialize)]
pub struct ClockReport {
    pub running: bool,
    #[serde(flatten)]
    pub board: CircuitBoard,
}

impl SimClock {
    pub fn new(half_period: Duration) -> SimClock {
        SimClock {
            inner: Arc::new(Mutex::new(ClockInner {
                board: CircuitBoard::new(),
                task: None,
            })),
            half_period,
        }
    }

    /// Start toggling. Starting an already-running clock does nothing.
    pub fn start(&self) {
        let mut inner = self.inner.lock().unwrap();
        if inner.task.is_some() {
            return;
        }
        log::debug!("Starting the visualization clock");
        let shared = self.inner.clone();
        let half_period = self.half_period;
        inner.task = Some(tokio::spawn(async move {
            let mut ticker = interval(half_period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick of a tokio interval completes immediately;
            // consume it so the first toggle lands a full half-period in.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                shared.lock().unwrap().board.tick();
            }
        }));
    }

    /// Stop toggling. The board keeps its current state.
    pub fn stop(&self) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(task) = inner.task.take() {
            log::debug!("Stopping the visualization clock");
            task.abort();
        }
    }

    /// Stop toggling and return the board to its initial state.
    pub fn reset(&self) {
        self.stop();
        self.inner.lock().unwrap().board.reset();
    }

    pub fn toggle_d(&self) {
        self.inner.lock().unwrap().board.toggle_d();
    }

    pub fn report(&self) -> ClockReport {
        let inner = self.inner.lock().unwrap();
        ClockReport {
            running: inner.task.is_some(),
            board: inner.board,
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::time::sleep;

    use super::*;

    #[tokio::test]
    async fn test_clock_starts_and_stops() {
        let clock = SimClock::new(Duration::from_millis(5));
        assert!(!clock.report().running);
        clock.start();
        assert!(clock.report().running);
        // Starting twice is a no-op.
        clock.start();

        sleep(Duration::from_millis(60)).await;
        clock.stop();
        assert!(!clock.report().running);
        let board = clock.report().board;
        assert!(board.count > 0);

        // No ticks are delivered after cancellation.
        sleep(Duration::from_millis(30)).await;
        assert_eq!(clock.report().board, board);
    }

    #[tokio::test]
    async fn test_reset_stops_and_clears() {
        let clock = SimClock::new(Duration::from_millis(5));
        clock.toggle_d();
        clock.start();
        sleep(Duration::from_millis(40)).await;
        clock.reset();
        assert!(!clock.report().running);
        let board = clock.report().board;
        assert_eq!(board.count, 0);
        assert!(!board.clock_high);
        assert!(board.d_input);
    }
}
