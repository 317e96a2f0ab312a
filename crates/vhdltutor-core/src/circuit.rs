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

use serde::Serialize;

/// Number of states in the 4-bit counter.
const COUNTER_MODULUS: u8 = 16;

/// State of the clocked demonstration circuits: a free-running 4-bit
/// counter and a D-type flip-flop sharing one clock. Advanced by the
/// periodic clock toggle; purely cosmetic, with no timing model behind it.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub struct CircuitBoard {
    /// Current clock level.
    pub clock_high: bool,
    /// Counter value, 0-15.
    pub count: u8,
    /// The flip-flop's D input, set by the user.
    pub d_input: bool,
    /// The flip-flop's Q output, latched from D on the rising edge.
    pub q_output: bool,
}

impl CircuitBoard {
    pub fn new() -> CircuitBoard {
        CircuitBoard {
            clock_high: false,
            count: 0,
            d_input: false,
            q_output: false,
        }
    }

    /// One half-period of the clock: toggle the level, and on the rising
    /// edge step the counter and latch the flip-flop.
    pub fn tick(&mut self) {
        self.clock_high = !self.clock_high;
        if self.clock_high {
            self.count = (self.count + 1) % COUNTER_MODULUS;
            self.q_output = self.d_input;
        }
    }

    pub fn toggle_d(&mut self) {
        self.d_input = !self.d_input;
    }

    /// Return the clocked state to its initial value. The D input is a
    /// user control, not clocked state, so it is left alone.
    pub fn reset(&mut self) {
        self.clock_high = false;
        self.count = 0;
        self.q_output = false;
    }

    /// The counter's bits, most significant first.
    pub fn count_bits(&self) -> [bool; 4] {
        [
            self.count & 0b1000 != 0,
            self.count & 0b0100 != 0,
            self.count & 0b0010 != 0,
            self.count & 0b0001 != 0,
        ]
    }
}

impl Default for CircuitBoard {
    fn default() -> Self {
        CircuitBoard::new()
    }
}
