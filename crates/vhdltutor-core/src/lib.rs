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

//! vhdltutor-core: Core library for the vhdltutor interactive VHDL trainer.
//!
//! This library provides the pure, session-independent logic:
//! - Pattern-based verification of exercise submissions
//! - BCD-to-seven-segment table extraction and the display lab state
//! - Multiple-choice quiz scoring
//! - Session progress tracking
//! - The clocked counter/flip-flop state behind the circuit visualization

pub mod circuit;
pub mod error;
pub mod exercise;
pub mod pattern;
pub mod progress;
pub mod quiz;
pub mod sevenseg;
pub mod types;

// Re-exports for convenience
pub use circuit::CircuitBoard;
pub use error::{ErrorReport, Fallible, fail};
pub use exercise::{Exercise, ExerciseDef, TruthTable, VerificationResult};
pub use pattern::RequiredPattern;
pub use progress::{SessionProgress, Track};
pub use quiz::{Difficulty, Question, QuizState};
pub use sevenseg::{Digit, LabState, MappingOutcome, SegmentMap, SegmentPattern, extract_mapping};
pub use types::timestamp::Timestamp;
