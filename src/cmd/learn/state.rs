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

use tokio::sync::oneshot::Sender;

use vhdltutor_core::exercise::Exercise;
use vhdltutor_core::progress::SessionProgress;
use vhdltutor_core::progress::Track;
use vhdltutor_core::quiz::QuizState;
use vhdltutor_core::sevenseg::LabState;
use vhdltutor_core::types::timestamp::Timestamp;

use crate::cmd::learn::clock::SimClock;
use crate::course::Course;

/// Feedback shown under an editor after an action.
#[derive(Debug, Clone)]
pub enum Feedback {
    Success(String),
    Failure(String),
}

/// State of one exercise screen: which exercise is open, the editor buffer,
/// and the latest feedback.
pub struct ExercisePanel {
    pub current: usize,
    pub buffer: String,
    pub feedback: Option<Feedback>,
    pub show_hint: bool,
}

impl ExercisePanel {
    pub fn open(exercises: &[Exercise]) -> ExercisePanel {
        ExercisePanel {
            current: 0,
            buffer: exercises[0].initial_code().to_string(),
            feedback: None,
            show_hint: false,
        }
    }

    /// Navigate to another exercise. The buffer is reset to its starting
    /// code and feedback and hint are cleared.
    pub fn goto(&mut self, index: usize, exercises: &[Exercise]) {
        if let Some(exercise) = exercises.get(index) {
            self.current = index;
            self.buffer = exercise.initial_code().to_string();
            self.feedback = None;
            self.show_hint = false;
        }
    }
}

/// State of the seven-segment lab screen.
pub struct LabPanel {
    pub buffer: String,
    pub state: LabState,
    pub feedback: Option<Feedback>,
}

/// State of the quiz screen.
pub struct QuizPanel {
    pub state: QuizState,
    pub notice: Option<String>,
}

/// Everything mutable in the session. Lives for the lifetime of the server
/// and dies with it.
pub struct MutableState {
    pub progress: SessionProgress,
    pub basic: ExercisePanel,
    pub intermediate: ExercisePanel,
    pub tutorial: ExercisePanel,
    pub lab: LabPanel,
    pub quiz: QuizPanel,
}

impl MutableState {
    pub fn new(course: &Course) -> MutableState {
        MutableState {
            progress: SessionProgress::new(
                course.basic.len(),
                course.intermediate.len(),
                course.tutorial.len(),
            ),
            basic: ExercisePanel::open(&course.basic),
            intermediate: ExercisePanel::open(&course.intermediate),
            tutorial: ExercisePanel::open(&course.tutorial),
            lab: LabPanel {
                buffer: LAB_INITIAL_CODE.to_string(),
                state: LabState::new(),
                feedback: None,
            },
            quiz: QuizPanel {
                state: QuizState::new(course.questions.len()),
                notice: None,
            },
        }
    }

    pub fn panel_mut(&mut self, track: Track) -> &mut ExercisePanel {
        match track {
            Track::Basic => &mut self.basic,
            Track::Intermediate => &mut self.intermediate,
            Track::Tutorial => &mut self.tutorial,
        }
    }
}

#[derive(Clone)]
pub struct ServerState {
    pub session_started_at: Timestamp,
    pub course: Arc<Course>,
    pub clock: SimClock,
    pub mutable: Arc<Mutex<MutableState>>,
    pub shutdown_tx: Arc<Mutex<Option<Sender<()>>>>,
}

/// The buffer the lab editor starts with: a complete decoder for the lower
/// digits, with the rest left for the user to fill in.
pub const LAB_INITIAL_CODE: &str = r#"-- BCD to seven-segment display decoder
-- Complete the mapping below for the numbers 0-9
-- Shape: input => "abcdefg" (1=lit, 0=off)

architecture behavioral of bcd_7seg is
begin
  process(entrada)
  begin
    case entrada is
      when "0000" => segmentos <= "1111110"; -- 0
      when "0001" => segmentos <= "0110000"; -- 1
      when "0010" => segmentos <= "1101101"; -- 2
      when "0011" => segmentos <= "1111001"; -- 3
      when "0100" => segmentos <= "0110011"; -- 4
      when "0101" => segmentos <= "1011011"; -- 5
      when "0110" => segmentos <= "1011111"; -- 6
      when "0111" => segmentos <= "1110000"; -- 7
      when "1000" => segmentos <= "1111111"; -- 8
      when "1001" => segmentos <= "1111011"; -- 9
      when others => segmentos <= "0000000"; -- blank
    end case;
  end process;
end behavioral;
"#;
