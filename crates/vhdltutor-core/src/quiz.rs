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

use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;

/// Question difficulty, as labeled in the course data.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

/// A multiple-choice question: a static record.
#[derive(Debug, Clone, Deserialize)]
pub struct Question {
    pub prompt: String,
    pub options: Vec<String>,
    /// Index of the correct option.
    pub answer: usize,
    pub explanation: String,
    pub difficulty: Difficulty,
}

impl Question {
    pub fn is_correct(&self, option: usize) -> bool {
        option == self.answer
    }
}

/// Mutable quiz session state. Lives in memory for the session only.
#[derive(Debug, Clone)]
pub struct QuizState {
    current: usize,
    selected: Option<usize>,
    show_result: bool,
    score: usize,
    answered: Vec<bool>,
    completed: bool,
}

impl QuizState {
    pub fn new(question_count: usize) -> QuizState {
        QuizState {
            current: 0,
            selected: None,
            show_result: false,
            score: 0,
            answered: vec![false; question_count],
            completed: false,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn result_shown(&self) -> bool {
        self.show_result
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn select(&mut self, option: usize) {
        if !self.show_result {
            self.selected = Some(option);
        }
    }

    /// Grade the current selection against the current question. Returns
    /// false when nothing is selected yet. The first correct submission for
    /// a question scores one point; repeat submissions never double-count.
    pub fn submit(&mut self, question: &Question) -> bool {
        let Some(selected) = self.selected else {
            return false;
        };
        self.show_result = true;
        if question.is_correct(selected) && !self.answered[self.current] {
            self.score += 1;
            self.answered[self.current] = true;
        }
        true
    }

    /// Advance to the next question, or complete the quiz after the last.
    pub fn next(&mut self) {
        if self.current + 1 < self.answered.len() {
            self.current += 1;
            self.selected = None;
            self.show_result = false;
        } else {
            self.completed = true;
        }
    }

    pub fn previous(&mut self) {
        if self.current > 0 {
            self.current -= 1;
            self.selected = None;
            self.show_result = false;
        }
    }

    /// Discard everything and start over.
    pub fn reset(&mut self) {
        *self = QuizState::new(self.answered.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_question(answer: usize) -> Question {
        Question {
            prompt: "What does an AND gate output when all inputs are '1'?".to_string(),
            options: vec!["'0'".to_string(), "'1'".to_string()],
            answer,
            explanation: "AND outputs '1' only when every input is '1'.".to_string(),
            difficulty: Difficulty::Easy,
        }
    }

    #[test]
    fn test_submit_without_selection() {
        let question = make_question(1);
        let mut state = QuizState::new(3);
        assert!(!state.submit(&question));
        assert!(!state.result_shown());
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_correct_submission_scores_once() {
        let question = make_question(1);
        let mut state = QuizState::new(3);
        state.select(1);
        assert!(state.submit(&question));
        assert_eq!(state.score(), 1);
        assert!(state.result_shown());

        // Re-submitting the same question never double-counts.
        state.select(1);
        state.submit(&question);
        assert_eq!(state.score(), 1);
    }

    #[test]
    fn test_wrong_submission_scores_nothing() {
        let question = make_question(1);
        let mut state = QuizState::new(3);
        state.select(0);
        assert!(state.submit(&question));
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_selection_is_frozen_after_submit() {
        let question = make_question(1);
        let mut state = QuizState::new(3);
        state.select(0);
        state.submit(&question);
        state.select(1);
        assert_eq!(state.selected(), Some(0));
    }

    #[test]
    fn test_navigation_and_completion() {
        let mut state = QuizState::new(2);
        state.select(1);
        state.next();
        assert_eq!(state.current(), 1);
        assert_eq!(state.selected(), None);
        assert!(!state.completed());

        state.previous();
        assert_eq!(state.current(), 0);

        state.next();
        state.next();
        assert!(state.completed());
    }

    #[test]
    fn test_reset() {
        let question = make_question(0);
        let mut state = QuizState::new(2);
        state.select(0);
        state.submit(&question);
        state.next();
        state.next();
        assert!(state.completed());

        state.reset();
        assert_eq!(state.current(), 0);
        assert_eq!(state.score(), 0);
        assert!(!state.completed());
        assert_eq!(state.selected(), None);
    }
}
