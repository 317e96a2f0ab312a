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

/// The exercise group a completion flag belongs to.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Track {
    Basic,
    Intermediate,
    Tutorial,
}

impl Track {
    pub fn label(self) -> &'static str {
        match self {
            Track::Basic => "Basic exercises",
            Track::Intermediate => "Intermediate exercises",
            Track::Tutorial => "Decoder tutorial",
        }
    }
}

/// Session-only progress: completion flags per exercise group plus the quiz
/// score. Flags only ever go from unset to set; nothing is persisted, and
/// everything is lost when the session ends.
#[derive(Debug, Clone)]
pub struct SessionProgress {
    basic: Vec<bool>,
    intermediate: Vec<bool>,
    tutorial: Vec<bool>,
    quiz_score: Option<usize>,
}

impl SessionProgress {
    pub fn new(basic: usize, intermediate: usize, tutorial: usize) -> SessionProgress {
        SessionProgress {
            basic: vec![false; basic],
            intermediate: vec![false; intermediate],
            tutorial: vec![false; tutorial],
            quiz_score: None,
        }
    }

    fn flags(&self, track: Track) -> &[bool] {
        match track {
            Track::Basic => &self.basic,
            Track::Intermediate => &self.intermediate,
            Track::Tutorial => &self.tutorial,
        }
    }

    /// Record a completed exercise, keyed by its position in the group.
    /// Out-of-range positions are ignored.
    pub fn mark_completed(&mut self, track: Track, index: usize) {
        let flags = match track {
            Track::Basic => &mut self.basic,
            Track::Intermediate => &mut self.intermediate,
            Track::Tutorial => &mut self.tutorial,
        };
        if let Some(flag) = flags.get_mut(index) {
            *flag = true;
        }
    }

    pub fn is_completed(&self, track: Track, index: usize) -> bool {
        self.flags(track).get(index).copied().unwrap_or(false)
    }

    pub fn completed_count(&self, track: Track) -> usize {
        self.flags(track).iter().filter(|flag| **flag).count()
    }

    pub fn total(&self, track: Track) -> usize {
        self.flags(track).len()
    }

    pub fn all_completed(&self, track: Track) -> bool {
        self.flags(track).iter().all(|flag| *flag)
    }

    pub fn record_quiz_score(&mut self, score: usize) {
        self.quiz_score = Some(score);
    }

    pub fn quiz_score(&self) -> Option<usize> {
        self.quiz_score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_start_unset() {
        let progress = SessionProgress::new(4, 4, 5);
        assert_eq!(progress.completed_count(Track::Basic), 0);
        assert!(!progress.is_completed(Track::Tutorial, 0));
        assert!(!progress.all_completed(Track::Basic));
        assert_eq!(progress.quiz_score(), None);
    }

    #[test]
    fn test_mark_completed() {
        let mut progress = SessionProgress::new(4, 4, 5);
        progress.mark_completed(Track::Basic, 1);
        progress.mark_completed(Track::Basic, 1);
        assert!(progress.is_completed(Track::Basic, 1));
        assert_eq!(progress.completed_count(Track::Basic), 1);
        assert_eq!(progress.completed_count(Track::Intermediate), 0);
    }

    #[test]
    fn test_all_completed() {
        let mut progress = SessionProgress::new(2, 1, 1);
        progress.mark_completed(Track::Basic, 0);
        assert!(!progress.all_completed(Track::Basic));
        progress.mark_completed(Track::Basic, 1);
        assert!(progress.all_completed(Track::Basic));
    }

    #[test]
    fn test_out_of_range_is_ignored() {
        let mut progress = SessionProgress::new(2, 0, 0);
        progress.mark_completed(Track::Basic, 7);
        assert_eq!(progress.completed_count(Track::Basic), 0);
        assert!(!progress.is_completed(Track::Basic, 7));
    }

    #[test]
    fn test_quiz_score_keeps_latest() {
        let mut progress = SessionProgress::new(0, 0, 0);
        progress.record_quiz_score(7);
        progress.record_quiz_score(9);
        assert_eq!(progress.quiz_score(), Some(9));
    }
}
