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

use serde::Deserialize;

use vhdltutor_core::error::ErrorReport;
use vhdltutor_core::error::Fallible;
use vhdltutor_core::error::fail;
use vhdltutor_core::exercise::Exercise;
use vhdltutor_core::exercise::ExerciseDef;
use vhdltutor_core::progress::Track;
use vhdltutor_core::quiz::Question;

/// All course material, compiled once at startup from the embedded TOML
/// files.
pub struct Course {
    pub basic: Vec<Exercise>,
    pub intermediate: Vec<Exercise>,
    pub tutorial: Vec<Exercise>,
    pub questions: Vec<Question>,
}

#[derive(Deserialize)]
struct ExerciseFile {
    exercise: Vec<ExerciseDef>,
}

#[derive(Deserialize)]
struct QuizFile {
    question: Vec<Question>,
}

impl Course {
    pub fn load() -> Fallible<Course> {
        Ok(Course {
            basic: load_exercises(include_str!("basic.toml"), "basic")?,
            intermediate: load_exercises(include_str!("intermediate.toml"), "intermediate")?,
            tutorial: load_exercises(include_str!("tutorial.toml"), "tutorial")?,
            questions: load_questions(include_str!("quiz.toml"))?,
        })
    }

    pub fn track(&self, track: Track) -> &[Exercise] {
        match track {
            Track::Basic => &self.basic,
            Track::Intermediate => &self.intermediate,
            Track::Tutorial => &self.tutorial,
        }
    }

    /// Look up an exercise by slug across every track.
    pub fn find(&self, slug: &str) -> Option<&Exercise> {
        [Track::Basic, Track::Intermediate, Track::Tutorial]
            .into_iter()
            .flat_map(|track| self.track(track).iter())
            .find(|exercise| exercise.slug() == slug)
    }
}

fn load_exercises(text: &str, label: &str) -> Fallible<Vec<Exercise>> {
    let file: ExerciseFile = toml::from_str(text)
        .map_err(|e| ErrorReport::new(format!("Failed to parse {label} course data: {e}")))?;
    if file.exercise.is_empty() {
        return fail(format!("The {label} course data defines no exercises."));
    }
    file.exercise.into_iter().map(Exercise::new).collect()
}

fn load_questions(text: &str) -> Fallible<Vec<Question>> {
    let file: QuizFile = toml::from_str(text)
        .map_err(|e| ErrorReport::new(format!("Failed to parse quiz data: {e}")))?;
    if file.question.is_empty() {
        return fail("The quiz data defines no questions.");
    }
    for (i, question) in file.question.iter().enumerate() {
        if question.answer >= question.options.len() {
            return fail(format!(
                "Quiz question {} has answer index {} but only {} options.",
                i + 1,
                question.answer,
                question.options.len()
            ));
        }
    }
    Ok(file.question)
}
