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

use crate::error::Fallible;
use crate::error::fail;
use crate::pattern::RequiredPattern;

/// The generic message shown when a verification attempt fails. Failures
/// deliberately carry no detail about which requirement missed.
pub const FAILURE_MESSAGE: &str =
    "The code is not correct yet. Review the instructions and try again.";

/// A truth table displayed alongside combinational exercises.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TruthTable {
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
}

/// Exercise fields as authored in course data, before the required
/// patterns are compiled.
#[derive(Debug, Clone, Deserialize)]
pub struct ExerciseDef {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub instructions: Vec<String>,
    pub hint: String,
    pub initial_code: String,
    pub patterns: Vec<String>,
    pub success_message: String,
    pub truth_table: Option<TruthTable>,
    #[serde(default)]
    pub concepts: Vec<String>,
}

/// A code exercise: a static, immutable record constructed once at program
/// start.
#[derive(Debug, Clone)]
pub struct Exercise {
    slug: String,
    title: String,
    description: String,
    instructions: Vec<String>,
    hint: String,
    initial_code: String,
    required: Vec<RequiredPattern>,
    success_message: String,
    truth_table: Option<TruthTable>,
    concepts: Vec<String>,
}

impl Exercise {
    /// Compile an exercise definition. The required pattern collection must
    /// be non-empty and every expression must compile.
    pub fn new(def: ExerciseDef) -> Fallible<Exercise> {
        if def.patterns.is_empty() {
            return fail(format!(
                "Exercise '{}' has no required patterns.",
                def.slug
            ));
        }
        let required: Vec<RequiredPattern> = def
            .patterns
            .iter()
            .map(|expr| RequiredPattern::new(expr))
            .collect::<Fallible<Vec<_>>>()?;
        Ok(Exercise {
            slug: def.slug,
            title: def.title,
            description: def.description,
            instructions: def.instructions,
            hint: def.hint,
            initial_code: def.initial_code,
            required,
            success_message: def.success_message,
            truth_table: def.truth_table,
            concepts: def.concepts,
        })
    }

    /// Check a code buffer against every required pattern.
    ///
    /// There is no partial credit: the attempt passes only if every pattern
    /// matches somewhere in the buffer, and a failure reports nothing about
    /// which requirement missed.
    pub fn verify(&self, code: &str) -> VerificationResult {
        if self.required.iter().all(|pattern| pattern.is_match(code)) {
            VerificationResult::pass(self.success_message.clone())
        } else {
            VerificationResult::fail()
        }
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn instructions(&self) -> &[String] {
        &self.instructions
    }

    pub fn hint(&self) -> &str {
        &self.hint
    }

    pub fn initial_code(&self) -> &str {
        &self.initial_code
    }

    pub fn truth_table(&self) -> Option<&TruthTable> {
        self.truth_table.as_ref()
    }

    pub fn concepts(&self) -> &[String] {
        &self.concepts
    }
}

/// The outcome of a single verification attempt. Transient: produced for
/// display, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationResult {
    passed: bool,
    message: String,
}

impl VerificationResult {
    fn pass(message: String) -> Self {
        VerificationResult {
            passed: true,
            message,
        }
    }

    fn fail() -> Self {
        VerificationResult {
            passed: false,
            message: FAILURE_MESSAGE.to_string(),
        }
    }

    pub fn passed(&self) -> bool {
        self.passed
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
