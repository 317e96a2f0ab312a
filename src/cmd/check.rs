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

use std::fs::read_to_string;

use vhdltutor_core::error::Fallible;
use vhdltutor_core::error::fail;

use crate::course::Course;

/// Verify a VHDL source file against one exercise's required patterns: the
/// command-line counterpart of the Verify button.
pub fn check_solution(slug: &str, path: &str) -> Fallible<()> {
    let course = Course::load()?;
    let Some(exercise) = course.find(slug) else {
        return fail(format!(
            "No exercise named '{slug}'. Run `vhdltutor list` to see the available slugs."
        ));
    };
    let code = read_to_string(path)?;
    let result = exercise.verify(&code);
    if result.passed() {
        println!("{}", result.message());
        Ok(())
    } else {
        fail(result.message())
    }
}
