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

use vhdltutor_core::error::Fallible;
use vhdltutor_core::progress::Track;

use crate::course::Course;

pub fn list_exercises() -> Fallible<()> {
    let course = Course::load()?;
    for track in [Track::Basic, Track::Intermediate, Track::Tutorial] {
        println!("{}:", track.label());
        for exercise in course.track(track) {
            println!("  {:<20} {}", exercise.slug(), exercise.title());
        }
    }
    Ok(())
}
