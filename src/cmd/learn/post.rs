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

use axum::extract::Form;
use axum::extract::State;
use axum::response::Html;
use axum::response::IntoResponse;
use axum::response::Redirect;
use axum::response::Response;
use serde::Deserialize;

use vhdltutor_core::progress::Track;
use vhdltutor_core::sevenseg::MappingOutcome;

use crate::cmd::learn::state::Feedback;
use crate::cmd::learn::state::LabPanel;
use crate::cmd::learn::state::ServerState;
use crate::cmd::learn::template::page_template;
use crate::cmd::learn::template::render_goodbye;
use crate::cmd::learn::template::track_path;

#[derive(Deserialize)]
pub struct OverviewForm {
    action: String,
}

#[derive(Deserialize)]
pub struct ExerciseForm {
    action: String,
    code: Option<String>,
}

#[derive(Deserialize)]
pub struct LabForm {
    action: String,
    code: Option<String>,
}

#[derive(Deserialize)]
pub struct QuizForm {
    action: String,
    option: Option<usize>,
}

#[derive(Deserialize)]
pub struct CircuitForm {
    action: String,
}

pub async fn post_overview(
    State(state): State<ServerState>,
    Form(form): Form<OverviewForm>,
) -> Response {
    if form.action == "End" {
        state.clock.stop();
        if let Some(tx) = state.shutdown_tx.lock().unwrap().take() {
            let _ = tx.send(());
        }
        return Html(page_template(render_goodbye()).into_string()).into_response();
    }
    Redirect::to("/").into_response()
}

pub async fn post_basic(
    State(state): State<ServerState>,
    Form(form): Form<ExerciseForm>,
) -> Redirect {
    apply_exercise_action(&state, Track::Basic, form)
}

pub async fn post_intermediate(
    State(state): State<ServerState>,
    Form(form): Form<ExerciseForm>,
) -> Redirect {
    apply_exercise_action(&state, Track::Intermediate, form)
}

pub async fn post_tutorial(
    State(state): State<ServerState>,
    Form(form): Form<ExerciseForm>,
) -> Redirect {
    apply_exercise_action(&state, Track::Tutorial, form)
}

fn apply_exercise_action(state: &ServerState, track: Track, form: ExerciseForm) -> Redirect {
    let exercises = state.course.track(track);
    let mut mutable = state.mutable.lock().unwrap();
    if let Some(code) = form.code {
        mutable.panel_mut(track).buffer = code;
    }
    match form.action.as_str() {
        "Verify" => {
            let current = mutable.panel_mut(track).current;
            let exercise = &exercises[current];
            let result = exercise.verify(&mutable.panel_mut(track).buffer);
            log::debug!(
                "Verified '{}': {}",
                exercise.slug(),
                if result.passed() { "pass" } else { "fail" }
            );
            if result.passed() {
                // Completion flags are never cleared within the session.
                mutable.progress.mark_completed(track, current);
                mutable.panel_mut(track).feedback =
                    Some(Feedback::Success(result.message().to_string()));
            } else {
                mutable.panel_mut(track).feedback =
                    Some(Feedback::Failure(result.message().to_string()));
            }
        }
        "Hint" => {
            let panel = mutable.panel_mut(track);
            panel.show_hint = !panel.show_hint;
        }
        "Next" => {
            let next = mutable.panel_mut(track).current + 1;
            mutable.panel_mut(track).goto(next, exercises);
        }
        "Previous" => {
            let panel = mutable.panel_mut(track);
            if panel.current > 0 {
                let previous = panel.current - 1;
                panel.goto(previous, exercises);
            }
        }
        _ => {}
    }
    Redirect::to(track_path(track))
}

pub async fn post_lab(State(state): State<ServerState>, Form(form): Form<LabForm>) -> Redirect {
    let mut mutable = state.mutable.lock().unwrap();
    if let Some(code) = form.code {
        mutable.lab.buffer = code;
    }
    match form.action.as_str() {
        "Simulate" => {
            let LabPanel {
                buffer,
                state: lab,
                feedback,
            } = &mut mutable.lab;
            let outcome = lab.simulate(buffer);
            *feedback = Some(match &outcome {
                MappingOutcome::Complete(_) => {
                    log::debug!("Lab mapping complete");
                    Feedback::Success(
                        "Complete mapping recognized. The display now follows your decoder."
                            .to_string(),
                    )
                }
                MappingOutcome::Incomplete { missing } => {
                    log::debug!("Lab mapping incomplete, {} digit(s) missing", missing.len());
                    let missing: Vec<String> = missing.iter().map(|d| d.to_string()).collect();
                    Feedback::Failure(format!(
                        "Incomplete mapping: no pairing found for digit(s) {}. \
                         The previous display is unchanged.",
                        missing.join(", ")
                    ))
                }
            });
        }
        "Up" => {
            let digit = mutable.lab.state.digit().succ();
            mutable.lab.state.select_digit(digit);
        }
        "Down" => {
            let digit = mutable.lab.state.digit().pred();
            mutable.lab.state.select_digit(digit);
        }
        _ => {}
    }
    Redirect::to("/lab")
}

pub async fn post_quiz(State(state): State<ServerState>, Form(form): Form<QuizForm>) -> Redirect {
    let questions = &state.course.questions;
    let mut mutable = state.mutable.lock().unwrap();
    mutable.quiz.notice = None;
    match form.action.as_str() {
        "Submit" => {
            if let Some(option) = form.option {
                mutable.quiz.state.select(option);
            }
            let question = &questions[mutable.quiz.state.current()];
            if mutable.quiz.state.submit(question) {
                let score = mutable.quiz.state.score();
                mutable.progress.record_quiz_score(score);
            } else {
                mutable.quiz.notice =
                    Some("Pick an option before checking your answer.".to_string());
            }
        }
        "Next" => mutable.quiz.state.next(),
        "Previous" => mutable.quiz.state.previous(),
        "Reset" => mutable.quiz.state.reset(),
        _ => {}
    }
    Redirect::to("/quiz")
}

pub async fn post_circuits(
    State(state): State<ServerState>,
    Form(form): Form<CircuitForm>,
) -> Redirect {
    match form.action.as_str() {
        "Start" => state.clock.start(),
        "Pause" => state.clock.stop(),
        "Reset" => state.clock.reset(),
        "ToggleD" => state.clock.toggle_d(),
        _ => {}
    }
    Redirect::to("/circuits")
}
