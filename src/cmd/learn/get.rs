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

use axum::Json;
use axum::extract::State;
use axum::response::Html;

use vhdltutor_core::progress::Track;

use crate::cmd::learn::clock::ClockReport;
use crate::cmd::learn::state::ServerState;
use crate::cmd::learn::template::page_template;
use crate::cmd::learn::template::render_circuits;
use crate::cmd::learn::template::render_exercise;
use crate::cmd::learn::template::render_lab;
use crate::cmd::learn::template::render_overview;
use crate::cmd::learn::template::render_quiz;

pub async fn get_overview(State(state): State<ServerState>) -> Html<String> {
    let mutable = state.mutable.lock().unwrap();
    let body = render_overview(&state.course, &mutable.progress, state.session_started_at);
    Html(page_template(body).into_string())
}

pub async fn get_basic(State(state): State<ServerState>) -> Html<String> {
    exercise_page(&state, Track::Basic)
}

pub async fn get_intermediate(State(state): State<ServerState>) -> Html<String> {
    exercise_page(&state, Track::Intermediate)
}

pub async fn get_tutorial(State(state): State<ServerState>) -> Html<String> {
    exercise_page(&state, Track::Tutorial)
}

fn exercise_page(state: &ServerState, track: Track) -> Html<String> {
    let mutable = state.mutable.lock().unwrap();
    let panel = match track {
        Track::Basic => &mutable.basic,
        Track::Intermediate => &mutable.intermediate,
        Track::Tutorial => &mutable.tutorial,
    };
    let body = render_exercise(track, state.course.track(track), panel, &mutable.progress);
    Html(page_template(body).into_string())
}

pub async fn get_lab(State(state): State<ServerState>) -> Html<String> {
    let mutable = state.mutable.lock().unwrap();
    Html(page_template(render_lab(&mutable.lab)).into_string())
}

pub async fn get_quiz(State(state): State<ServerState>) -> Html<String> {
    let mutable = state.mutable.lock().unwrap();
    let body = render_quiz(&state.course.questions, &mutable.quiz);
    Html(page_template(body).into_string())
}

pub async fn get_circuits(State(state): State<ServerState>) -> Html<String> {
    let report = state.clock.report();
    Html(page_template(render_circuits(&report)).into_string())
}

/// The circuit state as JSON, polled by the page script while the page is
/// open.
pub async fn get_circuit_state(State(state): State<ServerState>) -> Json<ClockReport> {
    Json(state.clock.report())
}
