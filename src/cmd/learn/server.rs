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
use std::time::Duration;

use axum::Router;
use axum::http::HeaderName;
use axum::http::StatusCode;
use axum::http::header::CACHE_CONTROL;
use axum::http::header::CONTENT_TYPE;
use axum::response::Html;
use axum::routing::get;
use axum::routing::post;
use tokio::net::TcpListener;
use tokio::select;
use tokio::signal;
use tokio::sync::oneshot::Receiver;
use tokio::sync::oneshot::channel;

use vhdltutor_core::error::Fallible;
use vhdltutor_core::progress::Track;
use vhdltutor_core::types::timestamp::Timestamp;

use crate::cmd::learn::clock::SimClock;
use crate::cmd::learn::get::get_basic;
use crate::cmd::learn::get::get_circuit_state;
use crate::cmd::learn::get::get_circuits;
use crate::cmd::learn::get::get_intermediate;
use crate::cmd::learn::get::get_lab;
use crate::cmd::learn::get::get_overview;
use crate::cmd::learn::get::get_quiz;
use crate::cmd::learn::get::get_tutorial;
use crate::cmd::learn::post::post_basic;
use crate::cmd::learn::post::post_circuits;
use crate::cmd::learn::post::post_intermediate;
use crate::cmd::learn::post::post_lab;
use crate::cmd::learn::post::post_overview;
use crate::cmd::learn::post::post_quiz;
use crate::cmd::learn::post::post_tutorial;
use crate::cmd::learn::state::MutableState;
use crate::cmd::learn::state::ServerState;
use crate::course::Course;
use crate::utils::CACHE_CONTROL_IMMUTABLE;

pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub session_started_at: Timestamp,
    /// Half-period of the circuit visualization clock.
    pub clock_interval: Duration,
}

pub async fn start_server(config: ServerConfig) -> Fallible<()> {
    let course = Arc::new(Course::load()?);

    // Create shutdown channel
    let (shutdown_tx, shutdown_rx) = channel();

    let state = ServerState {
        session_started_at: config.session_started_at,
        course: course.clone(),
        clock: SimClock::new(config.clock_interval),
        mutable: Arc::new(Mutex::new(MutableState::new(&course))),
        shutdown_tx: Arc::new(Mutex::new(Some(shutdown_tx))),
    };
    let app = Router::new();
    let app = app.route("/", get(get_overview));
    let app = app.route("/", post(post_overview));
    let app = app.route("/basic", get(get_basic));
    let app = app.route("/basic", post(post_basic));
    let app = app.route("/intermediate", get(get_intermediate));
    let app = app.route("/intermediate", post(post_intermediate));
    let app = app.route("/tutorial", get(get_tutorial));
    let app = app.route("/tutorial", post(post_tutorial));
    let app = app.route("/lab", get(get_lab));
    let app = app.route("/lab", post(post_lab));
    let app = app.route("/quiz", get(get_quiz));
    let app = app.route("/quiz", post(post_quiz));
    let app = app.route("/circuits", get(get_circuits));
    let app = app.route("/circuits", post(post_circuits));
    let app = app.route("/circuits/state", get(get_circuit_state));
    let app = app.route("/script.js", get(script_handler));
    let app = app.route("/style.css", get(style_handler));
    let app = app.fallback(not_found_handler);
    let app = app.with_state(state.clone());
    let bind = format!("{}:{}", config.host, config.port);

    // Start the server with graceful shutdown on Ctrl+C or the end-session
    // button.
    log::debug!("Starting server on {bind}");
    let listener = TcpListener::bind(bind).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_rx))
        .await?;

    // The visualization clock dies with the session: no ticks after
    // shutdown.
    state.clock.stop();

    print_summary(&state);
    Ok(())
}

fn print_summary(state: &ServerState) {
    let mutable = state.mutable.lock().unwrap();
    let elapsed: chrono::TimeDelta =
        Timestamp::now().into_inner() - state.session_started_at.into_inner();
    println!("Session summary ({} minute(s)):", elapsed.num_minutes());
    for track in [Track::Basic, Track::Intermediate, Track::Tutorial] {
        println!(
            "  {}: {} / {} completed",
            track.label(),
            mutable.progress.completed_count(track),
            mutable.progress.total(track)
        );
    }
    match mutable.progress.quiz_score() {
        Some(score) => println!("  Quiz: {} / {}", score, state.course.questions.len()),
        None => println!("  Quiz: not taken"),
    }
}

async fn script_handler() -> (StatusCode, [(HeaderName, &'static str); 2], &'static [u8]) {
    let bytes = include_bytes!("script.js");
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, "text/javascript"),
            (CACHE_CONTROL, CACHE_CONTROL_IMMUTABLE),
        ],
        bytes,
    )
}

async fn style_handler() -> (StatusCode, [(HeaderName, &'static str); 2], &'static [u8]) {
    let bytes = include_bytes!("style.css");
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, "text/css"),
            (CACHE_CONTROL, CACHE_CONTROL_IMMUTABLE),
        ],
        bytes,
    )
}

async fn not_found_handler() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html("Not Found".to_string()))
}

async fn shutdown_signal(shutdown_rx: Receiver<()>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    let shutdown = async {
        shutdown_rx.await.ok();
    };

    select! {
        _ = ctrl_c => {
            log::debug!("Received Ctrl+C, shutting down gracefully");
        },
        _ = shutdown => {
            log::debug!("Received shutdown signal, shutting down gracefully");
        },
    }
}
