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

use maud::DOCTYPE;
use maud::Markup;
use maud::PreEscaped;
use maud::html;

use vhdltutor_core::exercise::Exercise;
use vhdltutor_core::progress::SessionProgress;
use vhdltutor_core::progress::Track;
use vhdltutor_core::quiz::Question;
use vhdltutor_core::types::timestamp::Timestamp;

use crate::cmd::learn::clock::ClockReport;
use crate::cmd::learn::state::ExercisePanel;
use crate::cmd::learn::state::Feedback;
use crate::cmd::learn::state::LabPanel;
use crate::cmd::learn::state::QuizPanel;
use crate::course::Course;
use crate::markdown::markdown_to_html;

pub fn track_path(track: Track) -> &'static str {
    match track {
        Track::Basic => "/basic",
        Track::Intermediate => "/intermediate",
        Track::Tutorial => "/tutorial",
    }
}

pub fn page_template(body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "vhdltutor" }
                link rel="stylesheet" href="/style.css";
            }
            body {
                nav {
                    a.brand href="/" { "vhdltutor" }
                    a href="/basic" { "Basic" }
                    a href="/intermediate" { "Intermediate" }
                    a href="/tutorial" { "Tutorial" }
                    a href="/lab" { "Lab" }
                    a href="/circuits" { "Circuits" }
                    a href="/quiz" { "Quiz" }
                }
                main { (body) }
                script src="/script.js" {};
            }
        }
    }
}

pub fn render_overview(
    course: &Course,
    progress: &SessionProgress,
    started_at: Timestamp,
) -> Markup {
    html! {
        h1 { "Learn VHDL" }
        p {
            "Interactive lessons for digital design: build logic gates and adders, \
             decode a seven-segment display, and watch sequential circuits run."
        }
        table.progress {
            tr { th { "Section" } th { "Progress" } }
            @for track in [Track::Basic, Track::Intermediate, Track::Tutorial] {
                tr {
                    td { a href=(track_path(track)) { (track.label()) } }
                    td { (progress.completed_count(track)) " / " (progress.total(track)) }
                }
            }
            tr {
                td { a href="/quiz" { "Quiz" } }
                td {
                    @match progress.quiz_score() {
                        Some(score) => { (score) " / " (course.questions.len()) }
                        None => { "not taken" }
                    }
                }
            }
        }
        p.session-note {
            "Session started at " (started_at) ". Progress lives in memory only \
             and is discarded when the session ends."
        }
        form method="post" action="/" {
            button.secondary name="action" value="End" { "End session" }
        }
    }
}

pub fn render_exercise(
    track: Track,
    exercises: &[Exercise],
    panel: &ExercisePanel,
    progress: &SessionProgress,
) -> Markup {
    let exercise = &exercises[panel.current];
    html! {
        h1 { (track.label()) }
        @if progress.all_completed(track) {
            div.banner {
                "All " (exercises.len()) " exercises in this section are complete. Well done!"
            }
        }
        p.counter {
            "Exercise " (panel.current + 1) " of " (exercises.len())
            @if progress.is_completed(track, panel.current) {
                span.done { " (completed)" }
            }
        }
        h2 { (exercise.title()) }
        div.description { (PreEscaped(markdown_to_html(exercise.description()))) }
        div.instructions {
            h3 { "Instructions" }
            ol {
                @for instruction in exercise.instructions() {
                    li { (PreEscaped(markdown_to_html(instruction))) }
                }
            }
        }
        @if let Some(table) = exercise.truth_table() {
            div.truth-table {
                h3 { "Truth table" }
                table {
                    tr { th { "Inputs" } th { "Output" } }
                    @for (input, output) in table.inputs.iter().zip(table.outputs.iter()) {
                        tr { td { code { (input) } } td { code { (output) } } }
                    }
                }
            }
        }
        form method="post" action=(track_path(track)) {
            label for="code" { "Your VHDL code:" }
            textarea #code name="code" rows="18" spellcheck="false" { (panel.buffer) }
            div.actions {
                button name="action" value="Verify" { "Verify code" }
                button.secondary name="action" value="Hint" {
                    @if panel.show_hint { "Hide hint" } @else { "Show hint" }
                }
                button.secondary name="action" value="Previous" disabled[panel.current == 0] {
                    "Previous"
                }
                button.secondary name="action" value="Next"
                    disabled[panel.current + 1 == exercises.len()] {
                    "Next"
                }
            }
        }
        @if panel.show_hint {
            div.hint { (PreEscaped(markdown_to_html(exercise.hint()))) }
        }
        (feedback_panel(&panel.feedback))
        @if !exercise.concepts().is_empty() {
            p.concepts { "Concepts: " (exercise.concepts().join(", ")) }
        }
    }
}

pub fn render_lab(lab: &LabPanel) -> Markup {
    let digit = lab.state.digit();
    let lit = lab.state.active().segments();
    html! {
        h1 { "Seven-Segment Lab" }
        p {
            "Write a BCD decoder on the left and simulate it. When every digit \
             0-9 is mapped, the display follows your decoder; step the input \
             digit to see each pattern."
        }
        div.lab {
            section.editor {
                h2 { "Decoder source" }
                form method="post" action="/lab" {
                    textarea #code name="code" rows="22" spellcheck="false" { (lab.buffer) }
                    div.actions {
                        button name="action" value="Simulate" { "Simulate" }
                        button.secondary name="action" value="Down"
                            disabled[digit.value() == 0] {
                            "- digit"
                        }
                        button.secondary name="action" value="Up" disabled[digit.value() == 9] {
                            "+ digit"
                        }
                    }
                }
                (feedback_panel(&lab.feedback))
            }
            section.display {
                h2 { "Display" }
                (seven_segment(&lit))
                p.lab-input {
                    "Input digit: " span.digit { (digit) } " (binary " (digit.bits()) ")"
                }
                p.lab-pattern { "Pattern: " code { (lab.state.active()) } }
                p.segment-key {
                    "Segments a-g: a top, b top right, c bottom right, d bottom, \
                     e bottom left, f top left, g middle."
                }
            }
        }
    }
}

fn seven_segment(lit: &[bool; 7]) -> Markup {
    html! {
        div.sevenseg {
            div.seg.seg-a.lit[lit[0]] {}
            div.seg.seg-b.lit[lit[1]] {}
            div.seg.seg-c.lit[lit[2]] {}
            div.seg.seg-d.lit[lit[3]] {}
            div.seg.seg-e.lit[lit[4]] {}
            div.seg.seg-f.lit[lit[5]] {}
            div.seg.seg-g.lit[lit[6]] {}
        }
    }
}

pub fn render_quiz(questions: &[Question], quiz: &QuizPanel) -> Markup {
    if quiz.state.completed() {
        let score = quiz.state.score();
        let total = questions.len();
        let percentage = if total == 0 { 0 } else { score * 100 / total };
        return html! {
            h1 { "Quiz" }
            div.quiz-summary {
                h2 { "Quiz completed!" }
                p.score { (score) " / " (total) }
                p { "You answered " (percentage) "% of the questions correctly." }
                form method="post" action="/quiz" {
                    button name="action" value="Reset" { "Start over" }
                }
            }
        };
    }
    let question = &questions[quiz.state.current()];
    let last = quiz.state.current() + 1 == questions.len();
    let result_shown = quiz.state.result_shown();
    let correct = quiz
        .state
        .selected()
        .map(|s| question.is_correct(s))
        .unwrap_or(false);
    html! {
        h1 { "Quiz" }
        p.counter {
            "Question " (quiz.state.current() + 1) " of " (questions.len()) " "
            span class={"difficulty " (question.difficulty)} { (question.difficulty) }
        }
        h2 { (question.prompt) }
        @if let Some(notice) = &quiz.notice {
            div.notice { (notice) }
        }
        form method="post" action="/quiz" {
            ul.options {
                @for (i, option) in question.options.iter().enumerate() {
                    li.correct[result_shown && question.is_correct(i)]
                        .incorrect[result_shown
                            && quiz.state.selected() == Some(i)
                            && !question.is_correct(i)] {
                        label {
                            input type="radio" name="option" value=(i)
                                checked[quiz.state.selected() == Some(i)]
                                disabled[result_shown];
                            " " (option)
                        }
                    }
                }
            }
            div.actions {
                button name="action" value="Submit" disabled[result_shown] { "Check answer" }
                button.secondary name="action" value="Previous"
                    disabled[quiz.state.current() == 0] {
                    "Previous"
                }
                button.secondary name="action" value="Next" {
                    @if last { "Finish" } @else { "Next" }
                }
                button.secondary name="action" value="Reset" { "Start over" }
            }
        }
        @if result_shown {
            div class={"feedback " (if correct { "success" } else { "failure" })} {
                p { @if correct { "Correct!" } @else { "Not quite." } }
                p.explanation { (question.explanation) }
            }
        }
    }
}

pub fn render_circuits(report: &ClockReport) -> Markup {
    let bits = report.board.count_bits();
    html! {
        h1 { "Sequential Circuits" }
        p {
            "One clock drives a 4-bit counter and a D flip-flop. Start the \
             clock and watch them run; toggle D to change what the flip-flop \
             latches on the next rising edge."
        }
        div #circuit-board {
            div.signal-row {
                span.signal-name { "CLK" }
                span.level.high[report.board.clock_high] id="clk" {
                    (level_text(report.board.clock_high))
                }
            }
            section.counter {
                h2 { "4-bit counter" }
                div.bits {
                    @for bit in bits {
                        span.bit.high[bit] { (level_text(bit)) }
                    }
                }
                p.count-dec { span id="count-dec" { (report.board.count) } " decimal" }
            }
            section.flipflop {
                h2 { "D flip-flop" }
                div.signal-row {
                    span.signal-name { "D" }
                    span.level.high[report.board.d_input] id="d-val" {
                        (level_text(report.board.d_input))
                    }
                }
                div.signal-row {
                    span.signal-name { "Q" }
                    span.level.high[report.board.q_output] id="q-val" {
                        (level_text(report.board.q_output))
                    }
                }
            }
        }
        form method="post" action="/circuits" {
            div.actions {
                @if report.running {
                    button name="action" value="Pause" { "Pause" }
                } @else {
                    button name="action" value="Start" { "Start" }
                }
                button.secondary name="action" value="Reset" { "Reset" }
                button.secondary name="action" value="ToggleD" { "Toggle D" }
            }
        }
    }
}

pub fn render_goodbye() -> Markup {
    html! {
        h1 { "Session ended" }
        p {
            "Your progress lived only in this session and has been discarded. \
             Run `vhdltutor learn` to start again."
        }
    }
}

fn feedback_panel(feedback: &Option<Feedback>) -> Markup {
    html! {
        @match feedback {
            Some(Feedback::Success(message)) => { div.feedback.success { (message) } }
            Some(Feedback::Failure(message)) => { div.feedback.failure { (message) } }
            None => {}
        }
    }
}

fn level_text(high: bool) -> &'static str {
    if high { "1" } else { "0" }
}
