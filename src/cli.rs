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

use std::process::exit;
use std::time::Duration;

use clap::Parser;
use tokio::spawn;

use vhdltutor_core::error::Fallible;
use vhdltutor_core::types::timestamp::Timestamp;

use crate::cmd::check::check_solution;
use crate::cmd::decode::decode_file;
use crate::cmd::learn::server::ServerConfig;
use crate::cmd::learn::server::start_server;
use crate::cmd::list::list_exercises;
use crate::utils::wait_for_server;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Start the interactive learning interface in the browser.
    Learn {
        /// The host address to bind to. Default is 127.0.0.1.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// The port to use for the web server. Default is 8000.
        #[arg(long, default_value_t = 8000)]
        port: u16,
        /// Whether to open the browser automatically. Default is true.
        #[arg(long)]
        open_browser: Option<bool>,
        /// Half-period of the circuit visualization clock, in milliseconds.
        #[arg(long, default_value_t = 500)]
        clock_interval_ms: u64,
    },
    /// Verify a VHDL source file against an exercise's requirements.
    Check {
        /// The exercise slug, as printed by `list`.
        exercise: String,
        /// Path to the VHDL source file.
        file: String,
    },
    /// Extract the BCD-to-seven-segment table from a VHDL source file.
    Decode {
        /// Path to the VHDL source file.
        file: String,
    },
    /// List the available exercises.
    List,
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Learn {
            host,
            port,
            open_browser,
            clock_interval_ms,
        } => {
            if open_browser.unwrap_or(true) {
                // Start a separate task to open the browser once the server is up.
                let browser_host = host.clone();
                spawn(async move {
                    match wait_for_server(&browser_host, port).await {
                        Ok(_) => {
                            let _ = open::that(format!("http://{browser_host}:{port}/"));
                        }
                        Err(e) => {
                            eprintln!("Failed to connect to server: {e}");
                            exit(-1)
                        }
                    }
                });
            }
            let config = ServerConfig {
                host,
                port,
                session_started_at: Timestamp::now(),
                clock_interval: Duration::from_millis(clock_interval_ms.max(1)),
            };
            start_server(config).await
        }
        Command::Check { exercise, file } => check_solution(&exercise, &file),
        Command::Decode { file } => decode_file(&file),
        Command::List => list_exercises(),
    }
}
