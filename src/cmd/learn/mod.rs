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

mod clock;
mod get;
mod post;
pub mod server;
mod state;
mod template;

#[cfg(test)]
mod tests {
    use std::error::Error;
    use std::time::Duration;

    use portpicker::pick_unused_port;
    use reqwest::StatusCode;
    use tokio::spawn;
    use tokio::time::sleep;

    use vhdltutor_core::error::Fallible;
    use vhdltutor_core::types::timestamp::Timestamp;

    use crate::cmd::learn::server::ServerConfig;
    use crate::cmd::learn::server::start_server;
    use crate::utils::wait_for_server;

    const TEST_HOST: &str = "127.0.0.1";

    const AND_SOLUTION: &str = "entity porta_and is
  Port (
    a : in std_logic;
    b : in std_logic;
    y : out std_logic
  );
end porta_and;

architecture behavioral of porta_and is
begin
  y <= a and b;
end behavioral;
";

    const FULL_DECODER: &str = r#"case entrada is
  when "0000" => segmentos <= "1111110";
  when "0001" => segmentos <= "0110000";
  when "0010" => segmentos <= "1101101";
  when "0011" => segmentos <= "1111001";
  when "0100" => segmentos <= "0110011";
  when "0101" => segmentos <= "1011011";
  when "0110" => segmentos <= "1011111";
  when "0111" => segmentos <= "1110000";
  when "1000" => segmentos <= "1111111";
  when "1001" => segmentos <= "1111011";
end case;
"#;

    async fn spawn_server(port: u16) -> Fallible<()> {
        let config = ServerConfig {
            host: TEST_HOST.to_string(),
            port,
            session_started_at: Timestamp::now(),
            clock_interval: Duration::from_millis(20),
        };
        spawn(async move { start_server(config).await });
        wait_for_server(TEST_HOST, port).await
    }

    #[tokio::test]
    async fn test_static_assets_and_not_found() -> Result<(), Box<dyn Error>> {
        let port = pick_unused_port().unwrap();
        spawn_server(port).await?;

        let response = reqwest::get(format!("http://{TEST_HOST}:{port}/style.css")).await?;
        assert!(response.status().is_success());
        assert_eq!(response.headers().get("content-type").unwrap(), "text/css");

        let response = reqwest::get(format!("http://{TEST_HOST}:{port}/script.js")).await?;
        assert!(response.status().is_success());
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/javascript"
        );

        let response = reqwest::get(format!("http://{TEST_HOST}:{port}/herp-derp")).await?;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        Ok(())
    }

    #[tokio::test]
    async fn test_exercise_flow() -> Result<(), Box<dyn Error>> {
        let port = pick_unused_port().unwrap();
        spawn_server(port).await?;
        let base = format!("http://{TEST_HOST}:{port}");

        // The overview starts with nothing completed.
        let html = reqwest::get(format!("{base}/")).await?.text().await?;
        assert!(html.contains("Learn VHDL"));
        assert!(html.contains("0 / 4"));
        assert!(html.contains("not taken"));

        // The first basic exercise is open.
        let html = reqwest::get(format!("{base}/basic")).await?.text().await?;
        assert!(html.contains("Exercise 1 of 4"));
        assert!(html.contains("AND Gate"));

        // A wrong submission gets the generic failure message.
        let client = reqwest::Client::new();
        let html = client
            .post(format!("{base}/basic"))
            .form(&[("action", "Verify"), ("code", "-- still empty")])
            .send()
            .await?
            .text()
            .await?;
        assert!(html.contains("The code is not correct yet."));

        // A correct submission completes the exercise.
        let html = client
            .post(format!("{base}/basic"))
            .form(&[("action", "Verify"), ("code", AND_SOLUTION)])
            .send()
            .await?
            .text()
            .await?;
        assert!(html.contains("Perfect! You built your first logic gate in VHDL!"));
        assert!(html.contains("(completed)"));

        // Navigation resets the editor to the next exercise's starting code.
        let html = client
            .post(format!("{base}/basic"))
            .form(&[("action", "Next")])
            .send()
            .await?
            .text()
            .await?;
        assert!(html.contains("Exercise 2 of 4"));
        assert!(html.contains("OR Gate"));

        // The completion flag survives navigation and shows on the overview.
        let html = reqwest::get(format!("{base}/")).await?.text().await?;
        assert!(html.contains("1 / 4"));

        Ok(())
    }

    #[tokio::test]
    async fn test_lab_flow() -> Result<(), Box<dyn Error>> {
        let port = pick_unused_port().unwrap();
        spawn_server(port).await?;
        let base = format!("http://{TEST_HOST}:{port}");
        let client = reqwest::Client::new();

        // The display starts on digit 0 with the default pattern.
        let html = reqwest::get(format!("{base}/lab")).await?.text().await?;
        assert!(html.contains("(binary 0000)"));
        assert!(html.contains("Pattern: <code>1111110</code>"));

        // A complete decoder is recognized.
        let html = client
            .post(format!("{base}/lab"))
            .form(&[("action", "Simulate"), ("code", FULL_DECODER)])
            .send()
            .await?
            .text()
            .await?;
        assert!(html.contains("Complete mapping recognized."));

        // Stepping the input digit re-displays without re-simulating.
        let html = client
            .post(format!("{base}/lab"))
            .form(&[("action", "Up"), ("code", FULL_DECODER)])
            .send()
            .await?
            .text()
            .await?;
        assert!(html.contains("(binary 0001)"));
        assert!(html.contains("Pattern: <code>0110000</code>"));

        // An incomplete decoder reports the missing digits and leaves the
        // display untouched.
        let html = client
            .post(format!("{base}/lab"))
            .form(&[
                ("action", "Simulate"),
                ("code", r#"when "0000" => segmentos <= "1111110";"#),
            ])
            .send()
            .await?
            .text()
            .await?;
        assert!(html.contains("Incomplete mapping: no pairing found for digit(s) 1, 2, 3, 4, 5, 6, 7, 8, 9."));
        assert!(html.contains("Pattern: <code>0110000</code>"));

        Ok(())
    }

    #[tokio::test]
    async fn test_quiz_flow() -> Result<(), Box<dyn Error>> {
        let port = pick_unused_port().unwrap();
        spawn_server(port).await?;
        let base = format!("http://{TEST_HOST}:{port}");
        let client = reqwest::Client::new();

        let html = reqwest::get(format!("{base}/quiz")).await?.text().await?;
        assert!(html.contains("Question 1 of 10"));

        // Submitting without a selection shows a notice.
        let html = client
            .post(format!("{base}/quiz"))
            .form(&[("action", "Submit")])
            .send()
            .await?
            .text()
            .await?;
        assert!(html.contains("Pick an option before checking your answer."));

        // The first question's correct answer is option 1.
        let html = client
            .post(format!("{base}/quiz"))
            .form(&[("action", "Submit"), ("option", "1")])
            .send()
            .await?
            .text()
            .await?;
        assert!(html.contains("Correct!"));

        let html = client
            .post(format!("{base}/quiz"))
            .form(&[("action", "Next")])
            .send()
            .await?
            .text()
            .await?;
        assert!(html.contains("Question 2 of 10"));

        // The score shows up on the overview.
        let html = reqwest::get(format!("{base}/")).await?.text().await?;
        assert!(html.contains("1 / 10"));

        // Starting over clears the quiz.
        let html = client
            .post(format!("{base}/quiz"))
            .form(&[("action", "Reset")])
            .send()
            .await?
            .text()
            .await?;
        assert!(html.contains("Question 1 of 10"));

        Ok(())
    }

    #[tokio::test]
    async fn test_circuit_controls() -> Result<(), Box<dyn Error>> {
        let port = pick_unused_port().unwrap();
        spawn_server(port).await?;
        let base = format!("http://{TEST_HOST}:{port}");
        let client = reqwest::Client::new();

        let state: serde_json::Value = reqwest::get(format!("{base}/circuits/state"))
            .await?
            .json()
            .await?;
        assert_eq!(state["running"], false);
        assert_eq!(state["count"], 0);

        // Start the clock and let it run for a few half-periods.
        client
            .post(format!("{base}/circuits"))
            .form(&[("action", "Start")])
            .send()
            .await?;
        sleep(Duration::from_millis(300)).await;
        let state: serde_json::Value = reqwest::get(format!("{base}/circuits/state"))
            .await?
            .json()
            .await?;
        assert_eq!(state["running"], true);
        assert!(state["count"].as_u64().unwrap() > 0);

        // Pausing stops the toggle; the board keeps its state.
        client
            .post(format!("{base}/circuits"))
            .form(&[("action", "Pause")])
            .send()
            .await?;
        let paused: serde_json::Value = reqwest::get(format!("{base}/circuits/state"))
            .await?
            .json()
            .await?;
        assert_eq!(paused["running"], false);
        sleep(Duration::from_millis(100)).await;
        let later: serde_json::Value = reqwest::get(format!("{base}/circuits/state"))
            .await?
            .json()
            .await?;
        assert_eq!(paused["count"], later["count"]);

        // Toggling D and resetting.
        client
            .post(format!("{base}/circuits"))
            .form(&[("action", "ToggleD")])
            .send()
            .await?;
        client
            .post(format!("{base}/circuits"))
            .form(&[("action", "Reset")])
            .send()
            .await?;
        let state: serde_json::Value = reqwest::get(format!("{base}/circuits/state"))
            .await?
            .json()
            .await?;
        assert_eq!(state["count"], 0);
        assert_eq!(state["d_input"], true);
        assert_eq!(state["q_output"], false);

        Ok(())
    }

    #[tokio::test]
    async fn test_end_session() -> Result<(), Box<dyn Error>> {
        let port = pick_unused_port().unwrap();
        spawn_server(port).await?;
        let base = format!("http://{TEST_HOST}:{port}");

        let html = reqwest::Client::new()
            .post(format!("{base}/"))
            .form(&[("action", "End")])
            .send()
            .await?
            .text()
            .await?;
        assert!(html.contains("Session ended"));

        Ok(())
    }
}
