#![allow(clippy::unwrap_used)]
//! End-to-end chat tests against a mock Gemini endpoint.
//!
//! The binary reads piped stdin, so these drive the plain line reader
//! rather than the interactive prompt.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL_PATH: &str = "/models/gemini-1.5-flash";
const STREAM_PATH: &str = "/models/gemini-1.5-flash:streamGenerateContent";

fn sse_reply(text: &str) -> String {
    format!(
        "data: {{\"candidates\":[{{\"content\":{{\"parts\":[{{\"text\":\"{text}\"}}],\"role\":\"model\"}},\"finishReason\":\"STOP\"}}]}}\r\n\r\n"
    )
}

async fn mount_model(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "models/gemini-1.5-flash"
        })))
        .mount(server)
        .await;
}

/// Writes a config pointing at the mock server and returns the command.
#[allow(deprecated)]
fn gemini_chat(dir: &TempDir, server: &MockServer, max_retries: u32) -> Command {
    let config_dir = dir.path().join("gemini-chat");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        format!(
            "[chat]\nendpoint = \"{}\"\nmax_retries = {max_retries}\n",
            server.uri()
        ),
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("gemini-chat").unwrap();
    cmd.current_dir(dir.path())
        .env("XDG_CONFIG_HOME", dir.path())
        .env("GOOGLE_API_KEY", "test-key")
        .env_remove("RUST_LOG");
    cmd
}

async fn run_blocking(mut cmd: Command, stdin: &'static str) -> assert_cmd::assert::Assert {
    tokio::task::spawn_blocking(move || cmd.write_stdin(stdin).assert())
        .await
        .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_conversation_streams_reply_and_exits_on_exit_keyword() {
    let server = MockServer::start().await;
    mount_model(&server).await;
    Mock::given(method("POST"))
        .and(path(STREAM_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/event-stream")
                .set_body_string(sse_reply("Hi there")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let cmd = gemini_chat(&dir, &server, 3);

    run_blocking(cmd, "Hello\nEXIT\nnever sent\n")
        .await
        .success()
        .stdout(predicate::str::contains("Connected to Gemini"))
        .stdout(predicate::str::contains("Hi there"))
        .stdout(predicate::str::contains("Goodbye"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_transient_failure_is_retried() {
    let server = MockServer::start().await;
    mount_model(&server).await;
    Mock::given(method("POST"))
        .and(path(STREAM_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(STREAM_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/event-stream")
                .set_body_string(sse_reply("Recovered")),
        )
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let cmd = gemini_chat(&dir, &server, 3);

    run_blocking(cmd, "Hello\nexit\n")
        .await
        .success()
        .stdout(predicate::str::contains("Recovered"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_exhausted_retries_keep_session_alive() {
    let server = MockServer::start().await;
    mount_model(&server).await;
    Mock::given(method("POST"))
        .and(path(STREAM_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .expect(2)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let cmd = gemini_chat(&dir, &server, 2);

    run_blocking(cmd, "Hello\n/config\nexit\n")
        .await
        .success()
        .stderr(predicate::str::contains("after 2 attempts"))
        .stdout(predicate::str::contains("Configuration"))
        .stdout(predicate::str::contains("Goodbye"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_declined_reconnect_exits_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let cmd = gemini_chat(&dir, &server, 3);

    run_blocking(cmd, "n\n")
        .await
        .code(exitcode::UNAVAILABLE)
        .stderr(predicate::str::contains("Unable to initialize chat"))
        .stderr(predicate::str::contains("API key validity"))
        .stdout(predicate::str::contains("Connected").not());
}

#[cfg(unix)]
#[tokio::test(flavor = "multi_thread")]
async fn test_interrupt_at_prompt_says_goodbye_and_exits_cleanly() {
    use std::io::{BufRead, BufReader};
    use std::process::{Command as StdCommand, Stdio};
    use std::sync::mpsc;
    use std::time::{Duration, Instant};

    let server = MockServer::start().await;
    mount_model(&server).await;

    let dir = TempDir::new().unwrap();
    let _ = gemini_chat(&dir, &server, 3);
    #[allow(deprecated)]
    let program = assert_cmd::cargo::cargo_bin("gemini-chat");
    let config_home = dir.path().to_owned();

    tokio::task::spawn_blocking(move || {
        let mut child = StdCommand::new(program)
            .current_dir(&config_home)
            .env("XDG_CONFIG_HOME", &config_home)
            .env("GOOGLE_API_KEY", "test-key")
            .env_remove("RUST_LOG")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .unwrap();

        // Keep stdin open so the loop blocks at the first prompt
        let _stdin = child.stdin.take().unwrap();
        let stdout = child.stdout.take().unwrap();
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            for line in BufReader::new(stdout).lines() {
                if tx.send(line.unwrap()).is_err() {
                    break;
                }
            }
        });

        let deadline = Instant::now() + Duration::from_secs(10);
        loop {
            let line = rx.recv_timeout(deadline - Instant::now()).unwrap();
            if line.contains("Connected to Gemini") {
                break;
            }
        }
        std::thread::sleep(Duration::from_millis(300));

        let status = StdCommand::new("kill")
            .args(["-INT", &child.id().to_string()])
            .status()
            .unwrap();
        assert!(status.success());

        let deadline = Instant::now() + Duration::from_secs(5);
        let exit = loop {
            if let Some(exit) = child.try_wait().unwrap() {
                break exit;
            }
            assert!(Instant::now() < deadline, "process did not exit after SIGINT");
            std::thread::sleep(Duration::from_millis(50));
        };

        let rest: Vec<String> = rx.iter().collect();
        assert_eq!(exit.code(), Some(0));
        assert!(rest.iter().any(|line| line.contains("Goodbye")));
    })
    .await
    .unwrap();
}
