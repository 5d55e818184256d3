#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::{json, Value};
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tempfile::TempDir;
use tiny_http::{Header, Response, Server, StatusCode};

pub const TOKEN: &str = "glpat-test-token";

pub struct TestEnv {
    _tmp: TempDir,
    pub settings: PathBuf,
}

impl TestEnv {
    pub fn new(settings_yaml: &str) -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let settings = tmp.path().join("settings_to_check.yaml");
        fs::write(&settings, settings_yaml).expect("write settings");
        Self {
            _tmp: tmp,
            settings,
        }
    }

    /// Binary with an isolated environment: token set, no proxies, no log overrides.
    pub fn cmd(&self, endpoint: &str) -> Command {
        let mut cmd = cargo_bin_cmd!("projaudit");
        cmd.env("GITLAB_ACCESS_TOKEN", TOKEN)
            .env_remove("GITLAB_API_URL")
            .env_remove("PROJAUDIT_LOG")
            .env_remove("RUST_LOG");
        for proxy in [
            "HTTP_PROXY",
            "http_proxy",
            "HTTPS_PROXY",
            "https_proxy",
            "ALL_PROXY",
            "all_proxy",
        ] {
            cmd.env_remove(proxy);
        }
        cmd.arg("--settings")
            .arg(&self.settings)
            .arg("--endpoint")
            .arg(endpoint);
        cmd
    }

    pub fn run_json(&self, endpoint: &str, args: &[&str]) -> Value {
        let out = self
            .cmd(endpoint)
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub query: String,
    pub authorization: Option<String>,
}

/// Scripted GraphQL endpoint answering one response per request, in order.
pub struct MockGitlab {
    pub url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: Option<JoinHandle<()>>,
}

impl MockGitlab {
    pub fn start(responses: Vec<(u16, String)>) -> Self {
        let server = Server::http("127.0.0.1:0").expect("http server");
        let url = format!("http://{}/api/graphql", server.server_addr());
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);

        let handle = thread::spawn(move || {
            for (status, body) in responses {
                let mut req = match server.recv_timeout(Duration::from_secs(10)) {
                    Ok(Some(req)) => req,
                    _ => break,
                };
                let mut raw = String::new();
                let _ = req.as_reader().read_to_string(&mut raw);
                let query = serde_json::from_str::<Value>(&raw)
                    .ok()
                    .and_then(|v| v["query"].as_str().map(str::to_string))
                    .unwrap_or_default();
                let authorization = req
                    .headers()
                    .iter()
                    .find(|h| h.field.equiv("Authorization"))
                    .map(|h| h.value.as_str().to_string());
                recorded.lock().expect("lock").push(RecordedRequest {
                    query,
                    authorization,
                });
                let _ = req.respond(
                    Response::from_string(body)
                        .with_status_code(StatusCode(status))
                        .with_header(
                            Header::from_bytes("Content-Type", "application/json")
                                .expect("content type header"),
                        ),
                );
            }
        });

        Self {
            url,
            requests,
            handle: Some(handle),
        }
    }

    /// Waits for the scripted responses to be served, then returns what was received.
    pub fn requests(&mut self) -> Vec<RecordedRequest> {
        if let Some(h) = self.handle.take() {
            h.join().expect("mock server thread");
        }
        self.requests.lock().expect("lock").clone()
    }
}

pub fn project(full_path: &str, fields: Value) -> Value {
    let mut node = json!({
        "id": format!("gid://gitlab/Project/{}", full_path.len()),
        "name": full_path.rsplit('/').next().unwrap_or(full_path),
        "fullPath": full_path,
    });
    if let (Some(n), Value::Object(extra)) = (node.as_object_mut(), fields) {
        n.extend(extra);
    }
    node
}

pub fn page(nodes: Vec<Value>, end_cursor: Option<&str>, has_next: bool) -> (u16, String) {
    let body = json!({"data": {"projects": {
        "nodes": nodes,
        "pageInfo": {"endCursor": end_cursor, "hasNextPage": has_next}
    }}});
    (200, body.to_string())
}
