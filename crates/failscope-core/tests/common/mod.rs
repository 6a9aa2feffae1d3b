//! Shared stub servers for GitHub and Gemini

#![allow(dead_code)]

use failscope_core::{RawSettings, Settings};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN: &str = "ghp_StubToken123";
pub const GEMINI_KEY: &str = "gem-StubKey456";
pub const WORKFLOW_FILE: &str = ".github/workflows/ci.yml";
pub const RUNS_PATH: &str = "/repos/octo/widgets/actions/runs";
pub const CONTENTS_PATH: &str = "/repos/octo/widgets/contents/.github/workflows/ci.yml";
pub const RAW_PATH: &str = "/raw/octo/widgets/main/.github/workflows/ci.yml";
pub const LOGS_PATH: &str = "/repos/octo/widgets/actions/runs/42/logs";
pub const GEMINI_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

/// One stub server answering both GitHub and Gemini paths
pub struct StubServer {
    pub server: MockServer,
}

impl StubServer {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    pub fn settings(&self) -> Settings {
        Settings::from_raw(RawSettings {
            github_token: Some(TOKEN.to_string()),
            github_repo: Some("octo/widgets".to_string()),
            workflow_file: Some(WORKFLOW_FILE.to_string()),
            gemini_api_key: Some(GEMINI_KEY.to_string()),
            github_api_url: Some(self.uri()),
            gemini_api_url: Some(self.uri()),
            ..Default::default()
        })
        .expect("stub settings are complete")
    }

    pub fn runs_body(&self, count: usize) -> serde_json::Value {
        let runs: Vec<serde_json::Value> = (0..count)
            .map(|i| {
                let id = 42 - i as u64;
                serde_json::json!({
                    "id": id,
                    "name": "CI",
                    "status": "completed",
                    "conclusion": "failure",
                    "head_branch": "main",
                    "created_at": "2024-05-01T10:00:00Z",
                    "html_url": format!("https://github.com/octo/widgets/actions/runs/{}", id),
                    "logs_url": format!("{}/repos/octo/widgets/actions/runs/{}/logs", self.uri(), id),
                })
            })
            .collect();
        serde_json::json!({ "total_count": count, "workflow_runs": runs })
    }

    pub async fn mount_runs(&self, count: usize, expect: u64) {
        Mock::given(method("GET"))
            .and(path(RUNS_PATH))
            .and(query_param("status", "failure"))
            .and(header("authorization", format!("Bearer {}", TOKEN).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(self.runs_body(count)))
            .expect(expect)
            .mount(&self.server)
            .await;
    }

    pub async fn mount_contents(&self, body: serde_json::Value, expect: u64) {
        Mock::given(method("GET"))
            .and(path(CONTENTS_PATH))
            .and(header("authorization", format!("Bearer {}", TOKEN).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(expect)
            .mount(&self.server)
            .await;
    }

    pub fn contents_body(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "file",
            "name": "ci.yml",
            "path": WORKFLOW_FILE,
            "download_url": format!("{}{}", self.uri(), RAW_PATH),
        })
    }

    pub async fn mount_raw(&self, text: &str, expect: u64) {
        Mock::given(method("GET"))
            .and(path(RAW_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string(text))
            .expect(expect)
            .mount(&self.server)
            .await;
    }

    pub async fn mount_log(&self, text: &str, expect: u64) {
        Mock::given(method("GET"))
            .and(path(LOGS_PATH))
            .and(header("authorization", format!("Bearer {}", TOKEN).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_string(text))
            .expect(expect)
            .mount(&self.server)
            .await;
    }

    pub async fn mount_status(&self, route: &str, status: u16, expect: u64) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status))
            .expect(expect)
            .mount(&self.server)
            .await;
    }

    pub async fn mount_gemini(&self, reply: &str, expect: u64) {
        Mock::given(method("POST"))
            .and(path(GEMINI_PATH))
            .and(header("x-goog-api-key", GEMINI_KEY))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": { "role": "model", "parts": [{ "text": reply }] },
                    "finishReason": "STOP"
                }]
            })))
            .expect(expect)
            .mount(&self.server)
            .await;
    }

    /// Mount every GitHub endpoint with successful answers
    pub async fn mount_healthy_forge(&self, workflow: &str, log: &str) {
        self.mount_runs(1, 1).await;
        self.mount_contents(self.contents_body(), 1).await;
        self.mount_raw(workflow, 1).await;
        self.mount_log(log, 1).await;
    }

    /// Requests received so far, in arrival order, as `METHOD path`
    pub async fn received(&self) -> Vec<String> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|r| format!("{} {}", r.method, r.url.path()))
            .collect()
    }
}
