//! In-memory `GitHubApi` used by unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{json, Value};

use crate::error::{Error, Result};
use crate::github::api::GitHubApi;
use crate::github::client::classify_status;
use crate::github::urls::ApiUrls;

pub enum FakeResponse {
    Json(Value),
    Status(u16),
    Transport,
}

pub struct FakeGitHub {
    urls: ApiUrls,
    authenticated: bool,
    resources: HashMap<String, FakeResponse>,
    pages: HashMap<String, Vec<Option<Vec<Value>>>>,
    requests: Mutex<Vec<String>>,
}

impl FakeGitHub {
    pub fn new(base_url: &str) -> Self {
        Self {
            urls: ApiUrls::new(base_url),
            authenticated: false,
            resources: HashMap::new(),
            pages: HashMap::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn authenticated(mut self) -> Self {
        self.authenticated = true;
        self
    }

    pub fn with_json(mut self, url: &str, body: Value) -> Self {
        self.resources.insert(url.to_string(), FakeResponse::Json(body));
        self
    }

    pub fn with_status(mut self, url: &str, status: u16) -> Self {
        self.resources.insert(url.to_string(), FakeResponse::Status(status));
        self
    }

    pub fn with_transport_error(mut self, url: &str) -> Self {
        self.resources.insert(url.to_string(), FakeResponse::Transport);
        self
    }

    /// `None` entries stand for a non-2xx page.
    pub fn with_pages(mut self, url: &str, pages: Vec<Option<Vec<Value>>>) -> Self {
        self.pages.insert(url.to_string(), pages);
        self
    }

    pub fn with_readme(self, owner: &str, repo: &str, text: &str) -> Self {
        let url = self.urls.readme(owner, repo);
        self.with_json(&url, readme_json(text))
    }

    pub fn with_languages(self, owner: &str, repo: &str, languages: &[(&str, u64)]) -> Self {
        let url = self.urls.languages(owner, repo);
        let body: serde_json::Map<String, Value> = languages
            .iter()
            .map(|(name, bytes)| (name.to_string(), json!(bytes)))
            .collect();
        self.with_json(&url, Value::Object(body))
    }

    pub fn requested(&self, url: &str) -> bool {
        self.requests.lock().unwrap().iter().any(|r| r == url)
    }

    pub fn page_requests(&self, url: &str) -> usize {
        let prefix = format!("{}#page=", url);
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.starts_with(&prefix))
            .count()
    }
}

#[async_trait]
impl GitHubApi for FakeGitHub {
    async fn fetch_resource(&self, url: &str) -> Result<Value> {
        self.requests.lock().unwrap().push(url.to_string());
        match self.resources.get(url) {
            Some(FakeResponse::Json(body)) => Ok(body.clone()),
            Some(FakeResponse::Status(status)) => {
                classify_status(*status, None, url)?;
                Ok(Value::Null)
            }
            Some(FakeResponse::Transport) => Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                format!("connection refused: {}", url),
            ))),
            None => Err(Error::NotFound(url.to_string())),
        }
    }

    async fn fetch_page(
        &self,
        url: &str,
        _params: &[(String, String)],
        page: u32,
        _per_page: u32,
    ) -> Result<Option<Vec<Value>>> {
        self.requests
            .lock()
            .unwrap()
            .push(format!("{}#page={}", url, page));
        let pages = match self.pages.get(url) {
            Some(pages) => pages,
            None => return Ok(None),
        };
        Ok(pages
            .get(page as usize - 1)
            .cloned()
            .unwrap_or_else(|| Some(Vec::new())))
    }

    fn urls(&self) -> &ApiUrls {
        &self.urls
    }

    fn has_credential(&self) -> bool {
        self.authenticated
    }
}

pub fn readme_json(text: &str) -> Value {
    let encoded = STANDARD.encode(text.as_bytes());
    // GitHub wraps the payload at 60 columns.
    let wrapped = encoded
        .as_bytes()
        .chunks(60)
        .map(|c| String::from_utf8_lossy(c).into_owned())
        .collect::<Vec<_>>()
        .join("\n");
    json!({ "content": wrapped, "encoding": "base64" })
}

pub const TEST_API: &str = "https://api.test";

pub fn repo_json(owner: &str, id: u64, name: &str) -> Value {
    let api = format!("{}/repos/{}/{}", TEST_API, owner, name);
    json!({
        "id": id,
        "name": name,
        "full_name": format!("{}/{}", owner, name),
        "owner": { "login": owner },
        "description": null,
        "private": false,
        "fork": false,
        "html_url": format!("https://github.com/{}/{}", owner, name),
        "url": api,
        "languages_url": format!("{}/languages", api),
        "homepage": null,
        "stargazers_count": 0,
        "forks_count": 0,
        "open_issues_count": 0,
        "watchers_count": 0,
        "has_issues": false,
        "created_at": "2020-01-01T00:00:00Z",
        "updated_at": "2020-01-01T00:00:00Z"
    })
}

pub fn user_json(login: &str) -> Value {
    json!({
        "login": login,
        "id": 1,
        "html_url": format!("https://github.com/{}", login),
        "name": null,
        "bio": null,
        "public_repos": 0
    })
}
