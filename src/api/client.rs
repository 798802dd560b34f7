//! JIRA API client implementation.
//!
//! Wraps the agile and platform REST endpoints the board and issue views
//! need. Requests are sent one at a time and never retried: any failure is
//! handed straight back to the caller.

use reqwest::{header, Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use super::auth::Auth;
use super::dump::ResponseDump;
use super::error::{ApiError, Result};
use super::types::{Issue, Sprint, SprintIssues, SprintPage};
use crate::config::Config;

/// The JIRA API client.
#[derive(Debug)]
pub struct JiraClient {
    /// The HTTP client.
    client: Client,
    /// The base URL for the JIRA instance, without a trailing slash.
    base_url: String,
    /// Authentication credentials.
    auth: Auth,
    /// `maxResults` for sprint pages.
    page_size: u32,
    /// Where raw bodies go, if anywhere.
    dump: Option<ResponseDump>,
}

impl JiraClient {
    /// Create a client from resolved configuration.
    ///
    /// Does not contact the server.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("jira-board/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiError::Network)?;

        let auth = Auth::new(&config.profile.user, &config.profile.token);
        let base_url = normalize_base_url(&config.profile.url);
        let dump = config.dump_dir.clone().map(ResponseDump::new);

        info!(base_url = %base_url, user = auth.user(), "Created JIRA client");

        Ok(Self {
            client,
            base_url,
            auth,
            page_size: config.page_size,
            dump,
        })
    }

    /// Fetch every sprint of a board, in server order.
    ///
    /// Calls `GET /rest/agile/1.0/board/{boardId}/sprint` page by page,
    /// advancing `startAt` by the number of sprints received until the
    /// server reports the last page.
    #[instrument(skip(self))]
    pub async fn get_sprints(&self, board_id: &str) -> Result<Vec<Sprint>> {
        let mut sprints = Vec::new();
        let mut start_at = 0usize;

        loop {
            let url = format!(
                "{}/rest/agile/1.0/board/{}/sprint?startAt={}&maxResults={}",
                self.base_url,
                urlencoding::encode(board_id),
                start_at,
                self.page_size
            );

            let page: SprintPage = self
                .get(&url, &format!("sprints-{}", start_at))
                .await?;
            let received = page.values.len();
            debug!(start_at, received, is_last = page.is_last, "Fetched sprint page");

            sprints.extend(page.values);

            if page.is_last {
                break;
            }
            if received == 0 {
                warn!(start_at, "Empty sprint page not marked as last, stopping");
                break;
            }
            start_at += received;
        }

        debug!("Fetched {} sprints", sprints.len());
        Ok(sprints)
    }

    /// Fetch the issues of one sprint.
    ///
    /// Calls `GET /rest/agile/1.0/board/{boardId}/sprint/{sprintId}/issue`.
    #[instrument(skip(self))]
    pub async fn get_sprint_issues(&self, board_id: &str, sprint_id: u64) -> Result<Vec<Issue>> {
        let url = format!(
            "{}/rest/agile/1.0/board/{}/sprint/{}/issue",
            self.base_url,
            urlencoding::encode(board_id),
            sprint_id
        );

        let result: SprintIssues = self.get(&url, &format!("board-{}", sprint_id)).await?;
        debug!("Found {} issues (total: {})", result.issues.len(), result.total);
        Ok(result.issues)
    }

    /// Get a single issue by key.
    ///
    /// Calls `GET /rest/api/3/issue/{issueKey}`. The key is sent as given.
    #[instrument(skip(self), fields(issue_key = %key))]
    pub async fn get_issue(&self, key: &str) -> Result<Issue> {
        let url = format!(
            "{}/rest/api/3/issue/{}",
            self.base_url,
            urlencoding::encode(key)
        );

        let issue: Issue = self
            .get(&url, &format!("issue-{}", key))
            .await
            .map_err(|e| match e {
                ApiError::NotFound(_) => ApiError::NotFound(format!("Issue '{}' not found", key)),
                e => e,
            })?;

        debug!("Fetched issue: {}", issue.key);
        Ok(issue)
    }

    /// Perform an authenticated GET and decode a 200 response as JSON.
    ///
    /// `dump_name` names the raw body file when dumps are enabled.
    #[instrument(skip(self), fields(url = %url))]
    async fn get<T: DeserializeOwned>(&self, url: &str, dump_name: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .header(header::AUTHORIZATION, self.auth.header_value())
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        debug!(%status, "Response received");

        let body = response.bytes().await.map_err(|source| ApiError::Body {
            url: url.to_string(),
            source,
        })?;

        if let Some(dump) = &self.dump {
            dump.record(dump_name, &body);
        }

        if status != StatusCode::OK {
            let error_body = String::from_utf8_lossy(&body);
            debug!("Error response body: {}", error_body);
            return Err(Self::error_from_response(status, url, &error_body));
        }

        serde_json::from_slice(&body).map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }

    /// Create an appropriate error from an HTTP response.
    ///
    /// JIRA usually explains failures in `errorMessages` or `errors`; those
    /// are preferred over the bare URL as context.
    fn error_from_response(status: StatusCode, url: &str, body: &str) -> ApiError {
        if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
            if let Some(arr) = json.get("errorMessages").and_then(|m| m.as_array()) {
                let messages: Vec<&str> = arr.iter().filter_map(|v| v.as_str()).collect();
                if !messages.is_empty() {
                    return ApiError::from_status(status, &messages.join(", "));
                }
            }
            if let Some(obj) = json.get("errors").and_then(|e| e.as_object()) {
                let errors: Vec<String> =
                    obj.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
                if !errors.is_empty() {
                    return ApiError::from_status(status, &errors.join(", "));
                }
            }
        }

        ApiError::from_status(status, url)
    }
}

/// Normalize the base URL by removing trailing slashes.
fn normalize_base_url(url: &str) -> String {
    let url = url.trim_end_matches('/');

    if !url.starts_with("https://") && !url.contains("localhost") && !url.contains("127.0.0.1") {
        warn!("URL does not use HTTPS: {}. This is insecure for production use.", url);
    }

    url.to_string()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::api::types::SprintState;
    use crate::config::Profile;
    use mockito::{Matcher, Server};
    use serde_json::json;

    /// Base64 of "user:token".
    pub(crate) const AUTH_HEADER: &str = "Basic dXNlcjp0b2tlbg==";

    pub(crate) fn test_config(url: &str, page_size: u32) -> Config {
        Config {
            profile: Profile::new(url.to_string(), "user".to_string(), "token".to_string()),
            page_size,
            dump_dir: None,
        }
    }

    pub(crate) fn sprint_query(start_at: u32, page_size: u32) -> Matcher {
        Matcher::AllOf(vec![
            Matcher::UrlEncoded("startAt".into(), start_at.to_string()),
            Matcher::UrlEncoded("maxResults".into(), page_size.to_string()),
        ])
    }

    #[test]
    fn test_normalize_base_url_removes_trailing_slash() {
        assert_eq!(
            normalize_base_url("https://company.atlassian.net/"),
            "https://company.atlassian.net"
        );
    }

    #[test]
    fn test_normalize_base_url_handles_multiple_slashes() {
        assert_eq!(
            normalize_base_url("https://company.atlassian.net///"),
            "https://company.atlassian.net"
        );
    }

    #[test]
    fn test_normalize_base_url_preserves_path() {
        assert_eq!(
            normalize_base_url("https://company.atlassian.net/jira/"),
            "https://company.atlassian.net/jira"
        );
    }

    #[test]
    fn test_error_from_response_uses_error_messages() {
        let body = r#"{"errorMessages": ["Issue does not exist"], "errors": {}}"#;
        let err = JiraClient::error_from_response(StatusCode::NOT_FOUND, "u", body);
        match err {
            ApiError::NotFound(msg) => assert_eq!(msg, "Issue does not exist"),
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_error_from_response_falls_back_to_url() {
        let err = JiraClient::error_from_response(StatusCode::BAD_GATEWAY, "https://x", "<html>");
        assert_eq!(err.to_string(), "JIRA server error: HTTP 502 Bad Gateway: https://x");
    }

    #[tokio::test]
    async fn test_get_sprints_across_pages() {
        let mut server = Server::new_async().await;

        let first = server
            .mock("GET", "/rest/agile/1.0/board/7/sprint")
            .match_query(sprint_query(0, 2))
            .match_header("authorization", AUTH_HEADER)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "startAt": 0, "maxResults": 2, "isLast": false,
                    "values": [
                        {"id": 1, "name": "Sprint 1", "state": "closed"},
                        {"id": 2, "name": "Sprint 2", "state": "active"}
                    ]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let second = server
            .mock("GET", "/rest/agile/1.0/board/7/sprint")
            .match_query(sprint_query(2, 2))
            .match_header("authorization", AUTH_HEADER)
            .with_status(200)
            .with_body(
                json!({
                    "startAt": 2, "maxResults": 2, "isLast": true,
                    "values": [{"id": 3, "name": "Sprint 3", "state": "future"}]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = JiraClient::new(&test_config(&server.url(), 2)).unwrap();
        let sprints = client.get_sprints("7").await.unwrap();

        first.assert_async().await;
        second.assert_async().await;

        let ids: Vec<u64> = sprints.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(sprints[1].state, SprintState::Active);
    }

    #[tokio::test]
    async fn test_get_sprints_stops_on_empty_page() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/rest/agile/1.0/board/7/sprint")
            .match_query(sprint_query(0, 100))
            .with_status(200)
            .with_body(json!({"isLast": false, "values": []}).to_string())
            .expect(1)
            .create_async()
            .await;

        let client = JiraClient::new(&test_config(&server.url(), 100)).unwrap();
        let sprints = client.get_sprints("7").await.unwrap();

        mock.assert_async().await;
        assert!(sprints.is_empty());
    }

    #[tokio::test]
    async fn test_get_sprints_unauthorized() {
        let mut server = Server::new_async().await;

        server
            .mock("GET", "/rest/agile/1.0/board/7/sprint")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body("")
            .create_async()
            .await;

        let client = JiraClient::new(&test_config(&server.url(), 100)).unwrap();
        let err = client.get_sprints("7").await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
    }

    #[tokio::test]
    async fn test_get_sprints_invalid_json() {
        let mut server = Server::new_async().await;

        server
            .mock("GET", "/rest/agile/1.0/board/7/sprint")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let client = JiraClient::new(&test_config(&server.url(), 100)).unwrap();
        let err = client.get_sprints("7").await.unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_get_sprint_issues() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/rest/agile/1.0/board/7/sprint/42/issue")
            .match_header("authorization", AUTH_HEADER)
            .with_status(200)
            .with_body(
                json!({
                    "startAt": 0, "maxResults": 50, "total": 2,
                    "issues": [
                        {"key": "P-1", "fields": {"summary": "a", "status": {"name": "Done"}}},
                        {"key": "P-2", "fields": {"summary": "b", "status": {"name": "Review"}}}
                    ]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = JiraClient::new(&test_config(&server.url(), 100)).unwrap();
        let issues = client.get_sprint_issues("7", 42).await.unwrap();

        mock.assert_async().await;
        let keys: Vec<&str> = issues.iter().map(|i| i.key.as_str()).collect();
        assert_eq!(keys, vec!["P-1", "P-2"]);
    }

    #[tokio::test]
    async fn test_get_issue_not_found() {
        let mut server = Server::new_async().await;

        server
            .mock("GET", "/rest/api/3/issue/PROJ-404")
            .with_status(404)
            .with_body(json!({"errorMessages": ["Issue does not exist"]}).to_string())
            .create_async()
            .await;

        let client = JiraClient::new(&test_config(&server.url(), 100)).unwrap();
        let err = client.get_issue("PROJ-404").await.unwrap_err();
        match err {
            ApiError::NotFound(msg) => assert_eq!(msg, "Issue 'PROJ-404' not found"),
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_responses_are_dumped() {
        let mut server = Server::new_async().await;
        let tmp = tempfile::tempdir().unwrap();

        server
            .mock("GET", "/rest/api/3/issue/PROJ-1")
            .with_status(200)
            .with_body(r#"{"key": "PROJ-1", "fields": {"summary": "s"}}"#)
            .create_async()
            .await;

        let mut config = test_config(&server.url(), 100);
        config.dump_dir = Some(tmp.path().join("debug"));
        let client = JiraClient::new(&config).unwrap();
        client.get_issue("PROJ-1").await.unwrap();

        let dumped =
            std::fs::read_to_string(tmp.path().join("debug").join("issue-PROJ-1.json")).unwrap();
        assert_eq!(dumped, r#"{"key": "PROJ-1", "fields": {"summary": "s"}}"#);
    }
}
