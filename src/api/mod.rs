//! Typed operations over the JATS HTTP API.
//!
//! [`Jats`] is a stateless wrapper: it holds no task data, only the base
//! URL and the bearer token it was constructed with. Construct it from a
//! [`Config`] at the call site; there is no process-wide client.

mod client;
mod error;
mod models;

pub use error::ApiError;
pub use models::*;

use crate::config::Config;
use client::Client;
use reqwest::Method;
use tracing::info;

/// API client for one server + credential pair.
///
pub struct Jats {
    client: Client,
}

impl Jats {
    /// Build a client from the loaded credentials.
    ///
    pub fn new(config: &Config) -> Result<Jats, ApiError> {
        Jats::with_token(&config.server_url, config.token.clone())
    }

    /// Build a client for an explicit base URL and optional token.
    ///
    pub fn with_token(base_url: &str, token: Option<String>) -> Result<Jats, ApiError> {
        Ok(Jats {
            client: Client::new(base_url, token)?,
        })
    }

    /// POST `/api/v1/auth/login`; returns the session token extracted
    /// from the `session_token` cookie.
    ///
    pub async fn login(&self, username: &str, password: &str) -> Result<String, ApiError> {
        let token = self.client.login(username, password).await?;
        info!("logged in as {}", username);
        Ok(token)
    }

    /// POST `/api/v1/tasks`.
    ///
    pub async fn create_task(&self, request: &CreateTask) -> Result<Task, ApiError> {
        self.client
            .request("create task", Method::POST, "/api/v1/tasks", &[], Some(request))
            .await
    }

    /// GET `/api/v1/tasks` with the given filter window.
    ///
    pub async fn tasks(&self, query: &TaskQuery) -> Result<TaskPage, ApiError> {
        self.client
            .request::<TaskPage, ()>(
                "list tasks",
                Method::GET,
                "/api/v1/tasks",
                &query.to_params(),
                None,
            )
            .await
    }

    /// GET `/api/v1/tasks/{id}`, including time entries and comments.
    ///
    pub async fn task(&self, id: u64) -> Result<Task, ApiError> {
        self.client
            .request::<Task, ()>(
                "get task",
                Method::GET,
                &format!("/api/v1/tasks/{}", id),
                &[],
                None,
            )
            .await
    }

    /// PATCH `/api/v1/tasks/{id}` with a partial update.
    ///
    pub async fn update_task(&self, id: u64, patch: &TaskPatch) -> Result<Task, ApiError> {
        self.client
            .request(
                "update task",
                Method::PATCH,
                &format!("/api/v1/tasks/{}", id),
                &[],
                Some(patch),
            )
            .await
    }

    /// POST `/api/v1/tasks/{id}/time`.
    ///
    pub async fn log_time(&self, id: u64, entry: &LogTime) -> Result<TimeEntry, ApiError> {
        self.client
            .request(
                "log time",
                Method::POST,
                &format!("/api/v1/tasks/{}/time", id),
                &[],
                Some(entry),
            )
            .await
    }

    /// POST `/api/v1/tasks/{id}/comments`. Comments from this client are
    /// always private.
    ///
    pub async fn add_comment(&self, id: u64, content: &str) -> Result<Comment, ApiError> {
        let body = serde_json::json!({ "content": content, "is_private": true });
        self.client
            .request(
                "add comment",
                Method::POST,
                &format!("/api/v1/tasks/{}/comments", id),
                &[],
                Some(&body),
            )
            .await
    }

    /// GET `/api/v1/saved-queries`.
    ///
    pub async fn saved_queries(&self) -> Result<Vec<SavedQuery>, ApiError> {
        self.client
            .request::<Vec<SavedQuery>, ()>(
                "list saved queries",
                Method::GET,
                "/api/v1/saved-queries",
                &[],
                None,
            )
            .await
    }

    /// POST `/api/v1/saved-queries`.
    ///
    pub async fn create_saved_query(
        &self,
        request: &NewSavedQuery,
    ) -> Result<SavedQuery, ApiError> {
        self.client
            .request(
                "create saved query",
                Method::POST,
                "/api/v1/saved-queries",
                &[],
                Some(request),
            )
            .await
    }

    /// GET `/api/v1/summary/tasks`, optionally scoped to a saved query.
    ///
    pub async fn task_summary(
        &self,
        saved_query_id: Option<u64>,
    ) -> Result<TaskSummary, ApiError> {
        let mut params = Vec::new();
        if let Some(id) = saved_query_id {
            params.push(("saved_query_id".to_string(), id.to_string()));
        }
        self.client
            .request::<TaskSummary, ()>(
                "task summary",
                Method::GET,
                "/api/v1/summary/tasks",
                &params,
                None,
            )
            .await
    }

    /// GET `/api/v1/reports/time` for the inclusive date range.
    ///
    pub async fn time_report(
        &self,
        from: &str,
        to: &str,
    ) -> Result<TimeBreakdownReport, ApiError> {
        let params = vec![
            ("from".to_string(), from.to_string()),
            ("to".to_string(), to.to_string()),
        ];
        self.client
            .request::<TimeBreakdownReport, ()>(
                "time report",
                Method::GET,
                "/api/v1/reports/time",
                &params,
                None,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::{Fake, Faker};
    use httpmock::MockServer;
    use serde_json::json;

    fn client(server: &MockServer, token: Option<&str>) -> Jats {
        Jats::with_token(&server.base_url(), token.map(str::to_string)).unwrap()
    }

    fn task_json(id: u64, name: &str, status: &str) -> serde_json::Value {
        json!({
            "id": id,
            "name": name,
            "description": "",
            "status": status,
            "priority": "none",
            "tags": [],
            "time_entries": [],
            "comments": []
        })
    }

    #[tokio::test]
    async fn login_extracts_session_cookie() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("POST")
                    .path("/api/v1/auth/login")
                    .json_body(json!({ "username": "admin", "password": "hunter2" }));
                then.status(200)
                    .header("Set-Cookie", "session_token=abc; Path=/; HttpOnly")
                    .json_body(json!({ "success": true, "data": null, "message": "" }));
            })
            .await;

        let api = client(&server, None);
        let token = api.login("admin", "hunter2").await.unwrap();
        assert_eq!(token, "abc");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn login_without_cookie_is_an_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method("POST").path("/api/v1/auth/login");
                then.status(200)
                    .json_body(json!({ "success": true, "data": null, "message": "" }));
            })
            .await;

        let api = client(&server, None);
        let error = api.login("admin", "hunter2").await.unwrap_err();
        assert_eq!(
            error.to_string(),
            "login succeeded but no session token found"
        );
    }

    #[tokio::test]
    async fn requests_carry_the_bearer_token() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("GET")
                    .path("/api/v1/tasks/7")
                    .header("Authorization", "Bearer abc");
                then.status(200).json_body(json!({
                    "success": true,
                    "data": task_json(7, "restart", "open"),
                    "message": ""
                }));
            })
            .await;

        let api = client(&server, Some("abc"));
        let task = api.task(7).await.unwrap();
        assert_eq!(task.id, 7);
        assert_eq!(task.name, "restart");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn create_task_posts_the_request_body() {
        let name: String = Faker.fake();
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("POST").path("/api/v1/tasks").json_body(json!({
                    "name": &name,
                    "tags": ["docker", "urgent"]
                }));
                then.status(200).json_body(json!({
                    "success": true,
                    "data": task_json(3, &name, "open"),
                    "message": ""
                }));
            })
            .await;

        let api = client(&server, Some("abc"));
        let task = api
            .create_task(&CreateTask {
                name: name.clone(),
                tags: vec!["docker".to_string(), "urgent".to_string()],
                ..CreateTask::default()
            })
            .await
            .unwrap();
        assert_eq!(task.id, 3);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn list_tasks_sends_comma_joined_filters() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("GET")
                    .path("/api/v1/tasks")
                    .query_param("status", "open,in-progress")
                    .query_param("tags", "backend")
                    .query_param("limit", "20")
                    .query_param("offset", "20");
                then.status(200).json_body(json!({
                    "success": true,
                    "data": {
                        "items": [task_json(1, "a", "open")],
                        "pagination": { "total": 21, "limit": 20, "offset": 20, "pages": 2 }
                    },
                    "message": ""
                }));
            })
            .await;

        let api = client(&server, Some("abc"));
        let page = api
            .tasks(&TaskQuery {
                status: vec![TaskStatus::Open, TaskStatus::InProgress],
                tags: vec!["backend".to_string()],
                limit: 20,
                offset: 20,
                ..TaskQuery::default()
            })
            .await
            .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.pagination.pages, 2);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn envelope_rejection_carries_the_server_message() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method("PATCH").path("/api/v1/tasks/9");
                then.status(200).json_body(json!({
                    "success": false,
                    "data": null,
                    "message": "invalid priority"
                }));
            })
            .await;

        let api = client(&server, Some("abc"));
        let error = api
            .update_task(9, &TaskPatch::status(TaskStatus::Resolved))
            .await
            .unwrap_err();
        assert_eq!(error.to_string(), "update task failed: invalid priority");
    }

    #[tokio::test]
    async fn envelope_with_omitted_fields_still_decodes() {
        // Some endpoints leave `data` and `message` out instead of
        // sending null; the envelope must not require them.
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method("GET").path("/api/v1/tasks/3");
                then.status(200).json_body(json!({ "success": false }));
            })
            .await;

        let api = client(&server, Some("abc"));
        let error = api.task(3).await.unwrap_err();
        assert_eq!(error.to_string(), "get task failed: unknown error");
    }

    #[tokio::test]
    async fn http_errors_preserve_the_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method("GET").path("/api/v1/tasks");
                then.status(503).body("maintenance window");
            })
            .await;

        let api = client(&server, Some("abc"));
        let error = api.tasks(&TaskQuery::default()).await.unwrap_err();
        assert_eq!(error.to_string(), "API error (503): maintenance window");
    }

    #[tokio::test]
    async fn summary_is_scoped_by_saved_query_id() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("GET")
                    .path("/api/v1/summary/tasks")
                    .query_param("saved_query_id", "4");
                then.status(200).json_body(json!({
                    "success": true,
                    "data": { "open": 2, "in_progress": 1, "recently_added": 3, "recently_resolved": 0 },
                    "message": ""
                }));
            })
            .await;

        let api = client(&server, Some("abc"));
        let summary = api.task_summary(Some(4)).await.unwrap();
        assert_eq!(summary.open, 2);
        assert_eq!(summary.recently_added, 3);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn time_report_round_trips() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("GET")
                    .path("/api/v1/reports/time")
                    .query_param("from", "2024-01-01")
                    .query_param("to", "2024-01-07");
                then.status(200).json_body(json!({
                    "success": true,
                    "data": {
                        "queries": ["Backend"],
                        "rows": [
                            { "date": "2024-01-01", "minutes": [90], "other": 30, "total": 120 }
                        ],
                        "totals": [90],
                        "other_total": 30,
                        "percentages": [75.0]
                    },
                    "message": ""
                }));
            })
            .await;

        let api = client(&server, Some("abc"));
        let report = api.time_report("2024-01-01", "2024-01-07").await.unwrap();
        assert_eq!(report.queries, vec!["Backend"]);
        assert_eq!(report.rows[0].total, 120);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn comments_are_always_private() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("POST")
                    .path("/api/v1/tasks/5/comments")
                    .json_body(json!({ "content": "looks done", "is_private": true }));
                then.status(200).json_body(json!({
                    "success": true,
                    "data": { "id": 11, "content": "looks done", "is_private": true },
                    "message": ""
                }));
            })
            .await;

        let api = client(&server, Some("abc"));
        let comment = api.add_comment(5, "looks done").await.unwrap();
        assert_eq!(comment.id, 11);
        mock.assert_async().await;
    }
}
