//! reqwest implementation of [`Backend`].

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{
    multipart::{Form, Part},
    Client, RequestBuilder, Response, StatusCode, Url,
};
use serde::de::DeserializeOwned;

use super::Backend;
use crate::{
    error::{ClientError, Result},
    models::{
        Course, FollowStats, GenerateTasksResponse, GeneratedTask, LearningPlan, Post,
        SavedPostCount, SavedPostState, User,
    },
    posts::NewPost,
};

/// HTTP client for the platform's REST API.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    /// Creates a backend rooted at `base_url` (e.g. `http://localhost:8070/api`).
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Configuration {
                message: format!("Failed to build HTTP client: {e}"),
            })?;

        let raw = base_url.into();
        let mut base_url = Url::parse(raw.trim()).map_err(|e| ClientError::Configuration {
            message: format!("Invalid API URL '{raw}': {e}"),
        })?;
        match base_url.path_segments_mut() {
            Ok(mut path) => {
                path.pop_if_empty();
            }
            Err(()) => {
                return Err(ClientError::Configuration {
                    message: format!("API URL '{raw}' cannot carry a path"),
                })
            }
        }

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Appends each segment percent-encoded, so an id can never change the
    /// route it is sent to.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Sends the request and turns non-2xx answers into [`ClientError::Status`].
    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await.map_err(|e| ClientError::network(&e))?;
        let status = response.status();
        debug!("{} {}", status.as_u16(), response.url());

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(ClientError::Status {
            status: status.as_u16(),
            message: extract_message(&body),
        })
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self.send(request).await?;
        let bytes = response.bytes().await.map_err(|e| ClientError::network(&e))?;
        decode(&bytes)
    }
}

/// Decodes a response body, reporting shape mismatches as malformed.
fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|e| ClientError::MalformedResponse {
        message: e.to_string(),
    })
}

/// Best-effort extraction of a human message from an error body.
pub(crate) fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .find_map(|key| value.get(key)?.as_str())
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(String::from)
}

/// Unwraps the `tasks` array of a generation response.
pub(crate) fn generated_tasks(response: GenerateTasksResponse) -> Result<Vec<GeneratedTask>> {
    response.tasks.ok_or_else(|| ClientError::MalformedResponse {
        message: "response has no `tasks` array".to_string(),
    })
}

#[async_trait]
impl Backend for HttpBackend {
    async fn create_plan(&self, plan: &LearningPlan) -> Result<LearningPlan> {
        debug!("Creating learning plan '{}'", plan.title);
        self.send_json(self.client.post(self.url(&["learningplans"])).json(plan))
            .await
    }

    async fn plans_for_user(&self, user_id: &str) -> Result<Vec<LearningPlan>> {
        self.send_json(
            self.client
                .get(self.url(&["learningplans", "user", user_id])),
        )
        .await
    }

    async fn get_plan(&self, id: &str) -> Result<LearningPlan> {
        let request = self.client.get(self.url(&["learningplans", id]));
        match self.send_json(request).await {
            Err(ClientError::Status { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => {
                Err(ClientError::PlanNotFound { id: id.to_string() })
            }
            other => other,
        }
    }

    async fn update_plan(&self, id: &str, plan: &LearningPlan) -> Result<LearningPlan> {
        debug!("Updating learning plan {id}");
        self.send_json(
            self.client
                .put(self.url(&["learningplans", id]))
                .json(plan),
        )
        .await
    }

    async fn delete_plan(&self, id: &str) -> Result<()> {
        self.send(self.client.delete(self.url(&["learningplans", id])))
            .await
            .map(drop)
    }

    async fn generate_tasks(&self, request: &LearningPlan) -> Result<Vec<GeneratedTask>> {
        let response: GenerateTasksResponse = self
            .send_json(
                self.client
                    .post(self.url(&["ailearningplans", "generate-tasks"]))
                    .json(request),
            )
            .await?;
        generated_tasks(response)
    }

    async fn list_courses(&self) -> Result<Vec<Course>> {
        self.send_json(self.client.get(self.url(&["dsrcourses"]))).await
    }

    async fn toggle_saved_post(&self, user_id: &str, post_id: &str) -> Result<bool> {
        let state: SavedPostState = self
            .send_json(
                self.client
                    .post(self.url(&["saved", "toggle"]))
                    .query(&[("userId", user_id), ("postId", post_id)]),
            )
            .await?;
        Ok(state.saved)
    }

    async fn saved_post_status(&self, user_id: &str, post_id: &str) -> Result<bool> {
        let state: SavedPostState = self
            .send_json(
                self.client
                    .get(self.url(&["saved", "status"]))
                    .query(&[("userId", user_id), ("postId", post_id)]),
            )
            .await?;
        Ok(state.saved)
    }

    async fn saved_post_count(&self, user_id: &str) -> Result<u64> {
        let count: SavedPostCount = self
            .send_json(
                self.client
                    .get(self.url(&["saved", "count"]))
                    .query(&[("userId", user_id)]),
            )
            .await?;
        Ok(count.count)
    }

    async fn saved_posts(&self, user_id: &str) -> Result<Vec<Post>> {
        self.send_json(
            self.client
                .get(self.url(&["saved", "posts"]))
                .query(&[("userId", user_id)]),
        )
        .await
    }

    async fn search_users(&self, query: &str) -> Result<Vec<User>> {
        self.send_json(
            self.client
                .get(self.url(&["user", "search-v2"]))
                .query(&[("query", query)]),
        )
        .await
    }

    async fn follow(&self, user_id: &str, target_id: &str) -> Result<()> {
        self.send(
            self.client
                .post(self.url(&["follow", user_id, target_id])),
        )
        .await
        .map(drop)
    }

    async fn unfollow(&self, user_id: &str, target_id: &str) -> Result<()> {
        self.send(
            self.client
                .delete(self.url(&["follow", user_id, target_id])),
        )
        .await
        .map(drop)
    }

    async fn is_following(&self, user_id: &str, target_id: &str) -> Result<bool> {
        self.send_json(
            self.client
                .get(self.url(&["follow", "check", user_id, target_id])),
        )
        .await
    }

    async fn follow_stats(&self, user_id: &str) -> Result<FollowStats> {
        self.send_json(self.client.get(self.url(&["follow", "stats", user_id])))
            .await
    }

    async fn followers(&self, user_id: &str) -> Result<Vec<User>> {
        self.send_json(self.client.get(self.url(&["user", "followers", user_id])))
            .await
    }

    async fn following(&self, user_id: &str) -> Result<Vec<User>> {
        self.send_json(self.client.get(self.url(&["user", "following", user_id])))
            .await
    }

    async fn create_post(&self, post: &NewPost) -> Result<()> {
        debug!(
            "Uploading post with {} media file(s) for {}",
            post.media().len(),
            post.user_id()
        );
        let mut form = Form::new()
            .text("userId", post.user_id().to_string())
            .text("description", post.description().to_string())
            .text("isVideo", post.is_video().to_string());
        for file in post.media() {
            let part = Part::bytes(file.bytes.clone())
                .file_name(file.file_name.clone())
                .mime_str(&file.content_type)
                .map_err(|e| {
                    ClientError::invalid_input("media")
                        .with_reason(format!("Unsupported file '{}': {e}", file.file_name))
                })?;
            form = form.part("mediaFiles", part);
        }

        self.send(self.client.post(self.url(&["media", "post"])).multipart(form))
            .await
            .map(drop)
    }

    async fn user_posts(&self, user_id: &str) -> Result<Vec<Post>> {
        self.send_json(self.client.get(self.url(&["media", "user", user_id])))
            .await
    }

    async fn update_post(&self, post_id: &str, description: &str) -> Result<()> {
        self.send(
            self.client
                .put(self.url(&["media", "update", post_id]))
                .header(reqwest::header::CONTENT_TYPE, "text/plain")
                .body(description.to_string()),
        )
        .await
        .map(drop)
    }

    async fn delete_post(&self, post_id: &str) -> Result<()> {
        self.send(self.client.delete(self.url(&["media", "delete", post_id])))
            .await
            .map(drop)
    }
}

#[cfg(test)]
mod tests {
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
        task::JoinHandle,
    };

    use super::*;

    /// Answers exactly one request with `status` and `body`, returning the
    /// backend pointed at it and a handle yielding the raw request head.
    async fn serve_once(status: &'static str, body: &'static str) -> (HttpBackend, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");

        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.expect("No connection");
            let head = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket
                .write_all(response.as_bytes())
                .await
                .expect("Failed to write response");
            let _ = socket.shutdown().await;
            head
        });

        let backend = HttpBackend::new(format!("http://{addr}/api"), Duration::from_secs(5))
            .expect("Failed to build backend");
        (backend, server)
    }

    /// Reads the request head and drains its body so the client never sees a
    /// reset connection.
    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut data = Vec::new();
        let mut chunk = [0u8; 4096];
        let head_end = loop {
            let n = socket.read(&mut chunk).await.expect("Failed to read request");
            if n == 0 {
                break data.len();
            }
            data.extend_from_slice(&chunk[..n]);
            if let Some(pos) = data.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };
        let head = String::from_utf8_lossy(&data[..head_end]).into_owned();
        let lower = head.to_ascii_lowercase();

        if let Some(length) = lower
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|value| value.trim().parse::<usize>().ok())
        {
            let mut received = data.len() - head_end;
            while received < length {
                let n = socket.read(&mut chunk).await.expect("Failed to read body");
                if n == 0 {
                    break;
                }
                received += n;
            }
        } else if lower.contains("transfer-encoding: chunked") {
            let mut body = data[head_end..].to_vec();
            while !body.ends_with(b"0\r\n\r\n") {
                let n = socket.read(&mut chunk).await.expect("Failed to read body");
                if n == 0 {
                    break;
                }
                body.extend_from_slice(&chunk[..n]);
            }
        }
        head
    }

    fn request_line(head: &str) -> &str {
        head.lines().next().unwrap_or_default()
    }

    #[test]
    fn test_url_joins_without_double_slashes() {
        let backend = HttpBackend::new("http://localhost:8070/api/", Duration::from_secs(5))
            .expect("Failed to build backend");
        assert_eq!(backend.base_url(), "http://localhost:8070/api");
        assert_eq!(
            backend.url(&["learningplans", "42"]).as_str(),
            "http://localhost:8070/api/learningplans/42"
        );
    }

    #[test]
    fn test_ids_stay_in_one_path_segment() {
        let backend = HttpBackend::new("http://localhost:8070/api", Duration::from_secs(5))
            .expect("Failed to build backend");
        assert_eq!(
            backend.url(&["learningplans", "a/b?c#d"]).as_str(),
            "http://localhost:8070/api/learningplans/a%2Fb%3Fc%23d"
        );
        assert_eq!(
            backend.url(&["follow", "u 1", "../admin"]).as_str(),
            "http://localhost:8070/api/follow/u%201/..%2Fadmin"
        );
    }

    #[test]
    fn test_invalid_base_url_is_configuration_error() {
        let err = HttpBackend::new("not a url", Duration::from_secs(5)).unwrap_err();
        assert!(matches!(err, ClientError::Configuration { .. }));
    }

    #[tokio::test]
    async fn test_error_status_carries_body_message() {
        let (backend, server) =
            serve_once("400 Bad Request", r#"{"message":"Title is required"}"#).await;

        let err = backend
            .create_plan(&LearningPlan::default())
            .await
            .unwrap_err();
        match &err {
            ClientError::Status { status, message } => {
                assert_eq!(*status, 400);
                assert_eq!(message.as_deref(), Some("Title is required"));
            }
            other => panic!("expected a status error, got {other:?}"),
        }
        assert_eq!(err.user_message(), "Server error (400): Title is required");

        let head = server.await.unwrap();
        assert_eq!(request_line(&head), "POST /api/learningplans HTTP/1.1");
    }

    #[tokio::test]
    async fn test_error_status_falls_back_to_error_field() {
        let (backend, _server) = serve_once(
            "500 Internal Server Error",
            r#"{"error":"Internal Server Error","status":500}"#,
        )
        .await;

        let err = backend.list_courses().await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::Status { status: 500, message: Some(ref m) } if m == "Internal Server Error"
        ));
    }

    #[tokio::test]
    async fn test_missing_plan_is_not_found() {
        let (backend, server) = serve_once("404 Not Found", "").await;

        let err = backend.get_plan("gone/1").await.unwrap_err();
        assert!(matches!(err, ClientError::PlanNotFound { ref id } if id == "gone/1"));
        assert_eq!(err.user_message(), "Learning plan gone/1 no longer exists.");

        let head = server.await.unwrap();
        assert_eq!(request_line(&head), "GET /api/learningplans/gone%2F1 HTTP/1.1");
    }

    #[tokio::test]
    async fn test_generation_without_tasks_is_malformed() {
        let (backend, _server) = serve_once("200 OK", r#"{"title":"Temporary Plan"}"#).await;

        let err = backend
            .generate_tasks(&LearningPlan::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::MalformedResponse { .. }));
        assert_eq!(err.user_message(), "Error: Invalid response format");
    }

    #[tokio::test]
    async fn test_non_json_success_is_malformed() {
        let (backend, _server) = serve_once("200 OK", "<html>maintenance</html>").await;

        let err = backend.plans_for_user("u-1").await.unwrap_err();
        assert!(matches!(err, ClientError::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn test_follow_check_and_stats_decode() {
        let (backend, server) = serve_once("200 OK", "true").await;
        assert!(backend.is_following("u-1", "u-2").await.unwrap());
        assert_eq!(
            request_line(&server.await.unwrap()),
            "GET /api/follow/check/u-1/u-2 HTTP/1.1"
        );

        let (backend, _server) = serve_once("200 OK", r#"{"followers":3,"following":5}"#).await;
        assert_eq!(
            backend.follow_stats("u-2").await.unwrap(),
            FollowStats {
                followers: 3,
                following: 5
            }
        );
    }

    #[tokio::test]
    async fn test_post_upload_is_multipart() {
        let (backend, server) = serve_once("200 OK", "").await;
        let post = NewPost::new(
            "u-1",
            "First steps",
            vec![crate::posts::MediaFile::new("shot.png", vec![1, 2, 3])],
        )
        .unwrap();

        backend.create_post(&post).await.unwrap();

        let head = server.await.unwrap();
        assert_eq!(request_line(&head), "POST /api/media/post HTTP/1.1");
        assert!(head
            .to_ascii_lowercase()
            .contains("content-type: multipart/form-data"));
    }

    #[tokio::test]
    async fn test_refused_connection_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let backend =
            HttpBackend::new(format!("http://{addr}/api"), Duration::from_secs(5)).unwrap();
        let err = backend.list_courses().await.unwrap_err();
        assert!(matches!(err, ClientError::Network { .. }));
    }

    #[test]
    fn test_extract_message_from_json_body() {
        assert_eq!(
            extract_message(r#"{"message":"Title is required"}"#),
            Some("Title is required".to_string())
        );
        assert_eq!(
            extract_message(r#"{"error":"Bad Request","status":400}"#),
            Some("Bad Request".to_string())
        );
        assert_eq!(extract_message(r#"{"message":"  "}"#), None);
        assert_eq!(extract_message("<html>oops</html>"), None);
    }

    #[test]
    fn test_missing_tasks_array_is_malformed() {
        let response: GenerateTasksResponse =
            decode(br#"{"title":"Temporary Plan"}"#).expect("object decodes");
        assert!(matches!(
            generated_tasks(response),
            Err(ClientError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn test_empty_tasks_array_is_not_an_error() {
        let response: GenerateTasksResponse = decode(br#"{"tasks":[]}"#).unwrap();
        assert!(generated_tasks(response).unwrap().is_empty());
    }

    #[test]
    fn test_generation_response_decodes_optional_fields() {
        let response: GenerateTasksResponse = decode(
            br#"{"tasks":[{"taskName":"Build a Hook","taskDescription":"useCounter",
                 "objective":"State","estimatedTime":"2h",
                 "suggestedResources":["https://react.dev"]}]}"#,
        )
        .unwrap();
        let tasks = generated_tasks(response).unwrap();

        assert_eq!(tasks[0].task_name, "Build a Hook");
        assert_eq!(tasks[0].estimated_time.as_deref(), Some("2h"));
        assert_eq!(tasks[0].suggested_resources, vec!["https://react.dev"]);
    }

    #[test]
    fn test_non_json_body_is_malformed() {
        let result: Result<Vec<Course>> = decode(b"not json");
        assert!(matches!(result, Err(ClientError::MalformedResponse { .. })));
    }
}
