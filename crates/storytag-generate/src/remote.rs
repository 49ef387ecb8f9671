use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use std::time::Duration;
use storytag_engine::Story;

use crate::generator::{GenerationError, TestGenerator};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct GenerationResponse {
    #[serde(alias = "response", alias = "completion")]
    text: String,
}

/// Text-generation API queried with `GET <endpoint>?prompt=<prompt>`.
///
/// The response body must be JSON with a `text` (or `response`) field.
pub struct RemoteGenerator {
    client: Client,
    endpoint: Url,
    api_key: Option<String>,
    project: Option<String>,
}

impl RemoteGenerator {
    pub fn new(endpoint: impl AsRef<str>) -> Result<Self, GenerationError> {
        Self::with_timeout(endpoint, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        endpoint: impl AsRef<str>,
        timeout: Duration,
    ) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(format!("storytag/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| GenerationError::ClientBuild { source })?;
        Self::with_client(endpoint, client)
    }

    pub fn with_client(endpoint: impl AsRef<str>, client: Client) -> Result<Self, GenerationError> {
        let endpoint =
            Url::parse(endpoint.as_ref()).map_err(|error| GenerationError::InvalidEndpoint {
                url: endpoint.as_ref().to_string(),
                message: error.to_string(),
            })?;

        Ok(Self {
            client,
            endpoint,
            api_key: None,
            project: None,
        })
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    pub fn with_project(mut self, project: Option<String>) -> Self {
        self.project = project;
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn prompt(&self, story: &Story) -> String {
        let mut prompt = String::from("Write a unit test for the following user story.\n");
        if let Some(project) = &self.project {
            prompt.push_str(&format!("Project: {project}\n"));
        }
        prompt.push_str(&format!("Story {}:\n", story.id()));
        if !story.description().is_empty() {
            prompt.push_str(story.description());
            prompt.push('\n');
        }
        prompt.push_str(story.content());
        prompt
    }
}

#[async_trait]
impl TestGenerator for RemoteGenerator {
    async fn generate(&self, story: &Story) -> Result<String, GenerationError> {
        let mut request = self
            .client
            .get(self.endpoint.clone())
            .query(&[("prompt", self.prompt(story))]);
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|source| GenerationError::Network { source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerationError::HttpStatus { status });
        }

        let body: GenerationResponse =
            response
                .json()
                .await
                .map_err(|error| GenerationError::InvalidResponse {
                    message: error.to_string(),
                })?;

        let code = strip_code_fence(&body.text);
        if code.is_empty() {
            return Err(GenerationError::InvalidResponse {
                message: "empty generation".to_string(),
            });
        }
        Ok(code.to_string())
    }
}

/// Unwrap a single fenced block if the model answered with markdown.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (e.g. `javascript`) on the opening line
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.strip_suffix("```").unwrap_or(body).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use reqwest::StatusCode;
    use rstest::rstest;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve one canned HTTP response on a loopback port, returning the
    /// endpoint URL and a handle resolving to the raw request head.
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&request).into_owned()
        });

        (format!("http://{addr}/generate"), handle)
    }

    fn sample_story() -> Story {
        let mut story = Story::new("7");
        story.push_line("As a visitor I can sign up");
        story
    }

    #[tokio::test]
    async fn test_generate_returns_text_and_sends_prompt() {
        let (url, server) =
            serve_once("200 OK", r#"{"text":"test('signup', () => {});"}"#).await;
        let generator = RemoteGenerator::new(&url)
            .unwrap()
            .with_api_key(Some("secret".to_string()))
            .with_project(Some("2024".to_string()));

        let block = generator.generate(&sample_story()).await.unwrap();
        assert_eq!(block, "test('signup', () => {});");

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /generate?prompt="));
        assert!(request.contains("Project%3A+2024") || request.contains("Project%3A%202024"));
        assert!(request.to_lowercase().contains("authorization: bearer secret"));
    }

    #[tokio::test]
    async fn test_generate_accepts_response_field() {
        let (url, server) =
            serve_once("200 OK", r#"{"response":"it('works', () => {});"}"#).await;
        let generator = RemoteGenerator::new(&url).unwrap();

        let block = generator.generate(&sample_story()).await.unwrap();
        assert_eq!(block, "it('works', () => {});");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let (url, server) =
            serve_once("500 Internal Server Error", r#"{"error":"boom"}"#).await;
        let generator = RemoteGenerator::new(&url).unwrap();

        let result = generator.generate(&sample_story()).await;
        assert!(matches!(
            result,
            Err(GenerationError::HttpStatus { status }) if status == StatusCode::INTERNAL_SERVER_ERROR
        ));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_malformed_body_is_invalid_response() {
        let (url, server) = serve_once("200 OK", r#"{"unexpected":true}"#).await;
        let generator = RemoteGenerator::new(&url).unwrap();

        let result = generator.generate(&sample_story()).await;
        assert!(matches!(result, Err(GenerationError::InvalidResponse { .. })));
        server.await.unwrap();
    }

    #[test]
    fn test_invalid_endpoint() {
        let result = RemoteGenerator::new("not a url");
        assert!(matches!(result, Err(GenerationError::InvalidEndpoint { .. })));
    }

    #[test]
    fn test_prompt_includes_story() {
        let mut story = sample_story();
        story.set_description("Sign-up");
        let generator = RemoteGenerator::new("http://localhost/generate").unwrap();

        assert_eq!(
            generator.prompt(&story),
            "Write a unit test for the following user story.\nStory 7:\nSign-up\nAs a visitor I can sign up\n"
        );
    }

    #[rstest]
    #[case("plain();", "plain();")]
    #[case("```javascript\ntest();\n```", "test();")]
    #[case("```\ntest();\n```\n", "test();")]
    #[case("  spaced();  ", "spaced();")]
    fn test_strip_code_fence(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(strip_code_fence(input), expected);
    }
}
