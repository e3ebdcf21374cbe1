//! HTTP client for an Ollama-compatible `/api/generate` endpoint.

use std::future::Future;
use std::pin::Pin;
use std::time::Instant;

use reqwest::Client;

use super::types::{GenerationJob, GenerationResult};
use super::Generator;
use crate::config::BackendConfig;
use crate::error::{HashtagError, Result};

/// Generation client backed by a shared `reqwest` connection pool.
///
/// The client is built once and cloned cheaply; its configuration never
/// changes after construction.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: Client,
    generate_url: String,
}

impl OllamaClient {
    /// Create a client for the backend described by `config`.
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| HashtagError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            generate_url: config.generate_url(),
        })
    }

    /// Full URL of the generate endpoint.
    pub fn generate_url(&self) -> &str {
        &self.generate_url
    }

    async fn send(&self, job: &GenerationJob) -> Result<GenerationResult> {
        let start = Instant::now();

        let response = self
            .client
            .post(&self.generate_url)
            .json(job)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<unreadable body: {e}>"));
            return Err(HashtagError::Upstream(format!(
                "backend returned {status}: {body}"
            )));
        }

        let bytes = response.bytes().await?;
        tracing::debug!(
            model = %job.model,
            latency_ms = start.elapsed().as_millis() as u64,
            bytes = bytes.len(),
            "backend responded"
        );

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(HashtagError::EmptyUpstreamResponse(
                "backend returned an empty body".to_string(),
            ));
        }

        let result: GenerationResult = serde_json::from_slice(&bytes).map_err(|e| {
            HashtagError::EmptyUpstreamResponse(format!("backend envelope is not readable: {e}"))
        })?;

        if result.raw_text.trim().is_empty() {
            return Err(HashtagError::EmptyUpstreamResponse(
                "backend envelope has no generated text".to_string(),
            ));
        }

        tracing::trace!(raw = %result.raw_text, done = result.done, "generated text");
        Ok(result)
    }
}

impl Generator for OllamaClient {
    fn generate<'a>(
        &'a self,
        job: &'a GenerationJob,
    ) -> Pin<Box<dyn Future<Output = Result<GenerationResult>> + Send + 'a>> {
        Box::pin(self.send(job))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;
    use crate::backend::GenerationOptions;

    /// Serve one connection with a raw HTTP reply, then close it.
    async fn raw_backend(reply: String) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            socket.write_all(reply.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            // drain until the client hangs up so the close is a FIN, not a reset
            while matches!(socket.read(&mut buf).await, Ok(n) if n > 0) {}
        });

        format!("http://{addr}")
    }

    fn job() -> GenerationJob {
        GenerationJob::new("m", "p", json!({}), GenerationOptions::default())
    }

    #[tokio::test]
    async fn test_error_status_keeps_body() {
        let body = r#"{"error":"model 'm' not found"}"#;
        let reply = format!(
            "HTTP/1.1 404 Not Found\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        let config = BackendConfig {
            base_url: raw_backend(reply).await,
            ..Default::default()
        };

        let err = OllamaClient::new(&config)
            .unwrap()
            .generate(&job())
            .await
            .unwrap_err();
        match err {
            HashtagError::Upstream(msg) => {
                assert!(msg.contains("404"));
                assert!(msg.contains("model 'm' not found"));
            },
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_error_status_with_truncated_body() {
        // Declares 100 bytes, sends 7, then closes.
        let config = BackendConfig {
            base_url: raw_backend(
                "HTTP/1.1 500 Internal Server Error\r\ncontent-length: 100\r\nconnection: close\r\n\r\npartial"
                    .to_string(),
            )
            .await,
            ..Default::default()
        };

        let err = OllamaClient::new(&config)
            .unwrap()
            .generate(&job())
            .await
            .unwrap_err();
        match err {
            HashtagError::Upstream(msg) => {
                assert!(msg.contains("500"));
                assert!(msg.contains("<unreadable body:"));
            },
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_generate_url_joins_base() {
        let config = BackendConfig {
            base_url: "http://127.0.0.1:11434/".to_string(),
            ..Default::default()
        };
        let client = OllamaClient::new(&config).unwrap();
        assert_eq!(client.generate_url(), "http://127.0.0.1:11434/api/generate");
    }
}
