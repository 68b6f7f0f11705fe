//! Shared HTTP plumbing for the provider adapters.
//!
//! Every adapter builds its own `reqwest::Client` with an explicit timeout
//! and maps transport failures and non-2xx statuses the same way.

use std::time::Duration;

use skillforge_types::llm::ProviderError;

/// Build an HTTP client whose every request is bounded by `timeout`.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client, ProviderError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ProviderError::InvalidRequest(format!("failed to create HTTP client: {e}")))
}

/// Map a `reqwest` send/read failure to a [`ProviderError`].
pub fn map_send_error(err: reqwest::Error, timeout: Duration) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Timeout {
            secs: timeout.as_secs(),
        }
    } else {
        ProviderError::Http(err.to_string())
    }
}

/// Pass 2xx responses through; turn anything else into a [`ProviderError`].
///
/// A `Retry-After` header (seconds) on a 429 is carried into the error.
pub async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let retry_after_ms = retry_after_ms(response.headers());
    let body = response.text().await.unwrap_or_default();

    Err(match ProviderError::from_status(status.as_u16(), body) {
        ProviderError::RateLimited { .. } => ProviderError::RateLimited { retry_after_ms },
        other => other,
    })
}

/// `Retry-After` in milliseconds. Values that do not fit are treated as absent.
fn retry_after_ms(headers: &reqwest::header::HeaderMap) -> Option<u64> {
    headers
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .and_then(|secs| secs.checked_mul(1000))
}

/// Resolve the model for a request: the request's override, else the adapter default.
pub fn effective_model<'a>(requested: &'a str, default: &'a str) -> &'a str {
    if requested.is_empty() { default } else { requested }
}

/// Join a base URL and a path without doubling or dropping the slash.
pub fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("https://ark.cn-beijing.volces.com/api/v3", "/responses"),
            "https://ark.cn-beijing.volces.com/api/v3/responses"
        );
        assert_eq!(
            join_url("http://localhost:11434/", "api/generate"),
            "http://localhost:11434/api/generate"
        );
    }

    #[test]
    fn test_effective_model() {
        assert_eq!(effective_model("", "llama2"), "llama2");
        assert_eq!(effective_model("mistral", "llama2"), "mistral");
    }

    #[test]
    fn test_build_client() {
        assert!(build_client(Duration::from_secs(5)).is_ok());
    }

    fn headers_with_retry_after(value: &str) -> reqwest::header::HeaderMap {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::RETRY_AFTER,
            reqwest::header::HeaderValue::from_str(value).unwrap(),
        );
        headers
    }

    #[test]
    fn test_retry_after_ms() {
        assert_eq!(retry_after_ms(&headers_with_retry_after("3")), Some(3000));
        assert_eq!(retry_after_ms(&headers_with_retry_after(" 0 ")), Some(0));
        assert_eq!(
            retry_after_ms(&headers_with_retry_after("18446744073709552")),
            None
        );
        assert_eq!(
            retry_after_ms(&headers_with_retry_after("Wed, 21 Oct 2015 07:28:00 GMT")),
            None
        );
        assert_eq!(retry_after_ms(&reqwest::header::HeaderMap::new()), None);
    }

    /// Serve one canned HTTP response on a local port and return its URL.
    async fn serve_once(response: String) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });
        format!("http://{addr}/")
    }

    fn too_many_requests(retry_after: &str) -> String {
        format!(
            "HTTP/1.1 429 Too Many Requests\r\nRetry-After: {retry_after}\r\n\
             Content-Length: 4\r\nConnection: close\r\n\r\nslow"
        )
    }

    #[tokio::test]
    async fn test_check_status_carries_retry_after() {
        let url = serve_once(too_many_requests("2")).await;
        let response = reqwest::get(&url).await.unwrap();

        let err = check_status(response).await.unwrap_err();
        assert!(matches!(
            err,
            ProviderError::RateLimited {
                retry_after_ms: Some(2000)
            }
        ));
    }

    #[tokio::test]
    async fn test_check_status_ignores_oversized_retry_after() {
        let url = serve_once(too_many_requests("18446744073709552")).await;
        let response = reqwest::get(&url).await.unwrap();

        let err = check_status(response).await.unwrap_err();
        assert!(matches!(
            err,
            ProviderError::RateLimited {
                retry_after_ms: None
            }
        ));
    }
}
