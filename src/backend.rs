//! HTTP client for the resolver backend.

use std::time::Duration;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{Error, Result};

/// Probe for the structured error field the backend can embed in any
/// otherwise-successful JSON body.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// Thin client over the backend's metadata endpoints.
///
/// One request, one attempt: retries are always a fresh user action, and
/// timeouts are deliberately left to the transport defaults.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
}

impl BackendClient {
    /// Builds the client with the shared connection pool settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new() -> Result<Self> {
        let http = reqwest::Client::builder()
            .pool_idle_timeout(Duration::from_secs(60))
            .pool_max_idle_per_host(8)
            .tcp_keepalive(Duration::from_secs(30))
            .build()?;
        Ok(Self { http })
    }

    /// The underlying HTTP client, for collaborators that share the pool.
    #[must_use]
    pub const fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Fetches a metadata endpoint, applying the error taxonomy in one
    /// place: transport failures bubble as [`Error::Http`]; a non-2xx
    /// status becomes [`Error::Status`] with the body logged for operators
    /// only; a 2xx body carrying an `error` field becomes
    /// [`Error::Backend`] with the message verbatim.
    ///
    /// # Errors
    ///
    /// See above; additionally [`Error::Json`] when a 2xx body does not
    /// parse as `T`.
    pub async fn get_info<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        log::debug!("GET {url}");
        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            log::error!("backend returned {status} for {url}: {text}");
            return Err(Error::Status {
                status: status.as_u16(),
            });
        }

        if let Ok(ErrorBody {
            error: Some(message),
        }) = serde_json::from_str::<ErrorBody>(&text)
        {
            log::warn!("backend reported error for {url}: {message}");
            return Err(Error::Backend(message));
        }

        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::{RawMediaSet, RawVideoInfo};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves exactly one canned HTTP response on a random local port.
    async fn one_shot_server(status_line: &'static str, body: &'static str) -> Url {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            // Drain the request head before answering.
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf).await;
            let response = format!(
                "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.unwrap();
        });
        Url::parse(&format!("http://{addr}/info")).unwrap()
    }

    #[tokio::test]
    async fn parses_successful_video_info() {
        let url = one_shot_server(
            "HTTP/1.1 200 OK",
            r#"{"title":"T","videoFormats":[{"id":"f1","ext":"mp4"}],"audioFormats":[]}"#,
        )
        .await;

        let client = BackendClient::new().unwrap();
        let raw: RawVideoInfo = client.get_info(url).await.unwrap();
        assert_eq!(raw.title.as_deref(), Some("T"));
        assert_eq!(raw.video_formats.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn non_2xx_becomes_status_error() {
        let url = one_shot_server("HTTP/1.1 500 Internal Server Error", "yt-dlp exploded").await;

        let client = BackendClient::new().unwrap();
        let err = client.get_info::<RawVideoInfo>(url).await.unwrap_err();
        // The raw body stays out of the error; only the status survives.
        assert!(matches!(err, Error::Status { status: 500 }));
    }

    #[tokio::test]
    async fn structured_error_body_surfaces_verbatim() {
        let url = one_shot_server("HTTP/1.1 200 OK", r#"{"error":"Video unavailable"}"#).await;

        let client = BackendClient::new().unwrap();
        let err = client.get_info::<RawVideoInfo>(url).await.unwrap_err();
        match err {
            Error::Backend(message) => assert_eq!(message, "Video unavailable"),
            other => panic!("expected Backend error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_becomes_json_error() {
        let url = one_shot_server("HTTP/1.1 200 OK", "<html>not json</html>").await;

        let client = BackendClient::new().unwrap();
        let err = client.get_info::<RawMediaSet>(url).await.unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[tokio::test]
    async fn unreachable_backend_becomes_http_error() {
        // Bind then drop to get a port nothing is listening on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = BackendClient::new().unwrap();
        let err = client
            .get_info::<RawVideoInfo>(Url::parse(&format!("http://{addr}/info")).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Http(_)));
    }
}
