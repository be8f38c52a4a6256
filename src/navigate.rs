//! Navigation side effect: fetching a download URL to disk.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use url::Url;

use crate::error::{Error, Result};

/// Abstraction over the download side effect for testability.
///
/// The rest of the crate only ever builds navigation targets; performing
/// one goes through this seam so tests can observe (or count) navigations
/// without touching the network.
#[async_trait]
pub trait Navigate: Send + Sync {
    /// Navigates to `url`, returning the local destination of the fetch.
    async fn open(&self, url: &Url) -> Result<PathBuf>;
}

/// Production navigator: streams the response body into the download
/// directory.
#[derive(Debug, Clone)]
pub struct HttpNavigator {
    http: reqwest::Client,
    dir: PathBuf,
}

impl HttpNavigator {
    /// Creates a navigator saving into `dir`.
    #[must_use]
    pub const fn new(http: reqwest::Client, dir: PathBuf) -> Self {
        Self { http, dir }
    }
}

#[async_trait]
impl Navigate for HttpNavigator {
    async fn open(&self, url: &Url) -> Result<PathBuf> {
        let mut response = self.http.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            log::error!("download endpoint returned {status} for {url}");
            return Err(Error::Status {
                status: status.as_u16(),
            });
        }

        let disposition = response
            .headers()
            .get(reqwest::header::CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let name = file_name_for(url, disposition.as_deref());

        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(name);
        let mut file = tokio::fs::File::create(&path).await?;
        while let Some(chunk) = response.chunk().await? {
            file.write_all(&chunk).await?;
        }
        file.flush().await?;

        log::info!("saved {}", path.display());
        Ok(path)
    }
}

/// Picks a file name for a navigation target: the `Content-Disposition`
/// filename when the backend sends one, else the last URL path segment,
/// else a fixed fallback. Any directory components are stripped.
fn file_name_for(url: &Url, disposition: Option<&str>) -> String {
    disposition
        .and_then(disposition_filename)
        .or_else(|| {
            url.path_segments()
                .and_then(|mut segments| segments.next_back())
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
        })
        .and_then(|raw| {
            Path::new(raw.trim())
                .file_name()
                .and_then(|name| name.to_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| "download".to_string())
}

fn disposition_filename(header: &str) -> Option<String> {
    let start = header.find("filename=")? + "filename=".len();
    let rest = header[start..].split(';').next()?;
    let name = rest.trim().trim_matches('"');
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt as _};
    use tokio::net::TcpListener;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    // --- file naming ---

    #[test]
    fn name_from_content_disposition() {
        assert_eq!(
            file_name_for(
                &url("http://b/download?url=x&format=f1"),
                Some(r#"attachment; filename="clip.mp4""#)
            ),
            "clip.mp4"
        );
    }

    #[test]
    fn name_from_unquoted_disposition() {
        assert_eq!(
            file_name_for(&url("http://b/download"), Some("attachment; filename=a.webm")),
            "a.webm"
        );
    }

    #[test]
    fn name_falls_back_to_path_segment() {
        assert_eq!(
            file_name_for(&url("http://b/instagram-reel-instaloader?url=x"), None),
            "instagram-reel-instaloader"
        );
    }

    #[test]
    fn name_falls_back_to_constant() {
        assert_eq!(file_name_for(&url("http://b/"), None), "download");
    }

    #[test]
    fn name_strips_directory_components() {
        assert_eq!(
            file_name_for(
                &url("http://b/download"),
                Some(r#"attachment; filename="../../etc/passwd""#)
            ),
            "passwd"
        );
    }

    #[test]
    fn empty_disposition_filename_is_ignored() {
        assert_eq!(
            file_name_for(&url("http://b/download"), Some(r#"attachment; filename="""#)),
            "download"
        );
    }

    // --- streaming ---

    async fn one_shot_file_server(body: &'static str) -> Url {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Disposition: attachment; filename=\"clip.mp4\"\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.unwrap();
        });
        Url::parse(&format!("http://{addr}/download?url=x&format=f1")).unwrap()
    }

    #[tokio::test]
    async fn saves_body_under_disposition_name() {
        let target = one_shot_file_server("fake media bytes").await;
        let dir = tempfile::TempDir::new().unwrap();

        let navigator = HttpNavigator::new(reqwest::Client::new(), dir.path().to_path_buf());
        let path = navigator.open(&target).await.unwrap();

        assert_eq!(path.file_name().unwrap(), "clip.mp4");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "fake media bytes");
    }

    #[tokio::test]
    async fn non_success_status_does_not_create_file() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf).await;
            stream
                .write_all(b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n")
                .await
                .unwrap();
            stream.shutdown().await.unwrap();
        });
        let dir = tempfile::TempDir::new().unwrap();

        let navigator = HttpNavigator::new(reqwest::Client::new(), dir.path().to_path_buf());
        let err = navigator
            .open(&Url::parse(&format!("http://{addr}/download")).unwrap())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Status { status: 404 }));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
