//! Image retrieval for image-bearing slides.

use std::collections::HashSet;
use std::io::Read;
use std::time::Duration;

use reqwest::Url;

use super::document::{DocumentError, ImageBlob};

/// Largest image body accepted when none is configured.
pub const DEFAULT_MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

/// Fetches image bytes by URL.
pub trait ImageFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> Result<ImageBlob, DocumentError>;
}

/// Blocking HTTP fetcher. Must not be called from an async worker thread;
/// generation runs on the blocking pool.
pub struct HttpImageFetcher {
    timeout: Duration,
    max_bytes: u64,
    allowed_hosts: Option<HashSet<String>>,
}

impl HttpImageFetcher {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            max_bytes: DEFAULT_MAX_IMAGE_BYTES,
            allowed_hosts: None,
        }
    }

    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Only fetch from these hosts. Matching ignores case.
    pub fn with_allowed_hosts<I, S>(mut self, hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.allowed_hosts = Some(hosts.into_iter().map(|h| h.as_ref().to_ascii_lowercase()).collect());
        self
    }

    /// Reject anything but http(s) URLs to an allowed host.
    pub fn check_url(&self, url: &str) -> Result<Url, String> {
        let parsed = Url::parse(url).map_err(|e| format!("invalid URL: {}", e))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(format!("scheme '{}' is not allowed", parsed.scheme()));
        }
        let host = parsed.host_str().ok_or_else(|| "URL has no host".to_string())?;
        if let Some(allowed) = &self.allowed_hosts {
            if !allowed.contains(&host.to_ascii_lowercase()) {
                return Err(format!("host '{}' is not allowed", host));
            }
        }
        Ok(parsed)
    }
}

impl ImageFetcher for HttpImageFetcher {
    fn fetch(&self, url: &str) -> Result<ImageBlob, DocumentError> {
        let failed = |reason: String| DocumentError::ImageFetch {
            url: url.to_string(),
            reason,
        };

        let target = self.check_url(url).map_err(failed)?;
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| failed(e.to_string()))?;
        let response = client.get(target).send().map_err(|e| failed(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(failed(format!("HTTP {}", status)));
        }
        if let Some(length) = response.content_length().filter(|len| *len > self.max_bytes) {
            return Err(failed(format!("{} bytes exceeds the {} byte limit", length, self.max_bytes)));
        }
        let header_mime = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = read_limited(response, self.max_bytes).map_err(failed)?;
        if bytes.is_empty() {
            return Err(failed("empty body".to_string()));
        }

        let mime_type = header_mime
            .filter(|m| m.starts_with("image/"))
            .unwrap_or_else(|| detect_image_mime(url, &bytes).to_string());

        Ok(ImageBlob {
            source_url: url.to_string(),
            mime_type,
            bytes,
        })
    }
}

/// Read at most `max_bytes` from `reader`, failing if there is more.
pub fn read_limited<R: Read>(reader: R, max_bytes: u64) -> Result<Vec<u8>, String> {
    let mut bytes = Vec::new();
    reader
        .take(max_bytes.saturating_add(1))
        .read_to_end(&mut bytes)
        .map_err(|e| e.to_string())?;
    if bytes.len() as u64 > max_bytes {
        return Err(format!("body exceeds the {} byte limit", max_bytes));
    }
    Ok(bytes)
}

/// Guess the MIME type from the URL path, then from magic bytes.
pub fn detect_image_mime(url: &str, data: &[u8]) -> &'static str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    if let Some(mime) = mime_guess::from_path(path).first_raw() {
        if mime.starts_with("image/") {
            return mime;
        }
    }
    detect_mime_from_bytes(data).unwrap_or("application/octet-stream")
}

fn detect_mime_from_bytes(data: &[u8]) -> Option<&'static str> {
    if data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
        return Some("image/png");
    }
    if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some("image/jpeg");
    }
    if data.starts_with(b"GIF8") {
        return Some("image/gif");
    }
    if data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
        return Some("image/webp");
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_from_extension() {
        assert_eq!(detect_image_mime("https://x.test/a/photo.png?size=2", &[]), "image/png");
        assert_eq!(detect_image_mime("https://x.test/pic.JPG", &[]), "image/jpeg");
    }

    #[test]
    fn test_detect_from_magic_bytes() {
        let png = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A];
        assert_eq!(detect_image_mime("https://x.test/render", &png), "image/png");
        assert_eq!(detect_image_mime("https://x.test/gif", b"GIF89a..."), "image/gif");
        assert_eq!(
            detect_image_mime("https://x.test/blob", b"plain"),
            "application/octet-stream"
        );
    }

    #[test]
    fn test_read_limited() {
        let body = vec![7u8; 16];
        assert_eq!(read_limited(body.as_slice(), 16).unwrap().len(), 16);
        let err = read_limited(body.as_slice(), 15).unwrap_err();
        assert!(err.contains("15 byte limit"));
    }

    #[test]
    fn test_check_url_rejects_other_schemes_and_hosts() {
        let open = HttpImageFetcher::new(Duration::from_secs(1));
        assert!(open.check_url("https://img.example/a.png").is_ok());
        assert!(open.check_url("file:///etc/passwd").is_err());
        assert!(open.check_url("not a url").is_err());

        let restricted = open.with_allowed_hosts(["CDN.example"]);
        assert!(restricted.check_url("https://cdn.example/a.png").is_ok());
        let err = restricted.check_url("http://169.254.169.254/latest").unwrap_err();
        assert!(err.contains("not allowed"));
    }

    #[test]
    fn test_disallowed_url_fails_without_request() {
        let fetcher = HttpImageFetcher::new(Duration::from_secs(1)).with_allowed_hosts(["cdn.example"]);
        let err = fetcher.fetch("http://internal.example/secret.png").unwrap_err();
        assert!(matches!(err, DocumentError::ImageFetch { .. }));
    }
}
