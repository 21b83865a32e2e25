use thiserror::Error;

/// Failure of a single gateway query.
///
/// URLs carried here are already redacted; they never contain the api key.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("{url} returned HTTP {status}: {body}")]
    Status { url: String, status: u16, body: String },

    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl GatewayError {
    pub fn transport(url: &str, message: impl Into<String>) -> Self {
        Self::Transport {
            url: redact_api_key(url),
            message: message.into(),
        }
    }

    pub fn status(url: &str, status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            url: redact_api_key(url),
            status,
            body: body.into(),
        }
    }

    pub fn decode(url: &str, source: serde_json::Error) -> Self {
        Self::Decode {
            url: redact_api_key(url),
            source,
        }
    }

    /// HTTP status when the service answered with a non-success code
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Mask the `api_key` query value so URLs can be logged
pub fn redact_api_key(url: &str) -> String {
    let Some(start) = url.find("api_key=").map(|i| i + "api_key=".len()) else {
        return url.to_string();
    };
    let end = url[start..].find('&').map(|i| start + i).unwrap_or(url.len());
    format!("{}***{}", &url[..start], &url[end..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_api_key_middle_and_end() {
        assert_eq!(
            redact_api_key("https://api.themoviedb.org/3/discover/movie?api_key=secret&with_genres=28&page=1"),
            "https://api.themoviedb.org/3/discover/movie?api_key=***&with_genres=28&page=1"
        );
        assert_eq!(
            redact_api_key("https://api.themoviedb.org/3/movie/popular?api_key=secret"),
            "https://api.themoviedb.org/3/movie/popular?api_key=***"
        );
    }

    #[test]
    fn test_redact_without_key_is_identity() {
        assert_eq!(redact_api_key("https://example.com/a?b=c"), "https://example.com/a?b=c");
    }

    #[test]
    fn test_status_error_hides_key() {
        let err = GatewayError::status("https://x/movie/1?api_key=secret", 401, "Invalid API key");
        assert_eq!(err.http_status(), Some(401));
        let message = err.to_string();
        assert!(!message.contains("secret"));
        assert!(message.contains("401"));
    }
}
