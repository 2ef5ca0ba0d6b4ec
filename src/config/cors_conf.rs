use axum::http::HeaderValue;
use std::env;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{debug, warn};

/// Allowed cross-origin callers, loaded from CORS_ORIGINS
/// (comma-separated origin list, or "*" for any origin).
#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub origins: Vec<String>,
}

impl CorsConfig {
    pub fn from_env() -> Self {
        let raw = env::var("CORS_ORIGINS").unwrap_or_else(|_| {
            warn!("CORS_ORIGINS not set, allowing any origin");
            "*".to_string()
        });
        let origins = raw
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        debug!("CORS origins: {:?}", origins);
        CorsConfig { origins }
    }

    /// Build the tower-http CORS layer for the router.
    pub fn layer(&self) -> CorsLayer {
        let layer = CorsLayer::new()
            .allow_methods(Any)
            .allow_headers(Any);
        if self.origins.iter().any(|o| o == "*") {
            layer.allow_origin(Any)
        } else {
            let parsed: Vec<HeaderValue> = self
                .origins
                .iter()
                .filter_map(|o| o.parse::<HeaderValue>().ok())
                .collect();
            layer.allow_origin(AllowOrigin::list(parsed))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_origins() {
        let config = CorsConfig {
            origins: vec!["*".to_string()],
        };
        // Must not panic when building the layer
        let _ = config.layer();
    }

    #[test]
    fn test_explicit_origins() {
        let config = CorsConfig {
            origins: vec![
                "http://localhost:3000".to_string(),
                "https://scouts.example.org".to_string(),
            ],
        };
        let _ = config.layer();
    }
}
