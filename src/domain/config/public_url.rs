//! Public URL generation for stored images.
//!
//! URLs are either inferred from the inbound request's scheme and host, or
//! built from a fixed base URL when the service sits behind a reverse proxy or
//! CDN. Resolution is pure so the same inputs always give the same URL.

/// Path prefix under which the uploads directory is served.
pub const UPLOADS_ROUTE: &str = "/uploads";

/// Scheme and host the client used to reach the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOrigin {
    pub scheme: String,
    pub host: String,
}

impl RequestOrigin {
    pub fn new(scheme: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PublicUrlPolicy {
    /// Use the request's own scheme and host.
    #[default]
    InferFromRequest,
    /// Use a configured base such as `https://cdn.example.com`.
    FixedBase(String),
}

impl PublicUrlPolicy {
    pub fn fixed(base: impl Into<String>) -> Self {
        let base: String = base.into();
        Self::FixedBase(base.trim_end_matches('/').to_string())
    }

    /// Absolute URL for `filename`.
    pub fn resolve(&self, filename: &str, origin: &RequestOrigin) -> String {
        match self {
            Self::InferFromRequest => format!(
                "{}://{}{}",
                origin.scheme,
                origin.host,
                relative_path(filename)
            ),
            Self::FixedBase(base) => format!("{}{}", base, relative_path(filename)),
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Self::InferFromRequest => "inferFromRequest",
            Self::FixedBase(_) => "fixedBase",
        }
    }
}

/// Server-relative path for `filename`.
pub fn relative_path(filename: &str) -> String {
    format!("{}/{}", UPLOADS_ROUTE, filename)
}
