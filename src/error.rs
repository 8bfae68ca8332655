use thiserror::Error;

/// Main error type for DSpace REST operations
#[derive(Debug, Error)]
pub enum RestError {
    /// A placeholder of the URI template has no value. Raised before any
    /// request is sent.
    #[error("unresolved placeholder {{{placeholder}}} in template {template}")]
    TemplateResolution {
        template: String,
        placeholder: String,
    },

    /// The URI template itself cannot be parsed (unbalanced braces)
    #[error("malformed template {template}: {reason}")]
    MalformedTemplate { template: String, reason: String },

    /// The remote service answered with a non-2xx status
    #[error("HTTP error {code}: {body}")]
    HttpStatus { code: u16, body: String },

    /// Connection level failure (DNS, TLS, timeout, I/O)
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A value could not be serialized or deserialized in the given representation
    #[error("{format} encoding error: {source}")]
    Encoding {
        format: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A structured value was requested but the response carried no body
    #[error("expected a structured body but the response was empty")]
    EmptyBody,

    /// Client configuration rejected at construction
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl RestError {
    /// Create a new HTTP status error
    pub fn http(code: u16, body: impl Into<String>) -> Self {
        RestError::HttpStatus {
            code,
            body: body.into(),
        }
    }

    pub(crate) fn encoding<E>(format: &'static str, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        RestError::Encoding {
            format,
            source: source.into(),
        }
    }

    /// Get the HTTP status code if this is a status error
    pub fn status_code(&self) -> Option<u16> {
        match self {
            RestError::HttpStatus { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Check if this error is a bad request error (400)
    pub fn is_bad_request(&self) -> bool {
        self.status_code() == Some(400)
    }

    /// Check if this error is an unauthorized error (401)
    pub fn is_unauthorized(&self) -> bool {
        self.status_code() == Some(401)
    }

    /// Check if this error is a permission denied error (403)
    pub fn is_forbidden(&self) -> bool {
        self.status_code() == Some(403)
    }

    /// Check if this error is a not found error (404)
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }

    /// True for errors raised while building the request URI
    pub fn is_template_error(&self) -> bool {
        matches!(
            self,
            RestError::TemplateResolution { .. } | RestError::MalformedTemplate { .. }
        )
    }
}

impl From<reqwest::Error> for RestError {
    fn from(err: reqwest::Error) -> Self {
        RestError::Transport(Box::new(err))
    }
}

impl From<std::io::Error> for RestError {
    fn from(err: std::io::Error) -> Self {
        RestError::Transport(Box::new(err))
    }
}

/// Result type for DSpace REST operations
pub type Result<T> = std::result::Result<T, RestError>;
