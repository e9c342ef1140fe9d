use thiserror::Error;

#[derive(Error, Debug)]
#[error(transparent)]
pub enum BindError {
    CallError(#[from] CallError),
    RenderError(#[from] RenderError),
    TemplateError(#[from] TemplateError),

    BoxError(#[from] Box<dyn std::error::Error + Send + Sync + 'static>),
}

/// Failures raised before or during the network phase of an invocation.
///
/// These are caught by the invocation itself: logged, optionally rendered
/// through the configured error template, never surfaced to the caller.
#[derive(Error, Debug)]
pub enum CallError {
    #[error("no data passed to a data endpoint")]
    NoData { uri: String },

    #[error("{method} requests should not have a body")]
    UnexpectedData { uri: String, method: http::Method },

    #[error("unable to call '{uri}'")]
    Connection {
        uri: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("unable to parse response from '{uri}'")]
    Parse {
        uri: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
impl CallError {
    /// Stable short name, also the `summary` field of error template records.
    pub fn summary(&self) -> &'static str {
        match self {
            Self::NoData { .. } => "no data",
            Self::UnexpectedData { .. } => "unexpected data",
            Self::Connection { .. } => "connection error",
            Self::Parse { .. } => "parse error",
        }
    }

    pub fn uri(&self) -> &str {
        match self {
            Self::NoData { uri }
            | Self::UnexpectedData { uri, .. }
            | Self::Connection { uri, .. }
            | Self::Parse { uri, .. } => uri,
        }
    }
}

/// Non-fatal failures of one render step. The affected step is skipped, the
/// rest of the invocation continues.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("template id undefined")]
    NoTemplate,
    #[error("could not find template '{0}'")]
    MissingTemplate(String),
    #[error("could not find container '{0}'")]
    MissingContainer(String),

    #[error(transparent)]
    TemplateError(#[from] TemplateError),
}

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("failed to parse template: {0}")]
    NomParseError(String),
    #[error("unparsed template remains: {0}")]
    RemainingTemplate(String),
}

pub trait IntoResult<T> {
    fn box_err(self) -> crate::Result<T>;
}
impl<T, E: std::error::Error + Send + Sync + 'static> IntoResult<T> for Result<T, E> {
    fn box_err(self) -> crate::Result<T> {
        self.map_err(|e| BindError::BoxError(e.into()))
    }
}
