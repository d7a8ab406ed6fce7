use thiserror::Error;

pub type ArgusResult<T> = Result<T, ArgusError>;

/// Coarse status classification for transport-layer mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    NotFound,
    Internal,
}

#[derive(Error, Debug)]
pub enum ArgusError {
    #[error("detector '{id}' not found")]
    DetectorNotFound { id: String },

    #[error("detector list is empty")]
    EmptyDetectorList,

    #[error("detector store error: {0}")]
    DetectorStore(String),

    #[error("search backend error: {0}")]
    SearchBackend(String),

    #[error("findings resolution failed for {context}")]
    FindingsResolution {
        context: String,
        #[source]
        source: Box<ArgusError>,
    },

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl ArgusError {
    /// Wrap a collaborator failure with resolution context, preserving the
    /// original cause for diagnostics.
    pub fn wrap(context: impl Into<String>, source: ArgusError) -> Self {
        Self::FindingsResolution {
            context: context.into(),
            source: Box::new(source),
        }
    }

    /// Status kind the transport layer should report. Wrapped errors keep
    /// the status of their cause.
    pub fn status(&self) -> StatusKind {
        match self {
            Self::DetectorNotFound { .. } | Self::EmptyDetectorList => StatusKind::NotFound,
            Self::FindingsResolution { source, .. } => source.status(),
            _ => StatusKind::Internal,
        }
    }
}
