use thiserror::Error;

/// Structured error context for better error handling and debugging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// File or entry that caused the error (e.g., "data/deck-data.json", entry "一")
    pub subject: Option<String>,
    /// Additional context about the error (e.g., expected shape, HTTP status)
    pub details: Option<String>,
    /// Source of the error (e.g., "collector", "speech_client")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            subject: None,
            details: None,
            source: None,
        }
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Unified error type for the audio generation pipeline.
///
/// Input and configuration problems abort the run before any generation
/// starts; synthesis errors are recovered per entry by the generator and do
/// not surface through this type while a batch is running.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Input error: {message}{}", format_context(.context))]
    Input {
        message: String,
        context: ErrorContext,
    },

    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Synthesis error: {message}{}", format_context(.context))]
    Synthesis {
        message: String,
        context: ErrorContext,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref subject) = ctx.subject {
        parts.push(format!("subject: {}", subject));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    pub fn input(msg: impl Into<String>) -> Self {
        Error::Input {
            message: msg.into(),
            context: ErrorContext::new(),
        }
    }

    pub fn input_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Input {
            message: msg.into(),
            context,
        }
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Error::Configuration {
            message: msg.into(),
            context: ErrorContext::new(),
        }
    }

    pub fn synthesis(msg: impl Into<String>) -> Self {
        Error::Synthesis {
            message: msg.into(),
            context: ErrorContext::new(),
        }
    }

    pub fn synthesis_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Synthesis {
            message: msg.into(),
            context,
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Input { context, .. }
            | Error::Configuration { context, .. }
            | Error::Synthesis { context, .. } => Some(context),
            _ => None,
        }
    }
}
