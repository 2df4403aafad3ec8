use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Info,
    Warning,
    Error,
}

/// An inline message shown once on the next render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: Level,
    pub message: String,
}

impl Notice {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Notice {
            level,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Notice::new(Level::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Notice::new(Level::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Notice::new(Level::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notice::new(Level::Error, message)
    }
}
