use std::fmt::{Display, Formatter};
use tracing::info;

/// Feedback for a finished action, shown once and then gone.
#[derive(Clone, PartialEq, Debug)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Notice::Success(message.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notice::Error(message.into())
    }

    pub fn emit(&self) {
        match self {
            Notice::Success(message) => {
                info!("🟢 {}", message);
                println!("{}", self);
            }
            Notice::Error(message) => {
                info!("⚠️ {}", message);
                eprintln!("{}", self);
            }
        }
    }
}

impl Display for Notice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::Success(message) => write!(f, "✔ {}", message),
            Notice::Error(message) => write!(f, "✖ {}", message),
        }
    }
}
