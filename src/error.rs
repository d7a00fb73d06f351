//! User-facing error type shared by the CLI and the TUI.
//!
//! Every failure carries a kind so callers (and tests) can tell the failure
//! classes apart, plus a message meant to be shown to the user as-is.

/// Classification of user-visible failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad user input (e.g., an inverted date range).
    Input,
    /// Historical CSV fetch or parse failure.
    History,
    /// Non-success HTTP status from a forecast endpoint.
    Api,
    /// Response body did not match the expected envelope.
    Format,
    /// Transport-level failure (DNS, connection refused, timeout).
    Network,
    /// Terminal/IO failure in the TUI.
    Terminal,
}

impl ErrorKind {
    /// Process exit code for this failure class.
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorKind::Input => 2,
            ErrorKind::History => 3,
            ErrorKind::Api => 4,
            ErrorKind::Format => 5,
            ErrorKind::Network => 6,
            ErrorKind::Terminal => 7,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    kind: ErrorKind,
    message: String,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Input, message)
    }

    pub fn history(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::History, message)
    }

    pub fn api(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Api, message)
    }

    pub fn format(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Format, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Network, message)
    }

    pub fn terminal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Terminal, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn exit_code(&self) -> u8 {
        self.kind.exit_code()
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
