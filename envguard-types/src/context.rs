use serde::{Deserialize, Serialize};
use std::fmt;

/// The execution side a validation run targets.
///
/// Resolved once per run and read-only afterwards. It decides which schema is
/// validated and whether the access guard blocks server-only reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Context {
    Server,
    Client,
}

impl Context {
    /// Resolves the context from an explicit override, falling back to
    /// [`Context::detect`].
    #[must_use]
    pub fn resolve(is_server: Option<bool>) -> Self {
        match is_server {
            Some(true) => Self::Server,
            Some(false) => Self::Client,
            None => Self::detect(),
        }
    }

    /// Infers the context from the compilation target.
    ///
    /// A `wasm32` build runs inside a client (browser) host. Anything else is
    /// a native process with no client execution context, so it is the server.
    #[must_use]
    pub const fn detect() -> Self {
        if cfg!(target_arch = "wasm32") {
            Self::Client
        } else {
            Self::Server
        }
    }

    #[must_use]
    pub const fn is_server(self) -> bool {
        matches!(self, Self::Server)
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Server => f.pad("server"),
            Self::Client => f.pad("client"),
        }
    }
}
