use crate::navigation::state::Level;

/// Every navigation failure is recoverable; the caller may retry, ignore, or reset.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    /// A deeper level was requested while a required ancestor is unset,
    /// or a planned transition no longer matches the current state.
    #[error("cannot move to {requested:?} from {current:?}")]
    InvalidTransition { current: Level, requested: Level },

    #[error("invalid {kind} index")]
    InvalidIndex { kind: &'static str },

    /// The scene has no object for the requested selection.
    #[error("no scene geometry for the requested {level:?}")]
    TargetNotFound { level: Level },
}

impl NavigationError {
    /// JSON-RPC error code reported to the frontend.
    pub fn rpc_code(&self) -> i32 {
        match self {
            Self::InvalidIndex { .. } => -32602,
            Self::InvalidTransition { .. } => -32000,
            Self::TargetNotFound { .. } => -32001,
        }
    }
}
