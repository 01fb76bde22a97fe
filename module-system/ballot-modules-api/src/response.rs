use serde::{Deserialize, Serialize};

/// Response type for the `Module::call` method.
///
/// Events are recorded in the working set, so a response only carries the
/// informational notice of a call that succeeded without changing the state.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallResponse {
    /// Set when the call was accepted but had nothing to do.
    pub notice: Option<String>,
}

impl CallResponse {
    /// A successful call that left the state untouched.
    pub fn noop(notice: impl Into<String>) -> Self {
        Self {
            notice: Some(notice.into()),
        }
    }

    /// Returns `true` for responses created with [`CallResponse::noop`].
    pub fn is_noop(&self) -> bool {
        self.notice.is_some()
    }
}
