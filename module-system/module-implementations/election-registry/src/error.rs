use serde::{Deserialize, Serialize};

/// The category of a rejected registry call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    Unauthorized,
    NotFound,
    AlreadyExists,
    InvalidState,
    AlreadyVoted,
    InvalidArgument,
    InvalidOperation,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

/// Reasons a registry call is rejected. A rejected call never changes the
/// state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// The caller lacks the admin or voter standing the call requires.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    /// The referenced election or candidate does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
    /// An election with this id was already created.
    #[error("Election {0} already exists")]
    AlreadyExists(u64),
    /// The election is not in the phase the call requires.
    #[error("Invalid state: {0}")]
    InvalidState(String),
    /// The voter already cast a vote in this election.
    #[error("Voter {voter} already voted in election {election_id}")]
    AlreadyVoted { election_id: u64, voter: String },
    /// A required argument is empty or out of range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// The operation is never allowed, whoever the caller is.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

impl RegistryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistryError::Unauthorized(_) => ErrorKind::Unauthorized,
            RegistryError::NotFound(_) => ErrorKind::NotFound,
            RegistryError::AlreadyExists(_) => ErrorKind::AlreadyExists,
            RegistryError::InvalidState(_) => ErrorKind::InvalidState,
            RegistryError::AlreadyVoted { .. } => ErrorKind::AlreadyVoted,
            RegistryError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            RegistryError::InvalidOperation(_) => ErrorKind::InvalidOperation,
        }
    }

    pub(crate) fn election_not_found(election_id: u64) -> Self {
        RegistryError::NotFound(format!("election {election_id}"))
    }
}

impl From<RegistryError> for ballot_modules_api::Error {
    fn from(err: RegistryError) -> Self {
        ballot_modules_api::Error::ModuleError(err.into())
    }
}

/// Extracts the [`RegistryError`] wrapped in a module error, if any.
pub fn registry_error(err: &ballot_modules_api::Error) -> Option<&RegistryError> {
    err.downcast_ref::<RegistryError>()
}
