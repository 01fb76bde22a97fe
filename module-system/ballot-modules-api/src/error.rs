/// General error type in the module system.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Custom error thrown by a module.
    #[error(transparent)]
    ModuleError(#[from] anyhow::Error),
}

impl Error {
    /// Returns the module error as a `T`, if it is one.
    pub fn downcast_ref<T>(&self) -> Option<&T>
    where
        T: std::fmt::Display + std::fmt::Debug + Send + Sync + 'static,
    {
        match self {
            Error::ModuleError(err) => err.downcast_ref::<T>(),
        }
    }
}
