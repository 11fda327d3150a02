use std::borrow::Cow;

/// A specialized [`CatalogError`] enum of this crate.
#[stagehand_derive::stagehand_error]
pub enum CatalogError {
    /// The caller is not an authenticated admin.
    #[error("Unauthorized{}: {message}", format_context(.context))]
    Unauthorized { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The kind or candidate value was rejected.
    #[error("Invalid input{}: {message}", format_context(.context))]
    InvalidInput { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The backing store failed or could not be reached.
    #[error("Storage unavailable{}: {message}", format_context(.context))]
    StorageUnavailable { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal catalog error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl CatalogError {
    pub(crate) fn invalid(message: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidInput { message: message.into(), context: None }
    }

    pub(crate) fn unauthorized(context: impl Into<Cow<'static, str>>) -> Self {
        Self::Unauthorized {
            message: "Admin session required".into(),
            context: Some(context.into()),
        }
    }

    /// Maps a `SurrealDB` failure to [`CatalogError::StorageUnavailable`].
    pub(crate) fn storage(context: &'static str) -> impl FnOnce(surrealdb::Error) -> Self {
        move |err| Self::StorageUnavailable {
            message: err.to_string().into(),
            context: Some(context.into()),
        }
    }

    /// Client-facing message without internal detail.
    #[must_use]
    pub fn public_message(&self) -> Cow<'static, str> {
        match self {
            Self::Unauthorized { message, .. } | Self::InvalidInput { message, .. } => {
                message.clone()
            }
            Self::StorageUnavailable { .. } => "Storage is temporarily unavailable".into(),
            Self::Internal { .. } => "Internal server error".into(),
        }
    }
}
