use serde::{Deserialize, Serialize};

/// Application error codes following the pattern E{area}{sequence}
///
/// Ranges:
/// - E0xxx: Shared/storage errors
/// - E1xxx: Account errors
/// - E2xxx: Profile errors
/// - E3xxx: Like/match errors
/// - E4xxx: Messaging errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Shared (E0xxx)
    InternalError,
    ValidationError,
    NotFound,
    DatabaseError,

    // Accounts (E1xxx)
    InvalidCredentials,
    UsernameTaken,
    PasswordTooWeak,
    UserNotFound,

    // Profiles (E2xxx)
    ProfileNotFound,
    UnknownLookupValue,

    // Likes / matching (E3xxx)
    CannotLikeSelf,
    AlreadyLiked,
    AlreadyDisliked,
    QuotaExceeded,

    // Messaging (E4xxx)
    NotMatched,
}

impl ErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            // Shared
            Self::InternalError => "E0001",
            Self::ValidationError => "E0002",
            Self::NotFound => "E0003",
            Self::DatabaseError => "E0004",

            // Accounts
            Self::InvalidCredentials => "E1001",
            Self::UsernameTaken => "E1002",
            Self::PasswordTooWeak => "E1003",
            Self::UserNotFound => "E1004",

            // Profiles
            Self::ProfileNotFound => "E2001",
            Self::UnknownLookupValue => "E2002",

            // Likes / matching
            Self::CannotLikeSelf => "E3001",
            Self::AlreadyLiked => "E3002",
            Self::AlreadyDisliked => "E3003",
            Self::QuotaExceeded => "E3004",

            // Messaging
            Self::NotMatched => "E4001",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Known { code: ErrorCode, message: String },

    #[error("internal error")]
    Internal(#[from] anyhow::Error),

    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Known {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Stable code for the terminal renderer and for log correlation.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Known { code, .. } => code.code(),
            Self::Internal(_) => ErrorCode::InternalError.code(),
            Self::Database(diesel::result::Error::NotFound) => ErrorCode::NotFound.code(),
            Self::Database(_) => ErrorCode::DatabaseError.code(),
            Self::Validation(_) => ErrorCode::ValidationError.code(),
        }
    }

    /// Message shown to the person at the terminal. Storage internals are
    /// logged, not displayed.
    pub fn user_message(&self) -> String {
        match self {
            Self::Known { message, .. } => message.clone(),
            Self::Internal(err) => {
                tracing::error!(error = %err, "internal error");
                "something went wrong, please try again".into()
            }
            Self::Database(diesel::result::Error::NotFound) => "not found".into(),
            Self::Database(err) => {
                tracing::error!(error = %err, "database error");
                "storage error, the operation was aborted".into()
            }
            Self::Validation(msg) => msg.clone(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(ErrorCode::QuotaExceeded.code(), "E3004");
        assert_eq!(ErrorCode::AlreadyLiked.code(), "E3002");
        assert_eq!(ErrorCode::NotMatched.code(), "E4001");
    }

    #[test]
    fn database_not_found_maps_to_not_found_code() {
        let err = AppError::Database(diesel::result::Error::NotFound);
        assert_eq!(err.code(), "E0003");
    }
}
