//! Error types for repository operations.
//!
//! Every store backend reports failures through [`RepositoryError`], carrying an
//! [`ErrorContext`] that names the operation and the entity involved so the
//! HTTP layer can log the full cause and still answer with a generic message.

use std::fmt;

use crate::models::InvalidFields;

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Message reported when an enrollment triple already exists.
pub const DUPLICATE_ENROLLMENT: &str =
    "Student is already enrolled in this course for this semester";

/// Where a repository failure happened and what it touched.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// e.g. "create_student", "list_enrollments"
    pub operation: Option<String>,
    /// "student", "course" or "enrollment"
    pub entity: Option<String>,
    pub entity_id: Option<String>,
    pub details: Option<String>,
    /// Request fields the error refers to (missing or invalid input)
    pub fields: Vec<String>,
    /// Transient failure; the Postgres backend may run the operation again.
    pub retryable: bool,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: Some(operation.into()),
            ..Default::default()
        }
    }

    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    pub fn with_entity_id(mut self, id: impl ToString) -> Self {
        self.entity_id = Some(id.to_string());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn retryable(mut self) -> Self {
        self.retryable = true;
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labelled = [
            ("operation", &self.operation),
            ("entity", &self.entity),
            ("id", &self.entity_id),
            ("details", &self.details),
        ];
        let mut parts: Vec<String> = labelled
            .iter()
            .filter_map(|(label, value)| value.as_ref().map(|v| format!("{}={}", label, v)))
            .collect();
        if !self.fields.is_empty() {
            parts.push(format!("fields={}", self.fields.join("|")));
        }
        if self.retryable {
            parts.push("retryable=true".to_string());
        }
        write!(f, "[{}]", parts.join(", "))
    }
}

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Pool checkout failed or the store is unreachable.
    #[error("Connection error: {message} {context}")]
    ConnectionError {
        message: String,
        context: ErrorContext,
    },

    #[error("Query error: {message} {context}")]
    QueryError {
        message: String,
        context: ErrorContext,
    },

    /// Entity is absent or owned by another tenant. The two are never told apart.
    #[error("Not found: {message} {context}")]
    NotFound {
        message: String,
        context: ErrorContext,
    },

    /// Input failed validation before reaching the store.
    #[error("Data validation error: {message} {context}")]
    ValidationError {
        message: String,
        context: ErrorContext,
    },

    /// A uniqueness rule was violated, or the operation is refused for the
    /// tenant's current state.
    #[error("Conflict: {message} {context}")]
    Conflict {
        message: String,
        context: ErrorContext,
    },

    #[error("Configuration error: {message} {context}")]
    ConfigurationError {
        message: String,
        context: ErrorContext,
    },

    #[error("Internal error: {message} {context}")]
    InternalError {
        message: String,
        context: ErrorContext,
    },
}

/// Generates a `name(message)` / `name_with_context(message, context)`
/// constructor pair for one variant.
macro_rules! constructors {
    ($($name:ident, $with_context:ident => $variant:ident;)*) => {
        $(
            pub fn $name(message: impl Into<String>) -> Self {
                Self::$with_context(message, ErrorContext::default())
            }

            pub fn $with_context(message: impl Into<String>, context: ErrorContext) -> Self {
                Self::$variant {
                    message: message.into(),
                    context,
                }
            }
        )*
    };
}

impl RepositoryError {
    constructors! {
        query, query_with_context => QueryError;
        not_found, not_found_with_context => NotFound;
        validation, validation_with_context => ValidationError;
        conflict, conflict_with_context => Conflict;
        configuration, configuration_with_context => ConfigurationError;
        internal, internal_with_context => InternalError;
    }

    /// Connection failures are always retryable.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::connection_with_context(message, ErrorContext::default())
    }

    pub fn connection_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::ConnectionError {
            message: message.into(),
            context: context.retryable(),
        }
    }

    /// Not-found for one entity id, worded the same whether the row is
    /// missing or belongs to someone else.
    pub fn missing(entity: &str, id: impl ToString, operation: &str) -> Self {
        let mut label = entity.to_string();
        if let Some(first) = label.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        Self::not_found_with_context(
            format!("{} not found", label),
            ErrorContext::new(operation)
                .with_entity(entity)
                .with_entity_id(id),
        )
    }

    /// The (student, course, semester) uniqueness violation.
    pub fn duplicate_enrollment(operation: &str) -> Self {
        Self::conflict_with_context(
            DUPLICATE_ENROLLMENT,
            ErrorContext::new(operation).with_entity("enrollment"),
        )
    }

    fn parts(&self) -> (&str, &ErrorContext) {
        match self {
            Self::ConnectionError { message, context }
            | Self::QueryError { message, context }
            | Self::NotFound { message, context }
            | Self::ValidationError { message, context }
            | Self::Conflict { message, context }
            | Self::ConfigurationError { message, context }
            | Self::InternalError { message, context } => (message.as_str(), context),
        }
    }

    /// The bare message, without context.
    pub fn message(&self) -> &str {
        self.parts().0
    }

    pub fn context(&self) -> &ErrorContext {
        self.parts().1
    }

    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionError { .. } | Self::QueryError { .. }
        ) && self.context().retryable
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    /// Replace the operation recorded in the context.
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        let context = match &mut self {
            Self::ConnectionError { context, .. }
            | Self::QueryError { context, .. }
            | Self::NotFound { context, .. }
            | Self::ValidationError { context, .. }
            | Self::Conflict { context, .. }
            | Self::ConfigurationError { context, .. }
            | Self::InternalError { context, .. } => context,
        };
        context.operation = Some(operation.into());
        self
    }
}

impl From<InvalidFields> for RepositoryError {
    fn from(err: InvalidFields) -> Self {
        Self::validation_with_context(err.message, ErrorContext::default().with_fields(err.fields))
    }
}

impl From<String> for RepositoryError {
    fn from(s: String) -> Self {
        RepositoryError::internal(s)
    }
}

impl From<&str> for RepositoryError {
    fn from(s: &str) -> Self {
        RepositoryError::internal(s)
    }
}

#[cfg(feature = "postgres-repo")]
impl From<diesel::result::Error> for RepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        use diesel::result::{DatabaseErrorKind, Error};

        match err {
            Error::NotFound => RepositoryError::not_found("Record not found"),
            Error::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                let context = ErrorContext::default()
                    .with_details(info.constraint_name().unwrap_or("unique").to_string());
                RepositoryError::conflict_with_context(DUPLICATE_ENROLLMENT, context)
            }
            Error::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
                RepositoryError::not_found_with_context(
                    "Referenced record not found",
                    ErrorContext::default().with_details(info.message().to_string()),
                )
            }
            Error::DatabaseError(kind, info) => {
                let mut context =
                    ErrorContext::default().with_details(format!("db_error_kind={:?}", kind));
                // Serialization failures are transient.
                if matches!(kind, DatabaseErrorKind::SerializationFailure) {
                    context = context.retryable();
                }
                RepositoryError::query_with_context(info.message(), context)
            }
            Error::DeserializationError(e) => {
                RepositoryError::internal(format!("Row decoding failed: {}", e))
            }
            other => RepositoryError::query(other.to_string()),
        }
    }
}

#[cfg(feature = "postgres-repo")]
impl From<diesel::r2d2::PoolError> for RepositoryError {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        RepositoryError::connection_with_context(
            err.to_string(),
            ErrorContext::default().with_details("pool_error"),
        )
    }
}
