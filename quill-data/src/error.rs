use quill_core::{FieldErrors, HttpError};

/// Errors that can occur in the data layer.
#[derive(Debug)]
pub enum DataError {
    /// The referenced row does not exist.
    NotFound(String),
    /// A write was rejected before reaching the database.
    Validation(FieldErrors),
    Database(Box<dyn std::error::Error + Send + Sync>),
}

impl DataError {
    pub fn not_found(label: &str, id: i64) -> Self {
        DataError::NotFound(format!("{label} {id} not found"))
    }

    pub fn database(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        DataError::Database(Box::new(err))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DataError::NotFound(_))
    }
}

impl std::fmt::Display for DataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataError::NotFound(msg) => write!(f, "Not found: {msg}"),
            DataError::Validation(errors) => write!(f, "Validation failed: {errors}"),
            DataError::Database(err) => write!(f, "Database error: {err}"),
        }
    }
}

impl std::error::Error for DataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DataError::Database(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for DataError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DataError::NotFound("Row not found".into()),
            other => DataError::database(other),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DataError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DataError::database(err)
    }
}

impl From<garde::Report> for DataError {
    fn from(report: garde::Report) -> Self {
        DataError::Validation(FieldErrors::from_report(&report))
    }
}

impl From<DataError> for HttpError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::NotFound(msg) => HttpError::NotFound(msg),
            DataError::Validation(errors) => HttpError::BadRequest(errors.to_string()),
            DataError::Database(e) => HttpError::Internal(e.to_string()),
        }
    }
}

/// Convenience alias for data-layer results.
pub type DataResult<T> = Result<T, DataError>;
