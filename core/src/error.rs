use thiserror::Error;

/// Domain failures raised by the catalog.
///
/// Functions return `anyhow::Result`; these values travel inside the
/// `anyhow::Error` and can be recovered with `downcast_ref::<CatalogError>()`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Validation failed: {0}")]
    Validation(String),
}

impl CatalogError {
    #[must_use]
    pub fn recipe_not_found(id: i64) -> Self {
        Self::NotFound {
            entity: "Recipe",
            id,
        }
    }

    #[must_use]
    pub fn category_not_found(id: i64) -> Self {
        Self::NotFound {
            entity: "Category",
            id,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

/// True when `err` carries a [`CatalogError::NotFound`].
#[must_use]
pub fn is_not_found(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<CatalogError>(),
        Some(CatalogError::NotFound { .. })
    )
}

/// True when `err` carries a [`CatalogError::Validation`].
#[must_use]
pub fn is_validation(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<CatalogError>(),
        Some(CatalogError::Validation(_))
    )
}
