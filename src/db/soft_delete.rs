//! Logical deletion shared by every entity that carries an `is_deleted` flag.
//!
//! Rows are never physically removed by the application. Repositories filter
//! on the flag according to a [`Visibility`]; primary-key lookups ignore it so
//! removed rows stay reachable for audit and history.

use serde::Deserialize;

use crate::error::AppError;

/// Which side of the soft-delete flag a listing query returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Default listing: only rows that were never removed.
    #[default]
    Active,
    /// Archive listing: only removed rows.
    Archived,
}

impl Visibility {
    /// Value the `is_deleted` column must hold for a row to be included.
    pub fn is_deleted(self) -> bool {
        matches!(self, Visibility::Archived)
    }
}

pub trait SoftDeletable {
    fn is_removed(&self) -> bool;
}

/// Treats a removed row like a missing one, for get/update/delete paths.
pub fn require_active<T: SoftDeletable>(row: Option<T>, resource: &str) -> Result<T, AppError> {
    match row {
        Some(row) if !row.is_removed() => Ok(row),
        _ => Err(AppError::not_found(resource)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row(bool);

    impl SoftDeletable for Row {
        fn is_removed(&self) -> bool {
            self.0
        }
    }

    #[test]
    fn visibility_maps_to_flag() {
        assert!(!Visibility::Active.is_deleted());
        assert!(Visibility::Archived.is_deleted());
        assert_eq!(Visibility::default(), Visibility::Active);
    }

    #[test]
    fn removed_rows_are_not_found() {
        assert!(require_active(Some(Row(false)), "task").is_ok());
        assert!(matches!(
            require_active(Some(Row(true)), "task"),
            Err(AppError::NotFound { .. })
        ));
        assert!(matches!(
            require_active(None::<Row>, "task"),
            Err(AppError::NotFound { .. })
        ));
    }
}
