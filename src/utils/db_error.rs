//! Helpers for classifying database errors.

/// Name of the unique constraint on `short_links.short_alias`.
pub const ALIAS_UNIQUE_CONSTRAINT: &str = "short_links_short_alias_key";

/// Returns true if `e` is a uniqueness violation on the alias column.
pub fn is_unique_violation_on_alias(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(ALIAS_UNIQUE_CONSTRAINT))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_errors_are_not_violations() {
        assert!(!is_unique_violation_on_alias(&sqlx::Error::RowNotFound));
        assert!(!is_unique_violation_on_alias(&sqlx::Error::PoolTimedOut));
    }
}
