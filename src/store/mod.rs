//! Database helpers for user records.
//!
//! Queries run through the shared pool; each call acquires a scoped
//! connection that is returned on every path, error or not. User lookups are
//! read-through, nothing is cached across requests.

use anyhow::{Context, Result};
use sqlx::{PgPool, Row};
use tracing::Instrument;

/// A persisted user identity. Immutable after creation.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub sid: i64,
    pub email: String,
    pub firstname: String,
    pub lastname: String,
    pub password_hash: String,
}

/// Fields supplied at signup, before the password is hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub firstname: String,
    pub lastname: String,
}

/// Outcome when attempting to create a new user row.
#[derive(Debug)]
pub enum InsertOutcome {
    Created(UserRecord),
    Conflict,
}

/// Look up a user by normalized email.
///
/// # Errors
/// Returns an error if the database is unreachable or the query fails.
pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<UserRecord>> {
    let query = "SELECT sid, email, firstname, lastname, password FROM users WHERE email = $1";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(email)
        .fetch_optional(pool)
        .instrument(span)
        .await
        .context("failed to lookup user by email")?;

    Ok(row.map(|row| UserRecord {
        sid: row.get("sid"),
        email: row.get("email"),
        firstname: row.get("firstname"),
        lastname: row.get("lastname"),
        password_hash: row.get("password"),
    }))
}

/// Insert a new user row, reporting duplicate emails as a conflict instead of
/// an error so a lost duplicate-key race surfaces as a plain failure signal.
///
/// # Errors
/// Returns an error if the database is unreachable or the insert fails for a
/// reason other than a unique violation.
pub async fn insert_user(
    pool: &PgPool,
    user: &NewUser,
    password_hash: &str,
) -> Result<InsertOutcome> {
    let query = r"
        INSERT INTO users (email, firstname, lastname, password)
        VALUES ($1, $2, $3, $4)
        RETURNING sid
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "INSERT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(&user.email)
        .bind(&user.firstname)
        .bind(&user.lastname)
        .bind(password_hash)
        .fetch_one(pool)
        .instrument(span)
        .await;

    match row {
        Ok(row) => Ok(InsertOutcome::Created(UserRecord {
            sid: row.get("sid"),
            email: user.email.clone(),
            firstname: user.firstname.clone(),
            lastname: user.lastname.clone(),
            password_hash: password_hash.to_string(),
        })),
        Err(err) if is_unique_violation(&err) => Ok(InsertOutcome::Conflict),
        Err(err) => Err(err).context("failed to insert user"),
    }
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().is_some_and(|code| code.as_ref() == "23505"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::error::{DatabaseError, ErrorKind};
    use std::borrow::Cow;
    use std::error::Error as StdError;
    use std::fmt;

    #[derive(Debug)]
    struct TestDbError {
        code: Option<&'static str>,
    }

    impl fmt::Display for TestDbError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "test database error")
        }
    }

    impl StdError for TestDbError {}

    impl DatabaseError for TestDbError {
        fn message(&self) -> &'static str {
            "test database error"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            self.code.map(Cow::Borrowed)
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            ErrorKind::UniqueViolation
        }
    }

    #[test]
    fn is_unique_violation_matches_sqlstate() {
        let err = sqlx::Error::Database(Box::new(TestDbError {
            code: Some("23505"),
        }));
        assert!(is_unique_violation(&err));

        let err = sqlx::Error::Database(Box::new(TestDbError {
            code: Some("99999"),
        }));
        assert!(!is_unique_violation(&err));

        let err = sqlx::Error::RowNotFound;
        assert!(!is_unique_violation(&err));
    }
}
