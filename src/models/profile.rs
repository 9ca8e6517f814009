//! Profile model
//!
//! Stores a user's dietary preference tags.

use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::{DbError, DbResult};

/// User profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: String,
    pub dietary_prefs: Vec<String>,
    pub updated_at: String,
}

impl Profile {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let prefs: String = row.get(1)?;
        let dietary_prefs = serde_json::from_str(&prefs)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e)))?;

        Ok(Self {
            user_id: row.get(0)?,
            dietary_prefs,
            updated_at: row.get(2)?,
        })
    }

    /// Get a user's profile, if one has been stored
    pub fn get(conn: &Connection, user_id: &str) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare(
            "SELECT user_id, dietary_prefs, updated_at FROM profiles WHERE user_id = ?1",
        )?;

        match stmt.query_row([user_id], Self::from_row) {
            Ok(profile) => Ok(Some(profile)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Set a user's dietary preferences (upsert)
    pub fn upsert(conn: &Connection, user_id: &str, dietary_prefs: &[String]) -> DbResult<Self> {
        let prefs = serde_json::to_string(dietary_prefs)?;
        conn.execute(
            r#"
            INSERT INTO profiles (user_id, dietary_prefs)
            VALUES (?1, ?2)
            ON CONFLICT(user_id) DO UPDATE SET
                dietary_prefs = excluded.dietary_prefs,
                updated_at = datetime('now')
            "#,
            params![user_id, prefs],
        )?;

        Self::get(conn, user_id)?.ok_or(DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    #[test]
    fn test_get_missing_profile() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        assert!(Profile::get(&conn, "alice").unwrap().is_none());
    }

    #[test]
    fn test_upsert_replaces_prefs() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();

        let profile =
            Profile::upsert(&conn, "alice", &["Vegan".to_string(), "Nut-Free".to_string()]).unwrap();
        assert_eq!(profile.dietary_prefs, vec!["Vegan", "Nut-Free"]);

        let profile = Profile::upsert(&conn, "alice", &["Keto".to_string()]).unwrap();
        assert_eq!(profile.dietary_prefs, vec!["Keto"]);

        let profile = Profile::upsert(&conn, "alice", &[]).unwrap();
        assert!(profile.dietary_prefs.is_empty());
    }
}
