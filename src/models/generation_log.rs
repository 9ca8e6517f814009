//! Generation log model
//!
//! Records rate-limited generation requests per user.

use rusqlite::{params, Connection};

use crate::db::DbResult;

pub struct GenerationLog;

impl GenerationLog {
    /// Record one request
    pub fn record(conn: &Connection, user_id: &str, function_name: &str) -> DbResult<()> {
        conn.execute(
            "INSERT INTO generation_log (user_id, function_name) VALUES (?1, ?2)",
            params![user_id, function_name],
        )?;
        Ok(())
    }

    /// Delete entries older than the trailing window. Returns rows deleted.
    pub fn prune_older_than(conn: &Connection, window_secs: u64) -> DbResult<usize> {
        let modifier = format!("-{} seconds", window_secs);
        let rows = conn.execute(
            "DELETE FROM generation_log
             WHERE created_at < strftime('%Y-%m-%dT%H:%M:%fZ', 'now', ?1)",
            [modifier],
        )?;
        Ok(rows)
    }

    /// Count requests in the trailing window
    pub fn count_since(
        conn: &Connection,
        user_id: &str,
        function_name: &str,
        window_secs: u64,
    ) -> DbResult<i64> {
        let modifier = format!("-{} seconds", window_secs);
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM generation_log
             WHERE user_id = ?1 AND function_name = ?2
               AND created_at >= strftime('%Y-%m-%dT%H:%M:%fZ', 'now', ?3)",
            params![user_id, function_name, modifier],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
