//! Shopping list item model
//!
//! One row per shopping-list entry. Entries are identified by
//! (user, text, recipe name); the store does not enforce uniqueness.

use rusqlite::{params, Connection, Row, TransactionBehavior};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;

/// A shopping list entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShoppingListItem {
    pub id: i64,
    pub user_id: String,
    pub text: String,
    pub recipe_name: String,
    pub checked: bool,
    pub created_at: String,
}

impl ShoppingListItem {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            text: row.get("text")?,
            recipe_name: row.get("recipe_name")?,
            checked: row.get::<_, i32>("checked")? != 0,
            created_at: row.get("created_at")?,
        })
    }

    /// List a user's entries in insertion order
    pub fn list_for_user(conn: &Connection, user_id: &str) -> DbResult<Vec<Self>> {
        let mut stmt =
            conn.prepare("SELECT * FROM shopping_list_items WHERE user_id = ?1 ORDER BY id")?;
        let items = stmt
            .query_map([user_id], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(items)
    }

    /// Append a recipe's items unless the user already has entries for it.
    ///
    /// The existence check and the inserts share one immediate transaction,
    /// so concurrent calls for the same recipe add it once. Returns `None`
    /// when the recipe was already present.
    pub fn add_recipe_batch(
        conn: &mut Connection,
        user_id: &str,
        recipe_name: &str,
        texts: &[String],
    ) -> DbResult<Option<usize>> {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        if Self::has_recipe(&tx, user_id, recipe_name)? {
            return Ok(None);
        }
        {
            let mut stmt = tx.prepare(
                "INSERT INTO shopping_list_items (user_id, text, recipe_name, checked)
                 VALUES (?1, ?2, ?3, 0)",
            )?;
            for text in texts {
                stmt.execute(params![user_id, text, recipe_name])?;
            }
        }
        tx.commit()?;
        Ok(Some(texts.len()))
    }

    /// Find the first entry with the given key
    pub fn find(
        conn: &Connection,
        user_id: &str,
        text: &str,
        recipe_name: &str,
    ) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare(
            "SELECT * FROM shopping_list_items
             WHERE user_id = ?1 AND text = ?2 AND recipe_name = ?3
             ORDER BY id LIMIT 1",
        )?;

        match stmt.query_row(params![user_id, text, recipe_name], Self::from_row) {
            Ok(item) => Ok(Some(item)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Set the checked flag on every entry with the given key. Returns rows updated.
    pub fn set_checked(
        conn: &Connection,
        user_id: &str,
        text: &str,
        recipe_name: &str,
        checked: bool,
    ) -> DbResult<usize> {
        let rows = conn.execute(
            "UPDATE shopping_list_items SET checked = ?1
             WHERE user_id = ?2 AND text = ?3 AND recipe_name = ?4",
            params![checked as i32, user_id, text, recipe_name],
        )?;
        Ok(rows)
    }

    /// Remove every entry with the given key. Returns rows deleted.
    pub fn remove(
        conn: &Connection,
        user_id: &str,
        text: &str,
        recipe_name: &str,
    ) -> DbResult<usize> {
        let rows = conn.execute(
            "DELETE FROM shopping_list_items
             WHERE user_id = ?1 AND text = ?2 AND recipe_name = ?3",
            params![user_id, text, recipe_name],
        )?;
        Ok(rows)
    }

    /// Remove all of a user's entries. Returns rows deleted.
    pub fn clear(conn: &Connection, user_id: &str) -> DbResult<usize> {
        let rows = conn.execute(
            "DELETE FROM shopping_list_items WHERE user_id = ?1",
            [user_id],
        )?;
        Ok(rows)
    }

    /// Whether the user already has entries for a recipe
    pub fn has_recipe(conn: &Connection, user_id: &str, recipe_name: &str) -> DbResult<bool> {
        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM shopping_list_items WHERE user_id = ?1 AND recipe_name = ?2)",
            params![user_id, recipe_name],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    /// Count entries not yet checked off
    pub fn count_unchecked(conn: &Connection, user_id: &str) -> DbResult<i64> {
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM shopping_list_items WHERE user_id = ?1 AND checked = 0",
            [user_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
