use rusqlite::{Connection, OptionalExtension, Result};

pub const DARK_MODE_KEY: &str = "flashmindDarkMode";

pub fn get_preference(conn: &Connection, key: &str) -> Result<Option<String>> {
    conn.query_row(
        "SELECT value FROM preferences WHERE key = ?",
        [key],
        |row| row.get(0),
    )
    .optional()
}

pub fn set_preference(conn: &Connection, key: &str, value: &str) -> Result<()> {
    let updated_at = chrono::Utc::now().timestamp();
    conn.execute(
        "INSERT INTO preferences (key, value, updated_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        rusqlite::params![key, value, updated_at],
    )?;
    Ok(())
}

/// Accepts the `"enabled"` spelling written by the landing page as well as `"true"`.
pub fn load_dark_mode(conn: &Connection) -> Result<bool> {
    Ok(matches!(
        get_preference(conn, DARK_MODE_KEY)?.as_deref(),
        Some("true") | Some("enabled")
    ))
}

pub fn set_dark_mode(conn: &Connection, enabled: bool) -> Result<()> {
    set_preference(conn, DARK_MODE_KEY, if enabled { "true" } else { "false" })
}

/// Flips the stored preference and returns the new value.
pub fn toggle_dark_mode(conn: &Connection) -> Result<bool> {
    let enabled = !load_dark_mode(conn)?;
    set_dark_mode(conn, enabled)?;
    Ok(enabled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{init_db, run_migrations};

    fn memory_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    #[test]
    fn test_dark_mode_defaults_to_off() {
        let conn = memory_db();
        assert!(!load_dark_mode(&conn).unwrap());
    }

    #[test]
    fn test_toggle_twice_restores_default() {
        let conn = memory_db();
        assert!(toggle_dark_mode(&conn).unwrap());
        assert!(!toggle_dark_mode(&conn).unwrap());
        assert!(!load_dark_mode(&conn).unwrap());
        assert_eq!(
            get_preference(&conn, DARK_MODE_KEY).unwrap().as_deref(),
            Some("false")
        );
    }

    #[test]
    fn test_dark_mode_survives_reload() {
        let temp_dir = tempfile::tempdir().unwrap();
        let db_path = temp_dir.path().join("flashmind.db");

        {
            let conn = init_db(&db_path).unwrap();
            toggle_dark_mode(&conn).unwrap();
        }

        let conn = init_db(&db_path).unwrap();
        assert!(load_dark_mode(&conn).unwrap());
    }

    #[test]
    fn test_stored_spellings() {
        let conn = memory_db();
        set_preference(&conn, DARK_MODE_KEY, "yes").unwrap();
        assert!(!load_dark_mode(&conn).unwrap());
        set_preference(&conn, DARK_MODE_KEY, "enabled").unwrap();
        assert!(load_dark_mode(&conn).unwrap());
    }
}
