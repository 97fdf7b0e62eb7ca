use anyhow::Context;
use rusqlite::{Connection, OptionalExtension};

/// Schema changes compiled into the binary, applied in order.
const MIGRATIONS: &[(&str, &str)] = &[(
    "001_conversations.sql",
    include_str!("../../migrations/001_conversations.sql"),
)];

pub fn run_migrations(conn: &Connection) -> anyhow::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS _migrations (
            name TEXT PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );",
    )
    .context("failed to create migrations table")?;

    for (name, sql) in MIGRATIONS {
        let applied_at: Option<String> = conn
            .query_row(
                "SELECT applied_at FROM _migrations WHERE name = ?1",
                [name],
                |row| row.get(0),
            )
            .optional()
            .context("failed to check migration status")?;

        if let Some(applied_at) = applied_at {
            tracing::trace!(migration = %name, %applied_at, "migration already applied");
            continue;
        }

        let tx = conn
            .unchecked_transaction()
            .context("failed to start migration transaction")?;
        tx.execute_batch(sql)
            .with_context(|| format!("failed to apply migration: {name}"))?;
        tx.execute("INSERT INTO _migrations (name) VALUES (?1)", [name])
            .with_context(|| format!("failed to record migration: {name}"))?;
        tx.commit()
            .with_context(|| format!("failed to commit migration: {name}"))?;

        tracing::info!(migration = %name, "applied migration");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_apply_once() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();

        let applied: i64 = conn
            .query_row("SELECT COUNT(*) FROM _migrations", [], |row| row.get(0))
            .unwrap();
        assert_eq!(applied, MIGRATIONS.len() as i64);

        conn.execute(
            "INSERT INTO conversations (id, state, last_activity, expires_at) VALUES ('c', '{}', 'x', 'y')",
            [],
        )
        .unwrap();
    }
}
