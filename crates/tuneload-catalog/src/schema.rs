//! Target table DDL.
//!
//! Column names line up with each shape's insert template; the tests load
//! one row of every shape through these tables.

use anyhow::{Context, Result};
use duckdb::Connection;

pub const CREATE_ARTISTS: &str = "CREATE TABLE IF NOT EXISTS artists (
    id BIGINT PRIMARY KEY,
    name VARCHAR NOT NULL,
    artist_type_id BIGINT NOT NULL,
    is_actual_artist BOOLEAN NOT NULL,
    view_url VARCHAR NOT NULL,
    export_date BIGINT NOT NULL
)";

pub const CREATE_GENRES: &str = "CREATE TABLE IF NOT EXISTS genres (
    id BIGINT PRIMARY KEY,
    parent_id BIGINT,
    name VARCHAR NOT NULL,
    export_date BIGINT NOT NULL
)";

pub const CREATE_ARTISTS_TO_GENRES: &str = "CREATE TABLE IF NOT EXISTS artists_to_genres (
    artist_id BIGINT NOT NULL,
    genre_id BIGINT NOT NULL,
    is_primary BOOLEAN NOT NULL,
    export_date BIGINT NOT NULL,
    PRIMARY KEY (artist_id, genre_id)
)";

/// (table, DDL) in load order
pub const TABLES: [(&str, &str); 3] = [
    ("artists", CREATE_ARTISTS),
    ("genres", CREATE_GENRES),
    ("artists_to_genres", CREATE_ARTISTS_TO_GENRES),
];

/// Create every target table that does not exist yet.
pub fn create_all(conn: &Connection) -> Result<()> {
    for (table, ddl) in TABLES {
        log::debug!("Ensuring table {table}");
        conn.execute_batch(ddl)
            .with_context(|| format!("Failed to create table {table}"))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ARTIST, ARTIST_GENRE, GENRE};

    fn columns(conn: &Connection, table: &str) -> Vec<String> {
        let mut stmt = conn
            .prepare(
                "SELECT column_name FROM information_schema.columns
                 WHERE table_name = ? ORDER BY ordinal_position",
            )
            .unwrap();
        stmt.query_map([table], |row| row.get::<_, String>(0))
            .unwrap()
            .map(|c| c.unwrap())
            .collect()
    }

    #[test]
    fn create_all_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        create_all(&conn).unwrap();
        create_all(&conn).unwrap();
        let n: i64 = conn
            .query_row(
                "SELECT count(*) FROM information_schema.tables WHERE table_name IN ('artists', 'genres', 'artists_to_genres')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(n, 3);
    }

    #[test]
    fn insert_columns_exist() {
        let conn = Connection::open_in_memory().unwrap();
        create_all(&conn).unwrap();
        for shape in [&ARTIST, &GENRE, &ARTIST_GENRE] {
            let have = columns(&conn, shape.insert.table);
            for col in shape.insert.columns {
                assert!(
                    have.iter().any(|c| c == col),
                    "{}.{col} missing from {have:?}",
                    shape.insert.table
                );
            }
        }
    }
}
