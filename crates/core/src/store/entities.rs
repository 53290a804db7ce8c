//! Entity record persistence.
//!
//! Nested sub-records are stored as JSON columns; identity and provenance get
//! their own columns so they can be indexed.

use super::connection::DexDb;
use crate::Error;
use crate::record::{EntityRecord, Identity};
use tokio_rusqlite::params;
use tokio_rusqlite::rusqlite;

/// A stored entity with its row id and save timestamp.
#[derive(Debug, Clone)]
pub struct StoredEntity {
    pub id: i64,
    pub saved_at: String,
    pub complete: bool,
    pub record: EntityRecord,
}

/// Row shape shared by the insert and select paths.
struct EntityRow {
    types_json: Option<String>,
    abilities_json: Option<String>,
    weaknesses_json: Option<String>,
    movesets_json: String,
}

impl EntityRow {
    fn encode(record: &EntityRecord) -> Result<Self, Error> {
        Ok(Self {
            types_json: record.types.as_ref().map(serde_json::to_string).transpose()?,
            abilities_json: record.abilities.as_ref().map(serde_json::to_string).transpose()?,
            weaknesses_json: record.weaknesses.as_ref().map(serde_json::to_string).transpose()?,
            movesets_json: serde_json::to_string(&record.movesets)?,
        })
    }
}

fn decode_json<T: serde::de::DeserializeOwned>(json: Option<String>) -> Result<Option<T>, Error> {
    json.map(|j| serde_json::from_str(&j)).transpose().map_err(Error::from)
}

const SELECT_COLUMNS: &str = "SELECT
    id, dex_no, name, source_url, page_hash, complete,
    types_json, abilities_json, weaknesses_json, classification,
    movesets_json, sprite_url, saved_at
FROM entities";

fn read_row(row: &rusqlite::Row<'_>) -> Result<StoredEntity, Error> {
    let record = EntityRecord {
        identity: Identity { dex_no: row.get(1)?, name: row.get(2)? },
        source_url: row.get(3)?,
        page_hash: row.get(4)?,
        types: decode_json(row.get(6)?)?,
        abilities: decode_json(row.get(7)?)?,
        weaknesses: decode_json(row.get(8)?)?,
        classification: row.get(9)?,
        movesets: serde_json::from_str(&row.get::<_, String>(10)?)?,
        sprite_url: row.get(11)?,
    };

    Ok(StoredEntity { id: row.get(0)?, complete: row.get::<_, i32>(5)? == 1, saved_at: row.get(12)?, record })
}

impl DexDb {
    /// Append an entity record.
    ///
    /// Every call inserts a new row, even for a record identical to one
    /// already stored. Returns the new row id.
    pub async fn insert_entity(&self, record: &EntityRecord) -> Result<i64, Error> {
        let row = EntityRow::encode(record)?;
        let record = record.clone();
        let complete = record.is_complete();
        let saved_at = chrono::Utc::now().to_rfc3339();

        self.conn
            .call(move |conn| -> Result<i64, Error> {
                conn.execute(
                    "INSERT INTO entities (
                    dex_no, name, source_url, page_hash, complete,
                    types_json, abilities_json, weaknesses_json, classification,
                    movesets_json, sprite_url, saved_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
                    params![
                        &record.identity.dex_no,
                        &record.identity.name,
                        &record.source_url,
                        &record.page_hash,
                        complete as i32,
                        &row.types_json,
                        &row.abilities_json,
                        &row.weaknesses_json,
                        &record.classification,
                        &row.movesets_json,
                        &record.sprite_url,
                        &saved_at,
                    ],
                )?;
                Ok(conn.last_insert_rowid())
            })
            .await
            .map_err(Error::from)
    }

    /// Get an entity by row id.
    ///
    /// Returns None if the id doesn't exist.
    pub async fn get_entity(&self, id: i64) -> Result<Option<StoredEntity>, Error> {
        self.conn
            .call(move |conn| -> Result<Option<StoredEntity>, Error> {
                let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} WHERE id = ?1"))?;
                let mut rows = stmt.query(params![id])?;
                match rows.next()? {
                    Some(row) => Ok(Some(read_row(row)?)),
                    None => Ok(None),
                }
            })
            .await
            .map_err(Error::from)
    }

    /// Number of saved entity rows.
    pub async fn count_entities(&self) -> Result<u64, Error> {
        self.conn
            .call(move |conn| -> Result<u64, Error> {
                let count: i64 = conn.query_row("SELECT COUNT(*) FROM entities", [], |row| row.get(0))?;
                Ok(count as u64)
            })
            .await
            .map_err(Error::from)
    }
}
