//! Move catalog persistence.

use super::connection::DexDb;
use crate::Error;
use crate::record::MoveRecord;
use tokio_rusqlite::params;

impl DexDb {
    /// Append one generation's catalog moves in a single transaction.
    ///
    /// Returns the number of rows written.
    pub async fn insert_moves(&self, generation: &str, moves: &[MoveRecord]) -> Result<usize, Error> {
        let generation = generation.to_string();
        let moves = moves.to_vec();
        let saved_at = chrono::Utc::now().to_rfc3339();

        self.conn
            .call(move |conn| -> Result<usize, Error> {
                let tx = conn.transaction()?;
                {
                    let mut stmt = tx.prepare(
                        "INSERT INTO moves (
                        generation, name, move_type, category, power, accuracy,
                        power_points, effect, intro_gen, saved_at
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                    )?;
                    for m in &moves {
                        stmt.execute(params![
                            &generation,
                            &m.name,
                            &m.move_type,
                            &m.category,
                            &m.power,
                            &m.accuracy,
                            &m.power_points,
                            &m.effect,
                            m.intro_gen,
                            &saved_at,
                        ])?;
                    }
                }
                tx.commit()?;
                Ok(moves.len())
            })
            .await
            .map_err(Error::from)
    }

    /// Catalog moves stored for a generation label, in insertion order.
    pub async fn moves_for_generation(&self, generation: &str) -> Result<Vec<MoveRecord>, Error> {
        let generation = generation.to_string();
        self.conn
            .call(move |conn| -> Result<Vec<MoveRecord>, Error> {
                let mut stmt = conn.prepare(
                    "SELECT name, move_type, category, power, accuracy, power_points, effect, intro_gen
                    FROM moves WHERE generation = ?1 ORDER BY id ASC",
                )?;
                let moves = stmt
                    .query_map(params![generation], |row| {
                        Ok(MoveRecord {
                            name: row.get(0)?,
                            move_type: row.get(1)?,
                            category: row.get(2)?,
                            power: row.get(3)?,
                            accuracy: row.get(4)?,
                            power_points: row.get(5)?,
                            effect: row.get(6)?,
                            intro_gen: row.get(7)?,
                        })
                    })?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(moves)
            })
            .await
            .map_err(Error::from)
    }
}
