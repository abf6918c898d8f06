// src/memory/store.rs — SQLite operations for the question log

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::core::types::{ArbitrationOutcome, ChosenAnswer, LogRecord, ModelAnswer};

/// Insert/read access to the question log. Rows are never updated or deleted.
pub struct Store {
    conn: Connection,
}

fn timestamp(t: &DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(s: &str) -> anyhow::Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(s)?.with_timezone(&Utc))
}

impl Store {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Raw connection, for ad-hoc queries in tests and diagnostics.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Write one record (question, answers, arbitration) atomically.
    pub fn append_record(&self, record: &LogRecord) -> anyhow::Result<()> {
        let created_at = timestamp(&record.created_at);
        let tx = self.conn.unchecked_transaction()?;

        tx.execute(
            "INSERT INTO questions (id, question, ambiguity_feedback, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                record.id,
                record.question,
                record.ambiguity_feedback,
                created_at
            ],
        )?;

        for (position, answer) in record.answers.iter().enumerate() {
            tx.execute(
                "INSERT INTO answers (question_id, position, model, text, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    record.id,
                    position as i64,
                    answer.model_label,
                    answer.text,
                    created_at
                ],
            )?;
        }

        if let Some(ref arb) = record.arbitration {
            tx.execute(
                "INSERT INTO arbitrations (question_id, chosen, reason, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![record.id, arb.chosen.index(), arb.reason, created_at],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    pub fn count_records(&self) -> anyhow::Result<usize> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM questions", [], |r| r.get(0))?;
        Ok(n as usize)
    }

    /// Most recent records first.
    pub fn recent_records(&self, limit: u32) -> anyhow::Result<Vec<LogRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, question, ambiguity_feedback, created_at
             FROM questions ORDER BY created_at DESC, rowid DESC LIMIT ?1",
        )?;
        let heads = stmt
            .query_map(params![limit], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<String>>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut records = Vec::with_capacity(heads.len());
        for (id, question, ambiguity_feedback, created_at) in heads {
            let answers = self.answers_for(&id)?;
            let arbitration = self.arbitration_for(&id)?;
            records.push(LogRecord {
                id,
                question,
                ambiguity_feedback,
                answers,
                arbitration,
                created_at: parse_timestamp(&created_at)?,
            });
        }
        Ok(records)
    }

    fn answers_for(&self, question_id: &str) -> anyhow::Result<Vec<ModelAnswer>> {
        let mut stmt = self.conn.prepare(
            "SELECT text, model FROM answers WHERE question_id = ?1 ORDER BY position",
        )?;
        let rows = stmt
            .query_map(params![question_id], |row| {
                Ok(ModelAnswer {
                    text: row.get(0)?,
                    model_label: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn arbitration_for(&self, question_id: &str) -> anyhow::Result<Option<ArbitrationOutcome>> {
        let row: Option<(u8, String)> = self
            .conn
            .query_row(
                "SELECT chosen, reason FROM arbitrations WHERE question_id = ?1",
                params![question_id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        match row {
            Some((chosen, reason)) => {
                let chosen = ChosenAnswer::try_from(chosen).map_err(anyhow::Error::msg)?;
                Ok(Some(ArbitrationOutcome { chosen, reason }))
            }
            None => Ok(None),
        }
    }
}
