// src/cli/history.rs — Recent question log entries

use crate::core::LogRecord;
use crate::infra::config::Config;
use crate::memory::SharedStore;
use crate::util::preview;

pub async fn run_history(limit: u32, json: bool, config: &Config) -> anyhow::Result<()> {
    let db_path = config.storage.resolved_db_path();
    if !db_path.exists() {
        anyhow::bail!(
            "No question log at {}. Ask a question first.",
            db_path.display()
        );
    }

    let store = SharedStore::new(db_path);
    let records = store.recent(limit).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No questions logged yet.");
        return Ok(());
    }

    for record in &records {
        println!(
            "{}  {:<22}  {}",
            record.created_at.format("%Y-%m-%d %H:%M:%S"),
            outcome(record),
            preview(&record.question, 60)
        );
    }
    println!();
    println!("{}", summary(records.len(), store.count().await?));
    Ok(())
}

fn summary(shown: usize, total: usize) -> String {
    if shown >= total {
        format!("{total} logged questions")
    } else {
        format!("Showing {shown} of {total} logged questions")
    }
}

/// Short outcome label for one record.
pub fn outcome(record: &LogRecord) -> String {
    match (&record.ambiguity_feedback, &record.arbitration) {
        (Some(_), _) => "needs edit".into(),
        (None, Some(arb)) => format!("arbitrated (chose {})", arb.chosen.index()),
        (None, None) if record.answers.len() == 2 => "answers agreed".into(),
        (None, None) => "incomplete".into(),
    }
}
