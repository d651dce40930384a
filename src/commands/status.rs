use anyhow::Result;
use rusqlite::Connection;
use tracing::{info, warn};

use crate::cli::StatusArgs;
use crate::commands::extract::{count_rows, open_store_read_only};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DictionaryStatus {
    pub(crate) dictionary_id: i64,
    pub(crate) name_arabic: String,
    pub(crate) chapters: i64,
    pub(crate) sections: i64,
    pub(crate) entries: i64,
    pub(crate) definitions: i64,
    pub(crate) plurals: i64,
    pub(crate) markers: i64,
    pub(crate) metadata: Vec<(String, String)>,
}

pub fn run(args: StatusArgs) -> Result<()> {
    let db_path = args.store.resolved_db_path();
    info!(db = %db_path.display(), "status requested");

    if !db_path.exists() {
        warn!(path = %db_path.display(), "database file missing");
        return Ok(());
    }

    let connection = open_store_read_only(&db_path)?;
    let dictionaries = collect_status(&connection)?;
    if dictionaries.is_empty() {
        warn!("no dictionaries registered");
    }

    for status in dictionaries {
        info!(
            dictionary_id = status.dictionary_id,
            name = %status.name_arabic,
            chapters = status.chapters,
            sections = status.sections,
            entries = status.entries,
            definitions = status.definitions,
            plurals = status.plurals,
            markers = status.markers,
            "dictionary status"
        );
        if status.metadata.is_empty() {
            warn!(dictionary_id = status.dictionary_id, "no extraction metadata recorded");
        }
        for (key, value) in &status.metadata {
            info!(dictionary_id = status.dictionary_id, key = %key, value = %value, "metadata");
        }
    }

    Ok(())
}

pub(crate) fn collect_status(connection: &Connection) -> Result<Vec<DictionaryStatus>> {
    let mut statement = connection
        .prepare("SELECT dictionary_id, name_arabic FROM dictionaries ORDER BY dictionary_id")?;
    let dictionaries = statement
        .query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))?
        .collect::<rusqlite::Result<Vec<(i64, String)>>>()?;

    let mut statuses = Vec::with_capacity(dictionaries.len());
    for (dictionary_id, name_arabic) in dictionaries {
        let mut metadata_statement = connection.prepare(
            "SELECT key, value FROM metadata WHERE dictionary_id = ?1 ORDER BY key",
        )?;
        let metadata = metadata_statement
            .query_map([dictionary_id], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<rusqlite::Result<Vec<(String, String)>>>()?;

        statuses.push(DictionaryStatus {
            dictionary_id,
            name_arabic,
            chapters: count_rows(
                connection,
                "SELECT COUNT(*) FROM chapters WHERE dictionary_id = ?1",
                [dictionary_id],
            )?,
            sections: count_rows(
                connection,
                "SELECT COUNT(*) FROM sections WHERE dictionary_id = ?1",
                [dictionary_id],
            )?,
            entries: count_rows(
                connection,
                "SELECT COUNT(*) FROM entries WHERE dictionary_id = ?1",
                [dictionary_id],
            )?,
            definitions: count_rows(
                connection,
                "
                SELECT COUNT(*) FROM definitions d
                JOIN entries e ON e.entry_id = d.entry_id
                WHERE e.dictionary_id = ?1
                ",
                [dictionary_id],
            )?,
            plurals: count_rows(
                connection,
                "
                SELECT COUNT(*) FROM plurals p
                JOIN entries e ON e.entry_id = p.entry_id
                WHERE e.dictionary_id = ?1
                ",
                [dictionary_id],
            )?,
            markers: count_rows(
                connection,
                "
                SELECT COUNT(*) FROM markers m
                JOIN entries e ON e.entry_id = m.entry_id
                WHERE e.dictionary_id = ?1
                ",
                [dictionary_id],
            )?,
            metadata,
        });
    }

    Ok(statuses)
}
