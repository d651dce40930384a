use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};
use tracing::{info, warn};

use crate::cli::RegisterArgs;
use crate::commands::extract::open_store;
use crate::util::now_utc_string;

#[derive(Debug, Clone)]
pub(crate) struct DictionaryRegistration {
    pub(crate) dictionary_id: Option<i64>,
    pub(crate) name_arabic: String,
    pub(crate) name_english: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) author: Option<String>,
    pub(crate) year: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RegisterOutcome {
    Created(i64),
    AlreadyPresent { dictionary_id: i64, name_arabic: String },
}

pub fn run(args: RegisterArgs) -> Result<()> {
    let db_path = args.store.resolved_db_path();
    let connection = open_store(&db_path)?;

    let registration = DictionaryRegistration {
        dictionary_id: args.dictionary_id,
        name_arabic: args.name_arabic.trim().to_string(),
        name_english: args.name_english,
        description: args.description,
        author: args.author,
        year: args.year,
    };

    match register_dictionary(&connection, &registration)? {
        RegisterOutcome::Created(dictionary_id) => {
            info!(
                dictionary_id,
                name = %registration.name_arabic,
                db = %db_path.display(),
                "registered dictionary"
            );
        }
        RegisterOutcome::AlreadyPresent {
            dictionary_id,
            name_arabic,
        } => {
            warn!(
                dictionary_id,
                existing_name = %name_arabic,
                "dictionary already registered; left unchanged"
            );
        }
    }

    Ok(())
}

pub(crate) fn register_dictionary(
    connection: &Connection,
    registration: &DictionaryRegistration,
) -> Result<RegisterOutcome> {
    if let Some(dictionary_id) = registration.dictionary_id {
        let existing: Option<String> = connection
            .query_row(
                "SELECT name_arabic FROM dictionaries WHERE dictionary_id = ?1",
                [dictionary_id],
                |row| row.get(0),
            )
            .optional()?;
        if let Some(name_arabic) = existing {
            return Ok(RegisterOutcome::AlreadyPresent {
                dictionary_id,
                name_arabic,
            });
        }
    }

    connection
        .execute(
            "
            INSERT INTO dictionaries(
              dictionary_id, name_arabic, name_english, description, author, year, created_at
            )
            VALUES(?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ",
            params![
                registration.dictionary_id,
                &registration.name_arabic,
                &registration.name_english,
                &registration.description,
                &registration.author,
                registration.year,
                now_utc_string(),
            ],
        )
        .with_context(|| format!("failed to register dictionary '{}'", registration.name_arabic))?;

    Ok(RegisterOutcome::Created(connection.last_insert_rowid()))
}
