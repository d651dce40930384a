use std::io::{self, Write};

use anyhow::{Context, Result, bail};
use rusqlite::{Connection, params};
use serde::Serialize;
use tracing::info;

use crate::cli::LookupArgs;
use crate::commands::extract::open_store_read_only;
use crate::normalize::normalize_arabic;

#[derive(Debug, Clone, Serialize)]
pub(crate) struct LookupResult {
    pub(crate) entry_id: i64,
    pub(crate) dictionary_id: i64,
    pub(crate) dictionary_name: String,
    pub(crate) chapter: String,
    pub(crate) section: String,
    pub(crate) headword: String,
    pub(crate) root: String,
    pub(crate) pattern_ref: Option<String>,
    pub(crate) page_number: Option<i64>,
    pub(crate) entry_order: i64,
    pub(crate) definitions: Vec<String>,
    pub(crate) plurals: Vec<String>,
}

#[derive(Debug, Serialize)]
struct LookupResponse {
    query: String,
    query_normalized: String,
    dictionary_id: Option<i64>,
    returned: usize,
    results: Vec<LookupResult>,
}

pub fn run(args: LookupArgs) -> Result<()> {
    let query_normalized = normalize_arabic(&args.query);
    if query_normalized.is_empty() {
        bail!("query is empty after normalization");
    }

    let db_path = args.store.resolved_db_path();
    let connection = open_store_read_only(&db_path)?;
    let results = find_entries(&connection, &args.query, args.dictionary_id, args.limit)?;
    info!(query = %query_normalized, returned = results.len(), "lookup completed");

    let response = LookupResponse {
        query: args.query.clone(),
        query_normalized,
        dictionary_id: args.dictionary_id,
        returned: results.len(),
        results,
    };

    let mut output = io::BufWriter::new(io::stdout().lock());
    if args.json {
        serde_json::to_writer_pretty(&mut output, &response)
            .context("failed to serialize lookup json output")?;
        writeln!(output)?;
    } else {
        write_text_response(&mut output, &response)?;
    }
    output.flush()?;
    Ok(())
}

/// Exact match on the normalized headword; the query goes through the same
/// normalizer the extractor used.
pub(crate) fn find_entries(
    connection: &Connection,
    query: &str,
    dictionary_id: Option<i64>,
    limit: usize,
) -> Result<Vec<LookupResult>> {
    let query_normalized = normalize_arabic(query);
    let mut statement = connection.prepare(
        "
        SELECT e.entry_id, e.dictionary_id, d.name_arabic, c.name_arabic, s.name_arabic,
               e.headword, e.root, e.pattern_ref, e.page_number, e.entry_order
        FROM entries e
        JOIN sections s ON s.section_id = e.section_id
        JOIN chapters c ON c.chapter_id = s.chapter_id
        JOIN dictionaries d ON d.dictionary_id = e.dictionary_id
        WHERE e.headword_normalized = ?1
          AND (?2 IS NULL OR e.dictionary_id = ?2)
        ORDER BY e.dictionary_id, c.chapter_order, s.section_order, e.page_number, e.entry_order
        LIMIT ?3
        ",
    )?;

    let limit = i64::try_from(limit).unwrap_or(i64::MAX);
    let mut results = statement
        .query_map(params![query_normalized, dictionary_id, limit], |row| {
            Ok(LookupResult {
                entry_id: row.get(0)?,
                dictionary_id: row.get(1)?,
                dictionary_name: row.get(2)?,
                chapter: row.get(3)?,
                section: row.get(4)?,
                headword: row.get(5)?,
                root: row.get(6)?,
                pattern_ref: row.get(7)?,
                page_number: row.get(8)?,
                entry_order: row.get(9)?,
                definitions: Vec::new(),
                plurals: Vec::new(),
            })
        })?
        .collect::<rusqlite::Result<Vec<LookupResult>>>()?;

    let mut definition_statement = connection.prepare(
        "SELECT definition_text FROM definitions WHERE entry_id = ?1 ORDER BY definition_order",
    )?;
    let mut plural_statement = connection
        .prepare("SELECT plural_form FROM plurals WHERE entry_id = ?1 ORDER BY plural_order")?;

    for result in &mut results {
        result.definitions = definition_statement
            .query_map([result.entry_id], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        result.plurals = plural_statement
            .query_map([result.entry_id], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
    }

    Ok(results)
}

fn write_text_response(output: &mut impl Write, response: &LookupResponse) -> Result<()> {
    writeln!(
        output,
        "Query: {} (normalized: {})",
        response.query, response.query_normalized
    )?;
    writeln!(output, "Results: {}", response.returned)?;

    for (rank, result) in response.results.iter().enumerate() {
        let page = result
            .page_number
            .map(|page| page.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        writeln!(
            output,
            "{}.\t{}\t{} > {}\tpage {} #{}",
            rank + 1,
            result.headword,
            result.chapter,
            result.section,
            page,
            result.entry_order
        )?;
        writeln!(output, "\tdictionary: {}", result.dictionary_name)?;
        if let Some(pattern_ref) = &result.pattern_ref {
            writeln!(output, "\tpattern: {pattern_ref}")?;
        }
        if !result.plurals.is_empty() {
            writeln!(output, "\tplurals: {}", result.plurals.join("، "))?;
        }
        for (index, definition) in result.definitions.iter().enumerate() {
            writeln!(output, "\t{}) {}", index + 1, definition)?;
        }
    }

    Ok(())
}
