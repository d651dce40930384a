use super::*;

pub(crate) fn open_store(db_path: &Path) -> Result<Connection> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }

    let connection = Connection::open(db_path)
        .with_context(|| format!("failed to open {}", db_path.display()))?;
    configure_connection(&connection)?;
    prepare_store(&connection)
        .with_context(|| format!("failed to prepare schema in {}", db_path.display()))?;

    Ok(connection)
}

pub(crate) fn open_store_read_only(db_path: &Path) -> Result<Connection> {
    if !db_path.exists() {
        bail!("database file missing: {}", db_path.display());
    }

    let connection = Connection::open_with_flags(db_path, OpenFlags::SQLITE_OPEN_READ_ONLY)
        .with_context(|| format!("failed to open {} read-only", db_path.display()))?;
    let version = schema_version(&connection)?;
    if version != DB_SCHEMA_VERSION {
        bail!(
            "unsupported schema version {version} in {} (expected {DB_SCHEMA_VERSION})",
            db_path.display()
        );
    }

    Ok(connection)
}

fn configure_connection(connection: &Connection) -> Result<()> {
    connection
        .pragma_update(None, "journal_mode", "WAL")
        .context("failed to set journal_mode=WAL")?;
    connection
        .pragma_update(None, "synchronous", "NORMAL")
        .context("failed to set synchronous=NORMAL")?;
    Ok(())
}

pub(crate) fn prepare_store(connection: &Connection) -> Result<()> {
    connection
        .pragma_update(None, "foreign_keys", "ON")
        .context("failed to enable foreign_keys")?;

    let version = schema_version(connection)?;
    if version > DB_SCHEMA_VERSION {
        bail!("store schema version {version} is newer than supported {DB_SCHEMA_VERSION}");
    }

    ensure_schema(connection)?;

    connection
        .pragma_update(None, "user_version", DB_SCHEMA_VERSION)
        .context("failed to record schema version")?;
    Ok(())
}

fn schema_version(connection: &Connection) -> Result<i64> {
    connection
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .context("failed to read schema version")
}

fn ensure_schema(connection: &Connection) -> Result<()> {
    connection.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS dictionaries (
          dictionary_id INTEGER PRIMARY KEY,
          name_arabic TEXT NOT NULL,
          name_english TEXT,
          description TEXT,
          author TEXT,
          year INTEGER,
          created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS chapters (
          chapter_id INTEGER PRIMARY KEY AUTOINCREMENT,
          dictionary_id INTEGER NOT NULL,
          name_arabic TEXT NOT NULL,
          chapter_order INTEGER NOT NULL,
          FOREIGN KEY(dictionary_id) REFERENCES dictionaries(dictionary_id)
        );

        CREATE TABLE IF NOT EXISTS sections (
          section_id INTEGER PRIMARY KEY AUTOINCREMENT,
          chapter_id INTEGER NOT NULL,
          dictionary_id INTEGER NOT NULL,
          name_arabic TEXT NOT NULL,
          section_order INTEGER NOT NULL,
          FOREIGN KEY(chapter_id) REFERENCES chapters(chapter_id),
          FOREIGN KEY(dictionary_id) REFERENCES dictionaries(dictionary_id)
        );

        CREATE TABLE IF NOT EXISTS entries (
          entry_id INTEGER PRIMARY KEY AUTOINCREMENT,
          section_id INTEGER NOT NULL,
          dictionary_id INTEGER NOT NULL,
          root TEXT NOT NULL,
          headword TEXT NOT NULL,
          headword_normalized TEXT NOT NULL,
          pattern_ref TEXT,
          is_unique INTEGER NOT NULL DEFAULT 0,
          page_number INTEGER,
          entry_order INTEGER NOT NULL,
          full_text TEXT NOT NULL,
          FOREIGN KEY(section_id) REFERENCES sections(section_id),
          FOREIGN KEY(dictionary_id) REFERENCES dictionaries(dictionary_id)
        );

        CREATE TABLE IF NOT EXISTS definitions (
          definition_id INTEGER PRIMARY KEY AUTOINCREMENT,
          entry_id INTEGER NOT NULL,
          definition_text TEXT NOT NULL,
          definition_order INTEGER NOT NULL,
          FOREIGN KEY(entry_id) REFERENCES entries(entry_id)
        );

        CREATE TABLE IF NOT EXISTS plurals (
          plural_id INTEGER PRIMARY KEY AUTOINCREMENT,
          entry_id INTEGER NOT NULL,
          plural_form TEXT NOT NULL,
          plural_order INTEGER NOT NULL,
          FOREIGN KEY(entry_id) REFERENCES entries(entry_id)
        );

        CREATE TABLE IF NOT EXISTS markers (
          marker_id INTEGER PRIMARY KEY AUTOINCREMENT,
          entry_id INTEGER NOT NULL,
          marker_type TEXT NOT NULL,
          marker_text TEXT NOT NULL,
          FOREIGN KEY(entry_id) REFERENCES entries(entry_id)
        );

        CREATE TABLE IF NOT EXISTS metadata (
          dictionary_id INTEGER NOT NULL,
          key TEXT NOT NULL,
          value TEXT NOT NULL,
          updated_at TEXT NOT NULL,
          PRIMARY KEY(dictionary_id, key),
          FOREIGN KEY(dictionary_id) REFERENCES dictionaries(dictionary_id)
        );

        CREATE INDEX IF NOT EXISTS idx_chapters_dictionary_order ON chapters(dictionary_id, chapter_order);
        CREATE INDEX IF NOT EXISTS idx_sections_chapter_order ON sections(chapter_id, section_order);
        CREATE INDEX IF NOT EXISTS idx_entries_headword_normalized ON entries(headword_normalized);
        CREATE INDEX IF NOT EXISTS idx_entries_root ON entries(root);
        CREATE INDEX IF NOT EXISTS idx_entries_section_page_order ON entries(section_id, page_number, entry_order);
        CREATE INDEX IF NOT EXISTS idx_definitions_entry ON definitions(entry_id, definition_order);
        CREATE INDEX IF NOT EXISTS idx_plurals_entry ON plurals(entry_id, plural_order);
        CREATE INDEX IF NOT EXISTS idx_markers_entry ON markers(entry_id);
        ",
    )?;

    Ok(())
}

pub(crate) fn count_rows(
    connection: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
) -> Result<i64> {
    let count = connection
        .query_row(sql, params, |row| row.get(0))
        .with_context(|| format!("failed to count rows: {sql}"))?;
    Ok(count)
}
