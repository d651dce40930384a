use super::*;

/// Insert-only writer for one dictionary. Parents must be written before
/// their children; every insert returns the store-assigned row id.
pub(crate) struct StoreWriter<'conn> {
    connection: &'conn Connection,
    dictionary_id: i64,
}

impl<'conn> StoreWriter<'conn> {
    pub(crate) fn new(connection: &'conn Connection, dictionary_id: i64) -> Self {
        Self {
            connection,
            dictionary_id,
        }
    }

    pub(crate) fn connection(&self) -> &'conn Connection {
        self.connection
    }

    pub(crate) fn dictionary_id(&self) -> i64 {
        self.dictionary_id
    }

    pub(crate) fn insert_chapter(&self, name: &str, chapter_order: u32) -> Result<i64> {
        let mut statement = self.connection.prepare_cached(
            "INSERT INTO chapters(dictionary_id, name_arabic, chapter_order) VALUES(?1, ?2, ?3)",
        )?;
        let chapter_id = statement
            .insert(params![self.dictionary_id, name, chapter_order])
            .with_context(|| format!("failed to insert chapter '{name}'"))?;
        Ok(chapter_id)
    }

    pub(crate) fn insert_section(
        &self,
        chapter_id: i64,
        name: &str,
        section_order: u32,
    ) -> Result<i64> {
        let mut statement = self.connection.prepare_cached(
            "
            INSERT INTO sections(chapter_id, dictionary_id, name_arabic, section_order)
            VALUES(?1, ?2, ?3, ?4)
            ",
        )?;
        let section_id = statement
            .insert(params![chapter_id, self.dictionary_id, name, section_order])
            .with_context(|| format!("failed to insert section '{name}'"))?;
        Ok(section_id)
    }

    pub(crate) fn insert_entry(&self, section_id: i64, entry: &EntryRecord) -> Result<i64> {
        let mut statement = self.connection.prepare_cached(
            "
            INSERT INTO entries(
              section_id, dictionary_id, root, headword, headword_normalized,
              pattern_ref, is_unique, page_number, entry_order, full_text
            )
            VALUES(?1, ?2, ?3, ?4, ?5, ?6, 0, ?7, ?8, ?9)
            ",
        )?;
        let entry_id = statement.insert(params![
            section_id,
            self.dictionary_id,
            &entry.root,
            &entry.headword,
            &entry.headword_normalized,
            &entry.pattern_ref,
            entry.page_number,
            entry.entry_order,
            &entry.full_text,
        ])?;
        Ok(entry_id)
    }

    pub(crate) fn insert_definition(
        &self,
        entry_id: i64,
        definition_text: &str,
        definition_order: u32,
    ) -> Result<i64> {
        let mut statement = self.connection.prepare_cached(
            "
            INSERT INTO definitions(entry_id, definition_text, definition_order)
            VALUES(?1, ?2, ?3)
            ",
        )?;
        Ok(statement.insert(params![entry_id, definition_text, definition_order])?)
    }

    pub(crate) fn insert_plural(
        &self,
        entry_id: i64,
        plural_form: &str,
        plural_order: u32,
    ) -> Result<i64> {
        let mut statement = self.connection.prepare_cached(
            "INSERT INTO plurals(entry_id, plural_form, plural_order) VALUES(?1, ?2, ?3)",
        )?;
        Ok(statement.insert(params![entry_id, plural_form, plural_order])?)
    }

    pub(crate) fn insert_marker(
        &self,
        entry_id: i64,
        kind: MarkerKind,
        marker_text: &str,
    ) -> Result<i64> {
        let mut statement = self.connection.prepare_cached(
            "INSERT INTO markers(entry_id, marker_type, marker_text) VALUES(?1, ?2, ?3)",
        )?;
        Ok(statement.insert(params![entry_id, kind.as_str(), marker_text])?)
    }

    /// The only overwrite the pipeline performs.
    pub(crate) fn upsert_metadata(&self, key: &str, value: &str) -> Result<()> {
        let mut statement = self.connection.prepare_cached(
            "
            INSERT INTO metadata(dictionary_id, key, value, updated_at)
            VALUES(?1, ?2, ?3, ?4)
            ON CONFLICT(dictionary_id, key) DO UPDATE SET
              value=excluded.value,
              updated_at=excluded.updated_at
            ",
        )?;
        statement
            .execute(params![self.dictionary_id, key, value, now_utc_string()])
            .with_context(|| format!("failed to write metadata key '{key}'"))?;
        Ok(())
    }

    /// Runs `work` inside a savepoint; on error everything it wrote is
    /// rolled back before the error is returned.
    pub(crate) fn in_savepoint<T>(
        &self,
        name: &str,
        work: impl FnOnce(&Self) -> Result<T>,
    ) -> Result<T> {
        self.connection
            .execute_batch(&format!("SAVEPOINT {name}"))
            .with_context(|| format!("failed to open savepoint {name}"))?;

        match work(self) {
            Ok(value) => {
                self.connection
                    .execute_batch(&format!("RELEASE {name}"))
                    .with_context(|| format!("failed to release savepoint {name}"))?;
                Ok(value)
            }
            Err(err) => {
                self.connection
                    .execute_batch(&format!("ROLLBACK TO {name}; RELEASE {name}"))
                    .with_context(|| format!("failed to roll back savepoint {name}"))?;
                Err(err)
            }
        }
    }

    pub(crate) fn dictionary_name(&self) -> Result<Option<String>> {
        let name = self
            .connection
            .query_row(
                "SELECT name_arabic FROM dictionaries WHERE dictionary_id = ?1",
                [self.dictionary_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(name)
    }

    pub(crate) fn existing_entry_count(&self) -> Result<i64> {
        count_rows(
            self.connection,
            "SELECT COUNT(*) FROM entries WHERE dictionary_id = ?1",
            [self.dictionary_id],
        )
    }
}
