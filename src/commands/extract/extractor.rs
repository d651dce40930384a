use super::*;

const DEFAULT_CHAPTER_NAME: &str = "باب افتراضي";
const DEFAULT_SECTION_NAME: &str = "القسم الأول";
const ENTRY_SAVEPOINT: &str = "entry_write";
const LOG_PREVIEW_CHARS: usize = 60;

/// Walks page blocks in source order, tracking the open chapter/section and
/// writing entries under it. One instance per dictionary run; nothing is
/// shared between instances.
pub(crate) struct Extractor<'conn> {
    store: StoreWriter<'conn>,
    parser: EntryFieldParser,
    context: ExtractionContext,
    chapter_counter: u32,
    counts: ExtractCounts,
}

impl<'conn> Extractor<'conn> {
    pub(crate) fn new(
        connection: &'conn Connection,
        dictionary_id: i64,
        parser: EntryFieldParser,
    ) -> Self {
        Self {
            store: StoreWriter::new(connection, dictionary_id),
            parser,
            context: ExtractionContext::default(),
            chapter_counter: 0,
            counts: ExtractCounts::default(),
        }
    }

    pub(crate) fn counts(&self) -> &ExtractCounts {
        &self.counts
    }

    pub(crate) fn state(&self) -> ContextState {
        self.context.state()
    }

    /// Processes one document inside its own transaction. An error here
    /// leaves earlier documents committed and this one rolled back.
    pub(crate) fn process_document(
        &mut self,
        reader: &BlockReader,
        document: &DictionaryDocument,
    ) -> Result<DocumentOutcome> {
        let strategy = SegmentationStrategy::detect(&document.blocks);
        info!(
            document = %document.source,
            strategy = strategy.as_str(),
            blocks = document.blocks.len(),
            "processing document"
        );

        let before = self.counts.clone();
        let transaction = self
            .store
            .connection()
            .unchecked_transaction()
            .context("failed to begin document transaction")?;

        for block in &document.blocks {
            self.process_block(reader, strategy, block).with_context(|| {
                format!(
                    "{}: failed at page block {} (page {})",
                    document.source,
                    block.index,
                    block
                        .page_number
                        .map(|page| page.to_string())
                        .unwrap_or_else(|| "unknown".to_string())
                )
            })?;
        }

        transaction
            .commit()
            .with_context(|| format!("failed to commit {}", document.source))?;
        self.counts.documents += 1;

        let outcome = DocumentOutcome {
            strategy,
            pages: self.counts.pages - before.pages,
            entries: self.counts.entries - before.entries,
            entries_without_section: self.counts.entries_without_section
                - before.entries_without_section,
            errors: self.counts.errors - before.errors,
        };
        info!(
            document = %document.source,
            pages = outcome.pages,
            entries = outcome.entries,
            errors = outcome.errors,
            "document committed"
        );
        Ok(outcome)
    }

    pub(crate) fn process_block(
        &mut self,
        reader: &BlockReader,
        strategy: SegmentationStrategy,
        block: &PageBlock,
    ) -> Result<()> {
        self.counts.pages += 1;

        for chapter_name in &block.chapter_markers {
            self.open_chapter(chapter_name)?;
        }
        for section_name in &block.section_markers {
            self.open_section(section_name)?;
        }

        let spans = reader.split_entries(strategy, block);
        let Some(section_id) = self.context.current_section() else {
            if !spans.is_empty() {
                warn!(
                    page = ?block.page_number,
                    spans = spans.len(),
                    "entries found before any section; not stored"
                );
                self.counts.entries_without_section += spans.len();
            }
            return Ok(());
        };

        for (index, span) in spans.iter().enumerate() {
            let entry_order = index as u32 + 1;
            self.process_entry(section_id, block.page_number, entry_order, span);
        }

        Ok(())
    }

    /// Never fails: a broken entry is rolled back, logged and counted.
    fn process_entry(
        &mut self,
        section_id: i64,
        page_number: Option<u32>,
        entry_order: u32,
        span: &str,
    ) {
        let parser = &self.parser;
        let written = self.store.in_savepoint(ENTRY_SAVEPOINT, |store| {
            write_entry(store, parser, section_id, page_number, entry_order, span)
        });

        match written {
            Ok(written) => {
                self.counts.entries += 1;
                self.counts.definitions += written.definitions;
                self.counts.plurals += written.plurals;
                self.counts.markers += written.markers;
            }
            Err(err) => {
                self.counts.errors += 1;
                warn!(
                    page = ?page_number,
                    entry_order,
                    text = %text_preview(span, LOG_PREVIEW_CHARS),
                    error = %err,
                    "failed to process entry"
                );
            }
        }
    }

    fn open_chapter(&mut self, name: &str) -> Result<()> {
        self.chapter_counter += 1;
        let chapter_id = self.store.insert_chapter(name, self.chapter_counter)?;
        self.counts.chapters += 1;
        self.context.chapter = Some(OpenChapter {
            chapter_id,
            section_counter: 0,
            section_id: None,
        });
        info!(order = self.chapter_counter, chapter = %name, "chapter opened");

        // Documents without explicit section markers still need an owner for entries.
        self.add_section(DEFAULT_SECTION_NAME)
    }

    fn open_section(&mut self, name: &str) -> Result<()> {
        if self.context.chapter.is_none() {
            warn!(section = %name, "section marker before any chapter; creating default chapter");
            self.open_chapter(DEFAULT_CHAPTER_NAME)?;
        }
        self.add_section(name)
    }

    fn add_section(&mut self, name: &str) -> Result<()> {
        let Some(chapter) = self.context.chapter.as_mut() else {
            bail!("cannot add section '{name}' without an open chapter");
        };

        let section_order = chapter.section_counter + 1;
        let section_id = self
            .store
            .insert_section(chapter.chapter_id, name, section_order)?;
        chapter.section_counter = section_order;
        chapter.section_id = Some(section_id);
        self.counts.sections += 1;
        debug!(order = section_order, section = %name, "section opened");
        Ok(())
    }

    /// Writes the run provenance for this dictionary, replacing any earlier run's.
    pub(crate) fn finish(self, documents: &[DocumentSummary]) -> Result<ExtractCounts> {
        let transaction = self
            .store
            .connection()
            .unchecked_transaction()
            .context("failed to begin metadata transaction")?;

        let source_files = documents
            .iter()
            .map(|document| document.path.as_str())
            .collect::<Vec<&str>>();
        let source_hashes = documents
            .iter()
            .map(|document| document.sha256.as_str())
            .collect::<Vec<&str>>();
        let strategies = documents
            .iter()
            .map(|document| document.segmentation_strategy.as_str())
            .collect::<Vec<&str>>();

        let counts = &self.counts;
        let entries = [
            ("extraction_date", now_utc_string()),
            ("source_files", serde_json::to_string(&source_files)?),
            ("source_sha256", serde_json::to_string(&source_hashes)?),
            ("segmentation_strategies", serde_json::to_string(&strategies)?),
            ("total_pages", counts.pages.to_string()),
            ("total_chapters", counts.chapters.to_string()),
            ("total_sections", counts.sections.to_string()),
            ("total_entries", counts.entries.to_string()),
            ("total_definitions", counts.definitions.to_string()),
            ("total_plurals", counts.plurals.to_string()),
            ("total_markers", counts.markers.to_string()),
            ("errors", counts.errors.to_string()),
        ];
        for (key, value) in &entries {
            self.store.upsert_metadata(key, value)?;
        }

        transaction
            .commit()
            .context("failed to commit extraction metadata")?;
        info!(
            dictionary_id = self.store.dictionary_id(),
            keys = entries.len(),
            "saved extraction metadata"
        );

        Ok(self.counts)
    }
}

fn write_entry(
    store: &StoreWriter<'_>,
    parser: &EntryFieldParser,
    section_id: i64,
    page_number: Option<u32>,
    entry_order: u32,
    span: &str,
) -> Result<EntryWriteCounts> {
    let parsed = parser.parse(span);
    let record = EntryRecord::from_parsed(&parsed, page_number, entry_order, span);
    let entry_id = store
        .insert_entry(section_id, &record)
        .with_context(|| format!("failed to insert entry '{}'", record.headword))?;

    let mut written = EntryWriteCounts::default();
    for (index, definition) in parsed.definitions.iter().enumerate() {
        store.insert_definition(entry_id, definition, index as u32 + 1)?;
        written.definitions += 1;
    }
    for (index, plural) in parsed.plurals.iter().enumerate() {
        store.insert_plural(entry_id, plural, index as u32 + 1)?;
        written.plurals += 1;
    }
    for (kind, snippets) in &parsed.markers {
        for snippet in snippets {
            store.insert_marker(entry_id, *kind, snippet)?;
            written.markers += 1;
        }
    }

    Ok(written)
}
