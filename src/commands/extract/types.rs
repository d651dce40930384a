use super::*;

#[derive(Debug, Clone, Default)]
pub(crate) struct PageBlock {
    pub(crate) index: usize,
    pub(crate) page_number: Option<u32>,
    pub(crate) chapter_markers: Vec<String>,
    pub(crate) section_markers: Vec<String>,
    pub(crate) text: String,
    pub(crate) body: String,
    pub(crate) raw_html: String,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct DictionaryDocument {
    pub(crate) source: String,
    pub(crate) blocks: Vec<PageBlock>,
    pub(crate) warnings: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SegmentationStrategy {
    /// Entries separated by a bullet in the rendered text.
    Delimiter,
    /// Entries start right after a `</p>(` boundary in the raw markup.
    ParenBoundary,
}

impl SegmentationStrategy {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            SegmentationStrategy::Delimiter => "delimiter",
            SegmentationStrategy::ParenBoundary => "paren_boundary",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum MarkerKind {
    Place,
    Country,
    Village,
    NotablePerson,
}

impl MarkerKind {
    pub(crate) const ALL: [MarkerKind; 4] = [
        MarkerKind::Place,
        MarkerKind::Country,
        MarkerKind::Village,
        MarkerKind::NotablePerson,
    ];

    pub(crate) fn symbol(self) -> char {
        match self {
            MarkerKind::Place => 'ع',
            MarkerKind::Country => 'د',
            MarkerKind::Village => 'ة',
            MarkerKind::NotablePerson => 'م',
        }
    }

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            MarkerKind::Place => "place",
            MarkerKind::Country => "country",
            MarkerKind::Village => "village",
            MarkerKind::NotablePerson => "notable_person",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParsedEntry {
    pub(crate) headword: String,
    pub(crate) pattern_ref: Option<String>,
    pub(crate) definitions: Vec<String>,
    pub(crate) plurals: Vec<String>,
    pub(crate) markers: BTreeMap<MarkerKind, Vec<String>>,
}

#[derive(Debug, Clone)]
pub(crate) struct EntryRecord {
    pub(crate) root: String,
    pub(crate) headword: String,
    pub(crate) headword_normalized: String,
    pub(crate) pattern_ref: Option<String>,
    pub(crate) page_number: Option<u32>,
    pub(crate) entry_order: u32,
    pub(crate) full_text: String,
}

impl EntryRecord {
    pub(crate) fn from_parsed(
        parsed: &ParsedEntry,
        page_number: Option<u32>,
        entry_order: u32,
        full_text: &str,
    ) -> Self {
        // No morphological analysis: the root is the cleaned headword.
        Self {
            root: parsed.headword.clone(),
            headword: parsed.headword.clone(),
            headword_normalized: normalize_arabic(&parsed.headword),
            pattern_ref: parsed.pattern_ref.clone(),
            page_number,
            entry_order,
            full_text: full_text.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct EntryWriteCounts {
    pub(crate) definitions: usize,
    pub(crate) plurals: usize,
    pub(crate) markers: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ContextState {
    NoChapter,
    InChapterNoSection,
    InChapterInSection,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct OpenChapter {
    pub(crate) chapter_id: i64,
    pub(crate) section_counter: u32,
    pub(crate) section_id: Option<i64>,
}

/// Chapter/section cursor owned by one extractor.
#[derive(Debug, Clone, Default)]
pub(crate) struct ExtractionContext {
    pub(crate) chapter: Option<OpenChapter>,
}

impl ExtractionContext {
    pub(crate) fn state(&self) -> ContextState {
        match self.chapter {
            None => ContextState::NoChapter,
            Some(OpenChapter {
                section_id: None, ..
            }) => ContextState::InChapterNoSection,
            Some(OpenChapter {
                section_id: Some(_),
                ..
            }) => ContextState::InChapterInSection,
        }
    }

    pub(crate) fn current_section(&self) -> Option<i64> {
        self.chapter.and_then(|chapter| chapter.section_id)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct DocumentOutcome {
    pub(crate) strategy: SegmentationStrategy,
    pub(crate) pages: usize,
    pub(crate) entries: usize,
    pub(crate) entries_without_section: usize,
    pub(crate) errors: usize,
}

pub(crate) struct RunSummary<'a> {
    pub(crate) dictionary_id: i64,
    pub(crate) counts: &'a ExtractCounts,
    pub(crate) db_path: &'a Path,
}

impl fmt::Display for RunSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(72);
        writeln!(f, "{rule}")?;
        writeln!(f, "EXTRACTION STATISTICS - Dictionary ID: {}", self.dictionary_id)?;
        writeln!(f, "{rule}")?;
        writeln!(f, "Documents processed:        {}", self.counts.documents)?;
        writeln!(f, "Pages processed:            {}", self.counts.pages)?;
        writeln!(f, "Chapters created:           {}", self.counts.chapters)?;
        writeln!(f, "Sections created:           {}", self.counts.sections)?;
        writeln!(f, "Entries extracted:          {}", self.counts.entries)?;
        writeln!(f, "Definitions:                {}", self.counts.definitions)?;
        writeln!(f, "Plurals:                    {}", self.counts.plurals)?;
        writeln!(f, "Markers:                    {}", self.counts.markers)?;
        writeln!(
            f,
            "Entries without section:    {}",
            self.counts.entries_without_section
        )?;
        writeln!(f, "Errors encountered:         {}", self.counts.errors)?;
        writeln!(f, "{rule}")?;
        writeln!(f, "Database: {}", self.db_path.display())?;
        write!(f, "{rule}")
    }
}
