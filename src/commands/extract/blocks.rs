use super::*;

const CHAPTER_KEYWORD: &str = "باب";
const SECTION_KEYWORD: &str = "فصل";
const ENTRY_BULLET: char = '•';
const PAGE_NUMBER_PREFIX: &str = "(ص:";
const PARAGRAPH_PAREN_BOUNDARY: &str = "</p>(";
const PARAGRAPH_CLOSE: &str = "</p>";
const STRATEGY_SAMPLE_BLOCKS: usize = 5;
// Delimited spans must be strictly longer than this.
const MIN_DELIMITED_ENTRY_CHARS: usize = 10;
const MIN_PAREN_ENTRY_CHARS: usize = 15;
const ZERO_WIDTH_CHARS: [char; 4] = ['\u{200B}', '\u{200C}', '\u{200D}', '\u{FEFF}'];

#[derive(Debug)]
pub(crate) struct BlockReader {
    page_text: Selector,
    page_head: Selector,
    title_span: Selector,
    page_number: Regex,
    page_headers: Vec<String>,
}

impl BlockReader {
    pub(crate) fn new(page_headers: Vec<String>) -> Result<Self> {
        Ok(Self {
            page_text: css_selector("div.PageText")?,
            page_head: css_selector("div.PageHead")?,
            title_span: css_selector("span.title")?,
            page_number: Regex::new(r"\(ص:\s*(\d+)\)")
                .context("failed to compile page number regex")?,
            page_headers: page_headers
                .into_iter()
                .map(|header| header.trim().to_string())
                .filter(|header| !header.is_empty())
                .collect(),
        })
    }

    pub(crate) fn load(&self, path: &Path) -> Result<DictionaryDocument> {
        let raw_html = fs::read_to_string(path)
            .with_context(|| format!("failed to read document {}", path.display()))?;
        info!(
            document = %path.display(),
            chars = raw_html.chars().count(),
            "loaded document"
        );

        Ok(self.read_document(&path.display().to_string(), &raw_html))
    }

    pub(crate) fn read_document(&self, source: &str, raw_html: &str) -> DictionaryDocument {
        let html = Html::parse_document(raw_html);
        let mut warnings = Vec::new();

        let blocks = html
            .select(&self.page_text)
            .enumerate()
            .map(|(index, element)| {
                let text = element.text().collect::<String>();
                let (chapter_markers, section_markers) = self.structural_markers(element);
                PageBlock {
                    index,
                    page_number: self.page_number(element, &text),
                    chapter_markers,
                    section_markers,
                    body: self.body_text(element),
                    text,
                    raw_html: element.html(),
                }
            })
            .collect::<Vec<PageBlock>>();

        if blocks.is_empty() {
            let warning = format!("{source}: no page blocks found");
            warn!(warning = %warning, "empty document");
            warnings.push(warning);
        }

        info!(document = %source, blocks = blocks.len(), "found page blocks");

        DictionaryDocument {
            source: source.to_string(),
            blocks,
            warnings,
        }
    }

    /// Block text without the page head and title spans, with page labels
    /// removed. Entries are split from this.
    fn body_text(&self, block: ElementRef<'_>) -> String {
        let mut body = String::new();
        self.collect_body_text(block, &mut body);
        self.page_number.replace_all(&body, " ").into_owned()
    }

    fn collect_body_text(&self, element: ElementRef<'_>, body: &mut String) {
        for child in element.children() {
            if let Some(text) = child.value().as_text() {
                body.push_str(text);
            } else if let Some(child_element) = ElementRef::wrap(child) {
                if self.page_head.matches(&child_element) || self.title_span.matches(&child_element)
                {
                    body.push(' ');
                    continue;
                }
                self.collect_body_text(child_element, body);
            }
        }
    }

    fn page_number(&self, block: ElementRef<'_>, block_text: &str) -> Option<u32> {
        let head_text = block
            .select(&self.page_head)
            .next()
            .map(|head| head.text().collect::<String>());

        head_text
            .as_deref()
            .and_then(|text| self.parse_page_number(text))
            .or_else(|| self.parse_page_number(block_text))
    }

    fn parse_page_number(&self, text: &str) -> Option<u32> {
        self.page_number
            .captures(text)
            .and_then(|captures| captures.get(1))
            .and_then(|value| value.as_str().parse::<u32>().ok())
    }

    fn structural_markers(&self, block: ElementRef<'_>) -> (Vec<String>, Vec<String>) {
        let mut chapters = Vec::new();
        let mut sections = Vec::new();

        for span in block.select(&self.title_span) {
            let text = clean_marker_text(&span.text().collect::<String>());
            let normalized = normalize_arabic(&text);

            if normalized.contains(CHAPTER_KEYWORD) {
                debug!(chapter = %text, "found chapter marker");
                chapters.push(text);
            } else if normalized.contains(SECTION_KEYWORD) {
                debug!(section = %text, "found section marker");
                sections.push(text);
            }
        }

        (chapters, sections)
    }

    pub(crate) fn split_entries(
        &self,
        strategy: SegmentationStrategy,
        block: &PageBlock,
    ) -> Vec<String> {
        match strategy {
            SegmentationStrategy::Delimiter => self.split_delimited(&block.body),
            SegmentationStrategy::ParenBoundary => split_paren_boundary(&block.raw_html),
        }
    }

    fn split_delimited(&self, text: &str) -> Vec<String> {
        text.split(ENTRY_BULLET)
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .filter(|part| {
                !self
                    .page_headers
                    .iter()
                    .any(|header| part.contains(header.as_str()))
            })
            .filter(|part| !part.starts_with(PAGE_NUMBER_PREFIX))
            .filter(|part| part.chars().count() > MIN_DELIMITED_ENTRY_CHARS)
            .map(ToOwned::to_owned)
            .collect()
    }
}

impl SegmentationStrategy {
    /// Chooses the strategy for a whole document from its first blocks.
    pub(crate) fn detect(blocks: &[PageBlock]) -> Self {
        let has_bullets = blocks
            .iter()
            .take(STRATEGY_SAMPLE_BLOCKS)
            .any(|block| block.text.contains(ENTRY_BULLET));

        if has_bullets {
            SegmentationStrategy::Delimiter
        } else {
            SegmentationStrategy::ParenBoundary
        }
    }
}

fn split_paren_boundary(raw_html: &str) -> Vec<String> {
    // The first piece is everything before the first entry on the page.
    raw_html
        .split(PARAGRAPH_PAREN_BOUNDARY)
        .skip(1)
        .filter_map(|part| {
            let part_html = format!("({part}");
            let entry_html = match part_html.find(PARAGRAPH_CLOSE) {
                Some(end) => &part_html[..end],
                None => part_html.as_str(),
            };

            let text = strip_markup(entry_html);
            if text.chars().count() < MIN_PAREN_ENTRY_CHARS
                || text.starts_with(PAGE_NUMBER_PREFIX)
                || !text.starts_with('(')
            {
                return None;
            }
            Some(text)
        })
        .collect()
}

fn strip_markup(fragment: &str) -> String {
    Html::parse_fragment(fragment)
        .root_element()
        .text()
        .collect::<String>()
        .trim()
        .to_string()
}

fn clean_marker_text(raw: &str) -> String {
    raw.chars()
        .filter(|character| !ZERO_WIDTH_CHARS.contains(character))
        .collect::<String>()
        .trim()
        .to_string()
}

fn css_selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|err| anyhow!("invalid css selector '{css}': {err}"))
}
