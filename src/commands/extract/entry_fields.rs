use super::*;

const FALLBACK_HEADWORD_CHARS: usize = 20;
const HEADWORD_PUNCTUATION: [char; 3] = [':', '،', ','];

/// Heuristic field recovery for one raw entry span. Every method returns a
/// best-effort value for any input; nothing here can fail.
#[derive(Debug)]
pub(crate) struct EntryFieldParser {
    headword_group: Regex,
    pattern_reference: Regex,
    plural: Regex,
    plural_conjunction: Regex,
    clause_boundary: Regex,
}

impl EntryFieldParser {
    pub(crate) fn new() -> Result<Self> {
        Ok(Self {
            headword_group: Regex::new(r"\(([^)]+)\)")
                .context("failed to compile headword group regex")?,
            // kaf, optional fatha, then the exemplar word
            pattern_reference: Regex::new(r"ك\x{064E}?([^،,\s]+)")
                .context("failed to compile pattern reference regex")?,
            plural: Regex::new(r"ج:\s*([^،,.;()]+)").context("failed to compile plural regex")?,
            plural_conjunction: Regex::new(r"\s+و")
                .context("failed to compile plural conjunction regex")?,
            clause_boundary: Regex::new(r"،\s*و")
                .context("failed to compile clause boundary regex")?,
        })
    }

    pub(crate) fn parse(&self, text: &str) -> ParsedEntry {
        let (headword, pattern_ref) = self.parse_headword(text);
        ParsedEntry {
            headword,
            pattern_ref,
            definitions: self.extract_definitions(text),
            plurals: self.extract_plurals(text),
            markers: self.extract_markers(text),
        }
    }

    pub(crate) fn parse_headword(&self, text: &str) -> (String, Option<String>) {
        let Some(group) = self
            .headword_group
            .captures(text)
            .and_then(|captures| captures.get(1))
        else {
            return (fallback_headword(text), None);
        };

        let zone = match group.as_str().split_once(':') {
            Some((head, _)) => head,
            None => group.as_str(),
        };

        let pattern_ref = self
            .pattern_reference
            .captures(zone)
            .and_then(|captures| captures.get(1))
            .map(|value| strip_headword_punctuation(value.as_str()))
            .filter(|value| !value.is_empty());
        let headword = strip_headword_punctuation(&self.pattern_reference.replace_all(zone, ""));

        if !headword.is_empty() {
            return (headword, pattern_ref);
        }

        // The "pattern" swallowed the whole word (a headword starting with kaf).
        let unstripped = strip_headword_punctuation(zone);
        if !unstripped.is_empty() {
            return (unstripped, None);
        }

        (fallback_headword(text), None)
    }

    pub(crate) fn extract_plurals(&self, text: &str) -> Vec<String> {
        self.plural
            .captures_iter(text)
            .filter_map(|captures| captures.get(1))
            .flat_map(|run| {
                self.plural_conjunction
                    .split(run.as_str())
                    .map(str::trim)
                    .filter(|plural| !plural.is_empty())
                    .map(ToOwned::to_owned)
                    .collect::<Vec<String>>()
            })
            .collect()
    }

    pub(crate) fn extract_definitions(&self, text: &str) -> Vec<String> {
        let Some((_, definition_zone)) = text.split_once(':') else {
            return vec![text.to_string()];
        };

        let without_plurals = self.plural.replace_all(definition_zone, "");
        let definitions = self
            .clause_boundary
            .split(&without_plurals)
            .map(clean_clause)
            .filter(|clause| !clause.is_empty())
            .collect::<Vec<String>>();

        if definitions.is_empty() {
            return vec![text.to_string()];
        }
        definitions
    }

    /// Presence-only: a marker letter anywhere in the text counts.
    pub(crate) fn extract_markers(&self, text: &str) -> BTreeMap<MarkerKind, Vec<String>> {
        MarkerKind::ALL
            .into_iter()
            .filter(|kind| text.contains(kind.symbol()))
            .map(|kind| (kind, vec![format!("Contains {} marker", kind.symbol())]))
            .collect()
    }
}

fn fallback_headword(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.chars().any(char::is_whitespace) {
        if let Some(first) = trimmed.split_whitespace().next() {
            return first.to_string();
        }
    }

    trimmed.chars().take(FALLBACK_HEADWORD_CHARS).collect()
}

fn strip_headword_punctuation(raw: &str) -> String {
    raw.replace(HEADWORD_PUNCTUATION, "")
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
}

fn is_clause_padding(character: char) -> bool {
    character.is_whitespace() || matches!(character, '،' | ',' | ';' | '.')
}

fn clean_clause(clause: &str) -> String {
    let mut current = clause.trim_matches(is_clause_padding);
    // Drop the closing paren of the enclosing entry group, keep balanced ones.
    while current.ends_with(')') && current.matches('(').count() < current.matches(')').count() {
        current = current[..current.len() - 1].trim_end_matches(is_clause_padding);
    }
    current.to_string()
}
