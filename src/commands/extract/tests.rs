use super::*;
use crate::cli::default_page_headers;
use crate::commands::lookup::find_entries;
use crate::commands::status::collect_status;

const DICTIONARY_ID: i64 = 1;

fn store_with_dictionary() -> Connection {
    let connection = Connection::open_in_memory().expect("in-memory DB should open");
    prepare_store(&connection).expect("schema should be created");
    connection
        .execute(
            "
            INSERT INTO dictionaries(dictionary_id, name_arabic, created_at)
            VALUES(?1, 'القاموس المحيط', '2026-01-01T00:00:00Z')
            ",
            [DICTIONARY_ID],
        )
        .expect("dictionary row should insert");
    connection
}

fn reader() -> BlockReader {
    BlockReader::new(default_page_headers()).expect("reader should build")
}

fn parser() -> EntryFieldParser {
    EntryFieldParser::new().expect("parser should build")
}

fn page(page_number: u32, body: &str) -> String {
    format!(
        r#"<div class="PageText"><div class="PageHead">(ص: {page_number})</div>{body}</div>"#
    )
}

fn html_document(pages: &[String]) -> String {
    format!("<html><body>{}</body></html>", pages.concat())
}

fn extract_pages(connection: &Connection, pages: &[String]) -> (DocumentOutcome, ExtractCounts) {
    let reader = reader();
    let document = reader.read_document("test.htm", &html_document(pages));
    let mut extractor = Extractor::new(connection, DICTIONARY_ID, parser());
    let outcome = extractor
        .process_document(&reader, &document)
        .expect("document should process");
    let counts = extractor.counts().clone();
    (outcome, counts)
}

fn count(connection: &Connection, sql: &str) -> i64 {
    count_rows(connection, sql, []).expect("count query should succeed")
}

fn stored_entries(connection: &Connection) -> Vec<(Option<i64>, i64, String)> {
    let mut statement = connection
        .prepare("SELECT page_number, entry_order, headword FROM entries ORDER BY entry_id")
        .expect("entry query should prepare");
    statement
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))
        .expect("entry query should run")
        .collect::<rusqlite::Result<Vec<(Option<i64>, i64, String)>>>()
        .expect("entry rows should decode")
}

#[test]
fn parse_headword_strips_pattern_reference() {
    let (headword, pattern_ref) = parser().parse_headword("(نَصَرَ كَضَرَبَ: أعانه)");
    assert_eq!(headword, "نَصَرَ");
    assert_eq!(pattern_ref.as_deref(), Some("ضَرَبَ"));
}

#[test]
fn parse_headword_keeps_word_starting_with_kaf() {
    let (headword, pattern_ref) = parser().parse_headword("(كَتَبَ: خَطَّه)");
    assert_eq!(headword, "كَتَبَ");
    assert_eq!(pattern_ref, None);
}

#[test]
fn parse_headword_without_group_falls_back_to_leading_text() {
    let parser = parser();

    let (headword, pattern_ref) = parser.parse_headword("كلمة_طويلة_بلا_أقواس_ولا_مسافات");
    assert_eq!(headword, "كلمة_طويلة_بلا_أقواس");
    assert_eq!(headword.chars().count(), 20);
    assert_eq!(pattern_ref, None);

    let (headword, _) = parser.parse_headword("سطر بلا أقواس");
    assert_eq!(headword, "سطر");
}

#[test]
fn extract_definitions_without_colon_returns_full_text() {
    let text = "(نص بلا نقطتين رأسيتين)";
    assert_eq!(parser().extract_definitions(text), vec![text.to_string()]);
}

#[test]
fn extract_definitions_splits_clauses_and_drops_plural_run() {
    let parser = parser();

    assert_eq!(
        parser.extract_definitions("(جَمَلٌ: البعير، والحبل الغليظ)"),
        vec!["البعير".to_string(), "الحبل الغليظ".to_string()]
    );
    assert_eq!(
        parser.extract_definitions("(قَلَمٌ: معروف، ج: أقلام وقِلام)"),
        vec!["معروف".to_string()]
    );
}

#[test]
fn extract_plurals_splits_on_conjunction() {
    assert_eq!(
        parser().extract_plurals("(قَلَمٌ: معروف، ج: أقلام وقِلام)"),
        vec!["أقلام".to_string(), "قِلام".to_string()]
    );
    assert!(parser().extract_plurals("(ماءٌ: معروف)").is_empty());
}

#[test]
fn extract_markers_reports_presence_of_each_letter() {
    let markers = parser().extract_markers("(بَغْدادُ: د، بها علماء)");

    assert_eq!(markers.len(), 3);
    assert!(markers.contains_key(&MarkerKind::Place));
    assert!(markers.contains_key(&MarkerKind::Country));
    assert!(markers.contains_key(&MarkerKind::NotablePerson));
    assert!(!markers.contains_key(&MarkerKind::Village));
    assert_eq!(
        markers[&MarkerKind::Country],
        vec!["Contains د marker".to_string()]
    );
}

#[test]
fn detect_strategy_samples_leading_blocks_for_bullets() {
    let plain = PageBlock {
        text: "(نَصَرَ: أعانه)".to_string(),
        ..PageBlock::default()
    };
    let bulleted = PageBlock {
        text: "• (نَصَرَ: أعانه)".to_string(),
        ..PageBlock::default()
    };

    assert_eq!(
        SegmentationStrategy::detect(&[plain.clone(), bulleted.clone()]),
        SegmentationStrategy::Delimiter
    );
    assert_eq!(
        SegmentationStrategy::detect(&[plain.clone(), plain.clone()]),
        SegmentationStrategy::ParenBoundary
    );

    let mut late_bullet = vec![plain.clone(); 5];
    late_bullet.push(bulleted);
    assert_eq!(
        SegmentationStrategy::detect(&late_bullet),
        SegmentationStrategy::ParenBoundary
    );
    assert_eq!(
        SegmentationStrategy::detect(&[]),
        SegmentationStrategy::ParenBoundary
    );
}

#[test]
fn split_delimited_drops_headers_page_labels_and_short_spans() {
    let reader = reader();
    let html = html_document(&[page(
        3,
        "• القاموس المحيط • (ص: 3) تتمة • قصير • (سَعِدَ كَعَلِمَ: فرح وسُرَّ)",
    )]);
    let document = reader.read_document("test.htm", &html);

    let spans = reader.split_entries(SegmentationStrategy::Delimiter, &document.blocks[0]);
    assert_eq!(spans, vec!["(سَعِدَ كَعَلِمَ: فرح وسُرَّ)".to_string()]);
}

#[test]
fn split_paren_boundary_reads_raw_markup() {
    let reader = reader();
    let html = html_document(&[page(
        12,
        "<p>مقدمة الصفحة</p>(نَصَرَ كَضَرَبَ: <b>أعانه</b>)</p>(ص: 12) تتمة طويلة هنا</p>(قَصِير)</p>",
    )]);
    let document = reader.read_document("test.htm", &html);
    assert!(document.warnings.is_empty());

    let spans = reader.split_entries(SegmentationStrategy::ParenBoundary, &document.blocks[0]);
    assert_eq!(spans, vec!["(نَصَرَ كَضَرَبَ: أعانه)".to_string()]);
}

#[test]
fn read_document_finds_page_numbers_and_structural_markers() {
    let reader = reader();
    let html = html_document(&[
        page(
            7,
            "<span class=\"title\">\u{200B}بَابُ الباء\u{200C}</span><span class=\"title\">فَصْلُ الألف</span>",
        ),
        r#"<div class="PageText">(ص: 8) نص الصفحة</div>"#.to_string(),
        r#"<div class="PageText"><span class="title">القاموس المحيط</span></div>"#.to_string(),
    ]);
    let document = reader.read_document("test.htm", &html);

    assert_eq!(document.blocks.len(), 3);
    assert_eq!(document.blocks[0].page_number, Some(7));
    assert_eq!(document.blocks[0].chapter_markers, vec!["بَابُ الباء".to_string()]);
    assert_eq!(document.blocks[0].section_markers, vec!["فَصْلُ الألف".to_string()]);
    assert_eq!(document.blocks[1].page_number, Some(8));
    assert_eq!(document.blocks[2].page_number, None);
    assert!(document.blocks[2].chapter_markers.is_empty());
    assert!(document.blocks[2].section_markers.is_empty());
}

#[test]
fn extract_document_builds_chapter_section_and_entry() {
    let connection = store_with_dictionary();
    let (outcome, counts) = extract_pages(
        &connection,
        &[
            r#"<div class="PageText">(ص: 5) <span class="title">باب الهمزة</span> (أَمَلٌ كَأَجَلٍ: الرجاء، ج: آمال وأمول) • ...</div>"#
                .to_string(),
        ],
    );

    assert_eq!(outcome.strategy, SegmentationStrategy::Delimiter);
    assert_eq!(outcome.pages, 1);
    assert_eq!(outcome.entries, 1);
    assert_eq!(counts.chapters, 1);
    assert_eq!(counts.sections, 1);
    assert_eq!(counts.errors, 0);

    let (chapter, section, section_order): (String, String, i64) = connection
        .query_row(
            "
            SELECT c.name_arabic, s.name_arabic, s.section_order
            FROM sections s JOIN chapters c ON c.chapter_id = s.chapter_id
            ",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )
        .expect("section row should exist");
    assert_eq!(chapter, "باب الهمزة");
    assert_eq!(section, "القسم الأول");
    assert_eq!(section_order, 1);

    let (entry_id, headword, root, normalized, pattern_ref, page_number, is_unique): (
        i64,
        String,
        String,
        String,
        Option<String>,
        Option<i64>,
        i64,
    ) = connection
        .query_row(
            "
            SELECT entry_id, headword, root, headword_normalized, pattern_ref, page_number, is_unique
            FROM entries
            ",
            [],
            |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                    row.get(5)?,
                    row.get(6)?,
                ))
            },
        )
        .expect("entry row should exist");
    assert_eq!(headword, "أَمَلٌ");
    assert_eq!(root, headword);
    assert_eq!(normalized, "امل");
    assert_eq!(pattern_ref.as_deref(), Some("أَجَلٍ"));
    assert_eq!(page_number, Some(5));
    assert_eq!(is_unique, 0);

    let mut plural_statement = connection
        .prepare("SELECT plural_form FROM plurals WHERE entry_id = ?1 ORDER BY plural_order")
        .expect("plural query should prepare");
    let plurals = plural_statement
        .query_map([entry_id], |row| row.get::<_, String>(0))
        .expect("plural query should run")
        .collect::<rusqlite::Result<Vec<String>>>()
        .expect("plural rows should decode");
    assert_eq!(plurals, vec!["آمال".to_string(), "أمول".to_string()]);

    let definition: String = connection
        .query_row(
            "SELECT definition_text FROM definitions WHERE entry_id = ?1",
            [entry_id],
            |row| row.get(0),
        )
        .expect("definition row should exist");
    assert_eq!(definition, "الرجاء");
}

#[test]
fn page_head_and_title_stay_out_of_first_entry() {
    let reader = reader();
    let html = html_document(&[page(
        5,
        "<span class=\"title\">باب الهمزة</span> (أَمَلٌ كَأَجَلٍ: الرجاء، ج: آمال وأمول) • ...",
    )]);
    let document = reader.read_document("test.htm", &html);

    assert!(!document.blocks[0].body.contains("باب الهمزة"));
    assert!(!document.blocks[0].body.contains("(ص:"));
    let spans = reader.split_entries(SegmentationStrategy::Delimiter, &document.blocks[0]);
    assert_eq!(
        spans,
        vec!["(أَمَلٌ كَأَجَلٍ: الرجاء، ج: آمال وأمول)".to_string()]
    );
}

#[test]
fn paren_boundary_document_stores_entries_in_page_order() {
    let connection = store_with_dictionary();
    let (outcome, counts) = extract_pages(
        &connection,
        &[
            page(
                1,
                "<span class=\"title\">باب الهمزة</span><p>تمهيد</p>(أَمَلٌ كَأَجَلٍ: الرجاء، ج: آمال وأمول)</p>(أَجَلٌ: غاية الوقت المحدود)</p>",
            ),
            page(2, "<p>تتمة</p>(أَدَبٌ: الظرف وحسن التناول)</p>"),
        ],
    );

    assert_eq!(outcome.strategy, SegmentationStrategy::ParenBoundary);
    assert_eq!(outcome.pages, 2);
    assert_eq!(outcome.entries, 3);
    assert_eq!(counts.errors, 0);
    assert_eq!(
        stored_entries(&connection),
        vec![
            (Some(1), 1, "أَمَلٌ".to_string()),
            (Some(1), 2, "أَجَلٌ".to_string()),
            (Some(2), 1, "أَدَبٌ".to_string()),
        ]
    );
    assert_eq!(count(&connection, "SELECT COUNT(*) FROM plurals"), 2);
}

#[test]
fn page_blocks_keep_their_own_markup_when_attributes_vary() {
    let connection = store_with_dictionary();
    let (outcome, _) = extract_pages(
        &connection,
        &[
            r#"<div class="PageText" dir="rtl"><div class="PageHead">(ص: 1)</div><span class="title">باب الهمزة</span><p>تمهيد</p>(أَمَلٌ كَأَجَلٍ: الرجاء، ج: آمال وأمول)</p></div>"#
                .to_string(),
            page(2, "<p>تتمة</p>(بَحْرٌ: الماء الكثير الملح)</p>"),
        ],
    );

    assert_eq!(outcome.strategy, SegmentationStrategy::ParenBoundary);
    assert_eq!(
        stored_entries(&connection),
        vec![
            (Some(1), 1, "أَمَلٌ".to_string()),
            (Some(2), 1, "بَحْرٌ".to_string()),
        ]
    );
}

#[test]
fn failed_document_leaves_earlier_documents_committed() {
    let connection = store_with_dictionary();
    connection
        .execute_batch(
            "
            CREATE TRIGGER reject_chapter BEFORE INSERT ON chapters
            WHEN NEW.name_arabic = 'باب التاء'
            BEGIN
              SELECT RAISE(ABORT, 'rejected chapter');
            END;
            ",
        )
        .expect("trigger should install");

    let reader = reader();
    let first = reader.read_document(
        "first.htm",
        &html_document(&[page(
            1,
            "<span class=\"title\">باب الباء</span> • (بَحْرٌ: الماء الكثير) • (بَرٌّ: خلاف البحر)",
        )]),
    );
    let second = reader.read_document(
        "second.htm",
        &html_document(&[
            page(2, "• (بَدْرٌ: القمر ليلة تمامه)"),
            page(3, "<span class=\"title\">باب التاء</span> • (تَمْرٌ: ثمر النخل)"),
        ]),
    );

    let mut extractor = Extractor::new(&connection, DICTIONARY_ID, parser());
    extractor
        .process_document(&reader, &first)
        .expect("first document should commit");
    let err = extractor
        .process_document(&reader, &second)
        .expect_err("second document should abort");

    assert!(format!("{err:#}").contains("second.htm"));
    assert_eq!(
        stored_entries(&connection),
        vec![
            (Some(1), 1, "بَحْرٌ".to_string()),
            (Some(1), 2, "بَرٌّ".to_string()),
        ]
    );
    assert_eq!(count(&connection, "SELECT COUNT(*) FROM chapters"), 1);
    assert_eq!(count(&connection, "SELECT COUNT(*) FROM sections"), 1);
    assert_eq!(count(&connection, "SELECT COUNT(*) FROM definitions"), 2);
}

#[test]
fn section_before_chapter_creates_default_chapter() {
    let connection = store_with_dictionary();
    let (_, counts) = extract_pages(
        &connection,
        &[page(
            1,
            "<span class=\"title\">فصل الألف</span> • (نَصَرَ كَضَرَبَ: أعانه)",
        )],
    );

    assert_eq!(counts.chapters, 1);
    assert_eq!(counts.sections, 2);
    assert_eq!(counts.entries, 1);

    let chapter: String = connection
        .query_row("SELECT name_arabic FROM chapters", [], |row| row.get(0))
        .expect("chapter row should exist");
    assert_eq!(chapter, "باب افتراضي");

    let (section, section_order): (String, i64) = connection
        .query_row(
            "
            SELECT s.name_arabic, s.section_order
            FROM entries e JOIN sections s ON s.section_id = e.section_id
            ",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .expect("entry should belong to a section");
    assert_eq!(section, "فصل الألف");
    assert_eq!(section_order, 2);
}

#[test]
fn entries_before_any_section_are_not_stored() {
    let connection = store_with_dictionary();
    let reader = reader();
    let html = html_document(&[page(1, "• (نَصَرَ كَضَرَبَ: أعانه) • (سَعِدَ كَعَلِمَ: فرح)")]);
    let document = reader.read_document("test.htm", &html);

    let mut extractor = Extractor::new(&connection, DICTIONARY_ID, parser());
    let outcome = extractor
        .process_document(&reader, &document)
        .expect("document should process");

    assert_eq!(extractor.state(), ContextState::NoChapter);
    assert_eq!(outcome.entries, 0);
    assert_eq!(outcome.entries_without_section, 2);
    assert_eq!(count(&connection, "SELECT COUNT(*) FROM entries"), 0);
}

#[test]
fn entry_order_restarts_on_each_page() {
    let connection = store_with_dictionary();
    extract_pages(
        &connection,
        &[
            page(
                1,
                "<span class=\"title\">باب الباء</span> • (بَحْرٌ: الماء الكثير) • (بَرٌّ: خلاف البحر)",
            ),
            page(2, "• (بَدْرٌ: القمر ليلة تمامه)"),
        ],
    );

    let mut statement = connection
        .prepare("SELECT page_number, entry_order FROM entries ORDER BY entry_id")
        .expect("order query should prepare");
    let orders = statement
        .query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)))
        .expect("order query should run")
        .collect::<rusqlite::Result<Vec<(i64, i64)>>>()
        .expect("order rows should decode");
    assert_eq!(orders, vec![(1, 1), (1, 2), (2, 1)]);
}

#[test]
fn stored_rows_are_referentially_complete() {
    let connection = store_with_dictionary();
    extract_pages(
        &connection,
        &[
            page(
                1,
                "<span class=\"title\">باب العين</span> • (عَيْنٌ: الباصرة، وينبوع الماء، ج: أعين وعيون)",
            ),
            page(
                2,
                "<span class=\"title\">فصل الدال</span> • (دِمَشْقُ: د، قاعدة الشام)",
            ),
        ],
    );

    assert_eq!(count(&connection, "SELECT COUNT(*) FROM entries"), 2);
    assert_eq!(
        count(
            &connection,
            "
            SELECT COUNT(*) FROM entries e
            LEFT JOIN sections s ON s.section_id = e.section_id
            LEFT JOIN chapters c ON c.chapter_id = s.chapter_id
            LEFT JOIN dictionaries d ON d.dictionary_id = c.dictionary_id
            WHERE d.dictionary_id IS NULL
            ",
        ),
        0
    );
    for child in ["definitions", "plurals", "markers"] {
        let orphans = count(
            &connection,
            &format!(
                "
                SELECT COUNT(*) FROM {child} x
                LEFT JOIN entries e ON e.entry_id = x.entry_id
                WHERE e.entry_id IS NULL
                "
            ),
        );
        assert_eq!(orphans, 0, "orphaned rows in {child}");
    }
    assert_eq!(
        count(&connection, "SELECT COUNT(*) FROM markers WHERE marker_type = 'country'"),
        1
    );
}

#[test]
fn failing_entry_is_rolled_back_and_counted() {
    let connection = store_with_dictionary();
    connection
        .execute_batch(
            "
            CREATE TRIGGER reject_definition BEFORE INSERT ON definitions
            WHEN NEW.definition_text = 'انفجار'
            BEGIN
              SELECT RAISE(ABORT, 'rejected definition');
            END;
            ",
        )
        .expect("trigger should install");

    let (outcome, counts) = extract_pages(
        &connection,
        &[page(
            9,
            "<span class=\"title\">باب الراء</span> • (رَعْدٌ: صوت السحاب) • (بَرْقٌ: انفجار، ج: بروق) • (رِيحٌ: الهواء المتحرك)",
        )],
    );

    assert_eq!(outcome.errors, 1);
    assert_eq!(counts.errors, 1);
    assert_eq!(counts.entries, 2);
    assert_eq!(count(&connection, "SELECT COUNT(*) FROM entries"), 2);
    assert_eq!(
        count(&connection, "SELECT COUNT(*) FROM entries WHERE headword = 'بَرْقٌ'"),
        0
    );
    assert_eq!(count(&connection, "SELECT COUNT(*) FROM plurals"), 0);
    assert_eq!(count(&connection, "SELECT COUNT(*) FROM definitions"), 2);
}

#[test]
fn finish_overwrites_metadata_for_the_dictionary() {
    let connection = store_with_dictionary();
    let reader = reader();
    let summary = |path: &str| DocumentSummary {
        path: path.to_string(),
        sha256: "00".repeat(32),
        segmentation_strategy: "delimiter".to_string(),
        pages: 1,
        entries: 0,
        entries_without_section: 0,
        errors: 0,
    };

    let first = reader.read_document(
        "first.htm",
        &html_document(&[page(
            1,
            "<span class=\"title\">باب الباء</span> • (بَحْرٌ: الماء الكثير) • (بَرٌّ: خلاف البحر)",
        )]),
    );
    let mut extractor = Extractor::new(&connection, DICTIONARY_ID, parser());
    extractor
        .process_document(&reader, &first)
        .expect("first document should process");
    extractor
        .finish(&[summary("first.htm")])
        .expect("first metadata should save");

    let second = reader.read_document(
        "second.htm",
        &html_document(&[page(
            1,
            "<span class=\"title\">باب التاء</span> • (تَمْرٌ: ثمر النخل)",
        )]),
    );
    let mut extractor = Extractor::new(&connection, DICTIONARY_ID, parser());
    extractor
        .process_document(&reader, &second)
        .expect("second document should process");
    let counts = extractor
        .finish(&[summary("second.htm")])
        .expect("second metadata should save");
    assert_eq!(counts.entries, 1);

    assert_eq!(count(&connection, "SELECT COUNT(*) FROM metadata"), 12);
    let metadata_value = |key: &str| -> String {
        connection
            .query_row(
                "SELECT value FROM metadata WHERE dictionary_id = ?1 AND key = ?2",
                params![DICTIONARY_ID, key],
                |row| row.get(0),
            )
            .expect("metadata key should exist")
    };
    assert_eq!(metadata_value("total_entries"), "1");
    assert_eq!(metadata_value("source_files"), r#"["second.htm"]"#);
    assert_eq!(metadata_value("errors"), "0");
}

#[test]
fn lookup_matches_normalized_headword() {
    let connection = store_with_dictionary();
    extract_pages(
        &connection,
        &[page(
            5,
            "<span class=\"title\">باب الهمزة</span> • (أَمَلٌ كَأَجَلٍ: الرجاء، ج: آمال وأمول) • (أَجَلٌ: غاية الوقت)",
        )],
    );

    let results = find_entries(&connection, "أمل", None, 10).expect("lookup should succeed");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].headword, "أَمَلٌ");
    assert_eq!(results[0].chapter, "باب الهمزة");
    assert_eq!(results[0].section, "القسم الأول");
    assert_eq!(results[0].page_number, Some(5));
    assert_eq!(results[0].definitions, vec!["الرجاء".to_string()]);
    assert_eq!(results[0].plurals, vec!["آمال".to_string(), "أمول".to_string()]);

    assert!(
        find_entries(&connection, "امل", Some(DICTIONARY_ID + 1), 10)
            .expect("lookup should succeed")
            .is_empty()
    );
}

#[test]
fn status_counts_rows_per_dictionary() {
    let connection = store_with_dictionary();
    extract_pages(
        &connection,
        &[page(
            1,
            "<span class=\"title\">باب القاف</span> • (قَلَمٌ: معروف، ج: أقلام وقِلام)",
        )],
    );

    let statuses = collect_status(&connection).expect("status should collect");
    assert_eq!(statuses.len(), 1);
    assert_eq!(statuses[0].dictionary_id, DICTIONARY_ID);
    assert_eq!(statuses[0].chapters, 1);
    assert_eq!(statuses[0].sections, 1);
    assert_eq!(statuses[0].entries, 1);
    assert_eq!(statuses[0].definitions, 1);
    assert_eq!(statuses[0].plurals, 2);
    assert!(statuses[0].metadata.is_empty());
}

#[test]
fn run_summary_lists_counts() {
    let counts = ExtractCounts {
        documents: 1,
        pages: 4,
        entries: 10,
        errors: 2,
        ..ExtractCounts::default()
    };
    let rendered = RunSummary {
        dictionary_id: DICTIONARY_ID,
        counts: &counts,
        db_path: Path::new("qamoos.sqlite"),
    }
    .to_string();

    assert!(rendered.contains("Dictionary ID: 1"));
    assert!(rendered.contains("Entries extracted:          10"));
    assert!(rendered.contains("Errors encountered:         2"));
    assert!(rendered.ends_with(&"=".repeat(72)));
}
