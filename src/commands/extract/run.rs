use super::*;

pub fn run(args: ExtractArgs) -> Result<()> {
    let started_ts = Utc::now();
    let started_at = now_utc_string();
    let run_id = format!("extract-{}", run_stamp(started_ts));

    let cache_root = args.store.cache_root.clone();
    let db_path = args.store.resolved_db_path();
    let manifest_path = args.manifest_path.clone().unwrap_or_else(|| {
        cache_root.join("manifests").join(format!(
            "extract_run_{}.json",
            run_stamp(started_ts)
        ))
    });

    info!(
        dictionary_id = args.dictionary_id,
        documents = args.inputs.len(),
        run_id = %run_id,
        "starting extraction"
    );

    for input in &args.inputs {
        if !input.is_file() {
            bail!("input document not found: {}", input.display());
        }
    }

    let connection = open_store(&db_path)?;
    let store = StoreWriter::new(&connection, args.dictionary_id);
    let Some(dictionary_name) = store.dictionary_name()? else {
        bail!(
            "dictionary {} is not registered in {}; run `qamoos register` first",
            args.dictionary_id,
            db_path.display()
        );
    };
    let existing_entries = store.existing_entry_count()?;
    if existing_entries > 0 {
        warn!(
            dictionary = %dictionary_name,
            existing_entries,
            "dictionary already holds entries; new rows will be appended"
        );
    }

    let reader = BlockReader::new(args.page_headers.clone())?;
    let parser = EntryFieldParser::new()?;
    let mut extractor = Extractor::new(&connection, args.dictionary_id, parser);

    let mut documents = Vec::with_capacity(args.inputs.len());
    let mut warnings = Vec::new();
    for input in &args.inputs {
        let sha256 = sha256_document(input)?;
        let document = reader.load(input)?;
        warnings.extend(document.warnings.iter().cloned());

        let outcome = extractor
            .process_document(&reader, &document)
            .with_context(|| format!("extraction aborted in {}", input.display()))?;
        debug!(
            state = ?extractor.state(),
            total_entries = extractor.counts().entries,
            "context after document"
        );

        documents.push(DocumentSummary {
            path: input.display().to_string(),
            sha256,
            segmentation_strategy: outcome.strategy.as_str().to_string(),
            pages: outcome.pages,
            entries: outcome.entries,
            entries_without_section: outcome.entries_without_section,
            errors: outcome.errors,
        });
    }

    let counts = extractor.finish(&documents)?;

    println!(
        "{}",
        RunSummary {
            dictionary_id: args.dictionary_id,
            counts: &counts,
            db_path: &db_path,
        }
    );

    let manifest = ExtractRunManifest {
        manifest_version: 1,
        run_id,
        db_schema_version: DB_SCHEMA_VERSION,
        dictionary_id: args.dictionary_id,
        status: "completed".to_string(),
        started_at,
        updated_at: now_utc_string(),
        command: render_extract_command(&args),
        paths: ExtractPaths {
            cache_root: cache_root.display().to_string(),
            db_path: db_path.display().to_string(),
            manifest_path: manifest_path.display().to_string(),
        },
        counts: counts.clone(),
        documents,
        warnings,
    };
    write_json_pretty(&manifest_path, &manifest)?;

    info!(path = %manifest_path.display(), "wrote extraction run manifest");
    info!(
        pages = counts.pages,
        chapters = counts.chapters,
        sections = counts.sections,
        entries = counts.entries,
        definitions = counts.definitions,
        plurals = counts.plurals,
        errors = counts.errors,
        "extraction completed"
    );

    Ok(())
}

fn render_extract_command(args: &ExtractArgs) -> String {
    let mut parts = vec![
        "qamoos extract".to_string(),
        format!("--dictionary-id {}", args.dictionary_id),
        format!("--db-path {}", args.store.resolved_db_path().display()),
    ];
    for input in &args.inputs {
        parts.push(format!("--input {}", input.display()));
    }
    for header in &args.page_headers {
        parts.push(format!("--page-header '{header}'"));
    }
    parts.join(" ")
}
