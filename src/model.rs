use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct DocumentSummary {
    pub path: String,
    pub sha256: String,
    pub segmentation_strategy: String,
    pub pages: usize,
    pub entries: usize,
    pub entries_without_section: usize,
    pub errors: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ExtractCounts {
    pub documents: usize,
    pub pages: usize,
    pub chapters: usize,
    pub sections: usize,
    pub entries: usize,
    pub definitions: usize,
    pub plurals: usize,
    pub markers: usize,
    pub entries_without_section: usize,
    pub errors: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtractPaths {
    pub cache_root: String,
    pub db_path: String,
    pub manifest_path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtractRunManifest {
    pub manifest_version: u32,
    pub run_id: String,
    pub db_schema_version: i64,
    pub dictionary_id: i64,
    pub status: String,
    pub started_at: String,
    pub updated_at: String,
    pub command: String,
    pub paths: ExtractPaths,
    pub counts: ExtractCounts,
    pub documents: Vec<DocumentSummary>,
    pub warnings: Vec<String>,
}
