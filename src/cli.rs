use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "qamoos",
    version,
    about = "Arabic dictionary extraction into a relational lookup store"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Register(RegisterArgs),
    Extract(ExtractArgs),
    Status(StatusArgs),
    Lookup(LookupArgs),
}

#[derive(Args, Debug, Clone)]
pub struct StoreArgs {
    #[arg(long, default_value = ".cache/qamoos")]
    pub cache_root: PathBuf,

    #[arg(long)]
    pub db_path: Option<PathBuf>,
}

impl StoreArgs {
    pub fn resolved_db_path(&self) -> PathBuf {
        self.db_path
            .clone()
            .unwrap_or_else(|| default_db_path(&self.cache_root))
    }
}

pub fn default_db_path(cache_root: &Path) -> PathBuf {
    cache_root.join("qamoos.sqlite")
}

#[derive(Args, Debug, Clone)]
pub struct RegisterArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    #[arg(long)]
    pub dictionary_id: Option<i64>,

    #[arg(long)]
    pub name_arabic: String,

    #[arg(long)]
    pub name_english: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub author: Option<String>,

    #[arg(long)]
    pub year: Option<i64>,
}

#[derive(Args, Debug, Clone)]
pub struct ExtractArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    #[arg(long)]
    pub dictionary_id: i64,

    #[arg(long = "input", required = true)]
    pub inputs: Vec<PathBuf>,

    #[arg(long = "page-header", default_values_t = default_page_headers())]
    pub page_headers: Vec<String>,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,
}

pub fn default_page_headers() -> Vec<String> {
    vec!["القاموس المحيط".to_string(), "المعجم الوسيط".to_string()]
}

#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    #[command(flatten)]
    pub store: StoreArgs,
}

#[derive(Args, Debug, Clone)]
pub struct LookupArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    #[arg(long)]
    pub query: String,

    #[arg(long)]
    pub dictionary_id: Option<i64>,

    #[arg(long, default_value_t = 20)]
    pub limit: usize,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}
