use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use chrono::Utc;
use regex::Regex;
use rusqlite::{Connection, OpenFlags, OptionalExtension, params};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, warn};

use crate::cli::ExtractArgs;
use crate::model::{DocumentSummary, ExtractCounts, ExtractPaths, ExtractRunManifest};
use crate::normalize::normalize_arabic;
use crate::util::{
    ensure_directory, now_utc_string, run_stamp, sha256_document, text_preview, write_json_pretty,
};

const DB_SCHEMA_VERSION: i64 = 1;

mod blocks;
mod db_setup;
mod entry_fields;
mod extractor;
mod run;
mod store;
#[cfg(test)]
mod tests;
mod types;

pub use run::run;
pub(crate) use db_setup::{count_rows, open_store, open_store_read_only};
#[cfg(test)]
pub(crate) use db_setup::prepare_store;

use blocks::*;
use entry_fields::*;
use extractor::*;
use store::*;
use types::*;
