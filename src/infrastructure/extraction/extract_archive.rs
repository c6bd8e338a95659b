//! Reading the result archive of a managed PDF extraction.
//!
//! The archive holds `structuredData.json` (content elements), `figures/`
//! (image renditions) and `tables/` (one spreadsheet per detected table).

use std::fs::File;
use std::path::{Path, PathBuf};

use calamine::{Data, Reader, Xlsx, open_workbook};
use serde::Deserialize;

use crate::application::ports::ConversionError;
use crate::domain::{Table, TextSegment};

pub const STRUCTURED_DATA_FILE: &str = "structuredData.json";
pub const FIGURES_DIR: &str = "figures";
pub const TABLES_DIR: &str = "tables";

const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

#[derive(Debug, Deserialize)]
pub struct StructuredData {
    #[serde(default)]
    pub elements: Vec<StructuredElement>,
}

#[derive(Debug, Deserialize)]
pub struct StructuredElement {
    #[serde(rename = "Text")]
    pub text: Option<String>,
    #[serde(rename = "Path")]
    pub path: Option<String>,
}

#[derive(Debug, Default)]
pub struct ArchiveContents {
    pub text: Vec<TextSegment>,
    pub figures: Vec<PathBuf>,
    pub tables: Vec<Table>,
}

/// Unpacks `zip_path` into `dest` and reads everything the Markdown needs.
pub fn read_archive(zip_path: &Path, dest: &Path) -> Result<ArchiveContents, ConversionError> {
    unpack(zip_path, dest)?;

    Ok(ArchiveContents {
        text: read_structured_text(dest)?,
        figures: list_figures(dest)?,
        tables: read_tables(dest)?,
    })
}

pub fn unpack(zip_path: &Path, dest: &Path) -> Result<(), ConversionError> {
    let file = File::open(zip_path)?;
    let mut archive = zip::ZipArchive::new(file)
        .map_err(|e| ConversionError::parse(format!("result is not a valid archive: {e}")))?;
    archive
        .extract(dest)
        .map_err(|e| ConversionError::parse(format!("failed to unpack result archive: {e}")))
}

/// Text payload of every element that carries one, in document order.
pub fn read_structured_text(dir: &Path) -> Result<Vec<TextSegment>, ConversionError> {
    let path = dir.join(STRUCTURED_DATA_FILE);
    if !path.exists() {
        return Err(ConversionError::parse(format!(
            "{STRUCTURED_DATA_FILE} not found in result archive"
        )));
    }

    let raw = std::fs::read_to_string(&path)?;
    let data: StructuredData = serde_json::from_str(&raw)
        .map_err(|e| ConversionError::parse(format!("invalid {STRUCTURED_DATA_FILE}: {e}")))?;

    Ok(data
        .elements
        .into_iter()
        .filter_map(|element| element.text)
        .map(TextSegment::new)
        .collect())
}

/// Image renditions under `figures/`, sorted by file name. A missing folder
/// means the document had no figures.
pub fn list_figures(dir: &Path) -> Result<Vec<PathBuf>, ConversionError> {
    let figures = list_files(&dir.join(FIGURES_DIR), |ext| {
        IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str())
    })?;
    tracing::info!(count = figures.len(), "Figures found in result archive");
    Ok(figures)
}

/// Rows of the first worksheet of every spreadsheet under `tables/`.
pub fn read_tables(dir: &Path) -> Result<Vec<Table>, ConversionError> {
    let files = list_files(&dir.join(TABLES_DIR), |ext| ext.eq_ignore_ascii_case("xlsx"))?;
    tracing::info!(count = files.len(), "Table files found in result archive");

    let mut tables = Vec::with_capacity(files.len());
    for path in files {
        let rows = read_first_sheet(&path)?;
        let caption = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        tables.push(Table::from_rows(rows).with_caption(caption));
    }
    Ok(tables)
}

pub fn read_first_sheet(path: &Path) -> Result<Vec<Vec<String>>, ConversionError> {
    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|e: calamine::XlsxError| {
        ConversionError::parse(format!("failed to open {}: {e}", path.display()))
    })?;

    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range.map_err(|e| {
            ConversionError::parse(format!("failed to read {}: {e}", path.display()))
        })?,
        None => return Ok(Vec::new()),
    };

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect())
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

fn list_files(dir: &Path, keep: impl Fn(&str) -> bool) -> Result<Vec<PathBuf>, ConversionError> {
    if !dir.is_dir() {
        tracing::warn!(dir = %dir.display(), "Folder missing from result archive");
        return Ok(Vec::new());
    }

    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .filter(|path| {
            path.extension()
                .and_then(|e| e.to_str())
                .map(&keep)
                .unwrap_or(false)
        })
        .collect();
    files.sort();
    Ok(files)
}
