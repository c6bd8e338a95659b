use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::domain::{ExtractedDocument, ImageRef, Table, TextSegment};

static PARAGRAPH: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p").unwrap());
static IMAGE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("img[src]").unwrap());
static ANCHOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").unwrap());
static TABLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("table").unwrap());
static ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").unwrap());
static CELL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td, th").unwrap());

/// Pulls paragraphs, images, links and tables out of an HTML page. Relative
/// URLs are resolved against `base`.
pub fn extract_page(html: &str, base: &Url) -> ExtractedDocument {
    let document = Html::parse_document(html);
    let mut extracted = ExtractedDocument::new(base.as_str());

    extracted.text = document
        .select(&PARAGRAPH)
        .map(element_text)
        .filter(|t| !t.is_empty())
        .map(TextSegment::new)
        .collect();

    extracted.images = document
        .select(&IMAGE)
        .filter_map(|img| img.value().attr("src"))
        .filter_map(|src| resolve_url(base, src))
        .enumerate()
        .map(|(i, url)| ImageRef::new(url, i + 1))
        .collect();

    extracted.links = document
        .select(&ANCHOR)
        .filter_map(|a| a.value().attr("href"))
        .filter_map(|href| resolve_url(base, href))
        .collect();

    extracted.tables = document.select(&TABLE).filter_map(parse_table).collect();

    extracted
}

/// Resolves an attribute value to an absolute URL.
///
/// `//host/x` always becomes `https://host/x`; `http:`/`https:` values are
/// kept as-is; anything else is joined onto `base`.
pub fn resolve_url(base: &Url, raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if raw.starts_with("//") {
        return Some(format!("https:{}", raw));
    }
    if raw.starts_with("http:") || raw.starts_with("https:") {
        return Some(raw.to_string());
    }
    base.join(raw).ok().map(|u| u.to_string())
}

/// Rows of `td`/`th` cells; the first row becomes the header when there is
/// more than one. Tables without any cells are skipped.
fn parse_table(table: ElementRef<'_>) -> Option<Table> {
    let rows: Vec<Vec<String>> = table
        .select(&ROW)
        .map(|row| row.select(&CELL).map(element_text).collect::<Vec<_>>())
        .filter(|cells| !cells.is_empty())
        .collect();

    if rows.is_empty() {
        return None;
    }

    Some(Table::from_rows(rows).with_promoted_header())
}

fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
