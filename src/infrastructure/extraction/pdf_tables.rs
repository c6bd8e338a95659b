use std::sync::LazyLock;

use regex::Regex;

static COLUMN_GAP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\t+| {2,}").unwrap());

/// Finds tabular blocks in page text: runs of at least two consecutive lines
/// that split into the same number (two or more) of columns on tabs or wide
/// gaps.
pub fn detect_tables(page_text: &str) -> Vec<Vec<Vec<String>>> {
    let mut tables = Vec::new();
    let mut current: Vec<Vec<String>> = Vec::new();

    for line in page_text.lines() {
        let cells = split_columns(line);
        let continues = cells.len() >= 2
            && current
                .first()
                .map(|first| first.len() == cells.len())
                .unwrap_or(true);

        if continues {
            current.push(cells);
            continue;
        }

        flush(&mut current, &mut tables);
        if cells.len() >= 2 {
            current.push(cells);
        }
    }
    flush(&mut current, &mut tables);

    tables
}

fn split_columns(line: &str) -> Vec<String> {
    COLUMN_GAP
        .split(line.trim())
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}

fn flush(current: &mut Vec<Vec<String>>, tables: &mut Vec<Vec<Vec<String>>>) {
    if current.len() >= 2 {
        tables.push(std::mem::take(current));
    } else {
        current.clear();
    }
}
