//! Dataset serialization to CSV and aligned text tables.

use crate::config::OutputFormat;
use crate::error::{Result, ResultExt};
use crate::utils::cell_text;
use polars::prelude::*;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Write `df` to `path` in the given format. No row-index column is written.
pub fn write_dataset(df: &DataFrame, path: impl AsRef<Path>, format: OutputFormat) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let written = match format {
        OutputFormat::Csv => write_csv(df, path),
        OutputFormat::Txt => write_text_table(df, path),
    };
    written.context(format!("Failed to write {}", path.display()))?;

    info!(
        "Saved {} rows x {} columns to {} ({})",
        df.height(),
        df.width(),
        path.display(),
        format
    );
    Ok(())
}

fn write_csv(df: &DataFrame, path: &Path) -> Result<()> {
    let mut file = File::create(path)?;
    let mut df = df.clone();

    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(b',')
        .with_quote_char(b'"')
        .finish(&mut df)?;

    Ok(())
}

fn write_text_table(df: &DataFrame, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);
    out.write_all(render_text_table(df)?.as_bytes())?;
    out.flush()?;
    Ok(())
}

/// Render `df` as a whitespace-aligned table: a header line followed by one
/// line per row, every column right-aligned to its widest cell.
pub fn render_text_table(df: &DataFrame) -> Result<String> {
    let mut cells: Vec<Vec<String>> = Vec::with_capacity(df.width());
    for column in df.get_columns() {
        let series = column.as_materialized_series();
        let mut column_cells = Vec::with_capacity(df.height() + 1);
        column_cells.push(series.name().to_string());
        for idx in 0..series.len() {
            column_cells.push(cell_text(&series.get(idx)?));
        }
        cells.push(column_cells);
    }

    let widths: Vec<usize> = cells
        .iter()
        .map(|column| column.iter().map(|c| c.chars().count()).max().unwrap_or(0))
        .collect();

    let mut rendered = String::new();
    for line in 0..=df.height() {
        let row: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(column, width)| format!("{:>width$}", column[line], width = *width))
            .collect();
        rendered.push_str(&row.join(" "));
        rendered.push('\n');
    }

    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_text_table_right_aligns() {
        let df = df![
            "Director" => ["A", "Nolan"],
            "Runtime" => [Some(220), None],
            "Certificate_PG" => [true, false],
        ]
        .unwrap();

        let rendered = render_text_table(&df).unwrap();
        let expected = "\
Director Runtime Certificate_PG
       A     220           True
   Nolan     NaN          False
";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_render_empty_frame_has_header_only() {
        let df = df!["Genre" => Vec::<&str>::new()].unwrap();
        assert_eq!(render_text_table(&df).unwrap(), "Genre\n");
    }

    #[test]
    fn test_write_dataset_creates_parent_dirs() {
        let dir = std::env::temp_dir().join(format!("movie_writer_{}", std::process::id()));
        let path = dir.join("nested").join("out.csv");
        let df = df!["Genre" => ["Drama"], "Runtime" => [120]].unwrap();

        write_dataset(&df, &path, OutputFormat::Csv).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "Genre,Runtime\nDrama,120\n");
        std::fs::remove_dir_all(&dir).ok();
    }
}
