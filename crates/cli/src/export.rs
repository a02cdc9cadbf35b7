//! `railmatch export` - write a table view as CSV.
//!
//! Headers are the column titles; rows are the filtered, sorted cell
//! texts in view order. Local pagination does not apply to exports.

use std::io::Write;
use std::path::PathBuf;

use crate::view::{self, SelectArgs, SourceArgs};
use crate::CliError;

pub fn cmd_export(
    table: &str,
    source: &SourceArgs,
    select: &SelectArgs,
    out: Option<PathBuf>,
    quiet: bool,
) -> Result<(), CliError> {
    let mut view = view::load_view(table, source)?;
    view::apply_select(&mut view, select)?;

    let writer: Box<dyn Write> = match &out {
        Some(path) => Box::new(std::fs::File::create(path).map_err(|e| {
            CliError::io(format!("cannot create {}: {}", path.display(), e))
        })?),
        None => Box::new(std::io::stdout()),
    };
    let mut w = csv::Writer::from_writer(writer);

    let titles: Vec<&str> = view.grid().columns.iter().map(|c| c.title).collect();
    w.write_record(&titles)
        .map_err(|e| CliError::io(format!("write error: {}", e)))?;

    let rows = view.visible_rows();
    for row in &rows {
        w.write_record(row.cells.iter().map(|c| c.text.as_str()))
            .map_err(|e| CliError::io(format!("write error: {}", e)))?;
    }
    w.flush()
        .map_err(|e| CliError::io(format!("write error: {}", e)))?;

    if !quiet {
        match &out {
            Some(path) => eprintln!("export: wrote {} rows to {}", rows.len(), path.display()),
            None => eprintln!("export: wrote {} rows", rows.len()),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_path() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/results.json")
    }

    fn file_source() -> SourceArgs {
        SourceArgs {
            url: None,
            file: Some(fixture_path()),
            base_url: None,
        }
    }

    fn no_select() -> SelectArgs {
        SelectArgs {
            filter: Vec::new(),
            kind: None,
            suspicious: false,
            sort: None,
            desc: false,
        }
    }

    #[test]
    fn test_export_writes_titles_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("routes.csv");
        cmd_export("routes", &file_source(), &no_select(), Some(out.clone()), true).unwrap();

        let text = std::fs::read_to_string(&out).unwrap();
        let mut lines = text.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("Route,Title,From,To,Km,Km,ResultKind"));
        assert_eq!(lines.count(), 3);
        assert!(text.contains("Berlin-Stettiner Eisenbahn"));
    }

    #[test]
    fn test_export_applies_filters() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("shutdown.csv");
        let select = SelectArgs {
            kind: Some("RouteIsShutdown".into()),
            ..no_select()
        };
        cmd_export("routes", &file_source(), &select, Some(out.clone()), true).unwrap();

        let text = std::fs::read_to_string(&out).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains("Bahnstrecke Beeskow–Grunow"));
    }

    #[test]
    fn test_export_missing_file_is_file_error() {
        let source = SourceArgs {
            url: None,
            file: Some(PathBuf::from("/no/such/payload.json")),
            base_url: None,
        };
        let err = cmd_export("routes", &source, &no_select(), None, true).unwrap_err();
        assert_eq!(err.code, crate::exit_codes::EXIT_VIEW_FILE);
    }
}
