//! Seed file reader.
//!
//! A seed file lists one CUI per line. Lines are trimmed; blank lines and
//! lines starting with `#` are skipped; repeated CUIs keep their first
//! position.

use std::collections::HashSet;
use std::fs;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use umls_types::Cui;

use crate::types::{ClosureError, ClosureResult};

/// Reads seed CUIs from a file.
///
/// # Errors
/// Returns [`ClosureError::InputNotFound`] if the file does not exist and
/// [`ClosureError::Input`] if it cannot be read.
pub fn read_seed_file<P: AsRef<Path>>(path: P) -> ClosureResult<Vec<Cui>> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ClosureError::InputNotFound {
            path: path.display().to_string(),
        });
    }

    let file = fs::File::open(path).map_err(|source| ClosureError::Input {
        path: path.display().to_string(),
        source,
    })?;

    read_seeds(file).map_err(|source| ClosureError::Input {
        path: path.display().to_string(),
        source,
    })
}

/// Reads seed CUIs from any reader.
pub fn read_seeds<R: Read>(reader: R) -> std::io::Result<Vec<Cui>> {
    let mut seen = HashSet::new();
    let mut seeds = Vec::new();

    for line in BufReader::new(reader).lines() {
        let line = line?;
        if let Some(cui) = parse_seed_line(&line) {
            if seen.insert(cui.clone()) {
                seeds.push(cui);
            }
        }
    }

    Ok(seeds)
}

/// Parses one seed line. Returns `None` for blank and comment lines.
pub fn parse_seed_line(line: &str) -> Option<Cui> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }
    Some(Cui::new(trimmed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seed_line() {
        assert_eq!(parse_seed_line("C0001"), Some(Cui::new("C0001")));
        assert_eq!(parse_seed_line("  C0002\t"), Some(Cui::new("C0002")));
        assert_eq!(parse_seed_line(""), None);
        assert_eq!(parse_seed_line("   "), None);
        assert_eq!(parse_seed_line("# diabetes"), None);
        assert_eq!(parse_seed_line("  # indented comment"), None);
    }

    #[test]
    fn test_read_seeds_dedups_in_order() {
        let input = "# roots\nC0002\n\nC0001\r\nC0002\n  C0001  \nC0003";
        let seeds = read_seeds(input.as_bytes()).unwrap();
        assert_eq!(
            seeds,
            vec![Cui::new("C0002"), Cui::new("C0001"), Cui::new("C0003")]
        );
    }

    #[test]
    fn test_read_seed_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_seed_file(dir.path().join("RootCuis.txt")).unwrap_err();
        assert!(matches!(err, ClosureError::InputNotFound { .. }));
    }

    #[test]
    fn test_read_seed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("RootCuis.txt");
        fs::write(&path, "C0001\nC0002\nC0001\n").unwrap();

        let seeds = read_seed_file(&path).unwrap();
        assert_eq!(seeds, vec![Cui::new("C0001"), Cui::new("C0002")]);
    }
}
