use std::path::Path;

use tracing::info;

use crate::error::{Result, SummarizeError};

const SEPARATOR: &str = "\n\n";

/// Split raw text on blank lines. Empty paragraphs are kept, so an empty
/// input yields a single empty paragraph.
pub fn split_paragraphs(text: &str) -> Vec<String> {
    text.replace("\r\n", "\n")
        .split(SEPARATOR)
        .map(str::to_string)
        .collect()
}

pub fn load_paragraphs(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            SummarizeError::InputNotFound(path.to_path_buf())
        } else {
            SummarizeError::Io {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    let paragraphs = split_paragraphs(&text);
    info!("Loaded {} paragraphs from {}", paragraphs.len(), path.display());
    Ok(paragraphs)
}

pub fn join_summaries(summaries: &[String]) -> String {
    summaries.join(SEPARATOR)
}

/// Write all summaries as the complete file contents, replacing whatever was there.
pub fn write_summaries(path: &Path, summaries: &[String]) -> Result<()> {
    std::fs::write(path, join_summaries(summaries)).map_err(|e| SummarizeError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    info!("Wrote {} summaries to {}", summaries.len(), path.display());
    Ok(())
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_blank_lines() {
        let p = split_paragraphs("first line\nstill first\n\nsecond\n\nthird");
        assert_eq!(p, vec!["first line\nstill first", "second", "third"]);
    }

    #[test]
    fn keeps_empty_paragraphs() {
        let p = split_paragraphs("a\n\n\n\nb");
        assert_eq!(p, vec!["a", "", "b"]);
    }

    #[test]
    fn empty_input_is_one_empty_paragraph() {
        assert_eq!(split_paragraphs(""), vec![String::new()]);
    }

    #[test]
    fn crlf_normalized() {
        let p = split_paragraphs("one\r\n\r\ntwo\r\nmore");
        assert_eq!(p, vec!["one", "two\nmore"]);
    }

    #[test]
    fn missing_file_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_paragraphs(&dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, SummarizeError::InputNotFound(_)));
    }

    #[test]
    fn write_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.txt");
        std::fs::write(&out, "old contents that are longer").unwrap();

        write_summaries(&out, &["a".to_string(), "b".to_string()]).unwrap();
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "a\n\nb");
    }

    #[test]
    fn load_then_join_preserves_count() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.txt");
        std::fs::write(&input, "x\n\ny\n\n\n\nz").unwrap();

        let p = load_paragraphs(&input).unwrap();
        assert_eq!(p.len(), 4);
        assert_eq!(split_paragraphs(&join_summaries(&p)).len(), 4);
    }
}
