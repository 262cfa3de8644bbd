//! Loading paper corpora from local files or URLs.

use std::collections::BTreeMap;
use std::io::Read;

use serde::Deserialize;
use tracing::info;

use crate::error::CorpusError;
use crate::paper::Paper;

#[derive(Debug, Deserialize)]
struct CorpusLine {
    id: String,
    #[serde(flatten)]
    paper: Paper,
}

/// Load a corpus from a local path or an http(s) URL.
///
/// Two shapes are accepted: a JSON object mapping paper ids to paper
/// records (papers come back sorted by id), or line-delimited JSON when
/// the location ends in `.jsonl` or `.ndjson` (line order is kept).
pub fn load(location: &str) -> Result<Vec<(String, Paper)>, CorpusError> {
    let raw = if location.starts_with("http://") || location.starts_with("https://") {
        fetch(location)?
    } else {
        std::fs::read_to_string(location).map_err(|source| CorpusError::Io {
            path: location.to_string(),
            source,
        })?
    };

    let papers = if location.ends_with(".jsonl") || location.ends_with(".ndjson") {
        parse_lines(location, &raw)?
    } else {
        parse_map(location, &raw)?
    };
    if papers.is_empty() {
        return Err(CorpusError::Empty);
    }
    info!(papers = papers.len(), corpus = location, "loaded corpus");
    Ok(papers)
}

fn fetch(url: &str) -> Result<String, CorpusError> {
    let response = ureq::get(url).call().map_err(|e| CorpusError::Fetch {
        url: url.into(),
        message: e.to_string(),
    })?;

    let mut raw = String::new();
    response
        .into_reader()
        .read_to_string(&mut raw)
        .map_err(|e| CorpusError::Fetch {
            url: url.into(),
            message: e.to_string(),
        })?;
    Ok(raw)
}

fn parse_map(location: &str, raw: &str) -> Result<Vec<(String, Paper)>, CorpusError> {
    let map: BTreeMap<String, Paper> =
        serde_json::from_str(raw).map_err(|err| CorpusError::Parse {
            location: location.to_string(),
            message: err.to_string(),
        })?;
    Ok(map.into_iter().collect())
}

fn parse_lines(location: &str, raw: &str) -> Result<Vec<(String, Paper)>, CorpusError> {
    let mut papers = Vec::new();
    for (number, line) in raw.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let entry: CorpusLine =
            serde_json::from_str(line).map_err(|err| CorpusError::Parse {
                location: format!("{}:{}", location, number + 1),
                message: err.to_string(),
            })?;
        papers.push((entry.id, entry.paper));
    }
    Ok(papers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_map_comes_back_sorted_by_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.json");
        std::fs::write(
            &path,
            r#"{
                "zeta": {"title": "Lazy evaluation"},
                "alpha": {"abstract": "Neural networks everywhere."}
            }"#,
        )
        .unwrap();

        let papers = load(path.to_str().unwrap()).unwrap();
        assert_eq!(papers.len(), 2);
        assert_eq!(papers[0].0, "alpha");
        assert_eq!(papers[1].0, "zeta");
        assert_eq!(papers[1].1.title.as_deref(), Some("Lazy evaluation"));
    }

    #[test]
    fn jsonl_keeps_line_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.jsonl");
        std::fs::write(
            &path,
            concat!(
                r#"{"id": "zeta", "title": "Lazy evaluation"}"#,
                "\n\n",
                r#"{"id": "alpha", "keywords": ["networks", "foxes"]}"#,
                "\n",
            ),
        )
        .unwrap();

        let papers = load(path.to_str().unwrap()).unwrap();
        assert_eq!(papers[0].0, "zeta");
        assert_eq!(papers[1].0, "alpha");
        assert_eq!(
            papers[1].1.normalized_keywords().as_deref(),
            Some("networks, foxes")
        );
    }

    #[test]
    fn parse_errors_carry_the_line_number() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.jsonl");
        std::fs::write(&path, "{\"id\": \"ok\", \"title\": \"t\"}\nnot json\n").unwrap();

        let err = load(path.to_str().unwrap()).unwrap_err();
        match err {
            CorpusError::Parse { location, .. } => assert!(location.ends_with(":2")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load("/nonexistent/corpus.json").unwrap_err();
        assert!(matches!(err, CorpusError::Io { .. }));
    }

    #[test]
    fn an_empty_corpus_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.json");
        std::fs::write(&path, "{}").unwrap();

        let err = load(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, CorpusError::Empty));
    }
}
