//! Fan-out classification over a whole corpus.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::classifier::{Classifier, Prediction};
use crate::error::{BatchError, PaperError};
use crate::paper::Paper;

/// One output line of a batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchRecord {
    pub id: String,
    #[serde(flatten)]
    pub prediction: Prediction,
}

/// What a batch run got through.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub classified: usize,
    /// Identifiers of papers whose classification was rejected.
    pub failed: Vec<String>,
}

/// Classify every paper and append one JSON line per result to `output`.
///
/// Papers are scored in parallel; writing stays serial so the output
/// order follows the corpus order. A paper that fails classification is
/// recorded in the summary and does not stop the rest of the run.
pub fn run(
    classifier: &Classifier,
    papers: &[(String, Paper)],
    output: &Path,
) -> Result<BatchSummary, BatchError> {
    use rayon::prelude::*;

    let started = Instant::now();
    let results: Vec<(&str, Result<Prediction, PaperError>)> = papers
        .par_iter()
        .map(|(id, paper)| (id.as_str(), classifier.classify(paper)))
        .collect();

    let file = File::create(output).map_err(|source| BatchError::Output {
        path: output.display().to_string(),
        source,
    })?;
    let mut writer = BufWriter::new(file);

    let mut summary = BatchSummary::default();
    for (id, result) in results {
        match result {
            Ok(prediction) => {
                let record = BatchRecord {
                    id: id.to_string(),
                    prediction,
                };
                serde_json::to_writer(&mut writer, &record).map_err(|err| {
                    BatchError::Write {
                        paper_id: id.to_string(),
                        source: err.into(),
                    }
                })?;
                writer
                    .write_all(b"\n")
                    .map_err(|source| BatchError::Write {
                        paper_id: id.to_string(),
                        source,
                    })?;
                summary.classified += 1;
            }
            Err(err) => {
                error!(paper = id, error = %err, "skipping paper");
                summary.failed.push(id.to_string());
            }
        }
    }
    writer.flush().map_err(|source| BatchError::Output {
        path: output.display().to_string(),
        source,
    })?;

    info!(
        classified = summary.classified,
        failed = summary.failed.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "batch finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::BufRead;
    use std::sync::Arc;

    use crate::config::ClassifierConfig;
    use crate::model::fixtures::small_model;
    use crate::ontology::fixtures::small_ontology;

    fn classifier() -> Classifier {
        Classifier::new(
            Arc::new(small_ontology()),
            Arc::new(small_model()),
            ClassifierConfig::default(),
        )
        .unwrap()
    }

    fn paper(text: &str) -> Paper {
        Paper::new(None, Some(text.to_string()), None)
    }

    #[test]
    fn writes_one_line_per_paper_in_corpus_order() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("predictions.jsonl");
        let papers = vec![
            ("p1".to_string(), paper("A lazy neural network.")),
            ("p2".to_string(), paper("Feedforward neural networks.")),
        ];

        let summary = run(&classifier(), &papers, &output).unwrap();
        assert_eq!(summary.classified, 2);
        assert!(summary.failed.is_empty());

        let file = File::open(&output).unwrap();
        let records: Vec<BatchRecord> = std::io::BufReader::new(file)
            .lines()
            .map(|line| serde_json::from_str(&line.unwrap()).unwrap())
            .collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "p1");
        assert_eq!(records[1].id, "p2");
        assert!(
            records[0]
                .prediction
                .syntactic
                .contains(&"neural networks".to_string())
        );
    }

    #[test]
    fn a_bad_paper_does_not_stop_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("predictions.jsonl");
        let papers = vec![
            ("good".to_string(), paper("A lazy neural network.")),
            ("empty".to_string(), Paper::new(None, None, None)),
            ("also-good".to_string(), paper("Network architecture.")),
        ];

        let summary = run(&classifier(), &papers, &output).unwrap();
        assert_eq!(summary.classified, 2);
        assert_eq!(summary.failed, ["empty"]);

        let text = std::fs::read_to_string(&output).unwrap();
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn unwritable_output_path_is_reported() {
        let papers = vec![("p1".to_string(), paper("A lazy neural network."))];
        let err = run(
            &classifier(),
            &papers,
            Path::new("/nonexistent-dir/out.jsonl"),
        )
        .unwrap_err();
        assert!(matches!(err, BatchError::Output { .. }));
    }
}
