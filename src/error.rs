//! Rich diagnostic error types for the ontosift classifier.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes, help text, and source chains so users know exactly what
//! went wrong and how to fix it.

use miette::Diagnostic;
use thiserror::Error;

use crate::paths::PathError;

/// Top-level error type for the ontosift classifier.
///
/// Each variant wraps a subsystem-specific error, preserving the full diagnostic
/// chain (error codes, help text, source spans) through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum SiftError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Paper(#[from] PaperError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Ontology(#[from] OntologyError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Corpus(#[from] CorpusError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Asset(#[from] AssetError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Batch(#[from] BatchError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Path(#[from] PathError),
}

// ---------------------------------------------------------------------------
// Paper errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum PaperError {
    #[error("paper has no text: title, abstract and keywords are all empty")]
    #[diagnostic(
        code(ontosift::paper::empty_text),
        help(
            "Classification needs at least one non-empty field. \
             Provide a title, an abstract, or a keywords list."
        )
    )]
    EmptyText,

    #[error("paper record is malformed: {message}")]
    #[diagnostic(
        code(ontosift::paper::malformed),
        help(
            "A paper is a JSON object with optional string fields `title` and \
             `abstract`, and `keywords` as either a comma-joined string or a \
             list of strings."
        )
    )]
    Malformed { message: String },
}

// ---------------------------------------------------------------------------
// Ontology errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum OntologyError {
    #[error("I/O error reading ontology {path}: {source}")]
    #[diagnostic(
        code(ontosift::ontology::io),
        help(
            "Check that the ontology file exists and is readable. \
             Run `ontosift setup` to download the default ontology bundle."
        )
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("ontology parse error: {message}")]
    #[diagnostic(
        code(ontosift::ontology::parse),
        help(
            "The ontology JSON could not be parsed. It must contain `topics`, \
             `primary_labels` and `broaders` keys. If the file is from an older \
             release, re-run `ontosift setup`."
        )
    )]
    Parse { message: String },

    #[error("unknown concept `{key}` referenced by {referenced_by}")]
    #[diagnostic(
        code(ontosift::ontology::unknown_concept),
        help(
            "Every key appearing in `primary_labels` or `broaders` must also be \
             listed under `topics`. The ontology file is inconsistent."
        )
    )]
    UnknownConcept { key: String, referenced_by: String },
}

// ---------------------------------------------------------------------------
// Embedding model errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ModelError {
    #[error("I/O error reading embedding model {path}: {source}")]
    #[diagnostic(
        code(ontosift::model::io),
        help(
            "Check that the model file exists and is readable. \
             Run `ontosift setup` to download the default model bundle."
        )
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("embedding model parse error: {message}")]
    #[diagnostic(
        code(ontosift::model::parse),
        help(
            "The model JSON could not be parsed. It must map each token or \
             underscore-joined phrase to a list of {{topic, sim_t, wet, sim_w}} \
             records."
        )
    )]
    Parse { message: String },
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("config I/O error for {path}: {source}")]
    #[diagnostic(
        code(ontosift::config::io),
        help("Check that the config file path exists and is accessible.")
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("config parse error in {path}: {message}")]
    #[diagnostic(
        code(ontosift::config::parse),
        help("The config file must be valid TOML. See `ontosift.toml` in the docs for the schema.")
    )]
    Parse { path: String, message: String },

    #[error("invalid configuration: {message}")]
    #[diagnostic(
        code(ontosift::config::invalid),
        help("Similarity thresholds must lie in (0, 1] and min_narrower must be at least 1.")
    )]
    Invalid { message: String },
}

// ---------------------------------------------------------------------------
// Corpus errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum CorpusError {
    #[error("cannot read corpus {path}: {source}")]
    #[diagnostic(
        code(ontosift::corpus::io),
        help("Check that the corpus file exists and is readable.")
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("corpus parse error at {location}: {message}")]
    #[diagnostic(
        code(ontosift::corpus::parse),
        help(
            "A corpus is either a JSON object mapping paper ids to paper \
             records, or a .jsonl file with one {{\"id\": ..., ...}} object \
             per line."
        )
    )]
    Parse { location: String, message: String },

    #[error("fetch failed for {url}: {message}")]
    #[diagnostic(
        code(ontosift::corpus::fetch),
        help("Check the URL and your network connection.")
    )]
    Fetch { url: String, message: String },

    #[error("corpus is empty")]
    #[diagnostic(
        code(ontosift::corpus::empty),
        help("The corpus parsed successfully but contains no papers.")
    )]
    Empty,
}

// ---------------------------------------------------------------------------
// Asset errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum AssetError {
    #[error("download failed for {url}: {message}")]
    #[diagnostic(
        code(ontosift::asset::download),
        help("Check the bundle URL and your network connection, then re-run `ontosift setup`.")
    )]
    Download { url: String, message: String },

    #[error("bundle extraction failed: {message}")]
    #[diagnostic(
        code(ontosift::asset::extract),
        help("The downloaded bundle is not a valid gzipped tar archive.")
    )]
    Extract { message: String },

    #[error("bundle entry `{entry}` escapes the data directory")]
    #[diagnostic(
        code(ontosift::asset::unsafe_path),
        help("The bundle contains an absolute or parent-relative path and was rejected.")
    )]
    UnsafePath { entry: String },

    #[error("required asset missing: {path}")]
    #[diagnostic(
        code(ontosift::asset::missing),
        help("Run `ontosift setup` to download the ontology and model bundle.")
    )]
    Missing { path: String },

    #[error("I/O error under {path}: {source}")]
    #[diagnostic(
        code(ontosift::asset::io),
        help("Check permissions on the ontosift data directory.")
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Batch errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum BatchError {
    #[error("cannot open output file {path}: {source}")]
    #[diagnostic(
        code(ontosift::batch::output),
        help("Check that the output directory exists and is writable.")
    )]
    Output {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed writing result for paper {paper_id}: {source}")]
    #[diagnostic(
        code(ontosift::batch::write),
        help("The output stream failed mid-run. Partial results up to this paper were flushed.")
    )]
    Write {
        paper_id: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience alias for functions returning ontosift results.
pub type SiftResult<T> = std::result::Result<T, SiftError>;
