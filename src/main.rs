//! ontosift CLI: classify papers against a topic ontology.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use ontosift::assets;
use ontosift::batch;
use ontosift::classifier::Classifier;
use ontosift::config::{ClassifierConfig, ClimbMode};
use ontosift::corpus;
use ontosift::error::PaperError;
use ontosift::model::EmbeddingModel;
use ontosift::ontology::Ontology;
use ontosift::paper::Paper;
use ontosift::paths::SiftPaths;

#[derive(Parser)]
#[command(name = "ontosift", version, about = "Classify papers against a topic ontology")]
struct Cli {
    /// Config file (defaults to the XDG config location).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Ontology JSON file (defaults to the XDG data location).
    #[arg(long, global = true)]
    ontology: Option<PathBuf>,

    /// Embedding model JSON file (defaults to the XDG data location).
    #[arg(long, global = true)]
    model: Option<PathBuf>,

    /// Load JSON sources directly, skipping the binary caches.
    #[arg(long, global = true)]
    no_cache: bool,

    /// Override the syntactic similarity threshold.
    #[arg(long, global = true)]
    syntactic_threshold: Option<f64>,

    /// Override the semantic similarity threshold.
    #[arg(long, global = true)]
    semantic_threshold: Option<f64>,

    /// Override the climbing mode (first-broader or all-ancestors).
    #[arg(long, global = true)]
    climb_mode: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify one paper given as flags or as a JSON file.
    Classify {
        /// Paper title.
        #[arg(long)]
        title: Option<String>,

        /// Paper abstract.
        #[arg(long = "abstract")]
        abstract_text: Option<String>,

        /// Comma-separated keywords.
        #[arg(long)]
        keywords: Option<String>,

        /// Read the paper from a JSON file instead of flags.
        #[arg(long, conflicts_with_all = ["title", "abstract_text", "keywords"])]
        file: Option<PathBuf>,

        /// Run only the lexical pass.
        #[arg(long, conflicts_with = "semantic_only")]
        syntactic_only: bool,

        /// Run only the embedding pass.
        #[arg(long)]
        semantic_only: bool,
    },

    /// Classify a whole corpus and write one JSON line per paper.
    Batch {
        /// Corpus file path or http(s) URL.
        corpus: String,

        /// Output JSONL path.
        #[arg(long, short)]
        output: PathBuf,

        /// Cap the worker pool (defaults to all cores).
        #[arg(long)]
        workers: Option<usize>,
    },

    /// Show the nearest embedding-space phrases to a free-text phrase.
    Similar {
        /// Phrase to look up.
        phrase: String,

        /// Number of neighbors to return.
        #[arg(long, default_value = "10")]
        top: usize,
    },

    /// Show ontology, model and configuration statistics.
    Info,

    /// Download the ontology and embedding model bundle.
    Setup {
        /// Bundle URL override.
        #[arg(long)]
        url: Option<String>,

        /// Re-download even when assets are already present.
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let paths = SiftPaths::resolve()?;

    match &cli.command {
        Commands::Classify {
            title,
            abstract_text,
            keywords,
            file,
            syntactic_only,
            semantic_only,
        } => {
            let classifier = load_classifier(&cli, &paths)?;
            let paper = match file {
                Some(path) => {
                    let raw = std::fs::read_to_string(path).into_diagnostic()?;
                    serde_json::from_str(&raw).map_err(|e| PaperError::Malformed {
                        message: e.to_string(),
                    })?
                }
                None => Paper::new(title.clone(), abstract_text.clone(), keywords.clone()),
            };
            let json = if *syntactic_only {
                let topics = classifier.classify_syntactic(&paper)?;
                serde_json::to_string_pretty(&topics).into_diagnostic()?
            } else if *semantic_only {
                let topics = classifier.classify_semantic(&paper)?;
                serde_json::to_string_pretty(&topics).into_diagnostic()?
            } else {
                let prediction = classifier.classify(&paper)?;
                serde_json::to_string_pretty(&prediction).into_diagnostic()?
            };
            println!("{json}");
        }

        Commands::Batch {
            corpus,
            output,
            workers,
        } => {
            if let Some(workers) = workers {
                rayon::ThreadPoolBuilder::new()
                    .num_threads(*workers)
                    .build_global()
                    .into_diagnostic()?;
            }
            let classifier = load_classifier(&cli, &paths)?;
            let papers = corpus::load(corpus)?;
            let summary = batch::run(&classifier, &papers, output)?;
            println!(
                "Classified {} of {} papers into {}",
                summary.classified,
                papers.len(),
                output.display()
            );
            for id in &summary.failed {
                println!("  failed: {id}");
            }
        }

        Commands::Similar { phrase, top } => {
            let classifier = load_classifier(&cli, &paths)?;
            let similar = classifier.similar_topics(phrase, *top);
            if similar.is_empty() {
                println!("No embedding neighbors for \"{phrase}\".");
            } else {
                println!("Nearest phrases to \"{phrase}\":");
                for (i, (word, similarity)) in similar.iter().enumerate() {
                    println!("  {}. \"{}\" (similarity: {:.4})", i + 1, word, similarity);
                }
            }
        }

        Commands::Info => {
            let classifier = load_classifier(&cli, &paths)?;
            let stats = classifier.ontology().stats();
            let config = classifier.config();
            println!("Ontology:");
            println!("  topics:           {}", stats.topics);
            println!("  synonym mappings: {}", stats.synonym_mappings);
            println!("  broader edges:    {}", stats.broader_edges);
            println!("  roots:            {}", stats.roots);
            println!("Model:");
            println!("  keys: {}", classifier.model().len());
            println!("Config:");
            println!("  syntactic threshold: {}", config.syntactic_threshold);
            println!("  semantic threshold:  {}", config.semantic_threshold);
            println!("  word similarity:     {}", config.word_similarity);
            println!("  climb mode:          {}", config.climb_mode);
            println!("  min narrower:        {}", config.min_narrower);
        }

        Commands::Setup { url, force } => {
            paths.ensure_dirs()?;
            let url = url.as_deref().unwrap_or(assets::DEFAULT_BUNDLE_URL);
            assets::setup(&paths, url, *force)?;
            println!("Assets ready in {}", paths.data_dir.display());
        }
    }

    Ok(())
}

/// Build the classifier from config file, CLI overrides and assets.
fn load_classifier(cli: &Cli, paths: &SiftPaths) -> Result<Classifier> {
    let mut config = match &cli.config {
        Some(path) => ClassifierConfig::load(path)?,
        None => {
            let path = paths.config_file();
            if path.is_file() {
                ClassifierConfig::load(&path)?
            } else {
                ClassifierConfig::default()
            }
        }
    };
    if let Some(threshold) = cli.syntactic_threshold {
        config.syntactic_threshold = threshold;
    }
    if let Some(threshold) = cli.semantic_threshold {
        config.semantic_threshold = threshold;
    }
    if let Some(mode) = &cli.climb_mode {
        config.climb_mode = parse_climb_mode(mode)?;
    }

    let ontology_path = cli
        .ontology
        .clone()
        .unwrap_or_else(|| paths.ontology_file());
    let model_path = cli.model.clone().unwrap_or_else(|| paths.model_file());
    if cli.ontology.is_none() && cli.model.is_none() {
        assets::ensure_assets(paths)?;
    }

    // The binary caches bind to the default asset locations.
    let use_cache = !cli.no_cache && cli.ontology.is_none() && cli.model.is_none();
    let (ontology_cache, model_cache) = if use_cache {
        paths.ensure_dirs()?;
        (Some(paths.ontology_cache()), Some(paths.model_cache()))
    } else {
        (None, None)
    };

    let ontology = Arc::new(Ontology::load(&ontology_path, ontology_cache.as_deref())?);
    let model = Arc::new(EmbeddingModel::load(&model_path, model_cache.as_deref())?);
    Ok(Classifier::new(ontology, model, config)?)
}

fn parse_climb_mode(mode: &str) -> Result<ClimbMode> {
    match mode {
        "first-broader" => Ok(ClimbMode::FirstBroader),
        "all-ancestors" => Ok(ClimbMode::AllAncestors),
        other => miette::bail!("unknown climb mode `{other}` (expected first-broader or all-ancestors)"),
    }
}
