//! # ontosift
//!
//! Classifies scholarly papers against a research-topic ontology by
//! combining direct label matching with word-embedding evidence, then
//! generalizing the matched topics along the ontology's broader-than
//! hierarchy.
//!
//! ## Architecture
//!
//! - **Matchers** (`matcher`): stem-indexed edit-distance pass plus an
//!   embedding-backed pass over noun phrases
//! - **Ontology** (`ontology`): petgraph-indexed concept hierarchy with
//!   synonym clusters and the upward climber
//! - **Ranking** (`rank`): evidence scoring with a Kneedle cutoff
//! - **Storage** (`store`): JSON sources behind mmap'd binary caches
//! - **Batch** (`batch`): rayon fan-out over whole corpora
//!
//! ## Library usage
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! use ontosift::classifier::Classifier;
//! use ontosift::config::ClassifierConfig;
//! use ontosift::model::EmbeddingModel;
//! use ontosift::ontology::Ontology;
//! use ontosift::paper::Paper;
//!
//! let ontology = Arc::new(Ontology::load(Path::new("ontology.json"), None).unwrap());
//! let model = Arc::new(EmbeddingModel::load(Path::new("model.json"), None).unwrap());
//! let classifier = Classifier::new(ontology, model, ClassifierConfig::default()).unwrap();
//!
//! let paper = Paper::new(
//!     Some("Knee detection for model selection".to_string()),
//!     Some("We rank candidate models and cut the list at the knee.".to_string()),
//!     None,
//! );
//! let prediction = classifier.classify(&paper).unwrap();
//! println!("{:?}", prediction.semantic);
//! ```

pub mod assets;
pub mod batch;
pub mod classifier;
pub mod config;
pub mod corpus;
pub mod error;
pub mod matcher;
pub mod model;
pub mod ontology;
pub mod paper;
pub mod paths;
pub mod rank;
pub mod store;
pub mod text;
