pub mod config;
pub mod error;
pub mod logging;
pub mod concept;
pub mod rdf;
pub mod conceptnet;
pub mod store;
pub mod graph;
pub mod detect;
pub mod pipeline;
pub mod present;

pub use concept::ConceptSet;
pub use config::Config;
pub use error::{ConceptKgError, Result};
pub use graph::{build, ConceptGraph};
pub use pipeline::{OutputKind, Pipeline, PipelineOutput};
pub use rdf::{RelationSet, Triple};
