//! Object detection adapters.
//!
//! The detection model itself runs out of process; an [`ObjectDetector`]
//! only turns an image into a list of label strings.

use std::path::Path;
use std::process::Command;

use crate::concept::ConceptSet;
use crate::config::DetectionConfig;
use crate::error::{ConceptKgError, Result};

/// Trait for object detectors
pub trait ObjectDetector: Send + Sync {
    /// Detect objects in an image and return their class labels (duplicates allowed)
    fn detect(&self, image: &Path) -> Result<Vec<String>>;
}

/// Runs an external detector as `program args... <image>` and reads one
/// label per non-empty stdout line.
#[derive(Debug, Clone)]
pub struct CommandDetector {
    program: String,
    args: Vec<String>,
}

impl CommandDetector {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Build from the `[detection]` section; `None` when no command is configured.
    pub fn from_config(config: &DetectionConfig) -> Option<Self> {
        config
            .command
            .as_ref()
            .map(|command| Self::new(command.clone(), config.args.clone()))
    }
}

impl ObjectDetector for CommandDetector {
    fn detect(&self, image: &Path) -> Result<Vec<String>> {
        if !image.is_file() {
            return Err(ConceptKgError::Detection(format!(
                "Image not found: {}",
                image.display()
            )));
        }

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(image)
            .output()
            .map_err(|e| {
                ConceptKgError::Detection(format!("Failed to run detector {}: {}", self.program, e))
            })?;

        if !output.status.success() {
            return Err(ConceptKgError::Detection(format!(
                "Detector exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }
}

/// Labels supplied up front (e.g. `--concepts dog,frisbee`); the image is ignored.
#[derive(Debug, Clone, Default)]
pub struct StaticDetector {
    labels: Vec<String>,
}

impl StaticDetector {
    pub fn new(labels: Vec<String>) -> Self {
        Self { labels }
    }
}

impl ObjectDetector for StaticDetector {
    fn detect(&self, _image: &Path) -> Result<Vec<String>> {
        Ok(self.labels.clone())
    }
}

/// Run detection and normalize the labels into a concept set.
///
/// Detector failures are logged and produce an empty set.
pub fn detect_concepts(detector: &dyn ObjectDetector, image: &Path) -> ConceptSet {
    log::info!("Starting object detection for image: {}", image.display());

    let labels = match detector.detect(image) {
        Ok(labels) => labels,
        Err(e) => {
            log::error!("Object detection failed: {}", e);
            return ConceptSet::new();
        }
    };

    let concepts = ConceptSet::from_labels(&labels);
    if concepts.is_empty() {
        log::warn!("No objects detected in image: {}", image.display());
    } else {
        log::info!("Detected classes: {:?}", labels);
    }
    concepts
}
