//! Labeled reference example library
//!
//! Golden example texts live on disk under `positive/` and `negative/`
//! subdirectories of the configured reference directory. Missing directories
//! or unreadable files mean less (possibly no) reference material, never an
//! error; with no material at all the classifier is skipped entirely.

use std::path::{Path, PathBuf};

use tracing::debug;

use domain_triage::ports::LabeledExamples;

/// Number of examples loaded per label
pub const EXAMPLES_PER_LABEL: usize = 5;

/// On-disk library of labeled reference texts
#[derive(Debug, Clone)]
pub struct ReferenceLibrary {
    dir: PathBuf,
}

impl ReferenceLibrary {
    /// Creates a library rooted at `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Loads up to [`EXAMPLES_PER_LABEL`] texts per label, sorted by filename
    pub fn load(&self) -> LabeledExamples {
        let examples = LabeledExamples {
            positive: load_label_dir(&self.dir.join("positive")),
            negative: load_label_dir(&self.dir.join("negative")),
        };
        debug!(
            positive = examples.positive.len(),
            negative = examples.negative.len(),
            "loaded reference examples"
        );
        examples
    }
}

fn load_label_dir(dir: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().map_or(false, |ext| ext == "txt"))
        .collect();
    files.sort();

    files
        .into_iter()
        .take(EXAMPLES_PER_LABEL)
        .filter_map(|path| std::fs::read_to_string(&path).ok())
        .map(|text| text.trim().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_directory_is_empty() {
        let library = ReferenceLibrary::new("/nonexistent/reference");
        assert!(library.load().is_empty());
    }

    #[test]
    fn test_loads_sorted_and_capped() {
        let dir = tempfile::tempdir().unwrap();
        let positive = dir.path().join("positive");
        std::fs::create_dir_all(&positive).unwrap();
        for index in 0..7 {
            std::fs::write(positive.join(format!("patient{index}.txt")), format!("report {index}\n"))
                .unwrap();
        }
        // Non-text files are ignored
        std::fs::write(positive.join("notes.md"), "ignored").unwrap();

        let examples = ReferenceLibrary::new(dir.path()).load();
        assert_eq!(examples.positive.len(), EXAMPLES_PER_LABEL);
        assert_eq!(examples.positive[0], "report 0");
        assert!(examples.negative.is_empty());
    }
}
