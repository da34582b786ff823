use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::application::PromptSource;
use crate::config::PromptsConfig;
use crate::domain::PromptSections;

/// Reads the system, style and safety prompts from plain-text files.
///
/// Paths are resolved against `base_dir`. A section without a configured path
/// is empty; a section whose file cannot be read is replaced by a short
/// placeholder naming the problem, so startup never fails on prompt files.
pub struct FilePromptSource {
    base_dir: PathBuf,
    system_path: Option<String>,
    style_path: Option<String>,
    safety_path: Option<String>,
}

impl FilePromptSource {
    pub fn new(base_dir: impl Into<PathBuf>, config: &PromptsConfig) -> Self {
        Self {
            base_dir: base_dir.into(),
            system_path: config.system_path.clone(),
            style_path: config.style_path.clone(),
            safety_path: config.safety_path.clone(),
        }
    }

    fn read_section(&self, name: &str, relative: Option<&str>) -> String {
        let Some(relative) = relative.filter(|p| !p.trim().is_empty()) else {
            debug!("No path configured for {name} prompt");
            return String::new();
        };

        let full_path = resolve(&self.base_dir, relative);
        match std::fs::read_to_string(&full_path) {
            Ok(text) => text.trim().to_string(),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("{name} prompt not found at {}", full_path.display());
                format!("Prompt file not found: {relative}")
            }
            Err(e) => {
                warn!("Failed to read {name} prompt at {}: {e}", full_path.display());
                format!("Error loading prompt: {e}")
            }
        }
    }
}

impl PromptSource for FilePromptSource {
    fn load(&self) -> PromptSections {
        PromptSections::new(
            self.read_section("system", self.system_path.as_deref()),
            self.read_section("style", self.style_path.as_deref()),
            self.read_section("safety", self.safety_path.as_deref()),
        )
    }
}

fn resolve(base_dir: &Path, relative: &str) -> PathBuf {
    let path = Path::new(relative);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}
