use crate::core::url_list::read_url_list;
use crate::utils::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// URLs handled by this or any earlier run. Only ever grows.
#[derive(Debug, Clone)]
pub struct AttemptedList {
    path: PathBuf,
    urls: Vec<String>,
}

impl AttemptedList {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let urls = read_url_list(&path)?;
        tracing::debug!("Loaded {} attempted URLs from {}", urls.len(), path.display());
        Ok(Self { path, urls })
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.iter().any(|u| u == url)
    }

    pub fn record(&mut self, url: &str) {
        self.urls.push(url.to_string());
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Overwrite the backing file with the full list.
    pub fn persist(&self) -> Result<()> {
        let mut content = String::new();
        for url in &self.urls {
            content.push_str(url);
            content.push('\n');
        }
        fs::write(&self.path, content)?;
        tracing::debug!("Wrote {} attempted URLs to {}", self.urls.len(), self.path.display());
        Ok(())
    }
}

/// Remove empty directories directly under `root`. Returns what was removed.
pub fn remove_empty_dirs(root: &Path) -> Result<Vec<PathBuf>> {
    let mut removed = Vec::new();
    for entry in fs::read_dir(root)? {
        let path = entry?.path();
        if path.is_dir() && fs::read_dir(&path)?.next().is_none() {
            fs::remove_dir(&path)?;
            tracing::debug!("Removed empty directory {}", path.display());
            removed.push(path);
        }
    }
    Ok(removed)
}
