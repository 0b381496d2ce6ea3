use crate::utils::error::Result;
use std::fs::{self, OpenOptions};
use std::path::Path;

/// Marker for a line that is disabled, either by hand or after a failed existence check.
pub const DISABLED_MARKER: char = '#';

/// Read the trimmed, non-blank lines of `path`, creating an empty file when absent.
///
/// Disabled (`#`) lines are kept so callers can both skip them and keep line
/// positions stable for naming clones.
pub fn read_url_list<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path)?;

    let content = fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

pub fn is_disabled(line: &str) -> bool {
    line.starts_with(DISABLED_MARKER)
}

pub fn enabled_count(urls: &[String]) -> usize {
    urls.iter().filter(|url| !is_disabled(url)).count()
}

/// Rewrite `path` so every line equal to `url` (ignoring surrounding
/// whitespace) becomes `# <url>`. Returns how many lines were disabled.
pub fn comment_out<P: AsRef<Path>>(path: P, url: &str) -> Result<usize> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;

    let mut replaced = 0;
    let mut rewritten = String::with_capacity(content.len() + 2);
    for line in content.split_inclusive('\n') {
        if line.trim() == url {
            rewritten.push_str(&format!("{} {}\n", DISABLED_MARKER, url));
            replaced += 1;
        } else {
            rewritten.push_str(line);
        }
    }

    if replaced > 0 {
        fs::write(path, rewritten)?;
    }
    Ok(replaced)
}

pub fn backup<P: AsRef<Path>, Q: AsRef<Path>>(path: P, backup_path: Q) -> Result<()> {
    fs::copy(path.as_ref(), backup_path.as_ref())?;
    tracing::debug!(
        "Backed up {} to {}",
        path.as_ref().display(),
        backup_path.as_ref().display()
    );
    Ok(())
}
