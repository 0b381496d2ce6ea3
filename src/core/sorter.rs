use crate::config::{HarvestSettings, NOT_VALIDATED_LOG, VALIDATED_LOG};
use crate::utils::error::Result;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

pub const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

pub fn timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Clone directory name: last URL path segment plus the line index.
///
/// The index keeps two repositories with the same name apart.
pub fn repo_dir_name(url: &str, index: usize) -> String {
    let base = url
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default();
    format!("{}_{}", base, index)
}

/// Append `<timestamp> - <url>` to `log`, creating parent directories as needed.
pub fn append_record(log: &Path, timestamp: &str, url: &str) -> Result<()> {
    if let Some(parent) = log.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut file = OpenOptions::new().create(true).append(true).open(log)?;
    writeln!(file, "{} - {}", timestamp, url)?;
    Ok(())
}

/// Moves finished clones into their bucket and keeps the per-bucket logs.
#[derive(Debug, Clone)]
pub struct Sorter {
    validated_dir: PathBuf,
    not_validated_dir: PathBuf,
    failed_clones_log: PathBuf,
}

impl Sorter {
    pub fn new(settings: &HarvestSettings) -> Self {
        Self {
            validated_dir: settings.validated_dir(),
            not_validated_dir: settings.not_validated_dir(),
            failed_clones_log: settings.failed_clones_file(),
        }
    }

    pub fn validated_log(&self) -> PathBuf {
        self.validated_dir.join(VALIDATED_LOG)
    }

    pub fn not_validated_log(&self) -> PathBuf {
        self.not_validated_dir.join(NOT_VALIDATED_LOG)
    }

    /// Written once per successful clone, before validation runs.
    pub fn record_clone_success(&self, timestamp: &str, url: &str) -> Result<()> {
        append_record(&self.validated_log(), timestamp, url)
    }

    pub fn record_clone_failure(&self, timestamp: &str, url: &str) -> Result<()> {
        append_record(&self.failed_clones_log, timestamp, url)
    }

    pub fn file_validated(&self, repo_dir: &Path) -> Result<PathBuf> {
        move_into(repo_dir, &self.validated_dir)
    }

    pub fn file_not_validated(&self, repo_dir: &Path, timestamp: &str, url: &str) -> Result<PathBuf> {
        let dest = move_into(repo_dir, &self.not_validated_dir)?;
        append_record(&self.not_validated_log(), timestamp, url)?;
        Ok(dest)
    }
}

fn move_into(repo_dir: &Path, bucket: &Path) -> Result<PathBuf> {
    fs::create_dir_all(bucket)?;

    let name = repo_dir.file_name().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("{} has no directory name", repo_dir.display()),
        )
    })?;
    let dest = bucket.join(name);
    if dest.exists() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("{} already exists", dest.display()),
        )
        .into());
    }

    fs::rename(repo_dir, &dest)?;
    tracing::debug!("Moved {} to {}", repo_dir.display(), dest.display());
    Ok(dest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_repo_dir_name_uses_last_segment_and_index() {
        assert_eq!(
            repo_dir_name("https://github.com/projectdiscovery/nuclei-templates", 0),
            "nuclei-templates_0"
        );
        assert_eq!(repo_dir_name("https://github.com/someone/fuzzing/", 7), "fuzzing_7");
    }

    #[test]
    fn test_same_repo_name_from_different_owners_never_collides() {
        let a = repo_dir_name("https://github.com/alice/templates", 3);
        let b = repo_dir_name("https://github.com/bob/templates", 4);
        assert_ne!(a, b);
    }

    #[test]
    fn test_timestamp_format() {
        let ts = timestamp();
        assert_eq!(ts.len(), 15);
        assert_eq!(&ts[8..9], "-");
        assert!(ts.chars().filter(|c| *c != '-').all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_append_record_line_format() {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("logs/failed_clones.txt");

        append_record(&log, "20240101-120000", "https://github.com/a/b").unwrap();
        append_record(&log, "20240101-120001", "https://github.com/a/c").unwrap();

        assert_eq!(
            fs::read_to_string(&log).unwrap(),
            "20240101-120000 - https://github.com/a/b\n20240101-120001 - https://github.com/a/c\n"
        );
    }

    #[test]
    fn test_buckets_created_lazily_and_logged() {
        let dir = TempDir::new().unwrap();
        let settings = HarvestSettings::new(dir.path().join("nuclei.txt"), dir.path());
        let sorter = Sorter::new(&settings);

        let clone = dir.path().join("b_0");
        fs::create_dir(&clone).unwrap();
        fs::write(clone.join("t.yaml"), "id: t").unwrap();

        assert!(!settings.not_validated_dir().exists());
        let dest = sorter
            .file_not_validated(&clone, "20240101-120000", "https://github.com/a/b")
            .unwrap();

        assert_eq!(dest, settings.not_validated_dir().join("b_0"));
        assert!(dest.join("t.yaml").is_file());
        assert!(!clone.exists());
        assert_eq!(
            fs::read_to_string(sorter.not_validated_log()).unwrap(),
            "20240101-120000 - https://github.com/a/b\n"
        );
        assert!(!settings.validated_dir().exists());
    }

    #[test]
    fn test_move_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let settings = HarvestSettings::new(dir.path().join("nuclei.txt"), dir.path());
        let sorter = Sorter::new(&settings);

        fs::create_dir_all(settings.validated_dir().join("b_0")).unwrap();
        let clone = dir.path().join("b_0");
        fs::create_dir(&clone).unwrap();

        assert!(sorter.file_validated(&clone).is_err());
        assert!(clone.exists());
    }
}
