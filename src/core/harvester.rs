use crate::config::HarvestSettings;
use crate::core::progress::{remove_empty_dirs, AttemptedList};
use crate::core::sorter::{repo_dir_name, timestamp, Sorter};
use crate::core::url_list::{self, is_disabled};
use crate::domain::model::{AccessCheck, Existence, FetchOutcome, RunSummary, ToolExit, UrlDisposition};
use crate::domain::ports::{RepoFetcher, TemplateValidator, TokenSource, UrlProbe};
use crate::utils::error::Result;
use std::collections::HashSet;
use std::fs;

/// Drives every URL of the input list through probe, clone, validate and sort.
///
/// URLs are handled strictly one after another. A single URL never aborts the
/// batch; only workspace-level I/O errors are returned from [`Harvester::run`].
pub struct Harvester<P, F, V, T>
where
    P: UrlProbe,
    F: RepoFetcher,
    V: TemplateValidator,
    T: TokenSource,
{
    settings: HarvestSettings,
    sorter: Sorter,
    probe: P,
    fetcher: F,
    validator: V,
    tokens: T,
}

impl<P, F, V, T> Harvester<P, F, V, T>
where
    P: UrlProbe,
    F: RepoFetcher,
    V: TemplateValidator,
    T: TokenSource,
{
    pub fn new(settings: HarvestSettings, probe: P, fetcher: F, validator: V, tokens: T) -> Self {
        let sorter = Sorter::new(&settings);
        Self {
            settings,
            sorter,
            probe,
            fetcher,
            validator,
            tokens,
        }
    }

    pub fn settings(&self) -> &HarvestSettings {
        &self.settings
    }

    pub async fn run(&self) -> Result<RunSummary> {
        let console = &self.settings.console;
        fs::create_dir_all(self.settings.root())?;

        let urls = url_list::read_url_list(&self.settings.input_file)?;
        if self.settings.backup_input {
            url_list::backup(&self.settings.input_file, self.settings.backup_file())?;
        }

        let mut attempted = AttemptedList::load(self.settings.attempted_file())?;

        console.headline(&format!(
            "Cloning {} Nuclei templates repositories...",
            url_list::enabled_count(&urls)
        ));
        tracing::info!(
            "Processing {} lines from {} ({} previously attempted)",
            urls.len(),
            self.settings.input_file.display(),
            attempted.len()
        );

        let token = self.tokens.token()?;

        let mut summary = RunSummary::default();
        // First occurrence wins; later copies of a line never reach the network.
        let mut seen: HashSet<&str> = HashSet::new();
        for (index, url) in urls.iter().enumerate() {
            let disposition = if !is_disabled(url) && !seen.insert(url.as_str()) {
                UrlDisposition::AlreadyAttempted
            } else {
                self.process_url(index, url, &token, &attempted).await
            };
            tracing::debug!("{} -> {:?}", url, disposition);

            if disposition.marks_attempted() {
                attempted.record(url);
            }
            summary.record(&disposition);
        }

        attempted.persist()?;
        remove_empty_dirs(self.settings.root())?;

        tracing::info!(
            "Run finished: {} attempted, {} validated, {} failed, {} invalid",
            summary.total_attempts,
            summary.successful,
            summary.failed,
            summary.invalid
        );
        Ok(summary)
    }

    /// Take one line of the input list to its terminal state for this run.
    pub async fn process_url(
        &self,
        index: usize,
        url: &str,
        token: &str,
        attempted: &AttemptedList,
    ) -> UrlDisposition {
        let console = &self.settings.console;

        if is_disabled(url) {
            return UrlDisposition::Disabled;
        }
        if attempted.contains(url) {
            return UrlDisposition::AlreadyAttempted;
        }

        if self.probe.existence(url).await == Existence::Missing {
            console.failure(&format!("URL not valid: {}", console.url(url)));
            if let Err(e) = url_list::comment_out(&self.settings.input_file, url) {
                tracing::error!(
                    "Could not disable {} in {}: {}",
                    url,
                    self.settings.input_file.display(),
                    e
                );
            }
            return UrlDisposition::Invalid;
        }

        match self.probe.access(url, token).await {
            Ok(AccessCheck::Open) => {}
            Ok(AccessCheck::RequiresAuth) => {
                console.failure(&format!(
                    "URL requires authentication or is a private repository, skipping: {}",
                    console.url(url)
                ));
                return UrlDisposition::RequiresAuth;
            }
            Err(e) => {
                console.failure(&format!(
                    "Could not check access for {}, skipping: {}",
                    console.url(url),
                    e
                ));
                return UrlDisposition::AuthCheckFailed(e.to_string());
            }
        }

        let timestamp = timestamp();
        let repo_dir = match self.fetch(index, url, &timestamp).await {
            FetchOutcome::Cloned(dir) => dir,
            FetchOutcome::AlreadyExists(_) => return UrlDisposition::AlreadyExists,
            FetchOutcome::Failed(reason) => return UrlDisposition::CloneFailed(reason),
        };

        console.success(&format!(
            "Validating {} using 'nuclei -validate'",
            console.url(url)
        ));
        let validation = match self.validator.validate(&repo_dir).await {
            Ok(exit) => exit,
            Err(e) => {
                tracing::warn!("Validation of {} could not run: {}", url, e);
                ToolExit::Failure { code: None }
            }
        };

        if validation.is_success() {
            match self.sorter.file_validated(&repo_dir) {
                Ok(dest) => {
                    console.success(&format!("Successful validation {}", url));
                    tracing::debug!("Filed {} as validated at {}", url, dest.display());
                    UrlDisposition::Validated
                }
                Err(e) => {
                    console.failure(&format!("Could not file {}: {}", url, e));
                    UrlDisposition::Errored(e.to_string())
                }
            }
        } else {
            console.failure(&format!("Failed validation for {}", url));
            match self.sorter.file_not_validated(&repo_dir, &timestamp, url) {
                Ok(_) => UrlDisposition::NotValidated,
                Err(e) => {
                    console.failure(&format!("Could not file {}: {}", url, e));
                    UrlDisposition::Errored(e.to_string())
                }
            }
        }
    }

    /// Shallow-clone `url` into `<root>/<name>_<index>` unless that directory exists.
    pub async fn fetch(&self, index: usize, url: &str, timestamp: &str) -> FetchOutcome {
        let console = &self.settings.console;
        let dir_name = repo_dir_name(url, index);
        let target = self.settings.clone_target(&dir_name);

        if target.exists() {
            console.info(&format!("Repository {} already exists. Skipping.", dir_name));
            return FetchOutcome::AlreadyExists(target);
        }

        console.success(&format!("Cloning {} into {}", console.url(url), dir_name));
        let reason = match self.fetcher.shallow_clone(url, &target).await {
            Ok(ToolExit::Success) => {
                console.notice(&format!("[+] Successful cloning {}", url));
                if let Err(e) = self.sorter.record_clone_success(timestamp, url) {
                    tracing::error!("Could not record clone of {}: {}", url, e);
                }
                return FetchOutcome::Cloned(target);
            }
            Ok(ToolExit::Failure { code: Some(code) }) => format!("git exited with status {}", code),
            Ok(ToolExit::Failure { code: None }) => "git was terminated by a signal".to_string(),
            Err(e) => e.to_string(),
        };

        console.failure(&format!("Failed cloning repo {}. Reason: {}", url, reason));
        if let Err(e) = self.sorter.record_clone_failure(timestamp, url) {
            tracing::error!("Could not record failed clone of {}: {}", url, e);
        }
        FetchOutcome::Failed(reason)
    }

    /// Print the end-of-run counters.
    pub fn report(&self, summary: &RunSummary) {
        let console = &self.settings.console;
        println!();
        println!("Total attempted downloads: {}", summary.total_attempts);
        console.success(&format!("Successful downloads: {}", summary.successful));
        console.failure(&format!("Failed downloads: {}", summary.failed));
        console.failure(&format!("Ignored invalid URLs: {}", summary.invalid));

        if summary.everything_already_present() {
            console.notice("All repositories from the list are already downloaded!");
        }
    }
}
