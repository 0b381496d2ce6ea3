use std::path::PathBuf;

/// Result of the cheap HEAD probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Existence {
    Exists,
    /// 404, or the host could not be reached at all.
    Missing,
}

/// Result of the authenticated GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessCheck {
    Open,
    RequiresAuth,
}

/// Exit classification of an external process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolExit {
    Success,
    Failure { code: Option<i32> },
}

impl ToolExit {
    pub fn from_status(status: std::process::ExitStatus) -> Self {
        if status.success() {
            ToolExit::Success
        } else {
            ToolExit::Failure {
                code: status.code(),
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ToolExit::Success)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Cloned(PathBuf),
    AlreadyExists(PathBuf),
    Failed(String),
}

/// Terminal state of a single URL within one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlDisposition {
    Disabled,
    AlreadyAttempted,
    Invalid,
    RequiresAuth,
    AuthCheckFailed(String),
    AlreadyExists,
    CloneFailed(String),
    Validated,
    NotValidated,
    Errored(String),
}

impl UrlDisposition {
    /// Whether the URL is written to attempted.txt and left alone by later runs.
    pub fn marks_attempted(&self) -> bool {
        matches!(
            self,
            UrlDisposition::CloneFailed(_)
                | UrlDisposition::Validated
                | UrlDisposition::NotValidated
                | UrlDisposition::Errored(_)
        )
    }

    /// Whether the URL counted towards "total attempted" in the run summary.
    pub fn counts_as_attempt(&self) -> bool {
        !matches!(
            self,
            UrlDisposition::Disabled | UrlDisposition::AlreadyAttempted
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total_attempts: usize,
    pub successful: usize,
    pub failed: usize,
    pub invalid: usize,
    pub already_present: usize,
    pub skipped_auth: usize,
}

impl RunSummary {
    pub fn record(&mut self, disposition: &UrlDisposition) {
        if disposition.counts_as_attempt() {
            self.total_attempts += 1;
        }

        match disposition {
            UrlDisposition::Validated => self.successful += 1,
            UrlDisposition::CloneFailed(_)
            | UrlDisposition::NotValidated
            | UrlDisposition::Errored(_) => self.failed += 1,
            UrlDisposition::Invalid => self.invalid += 1,
            UrlDisposition::AlreadyExists => self.already_present += 1,
            UrlDisposition::RequiresAuth | UrlDisposition::AuthCheckFailed(_) => {
                self.skipped_auth += 1
            }
            UrlDisposition::Disabled | UrlDisposition::AlreadyAttempted => {}
        }
    }

    /// No URL was validated and none failed this run.
    ///
    /// Also true for an empty list or a run where every URL was invalid or skipped.
    pub fn everything_already_present(&self) -> bool {
        self.successful == 0 && self.failed == 0
    }
}
