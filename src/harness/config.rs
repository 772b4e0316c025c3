//! Harness configuration
//!
//! Defaults follow the classic autorunner layout: a 60-column name field and one line per completed test.

/// How much live progress the console reporter prints while tests run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Progress {
    /// No per-test lines; only the final report.
    Quiet,
    /// One line per completed test.
    #[default]
    Completed,
    /// A line when each test starts, plus one per completed test.
    Verbose,
}

/// Harness configuration
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Width of the left-aligned test name column
    pub name_width: usize,
    /// Live progress level
    pub progress: Progress,
    /// Only run tests whose name contains this keyword
    pub filter: Option<String>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            name_width: 60,
            progress: Progress::Completed,
            filter: None,
        }
    }
}

impl HarnessConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the name column width
    pub fn with_name_width(mut self, width: usize) -> Self {
        self.name_width = width;
        self
    }

    /// Set the progress level
    pub fn with_progress(mut self, progress: Progress) -> Self {
        self.progress = progress;
        self
    }

    /// Restrict the run to tests whose name contains `keyword`
    pub fn with_filter(mut self, keyword: impl Into<String>) -> Self {
        self.filter = Some(keyword.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HarnessConfig::default();
        assert_eq!(config.name_width, 60);
        assert_eq!(config.progress, Progress::Completed);
        assert!(config.filter.is_none());
    }

    #[test]
    fn test_builder_chain() {
        let config = HarnessConfig::new()
            .with_name_width(20)
            .with_progress(Progress::Quiet)
            .with_filter("integer");
        assert_eq!(config.name_width, 20);
        assert_eq!(config.progress, Progress::Quiet);
        assert_eq!(config.filter.as_deref(), Some("integer"));
    }
}
