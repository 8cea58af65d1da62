//! Scanner configuration.

use std::path::PathBuf;

use crate::cleanup::CleanupOptions;
use crate::extract::ErrorMode;

/// Options controlling a scan.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Directory receiving the output documents (default: next to each input)
    pub output_dir: Option<PathBuf>,

    /// Retry with simple extraction when layout extraction finds nothing
    pub use_fallback: bool,

    /// Run the cleanup steps on simple-extraction text too
    pub apply_cleanup_on_fallback: bool,

    /// Process inputs in lexicographic order instead of listing order
    pub sort_inputs: bool,

    /// Error handling mode for layout extraction
    pub error_mode: ErrorMode,

    /// Cleanup applied to layout-extracted text
    pub cleanup: CleanupOptions,
}

impl ScanOptions {
    /// Create new scan options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Write outputs to the given directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Enable or disable the simple-extraction fallback.
    pub fn with_fallback(mut self, enabled: bool) -> Self {
        self.use_fallback = enabled;
        self
    }

    /// Enable or disable cleanup on the fallback path.
    pub fn with_cleanup_on_fallback(mut self, enabled: bool) -> Self {
        self.apply_cleanup_on_fallback = enabled;
        self
    }

    /// Enable or disable input sorting.
    pub fn with_sorted_inputs(mut self, sorted: bool) -> Self {
        self.sort_inputs = sorted;
        self
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (skip undecodable pages).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Set cleanup options.
    pub fn with_cleanup(mut self, cleanup: CleanupOptions) -> Self {
        self.cleanup = cleanup;
        self
    }
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            output_dir: None,
            use_fallback: true,
            apply_cleanup_on_fallback: false,
            sort_inputs: true,
            error_mode: ErrorMode::Strict,
            cleanup: CleanupOptions::default(),
        }
    }
}
