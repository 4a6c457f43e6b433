use std::error::Error;

/// The catch-all error type used by functions that combine several sources
/// of failure, e.g., reading files and parsing their contents.
pub type BuchiError = Box<dyn Error + Send + Sync>;
