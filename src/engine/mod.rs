pub mod exact;
pub mod gemini;

use std::sync::Arc;

use crate::error::AnalyzeError;

pub use exact::ExactMatcher;

/// Categories for recoverable analysis warnings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarningCode {
    SkippedElement,
    UnsupportedFeature,
    MalformedSegment,
}

/// A recoverable issue encountered while decoding or analyzing input.
#[derive(Debug, Clone)]
pub struct AnalyzeWarning {
    pub code: WarningCode,
    pub message: String,
    pub location: Option<String>,
}

/// One non-blank input line, exactly as it appeared in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    /// Original line text, casing and internal spacing preserved.
    pub text: String,
    /// 0-based position within the filtered (non-blank) line sequence.
    pub source_index: usize,
}

/// One recurring name: the first form it appeared in, and how often it occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateRecord {
    /// Trimmed, original-case text of the first line mapping to this name.
    pub display_name: String,
    /// Number of input lines mapping to this name. Always >= 2 in reports.
    pub count: u64,
}

/// Strategy for grouping raw entries into duplicate records.
///
/// Implementations must preserve first-appearance order and report only
/// names that occur more than once. The deterministic [`ExactMatcher`] is
/// the default; alternates (e.g. the Gemini matcher, which merges
/// near-spellings) are opt-in and selected explicitly by the caller.
pub trait NameMatcher: Send + Sync {
    fn group(&self, entries: &[RawEntry]) -> Result<Vec<DuplicateRecord>, AnalyzeError>;
}

/// Async counterpart of [`NameMatcher`], for callers already inside a runtime.
#[cfg(feature = "async-gemini")]
pub trait AsyncNameMatcher: Send + Sync {
    fn group<'a>(
        &'a self,
        entries: &'a [RawEntry],
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Vec<DuplicateRecord>, AnalyzeError>> + Send + 'a>,
    >;
}

/// Options controlling analysis behavior.
#[derive(Clone)]
pub struct AnalyzeOptions {
    /// Hard cap on content size in bytes. 0 disables the ceiling.
    pub max_content_bytes: usize,
    /// Grouping strategy. `None` uses [`ExactMatcher`].
    pub matcher: Option<Arc<dyn NameMatcher>>,
    /// If true, return an error on recoverable decode issues instead of warnings.
    pub strict: bool,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            max_content_bytes: 5 * 1024 * 1024, // 5 MiB
            matcher: None,
            strict: false,
        }
    }
}

impl std::fmt::Debug for AnalyzeOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyzeOptions")
            .field("max_content_bytes", &self.max_content_bytes)
            .field("matcher", &self.matcher.as_ref().map(|_| "<custom>"))
            .field("strict", &self.strict)
            .finish()
    }
}

/// The result of analyzing a name list.
#[derive(Debug, Clone, Default)]
pub struct AnalyzeReport {
    /// Names occurring more than once, in first-appearance order.
    pub duplicates: Vec<DuplicateRecord>,
    /// Number of non-blank lines that were analyzed.
    pub total_entries: usize,
    /// Recoverable issues encountered while decoding the input.
    pub warnings: Vec<AnalyzeWarning>,
}

/// Split decoded content into candidate name entries.
///
/// Splits on `\n` / `\r\n`, drops lines whose trimmed content is empty, and
/// indexes entries over the filtered sequence. Never fails: any input,
/// including the empty string, yields a (possibly empty) sequence.
pub fn extract_entries(content: &str) -> Vec<RawEntry> {
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .enumerate()
        .map(|(source_index, line)| RawEntry {
            text: line.to_string(),
            source_index,
        })
        .collect()
}

/// Analyze decoded content for duplicate names.
///
/// Empty content is rejected with [`AnalyzeError::EmptyInput`] before
/// extraction, so "file had bytes but every line was blank" still yields an
/// empty `Ok` report while "no content at all" does not. Content above the
/// configured byte ceiling is rejected with [`AnalyzeError::PayloadTooLarge`].
pub fn analyze_content(
    content: &str,
    options: &AnalyzeOptions,
) -> Result<AnalyzeReport, AnalyzeError> {
    if content.is_empty() {
        return Err(AnalyzeError::EmptyInput);
    }
    if options.max_content_bytes > 0 && content.len() > options.max_content_bytes {
        return Err(AnalyzeError::PayloadTooLarge {
            size: content.len(),
            limit: options.max_content_bytes,
        });
    }

    let entries = extract_entries(content);
    let duplicates = match &options.matcher {
        Some(matcher) => matcher.group(&entries)?,
        None => ExactMatcher.group(&entries)?,
    };

    Ok(AnalyzeReport {
        duplicates,
        total_entries: entries.len(),
        warnings: Vec::new(),
    })
}
