pub mod decoder;
pub mod detection;
pub mod engine;
pub mod error;
pub mod report;

pub use engine::gemini;
pub use engine::{
    analyze_content, extract_entries, AnalyzeOptions, AnalyzeReport, AnalyzeWarning,
    DuplicateRecord, ExactMatcher, NameMatcher, RawEntry, WarningCode,
};
pub use error::AnalyzeError;

use std::path::Path;

/// Analyze a name list file at the given path for duplicates.
///
/// The format is auto-detected from magic bytes and file extension.
pub fn analyze_file(
    path: impl AsRef<Path>,
    options: &AnalyzeOptions,
) -> Result<AnalyzeReport, AnalyzeError> {
    let path = path.as_ref();
    let data = std::fs::read(path)?;

    let header = &data[..data.len().min(16)];
    let format = detection::detect_format(path, header);

    // For ZIP containers, introspect to find the specific workbook type
    let format = match format {
        Some("zip") => detection::detect_zip_format(&data),
        other => other,
    };

    let extension =
        format.unwrap_or_else(|| path.extension().and_then(|e| e.to_str()).unwrap_or(""));

    analyze_bytes(&data, extension, options)
}

/// Analyze raw file bytes with an explicit format extension.
pub fn analyze_bytes(
    data: &[u8],
    extension: &str,
    options: &AnalyzeOptions,
) -> Result<AnalyzeReport, AnalyzeError> {
    for decoder in decoder::decoders() {
        if decoder.can_decode(extension) {
            let decoded = decoder.decode(data)?;
            if options.strict {
                if let Some(w) = decoded.warnings.first() {
                    return Err(AnalyzeError::MalformedDocument {
                        reason: w.message.clone(),
                    });
                }
            }
            let mut report = engine::analyze_content(&decoded.content, options)?;
            report.warnings = decoded.warnings;
            return Ok(report);
        }
    }

    Err(AnalyzeError::UnsupportedFormat {
        extension: extension.to_string(),
    })
}
