pub mod csv_dec;
pub mod plain_text;
pub mod spreadsheet;

use crate::engine::{AnalyzeWarning, WarningCode};
use crate::error::AnalyzeError;

/// The result of decoding an input file into analyzable text.
#[derive(Debug, Clone, Default)]
pub struct DecodeResult {
    /// Candidate name entries, one per line.
    pub content: String,
    /// Recoverable issues encountered while decoding.
    pub warnings: Vec<AnalyzeWarning>,
}

/// Trait implemented by each format-specific decoder.
pub trait Decoder {
    /// Returns the file extensions this decoder supports (e.g., `["csv"]`).
    fn supported_extensions(&self) -> &[&str];

    /// Check if this decoder can handle the given extension.
    fn can_decode(&self, extension: &str) -> bool {
        self.supported_extensions().contains(&extension)
    }

    /// Decode file bytes into newline-separated name entries.
    fn decode(&self, data: &[u8]) -> Result<DecodeResult, AnalyzeError>;
}

/// Decode raw bytes to text, sniffing the encoding.
///
/// A BOM selects the encoding outright. Otherwise strict UTF-8 is attempted,
/// falling back to Windows-1252 with a warning. The BOM itself is never part
/// of the returned text.
pub(crate) fn decode_text(data: &[u8]) -> (String, Option<AnalyzeWarning>) {
    if let Some((encoding, bom_len)) = encoding_rs::Encoding::for_bom(data) {
        let (text, _) = encoding.decode_without_bom_handling(&data[bom_len..]);
        let warning = if encoding == encoding_rs::UTF_8 {
            None
        } else {
            Some(AnalyzeWarning {
                code: WarningCode::UnsupportedFeature,
                message: format!("input decoded as {}", encoding.name()),
                location: None,
            })
        };
        return (text.into_owned(), warning);
    }

    match std::str::from_utf8(data) {
        Ok(text) => (text.to_string(), None),
        Err(_) => {
            let (text, _, _) = encoding_rs::WINDOWS_1252.decode(data);
            (
                text.into_owned(),
                Some(AnalyzeWarning {
                    code: WarningCode::UnsupportedFeature,
                    message: "input is not valid UTF-8; decoded as Windows-1252".to_string(),
                    location: None,
                }),
            )
        }
    }
}

/// The built-in decoders, in lookup order.
pub(crate) fn decoders() -> Vec<Box<dyn Decoder>> {
    vec![
        Box::new(plain_text::PlainTextDecoder),
        Box::new(csv_dec::CsvDecoder::comma()),
        Box::new(csv_dec::CsvDecoder::tab()),
        Box::new(spreadsheet::SpreadsheetDecoder),
    ]
}
