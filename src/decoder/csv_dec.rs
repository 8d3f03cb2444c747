use crate::decoder::{DecodeResult, Decoder};
use crate::error::AnalyzeError;

/// Decodes delimited text by taking the first field of each record, the same
/// column rule the spreadsheet decoder applies. Rows whose first field is
/// blank are skipped. The delimiter is fixed per instance; the comma and tab
/// variants register separately for `.csv` and `.tsv`.
pub struct CsvDecoder {
    delimiter: u8,
}

impl CsvDecoder {
    /// Comma-delimited decoder for `.csv` files.
    pub fn comma() -> Self {
        Self { delimiter: b',' }
    }

    /// Tab-delimited decoder for `.tsv` files.
    pub fn tab() -> Self {
        Self { delimiter: b'\t' }
    }
}

impl Decoder for CsvDecoder {
    fn supported_extensions(&self) -> &[&str] {
        if self.delimiter == b'\t' {
            &["tsv"]
        } else {
            &["csv"]
        }
    }

    fn decode(&self, data: &[u8]) -> Result<DecodeResult, AnalyzeError> {
        let text = String::from_utf8(data.to_vec())?;
        let text = text.strip_prefix('\u{FEFF}').unwrap_or(&text);

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter)
            .from_reader(text.as_bytes());

        let mut names = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| AnalyzeError::MalformedDocument {
                reason: format!("failed to parse CSV row: {e}"),
            })?;
            if let Some(first) = record.get(0) {
                if !first.trim().is_empty() {
                    names.push(first.to_string());
                }
            }
        }

        Ok(DecodeResult {
            content: names.join("\n"),
            warnings: Vec::new(),
        })
    }
}
