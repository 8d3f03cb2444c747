use crate::decoder::{DecodeResult, Decoder};
use crate::error::AnalyzeError;

pub struct PlainTextDecoder;

impl Decoder for PlainTextDecoder {
    fn supported_extensions(&self) -> &[&str] {
        &["txt", "text", "list", "log"]
    }

    fn decode(&self, data: &[u8]) -> Result<DecodeResult, AnalyzeError> {
        let (content, warning) = super::decode_text(data);
        let mut warnings = Vec::new();
        if let Some(w) = warning {
            warnings.push(w);
        }
        Ok(DecodeResult { content, warnings })
    }
}
