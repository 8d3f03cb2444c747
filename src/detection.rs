use std::path::Path;

/// Magic bytes signatures for supported container formats.
const ZIP_MAGIC: &[u8] = &[0x50, 0x4B, 0x03, 0x04];
const OLE_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0];

/// Detect the input format from a file path and optional header bytes.
///
/// Priority: magic bytes → file extension.
/// ZIP containers (XLSX, ODS) cannot be told apart from the header alone;
/// the caller should use `detect_zip_format` on the full file data.
pub fn detect_format(path: &Path, header_bytes: &[u8]) -> Option<&'static str> {
    if header_bytes.len() >= 4 {
        if header_bytes.starts_with(ZIP_MAGIC) {
            return Some("zip");
        }
        if header_bytes.starts_with(OLE_MAGIC) {
            // Legacy OLE compound file; for our purposes that means XLS.
            return Some("xls");
        }
    }

    detect_by_extension(path)
}

/// Detect the specific format of a ZIP-based file by inspecting its internal paths.
///
/// Returns "xlsx" or "ods" based on the presence of characteristic internal
/// files. Returns None if the ZIP does not match a known workbook format.
pub fn detect_zip_format(data: &[u8]) -> Option<&'static str> {
    let cursor = std::io::Cursor::new(data);
    let mut archive = zip::ZipArchive::new(cursor).ok()?;

    for i in 0..archive.len() {
        if let Ok(file) = archive.by_index_raw(i) {
            let name = file.name();
            if name.starts_with("xl/") {
                return Some("xlsx");
            }
            if name == "content.xml" || name == "mimetype" {
                return Some("ods");
            }
        }
    }

    None
}

/// Detect format by file extension alone.
fn detect_by_extension(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "xlsx" => Some("xlsx"),
        "xls" => Some("xls"),
        "ods" => Some("ods"),
        "csv" => Some("csv"),
        "tsv" => Some("tsv"),
        "txt" | "text" | "list" | "log" => Some("txt"),
        _ => None,
    }
}
