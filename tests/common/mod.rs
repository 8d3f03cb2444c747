use std::io::Cursor;

/// Cell value for test XLSX generation.
pub enum TestCell {
    Str(&'static str),
    Num(f64),
    Bool(bool),
    Empty,
}

/// Convert a 0-based column index to an Excel column letter (A-Z) for test XML.
fn test_col_letter(col: usize) -> char {
    (b'A' + col as u8) as char
}

/// Build a minimal XLSX file in memory from the given sheet definitions.
pub fn build_test_xlsx(sheets: &[(&str, &[&[TestCell]])]) -> Vec<u8> {
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    let buf = Vec::new();
    let mut zip = ZipWriter::new(Cursor::new(buf));
    let opts = SimpleFileOptions::default();

    // [Content_Types].xml
    let mut ct = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\
         <Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>\
         <Default Extension=\"xml\" ContentType=\"application/xml\"/>\
         <Override PartName=\"/xl/workbook.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml\"/>",
    );
    for (i, _) in sheets.iter().enumerate() {
        ct.push_str(&format!(
            "<Override PartName=\"/xl/worksheets/sheet{}.xml\" \
             ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml\"/>",
            i + 1
        ));
    }
    ct.push_str("</Types>");
    zip.start_file("[Content_Types].xml", opts).unwrap();
    zip.write_all(ct.as_bytes()).unwrap();

    // _rels/.rels
    zip.start_file("_rels/.rels", opts).unwrap();
    zip.write_all(
        b"<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
          <Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
          <Relationship Id=\"rId1\" \
          Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument\" \
          Target=\"xl/workbook.xml\"/>\
          </Relationships>",
    )
    .unwrap();

    // xl/workbook.xml
    let mut wb = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <workbook xmlns=\"http://schemas.openxmlformats.org/spreadsheetml/2006/main\" \
         xmlns:r=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships\">\
         <sheets>",
    );
    for (i, (name, _)) in sheets.iter().enumerate() {
        wb.push_str(&format!(
            "<sheet name=\"{name}\" sheetId=\"{}\" r:id=\"rId{}\"/>",
            i + 1,
            i + 1
        ));
    }
    wb.push_str("</sheets></workbook>");
    zip.start_file("xl/workbook.xml", opts).unwrap();
    zip.write_all(wb.as_bytes()).unwrap();

    // xl/_rels/workbook.xml.rels
    let mut rels = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">",
    );
    for (i, _) in sheets.iter().enumerate() {
        rels.push_str(&format!(
            "<Relationship Id=\"rId{}\" \
             Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet\" \
             Target=\"worksheets/sheet{}.xml\"/>",
            i + 1,
            i + 1
        ));
    }
    rels.push_str("</Relationships>");
    zip.start_file("xl/_rels/workbook.xml.rels", opts).unwrap();
    zip.write_all(rels.as_bytes()).unwrap();

    // Each worksheet
    for (i, (_, rows)) in sheets.iter().enumerate() {
        let mut ws = String::from(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
             <worksheet xmlns=\"http://schemas.openxmlformats.org/spreadsheetml/2006/main\">\
             <sheetData>",
        );
        for (ri, row) in rows.iter().enumerate() {
            ws.push_str(&format!("<row r=\"{}\">", ri + 1));
            for (ci, cell) in row.iter().enumerate() {
                let col = test_col_letter(ci);
                let r = ri + 1;
                match cell {
                    TestCell::Str(s) => {
                        let escaped = s
                            .replace('&', "&amp;")
                            .replace('<', "&lt;")
                            .replace('>', "&gt;")
                            .replace('"', "&quot;");
                        ws.push_str(&format!(
                            "<c r=\"{col}{r}\" t=\"inlineStr\"><is><t>{escaped}</t></is></c>"
                        ));
                    }
                    TestCell::Num(f) => {
                        ws.push_str(&format!("<c r=\"{col}{r}\"><v>{f}</v></c>"));
                    }
                    TestCell::Bool(b) => {
                        let v = if *b { 1 } else { 0 };
                        ws.push_str(&format!("<c r=\"{col}{r}\" t=\"b\"><v>{v}</v></c>"));
                    }
                    TestCell::Empty => {}
                }
            }
            ws.push_str("</row>");
        }
        ws.push_str("</sheetData></worksheet>");
        zip.start_file(format!("xl/worksheets/sheet{}.xml", i + 1), opts)
            .unwrap();
        zip.write_all(ws.as_bytes()).unwrap();
    }

    let cursor = zip.finish().unwrap();
    cursor.into_inner()
}
