//! Minimal but well-formed OOXML packages built with the crate's own writer.

use crate::common::escape_xml;
use crate::common::parse_number;
use crate::ooxml::opc::PackURI;
use crate::ooxml::opc::constants::{content_type as ct, namespace as ns, relationship_type as rt};
use crate::ooxml::opc::phys_pkg::PhysPkgWriter;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

const STYLES_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#,
    r#"<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/></w:style>"#,
    r#"<w:style w:type="table" w:default="1" w:styleId="TableNormal"><w:name w:val="Normal Table"/></w:style>"#,
    r#"<w:style w:type="table" w:styleId="TableGrid"><w:name w:val="Table Grid"/><w:basedOn w:val="TableNormal"/></w:style>"#,
    r#"</w:styles>"#
);

fn write_parts(parts: &[(&str, String)]) -> Vec<u8> {
    let mut writer = PhysPkgWriter::new();
    for (name, xml) in parts {
        writer
            .write(&PackURI::new(*name).unwrap(), xml.as_bytes())
            .unwrap();
    }
    writer.finish().unwrap()
}

fn relationships(rels: &[(&str, &str, &str)]) -> String {
    let mut xml = format!(
        r#"{}<Relationships xmlns="{}">"#,
        XML_DECLARATION,
        ns::OPC_RELATIONSHIPS
    );
    for (id, reltype, target) in rels {
        xml.push_str(&format!(
            r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#,
            id, reltype, target
        ));
    }
    xml.push_str("</Relationships>");
    xml
}

fn content_types(overrides: &[(&str, &str)]) -> String {
    let mut xml = format!(
        r#"{}<Types xmlns="{}"><Default Extension="rels" ContentType="{}"/><Default Extension="xml" ContentType="{}"/>"#,
        XML_DECLARATION,
        ns::OPC_CONTENT_TYPES,
        ct::OPC_RELATIONSHIPS,
        ct::XML
    );
    for (partname, content_type) in overrides {
        xml.push_str(&format!(
            r#"<Override PartName="{}" ContentType="{}"/>"#,
            partname, content_type
        ));
    }
    xml.push_str("</Types>");
    xml
}

fn document_xml(tables: &[String]) -> String {
    let mut xml = format!(
        r#"{}<w:document xmlns:w="{}"><w:body><w:p><w:r><w:t>Termo de referência</w:t></w:r></w:p>"#,
        XML_DECLARATION,
        ns::WML_MAIN
    );
    for table in tables {
        xml.push_str(table);
        xml.push_str("<w:p/>");
    }
    xml.push_str("<w:sectPr/></w:body></w:document>");
    xml
}

/// A Word document whose body holds `tables`, each followed by an empty
/// paragraph. Its styles define `TableGrid`.
pub fn docx(tables: &[String]) -> Vec<u8> {
    write_parts(&[
        (
            "/[Content_Types].xml",
            content_types(&[
                ("/word/document.xml", ct::WML_DOCUMENT_MAIN),
                ("/word/styles.xml", ct::WML_STYLES),
            ]),
        ),
        (
            "/_rels/.rels",
            relationships(&[("rId1", rt::OFFICE_DOCUMENT, "word/document.xml")]),
        ),
        ("/word/document.xml", document_xml(tables)),
        (
            "/word/_rels/document.xml.rels",
            relationships(&[("rId1", rt::STYLES, "styles.xml")]),
        ),
        ("/word/styles.xml", STYLES_XML.to_string()),
    ])
}

/// A Word document without a styles part.
pub fn docx_without_styles(tables: &[String]) -> Vec<u8> {
    write_parts(&[
        (
            "/[Content_Types].xml",
            content_types(&[("/word/document.xml", ct::WML_DOCUMENT_MAIN)]),
        ),
        (
            "/_rels/.rels",
            relationships(&[("rId1", rt::OFFICE_DOCUMENT, "word/document.xml")]),
        ),
        ("/word/document.xml", document_xml(tables)),
    ])
}

/// A `<w:tbl>` element with one text paragraph per cell. Empty strings give
/// empty paragraphs.
pub fn table(rows: &[&[&str]]) -> String {
    let columns = rows.iter().map(|r| r.len()).max().unwrap_or(0);
    let mut xml = String::from(r#"<w:tbl><w:tblPr><w:tblW w:w="0" w:type="auto"/></w:tblPr><w:tblGrid>"#);
    for _ in 0..columns {
        xml.push_str(r#"<w:gridCol w:w="2000"/>"#);
    }
    xml.push_str("</w:tblGrid>");
    for row in rows {
        xml.push_str("<w:tr>");
        for cell in row.iter() {
            if cell.is_empty() {
                xml.push_str("<w:tc><w:p/></w:tc>");
            } else {
                xml.push_str(&format!(
                    "<w:tc><w:p><w:r><w:t>{}</w:t></w:r></w:p></w:tc>",
                    escape_xml(cell)
                ));
            }
        }
        xml.push_str("</w:tr>");
    }
    xml.push_str("</w:tbl>");
    xml
}

/// A workbook with one sheet, `Planilha1`, holding `rows` from A1.
///
/// Cells that parse as numbers are written as numbers, other non-empty text
/// through the shared strings table, and empty strings are left out.
pub fn xlsx(rows: &[&[&str]]) -> Vec<u8> {
    let mut strings: Vec<&str> = Vec::new();
    let mut sheet = format!(
        r#"{}<worksheet xmlns="{}"><sheetData>"#,
        XML_DECLARATION,
        ns::SML_MAIN
    );
    for (r, row) in rows.iter().enumerate() {
        sheet.push_str(&format!(r#"<row r="{}">"#, r + 1));
        for (c, text) in row.iter().enumerate() {
            let reference = format!(
                "{}{}",
                crate::ooxml::xlsx::cell::column_to_letters(c as u32 + 1),
                r + 1
            );
            if text.is_empty() {
                continue;
            }
            if parse_number(text).is_some() {
                sheet.push_str(&format!(r#"<c r="{}"><v>{}</v></c>"#, reference, text));
            } else {
                let index = match strings.iter().position(|s| s == text) {
                    Some(i) => i,
                    None => {
                        strings.push(*text);
                        strings.len() - 1
                    },
                };
                sheet.push_str(&format!(r#"<c r="{}" t="s"><v>{}</v></c>"#, reference, index));
            }
        }
        sheet.push_str("</row>");
    }
    sheet.push_str("</sheetData></worksheet>");

    let mut shared = format!(
        r#"{}<sst xmlns="{}" count="{}" uniqueCount="{}">"#,
        XML_DECLARATION,
        ns::SML_MAIN,
        strings.len(),
        strings.len()
    );
    for s in &strings {
        shared.push_str(&format!("<si><t>{}</t></si>", escape_xml(s)));
    }
    shared.push_str("</sst>");

    let workbook = format!(
        r#"{}<workbook xmlns="{}" xmlns:r="{}"><sheets><sheet name="Planilha1" sheetId="1" r:id="rId1"/></sheets></workbook>"#,
        XML_DECLARATION,
        ns::SML_MAIN,
        ns::OFC_RELATIONSHIPS
    );

    write_parts(&[
        (
            "/[Content_Types].xml",
            content_types(&[
                ("/xl/workbook.xml", ct::SML_SHEET_MAIN),
                ("/xl/worksheets/sheet1.xml", ct::SML_WORKSHEET),
                ("/xl/sharedStrings.xml", ct::SML_SHARED_STRINGS),
            ]),
        ),
        (
            "/_rels/.rels",
            relationships(&[("rId1", rt::OFFICE_DOCUMENT, "xl/workbook.xml")]),
        ),
        ("/xl/workbook.xml", workbook),
        (
            "/xl/_rels/workbook.xml.rels",
            relationships(&[
                ("rId1", rt::WORKSHEET, "worksheets/sheet1.xml"),
                ("rId2", rt::SHARED_STRINGS, "sharedStrings.xml"),
            ]),
        ),
        ("/xl/worksheets/sheet1.xml", sheet),
        ("/xl/sharedStrings.xml", shared),
    ])
}
