/// DocumentPart - the main document.xml part of a Word document.
use crate::ooxml::docx::table::Table;
use crate::ooxml::error::{OoxmlError, Result};
use quick_xml::Reader;
use quick_xml::events::Event;
use smallvec::SmallVec;

/// The main document part of a Word document.
///
/// This corresponds to the `/word/document.xml` part in the package.
/// It contains the main document content including paragraphs, tables,
/// sections, and other block-level elements.
pub struct DocumentPart<'a> {
    /// The XML of the part
    xml: &'a [u8],
}

impl<'a> DocumentPart<'a> {
    /// Create a DocumentPart over the bytes of `document.xml`.
    pub fn new(xml: &'a [u8]) -> Self {
        Self { xml }
    }

    /// Get the XML bytes of the document.
    #[inline]
    pub fn xml_bytes(&self) -> &'a [u8] {
        self.xml
    }

    /// Get the tables of the document body, in document order.
    ///
    /// Only `<w:tbl>` elements that are direct children of `<w:body>` are
    /// returned. Each table remembers the byte range it occupies in the part,
    /// so callers can splice the part without re-serializing it.
    pub fn tables(&self) -> Result<SmallVec<[Table; 8]>> {
        if memchr::memmem::find(self.xml, b"tbl").is_none() {
            return Ok(SmallVec::new());
        }

        let mut reader = Reader::from_reader(self.xml);

        let mut tables = SmallVec::new();
        let mut depth = 0usize;
        let mut body_depth: Option<usize> = None;
        let mut table_start: Option<usize> = None;
        let mut buf = Vec::with_capacity(1024);

        loop {
            // Every event starts where the previous one ended
            let event_start = reader.buffer_position() as usize;
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    depth += 1;
                    match e.local_name().as_ref() {
                        b"body" if body_depth.is_none() => body_depth = Some(depth),
                        b"tbl"
                            if table_start.is_none() && body_depth.map(|d| d + 1) == Some(depth) =>
                        {
                            table_start = Some(event_start);
                        },
                        _ => {},
                    }
                },
                Ok(Event::Empty(e)) => {
                    if e.local_name().as_ref() == b"tbl" && body_depth == Some(depth) {
                        let end = reader.buffer_position() as usize;
                        tables.push(self.table_at(event_start..end));
                    }
                },
                Ok(Event::End(e)) => {
                    match e.local_name().as_ref() {
                        b"tbl" if body_depth.map(|d| d + 1) == Some(depth) => {
                            if let Some(start) = table_start.take() {
                                let end = reader.buffer_position() as usize;
                                tables.push(self.table_at(start..end));
                            }
                        },
                        b"body" if body_depth == Some(depth) => body_depth = None,
                        _ => {},
                    }
                    depth = depth.saturating_sub(1);
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::Xml(e.to_string())),
                _ => {},
            }
            buf.clear();
        }

        Ok(tables)
    }

    /// Count the body-level tables.
    pub fn table_count(&self) -> Result<usize> {
        Ok(self.tables()?.len())
    }

    fn table_at(&self, span: std::ops::Range<usize>) -> Table {
        Table::new(self.xml[span.clone()].to_vec(), span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#,
        r#"<w:p><w:r><w:t>Intro</w:t></w:r></w:p>"#,
        r#"<w:tbl><w:tr><w:tc><w:p><w:r><w:t>A</w:t></w:r></w:p>"#,
        r#"<w:tbl><w:tr><w:tc><w:p/></w:tc></w:tr></w:tbl><w:p/></w:tc></w:tr></w:tbl>"#,
        r#"<w:sdt><w:sdtContent><w:tbl><w:tr><w:tc><w:p/></w:tc></w:tr></w:tbl></w:sdtContent></w:sdt>"#,
        r#"<w:tbl><w:tr><w:tc><w:p><w:r><w:t>B</w:t></w:r></w:p></w:tc></w:tr></w:tbl>"#,
        r#"<w:sectPr/></w:body></w:document>"#
    );

    #[test]
    fn test_body_tables_only() {
        let part = DocumentPart::new(DOCUMENT.as_bytes());
        let tables = part.tables().unwrap();
        assert_eq!(tables.len(), 2);
        assert_eq!(part.table_count().unwrap(), 2);
        assert_eq!(tables[0].cell_texts().unwrap()[0][0], "A");
        assert_eq!(tables[1].cell_texts().unwrap()[0][0], "B");
    }

    #[test]
    fn test_spans_cover_whole_elements() {
        let part = DocumentPart::new(DOCUMENT.as_bytes());
        for table in part.tables().unwrap() {
            let slice = &DOCUMENT.as_bytes()[table.span()];
            assert!(slice.starts_with(b"<w:tbl>"));
            assert!(slice.ends_with(b"</w:tbl>"));
            assert_eq!(slice, table.xml_bytes());
        }
    }

    #[test]
    fn test_document_without_tables() {
        let xml = br#"<w:document><w:body><w:p/></w:body></w:document>"#;
        assert!(DocumentPart::new(xml).tables().unwrap().is_empty());
    }
}
