//! Excel Workbook implementation.
//!
//! Opens an `.xlsx` package, lists its worksheets from `workbook.xml` and
//! loads individual worksheets through the workbook's relationships.

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::content_type as ct;
use crate::ooxml::opc::constants::relationship_type as rt;
use crate::ooxml::opc::{OpcPackage, PackURI};
use crate::ooxml::xlsx::shared_strings::SharedStrings;
use crate::ooxml::xlsx::worksheet::{Worksheet, WorksheetInfo};

/// An Excel workbook.
#[derive(Debug)]
pub struct Workbook {
    /// The underlying OPC package
    package: OpcPackage,
    /// Partname of `workbook.xml`
    workbook_uri: PackURI,
    /// Worksheets in workbook order
    worksheets: Vec<WorksheetInfo>,
    /// Shared strings table
    shared_strings: SharedStrings,
}

impl Workbook {
    /// Open a workbook from the bytes of an `.xlsx` file.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use edital::ooxml::xlsx::Workbook;
    ///
    /// let data = std::fs::read("itens.xlsx")?;
    /// let workbook = Workbook::from_bytes(&data)?;
    /// let sheet = workbook.first_worksheet()?;
    /// println!("{}: {} rows", sheet.name(), sheet.rows().len());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let package = OpcPackage::from_bytes(data)?;
        let workbook_uri = package.main_document_partname()?;

        let content_type = package.content_type(&workbook_uri)?;
        if content_type != ct::SML_SHEET_MAIN {
            return Err(OoxmlError::InvalidContentType {
                expected: ct::SML_SHEET_MAIN.to_string(),
                got: content_type.to_string(),
            });
        }

        let worksheets = Self::parse_sheets(package.part(&workbook_uri)?)?;

        let shared_strings = match package.related_partname(
            &workbook_uri,
            &[rt::SHARED_STRINGS, rt::SHARED_STRINGS_STRICT],
        )? {
            Some(uri) if package.contains(&uri) => SharedStrings::parse(package.part(&uri)?)?,
            _ => SharedStrings::new(),
        };

        Ok(Self {
            package,
            workbook_uri,
            worksheets,
            shared_strings,
        })
    }

    /// Parse the `<sheets>` list of `workbook.xml`.
    fn parse_sheets(xml: &[u8]) -> Result<Vec<WorksheetInfo>> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut sheets = Vec::new();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(ref e) | Event::Empty(ref e) if e.local_name().as_ref() == b"sheet" => {
                    let mut name = String::new();
                    let mut sheet_id = 0;
                    let mut relationship_id = None;
                    for attr in e.attributes() {
                        let attr = attr?;
                        match attr.key.local_name().as_ref() {
                            b"name" => name = attr.unescape_value()?.into_owned(),
                            b"sheetId" => {
                                sheet_id = atoi_simd::parse::<u32>(attr.value.as_ref()).unwrap_or(0)
                            },
                            // r:id, in whichever namespace prefix the producer chose
                            b"id" if attr.key.prefix().is_some() => {
                                relationship_id = Some(attr.unescape_value()?.into_owned());
                            },
                            _ => {},
                        }
                    }
                    let relationship_id = relationship_id.ok_or_else(|| {
                        OoxmlError::InvalidFormat(format!("sheet '{}' has no relationship id", name))
                    })?;
                    sheets.push(WorksheetInfo {
                        name,
                        relationship_id,
                        sheet_id,
                    });
                },
                Event::Eof => break,
                _ => {},
            }
            buf.clear();
        }

        Ok(sheets)
    }

    /// Get information about every worksheet, in workbook order.
    pub fn worksheets(&self) -> &[WorksheetInfo] {
        &self.worksheets
    }

    /// Load the worksheet at `index` (0-based, workbook order).
    pub fn worksheet(&self, index: usize) -> Result<Worksheet> {
        let info = self
            .worksheets
            .get(index)
            .ok_or_else(|| OoxmlError::PartNotFound(format!("worksheet #{}", index)))?;

        let rels = self.package.relationships(&self.workbook_uri)?;
        let rel = rels.get(&info.relationship_id).ok_or_else(|| {
            OoxmlError::InvalidFormat(format!(
                "worksheet '{}' refers to unknown relationship {}",
                info.name, info.relationship_id
            ))
        })?;
        let uri = rel.target_partname()?;

        Worksheet::parse(info.clone(), self.package.part(&uri)?, &self.shared_strings)
    }

    /// Load the first worksheet.
    pub fn first_worksheet(&self) -> Result<Worksheet> {
        if self.worksheets.is_empty() {
            return Err(OoxmlError::InvalidFormat("workbook has no worksheets".to_string()));
        }
        self.worksheet(0)
    }
}
