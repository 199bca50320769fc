/// Package implementation for Word documents.
use crate::ooxml::docx::parts::DocumentPart;
use crate::ooxml::docx::styles::Styles;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::content_type as ct;
use crate::ooxml::opc::constants::relationship_type as rt;
use crate::ooxml::opc::{OpcPackage, PackURI};

/// Main-part content types accepted as Word documents.
const WORD_MAIN_TYPES: [&str; 2] = [ct::WML_DOCUMENT_MAIN, ct::WML_TEMPLATE_MAIN];

/// A Word (.docx) package.
///
/// This is the main entry point for working with Word documents.
/// It wraps an OPC package and provides Word-specific functionality.
///
/// # Examples
///
/// ```rust,no_run
/// use edital::ooxml::docx::Package;
///
/// let data = std::fs::read("termo.docx")?;
/// let pkg = Package::from_bytes(&data)?;
/// println!("{} tables", pkg.document()?.table_count()?);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Package {
    /// The underlying OPC package
    opc: OpcPackage,
    /// Partname of the main document part
    main: PackURI,
}

impl Package {
    /// Load a .docx package from its bytes.
    ///
    /// Fails unless the package's officeDocument relationship points at a
    /// WordprocessingML main document part.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let opc = OpcPackage::from_bytes(data)?;

        let main = opc
            .main_document_partname()
            .map_err(|e| OoxmlError::PartNotFound(format!("main document part: {}", e)))?;

        // Verify it's a Word document by checking the main part's content type
        let content_type = opc.content_type(&main)?;
        if !WORD_MAIN_TYPES.contains(&content_type) {
            return Err(OoxmlError::InvalidContentType {
                expected: ct::WML_DOCUMENT_MAIN.to_string(),
                got: content_type.to_string(),
            });
        }

        Ok(Self { opc, main })
    }

    /// Get the main document part.
    pub fn document(&self) -> Result<DocumentPart<'_>> {
        Ok(DocumentPart::new(self.opc.part(&self.main)?))
    }

    /// Get the document's styles.
    ///
    /// A document without a styles part has no styles.
    pub fn styles(&self) -> Result<Styles> {
        match self.opc.related_partname(&self.main, &[rt::STYLES])? {
            Some(uri) if self.opc.contains(&uri) => Styles::from_xml(self.opc.part(&uri)?),
            _ => Ok(Styles::default()),
        }
    }

    /// Replace the content of the main document part.
    pub fn set_document_xml(&mut self, xml: Vec<u8>) -> Result<()> {
        self.opc.replace_part(&self.main, xml)?;
        Ok(())
    }

    /// Serialize the package.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.opc.to_bytes()?)
    }
}
