/// Styles - the style definitions of a Word document.
use crate::ooxml::error::Result;
use quick_xml::Reader;
use quick_xml::events::Event;
use smallvec::SmallVec;

/// The kind of object a style applies to (`w:type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleType {
    Paragraph,
    Character,
    Table,
    Numbering,
}

impl StyleType {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "paragraph" => Some(Self::Paragraph),
            "character" => Some(Self::Character),
            "table" => Some(Self::Table),
            "numbering" => Some(Self::Numbering),
            _ => None,
        }
    }
}

/// A single `<w:style>` definition.
#[derive(Debug, Clone)]
pub struct Style {
    style_id: String,
    style_type: Option<StyleType>,
}

impl Style {
    /// Get the style id referenced from content (`w:styleId`).
    #[inline]
    pub fn style_id(&self) -> &str {
        &self.style_id
    }

    /// Get the style type, if declared.
    #[inline]
    pub fn style_type(&self) -> Option<StyleType> {
        self.style_type
    }
}

/// The styles declared in `word/styles.xml`.
#[derive(Debug, Default)]
pub struct Styles {
    styles: SmallVec<[Style; 32]>,
}

impl Styles {
    /// Parse the styles part.
    pub fn from_xml(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut styles = SmallVec::new();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(ref e) | Event::Empty(ref e) if e.local_name().as_ref() == b"style" => {
                    let mut style_id = None;
                    let mut style_type = None;
                    for attr in e.attributes() {
                        let attr = attr?;
                        match attr.key.local_name().as_ref() {
                            b"styleId" => style_id = Some(attr.unescape_value()?.into_owned()),
                            b"type" => style_type = StyleType::parse(&attr.unescape_value()?),
                            _ => {},
                        }
                    }
                    if let Some(style_id) = style_id {
                        styles.push(Style {
                            style_id,
                            style_type,
                        });
                    }
                },
                Event::Eof => break,
                _ => {},
            }
            buf.clear();
        }

        Ok(Self { styles })
    }

    /// Look up a style by id.
    pub fn get_by_id(&self, style_id: &str) -> Option<&Style> {
        self.styles.iter().find(|s| s.style_id() == style_id)
    }

    /// Check whether a table style with this id is defined.
    pub fn has_table_style(&self, style_id: &str) -> bool {
        self.get_by_id(style_id)
            .is_some_and(|s| s.style_type() == Some(StyleType::Table))
    }

    /// Get the number of styles.
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Check if no styles are defined.
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_style_lookup() {
        let xml = br#"<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
            <w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/></w:style>
            <w:style w:type="table" w:styleId="TableGrid"><w:name w:val="Table Grid"/></w:style>
        </w:styles>"#;
        let styles = Styles::from_xml(xml).unwrap();
        assert_eq!(styles.len(), 2);
        assert!(styles.has_table_style("TableGrid"));
        assert!(!styles.has_table_style("Normal"));
        assert!(!styles.has_table_style("LightShading"));
    }
}
