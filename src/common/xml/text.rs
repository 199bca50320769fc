use quick_xml::events::{BytesRef, BytesText};
use std::str;

use crate::ooxml::error::{OoxmlError, Result};

/// Append the content of a text event to `out`.
///
/// Entity references are delivered as separate events by the reader, so the
/// bytes here never need unescaping.
#[inline]
pub fn push_text(out: &mut String, text: &BytesText<'_>) -> Result<()> {
    let s = str::from_utf8(text.as_ref()).map_err(|e| OoxmlError::Xml(e.to_string()))?;
    out.push_str(s);
    Ok(())
}

/// Append the replacement text of an entity reference (`&amp;`, `&#233;`, `&#xE9;`) to `out`.
///
/// Only the five predefined entities and character references are known to
/// OOXML producers; anything else is an error.
pub fn push_entity(out: &mut String, entity: &BytesRef<'_>) -> Result<()> {
    let name = str::from_utf8(entity.as_ref()).map_err(|e| OoxmlError::Xml(e.to_string()))?;
    match resolve_entity(name) {
        Some(Resolved::Char(c)) => out.push(c),
        Some(Resolved::Str(s)) => out.push_str(s),
        None => return Err(OoxmlError::Xml(format!("unknown entity &{};", name))),
    }
    Ok(())
}

enum Resolved {
    Char(char),
    Str(&'static str),
}

fn resolve_entity(name: &str) -> Option<Resolved> {
    if let Some(reference) = name.strip_prefix('#') {
        let code = match reference.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => reference.parse::<u32>().ok()?,
        };
        return char::from_u32(code).map(Resolved::Char);
    }
    quick_xml::escape::resolve_predefined_entity(name).map(Resolved::Str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quick_xml::Reader;
    use quick_xml::events::Event;

    fn collect(xml: &str) -> String {
        let mut reader = Reader::from_str(xml);
        let mut out = String::new();
        loop {
            match reader.read_event().unwrap() {
                Event::Text(e) => push_text(&mut out, &e).unwrap(),
                Event::GeneralRef(e) => push_entity(&mut out, &e).unwrap(),
                Event::Eof => break,
                _ => {},
            }
        }
        out
    }

    #[test]
    fn test_predefined_and_char_refs() {
        assert_eq!(collect("<t>A &amp; B &lt;1&gt;</t>"), "A & B <1>");
        assert_eq!(collect("<t>DESCRI&#199;&#xC3;O</t>"), "DESCRIÇÃO");
    }

    #[test]
    fn test_unknown_entity() {
        assert!(resolve_entity("nbsp").is_none());
        assert!(resolve_entity("#xZZ").is_none());
    }
}
