use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;

const SPECIAL: [&str; 5] = ["&", "<", ">", "\"", "'"];
const ENTITIES: [&str; 5] = ["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"];

// Static initialization: automaton is built only once, thread-safe
static XML_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(SPECIAL)
        .expect("Failed to build XML escaper")
});

/// Escape XML special characters.
///
/// # Examples
///
/// ```
/// use edital::common::escape_xml;
/// assert_eq!(escape_xml("Caneta & lápis"), "Caneta &amp; lápis");
/// assert_eq!(escape_xml("<b>\"x\"</b>"), "&lt;b&gt;&quot;x&quot;&lt;/b&gt;");
/// ```
#[inline]
pub fn escape_xml(s: &str) -> String {
    XML_ESCAPER.replace_all(s, &ENTITIES)
}

/// Escape XML special characters, appending the result to `out`.
///
/// Avoids the intermediate allocation when rendering many cells into one
/// buffer.
pub fn escape_xml_into(s: &str, out: &mut String) {
    let mut last = 0;
    for mat in XML_ESCAPER.find_iter(s) {
        out.push_str(&s[last..mat.start()]);
        out.push_str(ENTITIES[mat.pattern().as_usize()]);
        last = mat.end();
    }
    out.push_str(&s[last..]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_into_matches_escape() {
        let input = "Cota 'A' & <B> \"C\"";
        let mut out = String::from("prefix:");
        escape_xml_into(input, &mut out);
        assert_eq!(out, format!("prefix:{}", escape_xml(input)));
    }

    #[test]
    fn test_plain_text_untouched() {
        let mut out = String::new();
        escape_xml_into("UNIDADE FORNECIMENTO", &mut out);
        assert_eq!(out, "UNIDADE FORNECIMENTO");
    }
}
