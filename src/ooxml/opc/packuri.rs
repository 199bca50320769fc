/// Provides the PackURI value type and utilities for working with package URIs.
///
/// A PackURI represents a part name within an OPC package: it always begins
/// with a forward slash and uses forward slashes as path separators. The ZIP
/// member name of a part is its PackURI without the leading slash.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackURI {
    /// The full pack URI string (e.g., "/word/document.xml")
    uri: String,
}

impl PackURI {
    /// Create a new PackURI from a string.
    ///
    /// Returns an error if the URI doesn't start with a forward slash.
    pub fn new<S: Into<String>>(uri: S) -> Result<Self, String> {
        let uri = uri.into();
        if !uri.starts_with('/') {
            return Err(format!("PackURI must begin with slash, got '{}'", uri));
        }
        Ok(PackURI { uri })
    }

    /// Create a PackURI from a ZIP member name (no leading slash).
    pub fn from_membername(membername: &str) -> Self {
        PackURI {
            uri: format!("/{}", membername.trim_start_matches('/')),
        }
    }

    /// Create a PackURI from a relative reference and a base URI.
    ///
    /// This translates a relative reference (like "../styles.xml") onto a base URI
    /// (like "/word") to produce an absolute PackURI (like "/styles.xml").
    /// References that are already absolute ("/xl/worksheets/sheet1.xml") are
    /// only normalized.
    pub fn from_rel_ref(base_uri: &str, relative_ref: &str) -> Result<Self, String> {
        let joined = if relative_ref.starts_with('/') {
            relative_ref.to_string()
        } else {
            Self::join_paths(base_uri, relative_ref)
        };
        Self::new(Self::normalize_path(&joined))
    }

    /// Get the base URI (directory portion) of this PackURI.
    ///
    /// For example, "/xl/worksheets" for "/xl/worksheets/sheet1.xml".
    /// For the package pseudo-partname "/", returns "/".
    pub fn base_uri(&self) -> &str {
        match self.uri.rfind('/') {
            Some(0) | None => "/",
            Some(pos) => &self.uri[..pos],
        }
    }

    /// Get the filename portion of this PackURI.
    ///
    /// For the package pseudo-partname "/", returns an empty string.
    pub fn filename(&self) -> &str {
        match self.uri.rfind('/') {
            Some(pos) => &self.uri[pos + 1..],
            None => "",
        }
    }

    /// Get the extension portion of this PackURI, without the leading period.
    pub fn ext(&self) -> &str {
        let filename = self.filename();
        match filename.rfind('.') {
            Some(pos) => &filename[pos + 1..],
            None => "",
        }
    }

    /// Get the membername (URI with leading slash stripped).
    ///
    /// This is the form used as the Zip file membername for the package item.
    pub fn membername(&self) -> &str {
        &self.uri[1..]
    }

    /// Get the PackURI of the .rels part corresponding to this PackURI.
    ///
    /// For example, "/word/_rels/document.xml.rels" for "/word/document.xml",
    /// and "/_rels/.rels" for the package itself.
    pub fn rels_uri(&self) -> Result<PackURI, String> {
        let filename = self.filename();
        let base_uri = self.base_uri();

        let rels_uri_str = if base_uri == "/" {
            format!("/_rels/{}.rels", filename)
        } else {
            format!("{}/_rels/{}.rels", base_uri, filename)
        };

        Self::new(rels_uri_str)
    }

    /// Get the full URI string.
    pub fn as_str(&self) -> &str {
        &self.uri
    }

    fn join_paths(base: &str, rel: &str) -> String {
        if base.ends_with('/') {
            format!("{}{}", base, rel)
        } else {
            format!("{}/{}", base, rel)
        }
    }

    /// Resolve "." and ".." segments. The result always starts with a slash.
    fn normalize_path(path: &str) -> String {
        let mut parts: Vec<&str> = Vec::new();

        for part in path.split('/') {
            match part {
                "" | "." => {},
                ".." => {
                    parts.pop();
                },
                _ => parts.push(part),
            }
        }

        format!("/{}", parts.join("/"))
    }
}

impl std::fmt::Display for PackURI {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.uri)
    }
}

impl AsRef<str> for PackURI {
    fn as_ref(&self) -> &str {
        &self.uri
    }
}

/// The package pseudo-partname, representing the package itself
pub const PACKAGE_URI: &str = "/";

/// The URI for the [Content_Types].xml part
pub const CONTENT_TYPES_URI: &str = "/[Content_Types].xml";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packuri_new() {
        assert!(PackURI::new("/word/document.xml").is_ok());
        assert!(PackURI::new("word/document.xml").is_err());
    }

    #[test]
    fn test_base_uri_and_filename() {
        let uri = PackURI::new("/xl/worksheets/sheet1.xml").unwrap();
        assert_eq!(uri.base_uri(), "/xl/worksheets");
        assert_eq!(uri.filename(), "sheet1.xml");
        assert_eq!(uri.ext(), "xml");

        let root = PackURI::new(PACKAGE_URI).unwrap();
        assert_eq!(root.base_uri(), "/");
        assert_eq!(root.filename(), "");
        assert_eq!(root.membername(), "");
    }

    #[test]
    fn test_rels_uri() {
        let doc = PackURI::new("/word/document.xml").unwrap();
        assert_eq!(doc.rels_uri().unwrap().as_str(), "/word/_rels/document.xml.rels");

        let root = PackURI::new(PACKAGE_URI).unwrap();
        assert_eq!(root.rels_uri().unwrap().as_str(), "/_rels/.rels");
    }

    #[test]
    fn test_from_rel_ref() {
        let uri = PackURI::from_rel_ref("/xl", "worksheets/sheet1.xml").unwrap();
        assert_eq!(uri.as_str(), "/xl/worksheets/sheet1.xml");

        let uri = PackURI::from_rel_ref("/word", "../customXml/item1.xml").unwrap();
        assert_eq!(uri.as_str(), "/customXml/item1.xml");

        let uri = PackURI::from_rel_ref("/xl", "/xl/worksheets/sheet2.xml").unwrap();
        assert_eq!(uri.as_str(), "/xl/worksheets/sheet2.xml");

        let uri = PackURI::from_rel_ref("/", "word/document.xml").unwrap();
        assert_eq!(uri.as_str(), "/word/document.xml");
    }

    #[test]
    fn test_from_membername() {
        let uri = PackURI::from_membername("word/document.xml");
        assert_eq!(uri.as_str(), "/word/document.xml");
        assert_eq!(uri.membername(), "word/document.xml");
    }
}
