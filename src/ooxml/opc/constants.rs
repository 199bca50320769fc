/// Constant values related to the Open Packaging Convention.
///
/// This module contains content type URIs (like MIME-types) that specify a part's format,
/// XML namespaces, and relationship types used by Word and Excel packages.

/// Content type URIs (like MIME-types) that specify a part's format
pub mod content_type {
    // Package-level content types
    pub const OPC_RELATIONSHIPS: &str = "application/vnd.openxmlformats-package.relationships+xml";
    pub const XML: &str = "application/xml";

    // WordprocessingML content types
    pub const WML_DOCUMENT: &str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
    pub const WML_DOCUMENT_MAIN: &str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";
    pub const WML_TEMPLATE_MAIN: &str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.template.main+xml";
    pub const WML_STYLES: &str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml";

    // SpreadsheetML content types
    pub const SML_SHEET_MAIN: &str =
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml";
    pub const SML_WORKSHEET: &str =
        "application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml";
    pub const SML_SHARED_STRINGS: &str =
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml";
}

/// XML namespaces
pub mod namespace {
    pub const OPC_CONTENT_TYPES: &str =
        "http://schemas.openxmlformats.org/package/2006/content-types";
    pub const OPC_RELATIONSHIPS: &str =
        "http://schemas.openxmlformats.org/package/2006/relationships";
    pub const WML_MAIN: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
    pub const SML_MAIN: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
    pub const OFC_RELATIONSHIPS: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
}

/// Relationship target modes
pub mod target_mode {
    pub const INTERNAL: &str = "Internal";
    pub const EXTERNAL: &str = "External";
}

/// Relationship type URIs.
///
/// Strict-conformance packages use the `purl.oclc.org` variants; both forms
/// are listed where a lookup has to accept either.
pub mod relationship_type {
    pub const OFFICE_DOCUMENT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
    pub const OFFICE_DOCUMENT_STRICT: &str =
        "http://purl.oclc.org/ooxml/officeDocument/relationships/officeDocument";
    pub const STYLES: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
    pub const WORKSHEET: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet";
    pub const WORKSHEET_STRICT: &str =
        "http://purl.oclc.org/ooxml/officeDocument/relationships/worksheet";
    pub const SHARED_STRINGS: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings";
    pub const SHARED_STRINGS_STRICT: &str =
        "http://purl.oclc.org/ooxml/officeDocument/relationships/sharedStrings";
}
