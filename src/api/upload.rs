//! Multipart form reading.

use std::collections::HashMap;

use axum::extract::Multipart;
use bytes::Bytes;
use tracing::trace;

use super::error::ApiError;
use crate::common::{Error, Result};

/// Field carrying the Word document.
pub const DOCUMENT_FIELD: &str = "termo_referencia";
/// Field carrying the items spreadsheet.
pub const SPREADSHEET_FIELD: &str = "tabela_itens";
/// Field carrying the JSON list of table positions.
pub const SELECTION_FIELD: &str = "selected_tables";

/// One uploaded field.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: Option<String>,
    pub data: Bytes,
}

impl Upload {
    /// Take the content if the file name ends with `extension`; fail with
    /// `message` otherwise.
    pub fn expect_extension(self, extension: &str, message: &str) -> Result<Bytes> {
        match self.file_name.as_deref() {
            Some(name) if name.ends_with(extension) => Ok(self.data),
            _ => Err(Error::FileType(message.to_string())),
        }
    }
}

/// All fields of a multipart form, keyed by field name.
#[derive(Debug, Default)]
pub struct UploadForm {
    fields: HashMap<String, Upload>,
}

impl UploadForm {
    /// Read every field of the form into memory. A repeated field keeps its
    /// last value.
    pub async fn read(mut multipart: Multipart) -> std::result::Result<Self, ApiError> {
        let mut form = Self::default();
        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            let file_name = field.file_name().map(str::to_string);
            let data = field.bytes().await?;
            trace!(field = %name, bytes = data.len(), "read form field");
            form.fields.insert(name, Upload { file_name, data });
        }
        Ok(form)
    }

    /// Remove a field, failing if the client did not send it.
    pub fn take(&mut self, name: &str) -> std::result::Result<Upload, ApiError> {
        self.fields
            .remove(name)
            .ok_or_else(|| ApiError::BadRequest(format!("Missing form field: {}", name)))
    }

    /// Remove a text field.
    pub fn take_text(&mut self, name: &str) -> std::result::Result<String, ApiError> {
        let upload = self.take(name)?;
        String::from_utf8(upload.data.to_vec())
            .map_err(|_| ApiError::BadRequest(format!("Form field {} must be UTF-8 text", name)))
    }
}
