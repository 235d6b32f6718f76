//! `multipart/form-data` encoding for text fields.
//!
//! The inspection endpoint reads its inputs as form fields, the way a browser
//! `FormData` submission sends them: one part per field, no per-part content
//! type, fields in insertion order.

use std::borrow::Cow;

use uuid::Uuid;

/// A form made of text fields.
#[derive(Debug, Clone)]
pub struct Form {
    boundary: String,
    fields: Vec<(String, String)>,
}

impl Default for Form {
    fn default() -> Self {
        Self::new()
    }
}

impl Form {
    pub fn new() -> Self {
        Self::with_boundary(format!("----httpcookies-{}", Uuid::new_v4().simple()))
    }

    /// Use a fixed boundary. The caller must pick one that does not occur in
    /// any field value.
    pub fn with_boundary(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            fields: Vec::new(),
        }
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Append a text field.
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Value for the `Content-Type` request header.
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Encode the form. An empty form encodes as an empty body.
    pub fn into_body(self) -> String {
        if self.fields.is_empty() {
            return String::new();
        }

        let mut output = String::new();
        for (name, value) in &self.fields {
            output.push_str("--");
            output.push_str(&self.boundary);
            output.push_str("\r\n");
            output.push_str(&format!(
                "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                escape_quotes(name)
            ));
            output.push_str(value);
            output.push_str("\r\n");
        }
        output.push_str("--");
        output.push_str(&self.boundary);
        output.push_str("--\r\n");
        output
    }
}

fn escape_quotes(s: &str) -> Cow<'_, str> {
    if s.contains(['"', '\\', '\r', '\n']) {
        Cow::Owned(
            s.replace('\\', "\\\\")
                .replace('"', "\\\"")
                .replace('\r', "\\r")
                .replace('\n', "\\n"),
        )
    } else {
        Cow::Borrowed(s)
    }
}
