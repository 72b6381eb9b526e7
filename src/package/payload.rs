use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

use crate::batch::ClipFailure;
use crate::clip::Clip;
use crate::error::{PackageError, Result};

/// Processing summary sent alongside the clips
///
/// Serialized as JSON into its own form field so the server can tell how many
/// recordings were dropped on the client and why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingSummary {
    /// Number of clips submitted for processing
    pub original_count: usize,

    /// Number of clips attached to the payload
    pub processed_count: usize,

    /// One record per dropped clip, in input order
    pub errors: Vec<ClipFailure>,

    /// Packaging time in Unix epoch milliseconds
    pub processing_timestamp: i64,
}

/// Content of a single form part
#[derive(Debug, Clone, PartialEq)]
pub enum PartBody {
    File(Clip),
    Text(String),
}

/// A named multipart form part
#[derive(Debug, Clone, PartialEq)]
pub struct FormPart {
    pub name: String,
    pub body: PartBody,
}

impl FormPart {
    pub fn file<N: Into<String>>(name: N, clip: Clip) -> Self {
        Self { name: name.into(), body: PartBody::File(clip) }
    }

    pub fn text<N: Into<String>, V: Into<String>>(name: N, value: V) -> Self {
        Self { name: name.into(), body: PartBody::Text(value.into()) }
    }
}

/// Upload-ready form: processed clips, caller fields and the summary
///
/// Parts are ordered clips first, then caller fields, then the summary.
#[derive(Debug, Clone)]
pub struct SubmissionPayload {
    parts: Vec<FormPart>,
    summary: ProcessingSummary,
}

impl SubmissionPayload {
    /// Assemble the payload, serializing the summary into `summary_field`
    pub fn assemble<I, K, V>(
        file_field: &str,
        clips: Vec<Clip>,
        fields: I,
        summary_field: &str,
        summary: ProcessingSummary,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let summary_json = serde_json::to_string(&summary)
            .map_err(|e| PackageError::SummaryEncoding { reason: e.to_string() })?;

        let mut parts: Vec<FormPart> = clips
            .into_iter()
            .map(|clip| FormPart::file(file_field, clip))
            .collect();
        parts.extend(fields.into_iter().map(|(key, value)| FormPart::text(key, value)));
        parts.push(FormPart::text(summary_field, summary_json));

        Ok(Self { parts, summary })
    }

    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }

    pub fn summary(&self) -> &ProcessingSummary {
        &self.summary
    }

    /// Clips attached to the payload
    pub fn files(&self) -> impl Iterator<Item = &Clip> {
        self.parts.iter().filter_map(|part| match &part.body {
            PartBody::File(clip) => Some(clip),
            PartBody::Text(_) => None,
        })
    }

    pub fn file_count(&self) -> usize {
        self.files().count()
    }

    /// Text fields as `(name, value)` pairs, summary included
    pub fn text_fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.parts.iter().filter_map(|part| match &part.body {
            PartBody::Text(value) => Some((part.name.as_str(), value.as_str())),
            PartBody::File(_) => None,
        })
    }

    /// First text field with the given name
    pub fn field(&self, name: &str) -> Option<&str> {
        self.text_fields()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value)
    }

    /// Build the `multipart/form-data` form for the upload request
    ///
    /// Part order is preserved. Each file part carries the clip's name as its
    /// filename and the clip's MIME type as its content type.
    pub fn to_form(&self) -> Result<Form> {
        let mut form = Form::new();

        for part in &self.parts {
            form = match &part.body {
                PartBody::File(clip) => {
                    let file = Part::bytes(clip.data().to_vec())
                        .file_name(clip.name().to_string())
                        .mime_str(clip.mime_type())
                        .map_err(|e| PackageError::InvalidPart {
                            name: clip.name().to_string(),
                            reason: e.to_string(),
                        })?;
                    form.part(part.name.clone(), file)
                }
                PartBody::Text(value) => form.text(part.name.clone(), value.clone()),
            };
        }

        Ok(form)
    }
}
