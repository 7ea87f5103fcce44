use std::{fs, path::Path};

use base64::{Engine, engine::general_purpose::STANDARD};

use crate::{conventions::MAX_DOCUMENT_SIZE, prelude::*};

/// Uploaded bill or offer document.
pub struct Document {
    pub bytes: Vec<u8>,
    pub mime_type: &'static str,
}

impl Document {
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self> {
        let mime_type = Self::guess_mime_type(path)
            .with_context(|| format!("unsupported document type: `{}`", path.display()))?;
        let size = fs::metadata(path)
            .with_context(|| format!("failed to access `{}`", path.display()))?
            .len();
        ensure!(
            size <= MAX_DOCUMENT_SIZE,
            "the document must not exceed {} MiB",
            MAX_DOCUMENT_SIZE / 1024 / 1024,
        );
        let bytes = fs::read(path).with_context(|| format!("failed to read `{}`", path.display()))?;
        info!(size, mime_type, "loaded the document");
        Ok(Self { bytes, mime_type })
    }

    pub fn guess_mime_type(path: &Path) -> Option<&'static str> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "pdf" => Some("application/pdf"),
            "png" => Some("image/png"),
            "jpg" | "jpeg" => Some("image/jpeg"),
            "webp" => Some("image/webp"),
            _ => None,
        }
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }
}
