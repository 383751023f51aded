//! User intents and the forms they carry.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use aiye_gateway::encode_image_data_url;
use aiye_types::{PaymentRequest, VerificationRequest};

use crate::config::{PaymentConfig, VerificationConfig};
use crate::error::{RuntimeError, RuntimeResult, ValidationError};

/// Everything the panel can ask the synchronizer to do.
#[derive(Debug, Clone, PartialEq)]
pub enum UserIntent {
    /// Select an organ by id.
    Select(String),
    /// Re-score every organ, then refresh.
    DiagnoseAll,
    /// Re-score one organ, then refresh.
    Diagnose(String),
    /// Apply a vial to the selected organ.
    Pay(PaymentForm),
    /// Submit restoration evidence for the selected organ.
    Verify(VerificationForm),
    /// Fetch payment history for an organ.
    ShowVials(String),
    /// Reload organs and quota.
    Refresh,
}

/// Vial payment form.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentForm {
    pub amount: f64,
    /// Falls back to the configured default currency.
    pub currency: Option<String>,
    pub email: String,
    pub name: String,
}

impl PaymentForm {
    pub fn validate(&self, limits: &PaymentConfig) -> Result<(), ValidationError> {
        if self.email.trim().is_empty() {
            return Err(ValidationError::MissingField("email"));
        }
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        if !self.amount.is_finite()
            || self.amount < limits.min_amount
            || self.amount > limits.max_amount
        {
            return Err(ValidationError::AmountOutOfRange {
                amount: self.amount,
                min: limits.min_amount,
                max: limits.max_amount,
            });
        }
        Ok(())
    }

    /// Build the gateway request for `organ_id`.
    pub fn to_request(&self, organ_id: &str, default_currency: &str) -> PaymentRequest {
        PaymentRequest {
            organ_id: organ_id.to_string(),
            amount: self.amount,
            currency: self
                .currency
                .clone()
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| default_currency.to_string()),
            email: self.email.trim().to_string(),
            name: self.name.trim().to_string(),
        }
    }
}

/// An image picked for verification.
#[derive(Clone, PartialEq)]
pub struct ImageUpload {
    mime: String,
    bytes: Vec<u8>,
}

impl std::fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl ImageUpload {
    pub fn new(mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            bytes,
        }
    }

    /// Read an image from disk, taking its MIME type from the extension.
    /// Files larger than `max_bytes` are rejected without being read in full.
    pub fn from_path(path: impl AsRef<Path>, max_bytes: usize) -> RuntimeResult<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let mime = mime_for_extension(&extension).ok_or_else(|| {
            RuntimeError::Validation(ValidationError::UnsupportedImageFormat(format!(
                "{} (.{})",
                path.display(),
                extension
            )))
        })?;
        let too_large = |size: usize| {
            RuntimeError::Validation(ValidationError::ImageTooLarge {
                size,
                limit: max_bytes,
            })
        };

        let file = File::open(path)?;
        let size = usize::try_from(file.metadata()?.len()).unwrap_or(usize::MAX);
        if size > max_bytes {
            return Err(too_large(size));
        }

        // the file may have grown since the metadata was read
        let cap = u64::try_from(max_bytes).unwrap_or(u64::MAX).saturating_add(1);
        let mut bytes = Vec::with_capacity(size);
        file.take(cap).read_to_end(&mut bytes)?;
        if bytes.len() > max_bytes {
            return Err(too_large(bytes.len()));
        }
        Ok(Self::new(mime, bytes))
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn validate(&self, limits: &VerificationConfig) -> Result<(), ValidationError> {
        if self.bytes.is_empty() {
            return Err(ValidationError::EmptyImage);
        }
        if !limits.accepted_formats.iter().any(|f| f == &self.mime) {
            return Err(ValidationError::UnsupportedImageFormat(self.mime.clone()));
        }
        if self.bytes.len() > limits.max_image_bytes {
            return Err(ValidationError::ImageTooLarge {
                size: self.bytes.len(),
                limit: limits.max_image_bytes,
            });
        }
        Ok(())
    }

    pub fn data_url(&self) -> String {
        encode_image_data_url(&self.mime, &self.bytes)
    }
}

fn mime_for_extension(extension: &str) -> Option<&'static str> {
    match extension {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

/// Restoration verification form.
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationForm {
    pub image: ImageUpload,
    pub ngo_name: String,
    pub description: String,
}

impl VerificationForm {
    pub fn to_request(&self, organ_id: &str) -> VerificationRequest {
        VerificationRequest {
            organ_id: organ_id.to_string(),
            image_base64: self.image.data_url(),
            ngo_name: self.ngo_name.clone(),
            description: self.description.clone(),
        }
    }
}
