//! Image payloads sent to the generator.

use std::path::Path;

use base64::{engine::general_purpose, Engine as _};

use super::GenerationError;

/// Decoded image bytes with a detected MIME type
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePayload {
    mime_type: &'static str,
    data: Vec<u8>,
}

impl ImagePayload {
    /// Validate raw bytes as an image
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, GenerationError> {
        if data.is_empty() {
            return Err(GenerationError::InvalidInput("Image is empty".to_string()));
        }

        let format = ::image::guess_format(&data)
            .map_err(|e| GenerationError::InvalidInput(format!("Unrecognised image: {}", e)))?;

        Ok(Self {
            mime_type: format.to_mime_type(),
            data,
        })
    }

    /// Parse a `data:<mime>;base64,<payload>` URL
    pub fn from_data_url(url: &str) -> Result<Self, GenerationError> {
        let invalid = || {
            GenerationError::InvalidInput(
                "Invalid image data format. Expected a data URL.".to_string(),
            )
        };

        let rest = url.trim().strip_prefix("data:").ok_or_else(invalid)?;
        let (mime_type, payload) = rest.split_once(";base64,").ok_or_else(invalid)?;
        if !mime_type.starts_with("image/") || payload.is_empty() {
            return Err(invalid());
        }

        let data = general_purpose::STANDARD
            .decode(payload.trim())
            .map_err(|e| GenerationError::InvalidInput(format!("Invalid base64 image data: {}", e)))?;

        Self::from_bytes(data)
    }

    /// Read an image file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, GenerationError> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|e| {
            GenerationError::InvalidInput(format!("Cannot read {}: {}", path.display(), e))
        })?;
        Self::from_bytes(data)
    }

    pub fn mime_type(&self) -> &'static str {
        self.mime_type
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn to_base64(&self) -> String {
        general_purpose::STANDARD.encode(&self.data)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Just enough bytes for format sniffing
    pub(crate) fn png_bytes() -> Vec<u8> {
        let mut bytes = b"\x89PNG\r\n\x1a\n".to_vec();
        bytes.extend_from_slice(&[0u8; 16]);
        bytes
    }

    #[test]
    fn test_from_bytes_detects_format() {
        let payload = ImagePayload::from_bytes(png_bytes()).unwrap();
        assert_eq!(payload.mime_type(), "image/png");
        assert_eq!(payload.len(), 24);

        let jpeg = ImagePayload::from_bytes(vec![0xFF, 0xD8, 0xFF, 0xE0, 0, 0, 0, 0]).unwrap();
        assert_eq!(jpeg.mime_type(), "image/jpeg");
    }

    #[test]
    fn test_from_bytes_rejects_non_images() {
        assert!(matches!(
            ImagePayload::from_bytes(b"hello world".to_vec()),
            Err(GenerationError::InvalidInput(_))
        ));
        assert!(ImagePayload::from_bytes(Vec::new()).is_err());
    }

    #[test]
    fn test_data_url_round_trip() {
        let url = format!(
            "data:image/png;base64,{}",
            general_purpose::STANDARD.encode(png_bytes())
        );
        let payload = ImagePayload::from_data_url(&url).unwrap();
        assert_eq!(payload.mime_type(), "image/png");
        assert_eq!(payload.to_base64(), general_purpose::STANDARD.encode(png_bytes()));
    }

    #[test]
    fn test_data_url_rejects_malformed() {
        for url in [
            "",
            "image/png;base64,AAAA",
            "data:image/png,AAAA",
            "data:text/plain;base64,aGVsbG8=",
            "data:image/png;base64,",
            "data:image/png;base64,!!!not-base64!!!",
        ] {
            assert!(
                matches!(ImagePayload::from_data_url(url), Err(GenerationError::InvalidInput(_))),
                "accepted {:?}",
                url
            );
        }
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dish.png");
        std::fs::write(&path, png_bytes()).unwrap();
        assert_eq!(ImagePayload::from_path(&path).unwrap().mime_type(), "image/png");

        assert!(ImagePayload::from_path(dir.path().join("missing.png")).is_err());
    }
}
