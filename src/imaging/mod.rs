//! Image loading for visual search
//!
//! Turns an image reference (URL, data URI, file path, uploaded bytes or a
//! captured frame) into an RGBA pixel buffer. Fetching is async; decoding
//! is CPU bound and left to the caller to run on a blocking thread.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::RgbaImage;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors raised while loading or decoding an image
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("failed to read image file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode image: {0}")]
    Image(#[from] image::ImageError),
    #[error("failed to fetch image: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("invalid data uri: {0}")]
    InvalidDataUri(String),
    #[error("image is empty")]
    Empty,
}

/// Where an image comes from
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// Local file, or a storefront asset path such as `/products/x.jpg`
    Path(PathBuf),
    /// Remote image over http(s)
    Url(String),
    /// Inline `data:` URI
    DataUri(String),
    /// Uploaded file contents
    Bytes { name: String, data: Vec<u8> },
    /// Already decoded pixels, e.g. a camera frame
    Frame(RgbaImage),
}

impl ImageSource {
    /// Classify a reference string
    pub fn parse(reference: &str) -> Self {
        let trimmed = reference.trim();
        let lower = trimmed.to_lowercase();

        if lower.starts_with("data:") {
            ImageSource::DataUri(trimmed.to_string())
        } else if lower.starts_with("http://") || lower.starts_with("https://") {
            ImageSource::Url(trimmed.to_string())
        } else {
            ImageSource::Path(PathBuf::from(trimmed))
        }
    }

    /// Text describing the image, used for keyword category guessing.
    ///
    /// Data URIs are scanned whole, payload included.
    pub fn reference_text(&self) -> String {
        match self {
            ImageSource::Path(path) => path.to_string_lossy().into_owned(),
            ImageSource::Url(url) | ImageSource::DataUri(url) => url.clone(),
            ImageSource::Bytes { name, .. } => name.clone(),
            ImageSource::Frame(_) => String::new(),
        }
    }
}

/// An image as returned by a loader, possibly still encoded
#[derive(Debug)]
pub enum LoadedImage {
    Encoded(Vec<u8>),
    Pixels(RgbaImage),
}

impl LoadedImage {
    /// Decode into RGBA pixels
    pub fn into_rgba(self) -> Result<RgbaImage, DecodeError> {
        match self {
            LoadedImage::Pixels(img) => Ok(img),
            LoadedImage::Encoded(data) => decode_bytes(&data),
        }
    }
}

/// Decode encoded image bytes (png, jpeg, webp, ...) into RGBA pixels
pub fn decode_bytes(data: &[u8]) -> Result<RgbaImage, DecodeError> {
    if data.is_empty() {
        return Err(DecodeError::Empty);
    }

    let img = image::load_from_memory(data)?;
    Ok(img.to_rgba8())
}

/// Extract the payload of a base64 `data:` URI
pub fn decode_data_uri(uri: &str) -> Result<Vec<u8>, DecodeError> {
    let (header, payload) = uri
        .split_once(',')
        .ok_or_else(|| DecodeError::InvalidDataUri("missing ',' separator".to_string()))?;

    if !header.to_lowercase().ends_with(";base64") {
        return Err(DecodeError::InvalidDataUri(format!(
            "unsupported encoding in '{}'",
            header
        )));
    }

    STANDARD
        .decode(payload.trim())
        .map_err(|e| DecodeError::InvalidDataUri(e.to_string()))
}

/// Source of image data for visual search
#[async_trait]
pub trait ImageLoader: Send + Sync {
    async fn load(&self, source: &ImageSource) -> Result<LoadedImage, DecodeError>;
}

/// Loader backed by the filesystem and an http client
pub struct DefaultImageLoader {
    client: reqwest::Client,
    /// Directory that storefront asset paths (`/products/...`) resolve against
    asset_root: Option<PathBuf>,
}

impl DefaultImageLoader {
    pub fn new(fetch_timeout: Duration, asset_root: Option<PathBuf>) -> Result<Self, DecodeError> {
        let client = reqwest::Client::builder()
            .timeout(fetch_timeout)
            .user_agent(concat!("fabfierce/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, asset_root })
    }

    fn resolve_path(&self, path: &Path) -> PathBuf {
        match &self.asset_root {
            Some(root) if path.is_absolute() && !path.exists() => {
                let relative = path.strip_prefix("/").unwrap_or(path);
                root.join(relative)
            }
            _ => path.to_path_buf(),
        }
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, DecodeError> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl ImageLoader for DefaultImageLoader {
    async fn load(&self, source: &ImageSource) -> Result<LoadedImage, DecodeError> {
        match source {
            ImageSource::Path(path) => {
                let resolved = self.resolve_path(path);
                let data = tokio::fs::read(&resolved).await?;
                Ok(LoadedImage::Encoded(data))
            }
            ImageSource::Url(url) => Ok(LoadedImage::Encoded(self.fetch(url).await?)),
            ImageSource::DataUri(uri) => Ok(LoadedImage::Encoded(decode_data_uri(uri)?)),
            ImageSource::Bytes { data, .. } => Ok(LoadedImage::Encoded(data.clone())),
            ImageSource::Frame(img) => Ok(LoadedImage::Pixels(img.clone())),
        }
    }
}

/// Encode pixels as PNG bytes
#[cfg(test)]
pub(crate) fn encode_png(img: &RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img.clone())
        .write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}
