//! PNG encoding, data URLs and file output

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, RgbaImage};
use std::io;
use std::path::{Path, PathBuf};

/// 1×1 transparent PNG substituted for an image that failed to synthesize.
pub const PLACEHOLDER_IMAGE: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNk+M9QDwADhgGAWjR9awAAAABJRU5ErkJggg==";

/// Empty 8 kHz mono WAV substituted for audio that failed to load.
pub const SILENT_AUDIO: &str =
    "data:audio/wav;base64,UklGRiQAAABXQVZFZm10IBAAAAABAAEAQB8AAEAfAAABAAgAZGF0YQAAAAA=";

/// Error type for output operations
#[derive(Debug)]
pub enum OutputError {
    /// IO error during file operations
    Io(io::Error),
    /// Image encoding error
    Image(image::ImageError),
    /// String is not a `data:<mime>;base64,<payload>` URL
    DataUrl(String),
}

impl std::fmt::Display for OutputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputError::Io(e) => write!(f, "IO error: {}", e),
            OutputError::Image(e) => write!(f, "Image error: {}", e),
            OutputError::DataUrl(msg) => write!(f, "Invalid data URL: {}", msg),
        }
    }
}

impl std::error::Error for OutputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OutputError::Io(e) => Some(e),
            OutputError::Image(e) => Some(e),
            OutputError::DataUrl(_) => None,
        }
    }
}

impl From<io::Error> for OutputError {
    fn from(e: io::Error) -> Self {
        OutputError::Io(e)
    }
}

impl From<image::ImageError> for OutputError {
    fn from(e: image::ImageError) -> Self {
        OutputError::Image(e)
    }
}

/// Encode an RGBA image as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, OutputError> {
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes).write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        ColorType::Rgba8,
    )?;
    Ok(bytes)
}

/// Wrap raw bytes in a base64 data URL.
pub fn to_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Encode an image as a self-contained `data:image/png` URL.
pub fn png_data_url(image: &RgbaImage) -> Result<String, OutputError> {
    Ok(to_data_url("image/png", &encode_png(image)?))
}

/// Split a base64 data URL into its MIME type and decoded payload.
pub fn decode_data_url(url: &str) -> Result<(String, Vec<u8>), OutputError> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| OutputError::DataUrl("missing 'data:' prefix".to_string()))?;
    let (mime, payload) = rest
        .split_once(";base64,")
        .ok_or_else(|| OutputError::DataUrl("only base64 payloads are supported".to_string()))?;
    let bytes = STANDARD.decode(payload).map_err(|e| OutputError::DataUrl(e.to_string()))?;
    Ok((mime.to_string(), bytes))
}

/// MIME type of a data URL, without decoding the payload.
pub fn data_url_mime(url: &str) -> Option<&str> {
    url.strip_prefix("data:")?.split_once(';').map(|(mime, _)| mime)
}

/// File extension for a data URL's MIME type.
pub fn extension_for(mime: &str) -> &'static str {
    match mime {
        "image/png" => "png",
        "audio/wav" | "audio/wave" | "audio/x-wav" => "wav",
        _ => "bin",
    }
}

/// Decode a data URL and write its payload to `path`.
pub fn write_data_url(url: &str, path: &Path) -> Result<(), OutputError> {
    let (_, bytes) = decode_data_url(url)?;
    create_parent(path)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

fn create_parent(path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Turn a description into a file stem: ASCII alphanumerics kept and
/// lowercased, runs of anything else collapsed to `_`. Falls back to
/// `creature` when nothing usable remains (e.g. CJK-only descriptions).
pub fn file_stem(description: &str) -> String {
    let mut stem = String::new();
    for c in description.chars() {
        if c.is_ascii_alphanumeric() {
            stem.push(c.to_ascii_lowercase());
        } else if !stem.is_empty() && !stem.ends_with('_') {
            stem.push('_');
        }
    }
    let stem = stem.trim_end_matches('_');
    if stem.is_empty() {
        "creature".to_string()
    } else {
        stem.to_string()
    }
}

/// Generate the output path for batch item `index` (zero-based).
///
/// | Scenario | Output |
/// |----------|--------|
/// | No output dir | `{stem}_{n}.{ext}` |
/// | With `-o dir/` | `dir/{stem}_{n}.{ext}` |
///
/// `n` is one-based so the files read naturally.
pub fn generate_output_path(
    out_dir: Option<&Path>,
    stem: &str,
    index: usize,
    extension: &str,
) -> PathBuf {
    let name = format!("{}_{}.{}", stem, index + 1, extension);
    match out_dir {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}
