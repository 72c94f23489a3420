//! Image records shown by the pages and how the viewer reads them.

use atelier_ui::Projection;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One successful generation from the gallery endpoint.
///
/// The endpoint sends each entry as a positional row:
/// `[type, prompt, detail, timestamp, url]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryEntry {
    /// Generation type, e.g. `Image Generation` or `Upscale`
    pub kind: String,
    pub prompt: String,
    /// Free-form detail line (style, model, ...)
    #[serde(default)]
    pub detail: Option<String>,
    /// `DD/MM/YYYY HH:mm:ss`
    pub timestamp: String,
    pub url: String,
}

impl GalleryEntry {
    /// Sort key of the timestamp, `None` if it does not parse.
    pub fn timestamp_key(&self) -> Option<TimestampKey> {
        TimestampKey::parse(&self.timestamp)
    }
}

/// Gallery endpoint payload.
#[derive(Debug, Clone, Deserialize)]
struct GalleryPayload {
    gallery: Vec<GalleryEntry>,
}

/// Errors from decoding a gallery payload.
#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("Failed to parse gallery: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to read gallery file: {0}")]
    Io(#[from] std::io::Error),
}

/// Decode `{"gallery": [[type, prompt, detail, timestamp, url], ...]}`.
pub fn parse_gallery(json: &str) -> Result<Vec<GalleryEntry>, GalleryError> {
    let payload: GalleryPayload = serde_json::from_str(json)?;
    log::debug!("Decoded {} gallery entries", payload.gallery.len());
    Ok(payload.gallery)
}

/// `(year, month, day, hour, minute, second)`, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimestampKey(u16, u8, u8, u8, u8, u8);

impl TimestampKey {
    /// Parse `DD/MM/YYYY HH:mm:ss`. A missing time part counts as midnight.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let (date, time) = text.split_once(' ').unwrap_or((text, "00:00:00"));

        let mut date = date.split('/');
        let day: u8 = date.next()?.parse().ok()?;
        let month: u8 = date.next()?.parse().ok()?;
        let year: u16 = date.next()?.parse().ok()?;
        if date.next().is_some() || !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return None;
        }

        let mut time = time.trim().split(':');
        let hour: u8 = time.next()?.parse().ok()?;
        let minute: u8 = time.next().unwrap_or("0").parse().ok()?;
        let second: u8 = time.next().unwrap_or("0").parse().ok()?;
        if hour > 23 || minute > 59 || second > 59 {
            return None;
        }

        Some(Self(year, month, day, hour, minute, second))
    }
}

/// An image produced on the generation page during this session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Generation {
    pub url: String,
    pub prompt: String,
    pub size: String,
    pub model: String,
    pub style: String,
    #[serde(default)]
    pub seed: Option<serde_json::Value>,
    pub created_at: String,
}

/// Result of an upscale request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpscaleResult {
    pub src: String,
    /// e.g. `2048 x 2048`
    pub resolution: String,
    #[serde(default)]
    pub original_resolution: Option<String>,
}

/// Gallery entries: `detail | Created: timestamp`.
pub fn gallery_projection() -> Projection<GalleryEntry> {
    Projection::new(
        |e: &GalleryEntry| e.url.clone(),
        |e: &GalleryEntry| e.prompt.clone(),
    )
    .plain_field(|e| e.detail.clone().filter(|d| !d.is_empty()))
    .field("Created", |e| Some(e.timestamp.clone()))
}

fn seed_text(seed: &serde_json::Value) -> String {
    match seed {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Generation results: style, model, size, seed and creation time.
pub fn generation_projection() -> Projection<Generation> {
    Projection::new(
        |g: &Generation| g.url.clone(),
        |g: &Generation| g.prompt.clone(),
    )
    .field("Style", |g| Some(g.style.clone()))
    .field("Model", |g| Some(g.model.clone()))
    .field("Size", |g| Some(g.size.clone()))
    .field("Seed", |g| g.seed.as_ref().map(seed_text))
    .field("Created", |g| Some(g.created_at.clone()))
}

/// The upscaled image, titled generically.
pub fn upscale_projection() -> Projection<UpscaleResult> {
    Projection::new(
        |u: &UpscaleResult| u.src.clone(),
        |_: &UpscaleResult| "Upscaled Image".to_string(),
    )
    .field("Original Size", |u| u.original_resolution.clone())
    .field("Upscaled Size", |u| Some(u.resolution.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{"gallery": [
        ["Image Generation", "a red fox", "Style: anime", "02/03/2024 10:15:00", "/r/1.png"],
        ["Upscale", "upscale", null, "01/03/2024 09:00:00", "/r/2.png"]
    ]}"#;

    #[test]
    fn test_parse_positional_rows() {
        let entries = parse_gallery(PAYLOAD).expect("valid payload");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].kind, "Image Generation");
        assert_eq!(entries[0].detail.as_deref(), Some("Style: anime"));
        assert_eq!(entries[1].detail, None);
        assert_eq!(entries[1].url, "/r/2.png");
    }

    #[test]
    fn test_parse_rejects_malformed_payload() {
        assert!(matches!(
            parse_gallery(r#"{"gallery": [["only", "two"]]}"#),
            Err(GalleryError::Parse(_))
        ));
        assert!(parse_gallery("not json").is_err());
    }

    #[test]
    fn test_timestamp_key_orders_chronologically() {
        let a = TimestampKey::parse("31/12/2023 23:59:59").expect("valid");
        let b = TimestampKey::parse("01/01/2024 00:00:00").expect("valid");
        let c = TimestampKey::parse("01/01/2024 00:00:01").expect("valid");
        assert!(a < b && b < c);
    }

    #[test]
    fn test_timestamp_key_rejects_garbage() {
        assert_eq!(TimestampKey::parse(""), None);
        assert_eq!(TimestampKey::parse("2024-01-01 10:00:00"), None);
        assert_eq!(TimestampKey::parse("13/13/2024 10:00:00"), None);
        assert_eq!(TimestampKey::parse("01/01/2024 25:00:00"), None);
        assert!(TimestampKey::parse("01/01/2024").is_some());
    }

    #[test]
    fn test_gallery_subtitle() {
        let entries = parse_gallery(PAYLOAD).expect("valid payload");
        let projection = gallery_projection();
        assert_eq!(
            projection.subtitle(&entries[0]),
            "Style: anime | Created: 02/03/2024 10:15:00"
        );
        assert_eq!(projection.subtitle(&entries[1]), "Created: 01/03/2024 09:00:00");
        assert_eq!(projection.caption(&entries[0]), "a red fox");
    }

    #[test]
    fn test_generation_subtitle() {
        let generation: Generation = serde_json::from_str(
            r#"{"url": "/g.png", "prompt": "castle", "size": "1:1", "model": "Flux.1 S",
                "style": "None", "seed": 42, "createdAt": "05/06/2024 12:00:00"}"#,
        )
        .expect("valid generation");
        assert_eq!(
            generation_projection().subtitle(&generation),
            "Style: None | Model: Flux.1 S | Size: 1:1 | Seed: 42 | Created: 05/06/2024 12:00:00"
        );
    }

    #[test]
    fn test_upscale_subtitle() {
        let result = UpscaleResult {
            src: "/u.png".into(),
            resolution: "2048 x 2048".into(),
            original_resolution: Some("512 x 512".into()),
        };
        let projection = upscale_projection();
        assert_eq!(projection.caption(&result), "Upscaled Image");
        assert_eq!(
            projection.subtitle(&result),
            "Original Size: 512 x 512 | Upscaled Size: 2048 x 2048"
        );
    }
}
