// src/output/assets.rs
//! Image downloads and placeholder substitution.
//!
//! Rendered pages reference images through `[imageN]` placeholders. After
//! rendering, each image is downloaded, given an extension from its
//! content type (or its leading bytes), and the placeholder is replaced by
//! a relative link to the saved file.

use super::paths::{asset_file_name, asset_link, assets_dir};
use crate::error::AppError;
use crate::formatting::ImageAsset;
use reqwest::{header, Client};
use std::path::{Path, PathBuf};

/// Raw bytes of a fetched asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedAsset {
    pub bytes: Vec<u8>,
    /// `Content-Type` header value, if the server sent one.
    pub content_type: Option<String>,
}

/// The ability to download an asset by URL.
#[async_trait::async_trait]
pub trait AssetSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedAsset, AppError>;
}

/// Downloads assets over HTTP.
///
/// Image URLs from wolai are pre-signed, so no credentials are sent.
#[derive(Clone, Default)]
pub struct HttpAssetSource {
    client: Client,
}

impl HttpAssetSource {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl AssetSource for HttpAssetSource {
    async fn fetch(&self, url: &str) -> Result<FetchedAsset, AppError> {
        log::debug!("Downloading asset {}", url);
        let response = self.client.get(url).send().await?.error_for_status()?;
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await?.to_vec();

        Ok(FetchedAsset {
            bytes,
            content_type,
        })
    }
}

/// Image formats an asset can be saved as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaFormat {
    Jpeg,
    Png,
    Gif,
    Svg,
    WebP,
    Bmp,
    Ico,
    /// Unknown format; saved with a `.bin` extension.
    Binary,
}

impl MediaFormat {
    pub fn extension(self) -> &'static str {
        match self {
            MediaFormat::Jpeg => "jpg",
            MediaFormat::Png => "png",
            MediaFormat::Gif => "gif",
            MediaFormat::Svg => "svg",
            MediaFormat::WebP => "webp",
            MediaFormat::Bmp => "bmp",
            MediaFormat::Ico => "ico",
            MediaFormat::Binary => "bin",
        }
    }

    /// Maps a `Content-Type` value (parameters allowed) to a format.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let mime = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match mime.as_str() {
            "image/jpeg" | "image/jpg" | "image/pjpeg" => Some(MediaFormat::Jpeg),
            "image/png" => Some(MediaFormat::Png),
            "image/gif" => Some(MediaFormat::Gif),
            "image/svg+xml" => Some(MediaFormat::Svg),
            "image/webp" => Some(MediaFormat::WebP),
            "image/bmp" | "image/x-ms-bmp" => Some(MediaFormat::Bmp),
            "image/x-icon" | "image/vnd.microsoft.icon" => Some(MediaFormat::Ico),
            _ => None,
        }
    }

    /// Detects a format from leading magic bytes.
    pub fn sniff(data: &[u8]) -> Option<Self> {
        match data {
            [0xFF, 0xD8, 0xFF, ..] => Some(MediaFormat::Jpeg),
            [0x89, b'P', b'N', b'G', ..] => Some(MediaFormat::Png),
            [b'G', b'I', b'F', b'8', ..] => Some(MediaFormat::Gif),
            [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => {
                Some(MediaFormat::WebP)
            }
            [b'B', b'M', ..] => Some(MediaFormat::Bmp),
            [0x00, 0x00, 0x01, 0x00, ..] => Some(MediaFormat::Ico),
            _ if looks_like_svg(data) => Some(MediaFormat::Svg),
            _ => None,
        }
    }
}

fn looks_like_svg(data: &[u8]) -> bool {
    let head = &data[..data.len().min(256)];
    let text = String::from_utf8_lossy(head);
    let text = text.trim_start();
    text.starts_with("<svg") || (text.starts_with("<?xml") && text.contains("<svg"))
}

/// Content type first, then magic bytes, then [`MediaFormat::Binary`].
pub fn detect_media_format(asset: &FetchedAsset) -> MediaFormat {
    asset
        .content_type
        .as_deref()
        .and_then(MediaFormat::from_content_type)
        .or_else(|| MediaFormat::sniff(&asset.bytes))
        .unwrap_or(MediaFormat::Binary)
}

/// What a placeholder resolved to after the download attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAsset {
    /// The `[imageN]` token in the page text.
    pub token: String,
    /// Link text the token is replaced with.
    pub replacement: String,
    /// Where the bytes go, when the download succeeded.
    pub file: Option<(PathBuf, Vec<u8>)>,
}

/// Downloads every registered image of a page, in registration order.
///
/// A failed download is logged and the placeholder falls back to the
/// remote URL.
pub async fn download_assets(
    images: &[ImageAsset],
    source: &dyn AssetSource,
    page_dir: &Path,
) -> Vec<ResolvedAsset> {
    let mut resolved = Vec::with_capacity(images.len());
    for image in images {
        let asset = match source.fetch(&image.source_url).await {
            Ok(fetched) => {
                let format = detect_media_format(&fetched);
                let file_name = asset_file_name(&image.placeholder, format.extension());
                ResolvedAsset {
                    token: image.token(),
                    replacement: asset_link(&file_name),
                    file: Some((assets_dir(page_dir).join(&file_name), fetched.bytes)),
                }
            }
            Err(e) => {
                log::warn!(
                    "Failed to download image {}: {}; linking the remote URL instead",
                    image.source_url,
                    e
                );
                ResolvedAsset {
                    token: image.token(),
                    replacement: image.source_url.clone(),
                    file: None,
                }
            }
        };
        resolved.push(asset);
    }
    resolved
}

/// Replaces every placeholder token in `text` with its resolved link.
///
/// Tokens are bracketed, so `[image1]` never matches inside `[image10]`.
pub fn substitute_placeholders(text: &str, assets: &[ResolvedAsset]) -> String {
    assets.iter().fold(text.to_string(), |acc, asset| {
        acc.replace(&asset.token, &asset.replacement)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct FakeSource(HashMap<String, FetchedAsset>);

    #[async_trait::async_trait]
    impl AssetSource for FakeSource {
        async fn fetch(&self, url: &str) -> Result<FetchedAsset, AppError> {
            self.0
                .get(url)
                .cloned()
                .ok_or_else(|| AppError::MalformedResponse(format!("404 for {}", url)))
        }
    }

    fn image(n: usize, url: &str) -> ImageAsset {
        ImageAsset {
            source_url: url.to_string(),
            placeholder: format!("image{}", n),
        }
    }

    #[test]
    fn test_content_type_wins_over_bytes() {
        let asset = FetchedAsset {
            bytes: vec![0x89, b'P', b'N', b'G'],
            content_type: Some("image/jpeg; charset=binary".into()),
        };
        assert_eq!(detect_media_format(&asset), MediaFormat::Jpeg);
    }

    #[test]
    fn test_magic_bytes_fallback() {
        let cases: [(&[u8], MediaFormat); 5] = [
            (&[0xFF, 0xD8, 0xFF, 0xE0], MediaFormat::Jpeg),
            (&[0x89, b'P', b'N', b'G', 0x0D], MediaFormat::Png),
            (b"GIF89a", MediaFormat::Gif),
            (b"RIFF\x10\x00\x00\x00WEBPVP8 ", MediaFormat::WebP),
            (b"<?xml version=\"1.0\"?><svg xmlns=\"x\">", MediaFormat::Svg),
        ];
        for (bytes, expected) in cases {
            let asset = FetchedAsset {
                bytes: bytes.to_vec(),
                content_type: Some("application/octet-stream".into()),
            };
            assert_eq!(detect_media_format(&asset), expected);
        }

        let unknown = FetchedAsset {
            bytes: b"hello".to_vec(),
            content_type: None,
        };
        assert_eq!(detect_media_format(&unknown).extension(), "bin");
    }

    #[test]
    fn test_substitution_does_not_touch_longer_placeholders() {
        let assets = vec![ResolvedAsset {
            token: "[image1]".into(),
            replacement: "./assets/image1.png".into(),
            file: None,
        }];
        let text = "<img src=\"[image1]\"> <img src=\"[image10]\">";
        assert_eq!(
            substitute_placeholders(text, &assets),
            "<img src=\"./assets/image1.png\"> <img src=\"[image10]\">"
        );
    }

    #[tokio::test]
    async fn test_download_assets_resolves_and_falls_back() {
        let mut served = HashMap::new();
        served.insert(
            "https://cdn.wolai.com/a".to_string(),
            FetchedAsset {
                bytes: b"GIF89a".to_vec(),
                content_type: None,
            },
        );
        let source = FakeSource(served);
        let images = [
            image(0, "https://cdn.wolai.com/a"),
            image(1, "https://gone.example.com/b.png"),
        ];

        let resolved = download_assets(&images, &source, Path::new("out/page")).await;

        assert_eq!(resolved[0].replacement, "./assets/image0.gif");
        let (path, bytes) = resolved[0].file.as_ref().unwrap();
        assert_eq!(path, Path::new("out/page/assets/image0.gif"));
        assert_eq!(bytes, b"GIF89a");

        assert_eq!(resolved[1].token, "[image1]");
        assert_eq!(resolved[1].replacement, "https://gone.example.com/b.png");
        assert!(resolved[1].file.is_none());
    }
}
