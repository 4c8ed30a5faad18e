use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

pub const DEFAULT_IMAGE_KEYWORDS: &[&str] = &[
    "image",
    "img",
    "thumbnail",
    "thumb",
    "picture",
    "photo",
    "poster",
    "cover",
    "avatar",
];
pub const DEFAULT_IMAGE_EXTENSION_PATTERN: &str =
    r"(?i)\.(jpe?g|png|gif|webp|svg|bmp|avif|tiff?)(\?[^#]*)?(#.*)?$";
pub const DEFAULT_IMAGE_URL_PATTERNS: &[&str] = &[
    r"(?i)^https?://[^/]*(images?|img|imgur|cloudinary|unsplash|pexels|staticflickr|googleusercontent)[^/]*/",
    r"(?i)^https?://[^?#]*/(images?|img|thumbnails?|media|photos?)/",
];
pub const DEFAULT_PRE_TAGS: &[&str] = &["<em>", "&lt;em&gt;"];
pub const DEFAULT_POST_TAGS: &[&str] = &["</em>", "&lt;/em&gt;"];
pub const DEFAULT_ROW_HEIGHT: f64 = 48.0;
pub const DEFAULT_HEADER_OFFSET: f64 = 32.0;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonConfig {
    pub image_field: ImageFieldConfig,
    pub highlight: HighlightTags,
    pub layout: RowLayoutConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageFieldConfig {
    pub keywords: Vec<String>,
    pub extension_pattern: String,
    pub url_patterns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightTags {
    pub pre_tags: Vec<String>,
    pub post_tags: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RowLayoutConfig {
    pub row_height: f64,
    pub header_offset: f64,
}

impl Default for ImageFieldConfig {
    fn default() -> Self {
        Self {
            keywords: to_strings(DEFAULT_IMAGE_KEYWORDS),
            extension_pattern: DEFAULT_IMAGE_EXTENSION_PATTERN.to_string(),
            url_patterns: to_strings(DEFAULT_IMAGE_URL_PATTERNS),
        }
    }
}

impl Default for HighlightTags {
    fn default() -> Self {
        Self {
            pre_tags: to_strings(DEFAULT_PRE_TAGS),
            post_tags: to_strings(DEFAULT_POST_TAGS),
        }
    }
}

impl Default for RowLayoutConfig {
    fn default() -> Self {
        Self {
            row_height: DEFAULT_ROW_HEIGHT,
            header_offset: DEFAULT_HEADER_OFFSET,
        }
    }
}

impl HighlightTags {
    pub fn with_overrides(mut self, pre_tag: Option<&str>, post_tag: Option<&str>) -> Self {
        if let Some(tag) = pre_tag {
            self.pre_tags = vec![tag.to_string()];
        }
        if let Some(tag) = post_tag {
            self.post_tags = vec![tag.to_string()];
        }
        self
    }
}

pub fn load_comparison_config(path: Option<&Path>) -> Result<ComparisonConfig> {
    let Some(path) = path else {
        return Ok(ComparisonConfig::default());
    };

    let raw = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let config: ComparisonConfig = serde_json::from_slice(&raw)
        .with_context(|| format!("failed to parse comparison config {}", path.display()))?;

    info!(
        path = %path.display(),
        image_keywords = config.image_field.keywords.len(),
        image_url_patterns = config.image_field.url_patterns.len(),
        "loaded comparison config"
    );

    Ok(config)
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::{ComparisonConfig, DEFAULT_ROW_HEIGHT, HighlightTags};

    #[test]
    fn partial_config_falls_back_to_defaults() {
        let raw = r#"
        {
          "image_field": { "keywords": ["artwork"] },
          "layout": { "header_offset": 0.0 }
        }
        "#;

        let config: ComparisonConfig =
            serde_json::from_str(raw).expect("partial config should deserialize");
        assert_eq!(config.image_field.keywords, vec!["artwork".to_string()]);
        assert!(!config.image_field.url_patterns.is_empty());
        assert_eq!(config.layout.row_height, DEFAULT_ROW_HEIGHT);
        assert_eq!(config.layout.header_offset, 0.0);
        assert_eq!(config.highlight, HighlightTags::default());
    }

    #[test]
    fn highlight_overrides_replace_only_given_tags() {
        let tags = HighlightTags::default().with_overrides(Some("<b>"), None);
        assert_eq!(tags.pre_tags, vec!["<b>".to_string()]);
        assert_eq!(tags.post_tags, HighlightTags::default().post_tags);
    }
}
