use anyhow::{Context, Result};
use regex::Regex;
use serde::Serialize;

use super::{ID_FIELD, ResultItem};
use crate::config::ImageFieldConfig;

const ID_FIELD_LABEL: &str = "ID";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayField {
    pub value: String,
    pub label: String,
}

pub fn sample_item<'a>(
    result_a: &'a [ResultItem],
    result_b: &'a [ResultItem],
) -> Option<&'a ResultItem> {
    result_a.first().or_else(|| result_b.first())
}

pub fn discover_display_fields(sample: Option<&ResultItem>) -> Vec<DisplayField> {
    let mut fields = vec![DisplayField {
        value: ID_FIELD.to_string(),
        label: ID_FIELD_LABEL.to_string(),
    }];

    if let Some(sample) = sample {
        fields.extend(
            sample
                .document
                .text_fields()
                .filter(|(key, _)| !key.starts_with('_'))
                .map(|(key, _)| DisplayField {
                    value: key.to_string(),
                    label: key.to_string(),
                }),
        );
    }

    fields
}

#[derive(Debug, Clone)]
pub struct ImageFieldMatcher {
    keywords: Vec<Vec<String>>,
    extension: Regex,
    url_patterns: Vec<Regex>,
}

impl ImageFieldMatcher {
    pub fn from_config(config: &ImageFieldConfig) -> Result<Self> {
        let extension = Regex::new(&config.extension_pattern).with_context(|| {
            format!(
                "failed to compile image extension pattern: {}",
                config.extension_pattern
            )
        })?;

        let url_patterns = config
            .url_patterns
            .iter()
            .map(|pattern| {
                Regex::new(pattern)
                    .with_context(|| format!("failed to compile image url pattern: {pattern}"))
            })
            .collect::<Result<Vec<_>>>()?;

        let keywords = config
            .keywords
            .iter()
            .map(|keyword| name_tokens(keyword))
            .filter(|tokens| !tokens.is_empty())
            .collect();

        Ok(Self {
            keywords,
            extension,
            url_patterns,
        })
    }

    pub fn detect(&self, sample: &ResultItem) -> Option<String> {
        let candidates = sample
            .document
            .text_fields()
            .filter(|(key, _)| !key.starts_with('_'))
            .collect::<Vec<_>>();

        let by_name = candidates.iter().find(|(key, _)| {
            let tokens = name_tokens(key);
            self.keywords
                .iter()
                .any(|keyword| contains_keyword(&tokens, keyword))
        });
        let by_extension = || {
            candidates
                .iter()
                .find(|(_, value)| self.extension.is_match(value.trim()))
        };
        let by_url = || {
            candidates.iter().find(|(_, value)| {
                self.url_patterns
                    .iter()
                    .any(|pattern| pattern.is_match(value.trim()))
            })
        };

        by_name
            .or_else(by_extension)
            .or_else(by_url)
            .map(|(key, _)| (*key).to_string())
    }
}

fn name_tokens(name: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut previous: Option<char> = None;

    for ch in name.chars() {
        if !ch.is_alphanumeric() {
            flush_token(&mut tokens, &mut current);
            previous = None;
            continue;
        }
        if let Some(prev) = previous {
            let case_change = prev.is_lowercase() && ch.is_uppercase();
            let digit_change = prev.is_ascii_digit() != ch.is_ascii_digit();
            if case_change || digit_change {
                flush_token(&mut tokens, &mut current);
            }
        }
        current.extend(ch.to_lowercase());
        previous = Some(ch);
    }
    flush_token(&mut tokens, &mut current);

    tokens
}

fn flush_token(tokens: &mut Vec<String>, current: &mut String) {
    if !current.is_empty() {
        tokens.push(std::mem::take(current));
    }
}

fn contains_keyword(tokens: &[String], keyword: &[String]) -> bool {
    let Some((last, head)) = keyword.split_last() else {
        return false;
    };

    tokens.windows(keyword.len()).any(|window| {
        let (window_last, window_head) = (&window[keyword.len() - 1], &window[..head.len()]);
        window_head == head
            && (window_last == last || window_last.strip_suffix('s') == Some(last.as_str()))
    })
}
