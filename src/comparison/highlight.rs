use serde::Serialize;

use crate::config::HighlightTags;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightSegment {
    pub text: String,
    pub highlighted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Text(&'a str),
    Tag,
}

pub fn highlight_segments(text: &str, tags: &HighlightTags) -> Vec<HighlightSegment> {
    let mut segments = Vec::new();
    let mut open_span: Option<String> = None;

    for token in tokenize(text, tags) {
        match token {
            Token::Text(fragment) => match open_span.as_mut() {
                Some(span) => span.push_str(fragment),
                None => push_segment(&mut segments, fragment, false),
            },
            Token::Tag => match open_span.take() {
                Some(span) => push_segment(&mut segments, &span, true),
                None => open_span = Some(String::new()),
            },
        }
    }

    if let Some(span) = open_span {
        push_segment(&mut segments, &span, false);
    }

    segments
}

pub fn render_marked(segments: &[HighlightSegment]) -> String {
    segments
        .iter()
        .map(|segment| {
            if segment.highlighted {
                format!("[{}]", segment.text)
            } else {
                segment.text.clone()
            }
        })
        .collect()
}

fn tokenize<'a>(text: &'a str, tags: &HighlightTags) -> Vec<Token<'a>> {
    let mut tokens = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        match next_tag(rest, tags) {
            Some((start, len)) => {
                if start > 0 {
                    tokens.push(Token::Text(&rest[..start]));
                }
                tokens.push(Token::Tag);
                rest = &rest[start + len..];
            }
            None => {
                tokens.push(Token::Text(rest));
                break;
            }
        }
    }

    tokens
}

fn next_tag(text: &str, tags: &HighlightTags) -> Option<(usize, usize)> {
    tags.pre_tags
        .iter()
        .chain(&tags.post_tags)
        .filter(|tag| !tag.is_empty())
        .filter_map(|tag| text.find(tag.as_str()).map(|start| (start, tag.len())))
        .min_by(|left, right| left.0.cmp(&right.0).then(right.1.cmp(&left.1)))
}

fn push_segment(segments: &mut Vec<HighlightSegment>, text: &str, highlighted: bool) {
    if text.is_empty() {
        return;
    }
    match segments.last_mut() {
        Some(last) if last.highlighted == highlighted => last.text.push_str(text),
        _ => segments.push(HighlightSegment {
            text: text.to_string(),
            highlighted,
        }),
    }
}
