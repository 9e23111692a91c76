//! Content rendering
//!
//! Server content is HTML written in the admin editor. Before display it
//! gets its newlines turned into `<br/>` and, unless disabled in the
//! configuration, passes through an allow-list sanitizer.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::config::RenderConfig;
use crate::models::{BackgroundType, Post, PublicSettings};

/// Characters of content shown in a list excerpt
pub const EXCERPT_LENGTH: usize = 200;

/// Tags kept by the sanitizer; anything else is unwrapped to its text
const ALLOWED_TAGS: &[&str] = &[
    "a", "abbr", "b", "blockquote", "br", "code", "del", "div", "em", "figcaption", "figure",
    "h1", "h2", "h3", "h4", "h5", "h6", "hr", "i", "img", "li", "mark", "ol", "p", "pre", "s",
    "small", "span", "strong", "sub", "sup", "table", "tbody", "td", "th", "thead", "tr", "u",
    "ul",
];

const ALLOWED_ATTRIBUTES: &[&str] = &[
    "alt", "class", "colspan", "height", "href", "rel", "rowspan", "src", "target", "title",
    "width",
];

/// Elements dropped together with everything inside them
static DROPPED_BLOCKS: Lazy<Vec<Regex>> = Lazy::new(|| {
    ["script", "style", "iframe", "object", "embed", "noscript", "template"]
        .iter()
        .map(|tag| {
            Regex::new(&format!(r"(?is)<{tag}\b[^>]*>.*?</{tag}\s*>"))
                .expect("block pattern is valid")
        })
        .collect()
});

static COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").expect("comment pattern is valid"));

static TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<(/?)([a-zA-Z][a-zA-Z0-9]*)\b([^>]*)>").expect("tag pattern is valid")
});

static ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([a-zA-Z_:][-a-zA-Z0-9_:.]*)\s*=\s*("[^"]*"|'[^']*'|[^\s"'>]+)"#)
        .expect("attribute pattern is valid")
});

static CHAR_REF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|[a-zA-Z][a-zA-Z0-9]*);?")
        .expect("character reference pattern is valid")
});

static ANY_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<[^>]*>").expect("markup pattern is valid"));

static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Renders server content according to the configuration
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    sanitize: bool,
}

impl Default for Renderer {
    fn default() -> Self {
        Self { sanitize: true }
    }
}

impl Renderer {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            sanitize: config.sanitize_html,
        }
    }

    pub fn sanitizes(&self) -> bool {
        self.sanitize
    }

    /// HTML ready for insertion into a page
    pub fn content_html(&self, raw: &str) -> String {
        let html = newlines_to_br(raw);
        if self.sanitize {
            sanitize_html(&html)
        } else {
            html
        }
    }
}

/// Replace each line break with `<br/>`
pub fn newlines_to_br(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\n', "<br/>")
}

/// Keep only allow-listed tags and attributes.
///
/// Script-like elements are removed with their contents, other unknown
/// tags are removed but their text is kept, and `javascript:` links are
/// dropped.
pub fn sanitize_html(html: &str) -> String {
    let mut cleaned = COMMENT.replace_all(html, "").into_owned();
    for block in DROPPED_BLOCKS.iter() {
        cleaned = block.replace_all(&cleaned, "").into_owned();
    }

    TAG.replace_all(&cleaned, |caps: &Captures| {
        let closing = &caps[1] == "/";
        let name = caps[2].to_ascii_lowercase();
        if !ALLOWED_TAGS.contains(&name.as_str()) {
            return String::new();
        }
        if closing {
            return format!("</{}>", name);
        }

        let rest = &caps[3];
        let mut tag = format!("<{}", name);
        for attr in ATTRIBUTE.captures_iter(rest) {
            let key = attr[1].to_ascii_lowercase();
            if !ALLOWED_ATTRIBUTES.contains(&key.as_str()) {
                continue;
            }
            let value = attr[2].trim_matches(|c| c == '"' || c == '\'');
            if is_script_url(value) {
                continue;
            }
            tag.push_str(&format!(" {}=\"{}\"", key, value.replace('"', "&quot;")));
        }
        if rest.trim_end().ends_with('/') {
            tag.push('/');
        }
        tag.push('>');
        tag
    })
    .into_owned()
}

/// Resolve the character references a browser decodes in attribute values
fn decode_char_refs(value: &str) -> String {
    CHAR_REF
        .replace_all(value, |caps: &Captures| {
            let name = &caps[1];
            let hex = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X"));
            let decoded = if let Some(hex) = hex {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = name.strip_prefix('#') {
                dec.parse::<u32>().ok().and_then(char::from_u32)
            } else {
                match name.to_ascii_lowercase().as_str() {
                    "colon" => Some(':'),
                    "tab" => Some('\t'),
                    "newline" => Some('\n'),
                    "amp" => Some('&'),
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "quot" => Some('"'),
                    "apos" => Some('\''),
                    "sol" => Some('/'),
                    "lpar" => Some('('),
                    "rpar" => Some(')'),
                    "period" => Some('.'),
                    "nbsp" => Some('\u{a0}'),
                    _ => None,
                }
            };
            // unknown references stay as written
            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}

fn is_script_url(value: &str) -> bool {
    let compact: String = decode_char_refs(value)
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();
    compact.starts_with("javascript:") || compact.starts_with("vbscript:") || compact.starts_with("data:text/html")
}

/// Text content of some HTML, whitespace collapsed
pub fn strip_tags(html: &str) -> String {
    let text = ANY_TAG.replace_all(html, " ");
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

/// List excerpt: the post's own excerpt, else the start of its text
pub fn excerpt(post: &Post) -> String {
    if let Some(excerpt) = post.excerpt.as_deref().map(str::trim).filter(|e| !e.is_empty()) {
        return excerpt.to_string();
    }
    truncate(&strip_tags(&post.content), EXCERPT_LENGTH)
}

/// First `max` characters, with `...` appended when cut
pub fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", text[..cut].trim_end()),
        None => text.to_string(),
    }
}

/// `3/2/2024`
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

pub fn format_datetime(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// CSS for the site background, `None` for the built-in default
pub fn background_css(settings: &PublicSettings) -> Option<String> {
    match settings.background_type {
        BackgroundType::Default => None,
        BackgroundType::Color | BackgroundType::Gradient => settings
            .background_value
            .as_deref()
            .filter(|v| !v.trim().is_empty())
            .map(|value| format!("background: {};", value.trim())),
        BackgroundType::Image => settings
            .background_image_url
            .as_deref()
            .filter(|v| !v.trim().is_empty())
            .map(|url| {
                format!(
                    "background-image: url('{}'); background-size: cover; background-position: center; background-attachment: fixed;",
                    url.trim()
                )
            }),
    }
}

/// Human readable byte count
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}
