use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::Value;
use tracing::warn;

static FENCED_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```([0-9A-Za-z_]*)\n(.*?)```").expect("fenced code pattern is valid")
});
static INLINE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`]+)`").expect("inline code pattern is valid"));
static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^*\n]+?)\*\*").expect("bold pattern is valid"));
static ITALIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*\n]+?)\*").expect("italic pattern is valid"));

/// Private-use code point framing placeholder tokens. Stripped from raw input
/// so plain text cannot forge one.
const PLACEHOLDER_SENTINEL: char = '\u{E000}';

/// Language class applied to fenced blocks that carry no tag.
pub const DEFAULT_CODE_LANGUAGE: &str = "plaintext";

struct CodeBlock {
    language: String,
    code: String,
}

/// Escape the five HTML-sensitive characters (`& < > ' "`).
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&#39;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    out
}

/// Turn raw chat text into HTML-safe markup.
///
/// Escaping runs first, then code is lifted out behind placeholders so the
/// bold, italic and line-break passes never touch it. Placeholders are
/// restored last: fenced blocks become `<pre><code class="language-..">`,
/// inline spans become `<code>`.
pub fn format_message(raw: &str) -> String {
    let text = escape_html(&raw.replace(PLACEHOLDER_SENTINEL, ""));

    let mut blocks: Vec<CodeBlock> = Vec::new();
    let text = FENCED_CODE.replace_all(&text, |caps: &Captures| {
        let placeholder = code_block_placeholder(blocks.len());
        blocks.push(CodeBlock {
            language: caps[1].trim().to_owned(),
            code: caps[2].trim().to_owned(),
        });
        placeholder
    });

    let mut inline: Vec<String> = Vec::new();
    let text = INLINE_CODE.replace_all(&text, |caps: &Captures| {
        let placeholder = inline_code_placeholder(inline.len());
        inline.push(caps[1].trim().to_owned());
        placeholder
    });

    let text = BOLD.replace_all(&text, "<strong>${1}</strong>");
    let text = ITALIC.replace_all(&text, "<em>${1}</em>");
    let mut text = text.replace('\n', "<br>");

    for (index, block) in blocks.iter().enumerate() {
        let language = if block.language.is_empty() {
            DEFAULT_CODE_LANGUAGE
        } else {
            block.language.as_str()
        };
        let markup = format!(
            "<pre><code class=\"language-{}\">{}</code></pre>",
            language, block.code
        );
        text = text.replacen(&code_block_placeholder(index), &markup, 1);
    }

    for (index, code) in inline.iter().enumerate() {
        let markup = format!("<code>{}</code>", code);
        text = text.replacen(&inline_code_placeholder(index), &markup, 1);
    }

    text
}

/// Format an untyped payload. Only JSON strings are accepted; anything else
/// is logged and rendered as nothing.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::String(raw) => format_message(raw),
        other => {
            warn!(input = %other, "invalid text input; expected a string");
            String::new()
        }
    }
}

fn code_block_placeholder(index: usize) -> String {
    format!("{PLACEHOLDER_SENTINEL}CODE_BLOCK_{index}{PLACEHOLDER_SENTINEL}")
}

fn inline_code_placeholder(index: usize) -> String {
    format!("{PLACEHOLDER_SENTINEL}INLINE_CODE_{index}{PLACEHOLDER_SENTINEL}")
}
