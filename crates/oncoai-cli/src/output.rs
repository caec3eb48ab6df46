//! Plain-text rendering of result containers for the terminal.

use std::sync::OnceLock;

use regex::Regex;

fn tag_pattern() -> &'static Regex {
    static TAGS: OnceLock<Regex> = OnceLock::new();
    TAGS.get_or_init(|| Regex::new(r"<[^>]*>").unwrap())
}

fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Strip markup, keep one line per block, drop blank lines.
pub fn text(html: &str) -> String {
    let blocks = html.replace("</div>", "\n").replace("</h4>", "\n").replace("<br>", "\n");
    let stripped = tag_pattern().replace_all(&blocks, "");
    stripped
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .map(|line| unescape(&line))
        .collect::<Vec<_>>()
        .join("\n")
}
