//! # quill-markup
//!
//! Turns stored article and comment text (Markdown) into HTML.
//!
//! Raw HTML in the source is always escaped rather than passed through, so
//! reader-supplied text can never inject markup. Fenced code blocks are part
//! of the CommonMark grammar and always recognised; their info string becomes
//! a `language-*` class on the `<code>` element.

use comrak::{markdown_to_html, Options};

/// Rendering switches for [`render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkupOptions {
    /// Escape raw HTML found in the source instead of emitting it.
    pub escape_html: bool,
    /// Turn every single newline into `<br />`.
    pub hard_breaks: bool,
    /// GitHub extensions: tables, strikethrough, autolinks.
    pub extensions: bool,
}

impl MarkupOptions {
    /// Options used on list pages.
    pub const fn listing() -> Self {
        Self {
            escape_html: true,
            hard_breaks: false,
            extensions: false,
        }
    }

    /// Options used on the article detail page and for comments.
    pub const fn detail() -> Self {
        Self {
            escape_html: true,
            hard_breaks: true,
            extensions: true,
        }
    }
}

impl Default for MarkupOptions {
    fn default() -> Self {
        Self::listing()
    }
}

/// Render Markdown `text` to an HTML fragment.
pub fn render(text: &str, options: &MarkupOptions) -> String {
    let mut comrak_options = Options::default();
    comrak_options.render.escape = options.escape_html;
    comrak_options.render.hardbreaks = options.hard_breaks;
    if options.extensions {
        comrak_options.extension.table = true;
        comrak_options.extension.strikethrough = true;
        comrak_options.extension.autolink = true;
    }
    markdown_to_html(text, &comrak_options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_basic_markdown() {
        let html = render("# Hello\n\nSome *emphasis*.", &MarkupOptions::listing());
        assert!(html.contains("<h1>Hello</h1>"));
        assert!(html.contains("<em>emphasis</em>"));
    }

    #[test]
    fn raw_html_is_escaped() {
        let html = render("hi <script>alert(1)</script>", &MarkupOptions::detail());
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn html_block_is_escaped() {
        let html = render("<div onclick=\"x()\">boom</div>\n", &MarkupOptions::listing());
        assert!(!html.contains("<div"));
        assert!(html.contains("&lt;div"));
    }

    #[test]
    fn detail_turns_newlines_into_breaks() {
        let html = render("first line\nsecond line", &MarkupOptions::detail());
        assert!(html.contains("first line<br />"));
    }

    #[test]
    fn listing_keeps_soft_breaks() {
        let html = render("first line\nsecond line", &MarkupOptions::listing());
        assert!(!html.contains("<br"));
    }

    #[test]
    fn fenced_code_gets_language_class() {
        let source = "```rust\nfn main() {}\n```\n";
        let html = render(source, &MarkupOptions::detail());
        assert!(html.contains("<pre><code class=\"language-rust\">fn main() {}"));
    }

    #[test]
    fn code_contents_are_escaped() {
        let html = render("```\n<b>bold?</b>\n```\n", &MarkupOptions::listing());
        assert!(html.contains("&lt;b&gt;bold?&lt;/b&gt;"));
    }
}
