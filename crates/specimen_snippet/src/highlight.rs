//! Syntax highlighting of generated snippets.
//!
//! Output is class-based HTML (`<span class="entity name tag html">`), so
//! the page chooses the theme through its own style sheet.

use once_cell::sync::Lazy;
use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::error::SnippetError;

static SYNTAX_SET: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);

/// Grammar to highlight with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grammar {
    /// HTML; embedded `<style>` blocks are highlighted as CSS.
    Markup,
    Css,
}

impl Grammar {
    #[inline]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Markup => "html",
            Self::Css => "css",
        }
    }

    #[inline]
    pub const fn language_class(self) -> &'static str {
        match self {
            Self::Markup => "language-html",
            Self::Css => "language-css",
        }
    }

    fn syntax(self) -> &'static SyntaxReference {
        SYNTAX_SET
            .find_syntax_by_extension(self.extension())
            .unwrap_or_else(|| SYNTAX_SET.find_syntax_plain_text())
    }
}

/// Highlight `source` into a `<pre><code>` fragment.
pub fn highlight(source: &str, grammar: Grammar) -> Result<String, SnippetError> {
    let mut generator = ClassedHTMLGenerator::new_with_class_style(
        grammar.syntax(),
        &SYNTAX_SET,
        ClassStyle::Spaced,
    );
    for line in LinesWithEndings::from(source) {
        generator.parse_html_for_line_which_includes_newline(line)?;
    }

    Ok(format!(
        "<pre><code class=\"{}\">{}</code></pre>",
        grammar.language_class(),
        generator.finalize()
    ))
}

/// Escaped, unhighlighted fallback for when highlighting fails.
pub fn plain(source: &str, grammar: Grammar) -> String {
    format!(
        "<pre><code class=\"{}\">{}</code></pre>",
        grammar.language_class(),
        htmlize::escape_text(source)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Text content of highlighted HTML, still entity-escaped.
    fn text_of(html: &str) -> String {
        let mut out = String::new();
        let mut in_tag = false;
        for c in html.chars() {
            match c {
                '<' => in_tag = true,
                '>' => in_tag = false,
                _ if !in_tag => out.push(c),
                _ => {}
            }
        }
        out
    }

    #[test]
    fn test_markup_is_escaped_and_wrapped() {
        let html = highlight("<foo-bar disabled></foo-bar>", Grammar::Markup).unwrap();

        assert!(html.starts_with("<pre><code class=\"language-html\">"));
        assert!(html.ends_with("</code></pre>"));
        assert!(html.contains("<span class="));
        assert!(!html.contains("<foo-bar"));
        assert_eq!(text_of(&html), "&lt;foo-bar disabled&gt;&lt;/foo-bar&gt;");
    }

    #[test]
    fn test_css_grammar() {
        let html = highlight("foo-bar {\n  --x: 2px;\n}\n", Grammar::Css).unwrap();
        assert!(html.starts_with("<pre><code class=\"language-css\">"));
        assert_eq!(text_of(&html), "foo-bar {\n  --x: 2px;\n}\n");
    }

    #[test]
    fn test_plain() {
        assert_eq!(
            plain("<a>", Grammar::Markup),
            "<pre><code class=\"language-html\">&lt;a&gt;</code></pre>"
        );
    }
}
