//! Minimal byte-level markup scanning for author templates.
//!
//! Templates are short, hand written snippets. Only what the demo engine
//! needs is recognized: attribute lists, `<tag>...</tag>` blocks, the root
//! element of a fragment and `<option>` values of a `<select>`.

use memchr::{memchr, memmem};

/// A `<tag ...>content</tag>` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block<'a> {
    /// Raw attributes between the tag name and `>`.
    pub attrs: &'a str,
    /// Content between the opening and closing tags.
    pub content: &'a str,
    /// Byte offset of the opening `<`.
    pub start: usize,
}

/// Result of scanning for one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockScan<'a> {
    Found(Block<'a>, usize),
    Unterminated { start: usize },
    None,
}

/// Find the next `<tag` block starting at byte `from`.
///
/// On success returns the block and the offset just past its closing tag.
pub fn next_block<'a>(source: &'a str, tag: &str, from: usize) -> BlockScan<'a> {
    let bytes = source.as_bytes();
    let open = format!("<{tag}");
    let close = format!("</{tag}>");
    let open_finder = memmem::Finder::new(open.as_bytes());

    let mut pos = from;
    while pos < bytes.len() {
        let Some(offset) = open_finder.find(&bytes[pos..]) else {
            return BlockScan::None;
        };
        let start = pos + offset;
        let after_name = start + open.len();

        // `<templates` or `<template-x` are different tags
        if after_name < bytes.len()
            && !bytes[after_name].is_ascii_whitespace()
            && bytes[after_name] != b'>'
        {
            pos = after_name;
            continue;
        }

        let Some(tag_end) = memchr(b'>', &bytes[after_name..]) else {
            return BlockScan::Unterminated { start };
        };
        let tag_end = after_name + tag_end;
        let content_start = tag_end + 1;

        let Some(close_offset) = memmem::find(&bytes[content_start..], close.as_bytes()) else {
            return BlockScan::Unterminated { start };
        };
        let close_pos = content_start + close_offset;

        return BlockScan::Found(
            Block {
                attrs: source[after_name..tag_end].trim(),
                content: &source[content_start..close_pos],
                start,
            },
            close_pos + close.len(),
        );
    }

    BlockScan::None
}

/// Parse an attribute list into `(name, value)` pairs, in source order.
///
/// Boolean attributes have no value. Quoted and unquoted values are
/// supported.
pub fn attributes(attrs: &str) -> Vec<(&str, Option<&str>)> {
    let bytes = attrs.as_bytes();
    let mut out = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        while i < bytes.len() && (bytes[i].is_ascii_whitespace() || bytes[i] == b'/') {
            i += 1;
        }
        if i >= bytes.len() {
            break;
        }

        let name_start = i;
        while i < bytes.len()
            && !bytes[i].is_ascii_whitespace()
            && bytes[i] != b'='
            && bytes[i] != b'>'
            && bytes[i] != b'/'
        {
            i += 1;
        }
        let name = &attrs[name_start..i];
        if name.is_empty() {
            i += 1;
            continue;
        }

        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }

        if i < bytes.len() && bytes[i] == b'=' {
            i += 1;
            while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            if i >= bytes.len() {
                out.push((name, Some("")));
                break;
            }
            let quote = bytes[i];
            if quote == b'"' || quote == b'\'' {
                let value_start = i + 1;
                let end = memchr(quote, &bytes[value_start..])
                    .map(|o| value_start + o)
                    .unwrap_or(bytes.len());
                out.push((name, Some(&attrs[value_start..end])));
                i = end + 1;
            } else {
                let value_start = i;
                while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b'>' {
                    i += 1;
                }
                out.push((name, Some(&attrs[value_start..i])));
            }
        } else {
            out.push((name, None));
        }
    }

    out
}

/// Value of attribute `name`, if present with a value.
#[inline]
pub fn extract_attr<'a>(attrs: &'a str, name: &str) -> Option<&'a str> {
    attributes(attrs)
        .into_iter()
        .find(|(n, _)| *n == name)
        .and_then(|(_, v)| v)
}

/// The first element of a markup fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootElement<'a> {
    pub tag: &'a str,
    pub attrs: Vec<(&'a str, Option<&'a str>)>,
    pub self_closing: bool,
}

/// Find the first element of a fragment, skipping text and comments.
pub fn root_element(markup: &str) -> Option<RootElement<'_>> {
    let bytes = markup.as_bytes();
    let mut pos = 0;

    while let Some(offset) = memchr(b'<', &bytes[pos..]) {
        let start = pos + offset;
        let name_start = start + 1;
        if name_start >= bytes.len() {
            return None;
        }
        if !bytes[name_start].is_ascii_alphabetic() {
            // comment, doctype or closing tag
            pos = name_start;
            continue;
        }

        let mut name_end = name_start;
        while name_end < bytes.len()
            && (bytes[name_end].is_ascii_alphanumeric() || bytes[name_end] == b'-')
        {
            name_end += 1;
        }
        let tag_end = memchr(b'>', &bytes[name_end..]).map(|o| name_end + o)?;
        let raw_attrs = &markup[name_end..tag_end];
        let self_closing = raw_attrs.trim_end().ends_with('/');

        return Some(RootElement {
            tag: &markup[name_start..name_end],
            attrs: attributes(raw_attrs),
            self_closing,
        });
    }

    None
}

/// Option values of the first `<select>` in a fragment.
///
/// An option's value is its `value` attribute, or its trimmed text.
pub fn select_options(markup: &str) -> Vec<String> {
    let BlockScan::Found(select, _) = next_block(markup, "select", 0) else {
        return Vec::new();
    };

    let mut options = Vec::new();
    let mut pos = 0;
    while let BlockScan::Found(option, end) = next_block(select.content, "option", pos) {
        let value = extract_attr(option.attrs, "value")
            .map(str::to_string)
            .unwrap_or_else(|| option.content.trim().to_string());
        options.push(value);
        pos = end;
    }
    options
}

/// 1-based line number of a byte offset.
#[inline]
pub fn line_of(source: &str, offset: usize) -> u32 {
    let end = offset.min(source.len());
    1 + memchr::memchr_iter(b'\n', &source.as_bytes()[..end]).count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attributes() {
        let attrs = attributes(r#"data-element="foo-bar" data-target='host' hidden size=3"#);
        assert_eq!(
            attrs,
            vec![
                ("data-element", Some("foo-bar")),
                ("data-target", Some("host")),
                ("hidden", None),
                ("size", Some("3")),
            ]
        );
    }

    #[test]
    fn test_extract_attr() {
        assert_eq!(extract_attr(r#"title="Hello""#, "title"), Some("Hello"));
        assert_eq!(extract_attr(r#"title='Hello'"#, "title"), Some("Hello"));
        assert_eq!(extract_attr(r#"title=Hello"#, "title"), Some("Hello"));
        assert_eq!(extract_attr(r#"foo="bar""#, "title"), None);
        assert_eq!(extract_attr(r#"data-title="x""#, "title"), None);
    }

    #[test]
    fn test_next_block() {
        let source = "<templates></templates><template a=\"1\">x</template>";
        let BlockScan::Found(block, end) = next_block(source, "template", 0) else {
            panic!("expected block");
        };
        assert_eq!(block.attrs, "a=\"1\"");
        assert_eq!(block.content, "x");
        assert_eq!(end, source.len());
    }

    #[test]
    fn test_unterminated_block() {
        assert_eq!(
            next_block("<template>never closed", "template", 0),
            BlockScan::Unterminated { start: 0 }
        );
        assert_eq!(next_block("plain text", "template", 0), BlockScan::None);
    }

    #[test]
    fn test_root_element() {
        let root = root_element("\n  <!-- c -->\n  <foo-bar checked label=\"Hi\"></foo-bar>").unwrap();
        assert_eq!(root.tag, "foo-bar");
        assert_eq!(root.attrs, vec![("checked", None), ("label", Some("Hi"))]);
        assert!(!root.self_closing);

        assert!(root_element("<br />").unwrap().self_closing);
        assert!(root_element("just text").is_none());
    }

    #[test]
    fn test_select_options() {
        let markup = r#"
            <select>
              <option value="small">Small</option>
              <option>large</option>
            </select>
        "#;
        assert_eq!(select_options(markup), vec!["small", "large"]);
        assert!(select_options("<input>").is_empty());
    }

    #[test]
    fn test_line_of() {
        assert_eq!(line_of("a\nb\nc", 0), 1);
        assert_eq!(line_of("a\nb\nc", 4), 3);
    }
}
