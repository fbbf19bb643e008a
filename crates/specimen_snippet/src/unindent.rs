//! Re-indentation of author template content.

/// Width of one indent level. Tabs expand to this.
pub const INDENT: &str = "  ";

/// Strip the common leading whitespace of `text` and prefix every line
/// with `indent`.
///
/// Tabs count as [`INDENT`]. Blank lines do not take part in computing the
/// common width but are still emitted, prefixed like any other line.
pub fn unindent(text: &str, indent: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let expanded = text.replace('\t', INDENT);
    let lines: Vec<&str> = expanded.split('\n').collect();

    let width = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| leading_width(line))
        .min()
        .unwrap_or(0);

    let mut out = String::with_capacity(expanded.len() + lines.len() * indent.len());
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(indent);
        out.push_str(strip_width(line, width));
    }
    out
}

/// Drop whitespace-only lines at both ends, keeping the indentation of the
/// first remaining line.
pub fn trim_blank_lines(text: &str) -> &str {
    let text = text.trim_end();
    let Some(first) = text.find(|c: char| !c.is_whitespace()) else {
        return "";
    };
    let start = text[..first].rfind('\n').map_or(0, |nl| nl + 1);
    &text[start..]
}

#[inline]
fn leading_width(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

#[inline]
fn strip_width(line: &str, width: usize) -> &str {
    let leading = leading_width(line);
    if leading >= width {
        line.get(width..).unwrap_or_else(|| line.trim_start())
    } else {
        line.trim_start()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_common_indent() {
        let text = "    <p>\n      hi\n    </p>";
        assert_eq!(unindent(text, ""), "<p>\n  hi\n</p>");
        assert_eq!(unindent(text, "  "), "  <p>\n    hi\n  </p>");
    }

    #[test]
    fn test_mixed_tabs_and_spaces() {
        let text = "\t\t<a></a>\n    <b></b>\n\t  <c></c>";
        assert_eq!(unindent(text, ""), "<a></a>\n<b></b>\n<c></c>");
    }

    #[test]
    fn test_blank_lines_ignored_for_width() {
        let text = "    one\n\n    two";
        assert_eq!(unindent(text, ">"), ">one\n>\n>two");
    }

    #[test]
    fn test_empty() {
        assert_eq!(unindent("", "  "), "");
    }

    #[test]
    fn test_trim_blank_lines() {
        assert_eq!(trim_blank_lines("\n  \n    <p></p>\n  \n"), "    <p></p>");
        assert_eq!(trim_blank_lines(" \n \t"), "");
        assert_eq!(trim_blank_lines("a"), "a");
    }
}
