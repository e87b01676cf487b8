use std::borrow::Cow;

use unicode_width::UnicodeWidthChar;

const ELLIPSIS: &str = "...";
const ELLIPSIS_WIDTH: usize = 3;

/// Truncates a string to at most `max_width` terminal columns.
///
/// Wide characters (Hangul, CJK, emoji) count as two columns. When the text
/// does not fit, it is cut and "..." appended; widths of 3 or less get a
/// plain cut with no ellipsis.
///
/// ```
/// use dailynews::util::truncate_to_width;
///
/// assert_eq!(truncate_to_width("Short", 10), "Short");
/// assert_eq!(truncate_to_width("Hello World", 8), "Hello...");
/// assert_eq!(truncate_to_width("코스피 상승", 7), "코스...");
/// ```
pub fn truncate_to_width(s: &str, max_width: usize) -> Cow<'_, str> {
    let budget = if max_width <= ELLIPSIS_WIDTH {
        max_width
    } else {
        max_width - ELLIPSIS_WIDTH
    };

    let mut width = 0;
    let mut cut = None;
    for (idx, c) in s.char_indices() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if cut.is_none() && width + w > budget {
            cut = Some(idx);
        }
        if width + w > max_width {
            let end = cut.unwrap_or(idx);
            return if max_width <= ELLIPSIS_WIDTH {
                Cow::Owned(s[..end].to_string())
            } else {
                Cow::Owned(format!("{}{}", &s[..end], ELLIPSIS))
            };
        }
        width += w;
    }
    Cow::Borrowed(s)
}

/// Strip terminal control characters and ANSI escape sequences.
///
/// Store text is displayed, never interpreted: CSI (`ESC [ ... final`) and
/// OSC (`ESC ] ... BEL|ST`) sequences are dropped whole, as are bare ESC and
/// every other C0 control except tab and newline. Carriage returns are
/// dropped too since they would rewrite the current line.
///
/// Returns `Cow::Borrowed` when nothing needed stripping.
pub fn strip_control_chars(s: &str) -> Cow<'_, str> {
    if !s.chars().any(is_stripped) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\x1b' {
            if !is_stripped(c) {
                out.push(c);
            }
            continue;
        }
        match chars.peek() {
            Some('[') => {
                chars.next();
                for c in chars.by_ref() {
                    if ('\x40'..='\x7e').contains(&c) {
                        break;
                    }
                }
            }
            Some(']') => {
                chars.next();
                while let Some(c) = chars.next() {
                    if c == '\x07' {
                        break;
                    }
                    if c == '\x1b' && chars.peek() == Some(&'\\') {
                        chars.next();
                        break;
                    }
                }
            }
            _ => {}
        }
    }
    Cow::Owned(out)
}

fn is_stripped(c: char) -> bool {
    c == '\x7f' || (c.is_ascii_control() && c != '\t' && c != '\n')
}
