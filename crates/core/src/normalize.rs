//! Pre-parse markup normalization.
//!
//! The embedded markdown parser rejects inline HTML whose tag bodies span
//! multiple lines. Before parsing, whitespace inside tag-bearing spans is
//! collapsed to single spaces so multi-line tags arrive on one line, while
//! prose paragraphs and fenced code blocks pass through untouched.

/// Tracks code fence state for line-by-line processing.
///
/// Used to keep whitespace collapsing away from fenced code blocks.
#[derive(Default)]
struct FenceTracker {
    in_fence: bool,
    marker: Option<char>,
    open_len: usize,
    open_indent: usize,
}

impl FenceTracker {
    /// Advance the fence state for a single line. Returns `true` if the line
    /// is a fence delimiter (opening or closing).
    fn advance(&mut self, trimmed: &str, line_indent: usize) -> bool {
        let looks_like_fence = trimmed.starts_with("```") || trimmed.starts_with("~~~");
        if !looks_like_fence {
            return false;
        }
        // CommonMark: a closer indented 4+ columns is content, not a delimiter.
        if self.in_fence && line_indent > self.open_indent + 3 {
            return false;
        }

        let marker = trimmed.as_bytes()[0] as char;
        let count = trimmed.chars().take_while(|&c| c == marker).count();
        if self.in_fence {
            if Some(marker) == self.marker && count >= self.open_len {
                self.in_fence = false;
                self.marker = None;
                self.open_len = 0;
            }
        } else {
            self.in_fence = true;
            self.marker = Some(marker);
            self.open_len = count;
            self.open_indent = line_indent;
        }
        true
    }

    fn is_in_fence(&self) -> bool {
        self.in_fence
    }
}

/// Returns true if the byte following `<` makes the angle bracket look like
/// the start of an HTML tag (letter, `/` for closers, `!` for comments).
fn is_tag_opener(bytes: &[u8], lt: usize) -> bool {
    match bytes.get(lt + 1) {
        Some(b) => b.is_ascii_alphabetic() || *b == b'/' || *b == b'!',
        None => false,
    }
}

/// Collapses every whitespace run in `span` (newlines included) to one space.
fn collapse_whitespace(span: &str) -> String {
    let mut out = String::with_capacity(span.len());
    let mut in_ws = false;
    for c in span.chars() {
        if c.is_whitespace() {
            if !in_ws {
                out.push(' ');
                in_ws = true;
            }
        } else {
            out.push(c);
            in_ws = false;
        }
    }
    out
}

/// Collapses a single markup run: from the first tag-opening `<` through the
/// last `>`, whitespace runs become single spaces. Text outside that span is
/// preserved verbatim, as is a run containing no complete tag span.
fn collapse_run(run: &str) -> String {
    let bytes = run.as_bytes();
    let start = run
        .char_indices()
        .find(|&(i, c)| c == '<' && is_tag_opener(bytes, i))
        .map(|(i, _)| i);
    let end = run.rfind('>');

    match (start, end) {
        (Some(s), Some(e)) if e > s => {
            let mut out = String::with_capacity(run.len());
            out.push_str(&run[..s]);
            out.push_str(&collapse_whitespace(&run[s..=e]));
            out.push_str(&run[e + 1..]);
            out
        }
        _ => run.to_string(),
    }
}

/// Collapses whitespace inside tag-bearing spans of the input markup.
///
/// The input is split into *markup runs*: maximal groups of consecutive
/// non-blank lines outside fenced code blocks. Within each run, the span
/// from the first tag-opening `<` to the last `>` has all whitespace runs
/// collapsed to single spaces. Blank-line separated paragraphs without tags
/// and fenced code bodies are left exactly as written.
pub fn collapse_tag_whitespace(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut fence = FenceTracker::default();
    let mut run = String::new();

    let mut flush = |run: &mut String, output: &mut String| {
        if !run.is_empty() {
            output.push_str(&collapse_run(run));
            run.clear();
        }
    };

    for line in input.split_inclusive('\n') {
        let body = line.strip_suffix('\n').unwrap_or(line);
        let body = body.strip_suffix('\r').unwrap_or(body);
        let trimmed = body.trim_start();
        let indent = body.len() - trimmed.len();

        if fence.advance(trimmed, indent) || fence.is_in_fence() || trimmed.is_empty() {
            flush(&mut run, &mut output);
            output.push_str(line);
            continue;
        }

        run.push_str(line);
    }
    flush(&mut run, &mut output);

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_multiline_tag_body() {
        let input = "<div>\n  hello\n</div>";
        assert_eq!(collapse_tag_whitespace(input), "<div> hello </div>");
    }

    #[test]
    fn test_multiline_attributes_joined() {
        let input = "<img\n  src=\"x\"\n/>\n";
        assert_eq!(collapse_tag_whitespace(input), "<img src=\"x\" />\n");
    }

    #[test]
    fn test_prose_without_tags_untouched() {
        let input = "first  line\nsecond   line\n";
        assert_eq!(collapse_tag_whitespace(input), input);
    }

    #[test]
    fn test_blank_line_separated_paragraph_untouched() {
        let input = "<br>\n\nplain    text\nstays\n";
        let result = collapse_tag_whitespace(input);
        assert!(
            result.contains("plain    text\nstays\n"),
            "Paragraph after blank line must not be collapsed. Got: {}",
            result
        );
    }

    #[test]
    fn test_text_around_span_preserved() {
        let input = "see <b>\nbold</b> end\n";
        assert_eq!(collapse_tag_whitespace(input), "see <b> bold</b> end\n");
    }

    #[test]
    fn test_fenced_code_untouched() {
        let input = "```\n<div>\n  x\n</div>\n```\n";
        assert_eq!(collapse_tag_whitespace(input), input);
    }

    #[test]
    fn test_longer_fence_not_closed_by_shorter() {
        let input = "````\n```\n<span>\n  y\n</span>\n```\n````\n";
        assert_eq!(collapse_tag_whitespace(input), input);
    }

    #[test]
    fn test_lone_angle_bracket_is_not_a_tag() {
        let input = "a < b\nand b > c\n";
        assert_eq!(collapse_tag_whitespace(input), input);
    }

    #[test]
    fn test_tag_without_closer_untouched() {
        let input = "broken <div\nno close\n";
        assert_eq!(collapse_tag_whitespace(input), input);
    }

    #[test]
    fn test_crlf_lines_collapse() {
        let input = "<div>\r\n  hi\r\n</div>\r\n";
        assert_eq!(collapse_tag_whitespace(input), "<div> hi </div>\r\n");
    }
}
