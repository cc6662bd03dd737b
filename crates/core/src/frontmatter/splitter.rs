//! Format detection and splitting of a document into front matter and content.

use super::errors::FrontMatterError;
use super::types::FormatMark;
use serde::de::IgnoredAny;

/// Byte ranges of a document with front matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split<'a> {
    pub mark: FormatMark,
    /// Front matter including its delimiters and the terminator of the
    /// closing line.
    pub front_matter: &'a [u8],
    /// Payload strictly between the delimiter lines.
    pub metadata: &'a [u8],
    /// Everything after the front matter, untouched.
    pub content: &'a [u8],
}

/// Split a document at its first closing delimiter.
///
/// Delimiters must start at byte 0:
/// ```text
/// +++
/// title = "Hello"
/// +++
/// Content
/// ```
pub fn split(raw: &[u8]) -> Result<Split<'_>, FrontMatterError> {
    let candidates = split_candidates(raw)?;
    candidates.into_iter().next().ok_or(FrontMatterError::NoFrontMatter)
}

/// Every plausible split of the document, in document order.
///
/// For `---` and `+++` blocks each later line equal to the delimiter is a
/// candidate end; a delimiter-like line may sit inside a multi-line string,
/// so only a structural parser can tell which candidate is real. A JSON
/// block has exactly one candidate. Never returns an empty list.
pub fn split_candidates(raw: &[u8]) -> Result<Vec<Split<'_>>, FrontMatterError> {
    let mark = raw
        .first()
        .copied()
        .and_then(FormatMark::from_leading_byte)
        .ok_or(FrontMatterError::NoFrontMatter)?;

    match mark.delimiter() {
        Some(delimiter) => delimited_candidates(raw, mark, delimiter.as_bytes()),
        None => json_object(raw).map(|split| vec![split]),
    }
}

fn delimited_candidates<'a>(
    raw: &'a [u8],
    mark: FormatMark,
    delimiter: &[u8],
) -> Result<Vec<Split<'a>>, FrontMatterError> {
    let mut lines = Lines { raw, pos: 0 };

    // `---` followed by anything else on the line is ordinary content,
    // e.g. a markdown rule `----` or a list item.
    let opening = match lines.next() {
        Some(line) if line.text(raw) == delimiter => line,
        _ => return Err(FrontMatterError::NoFrontMatter),
    };

    let candidates: Vec<Split<'a>> = lines
        .filter(|line| line.text(raw) == delimiter)
        .map(|closing| Split {
            mark,
            front_matter: &raw[..closing.next],
            metadata: &raw[opening.next..closing.start],
            content: &raw[closing.next..],
        })
        .collect();

    if candidates.is_empty() {
        return Err(FrontMatterError::UnterminatedFrontMatter { format: mark });
    }
    Ok(candidates)
}

fn json_object(raw: &[u8]) -> Result<Split<'_>, FrontMatterError> {
    let mut stream = serde_json::Deserializer::from_slice(raw).into_iter::<IgnoredAny>();
    match stream.next() {
        Some(Ok(_)) => {}
        Some(Err(e)) if e.is_eof() => {
            return Err(FrontMatterError::UnterminatedFrontMatter {
                format: FormatMark::Brace,
            });
        }
        Some(Err(e)) => return Err(FrontMatterError::decode(FormatMark::Brace, e)),
        None => {
            return Err(FrontMatterError::UnterminatedFrontMatter {
                format: FormatMark::Brace,
            });
        }
    }

    let end = stream.byte_offset();
    let rest = &raw[end..];
    let newline = if rest.starts_with(b"\r\n") {
        2
    } else if rest.starts_with(b"\n") {
        1
    } else {
        0
    };

    Ok(Split {
        mark: FormatMark::Brace,
        front_matter: &raw[..end + newline],
        metadata: &raw[..end],
        content: &raw[end + newline..],
    })
}

/// A line of the document as byte offsets.
#[derive(Debug, Clone, Copy)]
struct Line {
    start: usize,
    /// End of the line text, excluding `\n` or `\r\n`.
    end: usize,
    /// Start of the following line.
    next: usize,
}

impl Line {
    fn text<'a>(&self, raw: &'a [u8]) -> &'a [u8] {
        &raw[self.start..self.end]
    }
}

struct Lines<'a> {
    raw: &'a [u8],
    pos: usize,
}

impl Iterator for Lines<'_> {
    type Item = Line;

    fn next(&mut self) -> Option<Line> {
        if self.pos >= self.raw.len() {
            return None;
        }
        let start = self.pos;
        let (mut end, next) = match self.raw[start..].iter().position(|&b| b == b'\n') {
            Some(i) => (start + i, start + i + 1),
            None => (self.raw.len(), self.raw.len()),
        };
        if end > start && self.raw[end - 1] == b'\r' {
            end -= 1;
        }
        self.pos = next;
        Some(Line { start, end, next })
    }
}
