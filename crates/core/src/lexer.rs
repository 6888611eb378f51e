/// Lexical class of a run of Lua source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegKind {
    /// Anything that is not a literal or a comment.
    Code,
    /// A long-bracket string literal (`[[...]]`, `[==[...]==]`).
    LongString,
    /// A single- or double-quoted string literal, delimiters included.
    QuotedString,
    /// A `--` comment running to the end of its line (line break excluded).
    LineComment,
    /// A long-bracket comment (`--[[...]]`, `--[=[...]=]`).
    BlockComment,
}

impl SegKind {
    /// Whether this segment is a comment of either form.
    pub fn is_comment(self) -> bool {
        matches!(self, SegKind::LineComment | SegKind::BlockComment)
    }
}

/// A segment that borrows its text directly from the source input.
///
/// `text` is always exactly `&input[start..end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    /// The classification of this segment.
    pub kind: SegKind,
    /// Borrowed slice of the source input.
    pub text: &'a str,
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
}

/// Split Lua source into code, literal, and comment segments.
///
/// Adjacent code bytes are merged into a single `Code` segment, so code and
/// non-code segments alternate. Concatenating every segment's `text` yields
/// the input unchanged.
///
/// Unterminated long brackets and quotes are not literals: the opening
/// delimiter is kept as code and scanning resumes right after it. A `--`
/// followed by an unterminated long bracket is a line comment.
///
/// # Byte scanning
///
/// Every delimiter is ASCII, and UTF-8 continuation bytes are in the range
/// 0x80-0xBF, so segment boundaries always land on `char` boundaries.
pub fn segment(input: &str) -> Vec<Segment<'_>> {
    let b = input.as_bytes();
    let mut segs = Vec::new();
    let mut code_start = 0usize;
    let mut i = 0usize;

    while i < b.len() {
        let found = match b[i] {
            b'-' if b.get(i + 1) == Some(&b'-') => Some(comment_at(b, i)),
            b'[' => long_bracket_at(b, i).map(|end| (SegKind::LongString, end)),
            b'"' | b'\'' => quoted_end(b, i).map(|end| (SegKind::QuotedString, end)),
            _ => None,
        };

        match found {
            Some((kind, end)) => {
                if code_start < i {
                    segs.push(Segment {
                        kind: SegKind::Code,
                        text: &input[code_start..i],
                        start: code_start,
                        end: i,
                    });
                }
                segs.push(Segment {
                    kind,
                    text: &input[i..end],
                    start: i,
                    end,
                });
                i = end;
                code_start = end;
            }
            None => i += 1,
        }
    }

    if code_start < b.len() {
        segs.push(Segment {
            kind: SegKind::Code,
            text: &input[code_start..],
            start: code_start,
            end: b.len(),
        });
    }
    segs
}

/// Classify the comment whose `--` opener sits at `start` and return its end.
///
/// A long-bracket opener right after `--` with a matching close makes a block
/// comment; anything else runs to the end of the line.
pub fn comment_at(b: &[u8], start: usize) -> (SegKind, usize) {
    if let Some(end) = long_bracket_at(b, start + 2) {
        return (SegKind::BlockComment, end);
    }
    (SegKind::LineComment, line_end(b, start + 2))
}

/// Count the `=` signs of a long-bracket opener `[=*[` at `start`.
pub fn long_bracket_level(b: &[u8], start: usize) -> Option<usize> {
    if b.get(start) != Some(&b'[') {
        return None;
    }
    let mut j = start + 1;
    while b.get(j) == Some(&b'=') {
        j += 1;
    }
    (b.get(j) == Some(&b'[')).then_some(j - start - 1)
}

/// End offset (exclusive) of a terminated long bracket opening at `start`.
///
/// The close must carry exactly as many `=` signs as the opener; the first
/// such close wins.
pub fn long_bracket_at(b: &[u8], start: usize) -> Option<usize> {
    let level = long_bracket_level(b, start)?;
    let mut i = start + level + 2;
    while i < b.len() {
        if b[i] == b']' {
            let mut j = i + 1;
            while b.get(j) == Some(&b'=') {
                j += 1;
            }
            if j - i - 1 == level && b.get(j) == Some(&b']') {
                return Some(j + 1);
            }
            // `]==]` with the wrong count may still end in a valid close,
            // so resume at the next `]` rather than past the run.
            i = j;
            continue;
        }
        i += 1;
    }
    None
}

/// End offset (exclusive) of a quoted literal opening at `start`.
///
/// A backslash escapes the following byte, including a quote or a line
/// break. An unescaped line break ends the scan without a match.
pub fn quoted_end(b: &[u8], start: usize) -> Option<usize> {
    let quote = b[start];
    let mut i = start + 1;
    while i < b.len() {
        match b[i] {
            b'\\' if b.get(i + 1) == Some(&b'\r') && b.get(i + 2) == Some(&b'\n') => i += 3,
            b'\\' => i += 2,
            b'\n' | b'\r' => return None,
            c if c == quote => return Some(i + 1),
            _ => i += 1,
        }
    }
    None
}

/// Offset of the first `\r` or `\n` at or after `from`, or the input length.
pub fn line_end(b: &[u8], from: usize) -> usize {
    let mut i = from.min(b.len());
    while i < b.len() && b[i] != b'\n' && b[i] != b'\r' {
        i += 1;
    }
    i
}
