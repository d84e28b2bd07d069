//! Source text positions and ranges.

use std::fmt;

use smol_str::SmolStr;

pub use text_size::{TextRange, TextSize};

/// A line and column position in source text.
///
/// Both are stored 0-indexed. Display shows the line 1-indexed and the
/// column as is, the convention of `Loc` strings.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default, PartialOrd, Ord)]
pub struct LineCol {
    /// 0-indexed line number
    pub line: u32,
    /// 0-indexed column (in UTF-8 bytes, not characters)
    pub col: u32,
}

impl LineCol {
    /// Create a new LineCol position.
    #[inline]
    pub const fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }

    /// Get 1-indexed line number (for display).
    #[inline]
    pub const fn line_one_indexed(self) -> u32 {
        self.line + 1
    }
}

impl fmt::Debug for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line_one_indexed(), self.col)
    }
}

impl fmt::Display for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line_one_indexed(), self.col)
    }
}

/// The location of a declaration: a start/end pair of line/column
/// positions, optionally tagged with the name of the file it came from.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Loc {
    /// File the location points into (`None` for in-memory sources).
    pub file: Option<SmolStr>,
    /// Position of the first byte.
    pub start: LineCol,
    /// Position just past the last byte.
    pub end: LineCol,
}

impl Loc {
    /// Create a location without a file.
    pub const fn new(start: LineCol, end: LineCol) -> Self {
        Self {
            file: None,
            start,
            end,
        }
    }

    /// Tag the location with a file name.
    pub fn with_file(mut self, file: impl Into<SmolStr>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Extend this location so it ends where `other` ends.
    pub fn join(&self, other: &Loc) -> Loc {
        Loc {
            file: self.file.clone(),
            start: self.start,
            end: other.end,
        }
    }
}

impl fmt::Display for Loc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = self.file.as_deref().unwrap_or("-");
        write!(f, "{}:{}-{}", file, self.start, self.end)
    }
}

/// Index for converting between byte offsets and line/column positions.
#[derive(Clone, Debug)]
pub struct LineIndex {
    /// Byte offset of the start of each line
    line_starts: Vec<TextSize>,
}

impl LineIndex {
    /// Index the line starts of `text`. Only `\n` ends a line; a `\r`
    /// before it counts as the last column of the line.
    pub fn new(text: &str) -> Self {
        let line_starts = std::iter::once(TextSize::from(0))
            .chain(text.match_indices('\n').map(|(i, _)| to_size(i + 1)))
            .collect();
        Self { line_starts }
    }

    /// Line and column of a byte offset. Offsets past the end land on the
    /// last line.
    pub fn line_col(&self, offset: TextSize) -> LineCol {
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let col = offset - self.line_starts[line];
        LineCol::new(u32::try_from(line).unwrap_or(u32::MAX), col.into())
    }

    /// Convert a byte range to a [`Loc`].
    pub fn loc(&self, range: TextRange) -> Loc {
        Loc::new(self.line_col(range.start()), self.line_col(range.end()))
    }

    /// Number of lines, counting a trailing empty one.
    pub fn len(&self) -> usize {
        self.line_starts.len()
    }

    /// Always false: even empty text has one line.
    pub fn is_empty(&self) -> bool {
        self.line_starts.is_empty()
    }
}

fn to_size(offset: usize) -> TextSize {
    TextSize::new(u32::try_from(offset).unwrap_or(u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col_display() {
        let pos = LineCol::new(0, 0);
        assert_eq!(format!("{}", pos), "1:0");

        let pos = LineCol::new(5, 10);
        assert_eq!(format!("{}", pos), "6:10");
    }

    #[test]
    fn test_line_index_single_line() {
        let index = LineIndex::new("module Foo; end");

        assert_eq!(index.line_col(TextSize::from(0)), LineCol::new(0, 0));
        assert_eq!(index.line_col(TextSize::from(7)), LineCol::new(0, 7));
    }

    #[test]
    fn test_line_index_multi_line() {
        let index = LineIndex::new("module A\n  X = 1\nend");

        assert_eq!(index.line_col(TextSize::from(0)), LineCol::new(0, 0));
        assert_eq!(index.line_col(TextSize::from(9)), LineCol::new(1, 0));
        assert_eq!(index.line_col(TextSize::from(11)), LineCol::new(1, 2));
        assert_eq!(index.line_col(TextSize::from(17)), LineCol::new(2, 0));
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn test_loc_from_range() {
        let index = LineIndex::new("class Foo\nend");
        let loc = index.loc(TextRange::new(TextSize::from(0), TextSize::from(13)));

        assert_eq!(loc.start, LineCol::new(0, 0));
        assert_eq!(loc.end, LineCol::new(1, 3));
    }

    #[test]
    fn test_loc_display() {
        let loc = Loc::new(LineCol::new(0, 0), LineCol::new(2, 3));
        assert_eq!(loc.to_string(), "-:1:0-3:3");

        let loc = loc.with_file("foo.rbi");
        assert_eq!(loc.to_string(), "foo.rbi:1:0-3:3");
    }

    #[test]
    fn test_loc_join() {
        let a = Loc::new(LineCol::new(0, 0), LineCol::new(0, 4)).with_file("a.rbi");
        let b = Loc::new(LineCol::new(3, 0), LineCol::new(3, 3));

        let joined = a.join(&b);
        assert_eq!(joined.start, LineCol::new(0, 0));
        assert_eq!(joined.end, LineCol::new(3, 3));
        assert_eq!(joined.file.as_deref(), Some("a.rbi"));
    }
}
