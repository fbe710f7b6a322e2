//! Mapping new-file lines onto old-file lines.

use std::fmt;

use super::position::HunkPosition;

/// Which end of the requested range is being mapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum Endpoint {
    Start,
    End,
}

/// A translated line in old-file coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OldLine {
    /// The line has a direct counterpart.
    Exact(usize),
    /// The line only exists in the new version; it sits just after old line `n`.
    Anchor(usize),
}

/// An inclusive, 1-based line range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl LineRange {
    /// A range as the user asked for it. Rejects line 0 and `end < start`.
    pub fn new(start: usize, end: usize) -> Result<Self, crate::git::GitError> {
        if start == 0 || end < start {
            return Err(crate::git::GitError::InvalidLineRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn single(line: usize) -> Self {
        Self {
            start: line,
            end: line,
        }
    }

    pub fn is_single(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single() {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Map one endpoint of the requested range through its hunk position.
pub fn rectify(line: usize, position: HunkPosition<'_>, endpoint: Endpoint) -> OldLine {
    match position {
        HunkPosition::InHunk(hunk) if hunk.old_c == 0 => OldLine::Anchor(match endpoint {
            Endpoint::Start => hunk.old_s,
            Endpoint::End => hunk.old_e,
        }),
        HunkPosition::InHunk(hunk) => OldLine::Exact(match endpoint {
            Endpoint::Start => hunk.old_s + 1,
            Endpoint::End => hunk.old_e,
        }),
        HunkPosition::Between {
            before: Some(hunk), ..
        } => {
            // Unchanged text keeps its distance from the preceding hunk
            let offset = line.saturating_sub(hunk.new_e);
            OldLine::Exact(hunk.old_e + offset)
        }
        HunkPosition::Between { before: None, .. } | HunkPosition::Unknown => OldLine::Exact(line),
    }
}

/// Resolve both translated endpoints into a concrete old-file range.
pub fn reconcile(start: OldLine, end: OldLine) -> LineRange {
    let range = match (start, end) {
        (OldLine::Anchor(a), OldLine::Anchor(b)) if a == b => LineRange::single(a.max(1)),
        (OldLine::Anchor(a), OldLine::Anchor(b)) => LineRange { start: a + 1, end: b },
        (OldLine::Anchor(a), OldLine::Exact(b)) => LineRange { start: a + 1, end: b },
        (OldLine::Exact(a), OldLine::Anchor(b)) | (OldLine::Exact(a), OldLine::Exact(b)) => {
            LineRange { start: a, end: b }
        }
    };
    if range.start > range.end {
        log::warn!(
            "Translated range is inverted ({}..{}); keeping it",
            range.start,
            range.end
        );
    }
    range
}
