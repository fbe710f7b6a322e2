//! Locating a new-file line relative to the diff hunks.

use super::hunk::DiffHunk;

/// Where a new-file line sits relative to the hunks of a diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HunkPosition<'a> {
    /// Inside the new-side span `(new_s, new_e]` of this hunk.
    InHunk(&'a DiffHunk),
    /// In unchanged text. `before` is the nearest preceding hunk, `after` the
    /// nearest following one (informational). Both are `None` when the diff
    /// has no hunks.
    Between {
        before: Option<&'a DiffHunk>,
        after: Option<&'a DiffHunk>,
    },
    /// Not covered by any rule. Every line of a well-formed hunk list
    /// matches one of the rules above, so this is a fallback only.
    Unknown,
}

/// Classify new-file `line` against `hunks`, which must be in diff order.
pub fn find_hunk_position(line: usize, hunks: &[DiffHunk]) -> HunkPosition<'_> {
    let Some(first) = hunks.first() else {
        return HunkPosition::Between {
            before: None,
            after: None,
        };
    };

    if line <= first.new_s {
        return HunkPosition::Between {
            before: None,
            after: Some(first),
        };
    }

    for (i, hunk) in hunks.iter().enumerate() {
        if hunk.new_s < line && line <= hunk.new_e {
            return HunkPosition::InHunk(hunk);
        }
        match hunks.get(i + 1) {
            Some(next) if hunk.new_e < line && line <= next.new_s => {
                return HunkPosition::Between {
                    before: Some(hunk),
                    after: Some(next),
                };
            }
            None if hunk.new_e < line => {
                return HunkPosition::Between {
                    before: Some(hunk),
                    after: None,
                };
            }
            _ => {}
        }
    }

    HunkPosition::Unknown
}
