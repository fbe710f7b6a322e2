//! Zero-context diff hunk parsing.

/// One hunk of a zero-context unified diff, in anchor form.
///
/// `*_s` is the line just before the hunk's span and `*_e` the last line of
/// it. A side with count 0 contributes only an anchor point, so `s == e`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffHunk {
    pub old_s: usize,
    pub old_c: usize,
    pub old_e: usize,
    pub new_s: usize,
    pub new_c: usize,
    pub new_e: usize,
}

impl DiffHunk {
    /// Build a hunk from the `start[,count]` pairs of a header.
    pub fn from_ranges(
        old_start: usize,
        old_count: usize,
        new_start: usize,
        new_count: usize,
    ) -> Self {
        let (old_s, old_e) = anchor_span(old_start, old_count);
        let (new_s, new_e) = anchor_span(new_start, new_count);
        Self {
            old_s,
            old_c: old_count,
            old_e,
            new_s,
            new_c: new_count,
            new_e,
        }
    }

    /// Parse a `@@ -a[,b] +c[,d] @@` header line.
    ///
    /// Returns `None` for anything else, including lines that merely start
    /// with `@@`.
    pub fn parse_header(line: &str) -> Option<Self> {
        let rest = line.strip_prefix("@@ ")?;
        let (ranges, _) = rest.split_once(" @@")?;
        let mut parts = ranges.split_whitespace();
        let (old_start, old_count) = parse_range(parts.next()?.strip_prefix('-')?)?;
        let (new_start, new_count) = parse_range(parts.next()?.strip_prefix('+')?)?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self::from_ranges(old_start, old_count, new_start, new_count))
    }
}

/// `12,3` → `(12, 3)`; `12` → `(12, 1)`.
///
/// Ranges whose end does not fit in a `usize` are rejected.
fn parse_range(range: &str) -> Option<(usize, usize)> {
    let (start, count): (usize, usize) = match range.split_once(',') {
        Some((start, count)) => (start.parse().ok()?, count.parse().ok()?),
        None => (range.parse().ok()?, 1),
    };
    start.checked_add(count)?;
    Some((start, count))
}

/// With count 0 the header's start already names the anchor line; otherwise
/// the anchor is the line before the first changed line.
fn anchor_span(start: usize, count: usize) -> (usize, usize) {
    if count == 0 {
        (start, start)
    } else {
        (start.saturating_sub(1), start + count - 1)
    }
}

/// Parse every hunk header in `diff`, in the order they appear.
///
/// Non-header lines are ignored. An empty result means the two versions are
/// line-identical.
pub fn parse_hunks(diff: &str) -> Vec<DiffHunk> {
    diff.lines()
        .filter(|line| line.starts_with("@@"))
        .filter_map(|line| {
            let hunk = DiffHunk::parse_header(line);
            if hunk.is_none() {
                log::debug!("Skipping unparseable hunk header: {line}");
            }
            hunk
        })
        .collect()
}
