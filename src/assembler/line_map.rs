//! Maps byte offsets back to lines and columns.

/// Sorted byte offsets at which each line begins.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct LineMap {
    starts: Vec<usize>,
}

impl LineMap {
    /// Line 0 always starts at offset 0; every `\n` starts a new line.
    pub fn new(source: &str) -> Self {
        let mut starts = Vec::with_capacity(source.len() / 16 + 1);
        starts.push(0);
        starts.extend(
            source.bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| i + 1),
        );
        LineMap { starts }
    }

    pub fn line_starts(&self) -> &[usize] {
        &self.starts
    }

    /// Zero-based line containing `offset`.
    pub fn line_of(&self, offset: usize) -> usize {
        // starts[0] == 0, so at least one start is <= offset.
        self.starts.partition_point(|&start| start <= offset) - 1
    }

    /// Zero-based (line, column) of `offset`.
    pub fn line_and_column(&self, offset: usize) -> (usize, usize) {
        let line = self.line_of(offset);
        (line, offset - self.starts[line])
    }
}
