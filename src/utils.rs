/// Converts a 1-based line and column, as reported by `serde_json`, into a
/// byte offset into `source`. The result is clamped to the source length so
/// it can always be used as a span start.
pub fn byte_offset(source: &str, line: usize, column: usize) -> usize {
    if line == 0 {
        return 0;
    }
    let line_start: usize = source
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(source.len())
}
