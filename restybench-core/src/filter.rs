//! Picks the report lines worth showing out of the load generator's output.

/// Labels of the metric lines kept from an ApacheBench report.
pub const RELEVANT_LABELS: [&str; 6] = [
    "Document Length",
    "Document Path",
    "Failed requests",
    "Time taken",
    "Total transferred",
    "Requests per second",
];

/// Whether `line` carries one of the relevant labels.
#[inline]
pub fn is_relevant(line: &str) -> bool {
    RELEVANT_LABELS.iter().any(|label| line.contains(label))
}

/// Relevant lines of `output`, in their original order.
pub fn filter_lines(output: &str) -> impl Iterator<Item = &str> {
    output.lines().filter(|line| is_relevant(line))
}
