use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Number of raw log lines returned by the operator `live_tail` query.
pub const TAIL_LIMIT: usize = 100;

/// Returns the last `limit` lines of the file at `path`, in original order.
///
/// A file that does not exist yet yields an empty list rather than an error:
/// the tail is queried by viewers before the first capture session has ever
/// run.
pub fn tail_lines(path: &Path, limit: usize) -> io::Result<Vec<String>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };

    let reader = BufReader::new(file);
    let mut lines: Vec<String> = Vec::new();
    for line in reader.lines() {
        lines.push(line?);
        // keep only a bounded window while streaming through the file
        if lines.len() > limit {
            lines.remove(0);
        }
    }
    Ok(lines)
}
