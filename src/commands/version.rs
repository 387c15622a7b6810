//! Command: print version information.
use std::io::{self, Write};

use crate::version::BuildInfo;

/// Write the build information of this binary to `out`.
///
/// # Errors
///
/// Returns an error if `out` cannot be written to.
pub fn run(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "{}", BuildInfo::current())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn prints_one_line() {
        let mut out = Vec::new();
        run(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, format!("{}\n", BuildInfo::current()));
        assert_eq!(text.lines().count(), 1);
    }
}
