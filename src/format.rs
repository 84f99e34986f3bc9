//! Joins the statements of a run into the final output text.

use std::io::{self, Write};

use itertools::Itertools;

use crate::batch::{BatchMode, BatchOutput};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatOptions {
    /// Sort the rendered statements lexicographically.
    pub sort: bool,
}

/// Renders all statements, without a trailing newline.
///
/// Single mode joins with `",\n"`; list mode joins with `",\n  "` inside `"[ "` / `" ]"`.
pub fn render(output: &BatchOutput, options: FormatOptions) -> String {
    let mut rendered = output
        .statements
        .iter()
        .map(|s| s.to_string())
        .collect_vec();

    if options.sort {
        rendered.sort();
    }

    match output.mode {
        BatchMode::List => format!("[ {} ]", rendered.join(",\n  ")),
        BatchMode::Single => rendered.join(",\n"),
    }
}

/// Writes `rendered` followed by a single newline.
pub fn write_output<W: Write>(writer: &mut W, rendered: &str) -> io::Result<()> {
    writeln!(writer, "{rendered}")?;
    writer.flush()
}
