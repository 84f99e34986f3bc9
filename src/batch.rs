//! # Line-oriented batch processing
//!
//! Input is consumed one physical line at a time. The first line fixes the
//! [`BatchMode`] for the whole run:
//!
//! - a line opening with `"[ "` is a GAP list of partial permutations, e.g.
//!   `[ [1,2](2,3), <identity partial perm on [ 4, 5 ]> ]`. It is split into its
//!   items and no further line is accepted;
//! - anything else is a single token, and every following line is another,
//!   independent token.
//!
//! A bare chain such as `[1,2]` contains no space and is therefore a single token,
//! not a list.

use std::io::{self, BufRead};

use log::debug;
use thiserror::Error;

use crate::{
    parser::{reconstruct, NotationError},
    statement::ConstructorStatement,
};

/// Opening of a GAP list literal.
pub const LIST_OPENER: &str = "[ ";

const ITEM_SEPARATOR: char = ';';

/// Item boundaries inside a list line, and what each is rewritten to.
const ITEM_BOUNDARIES: [(&str, &str); 3] = [
    (", (", "; ("),
    (", [", "; ["),
    (", <identity", "; <identity"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BatchMode {
    Single,
    List,
}

impl BatchMode {
    pub fn detect(first_line: &str) -> Self {
        if first_line.trim().starts_with(LIST_OPENER) {
            BatchMode::List
        } else {
            BatchMode::Single
        }
    }
}

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("invalid partial permutation on line {line_number}")]
    Notation {
        line_number: usize,
        #[source]
        source: NotationError,
    },

    #[error("list input must fit on one line, found another at line {line_number}: {line}")]
    MultiLineInListMode { line_number: usize, line: String },

    #[error("failed to read input")]
    Io(#[from] io::Error),
}

/// Splits a list line into its trimmed items.
///
/// ```
/// use pperm::batch::split_list_line;
///
/// let items = split_list_line("[ [1,2](2,3), <identity partial perm on [ 4, 5 ]> ]").unwrap();
/// assert_eq!(items, vec!["[1,2](2,3)", "<identity partial perm on [ 4, 5 ]>"]);
/// ```
pub fn split_list_line(line: &str) -> Result<Vec<String>, NotationError> {
    let normalized = ITEM_BOUNDARIES
        .iter()
        .fold(line.trim().to_string(), |acc, &(from, to)| acc.replace(from, to));

    let inner = normalized
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| NotationError::unrecognized(line.trim()))?;

    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }

    Ok(inner
        .split(ITEM_SEPARATOR)
        .map(|item| item.trim().to_string())
        .collect())
}

/// The statements of one run, together with the mode they were read in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutput {
    pub mode: BatchMode,
    pub statements: Vec<ConstructorStatement>,
}

/// Feeds lines one at a time; the mode is decided by the first line and never revisited.
#[derive(Debug, Default)]
pub struct BatchController {
    mode: Option<BatchMode>,
    line_number: usize,
    statements: Vec<ConstructorStatement>,
}

impl BatchController {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` until the first line has been pushed.
    pub fn mode(&self) -> Option<BatchMode> {
        self.mode
    }

    pub fn statements(&self) -> &[ConstructorStatement] {
        &self.statements
    }

    pub fn push_line(&mut self, line: &str) -> Result<(), BatchError> {
        self.line_number += 1;
        let line = line.trim();

        let mode = match self.mode {
            Some(BatchMode::List) => {
                return Err(BatchError::MultiLineInListMode {
                    line_number: self.line_number,
                    line: line.to_string(),
                })
            }
            Some(mode) => mode,
            None => {
                let mode = BatchMode::detect(line);
                debug!("reading input in {mode:?} mode");
                self.mode = Some(mode);
                mode
            }
        };

        match mode {
            BatchMode::Single => self.push_token(line),
            BatchMode::List => {
                let items = split_list_line(line).map_err(|source| self.at_line(source))?;
                debug!("list holds {} items", items.len());
                for item in &items {
                    self.push_token(item)?;
                }
                Ok(())
            }
        }
    }

    fn push_token(&mut self, token: &str) -> Result<(), BatchError> {
        let statement = reconstruct(token).map_err(|source| self.at_line(source))?;
        debug!("{token} => {statement}");
        self.statements.push(statement);
        Ok(())
    }

    fn at_line(&self, source: NotationError) -> BatchError {
        BatchError::Notation {
            line_number: self.line_number,
            source,
        }
    }

    /// Empty input counts as single mode without statements.
    pub fn finish(self) -> BatchOutput {
        BatchOutput {
            mode: self.mode.unwrap_or(BatchMode::Single),
            statements: self.statements,
        }
    }
}

/// Reads every line of `reader` and reconstructs all statements, stopping at the first error.
pub fn read_batch<R: BufRead>(reader: R) -> Result<BatchOutput, BatchError> {
    let mut controller = BatchController::new();
    for line in reader.lines() {
        controller.push_line(&line?)?;
    }
    Ok(controller.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(output: &BatchOutput) -> Vec<String> {
        output.statements.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn mode_detection() {
        assert_eq!(BatchMode::detect("[ (1,2) ]"), BatchMode::List);
        assert_eq!(BatchMode::detect("  [ ]"), BatchMode::List);
        assert_eq!(BatchMode::detect("[1,2]"), BatchMode::Single);
        assert_eq!(BatchMode::detect("(1,2)"), BatchMode::Single);
        assert_eq!(
            BatchMode::detect("<identity partial perm on [ 1 ]>"),
            BatchMode::Single
        );
    }

    #[test]
    fn split_keeps_identity_domains_together() {
        let items = split_list_line(
            "[ <identity partial perm on [ 1, 2 ]>, [1,2], (3,4)(5), <identity partial perm on [ 7 ]> ]",
        )
        .unwrap();
        assert_eq!(
            items,
            vec![
                "<identity partial perm on [ 1, 2 ]>",
                "[1,2]",
                "(3,4)(5)",
                "<identity partial perm on [ 7 ]>"
            ]
        );
    }

    #[test]
    fn split_empty_list() {
        assert!(split_list_line("[  ]").unwrap().is_empty());
    }

    #[test]
    fn split_unterminated_list() {
        assert!(split_list_line("[ (1,2)").is_err());
    }

    #[test]
    fn single_mode_accumulates_lines() {
        let output = read_batch("(1,2)\n[3,4]\n<identity partial perm on [ 5 ]>\n".as_bytes()).unwrap();
        assert_eq!(output.mode, BatchMode::Single);
        assert_eq!(
            rendered(&output),
            vec![
                "PartialPermOp([1, 2], [2, 1])",
                "PartialPermOp([3], [4])",
                "PartialPermOp((), [5])",
            ]
        );
    }

    #[test]
    fn list_mode_line() {
        let output =
            read_batch("[ [1,2](2,3), <identity partial perm on [ 4, 5 ]> ]\n".as_bytes()).unwrap();
        assert_eq!(output.mode, BatchMode::List);
        assert_eq!(
            rendered(&output),
            vec!["PartialPermOp([1, 2, 3], [2, 3, 2])", "PartialPermOp((), [4, 5])"]
        );
    }

    #[test]
    fn list_mode_rejects_second_line() {
        let err = read_batch("[ (1,2) ]\n(3,4)\n".as_bytes()).unwrap_err();
        match err {
            BatchError::MultiLineInListMode { line_number, line } => {
                assert_eq!(line_number, 2);
                assert_eq!(line, "(3,4)");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn errors_carry_the_line_number() {
        let err = read_batch("(1,2)\n(1,2)[3,4]\n".as_bytes()).unwrap_err();
        match err {
            BatchError::Notation {
                line_number,
                source: NotationError::UnrecognizedToken { token },
            } => {
                assert_eq!(line_number, 2);
                assert_eq!(token, "(1,2)[3,4]");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn ambiguous_item_aborts_the_list() {
        let err = read_batch("[ (1,2), [1,2](1,3) ]".as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            BatchError::Notation {
                line_number: 1,
                source: NotationError::AmbiguousMapping { domain: 1, .. }
            }
        ));
    }

    #[test]
    fn controller_mode_is_fixed_by_first_line() {
        let mut controller = BatchController::new();
        assert_eq!(controller.mode(), None);
        controller.push_line("(1,2)").unwrap();
        controller.push_line("[ (1,2) ]").unwrap_err();
        assert_eq!(controller.mode(), Some(BatchMode::Single));
        assert_eq!(controller.statements().len(), 1);
    }

    #[test]
    fn empty_input() {
        let output = read_batch("".as_bytes()).unwrap();
        assert_eq!(output.mode, BatchMode::Single);
        assert!(output.statements.is_empty());
    }
}
