use super::ast::*;
use super::tokens::{TokenNode, Tokens};
use crate::error::Result;
use std::{fmt, fmt::Write};

/// Trait for printing AST Nodes to a new String allocated on the heap.
/// This is implemented by all AST Nodes that can produce [Tokens] and can hence be used to
/// granularly print parts of an operation. However, mostly this will be used via `Query::print`.
///
/// The output is compact: no whitespace is emitted between tokens.
///
/// For convience when debugging, AST Nodes that implement `PrintNode` also automatically
/// implement the [`fmt::Display`] trait.
pub trait PrintNode {
    /// Write an AST node to a buffer implementing the [Write] trait.
    fn write_to_buffer(&self, buffer: &mut dyn Write) -> fmt::Result;

    /// Print an AST Node to source text as a String allocated on the heap.
    fn print(&self) -> String {
        let mut buf = String::new();
        match self.write_to_buffer(&mut buf) {
            Ok(()) => buf,
            _ => "".to_string(),
        }
    }
}

impl fmt::Display for dyn PrintNode {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to_buffer(f)
    }
}

impl<T: TokenNode> PrintNode for T {
    #[inline]
    fn write_to_buffer(&self, buffer: &mut dyn Write) -> fmt::Result {
        self.tokens().write_to_buffer(buffer)
    }
}

impl<'a> Query<'a> {
    /// Validates this operation and prints it to source text as a String allocated on the heap.
    ///
    /// No text is produced when validation fails.
    pub fn print(&self) -> Result<String> {
        Ok(self.tokens()?.into_string())
    }

    /// Validates this operation and writes it to a buffer implementing the [Write] trait.
    ///
    /// Nothing is written to the buffer when validation fails. Failures of the buffer itself are
    /// passed through as the inner [`fmt::Result`].
    pub fn write_to_buffer(&self, buffer: &mut dyn Write) -> Result<fmt::Result> {
        let tokens: Tokens = self.tokens()?;
        Ok(tokens.write_to_buffer(buffer))
    }
}
