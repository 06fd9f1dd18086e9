use crate::error::{Error, Result};
use crate::visit::VisitFlow;

/// Whether validation stops at the first violation or collects all of them.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Default)]
pub enum ValidationMode {
    /// Stop traversal at the first violation in depth-first order and report only that error.
    #[default]
    FailFast,
    /// Visit the whole query and report all violations as one aggregated error.
    Collect,
}

/// The `ValidationContext` carrying the list of errors that validation rules report.
///
/// New errors are added to the list as validation continues to issue error messages if validation
/// has failed on a query. In [`ValidationMode::FailFast`] the context is done as soon as it holds
/// a single error, which rules check using [`ValidationContext::is_done`] to stop traversal.
#[derive(Debug, Default)]
pub struct ValidationContext {
    pub mode: ValidationMode,
    pub errors: Vec<Error>,
}

impl ValidationContext {
    /// Create a new `ValidationContext` in the given mode.
    pub fn new(mode: ValidationMode) -> Self {
        ValidationContext {
            mode,
            errors: Vec::new(),
        }
    }

    /// Add an error to the list of errors in the `ValidationContext`.
    ///
    /// This is called inside of validation rules to add an error to the list and fail validation
    /// of the currently validating query. In fail-fast mode only the first error is kept.
    pub fn add_error(&mut self, error: Error) {
        if !self.is_done() {
            self.errors.push(error);
        }
    }

    /// Checks whether no more errors will be accepted, which is when a fail-fast validation has
    /// already failed.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.mode == ValidationMode::FailFast && !self.errors.is_empty()
    }

    /// Returns the signal a rule should return after it ran its checks.
    #[inline]
    pub fn flow(&self) -> VisitFlow {
        if self.is_done() {
            VisitFlow::Break
        } else {
            VisitFlow::Next
        }
    }

    /// Convert the context into a result which carries an error if validation has failed on the
    /// current query.
    ///
    /// A single error is returned as-is. Multiple collected errors are aggregated into one error
    /// whose context lists every violation and whose type is the type of the first violation.
    pub fn to_result(self) -> Result<()> {
        let mut errors = self.errors.into_iter();
        let first = match errors.next() {
            None => return Ok(()),
            Some(first) => first,
        };
        let rest: Vec<Error> = errors.collect();
        if rest.is_empty() {
            return Err(first);
        }

        let mut context = format!("- {}", first.print(false));
        for error in rest.iter() {
            context.push_str("\n- ");
            context.push_str(&error.print(false));
        }
        Err(Error::new_with_context(
            format!("Query failed validation with {} errors", rest.len() + 1),
            None,
            context,
            first.error_type(),
        ))
    }
}
