//! Interactive confirmation seam.

/// Asks the user a yes/no question.
pub trait Confirm {
    /// Shows `question` and returns true only for an explicit yes.
    fn confirm(&mut self, question: &str) -> bool;
}

/// Answers every question with the same value.
///
/// Used by non-interactive callers and tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub bool);

impl Confirm for FixedAnswer {
    fn confirm(&mut self, _question: &str) -> bool {
        self.0
    }
}

/// Parses a typed answer. Only `y`/`Y` counts as yes.
pub fn is_yes(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}
