//! Confirmation port for destructive operations

/// Asks the user to approve a destructive action.
///
/// The core only calls this from inside a dispatch; how the question is put
/// to the user is up to the presentation layer.
pub trait Confirmation {
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// A confirmation whose answer was collected before dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Answer(pub bool);

impl Confirmation for Answer {
    fn confirm(&mut self, _prompt: &str) -> bool {
        self.0
    }
}

impl<F> Confirmation for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}
