//! Terminal output shared by the chat loop and the subcommands.

use anyhow::Result;
use inquire::InquireError;

mod spinner;
mod style;

pub use spinner::Spinner;
pub use style::Style;

/// Escape or Ctrl+C at an inquire prompt.
pub const fn is_prompt_cancelled(err: &InquireError) -> bool {
    matches!(
        err,
        InquireError::OperationCanceled | InquireError::OperationInterrupted
    )
}

/// Runs an interactive step, turning a cancelled prompt into a quiet
/// `Ok(())` that prints `notice` instead.
pub fn unless_cancelled<F>(notice: &str, step: F) -> Result<()>
where
    F: FnOnce() -> Result<()>,
{
    match step() {
        Err(e) if e.downcast_ref::<InquireError>().is_some_and(is_prompt_cancelled) => {
            println!();
            println!("{}", Style::hint(notice));
            Ok(())
        }
        other => other,
    }
}
