use crate::utils::error::Result;

/// One diagnostic check run by [`crate::core::runner::CheckRunner`].
///
/// `run` returns the status lines to print on success. Any error (or panic)
/// escaping `run` is reported as `❌ {failure_label}: {error}`.
pub trait Check {
    fn name(&self) -> &str;
    fn failure_label(&self) -> &str;
    fn run(&self) -> Result<Vec<String>>;
}
