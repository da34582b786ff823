use crate::domain::PromptSections;

/// Supplies the static instruction blocks used to frame every prompt.
///
/// Loading never fails: unreadable sections come back as placeholder text.
pub trait PromptSource: Send + Sync {
    fn load(&self) -> PromptSections;
}
