use crate::domain::services::assemble;

/// The three static instruction blocks that frame every conversation turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptSections {
    system: String,
    style: String,
    safety: String,
}

impl PromptSections {
    pub fn new(
        system: impl Into<String>,
        style: impl Into<String>,
        safety: impl Into<String>,
    ) -> Self {
        Self {
            system: system.into(),
            style: style.into(),
            safety: safety.into(),
        }
    }

    pub fn system(&self) -> &str {
        &self.system
    }

    pub fn style(&self) -> &str {
        &self.style
    }

    pub fn safety(&self) -> &str {
        &self.safety
    }

    /// Build the full prompt for `user_message`.
    pub fn assemble(&self, user_message: &str) -> String {
        assemble(&self.system, &self.style, &self.safety, user_message)
    }
}
