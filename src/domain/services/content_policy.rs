/// Decides whether a user message may be forwarded to the model.
///
/// Kept behind a trait so deployments can swap in their own moderation rules
/// without touching the validator.
pub trait ContentPolicy: Send + Sync {
    /// Returns `true` when `message` is allowed.
    fn permits(&self, message: &str) -> bool;
}

/// Rejects messages containing any configured term, compared case-insensitively
/// as a substring. An empty term list accepts everything.
#[derive(Debug, Clone, Default)]
pub struct BlockedTermsPolicy {
    terms: Vec<String>,
}

impl BlockedTermsPolicy {
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms = terms
            .into_iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        Self { terms }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl ContentPolicy for BlockedTermsPolicy {
    fn permits(&self, message: &str) -> bool {
        if self.terms.is_empty() {
            return true;
        }
        let lowered = message.to_lowercase();
        !self.terms.iter().any(|term| lowered.contains(term.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_permits_everything() {
        let policy = BlockedTermsPolicy::default();
        assert!(policy.permits("anything at all"));
    }

    #[test]
    fn blocked_terms_match_case_insensitively() {
        let policy = BlockedTermsPolicy::new(["Forbidden"]);
        assert!(!policy.permits("this is FORBIDDEN text"));
        assert!(policy.permits("this is fine"));
    }

    #[test]
    fn blank_terms_are_ignored() {
        let policy = BlockedTermsPolicy::new(["", "   "]);
        assert!(policy.is_empty());
        assert!(policy.permits("hello"));
    }
}
