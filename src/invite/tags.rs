use std::collections::BTreeMap;

/// What happens to an organization tag when someone is invited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    /// Copy the tag onto an invitee who already has an account.
    ToRegisteredInvitee,
    /// Leave the tag on the organization only.
    Keep,
}

/// Tag name → propagation rule, evaluated once per issued invitation.
#[derive(Debug, Clone, Default)]
pub struct TagPolicy {
    rules: BTreeMap<String, Propagation>,
}

impl TagPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rule(mut self, tag: impl Into<String>, propagation: Propagation) -> Self {
        self.rules.insert(tag.into(), propagation);
        self
    }

    /// Every listed tag propagates to registered invitees.
    pub fn invitee_tags<I, T>(tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        tags.into_iter().fold(Self::new(), |policy, tag| {
            policy.with_rule(tag, Propagation::ToRegisteredInvitee)
        })
    }

    pub fn rule(&self, tag: &str) -> Propagation {
        self.rules.get(tag).copied().unwrap_or(Propagation::Keep)
    }

    /// Tags of the organization a registered invitee should receive.
    pub fn tags_for_invitee<'a>(&self, org_tags: &'a [String]) -> Vec<&'a str> {
        org_tags
            .iter()
            .filter(|tag| self.rule(tag) == Propagation::ToRegisteredInvitee)
            .map(String::as_str)
            .collect()
    }
}
