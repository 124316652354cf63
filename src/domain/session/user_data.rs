//! Per-client dashboard preferences.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{GroupId, Timestamp};

/// Preferences remembered for one [`SessionToken`](crate::domain::foundation::SessionToken).
///
/// Created with defaults the first time a token is seen and never removed
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    /// Groups whose member tiles the user keeps expanded.
    #[serde(default)]
    pub expanded_groups: BTreeSet<GroupId>,

    #[serde(default)]
    pub first_seen: Timestamp,
}

impl UserData {
    pub fn new() -> Self {
        Self {
            expanded_groups: BTreeSet::new(),
            first_seen: Timestamp::now(),
        }
    }

    pub fn is_expanded(&self, group: &GroupId) -> bool {
        self.expanded_groups.contains(group)
    }

    /// Flips the expansion state of a group and returns the new state.
    pub fn toggle_group(&mut self, group: &GroupId) -> bool {
        if self.expanded_groups.remove(group) {
            false
        } else {
            self.expanded_groups.insert(group.clone());
            true
        }
    }
}

impl Default for UserData {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_user_data_has_no_expanded_groups() {
        let data = UserData::default();
        assert!(data.expanded_groups.is_empty());
    }

    #[test]
    fn toggle_group_flips_state() {
        let mut data = UserData::new();
        let group = GroupId::new("kitchen").unwrap();

        assert!(data.toggle_group(&group));
        assert!(data.is_expanded(&group));

        assert!(!data.toggle_group(&group));
        assert!(!data.is_expanded(&group));
    }

    #[test]
    fn user_data_deserializes_without_first_seen() {
        let data: UserData = serde_yaml::from_str("expandedGroups: [kitchen]\n").unwrap();
        assert!(data.is_expanded(&GroupId::new("kitchen").unwrap()));
    }
}
