//! The roster store.

use tracing::debug;

use crate::entities::{initial_members, Member, MemberId};

/// Members in their initialisation order. Only `contributed` ever changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterStore {
    members: Vec<Member>,
}

impl RosterStore {
    pub fn with_members(members: Vec<Member>) -> Self {
        Self { members }
    }

    /// Flip the `contributed` flag of member `id`.
    ///
    /// Unknown ids leave the store untouched and return `None`; that is not
    /// an error.
    pub fn toggle(&mut self, id: MemberId) -> Option<&Member> {
        let Some(member) = self.members.iter_mut().find(|member| member.id == id) else {
            debug!(member_id = id, "toggle ignored for unknown member");
            return None;
        };

        member.contributed = !member.contributed;
        debug!(member_id = id, contributed = member.contributed, "toggled contribution");
        Some(&*member)
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Ordered snapshot for display or export.
    pub fn list_members(&self) -> Vec<Member> {
        self.members.clone()
    }

    pub fn get(&self, id: MemberId) -> Option<&Member> {
        self.members.iter().find(|member| member.id == id)
    }

    pub fn contributed_count(&self) -> usize {
        self.members.iter().filter(|member| member.contributed).count()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl Default for RosterStore {
    fn default() -> Self {
        Self::with_members(initial_members())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_roster_has_six_members_three_paid() {
        let roster = RosterStore::default();

        assert_eq!(roster.len(), 6);
        assert_eq!(roster.contributed_count(), 3);
        let names: Vec<&str> = roster.members().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["Amina", "Juma", "Fatuma", "David", "Mercy", "John"]);
    }

    #[test]
    fn toggle_flips_only_the_matching_member() {
        let mut roster = RosterStore::default();
        let original = roster.list_members();

        let toggled = roster.toggle(2).cloned().expect("member 2 exists");
        assert!(toggled.contributed);

        for (before, after) in original.iter().zip(roster.members()) {
            assert_eq!(before.id, after.id);
            if before.id == 2 {
                assert_eq!(after.contributed, !before.contributed);
            } else {
                assert_eq!(before, after);
            }
        }
    }

    #[test]
    fn double_toggle_restores_original_state() {
        let mut roster = RosterStore::default();
        let original = roster.clone();

        roster.toggle(2);
        roster.toggle(2);

        assert_eq!(roster, original);
    }

    #[test]
    fn unknown_id_leaves_roster_unchanged() {
        let mut roster = RosterStore::default();
        let original = roster.clone();

        assert!(roster.toggle(42).is_none());
        assert_eq!(roster, original);
    }
}
