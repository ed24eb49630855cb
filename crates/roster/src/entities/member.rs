use serde::{Deserialize, Serialize};

pub type MemberId = u32;

/// A member of the savings group and their payment flag for the current cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub contributed: bool,
}

impl Member {
    pub fn new(id: MemberId, name: impl Into<String>, contributed: bool) -> Self {
        Self {
            id,
            name: name.into(),
            contributed,
        }
    }

    pub fn status(&self) -> ContributionStatus {
        ContributionStatus::from(self.contributed)
    }
}

/// Display form of the `contributed` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContributionStatus {
    Paid,
    Pending,
}

impl ContributionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ContributionStatus::Paid => "Paid",
            ContributionStatus::Pending => "Pending",
        }
    }

    /// Label of the admin action that flips this status.
    pub fn toggle_action(&self) -> &'static str {
        match self {
            ContributionStatus::Paid => "Mark Pending",
            ContributionStatus::Pending => "Mark Paid",
        }
    }
}

impl From<bool> for ContributionStatus {
    fn from(contributed: bool) -> Self {
        if contributed {
            ContributionStatus::Paid
        } else {
            ContributionStatus::Pending
        }
    }
}

impl std::fmt::Display for ContributionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The roster every admin screen starts from.
pub fn initial_members() -> Vec<Member> {
    vec![
        Member::new(1, "Amina", true),
        Member::new(2, "Juma", false),
        Member::new(3, "Fatuma", true),
        Member::new(4, "David", false),
        Member::new(5, "Mercy", true),
        Member::new(6, "John", false),
    ]
}
