//! Domain entities for the admin screen.

pub mod member;

pub use member::{initial_members, ContributionStatus, Member, MemberId};
