//! # ChamaPay Roster Crate
//!
//! The admin screen's data: a fixed set of group members whose payment flag
//! can be flipped, and the paginated contribution report built from a
//! snapshot of them.
//!
//! ## Usage
//!
//! ```rust
//! use chamapay_roster::RosterStore;
//!
//! let mut roster = RosterStore::default();
//! let juma = roster.toggle(2).expect("member 2 exists");
//! assert!(juma.contributed);
//! ```

pub mod entities;
pub mod services;

pub use entities::{ContributionStatus, Member, MemberId};
pub use services::{Report, ReportExporter, ReportLayout, ReportPage, ReportRow, RosterStore};
