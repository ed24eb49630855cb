//! Contribution report export.
//!
//! The exporter lays a roster snapshot out on fixed-size pages the way the
//! printed report is arranged: a title block, a header row with a rule under
//! it, then one row per member. Positions are in page units measured from the
//! top edge. Drawing the pages is left to whoever consumes the [`Report`];
//! [`Report::render_text`] gives a plain-text rendering.

use std::fmt::Write as _;

use chamapay_config::ReportConfig;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::entities::{ContributionStatus, Member};

pub const REPORT_TITLE: &str = "ChamaPay Monthly Contribution Report";
pub const COLUMN_HEADERS: [&str; 3] = ["Name", "Contribution Status", "Payment Date (simulated)"];
const UNPAID_DATE: &str = "N/A";

/// Page geometry, in page units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportLayout {
    pub title_y: u32,
    pub date_y: u32,
    pub first_header_y: u32,
    pub continuation_header_y: u32,
    /// Header baseline to rule.
    pub rule_gap: u32,
    /// Rule to first row.
    pub first_row_gap: u32,
    pub row_height: u32,
    pub page_break_threshold: u32,
    /// x positions of the name, status and payment date columns.
    pub columns: [u32; 3],
    pub rule_span: (u32, u32),
}

impl Default for ReportLayout {
    fn default() -> Self {
        Self {
            title_y: 25,
            date_y: 35,
            first_header_y: 50,
            continuation_header_y: 20,
            rule_gap: 8,
            first_row_gap: 5,
            row_height: 8,
            page_break_threshold: 280,
            columns: [15, 80, 140],
            rule_span: (10, 200),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub y: u32,
    pub name: String,
    pub status: ContributionStatus,
    pub payment_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportPage {
    pub number: usize,
    pub header_y: u32,
    pub rule_y: u32,
    pub rows: Vec<ReportRow>,
}

impl ReportPage {
    fn open(number: usize, header_y: u32, layout: &ReportLayout) -> (Self, u32) {
        let rule_y = header_y + layout.rule_gap;
        let page = Self {
            number,
            header_y,
            rule_y,
            rows: Vec::new(),
        };
        (page, rule_y + layout.first_row_gap)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub title: String,
    pub report_date: String,
    pub file_name: String,
    pub layout: ReportLayout,
    pub pages: Vec<ReportPage>,
}

impl Report {
    pub fn rows(&self) -> impl Iterator<Item = &ReportRow> {
        self.pages.iter().flat_map(|page| page.rows.iter())
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn text_file_name(&self) -> String {
        format!("{}.txt", self.file_name)
    }

    /// Plain-text rendering, one block per page with the header repeated.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.title);
        let _ = writeln!(out, "Report Date: {}", self.report_date);

        for page in &self.pages {
            let _ = writeln!(out);
            let _ = writeln!(out, "Page {} of {}", page.number, self.pages.len());
            let _ = writeln!(
                out,
                "{:<20}{:<24}{}",
                COLUMN_HEADERS[0], COLUMN_HEADERS[1], COLUMN_HEADERS[2]
            );
            let _ = writeln!(out, "{}", "-".repeat(68));
            for row in &page.rows {
                let _ = writeln!(
                    out,
                    "{:<20}{:<24}{}",
                    row.name,
                    row.status.label(),
                    row.payment_date
                );
            }
        }

        out
    }
}

/// Builds [`Report`]s from roster snapshots.
#[derive(Debug, Clone)]
pub struct ReportExporter {
    layout: ReportLayout,
    file_name: String,
}

impl ReportExporter {
    pub fn new(config: &ReportConfig) -> Self {
        Self {
            layout: ReportLayout {
                page_break_threshold: config.page_break_threshold,
                ..ReportLayout::default()
            },
            file_name: config.file_name.clone(),
        }
    }

    pub fn with_layout(mut self, layout: ReportLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn layout(&self) -> &ReportLayout {
        &self.layout
    }

    /// Lay out `members` in order. Paid members carry `date` as their
    /// simulated payment date.
    pub fn export(&self, members: &[Member], date: NaiveDate) -> Report {
        let layout = self.layout;
        let paid_on = date.format("%d/%m/%Y").to_string();

        let mut pages = Vec::new();
        let (mut page, mut y) = ReportPage::open(1, layout.first_header_y, &layout);

        for member in members {
            let status = member.status();
            let payment_date = match status {
                ContributionStatus::Paid => paid_on.clone(),
                ContributionStatus::Pending => UNPAID_DATE.to_string(),
            };

            page.rows.push(ReportRow {
                y,
                name: member.name.clone(),
                status,
                payment_date,
            });
            y += layout.row_height;

            if y > layout.page_break_threshold {
                let next_number = page.number + 1;
                let (next_page, next_y) =
                    ReportPage::open(next_number, layout.continuation_header_y, &layout);
                pages.push(std::mem::replace(&mut page, next_page));
                y = next_y;
            }
        }
        pages.push(page);

        info!(
            members = members.len(),
            pages = pages.len(),
            "exported contribution report"
        );

        Report {
            title: REPORT_TITLE.to_string(),
            report_date: date.format("%-d %B %Y").to_string(),
            file_name: self.file_name.clone(),
            layout,
            pages,
        }
    }
}

impl Default for ReportExporter {
    fn default() -> Self {
        Self::new(&ReportConfig::default())
    }
}
