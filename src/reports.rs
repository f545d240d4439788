use std::collections::HashMap;

use chrono::Datelike;

use crate::models::{AccountStatus, Record};

pub const MONTH_NAMES: [&str; 12] = [
    "Січень", "Лютий", "Березень", "Квітень", "Травень", "Червень",
    "Липень", "Серпень", "Вересень", "Жовтень", "Листопад", "Грудень",
];

/// One organization's dense 12-month bucket row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgRow {
    pub organization: String,
    pub months: [u32; 12],
}

/// Organization × month count matrix with row, column and grand totals.
/// Rows keep the order in which each organization first appears.
#[derive(Debug, Clone, Default)]
pub struct MonthlyReport {
    pub rows: Vec<OrgRow>,
    pub month_totals: [u32; 12],
    pub org_totals: Vec<u32>,
    pub grand_total: u32,
}

fn parse_iso(date: &str) -> Option<chrono::NaiveDate> {
    chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

fn group_org_month<'a, I>(entries: I) -> MonthlyReport
where
    I: Iterator<Item = (&'a str, chrono::NaiveDate)>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut rows: Vec<OrgRow> = Vec::new();

    for (organization, date) in entries {
        let i = match index.get(organization) {
            Some(&i) => i,
            None => {
                index.insert(organization.to_string(), rows.len());
                rows.push(OrgRow {
                    organization: organization.to_string(),
                    months: [0; 12],
                });
                rows.len() - 1
            }
        };
        rows[i].months[date.month0() as usize] += 1;
    }

    let org_totals: Vec<u32> = rows.iter().map(|r| r.months.iter().sum()).collect();
    let mut month_totals = [0u32; 12];
    for row in &rows {
        for (total, count) in month_totals.iter_mut().zip(row.months.iter()) {
            *total += count;
        }
    }
    let grand_total = month_totals.iter().sum();

    MonthlyReport {
        rows,
        month_totals,
        org_totals,
        grand_total,
    }
}

/// Accounts opened per organization and month of the requested year.
/// Records whose opened-date does not parse or falls outside the year are
/// dropped, even if the store query was already year-bounded.
pub fn build_monthly_report(records: &[Record], year: i32) -> MonthlyReport {
    group_org_month(records.iter().filter_map(|r| {
        let date = parse_iso(&r.date_opened)?;
        (date.year() == year).then_some((r.organization.as_str(), date))
    }))
}

/// Accounts activated per organization and month, keyed on the
/// first-deposit date. No year filter.
pub fn build_activation_report(records: &[Record]) -> MonthlyReport {
    group_org_month(records.iter().filter_map(|r| {
        let date = parse_iso(r.date_first_deposit.as_deref()?)?;
        Some((r.organization.as_str(), date))
    }))
}

/// Active/pending tallies per organization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRow {
    pub organization: String,
    pub active: u32,
    pub pending: u32,
}

#[derive(Debug, Clone, Default)]
pub struct StatusSummary {
    pub rows: Vec<StatusRow>,
}

/// Tally account statuses per organization. Only the two canonical
/// buckets are counted; Blocked/Closed records still create the
/// organization's row but increment neither column.
pub fn build_status_summary(records: &[Record]) -> StatusSummary {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut rows: Vec<StatusRow> = Vec::new();

    for record in records {
        let i = match index.get(&record.organization) {
            Some(&i) => i,
            None => {
                index.insert(record.organization.clone(), rows.len());
                rows.push(StatusRow {
                    organization: record.organization.clone(),
                    active: 0,
                    pending: 0,
                });
                rows.len() - 1
            }
        };
        match record.account_status {
            AccountStatus::Active => rows[i].active += 1,
            AccountStatus::PendingActivation => rows[i].pending += 1,
            AccountStatus::Blocked | AccountStatus::Closed => {}
        }
    }

    StatusSummary { rows }
}
