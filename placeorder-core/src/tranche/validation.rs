//! Business-rule checks over a tranche list.
//!
//! Violations are data: they annotate rows and gate submission but never
//! block further editing.

use serde::Serialize;

use crate::config::TakeProfitLimits;
use crate::domain::{Tranche, TrancheId};
use crate::mask::plain_decimal;

/// Allocation sums within this distance of the target count as exact.
pub const ALLOCATION_TOLERANCE: f64 = 1e-9;

/// What an issue is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "id")]
pub enum IssueTarget {
    Row(TrancheId),
    TotalProfit,
    TotalAllocation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    ProfitBelowMinimum,
    ProfitNotIncreasing,
    NegativeTargetPrice,
    ProfitSumExceeded,
    AllocationMismatch,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
    pub target: IssueTarget,
    pub kind: IssueKind,
    pub message: String,
}

/// Every issue found in one validation pass, in check order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn has(&self, kind: IssueKind) -> bool {
        self.issues.iter().any(|issue| issue.kind == kind)
    }

    pub fn for_row(&self, id: TrancheId) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(move |issue| issue.target == IssueTarget::Row(id))
    }

    pub fn row_has_issue(&self, id: TrancheId) -> bool {
        self.for_row(id).next().is_some()
    }

    /// Distinct messages in first-seen order, for the aggregate error block.
    pub fn messages(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for issue in &self.issues {
            if !seen.contains(&issue.message.as_str()) {
                seen.push(&issue.message);
            }
        }
        seen
    }

    fn push(&mut self, target: IssueTarget, kind: IssueKind, message: String) {
        self.issues.push(ValidationIssue {
            target,
            kind,
            message,
        });
    }
}

/// Check rows in order (minimum profit, profit not below the previous row,
/// non-negative target price), then the aggregates (profit sum, allocation
/// sum).
pub fn validate(rows: &[Tranche], limits: &TakeProfitLimits) -> ValidationReport {
    let mut report = ValidationReport::default();
    let mut total_profit = 0.0;
    let mut total_allocation = 0.0;

    for (index, row) in rows.iter().enumerate() {
        total_profit += row.profit_percent;
        total_allocation += row.allocation_percent;
        let target = IssueTarget::Row(row.id);

        if row.profit_percent < limits.min_profit {
            report.push(
                target,
                IssueKind::ProfitBelowMinimum,
                format!("Minimum value is {}%", display_number(limits.min_profit)),
            );
        }
        if index > 0 && row.profit_percent < rows[index - 1].profit_percent {
            report.push(
                target,
                IssueKind::ProfitNotIncreasing,
                "Each target's profit should be greater than the previous one".into(),
            );
        }
        if row.target_price < 0.0 {
            report.push(
                target,
                IssueKind::NegativeTargetPrice,
                "Price must be greater than 0".into(),
            );
        }
    }

    if total_profit > limits.max_profit_sum {
        report.push(
            IssueTarget::TotalProfit,
            IssueKind::ProfitSumExceeded,
            format!("Maximum profit sum is {}%", display_number(limits.max_profit_sum)),
        );
    }

    let drift = total_allocation - limits.allocation_total;
    if drift.abs() > ALLOCATION_TOLERANCE {
        let (verb, delta) = if drift > 0.0 {
            ("decrease", drift)
        } else {
            ("increase", -drift)
        };
        report.push(
            IssueTarget::TotalAllocation,
            IssueKind::AllocationMismatch,
            format!(
                "{} out of {}% selected. Please {verb} by {}%.",
                display_number(total_allocation),
                display_number(limits.allocation_total),
                display_number(delta),
            ),
        );
    }

    report
}

/// Percent figure for messages: float noise past ten decimals is dropped.
fn display_number(value: f64) -> String {
    plain_decimal((value * 1e10).round() / 1e10)
}
