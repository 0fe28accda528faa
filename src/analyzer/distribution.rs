use std::collections::BTreeMap;

use crate::analyzer::stats::percentage;
use crate::model::Ticket;

/// Count/percentage breakdown of the ticket set along one categorical field.
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    /// Header of the category column, e.g. `issue_type`.
    pub field: &'static str,
    pub rows: Vec<DistributionRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DistributionRow {
    pub label: &'static str,
    pub count: usize,
    /// Share of all tickets, unrounded.
    pub percentage: f64,
}

/// Groups tickets by `key`, rows sorted by label. An empty set gives no rows.
pub fn compute_distribution(
    tickets: &[Ticket],
    field: &'static str,
    key: impl Fn(&Ticket) -> &'static str,
) -> Distribution {
    let total = tickets.len();
    let mut counts: BTreeMap<&'static str, usize> = BTreeMap::new();
    for t in tickets {
        *counts.entry(key(t)).or_insert(0) += 1;
    }

    let rows = counts
        .into_iter()
        .map(|(label, count)| DistributionRow {
            label,
            count,
            percentage: percentage(count, total),
        })
        .collect();

    Distribution { field, rows }
}

pub fn issue_type_distribution(tickets: &[Ticket]) -> Distribution {
    compute_distribution(tickets, "issue_type", |t| t.issue_type.label())
}

pub fn priority_distribution(tickets: &[Ticket]) -> Distribution {
    compute_distribution(tickets, "priority", |t| t.priority().label())
}
