//! Access plan summaries
//!
//! Renders one range variable's compiled access path for EXPLAIN output and
//! logs. The summary is a plain data structure so callers can serialize it
//! or format it for a terminal.

use serde::Serialize;
use std::fmt;

use super::descriptor::RangeVariable;

/// Human- and machine-readable summary of one access path
#[derive(Debug, Clone, Serialize)]
pub struct AccessPlanSummary {
    /// Source name (table, derived alias, or graph namespace)
    pub table: String,
    /// Table alias, when one differs from the source name
    pub alias: Option<String>,
    /// "INDEX PRED" or "FULL SCAN"
    pub access: String,
    /// Name of the index driving the scan
    pub index: String,
    /// INNER, LEFT OUTER, RIGHT OUTER, or FULL
    pub join_type: String,
    /// Start bound rendering, when bounded below
    pub start: Option<String>,
    /// End bound rendering, when bounded above
    pub end: Option<String>,
    /// Join-residual predicate rendering
    pub join_filter: Option<String>,
    /// Where-residual predicate rendering
    pub where_filter: Option<String>,
}

impl AccessPlanSummary {
    /// Builds the summary for one range variable.
    pub fn describe(rv: &RangeVariable) -> Self {
        let cond = &rv.conditions;
        let full_scan = cond.start.is_empty() && cond.end.is_empty() && !cond.has_multi_prefix();

        let index = match cond.index {
            Some(id) => rv.source.store().index(id).name().to_string(),
            None => "primary".to_string(),
        };

        let start = if cond.has_multi_prefix() {
            // Positioning uses the exact prefix, not the start conjunction.
            let rendered = cond
                .prefix
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(" AND ");
            Some(rendered)
        } else if cond.start.is_empty() {
            None
        } else {
            Some(cond.start.to_string())
        };

        Self {
            table: rv.source.name(),
            alias: rv.alias.clone(),
            access: if full_scan { "FULL SCAN" } else { "INDEX PRED" }.to_string(),
            index,
            join_type: rv.join_type().to_string(),
            start,
            end: if cond.end.is_empty() {
                None
            } else {
                Some(cond.end.to_string())
            },
            join_filter: if cond.join_filter.is_empty() {
                None
            } else {
                Some(cond.join_filter.to_string())
            },
            where_filter: if cond.where_filter.is_empty() {
                None
            } else {
                Some(cond.where_filter.to_string())
            },
        }
    }
}

impl fmt::Display for AccessPlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.table)?;
        if let Some(alias) = &self.alias {
            write!(f, "AS {} ", alias)?;
        }
        write!(f, "[{} JOIN] {} ({})", self.join_type, self.access, self.index)?;
        if let Some(s) = &self.start {
            write!(f, " start: {}", s)?;
        }
        if let Some(e) = &self.end {
            write!(f, " end: {}", e)?;
        }
        if let Some(j) = &self.join_filter {
            write!(f, " on: {}", j)?;
        }
        if let Some(w) = &self.where_filter {
            write!(f, " where: {}", w)?;
        }
        Ok(())
    }
}
