use std::collections::{BTreeMap, HashMap};
use serde::{Deserialize, Deserializer, Serialize};
use crate::enums::issue_type::IssueType;
use crate::structs::issue_type_stats::IssueTypeStats;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    #[serde(default)]
    pub total_analyses: usize,
    #[serde(default)]
    pub total_issues_found: usize,
    #[serde(default, deserialize_with = "merge_issue_counts")]
    pub issues_by_type: BTreeMap<IssueType, usize>,
}

// Several wire labels can fold into `Unknown`; their counts are summed.
fn merge_issue_counts<'de, D>(deserializer: D) -> Result<BTreeMap<IssueType, usize>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = HashMap::<String, usize>::deserialize(deserializer)?;
    let mut merged = BTreeMap::new();
    for (label, count) in raw {
        let total = merged.entry(IssueType::from_label(&label)).or_insert(0usize);
        *total = total.saturating_add(count);
    }
    Ok(merged)
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count_for(&self, issue_type: IssueType) -> usize {
        self.issues_by_type.get(&issue_type).copied().unwrap_or(0)
    }

    pub fn largest_bucket(&self) -> usize {
        self.issues_by_type.values().copied().max().unwrap_or(0)
    }

    pub fn get_type_stats(&self, issue_type: IssueType) -> IssueTypeStats {
        let count = self.count_for(issue_type);

        let percentage = share_of(count, self.total_issues_found);

        // Bars are scaled against the largest bucket, never against zero.
        let relative_width = share_of(count, self.largest_bucket().max(1));

        IssueTypeStats {
            issue_type,
            count,
            percentage,
            relative_width,
        }
    }

    /// One row per reported category, plus `Unknown` when any were seen.
    pub fn breakdown(&self) -> Vec<IssueTypeStats> {
        let mut rows: Vec<IssueTypeStats> = IssueType::REPORTED
            .iter()
            .map(|issue_type| self.get_type_stats(*issue_type))
            .collect();

        if self.count_for(IssueType::Unknown) > 0 {
            rows.push(self.get_type_stats(IssueType::Unknown));
        }

        rows
    }
}

/// Whole-number percentage of `part` in `whole`, capped at 100. Widened so
/// server-supplied counts cannot overflow.
fn share_of(part: usize, whole: usize) -> usize {
    if whole == 0 {
        return 0;
    }
    ((part as u128 * 100) / whole as u128).min(100) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Statistics {
        let mut issues_by_type = BTreeMap::new();
        issues_by_type.insert(IssueType::Bugs, 6);
        issues_by_type.insert(IssueType::Style, 3);
        issues_by_type.insert(IssueType::Unknown, 1);
        Statistics {
            total_analyses: 2,
            total_issues_found: 10,
            issues_by_type,
        }
    }

    #[test]
    fn percentages_and_bar_widths() {
        let stats = sample();
        let bugs = stats.get_type_stats(IssueType::Bugs);
        assert_eq!(bugs.percentage, 60);
        assert_eq!(bugs.relative_width, 100);

        let style = stats.get_type_stats(IssueType::Style);
        assert_eq!(style.percentage, 30);
        assert_eq!(style.relative_width, 50);

        let performance = stats.get_type_stats(IssueType::Performance);
        assert_eq!(performance.count, 0);
        assert_eq!(performance.relative_width, 0);
    }

    #[test]
    fn breakdown_includes_unknown_only_when_present() {
        assert_eq!(sample().breakdown().len(), 5);
        assert_eq!(Statistics::new().breakdown().len(), 4);
    }

    #[test]
    fn decodes_server_payload() {
        let stats: Statistics = serde_json::from_str(
            r#"{"total_analyses": 3, "total_issues_found": 4, "issues_by_type": {"bugs": 3, "security": 1, "warning": 2}}"#,
        )
        .unwrap();
        assert_eq!(stats.count_for(IssueType::Bugs), 3);
        assert_eq!(stats.count_for(IssueType::Unknown), 3);
    }

    #[test]
    fn huge_server_counts_do_not_overflow() {
        let mut issues_by_type = BTreeMap::new();
        issues_by_type.insert(IssueType::Bugs, usize::MAX);
        issues_by_type.insert(IssueType::Style, usize::MAX / 2);
        let stats = Statistics {
            total_analyses: 1,
            total_issues_found: 7,
            issues_by_type,
        };

        let bugs = stats.get_type_stats(IssueType::Bugs);
        assert_eq!(bugs.percentage, 100);
        assert_eq!(bugs.relative_width, 100);
        assert_eq!(stats.get_type_stats(IssueType::Style).relative_width, 49);
    }

    #[test]
    fn merged_unknown_counts_saturate() {
        let payload = format!(
            r#"{{"issues_by_type": {{"security": {max}, "warning": {max}}}}}"#,
            max = usize::MAX
        );
        let stats: Statistics = serde_json::from_str(&payload).unwrap();
        assert_eq!(stats.count_for(IssueType::Unknown), usize::MAX);
    }
}
