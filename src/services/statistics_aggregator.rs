use crate::structs::analysis_record::AnalysisRecord;
use crate::structs::statistics::Statistics;

pub struct StatisticsAggregator;

impl StatisticsAggregator {
    /// Pure summary over stored analyses. Every file's payload goes through
    /// the result parser, so raw-text files contribute no issues.
    pub fn aggregate(records: &[AnalysisRecord]) -> Statistics {
        let mut stats = Statistics::new();
        stats.total_analyses = records.len();

        for record in records {
            for file in &record.file_results {
                for issue in file.parsed().issues {
                    stats.total_issues_found += 1;
                    *stats.issues_by_type.entry(issue.issue_type).or_insert(0) += 1;
                }
            }
        }

        stats
    }
}
