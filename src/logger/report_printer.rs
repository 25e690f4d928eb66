use crate::enums::issue_type::IssueType;
use crate::structs::analysis_record::AnalysisRecord;
use crate::structs::analysis_summary::AnalysisSummary;
use crate::structs::issue::Issue;
use crate::structs::statistics::Statistics;

const BAR_WIDTH: usize = 30;

pub struct ReportPrinter {}

impl ReportPrinter {
    pub fn print_analysis_report(record: &AnalysisRecord) {
        println!("🔍 PULL REQUEST REVIEW");
        println!("======================");
        println!("Repository: {}", record.repo_url);
        println!("PR:         #{}", record.pr_number);
        println!("Analyzed:   {}", record.created_at.format("%Y-%m-%d %H:%M:%S UTC"));
        println!("Task:       {}", record.task_id);
        println!("\n🔧 ISSUES FOUND ({} total):", record.total_issues());

        if record.file_results.is_empty() {
            println!("\n  No files were analyzed.");
            return;
        }

        for (file_name, parsed) in record.parsed_files() {
            println!("\n📄 {}", file_name);
            println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

            if let Some(raw) = &parsed.raw {
                println!("{}", raw);
                continue;
            }

            if parsed.issues.is_empty() {
                println!("  ✨ No issues");
                continue;
            }

            for issue in &parsed.issues {
                println!("{}", Self::format_issue(issue));
            }
        }
    }

    pub fn format_issue(issue: &Issue) -> String {
        let location = issue.line.map(|line| format!(" line {}", line)).unwrap_or_default();
        let mut text = format!(
            "  {} [{}]{}: {}",
            issue.issue_type.emoji(),
            issue.issue_type.label(),
            location,
            issue.description.as_deref().unwrap_or("(no description)")
        );

        if let Some(suggestion) = &issue.suggestion {
            text.push_str(&format!("\n      💡 {}", suggestion));
        }
        text
    }

    pub fn print_analyses(summaries: &[AnalysisSummary]) {
        println!("\n📋 Stored Analyses");
        println!("═══════════════════════════════════════");

        if summaries.is_empty() {
            println!("  No analyses yet. Run 'pr-review analyze <repo_url> <pr_number>' to start one.");
            return;
        }

        for summary in summaries {
            println!("{}", Self::format_summary(summary));
        }
        println!("\n{} analyses", summaries.len());
    }

    pub fn format_summary(summary: &AnalysisSummary) -> String {
        format!(
            "  {}  {} #{}  ({} files)  {}",
            summary.created_at.format("%Y-%m-%d %H:%M"),
            summary.repo_url,
            summary.pr_number,
            summary.file_count,
            summary.task_id
        )
    }

    pub fn print_statistics(stats: &Statistics) {
        println!("\n📊 Review Statistics");
        println!("═══════════════════════════════════════");
        println!("📈 Overview:");
        println!("   Total Analyses: {}", stats.total_analyses);
        println!("   Total Issues Found: {}", stats.total_issues_found);

        println!("\n📝 By Issue Type:");
        for row in stats.breakdown() {
            println!(
                "   {} {:<15} {:>5}  {:>3}%  {}",
                row.issue_type.emoji(),
                row.issue_type.label(),
                row.count,
                row.percentage,
                Self::bar(row.relative_width)
            );
        }

        if stats.count_for(IssueType::Unknown) > 0 {
            println!("\n   ⚪ Unknown covers issues without a recognised type.");
        }
    }

    /// `relative_width` is a percentage of the widest bar.
    pub fn bar(relative_width: usize) -> String {
        let filled = (relative_width.min(100) * BAR_WIDTH) / 100;
        format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
    }
}
