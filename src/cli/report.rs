//! Rendering of a score report

use crate::application::services::ScoreReport;
use crate::cli::output;
use crate::config::Settings;
use crate::domain::ScoreOutcome;

pub const SCORE_LABEL: &str = "Computed score for the child: ";
pub const NO_DOMAINS_LABEL: &str = "No domain/subdomains present: ";

/// The single result line for an outcome.
pub fn result_line(outcome: &ScoreOutcome) -> String {
    match outcome {
        ScoreOutcome::NoDomains => format!("{}{}", NO_DOMAINS_LABEL, outcome.value()),
        ScoreOutcome::Total(total) => format!("{}{}", SCORE_LABEL, total),
    }
}

/// Report sections in print order, honoring the display settings.
///
/// Each section is a header and its lines; enabled sections are always
/// present, even when the tree has no domains.
pub fn sections(report: &ScoreReport, settings: &Settings) -> Vec<(&'static str, Vec<String>)> {
    let mut sections = Vec::new();
    if settings.show_tree {
        let rendered = report.tree.to_tree_string().to_string();
        sections.push(("Domain tree", vec![rendered.trim_end().to_string()]));
    }
    if settings.show_leaves {
        let lines = report
            .leaves
            .iter()
            .map(|leaf| format!("  {}: {}", leaf.domain, leaf.contribution))
            .collect();
        sections.push(("Leaf contributions", lines));
    }
    sections
}

/// Print the report to stdout.
pub fn print_report(report: &ScoreReport, settings: &Settings) {
    for (header, lines) in sections(report, settings) {
        output::header(header);
        for line in lines {
            output::info(&line);
        }
    }
    output::info(&result_line(&report.outcome));
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::application::services::ScoringService;

    fn report_for(settings: &Settings) -> ScoreReport {
        ScoringService::new(Arc::new(settings.clone())).run()
    }

    #[test]
    fn given_both_sections_enabled_and_no_domains_when_rendering_then_both_headers_present() {
        let settings = Settings {
            domains: vec![],
            show_tree: true,
            show_leaves: true,
            ..Default::default()
        };
        let report = report_for(&settings);

        let headers: Vec<&str> = sections(&report, &settings)
            .iter()
            .map(|(header, _)| *header)
            .collect();
        assert_eq!(headers, vec!["Domain tree", "Leaf contributions"]);
    }

    #[test]
    fn given_leaves_enabled_when_rendering_then_lists_each_leaf() {
        let settings = Settings {
            show_leaves: true,
            ..Default::default()
        };
        let report = report_for(&settings);

        let sections = sections(&report, &settings);
        assert_eq!(sections.len(), 1);
        assert_eq!(
            sections[0].1,
            vec!["  mail.google.com: 20", "  maps.google.com: 15", "  yahoo.com: 1"]
        );
    }

    #[test]
    fn given_sections_disabled_when_rendering_then_nothing_extra() {
        let settings = Settings::default();
        assert!(sections(&report_for(&settings), &settings).is_empty());
    }

    #[test]
    fn given_total_when_rendering_then_uses_score_label() {
        assert_eq!(
            result_line(&ScoreOutcome::Total(36)),
            "Computed score for the child: 36"
        );
    }

    #[test]
    fn given_no_domains_when_rendering_then_reports_zero() {
        assert_eq!(
            result_line(&ScoreOutcome::NoDomains),
            "No domain/subdomains present: 0"
        );
    }
}
