use crate::domain::models::{
    AuditOutcome, AuditReport, AuditSummary, IncorrectProject, ProjectRecord, Settings,
    SkippedProject,
};
use crate::services::resolve::{matches, mismatch_line, resolve};

/// First configured prefix that `full_path` starts with.
pub fn matched_exclusion<'a>(full_path: &str, exclude: &'a [String]) -> Option<&'a str> {
    exclude
        .iter()
        .find(|prefix| full_path.starts_with(prefix.as_str()))
        .map(String::as_str)
}

pub fn audit_project(record: &ProjectRecord, settings: &Settings) -> AuditOutcome {
    if let Some(prefix) = matched_exclusion(&record.full_path, &settings.general.exclude) {
        tracing::debug!(project = %record.full_path, prefix, "project excluded");
        return AuditOutcome::Skipped {
            prefix: prefix.to_string(),
        };
    }

    let mut mismatches = Vec::new();
    for rule in &settings.rules {
        let resolved = resolve(&record.raw, &rule.path, &rule.expected);
        if !matches(&resolved, &rule.expected) {
            mismatches.push(mismatch_line(&rule.path, &resolved, &rule.expected));
        }
    }

    if mismatches.is_empty() {
        AuditOutcome::Conformant
    } else {
        AuditOutcome::Nonconformant(mismatches)
    }
}

/// Classifies every record, keeping fetch order within each list.
pub fn audit_projects(records: &[ProjectRecord], settings: &Settings) -> AuditReport {
    let mut report = AuditReport::default();
    for record in records {
        match audit_project(record, settings) {
            AuditOutcome::Conformant => report.correct.push(record.to_ref()),
            AuditOutcome::Nonconformant(mismatches) => report.incorrect.push(IncorrectProject {
                project: record.to_ref(),
                mismatches,
            }),
            AuditOutcome::Skipped { prefix } => report.skipped.push(SkippedProject {
                project: record.to_ref(),
                prefix,
            }),
        }
    }
    report.summary = AuditSummary {
        total: records.len(),
        correct: report.correct.len(),
        incorrect: report.incorrect.len(),
        skipped: report.skipped.len(),
    };
    tracing::info!(
        total = report.summary.total,
        correct = report.summary.correct,
        incorrect = report.summary.incorrect,
        skipped = report.summary.skipped,
        "audit complete"
    );
    report
}
