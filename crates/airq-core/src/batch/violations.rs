use std::collections::HashMap;

use crate::Violation;
use crate::plausibility::{Finding, Severity};

pub(crate) const MAX_EXAMPLES: usize = 3;

#[derive(Debug)]
pub(crate) struct ViolationStats {
    severity: Severity,
    message: String,
    count: u64,
    examples: Vec<String>,
}

pub(crate) fn add_finding(
    stats: &mut HashMap<&'static str, ViolationStats>,
    finding: Finding,
    context: impl FnOnce() -> String,
) {
    let entry = stats.entry(finding.id).or_insert_with(|| ViolationStats {
        severity: finding.severity,
        message: finding.message,
        count: 0,
        examples: Vec::new(),
    });
    entry.count += 1;
    if entry.examples.len() < MAX_EXAMPLES {
        entry.examples.push(context());
    }
}

pub(crate) fn build_violations(stats: HashMap<&'static str, ViolationStats>) -> Vec<Violation> {
    let mut violations: Vec<(Severity, Violation)> = stats
        .into_iter()
        .map(|(id, stats)| {
            (
                stats.severity,
                Violation {
                    id: id.to_string(),
                    severity: stats.severity.as_str().to_string(),
                    message: stats.message,
                    count: stats.count,
                    examples: stats.examples,
                },
            )
        })
        .collect();
    violations.sort_by(|(sa, a), (sb, b)| sa.cmp(sb).then_with(|| a.id.cmp(&b.id)));
    violations.into_iter().map(|(_, v)| v).collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::{MAX_EXAMPLES, add_finding, build_violations};
    use crate::plausibility::{Finding, Severity};

    fn finding(id: &'static str, severity: Severity) -> Finding {
        Finding {
            id,
            severity,
            message: format!("{id} message"),
        }
    }

    #[test]
    fn aggregates_counts_and_caps_examples() {
        let mut stats = HashMap::new();
        for line in 1..=5 {
            add_finding(&mut stats, finding("AQ-B", Severity::Warning), || {
                format!("line {line}")
            });
        }
        let violations = build_violations(stats);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].count, 5);
        assert_eq!(violations[0].examples.len(), MAX_EXAMPLES);
        assert_eq!(violations[0].examples[0], "line 1");
    }

    #[test]
    fn sorts_errors_before_warnings_then_by_id() {
        let mut stats = HashMap::new();
        add_finding(&mut stats, finding("AQ-A", Severity::Warning), String::new);
        add_finding(&mut stats, finding("AQ-Z", Severity::Error), String::new);
        add_finding(&mut stats, finding("AQ-C", Severity::Warning), String::new);
        let ids: Vec<_> = build_violations(stats)
            .into_iter()
            .map(|v| v.id)
            .collect();
        assert_eq!(ids, vec!["AQ-Z", "AQ-A", "AQ-C"]);
    }
}
