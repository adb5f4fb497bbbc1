use crate::types::report::RankingReport;

pub fn to_markdown(report: &RankingReport) -> String {
    let mut output = String::new();
    output.push_str("# Ranking Report\n\n");
    if let Some(program_id) = &report.program_id {
        output.push_str(&format!("Program: {program_id}\n\n"));
    }

    output.push_str("## Ranking\n\n");
    if report.ranking.results.is_empty() {
        output.push_str("- none\n\n");
    } else {
        output.push_str("| rank | candidate | name | score |\n|---:|---|---|---:|\n");
        for result in &report.ranking.results {
            output.push_str(&format!(
                "| {} | {} | {} | {:.6} |\n",
                result.rank, result.candidate_id, result.name, result.score
            ));
        }
        output.push('\n');
    }

    if !report.recipients.is_empty() {
        output.push_str("## Recipients\n\n");
        for recipient in &report.recipients {
            output.push_str(&format!(
                "- #{} {} (score {:.6}, amount {})\n",
                recipient.rank, recipient.candidate_id, recipient.score, recipient.amount
            ));
        }
        output.push('\n');
    }

    if !report.ranking.breakdown.is_empty() {
        output.push_str("## Criterion Breakdown\n\n");
        for composite in &report.ranking.breakdown {
            output.push_str(&format!("- {}:", composite.candidate_id));
            for entry in &composite.breakdown {
                output.push_str(&format!(
                    " {} avg {:.6} weighted {:.6};",
                    entry.criterion, entry.avg_norm, entry.weighted
                ));
            }
            output.push('\n');
        }
        output.push('\n');

        output.push_str("## Normalization\n\n");
        for denominator in &report.ranking.denominators {
            output.push_str(&format!(
                "- {}: {:.6}\n",
                denominator.aspect, denominator.denominator
            ));
        }
        output.push('\n');
    }

    output.push_str("## Findings\n\n");
    if report.findings.is_empty() {
        output.push_str("- none\n");
    } else {
        for finding in &report.findings {
            output.push_str(&format!(
                "- [{}] {}: {}\n",
                if finding.blocking {
                    "blocking"
                } else {
                    "warning"
                },
                finding.title,
                finding.body
            ));
        }
    }

    output
}
