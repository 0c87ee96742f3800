// Human-readable summary of a generation run

use crate::generate::{Generation, PageOutcome};
use colored::Colorize;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

pub fn generate_summary_report(generation: &Generation) -> String {
    let outcomes = generation.outcomes();
    let with_images = outcomes.iter().filter(|o| o.image_count() > 0).count();
    let failures: Vec<&PageOutcome> = generation.failures().collect();

    let mut report = String::new();
    report.push_str(RULE);
    report.push_str("\n\n# Summary:\n");
    report.push_str(&format!("  Pages processed: {}\n", outcomes.len()));
    report.push_str(&format!("  Pages with images: {}\n", with_images));
    report.push_str(&format!("  Total images: {}\n", generation.total_images()));
    report.push_str(&format!("  Failed pages: {}\n", failures.len()));
    report.push('\n');
    report.push_str(RULE);
    report.push_str("\n\n");

    for outcome in outcomes {
        match outcome {
            PageOutcome::Extracted(schema) => {
                let count = schema.image.len();
                report.push_str(&format!(
                    "  {} {} ({} image{})\n",
                    "✓".green(),
                    schema.url,
                    count,
                    if count == 1 { "" } else { "s" }
                ));
            }
            PageOutcome::Failed { url, reason } => {
                report.push_str(&format!("  {} {}\n", "✗".red(), url));
                report.push_str(&format!("      {}\n", reason.dimmed()));
            }
        }
    }

    report
}
