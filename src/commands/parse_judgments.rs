use std::io::{self, Write};

use anyhow::{Context, Result, bail};
use chrono::Utc;
use tracing::info;

use crate::cli::ParseJudgmentsArgs;
use crate::judgments::{JudgmentParseOutcome, SummaryDigest, digest, parse_judgment_file};
use crate::model::{JudgmentImportReport, SourceFile};
use crate::util::{now_utc_string, sha256_file, utc_compact_string, write_json_pretty};

pub fn run(args: ParseJudgmentsArgs) -> Result<()> {
    let run_id = format!("judgments-{}", utc_compact_string(Utc::now()));
    info!(input = %args.input.display(), run_id = %run_id, "parsing judgment file");

    let (format, outcome) = parse_judgment_file(&args.input, args.format.resolve());
    let summary_digest = digest(&outcome, args.max_errors_shown);

    info!(
        status = summary_digest.status.as_str(),
        format = format.as_str(),
        lines = outcome.summary.total_lines_read,
        headers = outcome.summary.header_lines_skipped,
        successful = outcome.summary.successful_records,
        failed = outcome.summary.failed_records,
        duplicates = outcome.summary.duplicate_records,
        unique_queries = outcome.summary.unique_queries,
        "judgment parse complete"
    );

    let report = JudgmentImportReport {
        manifest_version: 1,
        run_id,
        generated_at: now_utc_string(),
        source: SourceFile {
            path: args.input.display().to_string(),
            sha256: sha256_file(&args.input).ok(),
        },
        format: format.as_str().to_string(),
        digest: summary_digest,
        judgment_ratings: outcome.judgments.clone(),
        outcome,
    };

    if let Some(report_path) = &args.report_path {
        write_json_pretty(report_path, &report)?;
        info!(path = %report_path.display(), "wrote judgment import report");
    }

    if args.json {
        let mut output = io::BufWriter::new(io::stdout().lock());
        serde_json::to_writer_pretty(&mut output, &report)
            .context("failed to serialize judgment report")?;
        writeln!(output)?;
        output.flush()?;
    } else {
        write_text_summary(&report.digest, &report.outcome)?;
    }

    if let Some(error) = &report.outcome.error {
        bail!("judgment file rejected: {error}");
    }

    Ok(())
}

fn write_text_summary(digest: &SummaryDigest, outcome: &JudgmentParseOutcome) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());
    let summary = &outcome.summary;

    writeln!(output, "Status: {}", digest.status.as_str())?;
    writeln!(output, "{}", digest.headline)?;
    writeln!(
        output,
        "Lines: read={} headers={} successful={} failed={} duplicates={} queries={}",
        summary.total_lines_read,
        summary.header_lines_skipped,
        summary.successful_records,
        summary.failed_records,
        summary.duplicate_records,
        summary.unique_queries,
    )?;

    if !summary.rating_distribution.is_empty() {
        let distribution = summary
            .rating_distribution
            .iter()
            .map(|(rating, count)| format!("{rating}={count}"))
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(output, "Ratings: {distribution}")?;
    }

    for error in &digest.sample_errors {
        writeln!(output, "\tline {}: {}\t{}", error.line, error.error, error.raw)?;
    }
    if let Some(note) = &digest.truncation_note {
        writeln!(output, "\t{note}")?;
    }

    output.flush()?;
    Ok(())
}
