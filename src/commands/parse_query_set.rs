use std::io::{self, Write};

use anyhow::{Context, Result, bail};
use tracing::info;

use crate::cli::ParseQuerySetArgs;
use crate::model::{QuerySetImportReport, SourceFile};
use crate::query_set::parse_query_set_text;
use crate::util::{now_utc_string, read_text_file, sha256_file, write_json_pretty};

pub fn run(args: ParseQuerySetArgs) -> Result<()> {
    let text = read_text_file(&args.input)?;
    let outcome = parse_query_set_text(&text);

    info!(
        input = %args.input.display(),
        lines = outcome.summary.total_lines_read,
        queries = outcome.summary.successful_queries,
        failed = outcome.summary.failed_lines,
        duplicates = outcome.summary.duplicate_queries,
        "query set parse complete"
    );

    let report = QuerySetImportReport {
        manifest_version: 1,
        generated_at: now_utc_string(),
        source: SourceFile {
            path: args.input.display().to_string(),
            sha256: Some(sha256_file(&args.input)?),
        },
        outcome,
    };

    if let Some(report_path) = &args.report_path {
        write_json_pretty(report_path, &report)?;
        info!(path = %report_path.display(), "wrote query set report");
    }

    let mut output = io::BufWriter::new(io::stdout().lock());
    if args.json {
        serde_json::to_writer_pretty(&mut output, &report)
            .context("failed to serialize query set report")?;
        writeln!(output)?;
    } else {
        let summary = &report.outcome.summary;
        writeln!(
            output,
            "Queries: read={} accepted={} failed={} duplicates={}",
            summary.total_lines_read,
            summary.successful_queries,
            summary.failed_lines,
            summary.duplicate_queries,
        )?;
        for entry in &report.outcome.queries {
            match &entry.reference_answer {
                Some(answer) => writeln!(output, "\t{}\t(reference: {answer})", entry.query_text)?,
                None => writeln!(output, "\t{}", entry.query_text)?,
            }
        }
        for error in summary.errors.iter().take(args.max_errors_shown) {
            writeln!(output, "\tline {}: {}", error.line, error.error)?;
        }
        if summary.errors.len() > args.max_errors_shown {
            writeln!(
                output,
                "\tShowing {} of {} errors",
                args.max_errors_shown,
                summary.errors.len()
            )?;
        }
    }
    output.flush()?;

    if let Some(error) = &report.outcome.error {
        bail!("query set rejected: {error}");
    }

    Ok(())
}
