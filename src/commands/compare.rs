use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use serde_json::Value;
use tracing::{info, warn};

use crate::cli::CompareArgs;
use crate::comparison::{
    ComparisonSession, ComparisonSnapshot, ID_FIELD, ImageFieldMatcher, ItemDetail, ItemStatus,
    ListSide, ResultItem, RowLayout, connector_lines, highlight_segments, legend, render_marked,
};
use crate::config::{HighlightTags, load_comparison_config};
use crate::model::{ComparisonReport, ResultSetSummary, SourceFile};
use crate::util::{
    now_utc_string, read_json_file, sha256_file, utc_compact_string, write_json_pretty,
};

pub fn run(args: CompareArgs) -> Result<()> {
    let run_id = format!("compare-{}", utc_compact_string(Utc::now()));
    let config = load_comparison_config(args.config.as_deref())?;
    let matcher = ImageFieldMatcher::from_config(&config.image_field)?;

    let result1 = load_results(&args.result1)?;
    let result2 = load_results(&args.result2)?;

    let mut session = ComparisonSession::new(matcher);
    session.update(&result1, &result2);
    if !session.view().is_ready() {
        bail!(
            "both {} and {} must contain a JSON array of results",
            args.result1.display(),
            args.result2.display()
        );
    }

    if args.display_field != ID_FIELD && !session.select_field(&args.display_field) {
        warn!(
            field = %args.display_field,
            "display field not offered by the results; using _id"
        );
    }

    let Some(snapshot) = session.view().snapshot() else {
        bail!("comparison view not ready");
    };

    let layout = RowLayout::new(config.layout, &snapshot.result_a, &snapshot.result_b);
    let connectors = connector_lines(&snapshot.result_a, &snapshot.result_b, &layout);

    info!(
        run_id = %run_id,
        query = %args.query_text,
        result1 = snapshot.result_a.len(),
        result2 = snapshot.result_b.len(),
        in_both = snapshot.statistics.in_both,
        improved = snapshot.statistics.improved,
        worsened = snapshot.statistics.worsened,
        connectors = connectors.len(),
        "comparison complete"
    );

    let report = ComparisonReport {
        manifest_version: 1,
        run_id,
        generated_at: now_utc_string(),
        query_text: args.query_text.clone(),
        result1: result_set_summary(&args.label1, &args.result1, &snapshot.statuses_a)?,
        result2: result_set_summary(&args.label2, &args.result2, &snapshot.statuses_b)?,
        statistics: snapshot.statistics,
        display_fields: snapshot.display_fields.clone(),
        selected_field: session.selected_field().to_string(),
        image_field: snapshot.image_field.clone(),
        legend: legend(),
        connectors,
    };

    if let Some(report_path) = &args.report_path {
        write_json_pretty(report_path, &report)?;
        info!(path = %report_path.display(), "wrote comparison report");
    }

    let detail = match &args.detail {
        Some(id) => {
            let detail = snapshot.item_detail(id);
            if detail.is_none() {
                warn!(id = %id, "no result with this _id in either list");
            }
            detail
        }
        None => None,
    };

    if args.json {
        let mut output = io::BufWriter::new(io::stdout().lock());
        serde_json::to_writer_pretty(&mut output, &report)
            .context("failed to serialize comparison report")?;
        writeln!(output)?;
        if let Some(detail) = &detail {
            serde_json::to_writer_pretty(&mut output, detail)
                .context("failed to serialize item detail")?;
            writeln!(output)?;
        }
        output.flush()?;
    } else {
        write_text_report(
            &report,
            snapshot,
            session.selected_field(),
            &config.highlight,
            detail.as_ref(),
        )?;
    }

    Ok(())
}

fn load_results(path: &Path) -> Result<Value> {
    let value = read_json_file(path)?;
    Ok(match value.pointer("/hits/hits") {
        Some(hits) => hits.clone(),
        None => value,
    })
}

fn result_set_summary(
    label: &str,
    path: &Path,
    statuses: &[ItemStatus],
) -> Result<ResultSetSummary> {
    Ok(ResultSetSummary {
        label: label.to_string(),
        source: SourceFile {
            path: path.display().to_string(),
            sha256: Some(sha256_file(path)?),
        },
        item_count: statuses.len(),
        statuses: statuses.to_vec(),
    })
}

fn write_text_report(
    report: &ComparisonReport,
    snapshot: &ComparisonSnapshot,
    field: &str,
    tags: &HighlightTags,
    detail: Option<&ItemDetail>,
) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());
    let statistics = &report.statistics;

    if !report.query_text.is_empty() {
        writeln!(output, "Query: {}", report.query_text)?;
    }
    writeln!(
        output,
        "{}: {} results\t{}: {} results",
        report.result1.label,
        report.result1.item_count,
        report.result2.label,
        report.result2.item_count,
    )?;
    writeln!(
        output,
        "In both: {}\tOnly in {}: {}\tOnly in {}: {}",
        statistics.in_both,
        report.result1.label,
        statistics.only_in_result1,
        report.result2.label,
        statistics.only_in_result2,
    )?;
    writeln!(
        output,
        "Unchanged: {}\tImproved: {}\tWorsened: {}",
        statistics.unchanged, statistics.improved, statistics.worsened,
    )?;
    writeln!(
        output,
        "Display field: {field}\tImage field: {}",
        report.image_field.as_deref().unwrap_or("none")
    )?;

    let rows = snapshot.result_a.len().max(snapshot.result_b.len());
    for row in 0..rows {
        let left = format_cell(
            snapshot.result_a.get(row),
            snapshot.statuses_a.get(row),
            field,
            tags,
        );
        let right = format_cell(
            snapshot.result_b.get(row),
            snapshot.statuses_b.get(row),
            field,
            tags,
        );
        writeln!(output, "{left:<48}\t{right}")?;
    }

    if let Some(detail) = detail {
        writeln!(output, "Detail: {}", detail.id)?;
        for (side, rank, status) in [
            (ListSide::A, detail.rank_a, detail.status_a),
            (ListSide::B, detail.rank_b, detail.status_b),
        ] {
            let label = match side {
                ListSide::A => &report.result1.label,
                ListSide::B => &report.result2.label,
            };
            match (rank, status) {
                (Some(rank), Some(status)) => {
                    writeln!(output, "\t{label}: rank {rank} ({})", status.css_class())?
                }
                _ => writeln!(output, "\t{label}: absent")?,
            }
        }
        for (label, value) in &detail.fields {
            writeln!(output, "\t{label}: {value}")?;
        }
    }

    output.flush()?;
    Ok(())
}

fn format_cell(
    item: Option<&ResultItem>,
    status: Option<&ItemStatus>,
    field: &str,
    tags: &HighlightTags,
) -> String {
    match (item, status) {
        (Some(item), Some(status)) => {
            let value = render_marked(&highlight_segments(&item.display_value(field), tags));
            format!("{}. {} [{}]", item.rank, value, status.class)
        }
        _ => String::new(),
    }
}
