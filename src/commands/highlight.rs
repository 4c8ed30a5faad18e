use std::io::{self, Write};

use anyhow::{Context, Result};
use tracing::debug;

use crate::cli::HighlightArgs;
use crate::comparison::{highlight_segments, render_marked};
use crate::config::load_comparison_config;

pub fn run(args: HighlightArgs) -> Result<()> {
    let config = load_comparison_config(args.config.as_deref())?;
    let tags = config
        .highlight
        .with_overrides(args.pre_tag.as_deref(), args.post_tag.as_deref());

    let segments = highlight_segments(&args.text, &tags);
    debug!(
        segments = segments.len(),
        highlighted = segments.iter().filter(|segment| segment.highlighted).count(),
        "highlight segments computed"
    );

    let mut output = io::BufWriter::new(io::stdout().lock());
    if args.json {
        serde_json::to_writer_pretty(&mut output, &segments)
            .context("failed to serialize highlight segments")?;
        writeln!(output)?;
    } else {
        writeln!(output, "{}", render_marked(&segments))?;
    }
    output.flush()?;
    Ok(())
}
