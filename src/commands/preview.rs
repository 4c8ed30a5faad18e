use std::io::{self, Write};

use anyhow::{Context, Result};
use tracing::info;

use crate::cli::{PreviewArgs, PreviewKind};
use crate::preview::{decode_judgment_previews, decode_query_previews};
use crate::util::read_json_file;

pub fn run(args: PreviewArgs) -> Result<()> {
    let raw = read_json_file(&args.input)?;
    let items: Vec<String> = serde_json::from_value(raw).with_context(|| {
        format!(
            "expected a JSON array of strings in {}",
            args.input.display()
        )
    })?;

    let (decoded, kept) = match args.kind {
        PreviewKind::Judgments => {
            let groups = decode_judgment_previews(&items);
            let kept = groups.len();
            (serde_json::to_value(groups)?, kept)
        }
        PreviewKind::Queries => {
            let entries = decode_query_previews(&items);
            let kept = entries.len();
            (serde_json::to_value(entries)?, kept)
        }
    };

    info!(
        input = %args.input.display(),
        total = items.len(),
        kept,
        dropped = items.len() - kept,
        "decoded preview items"
    );

    let mut output = io::BufWriter::new(io::stdout().lock());
    serde_json::to_writer_pretty(&mut output, &decoded).context("failed to serialize preview")?;
    writeln!(output)?;
    output.flush()?;
    Ok(())
}
