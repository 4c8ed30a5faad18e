use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::Value;
use tracing::info;

use crate::cli::ExportJudgmentsArgs;
use crate::judgments::{JudgmentGroup, to_csv};
use crate::util::{read_json_file, write_text};

pub fn run(args: ExportJudgmentsArgs) -> Result<()> {
    let groups = load_groups(&args.input)?;
    let csv = to_csv(&groups);
    let rows = groups.iter().map(|group| group.ratings.len()).sum::<usize>();

    match &args.output {
        Some(output_path) => {
            write_text(output_path, &csv)?;
            info!(
                path = %output_path.display(),
                queries = groups.len(),
                rows,
                "wrote judgment csv"
            );
        }
        None => {
            let mut output = io::BufWriter::new(io::stdout().lock());
            output.write_all(csv.as_bytes())?;
            output.flush()?;
        }
    }

    Ok(())
}

fn load_groups(path: &Path) -> Result<Vec<JudgmentGroup>> {
    let value = read_json_file(path)?;
    let groups = match value {
        array @ Value::Array(_) => array,
        Value::Object(mut object) => object
            .remove("judgmentRatings")
            .with_context(|| format!("no judgmentRatings in {}", path.display()))?,
        _ => bail!("expected a judgment report or array in {}", path.display()),
    };

    serde_json::from_value(groups)
        .with_context(|| format!("failed to decode judgment groups from {}", path.display()))
}
