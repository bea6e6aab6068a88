use std::path::PathBuf;

use rgn_stats::trafo_map::TrafoMap;

use crate::util::{self, Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct FitArg {
    /// Path to a JSON array of numbers (`-` for stdin)
    input: PathBuf,
    /// Output file path for the transformation map
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &FitArg) -> anyhow::Result<()> {
    let FitArg { input, output } = arg;

    let values = util::read_values_file(input)?;
    let map = TrafoMap::fit(&values)?;
    if map.is_empty() {
        tracing::warn!("Input is empty; the saved map cannot transform values");
    } else {
        tracing::info!("Fitted {} distinct values", map.len());
    }

    Output::save_json(&map, output.as_deref())?;
    Ok(())
}
