use std::path::PathBuf;

use rgn_stats::normalizer::{OutputPrecision, RankGaussNormalizer};

use crate::util::{self, Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct NormalizeArg {
    /// Path to a JSON array of numbers (`-` for stdin)
    input: PathBuf,
    /// Output precision (f32 or f64)
    #[arg(long, default_value = "f32")]
    precision: OutputPrecision,
    /// Output file path for the normalized values
    #[arg(long)]
    output: Option<PathBuf>,
    /// Also save the fitted transformation map to this path
    #[arg(long)]
    map_output: Option<PathBuf>,
}

pub(crate) fn run(arg: &NormalizeArg) -> anyhow::Result<()> {
    let NormalizeArg {
        input,
        precision,
        output,
        map_output,
    } = arg;

    let values = util::read_values_file(input)?;
    let mut rgn = RankGaussNormalizer::with_precision(*precision);
    let normalized = rgn.fit_transform(&values)?;

    if let (Some(path), Some(map)) = (map_output.as_deref(), rgn.trafo_map()) {
        Output::save_json(map, Some(path))?;
    }
    Output::save_json(&normalized, output.as_deref())?;
    util::log_output_summary(&normalized);
    Ok(())
}
