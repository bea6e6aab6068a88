use std::path::PathBuf;

use rgn_stats::normalizer::{OutputPrecision, RankGaussNormalizer};

use crate::util::{self, Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TransformArg {
    /// Path to a JSON array of numbers (`-` for stdin)
    input: PathBuf,
    /// Path to a transformation map saved by `fit` or `normalize --map-output`
    #[arg(long)]
    map: PathBuf,
    /// Output precision (f32 or f64)
    #[arg(long, default_value = "f32")]
    precision: OutputPrecision,
    /// Output file path for the normalized values
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &TransformArg) -> anyhow::Result<()> {
    let TransformArg {
        input,
        map,
        precision,
        output,
    } = arg;

    let trafo_map = util::read_trafo_map_file(map)?;
    let values = util::read_values_file(input)?;
    let rgn = RankGaussNormalizer::from_trafo_map(trafo_map, *precision);
    let normalized = rgn.transform(&values)?;

    Output::save_json(&normalized, output.as_deref())?;
    util::log_output_summary(&normalized);
    Ok(())
}
