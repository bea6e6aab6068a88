//! Built-in demonstration sample
//!
//! Normalizes a fixed 32-value sample with a wide, heavy-tailed spread and
//! prints the normalized values.

use std::path::PathBuf;

use rgn_stats::normalizer::{OutputPrecision, RankGaussNormalizer};

use crate::util::{self, Output};

const DEMO_SAMPLE: [f64; 32] = [
    -19.9378, 10.5341, -32.4515, 33.0969, 24.3530, -1.1830, -1.4106, -4.9431, 14.2153, 26.3700,
    -7.6760, 60.3346, 36.2992, -126.8806, 14.2488, -5.0821, 1.6958, -21.2168, -49.1075, -8.3084,
    -1.5748, 3.7900, -2.1561, 4.0756, -9.0289, -13.9533, -9.8466, 79.5876, -13.3332, -111.9568,
    -24.2531, 120.1174,
];

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct DemoArg {
    /// Output precision (f32 or f64)
    #[arg(long, default_value = "f32")]
    precision: OutputPrecision,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &DemoArg) -> anyhow::Result<()> {
    let DemoArg { precision, output } = arg;

    let mut rgn = RankGaussNormalizer::with_precision(*precision);
    let normalized = rgn.fit_transform(&DEMO_SAMPLE)?;
    if let Some(map) = rgn.trafo_map() {
        tracing::info!("Fitted {} distinct values", map.len());
    }

    Output::save_json(&normalized, output.as_deref())?;
    util::log_output_summary(&normalized);
    Ok(())
}
