use clap::{Parser, Subcommand};

use self::{
    demo::DemoArg, fit::FitArg, normalize::NormalizeArg, transform::TransformArg,
};

mod demo;
mod fit;
mod normalize;
mod transform;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about = "Rank Gaussian normalization of numeric features", long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Normalize the built-in sample and print the result
    Demo(#[clap(flatten)] DemoArg),
    /// Fit on a sample and normalize the same sample
    Normalize(#[clap(flatten)] NormalizeArg),
    /// Fit a transformation map and save it as JSON
    Fit(#[clap(flatten)] FitArg),
    /// Apply a saved transformation map to new values
    Transform(#[clap(flatten)] TransformArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Demo(DemoArg::default())) {
        Mode::Demo(arg) => demo::run(&arg)?,
        Mode::Normalize(arg) => normalize::run(&arg)?,
        Mode::Fit(arg) => fit::run(&arg)?,
        Mode::Transform(arg) => transform::run(&arg)?,
    }
    Ok(())
}
