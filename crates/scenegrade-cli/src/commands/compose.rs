use anyhow::Result;
use clap::Args;
use scenegrade_core::grading::{compose, FilterChain, GradingParameters};
use scenegrade_core::render::to_css;
use serde::Serialize;

use super::GradingArgs;
use crate::summary::print_grading;

#[derive(Args)]
pub struct ComposeArgs {
    #[command(flatten)]
    pub grading: GradingArgs,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct ComposeOutput<'a> {
    base: &'a GradingParameters,
    preset: Option<&'a str>,
    chain: &'a FilterChain,
    css: String,
}

pub fn run(args: &ComposeArgs) -> Result<()> {
    let catalog = args.grading.catalog()?;
    let base = args.grading.base()?;
    let preset = args.grading.preset(&catalog)?;
    let chain = compose(&base, preset);

    if args.json {
        let output = ComposeOutput {
            base: &base,
            preset: preset.map(|p| p.id.as_str()),
            chain: &chain,
            css: to_css(&chain),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_grading(&base, preset, &chain);
    }
    Ok(())
}
