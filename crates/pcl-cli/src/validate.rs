//! # Validate Subcommand
//!
//! Checks each argument against the postal code grammar. With `--explain`
//! every valid code is followed by the facts derivable without a
//! municipality lookup.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use pcl_core::{Classifier, CodeFacts};

/// Arguments for the `pcl validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Postal codes to check. Quote codes containing a space.
    #[arg(value_name = "CODE", required = true)]
    pub codes: Vec<String>,

    /// Print province, region, and flags for each valid code.
    #[arg(long)]
    pub explain: bool,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 if every code is valid, 1 otherwise.
pub fn run_validate<W: Write>(args: &ValidateArgs, out: &mut W) -> Result<u8> {
    let classifier = Classifier::canadian();
    let mut invalid = 0usize;

    for raw in &args.codes {
        match classifier.describe(raw) {
            Ok(facts) => {
                writeln!(out, "VALID: {}", facts.code)?;
                if args.explain {
                    explain(&facts, out)?;
                }
            }
            Err(e) => {
                invalid += 1;
                tracing::debug!(code = %raw, error = %e, "rejected");
                writeln!(out, "INVALID: {raw:?} ({e})")?;
            }
        }
    }

    if invalid > 0 {
        writeln!(out, "\n{invalid} of {} code(s) invalid.", args.codes.len())?;
        Ok(1)
    } else {
        Ok(0)
    }
}

fn explain<W: Write>(facts: &CodeFacts, out: &mut W) -> Result<()> {
    writeln!(out, "  province:    {}", facts.region.province)?;
    if !facts.region.subdivision.is_empty() {
        writeln!(out, "  subdivision: {}", facts.region.subdivision)?;
    }
    writeln!(out, "  region code: {}", facts.region.code)?;
    writeln!(out, "  delivery:    {}", if facts.urban { "urban" } else { "rural" })?;

    let flags: Vec<&str> = [
        (facts.government_building, "government building"),
        (facts.business_reply, "business reply"),
        (facts.regional_distribution_centre, "regional distribution centre"),
        (facts.post_office, "post office"),
    ]
    .into_iter()
    .filter_map(|(set, name)| set.then_some(name))
    .collect();

    if !flags.is_empty() {
        writeln!(out, "  flags:       {}", flags.join(", "))?;
    }
    Ok(())
}
