//! # Regions Subcommand
//!
//! Prints the region-code table as JSON. The codes name the per-region
//! municipality files consumed by `pcl import` and the API's `files`
//! backend.

use std::io::Write;

use anyhow::Result;
use pcl_core::RegionTable;

/// Execute the regions subcommand.
pub fn run_regions<W: Write>(out: &mut W) -> Result<u8> {
    let codes = RegionTable::canadian().region_codes();
    writeln!(out, "{}", serde_json::to_string_pretty(&codes)?)?;
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn prints_every_region() {
        let mut out = Vec::new();
        assert_eq!(run_regions(&mut out).unwrap(), 0);

        let table: BTreeMap<String, String> = serde_json::from_slice(&out).unwrap();
        assert_eq!(table.len(), 19);
        assert_eq!(table["Ontario Toronto Proper"], "ON3");
        assert_eq!(table["Newfoundland"], "NL");
    }
}
