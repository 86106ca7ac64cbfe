// Input validation utilities

use anyhow::Result;
use regex::Regex;

/// Validate the Snellen lines offered in the wizard: metric or imperial fractions such as
/// `6/9` or `20/40`, unique, at least one.
pub fn validate_snellen_options(options: &[String]) -> Result<()> {
    if options.is_empty() {
        return Err(anyhow::anyhow!("At least one Snellen option is required"));
    }

    let fraction_re = Regex::new(r"^[1-9][0-9]{0,2}/[1-9][0-9]{0,3}$").map_err(|e| {
        anyhow::anyhow!("Internal error: failed to compile Snellen regex: {}", e)
    })?;

    for opt in options {
        if !fraction_re.is_match(opt) {
            return Err(anyhow::anyhow!(
                "Snellen option '{}' is not a fraction like 6/9 or 20/40",
                opt
            ));
        }
    }

    reject_duplicates("Snellen", options)
}

/// Validate the duochrome answers offered in the wizard.
pub fn validate_duochrome_options(options: &[String]) -> Result<()> {
    if options.is_empty() {
        return Err(anyhow::anyhow!("At least one duochrome option is required"));
    }

    // An empty option would be indistinguishable from "no selection".
    if options.iter().any(|o| o.trim().is_empty()) {
        return Err(anyhow::anyhow!("Duochrome options cannot be blank"));
    }

    reject_duplicates("Duochrome", options)
}

fn reject_duplicates(kind: &str, options: &[String]) -> Result<()> {
    for (i, opt) in options.iter().enumerate() {
        if options[..i].contains(opt) {
            return Err(anyhow::anyhow!("{} option '{}' is listed twice", kind, opt));
        }
    }
    Ok(())
}
