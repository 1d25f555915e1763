use crate::util::error_kaomoji;
use miette::{IntoDiagnostic, Result};

fn unverified_warning() {
    eprintln!("⚠️  The signature has NOT been verified {}", error_kaomoji());
}

pub fn envelope(token: &str) -> Result<()> {
    let envelope = tl_signature::extract_envelope(token)
        .map_err(|err| miette::Report::new(err).with_source_code(token.to_owned()))?;

    unverified_warning();
    println!(
        "{}",
        serde_json::to_string_pretty(&envelope).into_diagnostic()?
    );

    Ok(())
}

pub fn jku(token: &str) -> Result<()> {
    let jku = tl_signature::extract_jku(token)
        .map_err(|err| miette::Report::new(err).with_source_code(token.to_owned()))?;

    unverified_warning();
    println!("{jku}");

    Ok(())
}
