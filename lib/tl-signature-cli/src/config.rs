use serde::Deserialize;
use std::path::PathBuf;

/// Defaults read from `TL_SIGNATURE_*` environment variables
///
/// Command-line flags take precedence over every value in here.
#[derive(Default, Deserialize)]
pub struct Configuration {
    pub kid: Option<String>,
    pub private_key: Option<PathBuf>,
    pub public_key: Option<PathBuf>,
    pub jwks: Option<PathBuf>,
}
