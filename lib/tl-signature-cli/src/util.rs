use miette::{IntoDiagnostic, Result};
use owo_colors::{OwoColorize, Stream};
use std::{
    fmt::Display,
    fs,
    io::{self, Read},
    path::Path,
};

#[inline]
pub fn error_kaomoji() -> impl Display {
    "(┬┬﹏┬┬)".if_supports_color(Stream::Stdout, |text| text.red())
}

#[inline]
pub fn success_kaomoji() -> impl Display {
    "(^///^)".if_supports_color(Stream::Stdout, |text| text.green())
}

/// Read the request body from a file, `-` reads stdin, nothing means an empty body
pub fn read_body(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        None => Ok(Vec::new()),
        Some(path) if path == Path::new("-") => {
            let mut body = Vec::new();
            io::stdin().read_to_end(&mut body).into_diagnostic()?;
            Ok(body)
        }
        Some(path) => fs::read(path).into_diagnostic(),
    }
}
