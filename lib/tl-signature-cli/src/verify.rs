use crate::{args::VerifyArgs, config::Configuration, util};
use miette::{miette, IntoDiagnostic, Result};
use std::{fs, path::Path};
use tl_signature::{crypto, JwkSet, KeySource, Verifier};
use tracing::debug;

#[derive(Debug, PartialEq)]
enum KeyFile<'a> {
    PublicKey(&'a Path),
    Jwks(&'a Path),
}

fn key_file<'a>(args: &'a VerifyArgs, config: &'a Configuration) -> Option<KeyFile<'a>> {
    let flags = (args.public_key.as_deref(), args.jwks.as_deref());
    let (public_key, jwks) = if flags == (None, None) {
        (config.public_key.as_deref(), config.jwks.as_deref())
    } else {
        flags
    };

    match (public_key, jwks) {
        (Some(path), _) => Some(KeyFile::PublicKey(path)),
        (None, Some(path)) => Some(KeyFile::Jwks(path)),
        (None, None) => None,
    }
}

fn key_source(args: &VerifyArgs, config: &Configuration) -> Result<KeySource> {
    match key_file(args, config) {
        Some(KeyFile::PublicKey(path)) => {
            debug!(path = %path.display(), "loading public key");
            let pem = fs::read_to_string(path).into_diagnostic()?;
            Ok(KeySource::PublicKey(crypto::parse::public_key(&pem)?))
        }
        Some(KeyFile::Jwks(path)) => {
            debug!(path = %path.display(), "loading key set");
            let jwks = fs::read(path).into_diagnostic()?;
            Ok(KeySource::from(JwkSet::parse(&jwks)?))
        }
        None => Err(miette!(
            "No public key. Pass `--public-key`/`--jwks` or set `TL_SIGNATURE_PUBLIC_KEY`/`TL_SIGNATURE_JWKS` {}",
            util::error_kaomoji()
        )),
    }
}

pub fn do_it(args: VerifyArgs, config: &Configuration) -> Result<()> {
    let key_source = key_source(&args, config)?;
    let body = util::read_body(args.request.body.as_deref())?;

    let result = Verifier::new(key_source)
        .method(&args.request.method)
        .path(&args.request.path)
        .headers(args.request.headers())
        .require_headers(args.required_headers.iter().map(String::as_str))
        .body(&body)
        .verify(&args.token);

    if let Err(err) = result {
        return Err(miette::Report::new(err)
            .wrap_err(format!("Verification failed {}", util::error_kaomoji())));
    }

    println!("✅ Signature is valid! {}", util::success_kaomoji());

    Ok(())
}
