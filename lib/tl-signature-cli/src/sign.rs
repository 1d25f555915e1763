use crate::{args::SignArgs, config::Configuration, util};
use miette::{miette, IntoDiagnostic, Result};
use std::fs;
use tracing::debug;

pub fn do_it(args: SignArgs, config: &Configuration) -> Result<()> {
    let kid = args.kid.as_deref().or(config.kid.as_deref()).ok_or_else(|| {
        miette!(
            "No key ID. Pass `--kid` or set `TL_SIGNATURE_KID` {}",
            util::error_kaomoji()
        )
    })?;

    let key_path = args
        .private_key
        .as_deref()
        .or(config.private_key.as_deref())
        .ok_or_else(|| {
            miette!(
                "No private key. Pass `--private-key` or set `TL_SIGNATURE_PRIVATE_KEY` {}",
                util::error_kaomoji()
            )
        })?;

    debug!(path = %key_path.display(), "loading private key");
    let private_key = fs::read_to_string(key_path).into_diagnostic()?;
    let body = util::read_body(args.request.body.as_deref())?;

    let mut signer = tl_signature::sign_with_pem(kid, &private_key)?
        .method(&args.request.method)
        .path(&args.request.path)
        .headers(args.request.headers())
        .body(&body);

    if let Some(ref jku) = args.jku {
        signer = signer.jku(jku);
    }

    println!("{}", signer.sign()?);

    Ok(())
}
