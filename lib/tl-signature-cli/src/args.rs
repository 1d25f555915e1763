use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

fn parse_header(raw: &str) -> Result<(String, String), String> {
    let Some((name, value)) = raw.split_once(':') else {
        return Err(format!("expected `NAME:VALUE`, got `{raw}`"));
    };

    let name = name.trim();
    if name.is_empty() {
        return Err("header name is empty".into());
    }

    Ok((name.into(), value.trim_start().into()))
}

#[derive(Args)]
pub struct RequestArgs {
    /// HTTP method of the request
    #[arg(default_value = "POST", long, short = 'X')]
    pub method: String,

    /// Path of the request, starting with `/`
    #[arg(long, short)]
    pub path: String,

    /// Header to cover, as `NAME:VALUE`. Can be repeated, order is kept
    #[arg(long = "header", short = 'H', value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// File containing the request body, `-` reads from stdin
    #[arg(long, short)]
    pub body: Option<PathBuf>,
}

impl RequestArgs {
    pub fn headers(&self) -> impl Iterator<Item = (&str, &[u8])> + '_ {
        self.headers
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_bytes()))
    }
}

#[derive(Args)]
pub struct SignArgs {
    #[command(flatten)]
    pub request: RequestArgs,

    /// ID of the signing key [env: TL_SIGNATURE_KID]
    #[arg(long)]
    pub kid: Option<String>,

    /// PEM file of the P-521 private key [env: TL_SIGNATURE_PRIVATE_KEY]
    #[arg(long)]
    pub private_key: Option<PathBuf>,

    /// URL of the JWKS the verifier should fetch the public key from
    #[arg(long)]
    pub jku: Option<String>,
}

#[derive(Args)]
pub struct VerifyArgs {
    #[command(flatten)]
    pub request: RequestArgs,

    /// PEM file of the P-521 public key [env: TL_SIGNATURE_PUBLIC_KEY]
    #[arg(conflicts_with = "jwks", long)]
    pub public_key: Option<PathBuf>,

    /// JWKS document to pick the key from by `kid` [env: TL_SIGNATURE_JWKS]
    #[arg(long)]
    pub jwks: Option<PathBuf>,

    /// Header the signature has to cover. Can be repeated
    #[arg(long = "require-header")]
    pub required_headers: Vec<String>,

    /// The `Tl-Signature` token
    pub token: String,
}

#[derive(Subcommand)]
pub enum ToolSubcommand {
    /// Sign a request and print the `Tl-Signature` token
    Sign(SignArgs),

    /// Verify the `Tl-Signature` token of a request
    Verify(VerifyArgs),

    /// Print the unverified envelope of a token
    Inspect {
        /// The `Tl-Signature` token
        token: String,
    },

    /// Print the unverified `jku` of a token
    Jku {
        /// The `Tl-Signature` token
        token: String,
    },
}

#[derive(Parser)]
#[command(about, version)]
pub struct ToolArgs {
    #[clap(subcommand)]
    pub subcommand: ToolSubcommand,
}

#[cfg(test)]
mod test {
    use super::{parse_header, ToolArgs, ToolSubcommand};
    use clap::{CommandFactory, Parser};

    #[test]
    fn verify_args() {
        ToolArgs::command().debug_assert();
    }

    #[test]
    fn header_parsing() {
        assert_eq!(
            parse_header("Idempotency-Key: idemp-123").unwrap(),
            ("Idempotency-Key".into(), "idemp-123".into())
        );
        assert_eq!(
            parse_header("X-Time:2021-11-29T11:42:55Z").unwrap(),
            ("X-Time".into(), "2021-11-29T11:42:55Z".into())
        );
        assert!(parse_header("no-colon").is_err());
        assert!(parse_header(": value").is_err());
    }

    #[test]
    fn sign_subcommand() {
        let args = ToolArgs::try_parse_from([
            "tl-signature",
            "sign",
            "--path",
            "/payouts",
            "-H",
            "Idempotency-Key: 1",
            "-H",
            "X-Custom: 2",
        ])
        .unwrap();

        let ToolSubcommand::Sign(args) = args.subcommand else {
            panic!("expected sign subcommand");
        };
        assert_eq!(args.request.method, "POST");
        assert_eq!(
            args.request.headers().collect::<Vec<_>>(),
            [("Idempotency-Key", &b"1"[..]), ("X-Custom", &b"2"[..])]
        );
    }

    #[test]
    fn key_sources_conflict() {
        assert!(ToolArgs::try_parse_from([
            "tl-signature",
            "verify",
            "--path",
            "/",
            "--public-key",
            "key.pem",
            "--jwks",
            "jwks.json",
            "token",
        ])
        .is_err());
    }
}
