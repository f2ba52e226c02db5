use std::io::Read;

use anyhow::{Context, Result, bail};
use clap::Parser;

use bearer_gate::services::auth::authenticator::SECRET_LEN;
use bearer_gate::services::token::{BrancaCodec, TokenCodec};

/// Encode a payload into a Branca token accepted by bearer-gate.
///
/// Output can be used directly as `Authorization: Bearer <token>`.
#[derive(Parser, Debug)]
#[command(name = "token-gen", version, about)]
struct Args {
    /// 32-byte secret shared with the server
    #[arg(long, env = "BRANCA_SECRET", hide_env_values = true)]
    secret: String,

    /// Override the embedded timestamp (unix seconds). Default: now.
    #[arg(long)]
    timestamp: Option<u32>,

    /// Payload to embed. Reads stdin when omitted.
    payload: Option<String>,

    /// Require the payload to be valid JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.secret.len() != SECRET_LEN {
        bail!("secret must be {SECRET_LEN} bytes, got {}", args.secret.len());
    }

    let payload = match args.payload {
        Some(p) => p,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading payload from stdin")?;
            buf.trim_end_matches('\n').to_string()
        }
    };

    if args.json {
        serde_json::from_str::<serde_json::Value>(&payload).context("payload is not valid JSON")?;
    }

    let codec = BrancaCodec::new(args.secret.as_bytes())?;
    let token = codec.encode(&payload, args.timestamp)?;
    println!("{token}");
    Ok(())
}
