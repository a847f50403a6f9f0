//! Print the fields of one or more Fernet tokens
//!
//! ```not_rust
//! cargo run --example inspect -- [--ttl SECONDS] TOKEN...
//! RUST_LOG=keyless_fernet=debug cargo run --example inspect -- asdf
//! ```

use keyless_fernet::TokenDecoder;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "keyless_fernet=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut decoder = TokenDecoder::new();
    let mut tokens = Vec::new();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--ttl" {
            let seconds = args.next().ok_or("--ttl needs a value")?;
            decoder.ttl(seconds.parse()?);
        } else {
            tokens.push(arg);
        }
    }

    if tokens.is_empty() {
        return Err("usage: inspect [--ttl SECONDS] TOKEN...".into());
    }

    let mut failed = false;
    for input in &tokens {
        match decoder.decode(input) {
            Ok(token) => {
                println!("version:    {}", token.version());
                println!("timestamp:  {}", token.timestamp());
                match token.created_at() {
                    Some(created) => println!("created:    {created}"),
                    None => println!("created:    (out of range)"),
                }
                println!("iv:         {}", token.iv());
                println!("ciphertext: {}", token.ciphertext());
                println!("hmac:       {}", token.hmac());
            }
            Err(e) => {
                println!("invalid:    {e}");
                failed = true;
            }
        }
        println!();
    }

    if failed {
        std::process::exit(1);
    }
    Ok(())
}
