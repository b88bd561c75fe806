//! Verify a token against a provider's published keys and print its claims
//!
//! ```not_rust
//! cargo run --example inspect -- https://sso.example.com/auth/realms/demo "$TOKEN"
//! ```
//!
//! Set `RUST_LOG=jwks_tokens=debug` to see the remote requests.

use jwks_tokens::discovery::OpenIdConfiguration;
use jwks_tokens::{AccessToken, IdToken, TokenView, Verifier, dangerous_decode_unverified};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=debug,jwks_tokens=info", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(base_url), Some(token)) = (args.next(), args.next()) else {
        eprintln!("usage: inspect <provider-base-url> <token>");
        std::process::exit(2);
    };

    let (header, _) = dangerous_decode_unverified(&token)?;
    tracing::debug!(alg = %header.algorithm, kid = ?header.kid(), "token header");

    let client = reqwest::Client::new();
    let config = OpenIdConfiguration::resolve(&client, &base_url).await?;
    let keys = config.resolve_jwks(&client).await?;
    tracing::info!(issuer = ?config.issuer, keys = keys.len(), "resolved key set");

    let verified = Verifier::new().build().verify(&token, &keys)?;

    let access = AccessToken::new(verified.claims());
    println!("type:    {:?}", access.token_type());
    println!("issuer:  {:?}", access.iss());
    println!("subject: {:?}", access.sub());
    println!("expires: {:?}", access.exp());
    println!("scopes:  {:?}", access.scopes());

    let id = IdToken::new(verified.claims());
    if let Some(email) = id.email() {
        println!("email:   {email} (verified: {:?})", id.email_verified());
    }

    for (name, value) in verified.claims().iter() {
        tracing::debug!(claim = name, value = %miniserde::json::to_string(value), "claim");
    }

    Ok(())
}
