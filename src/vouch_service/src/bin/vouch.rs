use std::process::ExitCode;

use color_eyre::eyre::Result;
use vouch_adapters::Settings;
use vouch_service::{
    build_token_service,
    cli::{
        self,
        actions::{self, Outcome},
    },
    init_tracing,
};

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    init_tracing()?;

    let action = cli::start().unwrap_or_else(|e| e.exit());

    let settings = Settings::load()?;
    let token_service = build_token_service(&settings)?;
    let default_ttl = settings.tokens.ttl()?;

    match actions::handle(action, &token_service, default_ttl) {
        Ok(Outcome::Issued(token)) => println!("{}", token.as_str()),
        Ok(Outcome::Verified(subject)) => println!("{subject}"),
        Err(e) => {
            tracing::debug!(error = %e, "Token rejected");
            eprintln!("{}", e.kind());
            return Ok(ExitCode::FAILURE);
        }
    }

    Ok(ExitCode::SUCCESS)
}
