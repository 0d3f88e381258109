use clap::{ArgMatches, error::ErrorKind};
use vouch_core::{TokenPurpose, TokenTtl, UserId};

use super::actions::Action;

fn missing(name: &str) -> clap::Error {
    clap::Error::raw(
        ErrorKind::MissingRequiredArgument,
        format!("missing required argument: --{name}\n"),
    )
}

fn purpose(matches: &ArgMatches) -> Result<TokenPurpose, clap::Error> {
    matches
        .get_one::<TokenPurpose>("purpose")
        .copied()
        .ok_or_else(|| missing("purpose"))
}

pub fn handler(matches: &ArgMatches) -> Result<Action, clap::Error> {
    match matches.subcommand() {
        Some(("issue", sub_m)) => Ok(Action::Issue {
            subject: sub_m
                .get_one::<i64>("subject")
                .copied()
                .map(UserId::new)
                .ok_or_else(|| missing("subject"))?,
            purpose: purpose(sub_m)?,
            ttl: sub_m.get_one::<TokenTtl>("ttl").copied(),
        }),
        Some(("verify", sub_m)) => Ok(Action::Verify {
            purpose: purpose(sub_m)?,
            token: sub_m
                .get_one::<String>("token")
                .cloned()
                .ok_or_else(|| missing("token"))?,
        }),
        _ => Err(clap::Error::new(ErrorKind::MissingSubcommand)),
    }
}
