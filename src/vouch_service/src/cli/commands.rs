use clap::{
    Arg, ColorChoice, Command,
    builder::{
        ValueParser,
        styling::{AnsiColor, Effects, Styles},
    },
};
use vouch_core::{TokenPurpose, TokenTtl};

pub fn validator_purpose() -> ValueParser {
    ValueParser::from(|purpose: &str| -> Result<TokenPurpose, String> { purpose.parse() })
}

pub fn validator_ttl() -> ValueParser {
    ValueParser::from(|ttl: &str| -> Result<TokenTtl, String> {
        let seconds = ttl
            .parse::<i64>()
            .map_err(|_| "ttl must be a whole number of seconds".to_string())?;
        TokenTtl::from_secs(seconds).map_err(|e| e.to_string())
    })
}

fn purpose_arg() -> Arg {
    Arg::new("purpose")
        .long("purpose")
        .help("What the token is for: confirm or reset")
        .required(true)
        .value_parser(validator_purpose())
}

pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("vouch")
        .about("Issue and check account confirmation and password reset tokens")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("issue")
                .about("Print a signed token for a user")
                .arg(
                    Arg::new("subject")
                        .long("subject")
                        .help("User id the token is issued for")
                        .required(true)
                        .value_parser(clap::value_parser!(i64)),
                )
                .arg(purpose_arg())
                .arg(
                    Arg::new("ttl")
                        .long("ttl")
                        .help("Lifetime in seconds, defaults to tokens.time_to_live")
                        .value_parser(validator_ttl()),
                ),
        )
        .subcommand(
            Command::new("verify")
                .about("Check a token and print the user id it names")
                .arg(purpose_arg())
                .arg(
                    Arg::new("token")
                        .help("The token to check")
                        .required(true),
                ),
        )
}
