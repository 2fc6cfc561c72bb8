use clap::{Arg, ArgMatches, Command};

pub const ARG_PUBLIC_BASE_URL: &str = "public-base-url";
pub const ARG_SESSION_TTL_SECONDS: &str = "session-ttl-seconds";

#[derive(Debug, Clone)]
pub struct Options {
    pub public_base_url: String,
    pub session_ttl_seconds: i64,
}

impl Options {
    /// Parse session arguments from matches. Both arguments carry clap
    /// defaults, so parsing never fails.
    #[must_use]
    pub fn parse(matches: &ArgMatches) -> Self {
        let public_base_url = matches
            .get_one::<String>(ARG_PUBLIC_BASE_URL)
            .cloned()
            .unwrap_or_else(|| "http://localhost:8080".to_string());

        let session_ttl_seconds = matches
            .get_one::<i64>(ARG_SESSION_TTL_SECONDS)
            .copied()
            .unwrap_or(43200);

        Self {
            public_base_url,
            session_ttl_seconds,
        }
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_PUBLIC_BASE_URL)
                .long(ARG_PUBLIC_BASE_URL)
                .help("Public base URL of the site, an https URL turns on the Secure cookie flag")
                .env("PORDISTO_PUBLIC_BASE_URL")
                .default_value("http://localhost:8080"),
        )
        .arg(
            Arg::new(ARG_SESSION_TTL_SECONDS)
                .long(ARG_SESSION_TTL_SECONDS)
                .help("Login session TTL in seconds")
                .env("PORDISTO_SESSION_TTL_SECONDS")
                .default_value("43200")
                .value_parser(clap::value_parser!(i64)),
        )
}
