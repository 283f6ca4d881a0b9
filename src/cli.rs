use chrono_tz::Tz;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "voatrust",
    version,
    about = "Rust client for the Voat API."
)]
pub struct Cli {
    /// Time zone used to display timestamps (IANA name, e.g. America/Los_Angeles).
    #[arg(
        long,
        global = true,
        default_value = "UTC",
        value_parser = parse_tz,
        help = "Display time zone"
    )]
    pub tz: Tz,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Show a subverse's info.
    Subverse {
        /// The name of the subverse.
        #[arg(help = "Subverse name", required = true)]
        name: String,
    },

    /// List the posts of a subverse.
    Posts {
        /// The name of the subverse to list.
        #[arg(help = "Subverse name", required = true)]
        subverse: String,

        /// Display posts in a brief, one-line format.
        #[arg(long, short, help = "Show posts in a brief one-line format")]
        brief: bool,
    },

    /// Show a submission and its comment thread.
    Comments {
        #[arg(help = "Subverse the submission was posted in", required = true)]
        subverse: String,

        #[arg(help = "Submission id", required = true)]
        submission_id: i64,
    },

    /// Show a single comment with its parent and direct replies.
    Comment {
        #[arg(help = "Comment id", required = true)]
        comment_id: i64,
    },

    /// Acquire an auth token with the configured VOAT_USERNAME and VOAT_PASSWORD.
    Token,
}

fn parse_tz(name: &str) -> Result<Tz, String> {
    name.parse::<Tz>()
        .map_err(|_| format!("unknown time zone: {}", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_time_zone() {
        let cli = Cli::parse_from(["voatrust", "posts", "news", "--brief", "--tz", "Europe/Berlin"]);
        assert_eq!(cli.tz, chrono_tz::Europe::Berlin);
        match cli.command {
            Commands::Posts { subverse, brief } => {
                assert_eq!(subverse, "news");
                assert!(brief);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn defaults_to_utc() {
        let cli = Cli::parse_from(["voatrust", "comment", "17"]);
        assert_eq!(cli.tz, Tz::UTC);
        assert!(matches!(cli.command, Commands::Comment { comment_id: 17 }));
    }

    #[test]
    fn rejects_unknown_time_zone() {
        assert!(Cli::try_parse_from(["voatrust", "--tz", "Mars/Olympus", "token"]).is_err());
    }
}
