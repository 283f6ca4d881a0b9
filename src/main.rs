use clap::Parser;
use log::error;
use std::process::ExitCode;
use voatrust::cli::{Cli, Commands};
use voatrust::client::VoatError;
use voatrust::config::AppConfig;
use voatrust::operations::comment::{handle_comment_command, CommentOptions};
use voatrust::operations::comments::{handle_comments_command, CommentsOptions};
use voatrust::operations::posts::{handle_posts_command, PostsOptions};
use voatrust::operations::subverse_info::{handle_subverse_info_command, SubverseInfoOptions};
use voatrust::operations::token::{handle_token_command, TokenOptions};

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), VoatError> {
    let config = AppConfig::load();
    let client = config.create_client()?;
    let tz = cli.tz;

    match cli.command {
        Commands::Subverse { name } => {
            handle_subverse_info_command(SubverseInfoOptions { name, tz }, client).await
        }
        Commands::Posts { subverse, brief } => {
            handle_posts_command(PostsOptions { subverse, brief, tz }, client).await
        }
        Commands::Comments {
            subverse,
            submission_id,
        } => {
            let options = CommentsOptions {
                subverse,
                submission_id,
                tz,
            };
            handle_comments_command(options, client).await
        }
        Commands::Comment { comment_id } => {
            handle_comment_command(CommentOptions { comment_id, tz }, client).await
        }
        Commands::Token => {
            let options = TokenOptions {
                username: config.require_username()?,
                password: config.require_password()?,
                tz,
            };
            handle_token_command(options, client).await
        }
    }
}
