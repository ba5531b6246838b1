//! CLI 명령 파싱 모듈.

use clap::{Args, Parser, Subcommand};

use crate::application::client::DEFAULT_ENDPOINT;
use crate::application::usecases::fetch_posts::FetchPostsRequest;
use crate::domain::options::{FetchOptions, IncludeInput};

#[derive(Debug, Parser)]
#[command(name = "disqus-relay")]
#[command(about = "Fetch Disqus threads with optional response caching")]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch a thread endpoint (default: threads/listPosts) and print JSON
    Fetch(FetchArgs),
    /// Show effective merged config and API key sources
    Config,
}

#[derive(Debug, Args)]
struct FetchArgs {
    /// Forum shortname
    shortname: String,

    /// API endpoint path without format suffix
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Thread identifier (takes priority over --link and --id)
    #[arg(long)]
    identifier: Option<String>,

    /// Canonical thread link (takes priority over --id)
    #[arg(long)]
    link: Option<String>,

    /// Numeric thread id
    #[arg(long)]
    id: Option<String>,

    #[arg(long)]
    since: Option<String>,

    #[arg(long)]
    cursor: Option<String>,

    #[arg(long)]
    query: Option<String>,

    /// Post states to include; repeatable or comma separated
    #[arg(long)]
    include: Vec<String>,

    /// asc or desc
    #[arg(long)]
    order: Option<String>,

    /// Page size (values above 100 are capped)
    #[arg(long)]
    limit: Option<u32>,

    /// Print echo parameters alongside the response
    #[arg(long)]
    echo: bool,
}

pub enum CliAction {
    InspectConfig,
    Fetch {
        request: FetchPostsRequest,
        echo: bool,
    },
}

impl Cli {
    pub fn parse_action() -> Result<CliAction, String> {
        Self::parse().into_action()
    }

    fn into_action(self) -> Result<CliAction, String> {
        match self.command {
            Commands::Config => Ok(CliAction::InspectConfig),
            Commands::Fetch(args) => {
                if args.shortname.trim().is_empty() {
                    return Err("forum shortname must not be empty".to_string());
                }

                let include = if args.include.is_empty() {
                    None
                } else {
                    Some(IncludeInput::Joined(args.include.join(",")))
                };

                Ok(CliAction::Fetch {
                    echo: args.echo,
                    request: FetchPostsRequest {
                        shortname: args.shortname,
                        endpoint: args.endpoint,
                        options: FetchOptions {
                            since: args.since,
                            cursor: args.cursor,
                            query: args.query,
                            include,
                            order: args.order,
                            limit: args.limit,
                            debug: None,
                            identifier: args.identifier,
                            link: args.link,
                            id: args.id,
                        },
                    },
                })
            }
        }
    }
}
