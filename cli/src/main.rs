//! `quill` command-line client.
//!
//! SYSTEM CONTEXT
//! ==============
//! Drives the same core client as the browser frontend, with a `reqwest`
//! transport, a JSON session file and redirects rendered as stderr hints.
//! Results go to stdout as JSON; diagnostics and hints go to stderr.

mod navigator;
mod store;
mod transport;

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use quill::{ApiClient, ApiError, ClientConfig, PostInput, Registration};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use navigator::TerminalNavigator;
use store::FileStore;
use transport::ReqwestTransport;

type CliClient = ApiClient<ReqwestTransport, FileStore, TerminalNavigator>;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("http client setup failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("failed to render output: {0}")]
    Output(#[from] serde_json::Error),
    #[error("not signed in; run `quill login`")]
    NotSignedIn,
}

impl CliError {
    /// Line shown to the user: the backend's own message for API failures.
    fn message(&self) -> String {
        match self {
            Self::Api(err) => err.message(),
            other => other.to_string(),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "quill", about = "Quill blog command-line client")]
struct Cli {
    #[arg(long, env = "QUILL_API_URL", default_value = quill::config::DEFAULT_API_URL)]
    base_url: String,

    #[arg(
        long,
        env = "QUILL_TIMEOUT_MS",
        default_value_t = quill::config::DEFAULT_TIMEOUT_MS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout_ms: u64,

    /// Where the session is kept between runs [default: ~/.quill/session.json]
    #[arg(long, env = "QUILL_SESSION_FILE")]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and save the session.
    Login {
        username: String,
        #[arg(long, env = "QUILL_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account and save the session.
    Register(RegisterArgs),
    /// Revoke and forget the saved session.
    Logout,
    /// Show the signed-in user's profile.
    Whoami,
    Post(PostCommand),
}

#[derive(Args, Debug)]
struct RegisterArgs {
    username: String,
    #[arg(long)]
    email: String,
    #[arg(long, env = "QUILL_PASSWORD", hide_env_values = true)]
    password: String,
    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
}

#[derive(Args, Debug)]
struct PostCommand {
    #[command(subcommand)]
    command: PostSubcommand,
}

#[derive(Subcommand, Debug)]
enum PostSubcommand {
    List,
    Get {
        id: String,
    },
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
    },
    Update {
        id: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
    },
    Delete {
        id: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message());
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn config_from(cli: &Cli) -> ClientConfig {
    ClientConfig::default()
        .with_base_url(&cli.base_url)
        .with_timeout(Duration::from_millis(cli.timeout_ms))
}

fn default_session_file() -> PathBuf {
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(".quill").join("session.json"),
        None => PathBuf::from(".quill-session.json"),
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = config_from(&cli);
    let session_file = cli.session_file.unwrap_or_else(default_session_file);
    let store = FileStore::open(session_file);
    tracing::debug!(base_url = %config.base_url, session = %store.path().display(), "starting");

    let client: CliClient = ApiClient::new(ReqwestTransport::new(config)?, store, TerminalNavigator);

    match cli.command {
        Command::Login { username, password } => {
            let auth = client.login(&username, &password).await?;
            eprintln!("signed in as {username}");
            print_json(&auth.user)
        }
        Command::Register(args) => {
            let registration = Registration {
                username: args.username,
                email: args.email,
                password: args.password,
                first_name: args.first_name,
                last_name: args.last_name,
            };
            let auth = client.register(&registration).await?;
            eprintln!("Registration successful! Welcome to our blog.");
            print_json(&auth.user)
        }
        Command::Logout => {
            client.logout().await?;
            eprintln!("signed out");
            Ok(())
        }
        Command::Whoami => {
            if !client.session().is_authenticated() {
                return Err(CliError::NotSignedIn);
            }
            print_json(&client.profile().await?)
        }
        Command::Post(post) => run_post(&client, post).await,
    }
}

async fn run_post(client: &CliClient, post: PostCommand) -> Result<(), CliError> {
    match post.command {
        PostSubcommand::List => print_json(&client.list_posts().await?),
        PostSubcommand::Get { id } => print_json(&client.get_post(&id).await?),
        PostSubcommand::Create { title, content } => {
            print_json(&client.create_post(&PostInput::new(title, content)).await?)
        }
        PostSubcommand::Update { id, title, content } => {
            print_json(&client.update_post(&id, &PostInput::new(title, content)).await?)
        }
        PostSubcommand::Delete { id } => {
            client.delete_post(&id).await?;
            eprintln!("Post deleted successfully");
            Ok(())
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
