use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use scrum_vote::client::{self, ClientConfig};
use scrum_vote::protocol::{DEFAULT_HOST, DEFAULT_PORT};
use scrum_vote::{logging, server};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Host the vote session
    Serve {
        /// Address to bind
        #[arg(long, env = "SCRUM_VOTE_HOST", default_value = DEFAULT_HOST)]
        host: String,

        /// Port to listen on
        #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
        port: u16,
    },

    /// Join a vote session from the terminal
    Join {
        /// Server base URL
        #[arg(short, long, env = "SCRUM_VOTE_SERVER", default_value = "http://127.0.0.1:8000")]
        server: String,

        /// First name to pre-fill
        #[arg(short, long)]
        name: Option<String>,

        /// Request timeout in seconds
        #[arg(long, default_value_t = 10)]
        timeout_secs: u64,

        /// Write client logs to this file
        #[arg(long)]
        log_file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let result = match args.command {
        Command::Serve { host, port } => {
            logging::init_server();
            server::run(&host, port).await
        }
        Command::Join {
            server,
            name,
            timeout_secs,
            log_file,
        } => join(server, name, timeout_secs, log_file).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn join(
    server: String,
    name: Option<String>,
    timeout_secs: u64,
    log_file: Option<PathBuf>,
) -> scrum_vote::Result<()> {
    logging::init_client(log_file.as_deref())?;
    client::run(ClientConfig {
        server,
        name,
        timeout: Duration::from_secs(timeout_secs),
    })
    .await
}
