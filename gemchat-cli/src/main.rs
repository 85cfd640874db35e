mod commands;
mod config;

use std::io::{self, Write as _};

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::Layer;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use commands::{Command, help_text};
use config::AppConfig;
use gemchat_core::ChatSession;
use gemchat_llm::GeminiClient;
use gemchat_store::{GREETING, Role};
use gemchat_utils::formatting::format_message;

const PROBE_FAILED_WARNING: &str =
    "Warning: API connection test failed. Please check your API key.";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never interleave with the transcript.
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_filter(filter_fn(|metadata| {
            *metadata.level() <= tracing::Level::INFO
        }));

    tracing_subscriber::registry().with(fmt_layer).init();

    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    let client = GeminiClient::from_env()?;
    info!(
        endpoint = client.endpoint(),
        ratelimit_max_requests = config.rate_limit_max_requests,
        ratelimit_window_ms = config.rate_limit_window.as_millis() as u64,
        "gemchat configured."
    );

    let session = ChatSession::new(client, config.rate_limiter());

    if config.probe_on_start {
        if session.client().probe().await {
            info!("API connection test passed.");
        } else {
            warn!("API connection test failed.");
            print_model(PROBE_FAILED_WARNING)?;
        }
    } else {
        info!("Startup probe disabled (set GEMCHAT_PROBE_ON_START=true to enable).");
    }

    run_repl(&session).await
}

async fn run_repl(session: &ChatSession) -> anyhow::Result<()> {
    print_model(&format_message(GREETING))?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("you> ");
        io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match Command::parse(&line) {
            Some(Command::Quit) => break,
            Some(Command::Help) => println!("{}", help_text()),
            Some(Command::Reset) => {
                session.reset().await;
                print_model(&format_message(GREETING))?;
            }
            Some(Command::History) => {
                for message in session.snapshot().await {
                    let label = match message.role() {
                        Role::User => "you",
                        Role::Model => "model",
                    };
                    println!("{}> {}", label, format_message(message.text()));
                }
            }
            Some(Command::Unknown(name)) => {
                println!("Unknown command `/{}`. Try /help.", name);
            }
            None => {
                if line.trim().is_empty() {
                    continue;
                }

                println!("model> ...");
                if let Some(reply) = session.submit(&line).await {
                    print_model(reply.markup())?;
                }
            }
        }
    }

    info!("gemchat exiting.");
    Ok(())
}

fn print_model(markup: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "model> {}", markup)?;
    stdout.flush()
}
