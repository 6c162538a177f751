use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use travelgpt::{
    ChatSession, CompletionClient, CompletionTransport, CredentialSource, DecodingConfig,
    EnvCredentials, GroqTransport, HistoryLimit, MockTransport, ReasoningEffort,
    StaticCredentials, DEFAULT_MAX_TURNS, DEFAULT_MODEL, MODEL_VAR,
};

mod cli;

use cli::{Commands, ReplInput, REPL_HELP};

const BANNER: &str = "TravelGPT: Your Personal Travel Assistant";
const PROMPT_HINT: &str = "Type your travel question...";

#[derive(Parser)]
#[command(name = "travelgpt")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Model identifier (falls back to GROQ_MODEL, then openai/gpt-oss-20b)
    #[arg(long, global = true)]
    model: Option<String>,

    /// Endpoint base URL (falls back to GROQ_BASE_URL, then the Groq API)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Maximum turns sent per request, instruction included
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_TURNS)]
    max_history: usize,

    /// Reasoning effort hint: low, medium or high
    #[arg(long, global = true)]
    reasoning_effort: Option<ReasoningEffort>,

    /// Answer from an in-process echo model instead of the network
    #[arg(long, global = true)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match dotenvy::dotenv() {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => warn!("Ignoring unreadable .env file: {e}"),
    }

    let history_limit = HistoryLimit::new(cli.max_history)?;
    let model = cli
        .model
        .clone()
        .or_else(|| std::env::var(MODEL_VAR).ok())
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    let (transport, credentials): (Arc<dyn CompletionTransport>, Arc<dyn CredentialSource>) =
        if cli.mock {
            info!("Using mock completion transport");
            (
                Arc::new(MockTransport::echo()),
                Arc::new(StaticCredentials::new("mock")),
            )
        } else {
            let groq = match cli.base_url.as_deref() {
                Some(base_url) => GroqTransport::new(base_url),
                None => GroqTransport::from_env(),
            };
            info!("Using completion endpoint at {}", groq.url());
            (Arc::new(groq), Arc::new(EnvCredentials::new()))
        };

    let mut client = CompletionClient::new(transport, credentials)
        .with_model(model)
        .with_history_limit(history_limit);
    if let Some(effort) = cli.reasoning_effort {
        client = client.with_decoding(DecodingConfig::default().with_reasoning_effort(effort));
    }
    let mut session = ChatSession::new(client);

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => run_chat(&mut session).await,
        Commands::Ask { question } => {
            let question = question.join(" ");
            session.send_streaming(&question, print_fragment).await?;
            println!();
            Ok(())
        }
    }
}

async fn run_chat(session: &mut ChatSession) -> Result<()> {
    println!("{BANNER}");
    println!("Model: {}", session.client().model());
    println!("{PROMPT_HINT} (/help for commands)");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("\n> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };

        match ReplInput::parse(&line) {
            ReplInput::Empty => continue,
            ReplInput::Quit => break,
            ReplInput::Help => println!("{REPL_HELP}"),
            ReplInput::Reset => {
                session.reset();
                println!("Started a new conversation.");
            }
            ReplInput::History => {
                let mut shown = 0;
                for turn in session.transcript() {
                    println!("[{}] {}", turn.role().display_name(), turn.content());
                    shown += 1;
                }
                if shown == 0 {
                    println!("No messages yet.");
                }
            }
            ReplInput::Unknown(cmd) => println!("Unknown command {cmd}. Try /help."),
            ReplInput::Message(text) => {
                println!();
                match session.send_streaming(text, print_fragment).await {
                    Ok(_) => println!(),
                    Err(e) => {
                        println!();
                        eprintln!("error: {e}");
                    }
                }
            }
        }
    }

    Ok(())
}

fn print_fragment(fragment: &str) {
    print!("{fragment}");
    if let Err(e) = std::io::stdout().flush() {
        debug!("stdout flush failed: {e}");
    }
}
