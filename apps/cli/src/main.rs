use std::{path::PathBuf, time::Duration, time::Instant};

use anyhow::Result;
use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tldl_core::{
    ChatView, ClientConfig, HttpSummarizeClient, LandingView, PanelBody, Role, SendOutcome,
    Session, Tab, Turn, chat, format_duration, format_panel, format_turn, landing,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tldl")]
#[command(about = "TL;DL - Don't Pod Around. Instant summaries of YouTube podcasts, and a chat about them")]
struct Cli {
    /// Base URL of the analysis service (overrides TLDL_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Link storage file (overrides TLDL_STORAGE_PATH)
    #[arg(long, global = true)]
    storage: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Summarize a podcast and list its key takeaways
    Summarize {
        /// YouTube podcast link
        url: String,
    },
    /// Ask about the most recently summarized podcast
    Chat {
        /// Ask a single question; without it an interactive session starts
        question: Option<String>,
    },
    /// Check that the analysis service is reachable
    Status,
}

fn create_spinner(msg: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")?,
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    Ok(pb)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            std::process::exit(1);
        }
    };
    if let Some(api_url) = &cli.api_url {
        config = config.with_api_url(api_url)?;
    }
    if let Some(storage) = cli.storage {
        config = config.with_storage_path(storage);
    }

    println!(
        "\n{}  {}\n",
        style("TL;DL").magenta().bold(),
        style("Don't Pod Around").dim()
    );

    let session = Session::from_config(&config);
    match cli.command {
        Command::Summarize { url } => summarize(&session, url).await,
        Command::Chat { question } => chat_session(&session, question).await,
        Command::Status => status(&config).await,
    }
}

async fn summarize(session: &Session, url: String) -> Result<()> {
    let mut view = LandingView::new();
    view.set_link(url.clone());

    let total_start = Instant::now();
    let Some(request) = view.submit(session) else {
        println!("{}", format_panel(Tab::QuickSummary.label(), &view.panel(Tab::QuickSummary)));
        std::process::exit(1);
    };

    let spinner = create_spinner(landing::SUMMARY_LOADING)?;
    let outcome = session.request(request).await;
    let takeaways_request = view.summary_settled(session, &url, outcome);
    spinner.finish_and_clear();

    let summary = view.panel(Tab::QuickSummary);
    if let PanelBody::Error(message) = &summary.body {
        eprintln!("{} {}", style("Error:").red().bold(), message);
        std::process::exit(1);
    }
    println!(
        "{} Summary ready {}",
        style("✓").green().bold(),
        style(format!("[{}]", format_duration(total_start.elapsed()))).dim()
    );
    println!("{}", style("─".repeat(60)).dim());
    println!("{}", format_panel(Tab::QuickSummary.label(), &summary));

    if let Some(request) = takeaways_request {
        let step_start = Instant::now();
        let spinner = create_spinner(landing::TAKEAWAYS_LOADING)?;
        view.takeaways_settled(session.request(request).await);
        spinner.finish_with_message(format!(
            "{} Key takeaways {}",
            style("✓").green().bold(),
            style(format!("[{}]", format_duration(step_start.elapsed()))).dim()
        ));
    }
    println!("{}", style("─".repeat(60)).dim());
    println!("{}", format_panel(Tab::KeyTakeaways.label(), &view.panel(Tab::KeyTakeaways)));

    println!(
        "{} {}",
        style("Ask follow-up questions with").dim(),
        style("tldl chat").cyan().bold()
    );
    Ok(())
}

async fn chat_session(session: &Session, question: Option<String>) -> Result<()> {
    let mut view = ChatView::new();

    if let Some(question) = question {
        return ask(session, &mut view, question).await;
    }

    println!("{}", style(landing::CHAT_DESCRIPTION).dim());
    println!("{}\n", style("Type /back or press Ctrl-D to leave.").dim());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim() == "/back" {
            break;
        }
        ask(session, &mut view, line).await?;
    }
    Ok(())
}

async fn ask(session: &Session, view: &mut ChatView, text: String) -> Result<()> {
    match view.send_message(session, text) {
        SendOutcome::Ignored => {}
        SendOutcome::MissingLink => print_last(view),
        SendOutcome::Dispatched(request) => {
            let spinner = create_spinner(chat::THINKING)?;
            view.reply_settled(session.request(request).await);
            spinner.finish_and_clear();
            print_last(view);
        }
    }
    Ok(())
}

fn print_last(view: &ChatView) {
    if let Some(turn) = view.transcript().last() {
        print_turn(turn);
    }
}

fn print_turn(turn: &Turn) {
    let line = format_turn(turn);
    match turn.role {
        Role::User => println!("{}\n", style(line).magenta()),
        Role::Assistant => println!("{}\n", line),
    }
}

async fn status(config: &ClientConfig) -> Result<()> {
    let client = HttpSummarizeClient::new(config.api_url.clone());
    let spinner = create_spinner(&format!("Contacting {}...", client.base_url()))?;
    match client.welcome().await {
        Ok(message) => {
            spinner.finish_with_message(format!(
                "{} {} {}",
                style("✓").green().bold(),
                client.base_url(),
                style(message).dim()
            ));
            Ok(())
        }
        Err(e) => {
            spinner.finish_and_clear();
            eprintln!("{} {}", style("Error:").red().bold(), e);
            std::process::exit(1);
        }
    }
}
