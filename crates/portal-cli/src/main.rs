use std::io::{self, Write};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use classifier_client::HttpClassifierClient;
use colored::Colorize;
use portal_core::{Config, Message, MinistryId, Sender};
use portal_session::{PortalState, QueryController, Resolution};

#[derive(Parser)]
#[command(name = "portal-cli")]
#[command(about = "Ask the local governance transparency portal")]
#[command(version)]
struct Cli {
    /// Classification endpoint (overrides config and CLASSIFIER_URL)
    #[arg(long)]
    classifier_url: Option<String>,

    /// Ministry the session starts in
    #[arg(long, short)]
    ministry: Option<MinistryId>,

    /// Minimum delay before a reply is shown, in milliseconds
    #[arg(long)]
    latency_floor_ms: Option<u64>,

    /// Enable debug mode
    #[arg(long, short, default_value = "false")]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start interactive chat
    Chat,
    /// Ask a single question
    Ask {
        /// Question text
        query: String,
    },
    /// List supported ministries
    Ministries,
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_millis()
        .init();
}

fn load_config(cli: &Cli) -> Config {
    let mut config = Config::load();
    if let Some(url) = &cli.classifier_url {
        config.classifier_url = url.clone();
    }
    if let Some(ms) = cli.latency_floor_ms {
        config.latency_floor_ms = ms;
    }
    config
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Commands::Ministries = cli.command {
        list_ministries();
        return Ok(());
    }

    let config = load_config(&cli);
    log::debug!("Classifier URL: {}", config.classifier_url);
    log::debug!("Latency floor: {:?}", config.latency_floor());

    let classifier = HttpClassifierClient::new(&config).context("Failed to build classifier client")?;
    let mut controller = QueryController::from_config(Arc::new(classifier), &config);
    let mut portal = PortalState::with_ministry(cli.ministry.unwrap_or_default());

    match cli.command {
        Commands::Chat => run_interactive_chat(&mut controller, &mut portal).await,
        Commands::Ask { query } => ask_once(&mut controller, &mut portal, &query).await,
        Commands::Ministries => Ok(()),
    }
}

fn list_ministries() {
    println!("{}", "Ministries Supported".bold());
    for ministry in MinistryId::ALL {
        println!(
            "  {} {}",
            format!("{:<6}", ministry.id()).cyan().bold(),
            ministry.full_name()
        );
    }
}

fn print_message(message: &Message) {
    let time = message.created_at().format("%H:%M:%S").to_string();
    match message.sender() {
        Sender::User => println!("{} {} {}", time.dimmed(), "You:".cyan().bold(), message.text()),
        Sender::Bot => {
            let text = if message.text().starts_with("Error:") {
                message.text().red()
            } else {
                message.text().green()
            };
            println!("{} {} {}", time.dimmed(), "Portal:".green().bold(), text);
        }
    }
}

/// Toast for a switch caused by this query. Earlier switches stay silent.
fn switch_toast(resolution: &Resolution) -> Option<String> {
    resolution
        .switched_to
        .map(|ministry| format!("🔄 Switched to {}", ministry))
}

fn print_resolution(portal: &PortalState, resolution: &Resolution) {
    if let Some(toast) = switch_toast(resolution) {
        println!("{}", toast.yellow().bold());
    }
    if let Some(reply) = portal
        .messages()
        .iter()
        .find(|message| message.id() == resolution.reply_id)
    {
        print_message(reply);
    }
}

async fn ask(
    controller: &mut QueryController,
    portal: &mut PortalState,
    query: &str,
) -> Option<Resolution> {
    portal.set_input(query);
    let in_flight = match controller.begin_input(portal) {
        Ok(in_flight) => in_flight,
        Err(reason) => {
            log::debug!("Submission ignored: {}", reason);
            return None;
        }
    };

    if let Some(loading) = portal.loading_text() {
        println!("{}", format!("⏳ {}", loading).dimmed());
    }

    log::debug!("Waiting for classification of {:?}", in_flight.query());
    let classified = in_flight.classify().await;
    controller
        .complete(portal, classified)
        .await
        .inspect_err(|err| log::error!("Classified query dropped: {}", err))
        .ok()
}

async fn ask_once(
    controller: &mut QueryController,
    portal: &mut PortalState,
    query: &str,
) -> anyhow::Result<()> {
    let Some(resolution) = ask(controller, portal, query).await else {
        anyhow::bail!("Nothing to ask: the query is empty");
    };

    for message in portal.messages() {
        if message.sender() == Sender::User {
            print_message(message);
        }
    }
    print_resolution(portal, &resolution);
    Ok(())
}

async fn run_interactive_chat(
    controller: &mut QueryController,
    portal: &mut PortalState,
) -> anyhow::Result<()> {
    let session_id = uuid::Uuid::new_v4();
    log::info!("Starting portal session {}", session_id);

    println!(
        "{}",
        "Platform for transparency of Local Governance".cyan().bold()
    );
    println!(
        "{}",
        format!(
            "Access real-time data and documents from {} departments.",
            portal.active_ministry().department()
        )
        .dimmed()
    );
    println!("{}", "Type 'exit' or 'quit' to leave".dimmed());
    println!();

    loop {
        let label = if portal.started() {
            portal.input_placeholder()
        } else {
            "Ask Away!".to_string()
        };
        print!("{} ", label.cyan().bold());
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            println!("{}", "👋 Goodbye!".cyan());
            break;
        }

        if let Some(resolution) = ask(controller, portal, input).await {
            print_resolution(portal, &resolution);
        }
        println!();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::{ClassificationOutcome, MessageId};

    #[test]
    fn parses_ministry_case_insensitively() {
        let cli = Cli::try_parse_from(["portal-cli", "--ministry", "meity", "ask", "upi failed"])
            .unwrap();
        assert_eq!(cli.ministry, Some(MinistryId::Meity));
        assert!(matches!(cli.command, Commands::Ask { ref query } if query == "upi failed"));
    }

    fn resolution(switched_to: Option<MinistryId>) -> Resolution {
        let outcome = ClassificationOutcome::matched(MinistryId::Meity);
        Resolution {
            query_id: MessageId::new(1),
            reply_id: MessageId::new(2),
            outcome,
            switched_to,
            reply: portal_session::bot_reply(&outcome),
        }
    }

    #[test]
    fn toast_only_for_a_switch_this_query_caused() {
        assert_eq!(
            switch_toast(&resolution(Some(MinistryId::Meity))),
            Some("🔄 Switched to MeiTY".to_string())
        );
        assert_eq!(switch_toast(&resolution(None)), None);
    }

    #[test]
    fn rejects_unknown_ministry() {
        let parsed = Cli::try_parse_from(["portal-cli", "--ministry", "mod", "chat"]);
        assert!(parsed.is_err());
    }
}
