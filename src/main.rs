use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use helpdesk::config::{BotConfig, Preset};
use helpdesk::faq::FaqBook;
use helpdesk::kernel::event::{Event, InputEvent, Message, ReportKind, Role};
use helpdesk::kernel::reactor::SideEffect;
use helpdesk::kernel::session::SessionReport;
use helpdesk::{DialogueRouter, Reactor};

#[derive(Debug, Parser)]
#[command(name = "helpdesk", version, about = "Terminal help-desk chat bot")]
struct Cli {
    /// Built-in bot: support, commands or faq.
    #[arg(long, default_value = "support")]
    preset: String,

    /// Bot config TOML file. Overrides --preset.
    #[arg(long)]
    config: Option<PathBuf>,

    /// FAQ file (.toml, .json or .csv) to attach to the bot.
    #[arg(long)]
    faq: Option<PathBuf>,

    /// Write the session transcript as JSON on exit.
    #[arg(long)]
    transcript_out: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays a clean chat.
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("setting default subscriber failed")?;

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    info!(bot = %config.name, intents = config.aliases.len(), "configuration loaded");

    println!("💬 {}", config.name);
    println!("Commands: /reset, /transcript, /stats, /quit");

    let router = DialogueRouter::new(Arc::new(config));
    let reactor = Reactor::new(router);
    for message in reactor.session.transcript() {
        print_message(message);
    }

    let (event_tx, event_rx) = mpsc::channel(100);
    let (effect_tx, mut effect_rx) = mpsc::channel(100);

    let kernel = tokio::spawn(reactor.run(event_rx, effect_tx));
    let printer = tokio::spawn(async move {
        while let Some(effect) = effect_rx.recv().await {
            render(effect);
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        let event = parse_line(&line);
        let quit = matches!(event, Event::Shutdown);
        if event_tx.send(event).await.is_err() {
            break;
        }
        if quit {
            break;
        }
    }
    drop(event_tx);

    let session = kernel.await.context("reactor task failed")?;
    printer.await.context("printer task failed")?;

    if let Some(path) = &cli.transcript_out {
        session
            .transcript()
            .save(path)
            .with_context(|| format!("failed to export transcript to {}", path.display()))?;
        info!(path = %path.display(), messages = session.transcript().len(), "transcript written");
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<BotConfig> {
    let config = match &cli.config {
        Some(path) => BotConfig::from_file(path)
            .with_context(|| format!("failed to load bot config {}", path.display()))?,
        None => {
            let preset: Preset = cli.preset.parse()?;
            BotConfig::preset(preset).with_context(|| format!("built-in preset `{}` is invalid", preset))?
        }
    };

    match &cli.faq {
        Some(path) => {
            let faq = FaqBook::load(path).with_context(|| format!("failed to load FAQ {}", path.display()))?;
            Ok(config.with_faq(faq))
        }
        None => Ok(config),
    }
}

fn parse_line(line: &str) -> Event {
    match line.trim() {
        "/reset" => Event::Reset,
        "/transcript" => Event::Report(ReportKind::Transcript),
        "/stats" => Event::Report(ReportKind::Stats),
        "/quit" | "/exit" => Event::Shutdown,
        _ => Event::Input(InputEvent::text("console", line)),
    }
}

fn render(effect: SideEffect) {
    match effect {
        SideEffect::Say(reply) => println!("bot> {}", reply.text),
        SideEffect::Log(msg) => println!("[{}]", msg),
        SideEffect::Report(ReportKind::Transcript, report) => {
            for message in &report.transcript {
                print_message(message);
            }
        }
        SideEffect::Report(ReportKind::Stats, report) => print_stats(&report),
    }
}

fn print_message(message: &Message) {
    let who = match message.role {
        Role::User => "you",
        Role::Assistant => "bot",
    };
    println!("{}> {}", who, message.text);
}

fn print_stats(report: &SessionReport) {
    let t = &report.telemetry;
    println!("session {} | turns {}", report.id, report.turns);
    println!(
        "intents: exact {} | fuzzy {} | keyword {} | no match {} | match rate {:.0}%",
        t.resolution_stats.exact,
        t.resolution_stats.fuzzy,
        t.resolution_stats.keyword,
        t.resolution_stats.no_match,
        t.resolution_stats.match_rate * 100.0
    );
    println!(
        "slots: opened {} | filled {} | rejected {}",
        t.slot_stats.opened, t.slot_stats.filled, t.slot_stats.rejected
    );
    println!(
        "faq: {} hits / {} lookups | fallbacks {}",
        t.faq_stats.hits, t.faq_stats.lookups, t.fallbacks
    );
    if let Some(slot) = report.dialog.waiting_for() {
        println!("waiting for: {}", slot);
    }
}
