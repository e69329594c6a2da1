
use crate::bus::EventBus;
use crate::channels::{BaseChannel, ChannelManager, TelegramChannel, telegram::CHANNEL_NAME};
use crate::config::{Config, credentials, load_config, loader::read_config};
use crate::dispatch::{BusReplySink, Dispatcher, default_registry};
use crate::heartbeat::KeepAliveService;
use crate::resonance::ResonanceState;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Parser)]
#[command(name = "navigator")]
#[command(about = "Arianna Method Navigator bot", version)]
pub struct Cli {
    /// Path to config.json (default: ~/.navigator/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the bot, keep-alive pinger and liveness endpoint (default)
    Run,
    /// Show the effective configuration and registered commands
    Status,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            serve(cli.config.as_deref()).await?;
        }
        Commands::Status => {
            let config = read_config(cli.config.as_deref(), |key| std::env::var(key).ok())?;
            print!("{}", status_report(&config)?);
        }
    }

    Ok(())
}

async fn serve(config_path: Option<&Path>) -> Result<()> {
    info!("Loading configuration...");
    // A missing token aborts here, before any component starts.
    let config = load_config(config_path)?;
    info!(
        "Configuration loaded. loop_threshold={}, core_verb={}",
        config.resonance.loop_threshold, config.resonance.core_verb
    );

    let registry = default_registry()?;
    let dispatcher = Arc::new(Dispatcher::new(
        registry,
        ResonanceState::from_config(&config.resonance),
    ));

    let mut bus = EventBus::default();
    let inbound_rx = bus
        .take_inbound_rx()
        .context("Inbound receiver already taken")?;
    let outbound_rx = bus
        .take_outbound_rx()
        .context("Outbound receiver already taken")?;

    let http_task = if config.gateway.enabled {
        Some(crate::gateway::start(&config.gateway.host, config.gateway.port).await?)
    } else {
        info!("Liveness endpoint disabled");
        None
    };

    let keepalive = KeepAliveService::new(
        config.keepalive.interval_secs,
        config.keepalive.enabled,
    );
    keepalive.start().await;

    let mut channels = setup_channels(&config, &bus);
    channels.start_all().await?;

    let sink = BusReplySink::new(CHANNEL_NAME, bus.outbound_tx.clone());
    let mut dispatch_task = start_dispatch_loop(dispatcher.clone(), inbound_rx, sink);
    let mut channels_task = tokio::spawn(channels.run(outbound_rx));

    println!("Arianna Method Navigator bot started. Resonance is unbroken.");
    info!("All services started, navigator is running");

    let (dispatch_running, channels_running) = tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            println!("\nShutting down...");
            (true, true)
        }
        _ = &mut dispatch_task => {
            error!("dispatch loop ended unexpectedly");
            (false, true)
        }
        _ = &mut channels_task => {
            error!("channel loop ended unexpectedly");
            (true, false)
        }
    };

    keepalive.stop().await;
    if let Some(task) = http_task {
        task.abort();
    }
    drain_and_stop_channels(
        bus,
        dispatch_running.then_some(dispatch_task),
        channels_running.then_some(channels_task),
    )
    .await;
    info!(
        "Stopped after {} interactions",
        dispatcher.interaction_count().await
    );

    Ok(())
}

/// Close every outbound sender so the channel loop delivers what is queued,
/// stops its channels and exits.
async fn drain_and_stop_channels(
    bus: EventBus,
    dispatch_task: Option<JoinHandle<()>>,
    channels_task: Option<JoinHandle<()>>,
) {
    // The dispatch loop holds a sender clone inside its reply sink.
    if let Some(task) = dispatch_task {
        task.abort();
        let _ = task.await;
    }
    drop(bus);

    let Some(task) = channels_task else {
        return;
    };
    match tokio::time::timeout(SHUTDOWN_TIMEOUT, task).await {
        Ok(Ok(())) => info!("Channels stopped"),
        Ok(Err(e)) => error!("Channel loop failed during shutdown: {}", e),
        Err(_) => warn!(
            "Channel loop did not stop within {}s",
            SHUTDOWN_TIMEOUT.as_secs()
        ),
    }
}

fn setup_channels(config: &Config, bus: &EventBus) -> ChannelManager {
    info!("Initializing channels...");
    let telegram: Box<dyn BaseChannel> =
        Box::new(TelegramChannel::new(&config.telegram, bus.inbound_tx.clone()));
    let channels = ChannelManager::new(vec![telegram]);
    info!(
        "Channels initialized. Enabled: {:?}",
        channels.enabled_channels()
    );
    channels
}

fn start_dispatch_loop(
    dispatcher: Arc<Dispatcher>,
    inbound_rx: tokio::sync::mpsc::Receiver<crate::bus::InboundEvent>,
    sink: BusReplySink,
) -> JoinHandle<()> {
    info!("Starting dispatch loop...");
    tokio::spawn(async move {
        dispatcher.run(inbound_rx, sink).await;
    })
}

/// Human-readable summary used by `navigator status`.
fn status_report(config: &Config) -> Result<String> {
    let registry = default_registry()?;
    let mut out = String::new();

    writeln!(out, "navigator {}", crate::VERSION)?;
    writeln!(out)?;
    writeln!(out, "Telegram: {:?}", config.telegram)?;
    let creds = credentials::configured_credentials(config);
    writeln!(
        out,
        "Credentials: {}",
        if creds.is_empty() {
            "none".to_string()
        } else {
            creds.join(", ")
        }
    )?;
    if config.gateway.enabled {
        writeln!(
            out,
            "Liveness endpoint: http://{}:{}/",
            config.gateway.host, config.gateway.port
        )?;
    } else {
        writeln!(out, "Liveness endpoint: disabled")?;
    }
    writeln!(
        out,
        "Keep-alive: {}",
        if config.keepalive.enabled {
            format!("every {}s", config.keepalive.interval_secs)
        } else {
            "disabled".to_string()
        }
    )?;
    writeln!(
        out,
        "Resonance: threshold={}, core verb={}, next seed={}",
        config.resonance.loop_threshold, config.resonance.core_verb, config.resonance.next_seed
    )?;
    match config.validate() {
        Ok(()) => writeln!(out, "Config: valid")?,
        Err(e) => writeln!(out, "Config: INVALID ({})", e)?,
    }
    writeln!(out)?;
    writeln!(out, "Registered triggers:")?;
    for trigger in registry.triggers() {
        writeln!(out, "  {}", trigger)?;
    }

    Ok(out)
}
