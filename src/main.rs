use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;
use sysmon::action::{Operation, OutputFormat};
use sysmon::activity::ActivityLog;
use sysmon::app::App;
use sysmon::config::{Config, load_config, load_config_from_path, parse_interval};
use sysmon::event::StdinInput;
use sysmon::logging::init_tracing;
use sysmon::shutdown::{Shutdown, spawn_interrupt_listener};
use sysmon::system::collector::Collector;
use sysmon::system::source::ProcSource;
use sysmon::ui::Terminal;

#[derive(Parser)]
#[command(
    name = "sysmon",
    version,
    about = "Linux resource monitor: CPU, memory and top processes from /proc"
)]
struct Cli {
    /// Monitor continuously, refreshing every SECONDS (1-3600)
    #[arg(short = 'c', long = "continuous", value_name = "SECONDS", value_parser = parse_interval)]
    continuous: Option<u64>,

    /// Run a single operation and exit
    #[arg(long, value_enum, conflicts_with = "continuous")]
    once: Option<Operation>,

    /// Report format; json writes one object per line
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of processes shown in the ranking
    #[arg(long)]
    top: Option<usize>,

    /// Activity log file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if err.use_stderr() => {
            let _ = err.print();
            std::process::exit(1);
        }
        Err(err) => err.exit(),
    };

    let config = load_config_for_cli(&cli);
    init_tracing(&config.general.log_level)?;

    let shutdown = Shutdown::new();
    spawn_interrupt_listener(shutdown.clone());

    let activity = if config.activity.enabled {
        ActivityLog::new(config.activity.path.clone())
    } else {
        ActivityLog::disabled()
    };
    let collector = Collector::new(ProcSource::default(), config.processes.collector_options());
    let mut app = App::new(collector, Terminal::new(), shutdown)
        .with_activity(activity)
        .with_top_n(config.general.top_n)
        .with_format(cli.format);

    if let Some(interval) = cli.continuous {
        app.run_monitor(interval).await;
    } else if let Some(operation) = cli.once {
        app.run_operation(operation).await;
    } else {
        let mut input = StdinInput::new();
        app.run_menu(&mut input).await;
    }

    Ok(())
}

fn load_config_for_cli(cli: &Cli) -> Config {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if let Some(top) = cli.top {
        config.general.top_n = top;
    }
    if let Some(ref path) = cli.log_file {
        config.activity.enabled = true;
        config.activity.path = path.clone();
    }

    config
}
