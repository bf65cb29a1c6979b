use clap::Parser;
use miette::{IntoDiagnostic, Result};
use moneris_dx8000::application::session::TerminalSession;
use moneris_dx8000::domain::config::{ConnectionType, DeviceConfig};
use moneris_dx8000::domain::ports::NativeExecutorBox;
use moneris_dx8000::infrastructure::simulated::SimulatedTerminal;
use moneris_dx8000::interfaces::csv::command_reader::CommandReader;
use moneris_dx8000::interfaces::result_writer::ResultWriter;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// CSV file of terminal commands (type, amount, transaction_id, order_id, currency)
    input: PathBuf,

    /// JSON device config file with device_ip, port and connection_type
    #[arg(long)]
    config: Option<PathBuf>,

    /// Terminal IP address. Overrides the config file.
    #[arg(long)]
    device_ip: Option<String>,

    /// Terminal port. Overrides the config file.
    #[arg(long)]
    port: Option<u16>,

    /// network, bluetooth or usb. Overrides the config file.
    #[arg(long)]
    connection_type: Option<ConnectionType>,

    /// Simulated time the customer spends on the device per payment.
    #[arg(long, default_value_t = 0)]
    latency_ms: u64,
}

impl Cli {
    fn device_config(&self) -> Result<DeviceConfig> {
        let mut config = match &self.config {
            Some(path) => DeviceConfig::from_json_file(path).into_diagnostic()?,
            None => DeviceConfig::default(),
        };
        if let Some(device_ip) = &self.device_ip {
            config.device_ip = device_ip.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(connection_type) = self.connection_type {
            config.connection_type = connection_type;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.device_config()?;

    let terminal = SimulatedTerminal::new().with_latency(Duration::from_millis(cli.latency_ms));
    let executor: NativeExecutorBox = Box::new(terminal);
    let mut session = TerminalSession::new(executor);

    // Same order the checkout page uses: initialize, connect, read status.
    session.initialize(&config).await.into_diagnostic()?;
    session.connect().await.into_diagnostic()?;
    let status = session.get_device_status().await.into_diagnostic()?;
    tracing::info!(
        device = %status.device_name,
        connected = status.connected,
        "Payment device ready"
    );

    let file = File::open(&cli.input).into_diagnostic()?;
    let reader = CommandReader::new(file);
    let stdout = io::stdout();
    let mut writer = ResultWriter::new(stdout.lock());

    for (index, command) in reader.commands().enumerate() {
        let row = index + 1;
        let outcome = match command {
            Ok(command) => session.run_command(&command).await,
            Err(e) => Err(e),
        };
        if let Err(e) = &outcome {
            tracing::warn!(row, error = %e, "Command failed");
        }
        writer.write_outcome(row, &outcome).into_diagnostic()?;
    }
    writer.flush().into_diagnostic()?;

    session.disconnect().await.into_diagnostic()?;
    Ok(())
}
