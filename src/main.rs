use anyhow::Result;
use finger_control::{
    BionicHand, HandController, Interpreter, Invocation, SerialChannel, SimulatedChannel, SIM_PORT,
};
use structopt::StructOpt;
use tokio::io::BufReader;
use tracing::warn;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(StructOpt, Debug)]
#[structopt(
    name = "finger-control",
    about = "Move a single finger of the bionic hand",
    setting = structopt::clap::AppSettings::AllowNegativeNumbers
)]
pub struct Args {
    #[structopt(
        long,
        env = "FINGER_CONTROL_PORT",
        help = "Serial port of the hand, simulated when omitted"
    )]
    pub port: Option<String>,
    #[structopt(
        long,
        env = "FINGER_CONTROL_BAUD",
        default_value = "9600",
        help = "Baud rate of the hand's serial link"
    )]
    pub baud_rate: u32,
    #[structopt(
        name = "ARGS",
        help = "<finger> <angle> for a single move, nothing for interactive mode"
    )]
    pub positionals: Vec<String>,
}

async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Cannot listen for Ctrl-C: {}", e);
        futures::future::pending::<()>().await;
    }
}

async fn run(args: Args) -> Result<()> {
    let invocation = Invocation::from_positionals(&args.positionals);
    let controller: Box<dyn HandController> = match &args.port {
        Some(port) => Box::new(BionicHand::new(SerialChannel::with_baud_rate(
            port,
            args.baud_rate,
        )?)),
        None => Box::new(BionicHand::new(SimulatedChannel::new(SIM_PORT, args.baud_rate))),
    };
    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = std::io::stdout();
    Interpreter::new(controller, stdout.lock())
        .run(invocation, stdin, interrupted())
        .await
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::from_args();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(run(args));
    // stdin is read on a blocking thread that cannot be cancelled
    runtime.shutdown_background();
    result
}
