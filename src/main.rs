use clap::{Parser, Subcommand};
use std::error::Error;

use spate::config::TransferConfig;

#[derive(Parser)]
#[command(name = "spate")]
#[command(about = "Authenticated bulk-transfer throughput benchmark", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Stream authenticated blocks to a receiver
    Send {
        /// Receiver host to connect to
        #[arg(short, long, default_value = spate::DEFAULT_ADDR)]
        addr: String,
        /// Receiver port
        #[arg(short, long, default_value_t = spate::DEFAULT_PORT)]
        port: u16,
        /// Shared secret key (must match the receiver)
        #[arg(short, long, default_value = spate::DEFAULT_KEY)]
        key: String,
        /// Payload block size in bytes
        #[arg(short, long, default_value_t = spate::DEFAULT_BLOCK_SIZE)]
        block_size: usize,
        /// Number of blocks to stream
        #[arg(short, long, default_value_t = spate::DEFAULT_MESSAGE_COUNT)]
        count: u32,
    },
    /// Receive and verify authenticated blocks
    Receive {
        /// Port to listen on
        #[arg(short, long, default_value_t = spate::DEFAULT_PORT)]
        port: u16,
        /// Shared secret key (must match the sender)
        #[arg(short, long, default_value = spate::DEFAULT_KEY)]
        key: String,
        /// Payload block size in bytes
        #[arg(short, long, default_value_t = spate::DEFAULT_BLOCK_SIZE)]
        block_size: usize,
        /// Number of blocks to expect
        #[arg(short, long, default_value_t = spate::DEFAULT_MESSAGE_COUNT)]
        count: u32,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    // Configure logging based on verbose flag
    if cli.verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
        log::info!("Verbose logging enabled");
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    match cli.command {
        Commands::Send {
            addr,
            port,
            key,
            block_size,
            count,
        } => {
            let config = TransferConfig::new(key, block_size, count);
            spate::commands::send::run(&format!("{}:{}", addr, port), config).await?;
        }
        Commands::Receive {
            port,
            key,
            block_size,
            count,
        } => {
            let config = TransferConfig::new(key, block_size, count);
            spate::commands::receive::run(port, config).await?;
        }
    }

    Ok(())
}
