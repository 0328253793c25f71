use clap::Parser;
use tracing_subscriber::EnvFilter;

use fixed_nn::{viz::TextVisualizer, Error, NetworkConfig, NeuralNetwork};

/// Runs one forward pass through the fixed network.
#[derive(Parser, Debug)]
#[command(name = "fixed-nn", version, about)]
struct Args {
    /// Input vector as a JSON array, e.g. '[1, 2]'
    input: String,

    /// Reseed the random source with this value before every draw
    #[arg(long)]
    seed: Option<u64>,

    /// Print every layer's output after the run
    #[arg(long)]
    visualize: bool,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    let input: serde_json::Value = serde_json::from_str(&args.input)
        .map_err(|e| Error::InvalidArgument(format!("input is not valid JSON: {e}")))?;

    let mut config = NetworkConfig::new();
    if let Some(seed) = args.seed {
        config = config.with_test_seed(seed);
    }

    let mut net = NeuralNetwork::new(&input, config)?;
    net.build_neural_network()?;
    let output = net.forward()?;

    if args.visualize {
        net.visualize(&mut TextVisualizer::stdout())?;
    }
    println!("{output}");
    Ok(())
}
