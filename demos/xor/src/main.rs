use clap::{Parser, ValueEnum};
use log::{info, warn};
use rust_ffnn::{Activations, FeedForward};

const XOR_INPUTS: [[f64; 2]; 4] = [[1.0, 0.0], [0.0, 1.0], [1.0, 1.0], [0.0, 0.0]];
const XOR_LABELS: [[f64; 1]; 4] = [[1.0], [1.0], [0.0], [0.0]];

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Activation {
    Sigmoid,
    Relu,
}

impl From<Activation> for Activations {
    fn from(value: Activation) -> Self {
        match value {
            Activation::Sigmoid => Activations::Sigmoid,
            Activation::Relu => Activations::ReLU,
        }
    }
}

/// Trains a 2-4-1 network on the XOR truth table until every row is
/// within the target error.
#[derive(Parser, Debug)]
#[command(name = "xor", version, about)]
struct Args {
    #[arg(long, value_enum, default_value_t = Activation::Sigmoid)]
    activation: Activation,

    #[arg(long, default_value_t = 0.5)]
    learning_rate: f64,

    /// Seed for weight initialization; OS entropy when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Stop once the largest per-row error drops below this
    #[arg(long, default_value_t = 0.05)]
    target_error: f64,

    #[arg(long, default_value_t = 1_000)]
    max_batches: usize,

    /// Passes over the truth table between two evaluations
    #[arg(long, default_value_t = 1_000)]
    passes_per_batch: usize,
}

fn largest_error(net: &mut FeedForward<2, 4, 1>) -> f64 {
    let mut largest = 0.0;
    for (inputs, labels) in XOR_INPUTS.iter().zip(&XOR_LABELS) {
        let error = net.test(inputs, labels).unwrap_or(f64::INFINITY);
        if error > largest {
            largest = error;
        }
    }
    largest
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut net = FeedForward::<2, 4, 1>::new(args.activation.into(), args.learning_rate);
    if let Some(seed) = args.seed {
        net = net.with_seed(seed);
    }
    net.randomize(-1.0, 1.0);

    let mut batch = 0;
    let mut largest = largest_error(&mut net);
    while largest > args.target_error && batch < args.max_batches {
        for _ in 0..args.passes_per_batch {
            for (inputs, labels) in XOR_INPUTS.iter().zip(&XOR_LABELS) {
                net.train(inputs, labels);
            }
        }

        batch += 1;
        largest = largest_error(&mut net);
        info!("Batch {batch} largest error: {largest:.4}");
    }

    for inputs in &XOR_INPUTS {
        println!("{inputs:?} -> {:.4}", net.guess(inputs)[0]);
    }

    if largest <= args.target_error {
        println!("Trained after {batch} batches");
    } else {
        warn!("Gave up after {batch} batches, largest error {largest:.4}");
        println!("{net}");
    }
}
