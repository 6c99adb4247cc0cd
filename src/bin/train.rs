use perceptron::feed_forward::{Hyperparams, NeuralNet};
use perceptron::trainer::{Logging, StopCondition, Trainer};
use perceptron::utils::{arg_max, one_hot, rescale};

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{LevelFilter, Log, Metadata, Record};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use std::fs;
use std::path::PathBuf;

/// Trains a network to classify points on a noisy circle by quadrant.
#[derive(Parser, Debug)]
#[command(name = "train")]
struct Args {
    /// JSON hyperparameters file. Defaults to layout 2;5;5;2, rate 0.3, seed 7.
    config: Option<PathBuf>,

    /// Passes over the training set.
    #[arg(long, default_value_t = 200)]
    iterations: usize,
}

type Example = (Vec<f64>, Vec<f64>);

/// Writes log records to stderr.
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        eprintln!("[{}] {}", record.level(), record.args());
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

/// Points on a noisy unit circle, labelled by whether x and y share a sign.
/// Coordinates are rescaled from `[-1.5, 1.5]` onto `[0, 1]`.
fn generate_data<R: Rng>(rng: &mut R, num_samples: usize) -> Vec<Example> {
    let mut data = Vec::with_capacity(num_samples);
    for _ in 0..num_samples {
        let theta = rng.random_range(0.0..2.0 * std::f64::consts::PI);
        let dx = rng.random_range(-0.1..0.1);
        let dy = rng.random_range(-0.1..0.1);
        let (x, y): (f64, f64) = (theta.cos() + dx, theta.sin() + dy);
        let class = if x * y > 0.0 { 0 } else { 1 };
        let point = vec![rescale(x, -1.5, 1.5, 0.0, 1.0), rescale(y, -1.5, 1.5, 0.0, 1.0)];
        data.push((point, one_hot(2, class, 0.99, 0.01)));
    }
    data
}

fn score(set_name: &str, network: &mut NeuralNet, test_data: &[Example]) -> Result<()> {
    let mut num_correct = 0;
    for (input, expected) in test_data {
        let output = network.run(input)?;
        if arg_max(&output) == arg_max(expected) {
            num_correct += 1;
        }
    }
    println!(
        "{} set results: {} of {} correct",
        set_name,
        num_correct,
        test_data.len()
    );
    Ok(())
}

fn load_params(config: Option<&PathBuf>) -> Result<Hyperparams> {
    match config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            Hyperparams::from_json(&json)
                .with_context(|| format!("invalid hyperparameters in {}", path.display()))
        }
        None => Ok(Hyperparams::new("2;5;5;2".parse()?).learning_rate(0.3).seed(7)),
    }
}

fn run(args: &Args) -> Result<()> {
    let params = load_params(args.config.as_ref())?;
    let mut network = NeuralNet::new(&params).context("failed to build network")?;
    if network.input_len() != 2 || network.output_len() != 2 {
        bail!("layout {} must have 2 inputs and 2 outputs", params.layout);
    }

    let mut rng = ChaCha12Rng::seed_from_u64(params.seed.unwrap_or(0));
    let training_data = generate_data(&mut rng, 2_000);
    let test_data = generate_data(&mut rng, 500);

    Trainer::new(&mut network)
        .stop_condition(StopCondition::Iterations(args.iterations))
        .logging(Logging::Iterations(20))
        .train(&training_data)?;

    score("Training", &mut network, &training_data)?;
    score("Test", &mut network, &test_data)?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Info);
    }
    run(&args)
}
