//! Utilities for training neural networks.
//!
//! A `Trainer` repeatedly feeds a labelled example set through a network,
//! one example at a time, until a `StopCondition` is met.

use crate::error::{ShapeMismatch, VectorKind};
use crate::feed_forward::NeuralNet;
use crate::utils::squared_error;

use log::info;
use std::time::{Duration, Instant};

/// A builder for training networks.
#[derive(Debug)]
pub struct Trainer<'a> {
    network: &'a mut NeuralNet,
    logging: Logging,
    stop_condition: StopCondition,
}

impl<'a> Trainer<'a> {
    /// Creates a new Trainer instance.
    ///
    /// The trainer is initialized with some default values. These defaults are:
    ///
    /// * Stops after 1000 training iterations.
    /// * Logs on training completion.
    pub fn new(network: &'a mut NeuralNet) -> Self {
        Trainer {
            network,
            logging: Logging::Completion,
            stop_condition: StopCondition::Iterations(1000),
        }
    }

    /// Sets the type of logging to be emitted during training.
    pub fn logging(mut self, logging: Logging) -> Self {
        self.logging = logging;
        self
    }

    /// Sets the condition to finish training.
    pub fn stop_condition<C>(mut self, condition: C) -> Self
    where
        C: Into<StopCondition>,
    {
        self.stop_condition = condition.into();
        self
    }

    /// Trains the network using the provided labelled data.
    ///
    /// The provided `examples` should be a list of labelled data, where each
    /// element takes the form `(network input, expected output)`. One
    /// iteration trains on every example once, in order.
    ///
    /// Returns:
    ///   A summary of the finished run, or an error if any example doesn't
    ///   fit the network. Nothing is trained when an example is rejected.
    pub fn train<I, O>(self, examples: &[(I, O)]) -> Result<Summary, ShapeMismatch>
    where
        I: AsRef<[f64]>,
        O: AsRef<[f64]>,
    {
        self.validate(examples)?;
        if examples.is_empty() {
            return Ok(Summary::default());
        }

        let mut output = vec![0.0; self.network.output_len()];
        let start_time = Instant::now();
        let mut iteration = 0;
        let mut training_error;
        loop {
            training_error = 0.0;
            for (input, expected) in examples {
                let expected = expected.as_ref();
                self.network.train(input.as_ref(), expected)?;
                // Outputs still hold the forward pass that drove this update.
                for (o, y) in output.iter_mut().zip(self.network.outputs()) {
                    *o = y;
                }
                training_error += squared_error(&output, expected);
            }
            training_error /= examples.len() as f64;
            iteration += 1;

            self.logging.iteration(iteration, training_error);
            if self
                .stop_condition
                .should_stop(iteration, training_error, start_time)
            {
                break;
            }
        }
        self.logging
            .completion(iteration, training_error, start_time);
        Ok(Summary {
            iterations: iteration,
            training_error,
            elapsed: start_time.elapsed(),
        })
    }

    /// Verifies that every example fits the network, returning an error if
    /// something is wrong.
    fn validate<I, O>(&self, examples: &[(I, O)]) -> Result<(), ShapeMismatch>
    where
        I: AsRef<[f64]>,
        O: AsRef<[f64]>,
    {
        for (input, output) in examples {
            ShapeMismatch::check(
                VectorKind::Feature,
                self.network.input_len(),
                input.as_ref().len(),
            )?;
            ShapeMismatch::check(
                VectorKind::Target,
                self.network.output_len(),
                output.as_ref().len(),
            )?;
        }
        Ok(())
    }
}

/// The outcome of a training run.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Summary {
    /// Passes made over the example set.
    pub iterations: usize,
    /// Mean squared error per example over the final pass, measured before
    /// each example's update.
    pub training_error: f64,
    pub elapsed: Duration,
}

/// Logging frequency to use during training
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Logging {
    /// No logs will be emitted
    Silent,
    /// A summary will be logged at completion
    Completion,
    /// A summary will be logged after every `n` training iterations
    Iterations(usize),
}

impl Logging {
    /// Performs logging at the current `iteration` of training.
    fn iteration(self, iteration: usize, training_error: f64) {
        if let Logging::Iterations(freq) = self {
            if freq > 0 && iteration % freq == 0 {
                info!("iteration {}: error={}", iteration, training_error);
            }
        }
    }

    /// Performs logging at the end of training.
    fn completion(self, iterations: usize, training_error: f64, start_time: Instant) {
        if let Logging::Silent = self {
            return;
        }
        info!(
            "ran {} iterations in {:.3} seconds, final error {}",
            iterations,
            start_time.elapsed().as_secs_f64(),
            training_error
        );
    }
}

/// When to stop training
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum StopCondition {
    /// Stops after the provided number of training iterations
    Iterations(usize),
    /// Stops when the training error drops below the provided threshold
    ErrorThreshold(f64),
    /// Stops after the provided duration
    Duration(Duration),
}

impl From<Duration> for StopCondition {
    fn from(duration: Duration) -> StopCondition {
        StopCondition::Duration(duration)
    }
}

impl StopCondition {
    /// Returns true if training is complete.
    fn should_stop(self, iteration: usize, training_error: f64, start_time: Instant) -> bool {
        match self {
            StopCondition::Iterations(iterations) => iteration >= iterations,
            StopCondition::ErrorThreshold(threshold) => training_error < threshold,
            StopCondition::Duration(duration) => start_time.elapsed() > duration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hyperparams::Hyperparams;

    fn network(layout: &str) -> NeuralNet {
        let params = Hyperparams::new(layout.parse().unwrap()).seed(17);
        NeuralNet::new(&params).unwrap()
    }

    fn examples() -> Vec<(Vec<f64>, Vec<f64>)> {
        vec![
            (vec![0.0, 1.0], vec![0.99, 0.01]),
            (vec![1.0, 0.0], vec![0.01, 0.99]),
        ]
    }

    #[test]
    fn wrong_input_size() {
        let examples = [([0.0, 0.0, 0.0], [0.0])];
        let mut net = network("2;1");
        let err = Trainer::new(&mut net).train(&examples[..]).unwrap_err();
        assert_eq!(err.vector, VectorKind::Feature);
    }

    #[test]
    fn wrong_output_size() {
        let examples = [([0.0, 0.0], [0.0, 0.0])];
        let mut net = network("2;1");
        let err = Trainer::new(&mut net).train(&examples[..]).unwrap_err();
        assert_eq!(err.vector, VectorKind::Target);
    }

    #[test]
    fn rejected_examples_train_nothing() {
        let mut net = network("2;1");
        let before = net.clone();
        let examples = [(vec![0.0, 1.0], vec![1.0]), (vec![0.0], vec![1.0])];
        assert!(Trainer::new(&mut net).train(&examples).is_err());
        assert_eq!(net.weights(0), before.weights(0));
        assert_eq!(net.layer(1), before.layer(1));
    }

    #[test]
    fn empty_example_set() {
        let examples: [([f64; 2], [f64; 1]); 0] = [];
        let mut net = network("2;1");
        let summary = Trainer::new(&mut net)
            .stop_condition(StopCondition::ErrorThreshold(0.0))
            .train(&examples[..])
            .unwrap();
        assert_eq!(summary.iterations, 0);
        assert_eq!(net.weights(0), network("2;1").weights(0));
    }

    #[test]
    fn stops_after_iterations() {
        let mut net = network("2;3;2");
        let summary = Trainer::new(&mut net)
            .logging(Logging::Silent)
            .stop_condition(StopCondition::Iterations(2000))
            .train(&examples())
            .unwrap();
        assert_eq!(summary.iterations, 2000);
        let out = net.run(&[0.0, 1.0]).unwrap();
        assert!(out[0] > out[1]);
        let out = net.run(&[1.0, 0.0]).unwrap();
        assert!(out[1] > out[0]);
    }

    #[test]
    fn stops_below_error_threshold() {
        let mut net = network("2;3;2");
        let summary = Trainer::new(&mut net)
            .logging(Logging::Iterations(100))
            .stop_condition(StopCondition::ErrorThreshold(0.01))
            .train(&examples())
            .unwrap();
        assert!(summary.training_error < 0.01);
        let total: f64 = examples()
            .iter()
            .map(|(x, t)| squared_error(&net.run(x).unwrap(), t))
            .sum();
        assert!(total / 2.0 < 0.02);
    }

    #[test]
    fn stops_after_duration() {
        let examples: Vec<(Vec<f64>, Vec<f64>)> =
            examples().into_iter().map(|(x, t)| (x, vec![t[0]])).collect();
        let mut net = network("2;1");
        let summary = Trainer::new(&mut net)
            .stop_condition(Duration::from_millis(20))
            .train(&examples)
            .unwrap();
        assert!(summary.elapsed >= Duration::from_millis(20));
        assert!(summary.iterations > 0);
    }

    #[test]
    fn stop_conditions() {
        let now = Instant::now();
        assert!(StopCondition::Iterations(5).should_stop(5, 1.0, now));
        assert!(!StopCondition::Iterations(5).should_stop(4, 1.0, now));
        assert!(StopCondition::ErrorThreshold(0.1).should_stop(1, 0.05, now));
        assert!(!StopCondition::ErrorThreshold(0.1).should_stop(1, 0.2, now));
        assert!(!StopCondition::from(Duration::from_secs(60)).should_stop(1, 1.0, now));
    }
}
