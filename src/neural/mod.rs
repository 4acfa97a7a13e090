pub mod activations;

use crate::prelude::*;
use std::fmt;

use crate::matrix::{
    ops::{Dot, Transpose},
    Matrix,
};
use log::{trace, warn};
use rand::{rngs::StdRng, SeedableRng};

use self::activations::{Activation, Activations};

/// A fully-connected network with `I` inputs, one hidden layer of `H`
/// neurons and `O` outputs, all sharing a single activation function.
///
/// Parameters start zeroed; call [`FeedForward::randomize`] before training.
#[derive(Debug, Clone)]
pub struct FeedForward<const I: usize, const H: usize, const O: usize> {
    input_weights: Matrix<H, I>,
    hidden_bias: Matrix<H, 1>,
    hidden_weights: Matrix<O, H>,
    output_bias: Matrix<O, 1>,

    // Recomputed by every forward pass
    inputs: Matrix<I, 1>,
    hidden: Matrix<H, 1>,
    outputs: Matrix<O, 1>,

    activation: Activations,
    learning_rate: f64,
    rng: StdRng,
}

impl<const I: usize, const H: usize, const O: usize> FeedForward<I, H, O> {
    /// Creates a zero-initialized network whose generator is seeded from OS entropy.
    pub fn new(activation: Activations, learning_rate: f64) -> Self {
        Self {
            input_weights: Matrix::new(),
            hidden_bias: Matrix::new(),
            hidden_weights: Matrix::new(),
            output_bias: Matrix::new(),
            inputs: Matrix::new(),
            hidden: Matrix::new(),
            outputs: Matrix::new(),
            activation,
            learning_rate,
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeds the generator used by `randomize`, making initialization reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn activation(&self) -> Activations {
        self.activation
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn set_learning_rate(&mut self, rate: f64) {
        self.learning_rate = rate;
    }

    pub fn input_weights(&self) -> &Matrix<H, I> {
        &self.input_weights
    }

    pub fn hidden_bias(&self) -> &Matrix<H, 1> {
        &self.hidden_bias
    }

    pub fn hidden_weights(&self) -> &Matrix<O, H> {
        &self.hidden_weights
    }

    pub fn output_bias(&self) -> &Matrix<O, 1> {
        &self.output_bias
    }

    /// Reset parameters to uniformly random values in `[min, max]`
    pub fn try_randomize(&mut self, min: f64, max: f64) -> Result<()> {
        self.input_weights.try_randomize(&mut self.rng, min, max)?;
        self.hidden_bias.try_randomize(&mut self.rng, min, max)?;
        self.hidden_weights.try_randomize(&mut self.rng, min, max)?;
        self.output_bias.try_randomize(&mut self.rng, min, max)
    }

    pub fn randomize(&mut self, min: f64, max: f64) {
        if let Err(e) = self.try_randomize(min, max) {
            warn!("FeedForward<{I}, {H}, {O}> randomize: {e}");
        }
    }

    fn forward(&mut self) {
        let act = self.activation;

        let mut hidden = self.input_weights.dot(&self.inputs);
        hidden += &self.hidden_bias;
        hidden.apply(|x| act.call(x));
        self.hidden = hidden;

        let mut outputs = self.hidden_weights.dot(&self.hidden);
        outputs += &self.output_bias;
        outputs.apply(|x| act.call(x));
        self.outputs = outputs;
    }

    /// Propogates `inputs` through both layers and returns the output activations.
    pub fn try_guess(&mut self, inputs: &[f64]) -> Result<Vec<f64>> {
        self.inputs.try_fill(inputs)?;
        self.forward();
        Ok(self.outputs.to_vec())
    }

    /// Like [`FeedForward::try_guess`], but an input of the wrong length is
    /// logged and answered with `O` zeros.
    pub fn guess(&mut self, inputs: &[f64]) -> Vec<f64> {
        self.try_guess(inputs).unwrap_or_else(|e| {
            warn!("FeedForward<{I}, {H}, {O}> guess: {e}");
            vec![0.0; O]
        })
    }

    /// Runs one step of online gradient descent towards `answers`.
    /// Nothing is modified if either slice has the wrong length.
    pub fn try_train(&mut self, inputs: &[f64], answers: &[f64]) -> Result<()> {
        let targets = Matrix::<O, 1>::from_slice(answers)?;
        self.try_guess(inputs)?;

        let act = self.activation;
        let rate = self.learning_rate;

        let output_errors = &targets - &self.outputs;

        let mut output_gradient = self.outputs.clone();
        output_gradient.apply(|a| act.derivative(a));
        output_gradient.hadamard(&output_errors);
        output_gradient *= rate;

        // Must see the hidden weights as they were for this forward pass
        let hidden_errors = self.hidden_weights.transpose().dot(&output_errors);

        self.hidden_weights += &output_gradient.dot(&self.hidden.transpose());
        self.output_bias += &output_gradient;

        let mut hidden_gradient = self.hidden.clone();
        hidden_gradient.apply(|a| act.derivative(a));
        hidden_gradient.hadamard(&hidden_errors);
        hidden_gradient *= rate;

        self.input_weights += &hidden_gradient.dot(&self.inputs.transpose());
        self.hidden_bias += &hidden_gradient;

        trace!(
            "FeedForward<{I}, {H}, {O}> train: output error {:?}",
            output_errors.as_slice()
        );
        Ok(())
    }

    pub fn train(&mut self, inputs: &[f64], answers: &[f64]) {
        if let Err(e) = self.try_train(inputs, answers) {
            warn!("FeedForward<{I}, {H}, {O}> train: {e}");
        }
    }

    fn check_answers(answers: &[f64]) -> Result<()> {
        if answers.len() != O {
            return Err(Error::LengthMismatch {
                expected: O,
                found: answers.len(),
            });
        }
        Ok(())
    }

    /// Largest absolute difference between `answers` and the guess for `inputs`.
    pub fn test(&mut self, inputs: &[f64], answers: &[f64]) -> Result<f64> {
        Self::check_answers(answers)?;
        let outputs = self.try_guess(inputs)?;

        Ok(outputs
            .iter()
            .zip(answers)
            .map(|(out, ans)| (ans - out).abs())
            .fold(0.0, f64::max))
    }

    /// Mean-squared error
    pub fn mean_squared_error(&mut self, inputs: &[f64], answers: &[f64]) -> Result<f64> {
        Self::check_answers(answers)?;
        let outputs = self.try_guess(inputs)?;

        let mut sum = 0.0;
        for (out, ans) in outputs.iter().zip(answers) {
            let diff = out - ans;
            sum += diff * diff;
        }
        Ok(sum / O.max(1) as f64)
    }
}

impl<const I: usize, const H: usize, const O: usize> fmt::Display for FeedForward<I, H, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Input weights ({H}x{I}):")?;
        writeln!(f, "{}", self.input_weights)?;
        writeln!(f, "Hidden bias ({H}x1):")?;
        writeln!(f, "{}", self.hidden_bias)?;
        writeln!(f, "Hidden weights ({O}x{H}):")?;
        writeln!(f, "{}", self.hidden_weights)?;
        writeln!(f, "Output bias ({O}x1):")?;
        write!(f, "{}", self.output_bias)
    }
}
