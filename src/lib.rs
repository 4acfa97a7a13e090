//! A dense matrix type with compile-time extents and a three-layer
//! feedforward network built on top of it.
//!
//! ```
//! use rust_ffnn::{Activations, FeedForward};
//!
//! let mut net = FeedForward::<2, 4, 1>::new(Activations::Sigmoid, 0.5).with_seed(7);
//! net.randomize(-1.0, 1.0);
//! net.train(&[1.0, 0.0], &[1.0]);
//! assert_eq!(net.guess(&[1.0, 0.0]).len(), 1);
//! ```

pub mod matrix;
pub mod neural;
pub mod prelude;

pub use matrix::{Dot, Matrix, Transpose};
pub use neural::{
    activations::{Activation, Activations},
    FeedForward,
};
pub use prelude::{Error, Result};
