//! Optimizers for training the generator and the critic

mod adam;
mod optimizer;

pub use adam::Adam;
pub use optimizer::Optimizer;
