//! Backward operation trait

/// A recorded operation that propagates its output gradient to its inputs
///
/// Implementations read the gradient from the result's cell, accumulate
/// into the inputs that require gradients, then recurse into the inputs'
/// own backward ops.
pub trait BackwardOp {
    /// Propagate gradients to the inputs
    fn backward(&self);
}
