// Section Classifier + Entry Normalizer.
// Pure functions only: no I/O, no shared state.

pub mod bullets;
pub mod classifier;
pub mod normalize;
pub mod tokenizer;

pub use classifier::classify;
pub use tokenizer::Token;
