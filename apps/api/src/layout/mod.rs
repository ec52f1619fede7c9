// Template layout: turns a ResumeStructure into renderer-agnostic blocks.
// One LayoutStrategy per template; both renderers consume the same DocumentLayout.

pub mod ats;
pub mod block;
pub mod cover_letter;
pub mod geometry;
pub mod metrics;
pub mod modern;
pub mod strategy;
pub mod traditional;

pub use geometry::{PageGeometry, PaperSize};
pub use strategy::strategy_for;
