//! Variable labels and the label/position index shared by qmodel models.

pub mod error;
pub mod index;
pub mod label;

pub use error::LabelError;
pub use index::LabelIndex;
pub use label::{Label, LabelKind};
