//! Individual preprocessing steps, in pipeline order:
//! grayscale, threshold, lines, invert

pub mod grayscale;
pub mod invert;
pub mod lines;
pub mod threshold;
