pub mod classification;
pub mod pivot;
pub mod service;
