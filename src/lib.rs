pub mod annotation;
pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod infrastructure;
pub mod mode;
pub mod playback;
pub mod segments;
pub mod sync;

#[cfg(test)]
pub mod test_support;
