//! File-level resampling for the `srconvert` and `srinfo` tools

pub mod audio;
pub mod config;
pub mod convert;
pub mod output;
