pub mod config;
pub mod error;
pub mod logging;

pub mod api;
pub mod batch;
pub mod checksum;
pub mod pacing;
pub mod pipeline;
pub mod plan;
pub mod roster;
pub mod scanner;
pub mod storage;
