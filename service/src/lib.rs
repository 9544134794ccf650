#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::print_stdout,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]

pub mod address;
pub mod civic;
pub mod config;
pub mod email;
pub mod http;
pub mod representatives;
pub mod rest;
