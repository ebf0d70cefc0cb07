// src/lib.rs — Library root for taskdeck

pub mod board;
pub mod cli;
pub mod client;
pub mod guard;
pub mod infra;
pub mod session;
pub mod web;
