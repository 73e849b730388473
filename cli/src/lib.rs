pub mod app;
pub mod cli;
mod commands;
pub mod config;
pub mod error;
mod logger;
mod runner;
pub mod stack;
mod writer;
