//! CLI module for the User Registry API

pub mod serve;

use clap::{Parser, Subcommand};

/// User Registry API - CRUD service for user records
#[derive(Parser)]
#[command(name = "user-registry")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the API server
    Serve,
}
