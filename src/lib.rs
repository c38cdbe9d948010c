pub mod account;
pub mod config;
pub mod depositdata;
pub mod error;
pub mod helpers;
pub mod logger;
pub mod network;
pub mod output;
