//! Main module for pll library functionality

pub mod ast;
pub mod config;
pub mod formats;
pub mod parsing;
pub mod turtle;
