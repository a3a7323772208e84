//! Interactive chat module
//!
//! Provides a readline-based interactive duel interface.

mod command;
mod repl;

pub use command::ReplCommand;
pub use repl::DuelRepl;
