//! Prompt templates for the judge and the sample questions offered to users.

pub mod template;

pub use template::{EXAMPLE_QUESTIONS, JudgePrompt};
