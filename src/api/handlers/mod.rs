//! Request handlers for the LRS resources.

mod about;
mod activities;
mod statements;

pub use about::get_about;
pub use activities::get_activity;
pub use statements::{get_statements, put_statement};
