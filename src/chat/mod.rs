// file: src/chat/mod.rs
// description: conversational layer over the site index
// reference: rust module organization

pub mod intent;
pub mod responder;

pub use intent::Intent;
pub use responder::{Responder, WELCOME_MESSAGE};
