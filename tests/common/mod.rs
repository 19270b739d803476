#![allow(dead_code)]

pub mod fake;
pub mod server;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

pub fn encode(content: &str) -> String {
    STANDARD.encode(content)
}
