//! `vguard escape <text>`.

use vguard_core::sanitize_html;

pub fn run_escape(text: &str) {
    println!("{}", sanitize_html(text));
}
