//! CLI command handlers, one file per validator family.

mod client_ip;
mod exec;
mod path;
mod redirect;
mod text;
mod url;

pub use client_ip::{run_client_ip, ClientIpArgs};
pub use exec::run_exec;
pub use path::{run_check_path, run_contain, run_sanitize};
pub use redirect::run_check_redirect;
pub use text::run_escape;
pub use url::{run_build_url, run_check_url};
