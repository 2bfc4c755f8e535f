//! Security validation layer for a self-hosted video library.
//!
//! Route handlers pass untrusted strings through these validators before
//! touching the filesystem or issuing an outbound request. Every validator is
//! a pure function over its inputs; roots, allowlists and the redirect origin
//! come from [`config::GuardConfig`] and are passed in explicitly.

pub mod config;
pub mod error;
pub mod logging;

pub mod allowlist;
pub mod client_ip;
pub mod exec;
pub mod html;
pub mod ip_class;
pub mod path_guard;
pub mod redirect;
pub mod url_guard;

pub use allowlist::{build_allowlisted_http_url, is_hostname_allowed, validate_url_with_allowlist};
pub use client_ip::{get_client_ip, RequestIpContext};
pub use error::{ErrorKind, GuardError};
pub use exec::{exec_file_safe, ExecError, ExecOutput};
pub use html::sanitize_html;
pub use path_guard::{
    is_path_within_directories, is_path_within_directory, resolve_safe_path,
    resolve_safe_path_in_directories, sanitize_path_segment, PathRoots, RootKind,
};
pub use redirect::validate_redirect_url;
pub use url_guard::{check_resolved_addrs, validate_url};
