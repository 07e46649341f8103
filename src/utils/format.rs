//! Scalar formatting helpers

use std::sync::LazyLock;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use regex::Regex;

use crate::constants::SIZE_UNITS;
use crate::error::RenderResult;
use crate::utils::html::escape;

static IPV4_ADDRESS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,3}(\.\d{1,3}){3}$").expect("valid IPv4 regex"));

/// Print a yes/no field
pub fn print_yes_no(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}

/// Print a byte count in the largest fitting unit, e.g. `1.5&nbsp;KB`
///
/// Sizes that are an exact multiple of the chosen unit are printed without
/// decimals.
pub fn print_size(size: u64, decimals: usize) -> String {
    const FACTOR: f64 = 1024.0;

    let mut display = size as f64;
    let mut exact = true;
    let mut unit = 0;
    while unit < SIZE_UNITS.len() - 1 && display > FACTOR {
        if display % FACTOR != 0.0 {
            exact = false;
        }
        display /= FACTOR;
        unit += 1;
    }

    let decimals = if exact { 0 } else { decimals };
    format!("{:.*}&nbsp;{}", decimals, display, SIZE_UNITS[unit])
}

/// Format a hostname, shortened to its first label unless `full` is set
///
/// IPv4 addresses are never shortened.
pub fn print_host(hostname: &str, full: bool) -> String {
    let shown = if !full && !IPV4_ADDRESS.is_match(hostname) {
        hostname.split('.').next().unwrap_or(hostname)
    } else {
        hostname
    };
    format!(r#"<span class="hostname">{}</span>"#, escape(shown))
}

/// Number of newline characters in the input
pub fn line_count(input: &str) -> usize {
    input.matches('\n').count()
}

/// Standard base64 encoding
pub fn base64_encode(input: &[u8]) -> String {
    STANDARD.encode(input)
}

/// Standard base64 decoding into (lossy) UTF-8 text
pub fn base64_decode(input: &str) -> RenderResult<String> {
    let bytes = STANDARD.decode(input.trim())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
