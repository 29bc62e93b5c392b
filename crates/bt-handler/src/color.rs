//! Color values.
//!
//! Html side colors come in whatever format css supports, bbcode side prefers the hex format.
//! Only `rgb(r, g, b)` and the short hex format are normalised, every other format is kept
//! because validating it means extra constraints.

use regex::Regex;
use std::sync::OnceLock;

static RGB_REGEX: OnceLock<Regex> = OnceLock::new();
static SHORT_HEX_REGEX: OnceLock<Regex> = OnceLock::new();

/// Fallback when no color is given.
pub const DEFAULT_COLOR: &str = "#000";

fn to_hex(component: &str) -> String {
    let value = component.parse::<u32>().unwrap_or(0).min(255);
    format!("{value:02x}")
}

/// Normalise css color `input` into the hex format.
///
/// ```
/// use bt_handler::color::normalise_color;
///
/// assert_eq!(normalise_color("rgb(255, 0, 16)"), "#ff0010");
/// assert_eq!(normalise_color("#F0a"), "#FF00aa");
/// assert_eq!(normalise_color("red"), "red");
/// ```
pub fn normalise_color(input: &str) -> String {
    let input = if input.is_empty() { DEFAULT_COLOR } else { input };

    let rgb = RGB_REGEX.get_or_init(|| {
        Regex::new(r"(?i)rgb\((\d{1,3}),\s*?(\d{1,3}),\s*?(\d{1,3})\)").unwrap()
    });
    if let Some(caps) = rgb.captures(input) {
        return format!("#{}{}{}", to_hex(&caps[1]), to_hex(&caps[2]), to_hex(&caps[3]));
    }

    let short = SHORT_HEX_REGEX
        .get_or_init(|| Regex::new(r"(?i)#([0-9a-f])([0-9a-f])([0-9a-f])\s*?$").unwrap());
    if let Some(caps) = short.captures(input) {
        let (r, g, b) = (&caps[1], &caps[2], &caps[3]);
        return format!("#{r}{r}{g}{g}{b}{b}");
    }

    input.to_owned()
}
