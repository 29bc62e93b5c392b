use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How attribute values are quoted when writing bbcode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteType {
    /// Always quote the attribute value.
    Always,

    /// Never quote the attribute value.
    Never,

    /// Only quote the attribute value when it contains whitespace or `=`.
    #[default]
    Auto,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid quote type {0:?}, expected one of always, never or auto")]
pub struct ParseQuoteTypeError(pub String);

impl QuoteType {
    /// Apply the quoting policy on `value`.
    ///
    /// Quoted values have `\` and `"` escaped with a backslash.
    pub fn quote(&self, value: &str) -> String {
        let needs_quotes = value.chars().any(|x| x.is_whitespace() || x == '=');
        match self {
            QuoteType::Never => value.to_owned(),
            QuoteType::Auto if !needs_quotes => value.to_owned(),
            QuoteType::Always | QuoteType::Auto => {
                format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
            }
        }
    }
}

impl FromStr for QuoteType {
    type Err = ParseQuoteTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "always" => Ok(QuoteType::Always),
            "never" => Ok(QuoteType::Never),
            "auto" => Ok(QuoteType::Auto),
            _ => Err(ParseQuoteTypeError(s.to_owned())),
        }
    }
}

impl fmt::Display for QuoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            QuoteType::Always => "always",
            QuoteType::Never => "never",
            QuoteType::Auto => "auto",
        })
    }
}
