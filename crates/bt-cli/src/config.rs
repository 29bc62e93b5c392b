use anyhow::Context;
use bt_handler::{HandlerDefinition, HandlerError};
use bt_parser::{Parser, ParserOptions};
use serde::Deserialize;
use std::collections::BTreeMap;
use tokio::fs;

#[derive(Debug, thiserror::Error)]
pub(crate) enum ConfigError {
    #[error("invalid handler definition: {0}")]
    Handler(#[from] HandlerError),

    #[error("can not unset handler {0:?}, no such handler")]
    UnknownHandler(String),
}

/// Content of the config file.
///
/// ```toml
/// [options]
/// quote_type = "always"
///
/// [handlers.spoiler]
/// html = "<details>{0}</details>"
/// bbcode = "[spoiler]{0}[/spoiler]"
/// is_inline = false
/// conditions = [{ tag = "details" }]
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Config {
    pub(crate) options: ParserOptions,

    /// Handlers added to or replacing the built-in ones, registered in name order.
    pub(crate) handlers: BTreeMap<String, HandlerDefinition>,
}

impl Config {
    /// Build the parser described by the config, then remove handlers in `unset`.
    pub(crate) fn into_parser(self, unset: &[String]) -> Result<Parser, ConfigError> {
        let mut parser = Parser::new(self.options);
        for (name, definition) in self.handlers {
            let handler = definition.into_handler(&name)?;
            parser.set_handler(name, handler);
        }
        for name in unset {
            if !parser.handlers().contains(name) {
                return Err(ConfigError::UnknownHandler(name.to_owned()));
            }
            parser.unset_handler(name);
        }
        Ok(parser)
    }
}

/// Load config from `path`, default config if not set.
pub(crate) async fn load_config(path: Option<&str>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let data = fs::read_to_string(path)
        .await
        .with_context(|| format!("when reading config file {path}"))?;
    toml::from_str(data.as_str()).context("invalid config")
}
