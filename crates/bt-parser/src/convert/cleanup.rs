use crate::options::ParserOptions;
use bt_handler::{Handler, HandlerRegistry};
use bt_types::{Token, DEFAULT_ATTR};

/// Line breaks written around a tag.
struct Breaks {
    before: bool,
    start: bool,
    end: bool,
    after: bool,
}

impl Breaks {
    fn new(handler: &Handler, options: &ParserOptions) -> Self {
        let block = !handler.is_inline;
        let flag_on = |option: bool, flag: Option<bool>| {
            (block && option && flag != Some(false)) || flag == Some(true)
        };

        Self {
            before: flag_on(options.break_before_block, handler.break_before),
            start: flag_on(
                options.break_start_block && !handler.is_self_closing,
                handler.break_start,
            ),
            end: flag_on(options.break_end_block, handler.break_end),
            after: flag_on(options.break_after_block, handler.break_after),
        }
    }
}

/// Write the bbcode token tree back into canonical bbcode.
///
/// Tag names are lower-cased, attributes rewritten as `[name=default key=value]` with values
/// quoted per handler or `options`, and line breaks placed around tags as configured. Tags without
/// handler are written as they were.
pub fn cleanup_bbcode(tokens: &[Token], registry: &HandlerRegistry, options: &ParserOptions) -> String {
    let mut output = String::new();

    for token in tokens {
        let handler = registry.get(&token.name);
        match handler {
            Some(handler) if token.is_open() => {
                output.push_str(cleanup_tag(token, handler, registry, options).as_str())
            }
            None if token.is_open() => {
                output.push_str(&token.value);
                output.push_str(cleanup_bbcode(&token.children, registry, options).as_str());
                output.push_str(token.closing_value());
            }
            _ => output.push_str(&token.value),
        }
    }

    output
}

fn cleanup_tag(
    token: &Token,
    handler: &Handler,
    registry: &HandlerRegistry,
    options: &ParserOptions,
) -> String {
    let breaks = Breaks::new(handler, options);
    let quote_type = handler.quote_type.unwrap_or(options.quote_type);
    let mut output = String::new();

    if breaks.before {
        output.push('\n');
    }

    output.push('[');
    output.push_str(&token.name);
    if let Some(v) = token.attrs.default_value() {
        output.push('=');
        output.push_str(quote_type.quote(v).as_str());
    }
    for (k, v) in token.attrs.iter().filter(|(k, _)| *k != DEFAULT_ATTR) {
        output.push_str(format!(" {k}={}", quote_type.quote(v)).as_str());
    }
    output.push(']');

    if breaks.start {
        output.push('\n');
    }

    output.push_str(cleanup_bbcode(&token.children, registry, options).as_str());

    if !handler.is_self_closing && !handler.exclude_closing {
        if breaks.end {
            output.push('\n');
        }
        output.push_str(format!("[/{}]", token.name).as_str());
    }

    if breaks.after {
        output.push('\n');
    }

    if handler.is_self_closing {
        output.push_str(token.closing_value());
    }

    output
}
