use crate::cmd::{BBCodeArgs, GlobalArgs, HtmlArgs, TokensArgs};
use crate::config::load_config;
use crate::utils::{read_input, write_output};
use anyhow::{Context, Result};
use bt_parser::Parser;
use tracing::debug;

async fn build_parser(global: &GlobalArgs) -> Result<Parser> {
    let config = load_config(global.config.as_deref()).await?;
    debug!("loaded {} handlers from config", config.handlers.len());
    let parser = config
        .into_parser(&global.unset)
        .context("failed to build parser from config")?;
    Ok(parser)
}

pub async fn run_to_html_command(global: GlobalArgs, args: BBCodeArgs) -> Result<()> {
    let parser = build_parser(&global).await?;
    let input = read_input(&args.file).await?;
    let html = parser.to_html(&input, args.preserve_newlines);
    write_output(global.output.as_deref(), &html).await
}

pub async fn run_to_bbcode_command(global: GlobalArgs, args: HtmlArgs) -> Result<()> {
    let parser = build_parser(&global).await?;
    let input = read_input(&args.file).await?;
    let bbcode = parser.to_bbcode(&input);
    write_output(global.output.as_deref(), &bbcode).await
}

pub async fn run_cleanup_command(global: GlobalArgs, args: BBCodeArgs) -> Result<()> {
    let parser = build_parser(&global).await?;
    let input = read_input(&args.file).await?;
    let bbcode = parser.cleanup_bbcode(&input, args.preserve_newlines);
    write_output(global.output.as_deref(), &bbcode).await
}

pub async fn run_tokens_command(global: GlobalArgs, args: TokensArgs) -> Result<()> {
    let parser = build_parser(&global).await?;
    let input = read_input(&args.file).await?;
    let tokens = if args.html {
        parser.parse_html(&input)
    } else {
        parser.parse_bbcode(&input, args.preserve_newlines)
    };
    let mut json = serde_json::to_string_pretty(&tokens).context("failed to serialize tokens")?;
    json.push('\n');
    write_output(global.output.as_deref(), &json).await
}
