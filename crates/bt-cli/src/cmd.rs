use crate::convert::{
    run_cleanup_command, run_to_bbcode_command, run_to_html_command, run_tokens_command,
};
use anyhow::Result;
use clap::ArgAction;
use clap::{Args, Parser, Subcommand};

///////// Args /////////

/// Options shared by all subcommands.
#[derive(Clone, Debug, Args)]
pub struct GlobalArgs {
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        help = "Path to the toml config file defining parser options and extra handlers"
    )]
    pub config: Option<String>,

    #[arg(
        long = "unset",
        global = true,
        help = "Name of handler to remove, can be repeated",
        action = ArgAction::Append,
    )]
    pub unset: Vec<String>,

    #[arg(
        short = 'o',
        long = "output",
        global = true,
        help = "File to save the result, print to stdout if not set"
    )]
    pub output: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct BBCodeArgs {
    #[arg(help = "Path to the bbcode file, use \"-\" to read from stdin")]
    pub file: String,

    #[arg(
        short = 'p',
        long = "preserve-newlines",
        help = "Only remove line breaks after block level tags",
        default_value = "false",
        action = ArgAction::SetTrue,
    )]
    pub preserve_newlines: bool,
}

#[derive(Clone, Debug, Args)]
pub struct HtmlArgs {
    #[arg(help = "Path to the html file, use \"-\" to read from stdin")]
    pub file: String,
}

#[derive(Clone, Debug, Args)]
pub struct TokensArgs {
    #[arg(help = "Path to the input file, use \"-\" to read from stdin")]
    pub file: String,

    #[arg(
        long = "html",
        help = "Input is html instead of bbcode",
        default_value = "false",
        action = ArgAction::SetTrue,
    )]
    pub html: bool,

    #[arg(
        short = 'p',
        long = "preserve-newlines",
        help = "Only remove line breaks after block level tags, bbcode input only",
        default_value = "false",
        action = ArgAction::SetTrue,
    )]
    pub preserve_newlines: bool,
}

///////// Subcommand /////////

#[derive(Clone, Debug, Parser)]
#[command(name = "bbtrans", version, about = "Convert between bbcode and html")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Command {
    #[command(about = "convert bbcode to html")]
    ToHtml(BBCodeArgs),

    #[command(about = "convert html to bbcode")]
    ToBbcode(HtmlArgs),

    #[command(about = "repair bbcode and write it in canonical form")]
    Cleanup(BBCodeArgs),

    #[command(about = "print the parsed token tree as json")]
    Tokens(TokensArgs),
}

/// Main entry of all subcommands.
pub async fn run_command_with_args(cli: Cli) -> Result<()> {
    let global = cli.global;
    match cli.command {
        Command::ToHtml(args) => run_to_html_command(global, args).await,
        Command::ToBbcode(args) => run_to_bbcode_command(global, args).await,
        Command::Cleanup(args) => run_cleanup_command(global, args).await,
        Command::Tokens(args) => run_tokens_command(global, args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        let cli = Cli::try_parse_from([
            "bbtrans", "to-html", "-p", "in.txt", "--unset", "b", "--unset", "i", "-c", "a.toml",
        ])
        .unwrap();
        assert_eq!(cli.global.config.as_deref(), Some("a.toml"));
        assert_eq!(cli.global.unset, vec!["b", "i"]);
        match cli.command {
            Command::ToHtml(args) => {
                assert_eq!(args.file, "in.txt");
                assert!(args.preserve_newlines);
            }
            v => panic!("unexpected command {v:?}"),
        }

        let cli = Cli::try_parse_from(["bbtrans", "tokens", "--html", "-"]).unwrap();
        match cli.command {
            Command::Tokens(args) => {
                assert_eq!(args.file, "-");
                assert!(args.html);
            }
            v => panic!("unexpected command {v:?}"),
        }
    }
}
