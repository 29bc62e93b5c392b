use anyhow::{Context, Result};
use tokio::fs;
use tokio::io::{self, AsyncReadExt, AsyncWriteExt};

/// Path reading from stdin instead of a file.
pub const STDIN_PATH: &str = "-";

/// Read all content from file `path`, or from stdin if `path` is [STDIN_PATH].
///
/// # Errors
///
/// When failed to read the file or stdin, or the content is not valid utf-8.
pub async fn read_input(path: &str) -> Result<String> {
    if path != STDIN_PATH {
        return fs::read_to_string(path)
            .await
            .with_context(|| format!("when reading input file {path}"));
    }

    let mut content = String::new();
    io::stdin()
        .read_to_string(&mut content)
        .await
        .context("when reading stdin")?;
    Ok(content)
}

/// Write `content` to file `path`, or to stdout if not set.
///
/// # Errors
///
/// When failed to io on the file or stdout.
pub async fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(v) => fs::write(v, content)
            .await
            .with_context(|| format!("when writing output file {v}")),
        None => {
            let mut stdout = io::stdout();
            stdout
                .write_all(content.as_bytes())
                .await
                .context("when writing stdout")?;
            stdout.flush().await.context("when flushing stdout")
        }
    }
}
