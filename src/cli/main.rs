use annotation_activity::views::{render_search_page, SearchPageContext};
use anyhow::Context;
use clap::Parser;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "activity-render")]
#[command(about = "Render an activity search page from a JSON context", long_about = None)]
struct Cli {
    /// JSON search page context; `-` reads standard input
    #[arg(value_name = "CONTEXT", default_value = "-")]
    input: String,

    /// Write the HTML here instead of standard output
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let raw = if cli.input == "-" {
        let mut raw = String::new();
        io::stdin()
            .read_to_string(&mut raw)
            .context("failed to read context from stdin")?;
        raw
    } else {
        fs::read_to_string(&cli.input)
            .with_context(|| format!("failed to read context from {}", cli.input))?
    };

    let ctx: SearchPageContext =
        serde_json::from_str(&raw).context("context is not a valid search page context")?;
    let html = render_search_page(&ctx).into_string();

    match cli.output {
        Some(path) => fs::write(&path, html)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => io::stdout()
            .write_all(html.as_bytes())
            .context("failed to write to stdout")?,
    }

    Ok(())
}
