use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use quotesmith::{render, Quote};

fn main() -> ExitCode {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let input = match args.next() {
        Some(path) => PathBuf::from(path),
        None => {
            eprintln!("usage: quotesmith <input.json> [output.pdf]");
            return ExitCode::FAILURE;
        }
    };
    let output = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| input.with_extension("pdf"));

    if let Err(e) = run(&input, &output) {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(input: &PathBuf, output: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let json = fs::read_to_string(input)?;
    let quote: Quote = serde_json::from_str(&json)?;

    let font_dir = std::env::var_os("QUOTESMITH_FONT_DIR").map(PathBuf::from);
    let rendered = render(&quote, None, font_dir.as_deref())?;

    fs::write(output, &rendered.bytes)?;
    log::info!(
        "wrote {} ({} page(s), {} bytes)",
        output.display(),
        rendered.pages,
        rendered.bytes.len()
    );
    Ok(())
}
