use std::io::Read;

use anyhow::Context;

use draftorder_replay::{ReplayConfig, run};

fn main() -> anyhow::Result<()> {
    draftorder_observability::init();

    let config = ReplayConfig::from_env();
    let input = match std::env::args().nth(1) {
        Some(path) if path != "-" => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read action log {path}"))?,
        _ => {
            tracing::info!("reading action log from stdin");
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read action log from stdin")?;
            buf
        }
    };

    println!("{}", run(&config, &input)?);
    Ok(())
}
