use std::env;
use std::path::Path;

use anyhow::Context;
use log::info;
use structured_rs::prelude::*;

/// Renders one drawing to `images/structured_svg.svg`.
///
/// Usage: `cargo run --example structured_svg [config.ron] [seed-token]`
///
/// With a seed token the parameters and seed inside it win over the config file. Without
/// one, a fresh seed is minted and the token to reproduce the drawing is printed.
fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args: Vec<String> = env::args().skip(1).collect();

    let params = match args.first() {
        Some(path) => RenderParams::from_ron_file(path)
            .with_context(|| format!("loading parameters from {}", path))?,
        None => RenderParams::default(),
    };

    let record = match args.get(1) {
        Some(token) => decode(token).context("decoding seed token")?,
        None => SeedRecord {
            params,
            seed: mint_seed(),
        },
    };
    let params = &record.params;

    let background = csscolorparser::parse("#101018")?;
    let mut recorder = Recorder::new();
    let artwork = generate(params, &record.seed, &mut recorder)?;
    info!("rules: {:?}", artwork.rules_as_strings());
    if let Some(bounds) = recorder.bounds() {
        info!("drawing spans {:?} to {:?}", bounds.min(), bounds.max());
    }

    let mut svg = SvgSurface::new(params.canvas.width, params.canvas.height, &background);
    recorder.replay(&mut svg);

    let fname = Path::new(file!())
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("structured");
    let out = format!("images/{}.svg", fname);
    svg.save(&out).with_context(|| format!("writing {}", out))?;

    println!(
        "{} primitives from {} of {} symbols written to {}",
        artwork.report.primitives, artwork.report.symbols_consulted, artwork.sequence_len, out
    );
    println!("seed token: {}", encode(params, Some(&record.seed))?);
    Ok(())
}
