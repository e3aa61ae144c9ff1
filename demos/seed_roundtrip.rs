use structured_rs::prelude::*;

/// Packs the default parameters into a seed token and unpacks it again.
fn main() -> anyhow::Result<()> {
    env_logger::init();
    let params = RenderParams::default();
    let seed = mint_seed();
    let token = encode(&params, Some(&seed))?;
    println!("token ({} chars): {}", token.len(), token);

    let record = decode(&token)?;
    assert_eq!(record.params, params);
    assert_eq!(record.seed, seed);
    println!("decoded seed {} with {} generations", record.seed, record.params.gens);

    match decode("definitely-not-a-seed") {
        Ok(_) => println!("unexpectedly decoded a garbage token"),
        Err(err) => println!("garbage token rejected: {}", err),
    }
    Ok(())
}
