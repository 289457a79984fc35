//! Demonstrates weighted 1-D and 2-D histograms
//!
//! Run with `RUST_LOG=binned_histogram=debug` to see edge resolution and
//! accumulation events.

use binned_histogram::{
    histogram_1d, EdgeSpec, HistogramBuilder, HistogramConfig, HistogramOps, SampleMatrix,
};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Exp, Normal};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let normal = Normal::new(5.0, 1.5)?;
    let exp = Exp::new(0.5)?;

    // Example 1: automatic edges, unit weights
    println!("=== Auto edges ===");
    let values: Vec<f64> = (0..10_000).map(|_| normal.sample(&mut rng)).collect();
    let hist = histogram_1d(&values, 12usize, None)?;
    println!("{hist}");
    let edges = hist.edges(0).expect("one dimension");
    for (center, p) in edges.centers().iter().zip(hist.values()) {
        println!("  {center:>7.3}  {p:.4}  {}", "#".repeat((p * 200.0) as usize));
    }

    // Example 2: the same samples, weighted toward the upper tail
    println!("\n=== Weighted ===");
    let weights: Vec<f64> = values.iter().map(|v| v.max(0.0)).collect();
    let weighted = histogram_1d(&values, edges.as_slice().to_vec(), Some(&weights))?;
    println!("{weighted}");
    println!("  mode bin: {:?}", weighted.mode());
    println!("  total variation vs unweighted: {:.4}", hist.total_variation_distance(&weighted)?);
    println!("  intersection with unweighted:  {:.4}", hist.intersection(&weighted)?);

    // Example 3: two dimensions with mixed edge specifications
    println!("\n=== 2-D ===");
    let rows: Vec<[f64; 2]> = (0..50_000)
        .map(|_| [normal.sample(&mut rng), exp.sample(&mut rng)])
        .collect();
    let samples = SampleMatrix::from_rows(&rows)?;
    let joint = HistogramBuilder::new(vec![
        EdgeSpec::Count(8),
        EdgeSpec::Explicit(vec![0.0, 0.5, 1.0, 2.0, 4.0, 8.0]),
    ])
    .config(HistogramConfig::parallel().with_chunk_size(8192))
    .build(&samples)?;
    println!("{joint}");

    for i in 0..joint.shape()[0] {
        let row: Vec<String> = (0..joint.shape()[1])
            .map(|j| format!("{:.3}", joint.get(&[i, j]).unwrap_or(0.0)))
            .collect();
        println!("  {}", row.join(" "));
    }

    let marginal = joint.marginal(1)?;
    println!("  marginal over dim 1: {:?}", marginal.values());

    Ok(())
}
