use ascii_mazes::app::App;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let mut args = std::env::args();
    args.next(); // Skip executable name
    let num_iters = args.next().and_then(|s| s.parse::<usize>().ok()).unwrap_or(10);
    for (generator, elapsed) in App::profile(255, 255, num_iters)? {
        println!(
            "{:<30} {:>10.3?} total, {:>10.3?} per maze",
            generator.to_string(),
            elapsed,
            elapsed / num_iters.max(1) as u32
        );
    }
    Ok(())
}
