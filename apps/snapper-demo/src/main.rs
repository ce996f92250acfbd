mod list;
mod samples;

fn main() -> anyhow::Result<()> {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    println!("=== Snapper Demo ===");
    println!("Each sample flings a simulated list at 60 fps and prints where it came to rest.");
    println!("Run with RUST_LOG=snapper_core=debug to trace target resolution and phases.");
    println!();

    for sample in samples::all() {
        sample.run()?;
    }
    Ok(())
}
