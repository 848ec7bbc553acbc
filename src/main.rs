use anyhow::Result;

use nyc_schools_clean::config::Config;
use nyc_schools_clean::pipeline;

fn main() -> Result<()> {
    env_logger::init();

    let config = Config::from_args(std::env::args().skip(1))?;
    pipeline::run(&config)?;
    Ok(())
}
