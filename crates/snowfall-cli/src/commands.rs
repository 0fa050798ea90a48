use std::io::Write;

use snowfall::{
    BasicSnowflakeGenerator, GeneratorConfig, SnowflakeGenerator, SnowflakeId, SystemClock,
    TimeSource,
};

use crate::config::{CliConfig, Command};

/// Runs the parsed subcommand, writing its output to `out`.
pub fn run(config: &CliConfig, out: &mut impl Write) -> anyhow::Result<()> {
    match &config.command {
        Command::Generate { count, padded } => {
            let generator = BasicSnowflakeGenerator::from_config(config.generator, SystemClock)?;
            generate(&generator, *count, *padded, out)
        }
        Command::Decode { ids } => decode(&config.generator, ids, out),
    }
}

fn generate<G, T>(generator: &G, count: u64, padded: bool, out: &mut impl Write) -> anyhow::Result<()>
where
    G: SnowflakeGenerator<T>,
    T: TimeSource,
{
    tracing::debug!(count, config = ?generator.config(), "generating IDs");

    for _ in 0..count {
        let id = generator.next_id().inspect_err(|e| {
            tracing::error!(error = %e, "ID generation stopped");
        })?;

        if padded {
            writeln!(out, "{}", id.to_padded_string())?;
        } else {
            writeln!(out, "{id}")?;
        }
    }

    out.flush()?;
    Ok(())
}

fn decode(config: &GeneratorConfig, ids: &[SnowflakeId], out: &mut impl Write) -> anyhow::Result<()> {
    for &id in ids {
        let parts = config.layout.decompose(id);
        writeln!(
            out,
            "id={id} timestamp={} unix_millis={} datacenter_id={} worker_id={} sequence={}",
            parts.timestamp,
            parts.timestamp.saturating_add(config.epoch_millis),
            parts.datacenter_id,
            parts.worker_id,
            parts.sequence,
        )?;
    }

    out.flush()?;
    Ok(())
}
