use anyhow::{anyhow, bail};
use clap::{Parser, Subcommand};
use snowfall::{DEFAULT_EPOCH, GeneratorConfig, IdentityField, Layout, SnowflakeId};

/// Runtime configuration for the `snowfall` binary.
///
/// Identity and layout are parsed from CLI arguments or environment variables
/// (a `.env` file in the working directory is loaded first). Every process
/// generating IDs into the same space must run with its own
/// `DATACENTER_ID`/`WORKER_ID` pair and the same epoch and layout.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "snowfall",
    version,
    about = "Generate and decode time-ordered Snowflake IDs"
)]
pub struct CliArgs {
    /// Datacenter this generator belongs to.
    ///
    /// Must fit in `DATACENTER_BITS` bits.
    ///
    /// Environment variable: `DATACENTER_ID`
    #[arg(long, env = "DATACENTER_ID", default_value_t = 0, global = true)]
    pub datacenter_id: u64,

    /// Worker within the datacenter.
    ///
    /// Must fit in `WORKER_BITS` bits.
    ///
    /// Environment variable: `WORKER_ID`
    #[arg(long, env = "WORKER_ID", default_value_t = 0, global = true)]
    pub worker_id: u64,

    /// Time zero of the timestamp field, in milliseconds since the Unix epoch.
    ///
    /// Defaults to 2018-01-01. Changing it for an existing ID space breaks
    /// ordering against previously issued IDs.
    ///
    /// Environment variable: `EPOCH_MILLIS`
    #[arg(long, env = "EPOCH_MILLIS", default_value_t = DEFAULT_EPOCH, global = true)]
    pub epoch_millis: u64,

    /// Width of the per-millisecond sequence field.
    ///
    /// Environment variable: `SEQUENCE_BITS`
    #[arg(long, env = "SEQUENCE_BITS", default_value_t = Layout::DEFAULT.sequence_bits(), global = true)]
    pub sequence_bits: u8,

    /// Width of the worker ID field.
    ///
    /// Environment variable: `WORKER_BITS`
    #[arg(long, env = "WORKER_BITS", default_value_t = Layout::DEFAULT.worker_bits(), global = true)]
    pub worker_bits: u8,

    /// Width of the datacenter ID field.
    ///
    /// Environment variable: `DATACENTER_BITS`
    #[arg(long, env = "DATACENTER_BITS", default_value_t = Layout::DEFAULT.datacenter_bits(), global = true)]
    pub datacenter_bits: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print freshly generated IDs, one per line.
    Generate {
        /// How many IDs to print.
        #[arg(short = 'n', long, default_value_t = 1)]
        count: u64,

        /// Zero-pad IDs to 20 digits so they sort as strings.
        #[arg(long)]
        padded: bool,
    },
    /// Split IDs into their timestamp, datacenter, worker and sequence fields.
    Decode {
        /// Decimal IDs to decode.
        #[arg(required = true)]
        ids: Vec<SnowflakeId>,
    },
}

#[derive(Debug, Clone)]
pub struct CliConfig {
    pub generator: GeneratorConfig,
    pub command: Command,
}

impl TryFrom<CliArgs> for CliConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let layout = Layout::new(args.sequence_bits, args.worker_bits, args.datacenter_bits)
            .map_err(|e| anyhow!("SEQUENCE_BITS/WORKER_BITS/DATACENTER_BITS: {e}"))?;

        let generator = GeneratorConfig::new(args.datacenter_id, args.worker_id, args.epoch_millis)
            .with_layout(layout);

        if let Err(snowfall::Error::InvalidIdentity { field, value, max }) = generator.validate() {
            let name = match field {
                IdentityField::Datacenter => "DATACENTER_ID",
                IdentityField::Worker => "WORKER_ID",
            };
            bail!("{name} ({value}) exceeds the available ID space (max = {max})");
        }

        Ok(Self {
            generator,
            command: args.command,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> anyhow::Result<CliConfig> {
        let args = CliArgs::try_parse_from(argv)?;
        CliConfig::try_from(args)
    }

    #[test]
    fn defaults_match_library_defaults() {
        let config = parse(&["snowfall", "generate"]).unwrap();
        assert_eq!(config.generator, GeneratorConfig::default());
        assert_eq!(
            config.command,
            Command::Generate {
                count: 1,
                padded: false
            }
        );
    }

    #[test]
    fn identity_and_layout_flags() {
        let config = parse(&[
            "snowfall",
            "generate",
            "-n",
            "5",
            "--datacenter-id",
            "3",
            "--worker-id",
            "31",
            "--sequence-bits",
            "12",
            "--worker-bits",
            "5",
            "--datacenter-bits",
            "5",
        ])
        .unwrap();
        assert_eq!(config.generator.datacenter_id, 3);
        assert_eq!(config.generator.worker_id, 31);
        assert_eq!(config.generator.layout, Layout::TWITTER);
        assert_eq!(
            config.command,
            Command::Generate {
                count: 5,
                padded: false
            }
        );
    }

    #[test]
    fn rejects_worker_outside_layout() {
        let err = parse(&["snowfall", "--worker-id", "256", "generate"]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "WORKER_ID (256) exceeds the available ID space (max = 255)"
        );
    }

    #[test]
    fn rejects_datacenter_outside_layout() {
        let err = parse(&["snowfall", "--datacenter-id", "32", "generate"]).unwrap_err();
        assert!(err.to_string().starts_with("DATACENTER_ID (32)"));
    }

    #[test]
    fn rejects_impossible_layout() {
        let err = parse(&["snowfall", "--sequence-bits", "60", "generate"]).unwrap_err();
        assert!(err.to_string().contains("invalid layout"));
    }

    #[test]
    fn decode_takes_ids() {
        let config = parse(&["snowfall", "decode", "1", "8388608"]).unwrap();
        assert_eq!(
            config.command,
            Command::Decode {
                ids: vec![SnowflakeId::from_raw(1), SnowflakeId::from_raw(8_388_608)]
            }
        );
        assert!(parse(&["snowfall", "decode", "abc"]).is_err());
        assert!(parse(&["snowfall", "decode"]).is_err());
    }
}
