#![doc = include_str!("../README.md")]

mod config;
mod telemetry;

use anyhow::Context;
use clap::Parser;
use config::{AppConfig, CliArgs, Command, Format};
use snowgen::{Base62Codec, IdGenerator, SystemClock};
use std::io::{self, BufWriter, Write};

fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    telemetry::init_telemetry()?;

    let config = AppConfig::try_from(args.generator)?;
    tracing::debug!(?config, "resolved configuration");

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    run(args.command, &config, &mut out)?;
    out.flush()?;
    Ok(())
}

fn run(command: Command, config: &AppConfig, out: &mut impl Write) -> anyhow::Result<()> {
    match command {
        Command::Generate { count, format } => {
            let generator = IdGenerator::with_config(
                config.worker_id,
                config.datacenter_id,
                config.generator,
                SystemClock,
            )?;
            for _ in 0..count {
                let id = match format {
                    Format::Decimal => generator.next_id_string(),
                    Format::Base62 => generator.next_id_compact(),
                }
                .context("failed to generate id")?;
                writeln!(out, "{id}")?;
            }
            tracing::debug!(count, "generated ids");
        }
        Command::Inspect { id } => {
            if id < 0 {
                anyhow::bail!("ids are never negative: {id}");
            }
            let parts = config.layout.decompose(id);
            let unix_ms = config
                .generator
                .epoch_millis()
                .checked_add(parts.timestamp)
                .with_context(|| {
                    format!(
                        "EPOCH_MS ({}) plus the id's timestamp ({}) overflows a u64",
                        config.generator.epoch_millis(),
                        parts.timestamp
                    )
                })?;
            writeln!(out, "id:            {id}")?;
            writeln!(out, "timestamp:     {} (unix ms {unix_ms})", parts.timestamp)?;
            writeln!(out, "datacenter_id: {}", parts.datacenter_id)?;
            writeln!(out, "worker_id:     {}", parts.worker_id)?;
            writeln!(out, "sequence:      {}", parts.sequence)?;
            writeln!(out, "base62:        {}", Base62Codec::encode(id.unsigned_abs()))?;
        }
        Command::Encode { value } => {
            writeln!(out, "{}", Base62Codec::encode(value))?;
        }
        Command::Decode { encoded, strict } => {
            let value = if strict {
                Base62Codec::decode_strict(&encoded)
                    .with_context(|| format!("invalid base-62 input {encoded:?}"))?
            } else {
                let value = Base62Codec::decode(&encoded);
                if Base62Codec::decode_strict(&encoded).is_err() {
                    tracing::warn!(
                        %encoded,
                        value,
                        "input is not clean base 62; decoded the valid prefix"
                    );
                }
                value
            };
            writeln!(out, "{value}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_string(args: &[&str]) -> anyhow::Result<String> {
        let args = CliArgs::try_parse_from(std::iter::once("snowgen").chain(args.iter().copied()))?;
        let config = AppConfig::try_from(args.generator)?;
        let mut out = Vec::new();
        run(args.command, &config, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn generate_prints_requested_count() {
        let out = run_to_string(&["--worker-id", "2", "generate", "-n", "3"]).unwrap();
        let ids: Vec<i64> = out.lines().map(|l| l.parse().unwrap()).collect();
        assert_eq!(ids.len(), 3);
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn generate_base62_decodes_to_ids() {
        let out = run_to_string(&["generate", "-n", "2", "--format", "base62"]).unwrap();
        for line in out.lines() {
            assert!(Base62Codec::decode_strict(line).unwrap() > 0);
        }
    }

    #[test]
    fn inspect_prints_fields() {
        let out = run_to_string(&["inspect", "17956864"]).unwrap();
        assert!(out.contains("timestamp:     1 (unix ms 1603702714273)"));
        assert!(out.contains("datacenter_id: 1"));
        assert!(out.contains("worker_id:     2"));
        assert!(out.contains("sequence:      0"));
        assert!(out.contains("base62:        1dloQ"));
    }

    #[test]
    fn inspect_rejects_epoch_that_overflows_wall_clock() {
        let err = run_to_string(&[
            "--epoch-ms",
            "18446744073709551615",
            "inspect",
            "9223372036854775807",
        ])
        .unwrap_err();
        assert!(err.to_string().contains("overflows a u64"));
    }

    #[test]
    fn encode_and_decode_convert() {
        assert_eq!(run_to_string(&["encode", "62"]).unwrap(), "10\n");
        assert_eq!(run_to_string(&["decode", "10"]).unwrap(), "62\n");
        assert_eq!(run_to_string(&["decode", "10!Z"]).unwrap(), "62\n");
        assert!(run_to_string(&["decode", "10!Z", "--strict"]).is_err());
    }
}
