use std::io::{BufWriter, Write};

use anyhow::{Context, Result};
use arguments::CliArgs;
use indexmap::IndexMap;
use log::{debug, error, info};
use serde::Serialize;

use harpmeta::{DeviceInfo, MetadataDeserializer, MetadataError, PortPinInfo};

mod arguments;
mod logging;

/// Resolved metadata written back out after merge keys have been expanded.
#[derive(Debug, Serialize)]
struct ResolvedMetadata<'a> {
    #[serde(flatten)]
    device: &'a DeviceInfo,

    #[serde(skip_serializing_if = "Option::is_none")]
    pins: Option<&'a IndexMap<String, PortPinInfo>>,
}

/// cli entrypoint
fn main() {
    if let Err(e) = try_main() {
        if let Some(MetadataError::Validation(errors)) = e.downcast_ref::<MetadataError>() {
            for validation_error in errors.errors() {
                error!("{validation_error}");
            }
        } else {
            error!("{e:#}");
        }

        std::process::exit(1);
    }
}

/// Main program entrypoint
fn try_main() -> Result<()> {
    let args = arguments::parse_arguments()?;

    let deserializer = MetadataDeserializer::new().validate_references(!args.no_validate);

    let device = deserializer
        .read_device(&args.device)
        .with_context(|| format!("could not read {}", args.device.display()))?;

    info!(
        "{}: {} registers, {} bit masks, {} group masks",
        device.name(),
        device.registers.len(),
        device.bit_masks.len(),
        device.group_masks.len()
    );

    let pins = args
        .ios
        .as_ref()
        .map(|ios| {
            deserializer
                .read_port_pins(ios)
                .with_context(|| format!("could not read {}", ios.display()))
        })
        .transpose()?;

    if let Some(pins) = pins.as_ref() {
        let inputs = pins.values().filter(|pin| pin.is_input()).count();
        info!("{} input pins, {} output pins", inputs, pins.len() - inputs);
    }

    write_resolved(
        &args,
        &ResolvedMetadata {
            device: &device,
            pins: pins.as_ref(),
        },
    )
}

fn write_resolved(args: &CliArgs, resolved: &ResolvedMetadata) -> Result<()> {
    let mut output: Box<dyn Write> = if let Some(filepath) = args.output.as_ref() {
        debug!("writing resolved metadata to {}", filepath.display());
        Box::new(BufWriter::new(
            std::fs::File::create(filepath)
                .with_context(|| format!("could not open {}", filepath.display()))?,
        ))
    } else {
        Box::new(BufWriter::new(std::io::stdout().lock()))
    };

    serde_yml::to_writer(&mut output, resolved)?;
    output.flush()?;

    Ok(())
}
