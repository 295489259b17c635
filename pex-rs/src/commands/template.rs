//! Sample descriptor authoring

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use pex_descriptor::{DescriptorWriter, presets};

pub fn execute(output: &Path, preset: &str, force: bool) -> Result<()> {
    use console::style;

    let Some(descriptor) = presets::preset(preset) else {
        anyhow::bail!(
            "Unknown preset '{}', expected one of: {}",
            preset,
            presets::PRESET_NAMES.join(", ")
        );
    };

    if output.exists() && !force {
        anyhow::bail!(
            "{} already exists, pass --force to overwrite",
            output.display()
        );
    }

    let file = File::create(output)
        .with_context(|| format!("Failed to create file: {}", output.display()))?;
    let mut writer = BufWriter::new(file);
    DescriptorWriter::new()
        .write(&mut writer, &descriptor)
        .with_context(|| format!("Failed to write descriptor: {}", output.display()))?;
    writer
        .flush()
        .with_context(|| format!("Failed to write descriptor: {}", output.display()))?;

    log::info!("wrote {preset} preset to {}", output.display());
    println!(
        "✓ Wrote {} emitter to '{}'",
        style(preset).yellow(),
        style(output.display()).cyan()
    );
    Ok(())
}
