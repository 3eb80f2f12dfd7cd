use anyhow::{Context, Result, bail};
use rust_embed::RustEmbed;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

#[derive(RustEmbed)]
#[folder = "config-templates/"]
pub struct ConfigTemplates;

pub fn init(path: PathBuf) -> Result<()> {
    write_template(&path)?;

    // User feedback
    println!("✔ Wrote {}", path.display());
    println!();
    println!("Next steps:");
    println!("  archon config check {}", path.display());
    println!("  archon watch --config {}", path.display());

    Ok(())
}

/// Write the starter config to `path`, refusing to overwrite anything.
pub fn write_template(path: &Path) -> Result<()> {
    if path.exists() {
        bail!("{} already exists", path.display());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let mut f =
        fs::File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    f.write_all(template("archon.hcl")?.trim_start().as_bytes())?;
    Ok(())
}

/// Fetch an embedded config template as UTF-8 text
fn template(path: &str) -> Result<String> {
    let file = ConfigTemplates::get(path)
        .with_context(|| format!("missing embedded template: {path}"))?;

    String::from_utf8(file.data.into_owned())
        .with_context(|| format!("template {path} is not valid UTF-8"))
}
