use std::io::{BufRead, Write};

use doctordork_core::{Config, Paths};

/// Show the current configuration as pretty-printed JSON.
pub fn show<W: Write>(paths: &Paths, out: &mut W) -> anyhow::Result<()> {
    let config = Config::load_or_default(paths);

    writeln!(out)?;
    writeln!(out, "📋 Current Configuration")?;
    writeln!(out, "  File: {}", paths.config_file().display())?;
    writeln!(out)?;
    writeln!(out, "{}", serde_json::to_string_pretty(&config)?)?;
    Ok(())
}

pub fn get<W: Write>(paths: &Paths, key: &str, out: &mut W) -> anyhow::Result<()> {
    let config = Config::load_or_default(paths);
    writeln!(out, "{}", config.get(key)?)?;
    Ok(())
}

pub fn set<W: Write>(paths: &Paths, key: &str, value: &str, out: &mut W) -> anyhow::Result<()> {
    let mut config = Config::load_or_default(paths);
    config.set(key, value)?;
    config.save(&paths.config_file())?;
    writeln!(out, "✓ Set {} = {}", key, config.get(key)?)?;
    Ok(())
}

/// Reset config to defaults, asking first unless `force` is set.
pub fn reset<R: BufRead, W: Write>(paths: &Paths, force: bool, input: &mut R, out: &mut W) -> anyhow::Result<()> {
    if !force {
        write!(out, "⚠ Reset config to defaults? Current settings will be lost. [y/N] ")?;
        out.flush()?;

        let mut answer = String::new();
        input.read_line(&mut answer)?;
        if !answer.trim().eq_ignore_ascii_case("y") {
            writeln!(out, "Cancelled.")?;
            return Ok(());
        }
    }

    Config::default().save(&paths.config_file())?;
    writeln!(out, "✓ Config reset to defaults: {}", paths.config_file().display())?;
    Ok(())
}

pub fn path<W: Write>(paths: &Paths, out: &mut W) -> anyhow::Result<()> {
    writeln!(out, "Config:  {}", paths.config_file().display())?;
    writeln!(out, "History: {}", paths.history_file().display())?;
    writeln!(out, "Exports: {}", paths.export_dir.display())?;
    Ok(())
}
