use std::io::Write;

use clap_complete::{generate, Shell};

/// Generate shell completion scripts for `cmd`.
pub fn run<W: Write>(shell: &str, cmd: &mut clap::Command, out: &mut W) -> anyhow::Result<()> {
    let shell = match shell.to_lowercase().as_str() {
        "bash" => Shell::Bash,
        "zsh" => Shell::Zsh,
        "fish" => Shell::Fish,
        "powershell" | "ps" => Shell::PowerShell,
        "elvish" => Shell::Elvish,
        _ => {
            anyhow::bail!(
                "Unsupported shell: {}. Options: bash, zsh, fish, powershell, elvish",
                shell
            );
        }
    };

    generate(shell, cmd, "doctordork", out);

    eprintln!();
    eprintln!("# Usage:");
    match shell {
        Shell::Bash => {
            eprintln!("#   doctordork completions bash > ~/.local/share/bash-completion/completions/doctordork");
            eprintln!("#   or: eval \"$(doctordork completions bash)\"");
        }
        Shell::Zsh => {
            eprintln!("#   doctordork completions zsh > ~/.zfunc/_doctordork");
            eprintln!("#   Make sure fpath includes ~/.zfunc and run compinit");
        }
        Shell::Fish => {
            eprintln!("#   doctordork completions fish > ~/.config/fish/completions/doctordork.fish");
        }
        _ => {}
    }

    Ok(())
}
