use std::io::{BufRead, Write};

pub mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const WHITE: &str = "\x1b[97m";
    pub const CLEAR: &str = "\x1b[2J\x1b[H";
}

/// Raised when stdin closes while a prompt is waiting.
#[derive(Debug, thiserror::Error)]
#[error("end of input")]
pub struct EndOfInput;

/// Line-oriented terminal I/O for the interactive menu.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Prints `label`, then reads one trimmed line.
    pub fn prompt(&mut self, label: &str) -> anyhow::Result<String> {
        write!(self.output, "{}{}{}", ansi::WHITE, label, ansi::RESET)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(EndOfInput.into());
        }
        Ok(line.trim().to_string())
    }

    /// `(y/n)` question; only "y" counts as yes.
    pub fn confirm(&mut self, question: &str) -> anyhow::Result<bool> {
        let answer = self.prompt(&format!("{} (y/n): ", question))?;
        Ok(answer.eq_ignore_ascii_case("y"))
    }

    pub fn pause(&mut self) -> anyhow::Result<()> {
        writeln!(self.output)?;
        write!(self.output, "{}Press Enter to continue...{}", ansi::CYAN, ansi::RESET)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(EndOfInput.into());
        }
        Ok(())
    }

    pub fn success(&mut self, message: &str) -> anyhow::Result<()> {
        writeln!(self.output, "{}✓ {}{}", ansi::GREEN, message, ansi::RESET)?;
        Ok(())
    }

    pub fn error(&mut self, message: &str) -> anyhow::Result<()> {
        writeln!(self.output, "{}✗ {}{}", ansi::RED, message, ansi::RESET)?;
        Ok(())
    }

    pub fn info(&mut self, message: &str) -> anyhow::Result<()> {
        writeln!(self.output, "{}ℹ {}{}", ansi::BLUE, message, ansi::RESET)?;
        Ok(())
    }

    pub fn warning(&mut self, message: &str) -> anyhow::Result<()> {
        writeln!(self.output, "{}⚠ {}{}", ansi::YELLOW, message, ansi::RESET)?;
        Ok(())
    }

    pub fn heading(&mut self, title: &str) -> anyhow::Result<()> {
        writeln!(
            self.output,
            "\n{}{}=== {} ==={}\n",
            ansi::BOLD,
            ansi::GREEN,
            title.to_uppercase(),
            ansi::RESET
        )?;
        Ok(())
    }

    pub fn clear_screen(&mut self) -> anyhow::Result<()> {
        write!(self.output, "{}", ansi::CLEAR)?;
        Ok(())
    }

    pub fn logo(&mut self) -> anyhow::Result<()> {
        writeln!(self.output, "{}", ansi::CYAN)?;
        writeln!(self.output, "  ____             _             ____             _    ")?;
        writeln!(self.output, " |  _ \\  ___   ___| |_ ___  _ __|  _ \\  ___  _ __| | __")?;
        writeln!(self.output, " | | | |/ _ \\ / __| __/ _ \\| '__| | | |/ _ \\| '__| |/ /")?;
        writeln!(self.output, " | |_| | (_) | (__| || (_) | |  | |_| | (_) | |  |   < ")?;
        writeln!(self.output, " |____/ \\___/ \\___|\\__\\___/|_|  |____/ \\___/|_|  |_|\\_\\")?;
        writeln!(self.output)?;
        writeln!(
            self.output,
            "        Medical Professional Research Tool v{}",
            env!("CARGO_PKG_VERSION")
        )?;
        writeln!(self.output, "{}", ansi::RESET)?;
        Ok(())
    }
}
