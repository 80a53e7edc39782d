use std::io::{BufRead, Write};

use doctordork_core::{DoctorIdentity, Error, ExportFormat, ResultEntry};
use doctordork_search::batch::BATCH_FORMAT;
use doctordork_search::{jurisdiction, Category, CONTACT_SEARCH_KEY, MEDICAL_BOARD_KEY};
use doctordork_storage::{HistoryEntry, DEFAULT_RECENT};
use tracing::{debug, warn};

use crate::app::App;
use crate::commands::history_cmd;
use crate::console::{ansi, Console, EndOfInput};

pub const ETHICS_REPORT_KEY: &str = "ethics_report";

const MAIN_MENU: [(&str, &str); 9] = [
    ("Doctor Contact Search", "Find doctors with contact forms"),
    ("Medical Board Lookup", "Verify licenses (51 jurisdictions)"),
    ("Review Aggregation", "Search 5 review platforms"),
    ("Ethics Violation Report", "File medical board complaints"),
    ("Social Media Search", "Find professional profiles"),
    ("Comprehensive Search", "All features in one operation"),
    ("Batch Processing", "Process multiple doctors"),
    ("Settings", "Configure preferences"),
    ("Exit", "Close application"),
];

/// Whether an operation runs on its own or as one step of a larger sweep.
/// Sweeps never open a browser and skip the per-category notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Single,
    Sweep,
}

enum Flow {
    Continue,
    Exit,
}

/// Text for errors that are shown to the user verbatim.
fn reason(e: &Error) -> String {
    match e {
        Error::NotFound(msg) | Error::Validation(msg) => msg.clone(),
        other => other.to_string(),
    }
}

fn flag(on: bool) -> String {
    let colour = if on { ansi::GREEN } else { ansi::RED };
    format!("{}{}{}", colour, on, ansi::RESET)
}

/// The numbered interactive menu.
pub struct Menu<R, W> {
    pub app: App,
    pub console: Console<R, W>,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(app: App, console: Console<R, W>) -> Self {
        Self { app, console }
    }

    /// Runs until the user picks Exit or stdin closes.
    pub fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match self.step() {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break,
                Err(e) if e.is::<EndOfInput>() => {
                    debug!("Input closed, leaving menu");
                    break;
                }
                Err(e) => {
                    warn!(error = %e, "Menu operation failed");
                    self.console.error(&format!("{:#}", e))?;
                }
            }
        }

        let out = self.console.out();
        writeln!(out, "\n{}Thank you for using DoctorDork!{}", ansi::CYAN, ansi::RESET)?;
        writeln!(out, "{}Goodbye!{}\n", ansi::GREEN, ansi::RESET)?;
        Ok(())
    }

    fn step(&mut self) -> anyhow::Result<Flow> {
        self.console.clear_screen()?;
        self.console.logo()?;
        self.print_main_menu()?;

        let choice = self.console.prompt("\nSelect an option (1-9): ")?;
        match choice.as_str() {
            "1" => self.contact_search()?,
            "2" => self.board_lookup()?,
            "3" => self.category_search(Category::Reviews)?,
            "4" => self.ethics_report()?,
            "5" => self.category_search(Category::SocialMedia)?,
            "6" => self.comprehensive_search()?,
            "7" => self.batch_processing()?,
            "8" => self.settings()?,
            "9" => return Ok(Flow::Exit),
            _ => {
                self.console.error("Invalid option. Please select 1-9.")?;
                self.console.pause()?;
            }
        }
        Ok(Flow::Continue)
    }

    fn print_main_menu(&mut self) -> anyhow::Result<()> {
        let out = self.console.out();
        writeln!(out, "{}MAIN MENU{}", ansi::YELLOW, ansi::RESET)?;
        for (idx, (name, blurb)) in MAIN_MENU.iter().enumerate() {
            writeln!(out, "  {}. {:<26} - {}", idx + 1, name, blurb)?;
        }
        Ok(())
    }

    fn screen(&mut self, title: &str) -> anyhow::Result<()> {
        self.console.clear_screen()?;
        self.console.logo()?;
        self.console.heading(title)
    }

    fn ask_identity(&mut self) -> anyhow::Result<DoctorIdentity> {
        writeln!(self.console.out(), "\n{}Enter Doctor Information:{}", ansi::CYAN, ansi::RESET)?;
        let doctor_name = self.console.prompt("Doctor's name: ")?;
        let city = self.console.prompt("City: ")?;
        let state = self.console.prompt("State (2-letter code): ")?;
        let specialty = self.console.prompt("Specialty (optional): ")?;
        Ok(DoctorIdentity::new(doctor_name, city, state, specialty))
    }

    fn remember(&mut self, entry: HistoryEntry) -> anyhow::Result<()> {
        if let Err(e) = self.app.remember(entry) {
            warn!(error = %e, "Failed to save history");
            self.console.warning(&format!("Could not save history: {}", e))?;
        }
        Ok(())
    }

    fn open_all(&mut self, entries: &[ResultEntry]) -> anyhow::Result<()> {
        for entry in entries {
            match self.app.open(&entry.url) {
                Ok(()) => self.console.success(&format!("Opened {}", entry.platform))?,
                Err(e) => self
                    .console
                    .error(&format!("Could not open {}: {}", entry.platform, e))?,
            }
        }
        Ok(())
    }

    fn contact_search(&mut self) -> anyhow::Result<()> {
        self.screen("Doctor Contact Search")?;
        let identity = self.ask_identity()?;
        self.run_contact(&identity, Mode::Single)?;
        self.console.pause()
    }

    fn run_contact(&mut self, identity: &DoctorIdentity, mode: Mode) -> anyhow::Result<()> {
        let entry = self.app.contact_search(identity);

        if mode == Mode::Single {
            let out = self.console.out();
            writeln!(out, "\n{}Generated Search Query:{}", ansi::GREEN, ansi::RESET)?;
            writeln!(
                out,
                "{}{}{}\n",
                ansi::WHITE,
                doctordork_search::contact_dork(identity),
                ansi::RESET
            )?;
        }

        let mut show_url = true;
        if mode == Mode::Single && self.app.config.auto_open_browser {
            self.console.info("Opening browser...")?;
            match self.app.open(&entry.url) {
                Ok(()) => {
                    self.console.success("Browser opened successfully!")?;
                    show_url = false;
                }
                Err(e) => self.console.error(&format!("Could not open browser: {}", e))?,
            }
        }
        if show_url {
            writeln!(self.console.out(), "{}Search URL:{} {}", ansi::YELLOW, ansi::RESET, entry.url)?;
        }

        self.remember(
            HistoryEntry::new(CONTACT_SEARCH_KEY)
                .with_identity(identity)
                .with_url(&entry.url),
        )
    }

    fn board_lookup(&mut self) -> anyhow::Result<()> {
        self.screen("Medical Board Lookup")?;
        let code = self
            .console
            .prompt("Enter state (2-letter code) or 'ALL' for all states: ")?;
        self.run_board(&code, Mode::Single)?;
        self.console.pause()
    }

    fn run_board(&mut self, code: &str, mode: Mode) -> anyhow::Result<()> {
        let code = code.trim().to_uppercase();
        if code == "ALL" || (code.is_empty() && mode == Mode::Single) {
            return self.list_boards();
        }
        if code.is_empty() {
            return self
                .console
                .warning("No state given, skipping medical board lookup");
        }

        match self.app.board_lookup(&code) {
            Ok(board) => {
                let out = self.console.out();
                writeln!(out, "\n{}Medical Board: {}{}", ansi::GREEN, board.name, ansi::RESET)?;
                writeln!(out, "{}URL: {}{}\n", ansi::WHITE, board.url, ansi::RESET)?;

                if mode == Mode::Single && self.app.config.auto_open_browser {
                    self.console.info("Opening medical board website...")?;
                    match self.app.open(board.url) {
                        Ok(()) => self.console.success("Browser opened successfully!")?,
                        Err(e) => self.console.error(&format!("Could not open browser: {}", e))?,
                    }
                }

                self.remember(
                    HistoryEntry::new(MEDICAL_BOARD_KEY)
                        .with_state(board.code)
                        .with_url(board.url),
                )
            }
            Err(e) => self.console.error(&reason(&e)),
        }
    }

    fn list_boards(&mut self) -> anyhow::Result<()> {
        let out = self.console.out();
        writeln!(
            out,
            "\n{}Medical Board Lookup URLs for All {} Jurisdictions:{}\n",
            ansi::CYAN,
            jurisdiction::count(),
            ansi::RESET
        )?;
        for board in jurisdiction::all() {
            writeln!(
                out,
                "{}{} - {:<20}{} {}",
                ansi::YELLOW,
                board.code,
                board.name,
                ansi::RESET,
                board.url
            )?;
        }
        self.console
            .info(&format!("Total: {} jurisdictions", jurisdiction::count()))
    }

    fn ethics_report(&mut self) -> anyhow::Result<()> {
        self.screen("Ethics Violation Reporting")?;
        let code = self.console.prompt("Enter state (2-letter code): ")?;

        match jurisdiction::lookup(&code) {
            Ok(board) => {
                let out = self.console.out();
                writeln!(
                    out,
                    "\n{}File a complaint with: {} Medical Board{}",
                    ansi::YELLOW,
                    board.name,
                    ansi::RESET
                )?;
                writeln!(out, "{}Board URL: {}{}\n", ansi::WHITE, board.url, ansi::RESET)?;
                self.console
                    .warning("IMPORTANT: This will direct you to the medical board's website.")?;
                self.console
                    .warning("Look for 'File a Complaint' or 'Report Misconduct' section.")?;

                if self.console.confirm("\nOpen medical board website?")? {
                    match self.app.open(board.url) {
                        Ok(()) => self.console.success("Browser opened successfully!")?,
                        Err(e) => self.console.error(&format!("Could not open browser: {}", e))?,
                    }
                    self.remember(
                        HistoryEntry::new(ETHICS_REPORT_KEY)
                            .with_state(board.code)
                            .with_url(board.url),
                    )?;
                }
            }
            Err(e) => self.console.error(&reason(&e))?,
        }
        self.console.pause()
    }

    fn category_search(&mut self, category: Category) -> anyhow::Result<()> {
        self.screen(category.title())?;
        let identity = self.ask_identity()?;
        self.run_category(&identity, category, Mode::Single)?;
        self.console.pause()
    }

    fn run_category(&mut self, identity: &DoctorIdentity, category: Category, mode: Mode) -> anyhow::Result<()> {
        let entries = self.app.category_search(identity, category);
        let width = entries
            .iter()
            .map(|e| e.platform.chars().count())
            .max()
            .unwrap_or(0);

        let out = self.console.out();
        if mode == Mode::Single {
            writeln!(
                out,
                "\n{}Searching {} {} for: {}{}\n",
                ansi::CYAN,
                entries.len(),
                category.sites_label(),
                identity.doctor_name,
                ansi::RESET
            )?;
        }
        for entry in &entries {
            writeln!(
                out,
                "{}{:<width$}{} {}",
                ansi::YELLOW,
                entry.platform,
                ansi::RESET,
                entry.url,
                width = width
            )?;
        }

        if mode == Mode::Single {
            if !category.highlights().is_empty() {
                writeln!(out)?;
                self.console.info("These databases show:")?;
                for line in category.highlights() {
                    writeln!(self.console.out(), "  • {}{}{}", ansi::WHITE, line, ansi::RESET)?;
                }
            }
            if category == Category::SpecialtyVerification && !identity.specialty.is_empty() {
                writeln!(
                    self.console.out(),
                    "\n{}Note: Searching for specialty: {}{}",
                    ansi::CYAN,
                    identity.specialty,
                    ansi::RESET
                )?;
            }
            if category == Category::AppointmentBooking {
                self.console
                    .warning("Note: Real-time availability varies by practice.")?;
            }
            if self.app.config.auto_open_browser
                && self
                    .console
                    .confirm(&format!("\nOpen all {}?", category.sites_label()))?
            {
                self.open_all(&entries)?;
            }
        }

        self.remember(
            HistoryEntry::new(category.key())
                .with_identity(identity)
                .with_entries(&entries),
        )
    }

    fn progress(&mut self, step: usize, total: usize, label: &str) -> anyhow::Result<()> {
        if self.app.config.show_progress {
            self.console.info(&format!("{}/{} - {}", step, total, label))?;
        }
        Ok(())
    }

    fn comprehensive_search(&mut self) -> anyhow::Result<()> {
        self.screen("Comprehensive Search")?;
        let identity = self.ask_identity()?;
        writeln!(self.console.out(), "\n{}Running all search modules...{}\n", ansi::CYAN, ansi::RESET)?;

        let total = Category::ALL.len() + 2;
        self.progress(1, total, "Running contact search...")?;
        self.run_contact(&identity, Mode::Sweep)?;
        self.progress(2, total, "Looking up medical board...")?;
        self.run_board(&identity.state, Mode::Sweep)?;
        for (idx, category) in Category::ALL.into_iter().enumerate() {
            self.progress(idx + 3, total, &format!("{}...", category.title()))?;
            self.run_category(&identity, category, Mode::Sweep)?;
        }

        writeln!(self.console.out(), "\n{}Comprehensive search completed!{}", ansi::GREEN, ansi::RESET)?;
        let summary = format!(
            "{} categories, {} resources",
            self.app.results.category_count(),
            self.app.results.total_entries()
        );
        self.console.info(&summary)?;

        if self.console.confirm("\nExport results?")? {
            self.export_results(&identity)?;
        }
        self.console.pause()
    }

    fn export_results(&mut self, identity: &DoctorIdentity) -> anyhow::Result<()> {
        match self.app.export_results(identity) {
            Ok(path) => self
                .console
                .success(&format!("Results exported to: {}", path.display())),
            Err(e) => {
                warn!(error = %e, "Export failed");
                self.console.error(&format!("Export failed: {}", e))
            }
        }
    }

    fn batch_processing(&mut self) -> anyhow::Result<()> {
        self.screen("Batch Processing")?;
        let out = self.console.out();
        writeln!(
            out,
            "{}Enter doctors to search (one per line, format: {}){}",
            ansi::CYAN,
            BATCH_FORMAT,
            ansi::RESET
        )?;
        writeln!(out, "{}Example: John Smith, Boston, MA, Cardiology{}", ansi::YELLOW, ansi::RESET)?;
        writeln!(out, "{}Enter a blank line when done:{}\n", ansi::YELLOW, ansi::RESET)?;

        let mut doctors = Vec::new();
        loop {
            let line = self.console.prompt(&format!("Doctor #{}: ", doctors.len() + 1))?;
            if line.is_empty() {
                break;
            }
            match doctordork_search::parse_batch_line(&line) {
                Ok(identity) => doctors.push(identity),
                Err(e) => self.console.error(&reason(&e))?,
            }
        }

        if doctors.is_empty() {
            self.console.warning("No doctors entered.")?;
            return self.console.pause();
        }

        writeln!(
            self.console.out(),
            "\n{}Processing {} doctor(s)...{}\n",
            ansi::GREEN,
            doctors.len(),
            ansi::RESET
        )?;
        for (idx, doctor) in doctors.iter().enumerate() {
            writeln!(
                self.console.out(),
                "{}Processing {}/{}: {}{}",
                ansi::CYAN,
                idx + 1,
                doctors.len(),
                doctor.doctor_name,
                ansi::RESET
            )?;
            self.run_contact(doctor, Mode::Sweep)?;
        }
        writeln!(self.console.out(), "\n{}Batch processing completed!{}", ansi::GREEN, ansi::RESET)?;

        if self.console.confirm("\nExport results?")? {
            match self.app.export_batch(&doctors) {
                Ok(path) => self
                    .console
                    .success(&format!("Batch results exported to: {}", path.display()))?,
                Err(e) => {
                    warn!(error = %e, "Batch export failed");
                    self.console.error(&format!("Export failed: {}", e))?;
                }
            }
        }
        self.console.pause()
    }

    fn save_settings(&mut self) -> anyhow::Result<()> {
        if let Err(e) = self.app.save_config() {
            warn!(error = %e, "Failed to save config");
            self.console.error(&format!("Could not save settings: {}", e))?;
        }
        Ok(())
    }

    fn settings(&mut self) -> anyhow::Result<()> {
        loop {
            self.screen("Settings")?;
            let config = &self.app.config;
            let out = self.console.out();
            writeln!(out, "{}Current Settings:{}", ansi::YELLOW, ansi::RESET)?;
            writeln!(out, "  1. Auto-open browser: {}", flag(config.auto_open_browser))?;
            writeln!(out, "  2. Export format: {}{}{}", ansi::CYAN, config.export_format, ansi::RESET)?;
            writeln!(out, "  3. Save history: {}", flag(config.save_history))?;
            writeln!(out, "  4. Show progress: {}", flag(config.show_progress))?;
            writeln!(out, "\n{}Actions:{}", ansi::YELLOW, ansi::RESET)?;
            writeln!(out, "  5. View search history")?;
            writeln!(out, "  6. Clear search history")?;
            writeln!(out, "  7. Reset to defaults")?;
            writeln!(out, "  8. Back to main menu")?;

            let choice = self.console.prompt("\nSelect option (1-8): ")?;
            match choice.as_str() {
                "1" => {
                    self.app.config.auto_open_browser = !self.app.config.auto_open_browser;
                    self.save_settings()?;
                }
                "2" => {
                    let formats: Vec<&str> = ExportFormat::ALL.iter().map(|f| f.as_str()).collect();
                    writeln!(
                        self.console.out(),
                        "\n{}Export formats: {}{}",
                        ansi::CYAN,
                        formats.join(", "),
                        ansi::RESET
                    )?;
                    let answer = self.console.prompt("Enter format: ")?;
                    match answer.parse::<ExportFormat>() {
                        Ok(format) => {
                            self.app.config.export_format = format;
                            self.save_settings()?;
                        }
                        Err(_) => {
                            self.console.error("Invalid format")?;
                            self.console.pause()?;
                        }
                    }
                }
                "3" => {
                    self.app.config.save_history = !self.app.config.save_history;
                    self.save_settings()?;
                }
                "4" => {
                    self.app.config.show_progress = !self.app.config.show_progress;
                    self.save_settings()?;
                }
                "5" => self.view_history()?,
                "6" => {
                    if self.console.confirm("Clear all history?")? {
                        match self.app.history.clear() {
                            Ok(()) => self.console.success("History cleared!")?,
                            Err(e) => self.console.error(&format!("Could not clear history: {}", e))?,
                        }
                        self.console.pause()?;
                    }
                }
                "7" => {
                    if self.console.confirm("Reset all settings?")? {
                        match self.app.reset_config() {
                            Ok(()) => self.console.success("Settings reset to defaults!")?,
                            Err(e) => self.console.error(&format!("Could not save settings: {}", e))?,
                        }
                        self.console.pause()?;
                    }
                }
                "8" => return Ok(()),
                _ => {
                    self.console.error("Invalid option. Please select 1-8.")?;
                    self.console.pause()?;
                }
            }
        }
    }

    fn view_history(&mut self) -> anyhow::Result<()> {
        self.screen("Search History")?;
        if self.app.history.is_empty() {
            self.console.info("No search history found.")?;
        } else {
            let lines: Vec<String> = self
                .app
                .history
                .recent(DEFAULT_RECENT)
                .into_iter()
                .map(history_cmd::describe)
                .collect();
            let out = self.console.out();
            writeln!(out, "{}Last {} searches:{}\n", ansi::CYAN, lines.len(), ansi::RESET)?;
            for (idx, line) in lines.iter().enumerate() {
                writeln!(out, "{}{}. {}{}", ansi::YELLOW, idx + 1, ansi::RESET, line)?;
            }
        }
        self.console.pause()
    }
}
