use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::Command;

use crate::error::AppError;
use crate::export::PreviewTable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerChoice {
    DefaultApp,
    TextEditor,
    Preview,
    DontOpen,
    /// Anything else the user typed. Handled like `DontOpen`.
    Invalid(String),
}

impl ViewerChoice {
    pub fn parse(input: &str) -> Self {
        match input.trim() {
            "1" => ViewerChoice::DefaultApp,
            "2" => ViewerChoice::TextEditor,
            "3" => ViewerChoice::Preview,
            "4" => ViewerChoice::DontOpen,
            other => ViewerChoice::Invalid(other.to_string()),
        }
    }
}

/// OS side effects of the viewer menu.
pub trait Launcher {
    fn open_default(&self, path: &Path) -> io::Result<()>;
    fn open_editor(&self, path: &Path) -> io::Result<()>;
}

/// Hands files to the platform opener or the user's editor.
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn open_default(&self, path: &Path) -> io::Result<()> {
        open::that_detached(path)
    }

    fn open_editor(&self, path: &Path) -> io::Result<()> {
        let configured = std::env::var("VISUAL").or_else(|_| std::env::var("EDITOR")).ok();
        let (program, args) = editor_command(configured.as_deref());
        let status = Command::new(&program).args(&args).arg(path).status()?;
        if !status.success() {
            log::warn!("{} exited with {}", program, status);
        }
        Ok(())
    }
}

/// Splits an `$EDITOR`-style value such as `code -w` into program and arguments.
/// Unset or blank values fall back to the platform editor.
pub fn editor_command(configured: Option<&str>) -> (String, Vec<String>) {
    let mut words = configured.unwrap_or_default().split_whitespace();
    match words.next() {
        Some(program) => (program.to_string(), words.map(String::from).collect()),
        None if cfg!(target_os = "windows") => ("notepad".to_string(), Vec::new()),
        None => ("vi".to_string(), Vec::new()),
    }
}

/// Presents the completion options once the report is on disk and runs the selected action.
pub trait CompletionPrompt {
    fn present(&mut self, file: &Path, preview: &PreviewTable) -> Result<ViewerChoice, AppError>;
}

/// Menu on a text terminal. `answer` skips reading from `input`.
pub struct TerminalPrompt<R, W, L> {
    input: R,
    output: W,
    launcher: L,
    answer: Option<String>,
}

impl<R: BufRead, W: Write, L: Launcher> TerminalPrompt<R, W, L> {
    pub fn new(input: R, output: W, launcher: L) -> Self {
        Self {
            input,
            output,
            launcher,
            answer: None,
        }
    }

    pub fn with_answer(mut self, answer: Option<String>) -> Self {
        self.answer = answer;
        self
    }

    fn read_choice(&mut self) -> Result<ViewerChoice, AppError> {
        writeln!(self.output, "\nChoose how to open the file:")?;
        writeln!(self.output, "1 - Default application")?;
        writeln!(self.output, "2 - Text editor")?;
        writeln!(self.output, "3 - Print the first rows here")?;
        writeln!(self.output, "4 - Don't open the file")?;
        write!(self.output, "Enter 1, 2, 3 or 4: ")?;
        self.output.flush()?;

        let line = match self.answer.take() {
            Some(a) => {
                writeln!(self.output, "{}", a)?;
                a
            }
            None => {
                let mut buf = String::new();
                self.input.read_line(&mut buf)?;
                buf
            }
        };
        Ok(ViewerChoice::parse(&line))
    }

    fn report_launch(&mut self, result: io::Result<()>, file: &Path) -> Result<(), AppError> {
        if let Err(e) = result {
            log::warn!("viewer launch failed for {}: {}", file.display(), e);
            writeln!(
                self.output,
                "Could not open {} ({}). The file is saved.",
                file.display(),
                e
            )?;
        }
        Ok(())
    }
}

impl<R: BufRead, W: Write, L: Launcher> CompletionPrompt for TerminalPrompt<R, W, L> {
    fn present(&mut self, file: &Path, preview: &PreviewTable) -> Result<ViewerChoice, AppError> {
        let choice = self.read_choice()?;
        log::debug!("viewer choice: {:?}", choice);

        match &choice {
            ViewerChoice::DefaultApp => {
                let result = self.launcher.open_default(file);
                self.report_launch(result, file)?;
            }
            ViewerChoice::TextEditor => {
                let result = self.launcher.open_editor(file);
                self.report_launch(result, file)?;
            }
            ViewerChoice::Preview => {
                write!(self.output, "{}", render_preview(preview))?;
            }
            ViewerChoice::DontOpen => {
                writeln!(
                    self.output,
                    "You do not wish to open the file {}. Saved but not opened",
                    file.display()
                )?;
            }
            ViewerChoice::Invalid(_) => {
                writeln!(
                    self.output,
                    "Invalid choice. {} saved but not opened",
                    file.display()
                )?;
            }
        }

        Ok(choice)
    }
}

/// Left-aligned text table with a row index column.
pub fn render_preview(table: &PreviewTable) -> String {
    let index_width = table.rows.len().saturating_sub(1).to_string().len();
    let mut widths: Vec<usize> = table.headers.iter().map(|h| h.chars().count()).collect();
    for row in &table.rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let line = |index: &str, cells: &[String]| -> String {
        let mut out = format!("{:>width$}", index, width = index_width);
        for (cell, w) in cells.iter().zip(&widths) {
            out.push_str("  ");
            out.push_str(&format!("{:<width$}", cell, width = *w));
        }
        out.trim_end().to_string() + "\n"
    };

    let mut out = line("", &table.headers);
    for (i, row) in table.rows.iter().enumerate() {
        out.push_str(&line(&i.to_string(), row));
    }
    out
}
