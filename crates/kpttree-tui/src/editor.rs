//! Opening files in an external editor from inside the TUI.

use std::io;
use std::path::Path;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use kpttree_core::{CoreError, CoreResult, EditorOpener};
use ratatui::{backend::CrosstermBackend, Terminal};

/// Suspends the terminal, runs the editor on the file and restores the
/// terminal afterwards, whatever the editor's outcome.
pub struct TerminalEditor<'a> {
    terminal: &'a mut Terminal<CrosstermBackend<io::Stdout>>,
    command: String,
}

impl<'a> TerminalEditor<'a> {
    pub fn new(terminal: &'a mut Terminal<CrosstermBackend<io::Stdout>>, command: String) -> Self {
        Self { terminal, command }
    }

    fn suspend(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()
    }

    fn resume(&mut self) -> io::Result<()> {
        execute!(self.terminal.backend_mut(), EnterAlternateScreen)?;
        enable_raw_mode()?;
        self.terminal.hide_cursor()?;
        self.terminal.clear()
    }
}

impl EditorOpener for TerminalEditor<'_> {
    fn open(&mut self, path: &Path) -> CoreResult<()> {
        self.suspend()?;
        let status = editor_command(&self.command, path).status();
        self.resume()?;

        match status {
            Ok(s) if s.success() => Ok(()),
            Ok(s) => Err(CoreError::Editor(format!("{} exited with {s}", self.command))),
            Err(e) => Err(CoreError::Editor(format!("failed to launch {}: {e}", self.command))),
        }
    }
}

/// Builds the editor process. The configured command may carry arguments
/// (`"code --wait"`); the file path is appended last.
fn editor_command(command: &str, path: &Path) -> std::process::Command {
    let mut parts = command.split_whitespace();
    let program = parts.next().unwrap_or("vi");
    let mut cmd = std::process::Command::new(program);
    cmd.args(parts).arg(path);
    cmd
}
