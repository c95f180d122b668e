//! Status bar rendering.
//!
//! The status bar occupies a single row at the bottom of the terminal and
//! shows the cursor position, the selected node's path relative to the
//! package, whether changes are being watched, and an optional message.

use std::path::Path;

use kpttree_core::config::theme::{parse_color, Theme};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Data needed to render the status bar.
pub struct StatusBarProps<'a> {
    pub row_count: usize,
    pub selected_index: usize,
    pub selected_path: Option<&'a Path>,
    pub scan_root: Option<&'a Path>,
    pub watching: bool,
    pub status_message: Option<&'a str>,
}

pub fn render_statusbar(f: &mut Frame, area: Rect, props: &StatusBarProps<'_>, theme: &Theme) {
    let fg = parse_color(&theme.status_fg);

    let line = Line::from(vec![
        Span::styled(
            position_text(props.row_count, props.selected_index),
            Style::default().fg(fg).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            selection_text(props.selected_path, props.scan_root),
            Style::default().fg(fg),
        ),
        Span::styled(
            if props.watching { "" } else { "  [no auto-refresh]" },
            Style::default().fg(fg).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            props
                .status_message
                .map(|msg| format!("  {msg}"))
                .unwrap_or_default(),
            Style::default().fg(fg).add_modifier(Modifier::ITALIC),
        ),
    ]);

    f.render_widget(Paragraph::new(line), area);
}

fn position_text(row_count: usize, selected_index: usize) -> String {
    if row_count > 0 {
        format!(" {}/{}", selected_index + 1, row_count)
    } else {
        " 0/0".to_owned()
    }
}

fn selection_text(selected: Option<&Path>, scan_root: Option<&Path>) -> String {
    let Some(selected) = selected else {
        return String::new();
    };
    let shown = scan_root
        .and_then(|root| selected.strip_prefix(root).ok())
        .unwrap_or(selected);
    format!("  {}", shown.display())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn position_is_one_based() {
        assert_eq!(position_text(3, 0), " 1/3");
        assert_eq!(position_text(3, 2), " 3/3");
    }

    #[test]
    fn position_when_empty() {
        assert_eq!(position_text(0, 0), " 0/0");
    }

    #[test]
    fn selection_is_relative_to_scan_root() {
        let root = PathBuf::from("/p/infra/kpt");
        let selected = root.join("base/svc.yaml");
        assert_eq!(
            selection_text(Some(&selected), Some(&root)),
            format!("  {}", Path::new("base/svc.yaml").display())
        );
    }

    #[test]
    fn selection_outside_root_is_absolute() {
        let selected = PathBuf::from("/elsewhere/a.yaml");
        let root = PathBuf::from("/p/infra/kpt");
        assert_eq!(
            selection_text(Some(&selected), Some(&root)),
            "  /elsewhere/a.yaml"
        );
    }

    #[test]
    fn no_selection_is_blank() {
        assert_eq!(selection_text(None, None), "");
    }
}
