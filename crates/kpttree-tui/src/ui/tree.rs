//! Tree list rendering with theme support.
//!
//! Rows are drawn as a scrollable `List`: indentation by depth, a
//! disclosure marker for directories, an optional Nerd Font icon and the
//! node's label.

use kpttree_core::config::theme::{parse_color, Theme};
use kpttree_core::{Glyph, TreeItem, MANIFEST_RELATIVE_PATH};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::{App, Row};
use crate::icons::{disclosure, icon_for_glyph};

/// Renders the tree, or a placeholder when there is nothing to show.
pub fn render_tree(f: &mut Frame, area: Rect, app: &App, title: &str, theme: &Theme, show_icons: bool) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title.to_owned())
        .border_style(Style::default().fg(parse_color(&theme.border_fg)));

    if app.rows().is_empty() {
        let text = placeholder_text(app.has_root());
        let paragraph = Paragraph::new(Line::from(Span::styled(
            text,
            Style::default().add_modifier(Modifier::ITALIC),
        )))
        .block(block);
        f.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = app
        .rows()
        .iter()
        .map(|row| ListItem::new(row_line(row, theme, show_icons)))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::REVERSED)
                .fg(parse_color(&theme.selected_fg)),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(app.selected()));
    f.render_stateful_widget(list, area, &mut state);
}

fn placeholder_text(has_root: bool) -> String {
    if has_root {
        "No kpt resources".to_string()
    } else {
        format!("No Kptfile at {MANIFEST_RELATIVE_PATH}")
    }
}

fn row_line(row: &Row, theme: &Theme, show_icons: bool) -> Line<'static> {
    let presentation = row.node().presentation();
    let indent = "  ".repeat(row.depth());
    let marker = disclosure(row.is_dir(), row.is_expanded());
    let icon = if show_icons {
        icon_for_glyph(presentation.glyph)
    } else {
        ""
    };

    Line::from(vec![
        Span::raw(format!("{indent}{marker}")),
        Span::styled(
            format!("{icon}{}", presentation.label),
            glyph_style(presentation.glyph, theme),
        ),
    ])
}

fn glyph_style(glyph: Glyph, theme: &Theme) -> Style {
    match glyph {
        Glyph::Folder => Style::default()
            .fg(parse_color(&theme.dir_fg))
            .add_modifier(Modifier::BOLD),
        Glyph::Kptfile => Style::default().fg(parse_color(&theme.kptfile_fg)),
        Glyph::Yaml | Glyph::File => Style::default().fg(parse_color(&theme.file_fg)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kpttree_core::{CacheRegistry, KptProject};
    use ratatui::backend::TestBackend;
    use ratatui::style::Color;
    use ratatui::Terminal;
    use std::fs;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn kpt_project(files: &[&str]) -> TempDir {
        let tmp = TempDir::new().unwrap();
        let scan_root = tmp.path().join("infra/kpt");
        fs::create_dir_all(&scan_root).unwrap();
        fs::write(tmp.path().join(MANIFEST_RELATIVE_PATH), "").unwrap();
        for file in files {
            let path = scan_root.join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "").unwrap();
        }
        tmp
    }

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn placeholder_names_manifest_path() {
        assert_eq!(placeholder_text(false), "No Kptfile at infra/kpt/Kptfile");
        assert_eq!(placeholder_text(true), "No kpt resources");
    }

    #[test]
    fn row_line_indents_and_marks_directories() {
        let tmp = kpt_project(&["base/svc.yaml"]);
        let project = KptProject::open_static(tmp.path(), Arc::new(CacheRegistry::new()));
        let app = App::new(project.root_node()).with_expand();
        let theme = Theme::default();

        let lines: Vec<String> = app
            .rows()
            .iter()
            .map(|row| line_text(&row_line(row, &theme, false)))
            .collect();
        assert_eq!(lines, vec!["\u{25be} base", "    svc.yaml"]);
    }

    #[test]
    fn row_line_with_icons() {
        let tmp = kpt_project(&["pkg/Kptfile"]);
        let project = KptProject::open_static(tmp.path(), Arc::new(CacheRegistry::new()));
        let app = App::new(project.root_node()).with_expand();
        assert_eq!(app.rows().len(), 2);
        let line = row_line(&app.rows()[1], &Theme::default(), true);
        assert!(line_text(&line).ends_with(&format!("{}Kptfile", icon_for_glyph(Glyph::Kptfile))));
    }

    #[test]
    fn glyph_styles_follow_theme() {
        let theme = Theme::default();
        let dir = glyph_style(Glyph::Folder, &theme);
        assert_eq!(dir.fg, Some(Color::Blue));
        assert!(dir.add_modifier.contains(Modifier::BOLD));
        assert_eq!(glyph_style(Glyph::Kptfile, &theme).fg, Some(Color::Magenta));
        assert_eq!(glyph_style(Glyph::Yaml, &theme).fg, Some(Color::Reset));
    }

    #[test]
    fn renders_placeholder_without_manifest() {
        let app = App::new(None);
        let mut terminal = Terminal::new(TestBackend::new(60, 5)).unwrap();
        terminal
            .draw(|f| render_tree(f, f.area(), &app, "Kpt Packages", &Theme::default(), false))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Kpt Packages"));
        assert!(text.contains("No Kptfile at infra/kpt/Kptfile"));
    }

    #[test]
    fn renders_rows() {
        let tmp = kpt_project(&["a.yaml", "b.txt"]);
        let project = KptProject::open_static(tmp.path(), Arc::new(CacheRegistry::new()));
        let app = App::new(project.root_node());
        let mut terminal = Terminal::new(TestBackend::new(40, 5)).unwrap();
        terminal
            .draw(|f| render_tree(f, f.area(), &app, "Kpt Packages", &Theme::default(), false))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("a.yaml"));
        assert!(!text.contains("b.txt"));
    }
}
