//! Frame composition: the tree above, the status bar below.

use kpttree_core::{Config, KptProject};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;

use crate::app::App;
use crate::ui::statusbar::{render_statusbar, StatusBarProps};
use crate::ui::tree::render_tree;

/// Draws one frame.
pub fn render(f: &mut Frame, app: &App, project: &KptProject, config: &Config) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());

    render_tree(
        f,
        chunks[0],
        app,
        &config.ui.title,
        &config.theme,
        config.ui.show_icons,
    );

    let props = StatusBarProps {
        row_count: app.rows().len(),
        selected_index: app.selected(),
        selected_path: app.selected_row().map(|row| row.path()),
        scan_root: project.anchor().map(|anchor| anchor.scan_root()),
        watching: project.is_watching(),
        status_message: app.status_message(),
    };
    render_statusbar(f, chunks[1], &props, &config.theme);
}
