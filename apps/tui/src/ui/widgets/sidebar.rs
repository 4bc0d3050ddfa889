use super::map::category_color;
use super::scroll::{scroll_offset, truncate};
use crate::app::{App, Focus};
use crate::ui::text_alignment;
use neighborhood_map_core::{LocationId, SidebarView};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

/// One drawn row and the sidebar item it belongs to, if any.
struct SidebarRow {
    line: TextLine<'static>,
    item: Option<usize>,
}

fn build_rows(
    view: &SidebarView,
    selected: usize,
    is_highlighted: impl Fn(LocationId) -> bool,
    width: usize,
) -> Vec<SidebarRow> {
    let mut rows = Vec::new();
    let mut index = 0;

    for group in view.groups() {
        if !rows.is_empty() {
            rows.push(SidebarRow {
                line: TextLine::from(""),
                item: None,
            });
        }
        rows.push(SidebarRow {
            line: TextLine::from(Span::styled(
                truncate(&group.heading, width),
                Style::default()
                    .fg(category_color(group.category))
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )),
            item: None,
        });

        for item in &group.items {
            let title_style = if index == selected {
                Style::default()
                    .bg(Color::Rgb(0, 0, 238))
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else if is_highlighted(item.id) {
                Style::default()
                    .bg(Color::Yellow)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            rows.push(SidebarRow {
                line: TextLine::from(Span::styled(truncate(&item.title, width), title_style)),
                item: Some(index),
            });
            rows.push(SidebarRow {
                line: TextLine::from(Span::styled(
                    truncate(&item.summary, width),
                    Style::default().fg(Color::Gray),
                )),
                item: Some(index),
            });
            index += 1;
        }
    }
    rows
}

pub fn render_sidebar(app: &App, f: &mut Frame<'_>, area: Rect) {
    let strings = app.controller.strings();
    let direction = app.controller.direction();
    let view = app.controller.sidebar();
    let focused = app.focus == Focus::Sidebar;

    let block = Block::default()
        .title(Span::styled(
            format!(" {} ({}) ", strings.sidebar_title, view.item_count()),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ))
        .title_alignment(text_alignment(direction))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused {
            Color::Yellow
        } else {
            Color::DarkGray
        }));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let placeholder = match view {
        SidebarView::Pending => Some("…".to_string()),
        SidebarView::NoResults { message } => Some(message.clone()),
        SidebarView::Groups(_) => None,
    };
    if let Some(message) = placeholder {
        let paragraph = Paragraph::new(message)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, inner);
        return;
    }

    let rows = build_rows(
        view,
        app.selected_index,
        |id| app.controller.is_highlighted(id),
        inner.width as usize,
    );
    // keep the summary line of the selected item on screen
    let selected_row = rows
        .iter()
        .rposition(|row| row.item == Some(app.selected_index))
        .unwrap_or(0);
    let visible_rows = inner.height as usize;
    let offset = scroll_offset(rows.len(), visible_rows, selected_row);

    let lines: Vec<TextLine<'static>> = rows
        .into_iter()
        .skip(offset)
        .take(visible_rows)
        .map(|row| row.line)
        .collect();

    f.render_widget(
        Paragraph::new(Text::from(lines)).alignment(text_alignment(direction)),
        inner,
    );
}
