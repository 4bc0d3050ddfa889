use crate::app::{App, Focus};
use crate::ui::text_alignment;
use crate::ui::widgets::legend::render_legend;
use crate::ui::widgets::map::{category_color, render_map};
use crate::ui::widgets::popup::{centered_rect, ClearWidget};
use crate::ui::widgets::sidebar::render_sidebar;
use neighborhood_map_core::{CategoryFilter, Language, TextDirection};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub fn render_main(app: &App, f: &mut Frame<'_>) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Title area
            Constraint::Length(3), // Search and filter
            Constraint::Min(8),    // Sidebar and map
            Constraint::Length(1), // Credits and status
            Constraint::Length(1), // Shortcuts hint
        ])
        .split(f.area());

    render_header(app, f, layout[0]);
    render_controls(app, f, layout[1]);
    render_body(app, f, layout[2]);
    render_footer(app, f, layout[3]);
    render_shortcuts(f, layout[4]);
}

fn render_header(app: &App, f: &mut Frame<'_>, area: Rect) {
    let strings = app.controller.strings();
    let direction = app.controller.direction();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(if direction.is_rtl() {
            [Constraint::Length(22), Constraint::Min(20)]
        } else {
            [Constraint::Min(20), Constraint::Length(22)]
        })
        .split(inner);
    let (text_area, switch_area) = if direction.is_rtl() {
        (chunks[1], chunks[0])
    } else {
        (chunks[0], chunks[1])
    };

    let title = Paragraph::new(Text::from(vec![
        TextLine::from(Span::styled(
            strings.title,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        TextLine::from(Span::styled(
            strings.subtitle,
            Style::default().fg(Color::Gray),
        )),
    ]))
    .alignment(text_alignment(direction));
    f.render_widget(title, text_area);

    f.render_widget(
        Paragraph::new(language_switch(app.controller.language())).alignment(Alignment::Center),
        switch_area,
    );
}

fn language_switch(active: Language) -> TextLine<'static> {
    let mut spans = Vec::new();
    for (index, language) in Language::ALL.into_iter().enumerate() {
        if index > 0 {
            spans.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
        }
        let style = if language == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} ", language.native_name()), style));
    }
    TextLine::from(spans)
}

fn render_controls(app: &App, f: &mut Frame<'_>, area: Rect) {
    let strings = app.controller.strings();
    let direction = app.controller.direction();

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(if direction.is_rtl() {
            [Constraint::Percentage(40), Constraint::Percentage(60)]
        } else {
            [Constraint::Percentage(60), Constraint::Percentage(40)]
        })
        .split(area);
    let (search_area, filter_area) = if direction.is_rtl() {
        (chunks[1], chunks[0])
    } else {
        (chunks[0], chunks[1])
    };

    let searching = app.focus == Focus::Search;
    let input = app.controller.search_input();
    let mut spans = if input.is_empty() && !searching {
        vec![Span::styled(
            strings.search_placeholder,
            Style::default().fg(Color::DarkGray),
        )]
    } else {
        vec![Span::styled(
            input.to_string(),
            Style::default().fg(Color::White),
        )]
    };
    if searching {
        spans.push(Span::styled("▌", Style::default().fg(Color::Green)));
    }
    if app.controller.is_search_pending() {
        spans.push(Span::styled(" …", Style::default().fg(Color::DarkGray)));
    }

    let search = Paragraph::new(TextLine::from(spans))
        .alignment(text_alignment(direction))
        .block(
            Block::default()
                .title(" / ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(if searching {
                    Color::Green
                } else {
                    Color::DarkGray
                })),
        );
    f.render_widget(search, search_area);

    let filter = app.controller.state().category_filter();
    let filter_style = match filter {
        CategoryFilter::All => Style::default().fg(Color::White),
        CategoryFilter::Only(category) => Style::default()
            .fg(category_color(category))
            .add_modifier(Modifier::BOLD),
    };
    let (before, after) = arrows(direction);
    let filter_line = TextLine::from(vec![
        Span::styled(before, Style::default().fg(Color::DarkGray)),
        Span::styled(filter.label(strings), filter_style),
        Span::styled(after, Style::default().fg(Color::DarkGray)),
    ]);
    f.render_widget(
        Paragraph::new(filter_line)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(
                Style::default().fg(Color::DarkGray),
            )),
        filter_area,
    );
}

const fn arrows(direction: TextDirection) -> (&'static str, &'static str) {
    match direction {
        TextDirection::Ltr => ("◀ ", " ▶"),
        TextDirection::Rtl => ("▶ ", " ◀"),
    }
}

fn render_body(app: &App, f: &mut Frame<'_>, area: Rect) {
    let direction = app.controller.direction();
    let strings = app.controller.strings();

    if app.sidebar_collapsed {
        render_map(app, f, area);
        render_legend(f, area, strings, direction);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(if direction.is_rtl() {
            [Constraint::Percentage(65), Constraint::Percentage(35)]
        } else {
            [Constraint::Percentage(35), Constraint::Percentage(65)]
        })
        .split(area);
    let (sidebar_area, map_area) = if direction.is_rtl() {
        (chunks[1], chunks[0])
    } else {
        (chunks[0], chunks[1])
    };

    render_sidebar(app, f, sidebar_area);
    render_map(app, f, map_area);
    render_legend(f, map_area, strings, direction);
}

fn render_footer(app: &App, f: &mut Frame<'_>, area: Rect) {
    let strings = app.controller.strings();
    let direction = app.controller.direction();

    let mut spans = vec![
        Span::styled(strings.credit_line(), Style::default().fg(Color::DarkGray)),
        Span::raw("  "),
        Span::styled(
            format!("{} {}", strings.last_updated, app.last_updated),
            Style::default().fg(Color::DarkGray),
        ),
    ];
    if !app.status_message.is_empty() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            app.status_message.clone(),
            Style::default().fg(Color::Yellow),
        ));
    }

    f.render_widget(
        Paragraph::new(TextLine::from(spans)).alignment(text_alignment(direction)),
        area,
    );
}

fn render_shortcuts(f: &mut Frame<'_>, area: Rect) {
    let key = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let hint = TextLine::from(vec![
        Span::styled("/", key),
        Span::raw(": Search  "),
        Span::styled("←/→", key),
        Span::raw(": Category  "),
        Span::styled("l", key),
        Span::raw(": Language  "),
        Span::styled("Tab", key),
        Span::raw(": Map/List  "),
        Span::styled("Enter", key),
        Span::raw(": Show  "),
        Span::styled("F1", key),
        Span::raw(": Help  "),
        Span::styled("q", key),
        Span::raw(": Quit"),
    ]);
    f.render_widget(
        Paragraph::new(hint).style(Style::default().fg(Color::Gray)),
        area,
    );
}

pub fn render_help_popup(_app: &App, f: &mut Frame<'_>) {
    let popup_area = centered_rect(70, 80, f.area());
    f.render_widget(ClearWidget, popup_area);

    let help_block = Block::default()
        .title("== Help & Keyboard Shortcuts ==")
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let help_paragraph = Paragraph::new(Text::from(build_help_lines()))
        .block(help_block)
        .wrap(Wrap { trim: true });
    f.render_widget(help_paragraph, popup_area);

    let hint_area = popup_area.inner(Margin::new(1, 1));
    let hint_area = Rect {
        y: hint_area.y + hint_area.height.saturating_sub(1),
        height: 1,
        ..hint_area
    };
    f.render_widget(
        Paragraph::new(Span::styled(
            "Press F1 or Esc to close",
            Style::default().fg(Color::Gray),
        ))
        .alignment(Alignment::Center),
        hint_area,
    );
}

fn build_help_lines() -> Vec<TextLine<'static>> {
    let section = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let key = Style::default().fg(Color::Yellow);

    let entry = |keys: &'static str, action: &'static str| {
        TextLine::from(vec![
            Span::styled(format!("  {keys:<14}"), key),
            Span::raw(action),
        ])
    };

    vec![
        TextLine::from(Span::styled("Anywhere", section)),
        entry("F1", "Toggle this help"),
        entry("/", "Search by name or description"),
        entry("l / e / a", "Toggle language / English / Arabic"),
        entry("[ / ]", "Previous / next category"),
        entry("Tab", "Switch between list and map"),
        entry("s", "Collapse or expand the list"),
        entry("Esc", "Close the open popup"),
        entry("q", "Quit"),
        TextLine::from(""),
        TextLine::from(Span::styled("List", section)),
        entry("↑/↓", "Move selection"),
        entry("PgUp/PgDn", "Jump 5 places"),
        entry("Home/End", "First / last place"),
        entry("←/→", "Previous / next category"),
        entry("Enter", "Fly to the place and open its popup"),
        TextLine::from(""),
        TextLine::from(Span::styled("Map", section)),
        entry("Arrows", "Pan"),
        entry("+ / -", "Zoom in / out"),
        entry("n / N", "Next / previous marker"),
        TextLine::from(""),
        TextLine::from(Span::styled("Search", section)),
        entry("Enter", "Apply now and return to the list"),
        entry("Esc", "Clear the search"),
    ]
}
