use crate::app::App;
use crate::ui::text_alignment;
use crate::ui::widgets::map::category_color;
use crate::ui::widgets::popup::{centered_rect, ClearWidget};
use neighborhood_map_core::popup::Popup;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

/// Popup of the open marker, drawn over the map like the web popup.
pub fn render_location_popup(app: &App, f: &mut Frame<'_>) {
    let layer = app.controller.map();
    let Some(popup) = layer.open_popup_content() else {
        return;
    };
    let color = layer
        .open_marker()
        .and_then(|id| layer.marker(id))
        .map_or(Color::White, |marker| category_color(marker.icon.category));

    let area = centered_rect(60, 70, f.area());
    f.render_widget(ClearWidget, area);

    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", popup.title),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .title_alignment(text_alignment(popup.direction()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    let paragraph = Paragraph::new(Text::from(popup_lines(popup, color)))
        .block(block)
        .alignment(text_alignment(popup.direction()))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn popup_lines(popup: &Popup, color: Color) -> Vec<TextLine<'static>> {
    let mut lines = vec![
        TextLine::from(Span::styled(
            popup.category_label.clone(),
            Style::default().fg(color).add_modifier(Modifier::ITALIC),
        )),
        TextLine::from(Span::styled(
            format!("[{}]", popup.image),
            Style::default().fg(Color::DarkGray),
        )),
        TextLine::from(""),
        TextLine::from(popup.description.clone()),
        TextLine::from(""),
    ];

    for (label, value) in popup.plain_details() {
        lines.push(TextLine::from(vec![
            Span::styled(
                format!("{label}: "),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(value),
        ]));
    }

    lines.push(TextLine::from(""));
    lines.push(TextLine::from(Span::styled(
        popup.footer.clone(),
        Style::default().fg(Color::Gray),
    )));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use neighborhood_map_core::popup::AnyAsset;
    use neighborhood_map_core::{Catalog, Language};

    #[test]
    fn details_are_flattened_for_the_terminal() {
        let catalog = Catalog::embedded().expect("embedded catalog");
        let record = catalog.get(3).expect("connext");
        let popup = Popup::build(record, Language::En, &AnyAsset);
        let lines = popup_lines(&popup, Color::White);

        let rendered: Vec<String> = lines.iter().map(ToString::to_string).collect();
        assert_eq!(rendered[0], "Telecom");
        assert!(rendered.iter().any(|line| line.contains("<https://connext-lb.net/>")));
        assert!(!rendered.iter().any(|line| line.contains("<a ")));
        assert_eq!(rendered.last().map(String::as_str), Some("Click outside to close"));
    }
}
