use super::map::category_color;
use super::popup::{corner_rect, ClearWidget};
use crate::ui::text_alignment;
use neighborhood_map_core::{Category, TextDirection, UiStrings};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

/// Category swatches in the bottom corner of the map, on the side the
/// reading direction starts from.
pub fn render_legend(
    f: &mut Frame<'_>,
    map_area: Rect,
    strings: &UiStrings,
    direction: TextDirection,
) {
    let label_width = Category::ALL
        .iter()
        .map(|category| strings.category(*category).chars().count())
        .chain(std::iter::once(strings.legend_title.chars().count()))
        .max()
        .unwrap_or_default();
    let width = u16::try_from(label_width + 6).unwrap_or(u16::MAX);
    #[allow(clippy::cast_possible_truncation)]
    let height = Category::ALL.len() as u16 + 2;

    if map_area.width < width + 2 || map_area.height < height + 2 {
        return;
    }

    let inner_map = Rect {
        x: map_area.x + 1,
        y: map_area.y + 1,
        width: map_area.width - 2,
        height: map_area.height - 2,
    };
    let area = corner_rect(inner_map, width, height, direction.is_rtl());

    let lines: Vec<TextLine<'_>> = Category::ALL
        .iter()
        .map(|category| {
            let swatch = Span::styled("●", Style::default().fg(category_color(*category)));
            let label = Span::raw(strings.category(*category));
            if direction.is_rtl() {
                TextLine::from(vec![label, Span::raw(" "), swatch])
            } else {
                TextLine::from(vec![swatch, Span::raw(" "), label])
            }
        })
        .collect();

    let block = Block::default()
        .title(Span::styled(
            strings.legend_title,
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    f.render_widget(ClearWidget, area);
    f.render_widget(
        Paragraph::new(Text::from(lines))
            .block(block)
            .alignment(text_alignment(direction)),
        area,
    );
}
