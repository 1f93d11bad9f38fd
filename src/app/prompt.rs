//! Rendering for the shared prompt views: option menus and the line input.

use super::{style, App};
use ratatui::text::{Line, Span, Text};

pub fn menu_view(app: &App) -> Text<'static> {
    let state = &app.prompt;
    let mut lines = vec![Line::from(""), Line::from(state.prompt.clone()), Line::from("")];
    for (i, option) in state.options.iter().enumerate() {
        if i == state.cursor {
            lines.push(Line::from(vec![
                Span::raw(style::CURSOR),
                Span::styled(option.clone(), style::highlight()),
            ]));
        } else {
            lines.push(Line::from(option.clone()));
        }
    }
    Text::from(lines)
}

pub fn text_input_view(app: &App) -> Text<'static> {
    let state = &app.input;
    let value_line = if state.value.is_empty() {
        Line::from(vec![
            Span::raw("> "),
            Span::styled(state.placeholder.clone(), style::number()),
        ])
    } else {
        Line::from(vec![
            Span::raw("> "),
            Span::raw(state.value.clone()),
            Span::styled("_", style::highlight()),
        ])
    };
    Text::from(vec![
        Line::from(state.prompt.clone()),
        Line::from(""),
        value_line,
        Line::from(""),
        Line::from(state.footer.clone()),
    ])
}
