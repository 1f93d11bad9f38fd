//! Article picker: two pages of the front page, toggle-select, checkout.

use super::{is_quit, style, App, View};
use crate::bytemark;
use crate::hackernews::{self, FRONT_PAGE_SIZE};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::text::{Line, Span, Text};

/// Articles shown per page; the row after the last one is the checkout row.
pub const PAGE_SIZE: usize = FRONT_PAGE_SIZE / 2;

/// Visible index window for the current page. `to` is the checkout row.
fn page_bounds(page: usize) -> (usize, usize) {
    let from = page * PAGE_SIZE;
    (from, from + PAGE_SIZE)
}

pub fn update(app: &mut App, key: KeyEvent) -> Result<()> {
    if is_quit(&key) {
        app.should_quit = true;
        return Ok(());
    }
    let state = &mut app.articles;
    let (from, to) = page_bounds(state.page);

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            if state.cursor > from {
                state.cursor -= 1;
            }
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.cursor < to {
                state.cursor += 1;
            }
        }
        KeyCode::Right | KeyCode::Char('l') => {
            if state.page == 0 {
                state.page = 1;
                state.cursor = PAGE_SIZE;
            }
        }
        KeyCode::Left | KeyCode::Char('h') => {
            if state.page == 1 {
                state.page = 0;
                state.cursor = 0;
            }
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            if state.cursor < to {
                if state.selected.contains(&state.cursor) {
                    state.selected.remove(&state.cursor);
                } else {
                    state.selected.insert(state.cursor);
                }
            } else {
                checkout(app)?;
            }
        }
        _ => {}
    }
    Ok(())
}

/// Serialize the selected articles and write them to the session target.
fn checkout(app: &mut App) -> Result<()> {
    let mut indices: Vec<usize> = app.articles.selected.iter().copied().collect();
    indices.sort_unstable();

    let records: Vec<_> = indices
        .iter()
        .filter_map(|&i| app.articles.articles.get(i))
        .map(hackernews::article_to_bytemark)
        .collect();
    let output = bytemark::bytemarks_to_tables(&records);
    let written_to = app.write_output(&output)?;

    app.prompt.set(
        format!("{} articles written to {}.", records.len(), written_to),
        &["Continue", "Quit"],
    );
    app.view = View::ArticlesAdded;
    Ok(())
}

pub fn view(app: &App) -> Text<'static> {
    let state = &app.articles;
    let (from, to) = page_bounds(state.page);

    let mut lines = vec![
        Line::from(Span::styled(
            format!("Top {FRONT_PAGE_SIZE} on HackerNews"),
            style::header(),
        )),
        Line::from(""),
        Line::from(format!(
            "Articles {}-{} (arrow keys/hjkl to navigate):",
            from + 1,
            to
        )),
    ];

    for i in from..to.min(state.articles.len()) {
        let article = &state.articles[i];
        let mut spans = Vec::new();
        if i == state.cursor {
            spans.push(Span::raw(style::CURSOR));
            spans.push(Span::styled(format!("{}", i + 1), style::number()));
        } else {
            spans.push(Span::raw(format!("{}", i + 1)));
        }
        spans.push(Span::raw(". "));
        if state.selected.contains(&i) {
            spans.push(Span::styled(article.title.clone(), style::selected()));
        } else {
            spans.push(Span::raw(article.title.clone()));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(""));
    let mut checkout_spans = Vec::new();
    if state.cursor == to {
        checkout_spans.push(Span::raw(style::CURSOR));
    }
    checkout_spans.push(Span::styled(
        format!("{}", state.selected.len()),
        style::number(),
    ));
    checkout_spans.push(Span::raw(" articles selected. "));
    if state.cursor == to {
        checkout_spans.push(Span::styled("Proceed?", style::highlight()));
    } else {
        checkout_spans.push(Span::raw("Proceed?"));
    }
    lines.push(Line::from(checkout_spans));

    Text::from(lines)
}

/// The "N articles written" confirmation (also reused for scrape errors).
pub fn update_added(app: &mut App, key: KeyEvent) -> Result<()> {
    if is_quit(&key) {
        app.should_quit = true;
        return Ok(());
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            app.prompt.cursor = app.prompt.cursor.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.prompt.cursor + 1 < app.prompt.options.len() {
                app.prompt.cursor += 1;
            }
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            if app.prompt.cursor == 0 {
                app.wipe();
                app.view = View::Start;
            } else {
                app.should_quit = true;
            }
        }
        _ => {}
    }
    Ok(())
}
