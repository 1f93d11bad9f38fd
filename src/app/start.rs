//! Start menu: pick between the article picker, the bytemark manager,
//! and the hyperpaths editor.

use super::{is_quit, style, App, StartMenu, View};
use crate::hackernews;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::text::{Line, Span, Text};

pub fn update(app: &mut App, key: KeyEvent) -> Result<()> {
    if is_quit(&key) {
        app.should_quit = true;
        return Ok(());
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            app.start.cursor = app.start.cursor.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.start.cursor < StartMenu::CHOICES.len() - 1 {
                app.start.cursor += 1;
            }
        }
        KeyCode::Enter => match app.start.cursor {
            0 => match hackernews::scrape_front_page() {
                Ok(articles) => {
                    app.articles.articles = articles;
                    app.articles.selected.clear();
                    app.articles.cursor = 0;
                    app.articles.page = 0;
                    app.view = View::Articles;
                }
                Err(e) => {
                    tracing::error!("front page scrape failed: {e}");
                    app.prompt.set(e.to_string(), &["Continue"]);
                    app.view = View::ArticlesAdded;
                }
            },
            1 => {
                app.load_hyperpaths()?;
                app.view = View::BytemarkFiles;
            }
            2 => {
                app.load_hyperpaths()?;
                app.view = View::Hyperpaths;
            }
            _ => {}
        },
        _ => {}
    }
    Ok(())
}

pub fn view(app: &App) -> Text<'static> {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled("hypermark", style::header())),
        Line::from(""),
        Line::from(format!("Writing to -> {}", app.target.describe())),
        Line::from(""),
    ];
    for (i, choice) in StartMenu::CHOICES.iter().enumerate() {
        if i == app.start.cursor {
            lines.push(Line::from(vec![
                Span::raw(style::CURSOR),
                Span::styled(choice.to_string(), style::highlight()),
            ]));
        } else {
            lines.push(Line::from(choice.to_string()));
        }
    }
    Text::from(lines)
}
