use std::io::Write;

use onam_core::{
    leaderboard::Entry,
    types::{FoodKind, Position},
};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table},
};

use crate::app::{App, Screen};

pub fn render(f: &mut Frame, app: &App) {
    match app.screen {
        Screen::Menu => render_menu(f, app),
        Screen::Playing => render_game(f, app),
        Screen::GameOver => render_game_over(f, app),
        Screen::Leaderboard => render_leaderboard(f, app),
    }
}

/// Rings the terminal bell, our chenda drum.
pub fn bell() {
    let mut out = std::io::stdout();
    let _ = out.write_all(b"\x07");
    let _ = out.flush();
}

fn render_menu(f: &mut Frame, app: &App) {
    let area = center(f.area(), 56, 18);
    let name = if app.name.is_empty() {
        Span::styled("enter your name (optional)", dim())
    } else {
        Span::styled(app.name.clone(), bold(Color::White))
    };

    let lines = vec![
        Line::styled("Onam Snake & Papadam", bold(Color::LightGreen)),
        Line::raw("Celebrate Onam! Collect papadams and enjoy the feast!"),
        Line::raw(""),
        Line::from(vec![Span::raw("Name: "), name, Span::raw("▏")]),
        Line::raw(""),
        Line::from(format!("High score: {}", app.game.high_score)),
        Line::raw(""),
        Line::styled("Foods", bold(Color::Yellow)),
        Line::raw("  papadam  +1 point"),
        Line::raw("  payasam  +5 points"),
        Line::raw("  banana   +3 points, speeds things up"),
        Line::raw(""),
        Line::styled("Enter start the feast", dim()),
        Line::styled("Tab   leaderboard    Esc quit", dim()),
    ];

    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(widget, area);
}

fn render_game(f: &mut Frame, app: &App) {
    let game = &app.game;
    let board_width = game.board.width as u16 * 2 + 2;
    let board_height = game.board.height as u16 + 2;

    let [board_area, side_area] = Layout::horizontal([
        Constraint::Length(board_width),
        Constraint::Min(24),
    ])
    .areas(center(f.area(), board_width + 26, board_height));

    let mut lines = Vec::with_capacity(game.board.height as usize);
    for y in 0..game.board.height {
        let mut spans = Vec::with_capacity(game.board.width as usize);
        for x in 0..game.board.width {
            let position = Position { x, y };
            let span = if game.snake.front() == Some(&position) {
                Span::styled("██", Style::default().fg(Color::LightGreen))
            } else if game.snake.contains(&position) {
                Span::styled("▓▓", Style::default().fg(Color::Green))
            } else if game.food.position == position {
                food_span(game.food.kind)
            } else {
                Span::raw("  ")
            };
            spans.push(span);
        }
        lines.push(Line::from(spans));
    }
    let board = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Onam Feast "),
    );
    f.render_widget(board, board_area);

    let side = Paragraph::new(vec![
        Line::from(format!("Score       {}", game.score)),
        Line::from(format!("High score  {}", game.high_score)),
        Line::from(format!("Foods eaten {}", game.stats.total_eaten)),
        Line::raw(""),
        Line::from(format!("papadams    {}", game.stats.papadams_eaten)),
        Line::from(format!("payasams    {}", game.stats.payasams_eaten)),
        Line::from(format!("bananas     {}", game.stats.bananas_eaten)),
        Line::raw(""),
        Line::styled("arrows steer", dim()),
        Line::styled("Esc back to menu", dim()),
    ])
    .block(Block::default().borders(Borders::ALL).title(" Score "));
    f.render_widget(side, side_area);
}

fn render_game_over(f: &mut Frame, app: &App) {
    let game = &app.game;
    let area = center(f.area(), 56, 16);

    let mut lines = vec![
        Line::styled("Game Over! Try again for a better feast!", bold(Color::Red)),
        Line::raw(""),
        Line::from(format!("Final score: {}", game.score)),
        Line::from(format!(
            "Papadams {}   Payasams {}   Bananas {}",
            game.stats.papadams_eaten, game.stats.payasams_eaten, game.stats.bananas_eaten
        )),
        Line::raw(""),
    ];

    if app.show_name_input {
        lines.push(Line::styled(
            "Great score! Enter your name for the leaderboard:",
            bold(Color::Yellow),
        ));
        lines.push(Line::from(vec![
            Span::raw("Name: "),
            Span::styled(app.name.clone(), bold(Color::White)),
            Span::raw("▏"),
        ]));
        lines.push(Line::styled("Enter save    Esc skip", dim()));
    } else {
        match app.submitted {
            Some(true) => lines.push(Line::styled("Score saved to the leaderboard", dim())),
            Some(false) => lines.push(Line::styled(
                "Leaderboard offline, score kept locally",
                dim(),
            )),
            None => {}
        }
        lines.push(Line::raw(""));
        lines.push(Line::styled("Enter start a new feast", dim()));
        lines.push(Line::styled("Tab   leaderboard    Esc menu", dim()));
    }

    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(widget, area);
}

fn render_leaderboard(f: &mut Frame, app: &App) {
    let [board_area, log_area] =
        Layout::vertical([Constraint::Min(16), Constraint::Length(8)]).areas(f.area());
    let area = center(board_area, 62, 16);
    let title = if app.board_view.from_server {
        " Leaderboard "
    } else {
        " Leaderboard (local) "
    };

    let rows: Vec<Row> = app
        .board_view
        .entries
        .iter()
        .enumerate()
        .map(|(i, entry)| entry_row(i, entry))
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Length(22),
            Constraint::Length(7),
            Constraint::Min(20),
        ],
    )
    .header(Row::new(["#", "Name", "Score", "Date"]).style(bold(Color::Yellow)))
    .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(table, area);

    // Fetch failures are only logged, so show the log tail here.
    let logger_widget = tui_logger::TuiLoggerWidget::default()
        .block(Block::default().borders(Borders::ALL).title(" Log "));
    f.render_widget(logger_widget, log_area);
}

fn entry_row(index: usize, entry: &Entry) -> Row<'static> {
    Row::new([
        format!("{}", index + 1),
        entry.name.clone(),
        entry.score.to_string(),
        entry.date.clone(),
    ])
}

fn food_span(kind: FoodKind) -> Span<'static> {
    match kind {
        FoodKind::Papadam => Span::styled("◉ ", Style::default().fg(Color::Yellow)),
        FoodKind::Payasam => Span::styled("◆ ", Style::default().fg(Color::Magenta)),
        FoodKind::Banana => Span::styled("▶ ", Style::default().fg(Color::LightYellow)),
    }
}

fn bold(color: Color) -> Style {
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn dim() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

fn center(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
