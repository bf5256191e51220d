use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use super::app::{App, InputMode, PendingAction, Screen};
use super::commands;
use super::theme;

pub(crate) fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Min(5),    // Main content
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Command bar
        ])
        .split(f.area());

    render_tab_bar(f, chunks[0], app);
    render_screen(f, chunks[1], app);
    render_status_bar(f, chunks[2], app);
    render_command_bar(f, chunks[3], app);

    if app.show_help {
        render_help_overlay(f, f.area());
    }
}

fn render_tab_bar(f: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<Line> = Screen::all()
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let num = format!("{}", i + 1);
            if *s == app.screen {
                Line::from(vec![
                    Span::styled(format!("{num}:"), Style::default().fg(theme::TEXT_DIM)),
                    Span::styled(
                        format!("{s}"),
                        Style::default()
                            .fg(theme::ACCENT)
                            .add_modifier(Modifier::BOLD),
                    ),
                ])
            } else {
                Line::from(Span::styled(
                    format!("{num}:{s}"),
                    Style::default().fg(theme::TEXT_DIM),
                ))
            }
        })
        .collect();

    let tabs = Tabs::new(titles)
        .divider(Span::styled(" | ", Style::default().fg(theme::OVERLAY)))
        .style(Style::default().bg(theme::HEADER_BG));

    f.render_widget(tabs, area);
}

fn render_screen(f: &mut Frame, area: Rect, app: &App) {
    match app.screen {
        Screen::Dashboard => super::screens::dashboard::render(f, area, app),
        Screen::Transactions => super::screens::transactions::render(f, area, app),
    }
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mode_label = format!(" {} ", app.input_mode);
    let mode_style = match app.input_mode {
        InputMode::Normal => Style::default()
            .fg(theme::HEADER_BG)
            .bg(theme::ACCENT)
            .add_modifier(Modifier::BOLD),
        InputMode::Command => Style::default()
            .fg(theme::HEADER_BG)
            .bg(theme::GREEN)
            .add_modifier(Modifier::BOLD),
        InputMode::Confirm => Style::default()
            .fg(theme::HEADER_BG)
            .bg(theme::RED)
            .add_modifier(Modifier::BOLD),
    };

    let info = format!(" {} | {} txns", app.screen, app.transaction_count);

    let right = match app.screen {
        Screen::Dashboard => " 1/2 switch | r refresh | ? help ",
        Screen::Transactions => " j/k move | D delete | :add | ? help ",
    };

    let bar = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(mode_label.len() as u16),
            Constraint::Min(10),
            Constraint::Length(right.len() as u16),
        ])
        .split(area);

    f.render_widget(Paragraph::new(mode_label).style(mode_style), bar[0]);
    f.render_widget(
        Paragraph::new(info).style(theme::status_bar_style()),
        bar[1],
    );
    f.render_widget(
        Paragraph::new(right).style(theme::status_bar_style()),
        bar[2],
    );
}

fn render_command_bar(f: &mut Frame, area: Rect, app: &App) {
    let content = match app.input_mode {
        InputMode::Command => Line::from(vec![
            Span::styled(":", Style::default().fg(theme::ACCENT)),
            Span::styled(app.command_input.clone(), Style::default().fg(theme::TEXT)),
            Span::styled("█", Style::default().fg(theme::ACCENT)),
        ]),
        InputMode::Confirm => {
            let prompt = match &app.pending_action {
                Some(PendingAction::DeleteTransaction { id, description }) => {
                    format!("Delete transaction #{id} '{description}'? (y/n)")
                }
                None => String::from("Confirm? (y/n)"),
            };
            Line::from(Span::styled(
                prompt,
                Style::default()
                    .fg(theme::RED)
                    .add_modifier(Modifier::BOLD),
            ))
        }
        InputMode::Normal => Line::from(Span::styled(
            app.status_message.clone(),
            theme::dim_style(),
        )),
    };

    f.render_widget(
        Paragraph::new(content).style(theme::command_bar_style()),
        area,
    );
}

fn render_help_overlay(f: &mut Frame, area: Rect) {
    let width = area.width.min(64);
    let mut names: Vec<&&str> = commands::COMMANDS.keys().collect();
    names.sort();

    let mut lines = vec![
        Line::from(Span::styled(
            "Keys",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from("  1/2      switch screen"),
        Line::from("  j/k g/G  move cursor"),
        Line::from("  D        delete selected transaction"),
        Line::from("  r        refresh reports"),
        Line::from("  q        quit"),
        Line::from(""),
        Line::from(Span::styled(
            "Commands",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
    ];
    for name in names {
        if name.len() < 2 {
            continue; // skip single-letter aliases in the listing
        }
        if let Some(cmd) = commands::COMMANDS.get(*name) {
            lines.push(Line::from(format!("  :{name:<14}{}", cmd.description)));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press any key to close",
        theme::dim_style(),
    )));

    let height = (lines.len() as u16 + 2).min(area.height);
    let popup = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::ACCENT))
                .title(" Help "),
        ),
        popup,
    );
}
