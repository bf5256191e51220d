use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use rust_decimal::Decimal;

use crate::report::WindowReport;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::format_amount;

/// Week and month views side by side, each computed from the same
/// snapshot with its own window start.
pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_window(f, columns[0], "This Week", &app.week);
    render_window(f, columns[1], "This Month", &app.month);
}

fn render_window(f: &mut Frame, area: Rect, label: &str, report: &WindowReport) {
    let title = format!(
        " {label} (since {}) ",
        report.window_start.format("%Y-%m-%d")
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            title,
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(4)])
        .split(inner);

    render_cards(f, rows[0], report);
    render_breakdown(f, rows[1], report);
}

fn render_cards(f: &mut Frame, area: Rect, report: &WindowReport) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);

    let net = report.net_excluding_savings;
    render_card(f, cards[0], "Income", report.income_total, theme::GREEN);
    render_card(
        f,
        cards[1],
        "Spending",
        report.expense_excluding_savings_total,
        theme::RED,
    );
    render_card(
        f,
        cards[2],
        "Net",
        net,
        if net >= Decimal::ZERO {
            theme::GREEN
        } else {
            theme::RED
        },
    );
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    amount: Decimal,
    color: ratatui::style::Color,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format_amount(amount),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

fn render_breakdown(f: &mut Frame, area: Rect, report: &WindowReport) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_account_list(
        f,
        halves[0],
        "Income by account",
        &report.income_by_account,
        theme::income_style(),
    );
    render_account_list(
        f,
        halves[1],
        "Expenses by account",
        &report.expense_by_account,
        theme::expense_style(),
    );
}

fn render_account_list(
    f: &mut Frame,
    area: Rect,
    heading: &str,
    sums: &std::collections::BTreeMap<String, Decimal>,
    amount_style: Style,
) {
    let mut lines = vec![Line::from(Span::styled(
        heading.to_string(),
        Style::default()
            .fg(theme::TEXT_DIM)
            .add_modifier(Modifier::BOLD),
    ))];

    if sums.is_empty() {
        lines.push(Line::from(Span::styled("  (none)", theme::dim_style())));
    } else {
        for (account, total) in sums {
            lines.push(Line::from(vec![
                Span::styled(format!("  {account:<14}"), theme::normal_style()),
                Span::styled(format_amount(*total), amount_style),
            ]));
        }
    }

    f.render_widget(Paragraph::new(lines), area);
}
