//! Terminal UI for the cost estimation dashboard
//!
//! Three parameter inputs above an 8-column zone table, rendered with
//! ratatui. Key handling only edits local state and reports what the event
//! loop has to do next.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use std::time::Duration;

use crate::config::Config;
use crate::dashboard::table::{ApplyOutcome, PriceTable};
use crate::pricing::models::{format_money, COLUMN_TITLES};
use crate::pricing::params::{ParamField, Parameters};
use crate::pricing::sort::SortField;
use crate::refresh::poller::RefreshUpdate;

/// What the event loop should do after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    None,
    Quit,
    Refresh,
    /// Parameter values changed; publish them to the poller
    ParametersChanged,
}

/// Application state for the dashboard
pub struct DashboardApp {
    pub table: PriceTable,
    pub params: Parameters,
    pub focus: ParamField,
    endpoint: String,
    currency: String,
    interval: Duration,
}

impl DashboardApp {
    pub fn new(table: PriceTable, params: Parameters, cfg: &Config, endpoint: String) -> Self {
        Self {
            table,
            params,
            focus: ParamField::NumRequests,
            endpoint,
            currency: cfg.display.currency_symbol.clone(),
            interval: cfg.refresh.interval(),
        }
    }

    pub fn apply_refresh(&mut self, update: RefreshUpdate) -> ApplyOutcome {
        self.table.apply_refresh(update, &self.params)
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return AppAction::Quit;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => AppAction::Quit,
            KeyCode::Char('r') | KeyCode::Char('R') => AppAction::Refresh,
            KeyCode::Char('t') | KeyCode::Char('T') => {
                self.table.cycle_selector(SortField::TotalCost);
                AppAction::None
            }
            KeyCode::Char('m') | KeyCode::Char('M') => {
                self.table.cycle_selector(SortField::MonthlyTotal);
                AppAction::None
            }
            KeyCode::Tab | KeyCode::Down => {
                self.focus = self.focus.next();
                AppAction::None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = self.focus.prev();
                AppAction::None
            }
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' || c == '-' => {
                let mut raw = self.params.get(self.focus).raw().to_string();
                raw.push(c);
                self.edit_focused(raw)
            }
            KeyCode::Backspace => {
                let mut raw = self.params.get(self.focus).raw().to_string();
                raw.pop();
                self.edit_focused(raw)
            }
            _ => AppAction::None,
        }
    }

    fn edit_focused(&mut self, raw: String) -> AppAction {
        if self.params.set_raw(self.focus, raw) {
            AppAction::ParametersChanged
        } else {
            AppAction::None
        }
    }

    /// Render the UI
    pub fn render(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Header
                Constraint::Length(3), // Inputs
                Constraint::Min(6),    // Table
                Constraint::Length(4), // Footer
            ])
            .split(f.area());

        self.render_header(f, chunks[0]);
        self.render_inputs(f, chunks[1]);
        self.render_table(f, chunks[2]);
        self.render_footer(f, chunks[3]);
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let last_update = self
            .table
            .last_update()
            .map(|t| t.format("%H:%M:%S").to_string())
            .unwrap_or_else(|| "Never".to_string());

        let title = vec![
            Line::from(vec![
                Span::styled(
                    "Cost Estimation",
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("  |  Source: "),
                Span::styled(self.endpoint.clone(), Style::default().fg(Color::Yellow)),
                Span::raw(format!("  |  Every {:.1}s", self.interval.as_secs_f64())),
                Span::raw("  |  Last update: "),
                Span::styled(last_update, Style::default().fg(Color::Green)),
            ]),
            Line::from(Span::styled(
                "'q' quit | 'r' refresh | Tab switch input | 't' sort Total | 'm' sort Monthly",
                Style::default().fg(Color::DarkGray),
            )),
        ];

        let paragraph = Paragraph::new(title).block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_inputs(&self, f: &mut Frame, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(area);

        for (field, column) in ParamField::ALL.iter().zip(columns.iter()) {
            let param = self.params.get(*field);
            let focused = *field == self.focus;

            let mut spans = vec![Span::raw(param.raw().to_string())];
            if focused {
                spans.push(Span::styled("▏", Style::default().fg(Color::Yellow)));
            }
            if param.is_coerced() {
                spans.push(Span::styled(
                    format!("  (using {})", param.value()),
                    Style::default().fg(Color::DarkGray),
                ));
            }

            let border_style = if focused {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            let input = Paragraph::new(Line::from(spans)).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style)
                    .title(field.label()),
            );
            f.render_widget(input, *column);
        }
    }

    fn render_table(&self, f: &mut Frame, area: Rect) {
        let sort = self.table.sort_state();
        let header_cells = COLUMN_TITLES.iter().enumerate().map(|(idx, title)| {
            let arrow = match idx {
                6 => sort.choice_for(SortField::TotalCost).arrow(),
                7 => sort.choice_for(SortField::MonthlyTotal).arrow(),
                _ => "",
            };
            Cell::from(format!("{}{}", title, arrow)).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        });

        let header = Row::new(header_cells).height(1).bottom_margin(1);

        let rows: Vec<Row> = if self.table.rows().is_empty() {
            vec![Row::new(vec![Cell::from(
                "No zones available yet. Waiting for data...",
            )])]
        } else {
            self.table
                .rows()
                .iter()
                .map(|row| Row::new(row.cells(&self.currency).map(Cell::from)).height(1))
                .collect()
        };

        let table = Table::new(
            rows,
            [
                Constraint::Percentage(16),
                Constraint::Percentage(12),
                Constraint::Percentage(10),
                Constraint::Percentage(10),
                Constraint::Percentage(12),
                Constraint::Percentage(14),
                Constraint::Percentage(12),
                Constraint::Percentage(14),
            ],
        )
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Zones ({})", sort.describe())),
        )
        .column_spacing(1);

        f.render_widget(table, area);
    }

    fn render_footer(&self, f: &mut Frame, area: Rect) {
        let content = if let Some(error) = self.table.last_error() {
            vec![
                Line::from(Span::styled(
                    format!("Error: {}", error),
                    Style::default().fg(Color::Red),
                )),
                Line::from(Span::styled(
                    "(retrying on next interval...)",
                    Style::default().fg(Color::Yellow),
                )),
            ]
        } else if !self.table.rows().is_empty() {
            let (daily, monthly) = self.table.totals();
            vec![
                Line::from(vec![
                    Span::styled("Zones: ", Style::default().fg(Color::Cyan)),
                    Span::raw(self.table.rows().len().to_string()),
                    Span::raw("  |  "),
                    Span::styled("Requests: ", Style::default().fg(Color::Cyan)),
                    Span::raw(self.params.num_requests().to_string()),
                ]),
                Line::from(vec![
                    Span::styled("Sum Total: ", Style::default().fg(Color::Cyan)),
                    Span::raw(format_money(&self.currency, daily)),
                    Span::raw("  |  "),
                    Span::styled("Sum Monthly: ", Style::default().fg(Color::Cyan)),
                    Span::raw(format_money(&self.currency, monthly)),
                ]),
            ]
        } else {
            vec![
                Line::from(Span::styled(
                    "Waiting for zone data...",
                    Style::default().fg(Color::Yellow),
                )),
                Line::from(Span::styled(
                    "Make sure the data source is reachable.",
                    Style::default().fg(Color::DarkGray),
                )),
            ]
        };

        let paragraph = Paragraph::new(content).block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }
}
