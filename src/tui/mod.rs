//! Ratatui-based terminal UI.
//!
//! The TUI provides facet panels (crime types, areas, month range) next to
//! the three coordinated charts: crimes per month, victim ages, and victim
//! sex. Searching re-queries the aggregation service; selection changes on
//! their own never do.

use std::io;
use std::path::Path;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Clear, List, ListItem, Paragraph},
    Terminal,
};

use crate::app::pipeline::{self, QueryOutput, GENERIC_FETCH_ALERT};
use crate::charts::Reconciler;
use crate::data::{ApiClient, FacetCatalog};
use crate::domain::{FacetGroup, FilterSet};
use crate::error::AppError;
use crate::io::DEFAULT_EXPORT_FILENAME;

mod plotters_chart;

use plotters_chart::MonthlyBarsChart;

/// Start the TUI.
pub fn run(client: ApiClient) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(client);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Which selector currently has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Panel {
    Types,
    Areas,
    StartMonth,
    EndMonth,
}

impl Panel {
    fn next(self) -> Self {
        match self {
            Panel::Types => Panel::Areas,
            Panel::Areas => Panel::StartMonth,
            Panel::StartMonth => Panel::EndMonth,
            Panel::EndMonth => Panel::Types,
        }
    }

    fn prev(self) -> Self {
        match self {
            Panel::Types => Panel::EndMonth,
            Panel::Areas => Panel::Types,
            Panel::StartMonth => Panel::Areas,
            Panel::EndMonth => Panel::StartMonth,
        }
    }
}

struct App {
    client: ApiClient,
    catalog: FacetCatalog,
    types: FacetGroup,
    areas: FacetGroup,
    start_idx: Option<usize>,
    end_idx: Option<usize>,
    panel: Panel,
    types_cursor: usize,
    areas_cursor: usize,
    status: String,
    reconciler: Reconciler,
    last_run: Option<QueryOutput>,
}

impl App {
    fn new(client: ApiClient) -> Self {
        let mut app = Self {
            client,
            catalog: FacetCatalog::default(),
            types: FacetGroup::default(),
            areas: FacetGroup::default(),
            start_idx: None,
            end_idx: None,
            panel: Panel::Types,
            types_cursor: 0,
            areas_cursor: 0,
            status: String::new(),
            reconciler: Reconciler::new(),
            last_run: None,
        };
        app.reload_catalog();
        app
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the app should quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Tab => self.panel = self.panel.next(),
            KeyCode::BackTab => self.panel = self.panel.prev(),
            KeyCode::Up => self.move_cursor(-1),
            KeyCode::Down => self.move_cursor(1),
            KeyCode::Left => self.cycle_month(-1),
            KeyCode::Right => self.cycle_month(1),
            KeyCode::Char(' ') => self.toggle_current(),
            KeyCode::Char('a') => self.toggle_all_current(),
            KeyCode::Char('s') | KeyCode::Enter => self.search(),
            KeyCode::Char('x') => self.export(),
            KeyCode::Char('r') => self.reload_catalog(),
            KeyCode::Char('d') => self.write_debug_bundle(),
            _ => {}
        }
        false
    }

    fn move_cursor(&mut self, delta: i64) {
        let (cursor, len) = match self.panel {
            Panel::Types => (&mut self.types_cursor, self.types.len()),
            Panel::Areas => (&mut self.areas_cursor, self.areas.len()),
            Panel::StartMonth | Panel::EndMonth => return,
        };
        if len == 0 {
            return;
        }
        let next = (*cursor as i64 + delta).clamp(0, len as i64 - 1);
        *cursor = next as usize;
    }

    fn cycle_month(&mut self, delta: i64) {
        let idx = match self.panel {
            Panel::StartMonth => &mut self.start_idx,
            Panel::EndMonth => &mut self.end_idx,
            Panel::Types | Panel::Areas => return,
        };
        let len = self.catalog.months.len();
        if len == 0 {
            self.status = "No months loaded; press r to reload the catalog.".to_string();
            return;
        }
        let next = match *idx {
            None => {
                if delta >= 0 {
                    0
                } else {
                    len - 1
                }
            }
            Some(current) => (current as i64 + delta).rem_euclid(len as i64) as usize,
        };
        *idx = Some(next);
    }

    fn toggle_current(&mut self) {
        match self.panel {
            Panel::Types => self.types.toggle(self.types_cursor),
            Panel::Areas => self.areas.toggle(self.areas_cursor),
            Panel::StartMonth | Panel::EndMonth => {}
        }
    }

    /// The "select all" control: every checkbox in the focused group follows
    /// its state. It never triggers a query by itself.
    fn toggle_all_current(&mut self) {
        let group = match self.panel {
            Panel::Types => &mut self.types,
            Panel::Areas => &mut self.areas,
            Panel::StartMonth | Panel::EndMonth => return,
        };
        let checked = !group.all_checked();
        group.set_all(checked);
    }

    fn current_filters(&self) -> FilterSet {
        FilterSet {
            types: self.types.selected(),
            areas: self.areas.selected(),
            start_month: self.month_at(self.start_idx),
            end_month: self.month_at(self.end_idx),
        }
    }

    fn month_at(&self, idx: Option<usize>) -> String {
        idx.and_then(|i| self.catalog.months.get(i))
            .cloned()
            .unwrap_or_default()
    }

    fn search(&mut self) {
        let filters = self.current_filters();
        let ticket = self.reconciler.begin();

        match pipeline::run_query(&self.client, &filters) {
            Ok(run) => {
                if self.reconciler.complete(ticket, Some(&run.aggregates)) {
                    self.status = "Charts updated.".to_string();
                }
                self.last_run = Some(run);
            }
            Err(err) if err.is_validation() => {
                // Validation recovers locally: warn, send nothing, keep the
                // charts as they were.
                self.reconciler.complete(ticket, None);
                self.status = err.to_string();
            }
            Err(err) => {
                log::warn!("chart data request failed: {err}");
                self.reconciler.complete(ticket, None);
                self.status = GENERIC_FETCH_ALERT.to_string();
            }
        }
    }

    fn export(&mut self) {
        let filters = self.current_filters();
        match pipeline::run_export(&self.client, &filters, Path::new(DEFAULT_EXPORT_FILENAME)) {
            Ok(bytes) => {
                self.status = format!("Saved {DEFAULT_EXPORT_FILENAME} ({bytes} bytes).");
            }
            Err(err) if err.is_validation() => {
                self.status = err.to_string();
            }
            Err(err) => {
                log::warn!("csv export failed: {err}");
                self.status = GENERIC_FETCH_ALERT.to_string();
            }
        }
    }

    fn reload_catalog(&mut self) {
        self.catalog = FacetCatalog::load(&self.client);
        self.types = self.catalog.types_group();
        self.areas = self.catalog.areas_group();
        self.start_idx = None;
        self.end_idx = None;
        self.types_cursor = 0;
        self.areas_cursor = 0;
        self.status = format!(
            "Loaded {} types, {} areas, {} months.",
            self.types.len(),
            self.areas.len(),
            self.catalog.months.len()
        );
    }

    fn write_debug_bundle(&mut self) {
        let Some(run) = &self.last_run else {
            self.status = "No query data yet; search first.".to_string();
            return;
        };
        match crate::debug::write_debug_bundle(&run.filters, &run.query, &run.aggregates) {
            Ok(path) => {
                self.status = format!("Wrote debug bundle: {}", path.display());
            }
            Err(err) => {
                self.status = format!("Debug write failed: {err}");
            }
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let filters = self.current_filters();
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("cdash", Style::default().fg(Color::Cyan)),
            Span::raw(" — crime-incident dashboard"),
        ]));
        lines.push(Line::from(Span::styled(
            format!(
                "api: {} | types: {}/{} | areas: {}/{} | months: {} .. {}",
                self.client.base_url(),
                filters.types.len(),
                self.types.len(),
                filters.areas.len(),
                self.areas.len(),
                or_dash(&filters.start_month),
                or_dash(&filters.end_month),
            ),
            Style::default().fg(Color::Gray),
        )));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&mut self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(34), Constraint::Min(0)])
            .split(area);

        self.draw_selectors(frame, chunks[0]);
        self.draw_charts(frame, chunks[1]);
    }

    fn draw_selectors(&mut self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(45),
                Constraint::Percentage(35),
                Constraint::Length(4),
            ])
            .split(area);

        self.draw_facet_list(frame, chunks[0], Panel::Types);
        self.draw_facet_list(frame, chunks[1], Panel::Areas);
        self.draw_month_selectors(frame, chunks[2]);
    }

    fn draw_facet_list(&mut self, frame: &mut ratatui::Frame<'_>, area: Rect, panel: Panel) {
        let (group, cursor, title) = match panel {
            Panel::Types => (&self.types, self.types_cursor, "Crime Types"),
            Panel::Areas => (&self.areas, self.areas_cursor, "Areas"),
            Panel::StartMonth | Panel::EndMonth => return,
        };

        let items: Vec<ListItem> = group
            .entries()
            .iter()
            .map(|entry| {
                let mark = if entry.checked { "[x]" } else { "[ ]" };
                ListItem::new(format!("{mark} {}", entry.label))
            })
            .collect();

        let focused = self.panel == panel;
        let border_style = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };

        let list = List::new(items)
            .block(
                Block::default()
                    .title(format!("{title} ({}/{})", group.selected().len(), group.len()))
                    .borders(Borders::ALL)
                    .border_style(border_style),
            )
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        if focused && !group.is_empty() {
            state.select(Some(cursor));
        }
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_month_selectors(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let start_focused = self.panel == Panel::StartMonth;
        let end_focused = self.panel == Panel::EndMonth;

        let style_for = |focused: bool| {
            if focused {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            }
        };

        let lines = vec![
            Line::from(Span::styled(
                format!("Start: {}", or_dash(&self.month_at(self.start_idx))),
                style_for(start_focused),
            )),
            Line::from(Span::styled(
                format!("End:   {}", or_dash(&self.month_at(self.end_idx))),
                style_for(end_focused),
            )),
        ];

        let border_style = if start_focused || end_focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        let p = Paragraph::new(Text::from(lines)).block(
            Block::default()
                .title("Month Range")
                .borders(Borders::ALL)
                .border_style(border_style),
        );
        frame.render_widget(p, area);
    }

    fn draw_charts(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(12)])
            .split(area);

        self.draw_month_chart(frame, chunks[0]);

        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[1]);

        self.draw_age_chart(frame, bottom[0]);
        self.draw_sex_chart(frame, bottom[1]);
    }

    fn draw_month_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default()
            .title("Crime Count by Month")
            .borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let months = &self.reconciler.charts().months;
        let widget = MonthlyBarsChart {
            labels: &months.labels,
            series: &months.series,
        };
        frame.render_widget(widget, inner);

        if !months.status.is_empty() {
            let msg = Paragraph::new(months.status.as_str())
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Yellow));
            let rect = Rect {
                x: inner.x,
                y: inner.y,
                width: inner.width,
                height: 1,
            };
            frame.render_widget(msg, rect);
        }
    }

    fn draw_age_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let ages = &self.reconciler.charts().ages;
        let block = Block::default()
            .title(ages.status.as_str())
            .borders(Borders::ALL);

        if ages.labels.is_empty() {
            frame.render_widget(block, area);
            return;
        }

        let bars: Vec<Bar> = ages
            .labels
            .iter()
            .zip(ages.series.iter())
            .map(|(label, &count)| {
                Bar::default()
                    .value(count)
                    .label(Line::from(label.as_str()))
                    .text_value(count.to_string())
            })
            .collect();

        let chart = BarChart::default()
            .block(block)
            .data(BarGroup::default().bars(&bars))
            .bar_width(5)
            .bar_gap(1)
            .bar_style(Style::default().fg(Color::Red))
            .value_style(Style::default().fg(Color::Black).bg(Color::Red));
        frame.render_widget(chart, area);
    }

    fn draw_sex_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let sex = &self.reconciler.charts().sex;
        let block = Block::default()
            .title(sex.status.as_str())
            .borders(Borders::ALL);

        if sex.labels.is_empty() {
            frame.render_widget(block, area);
            return;
        }

        let total: u64 = sex.series.iter().sum();
        let lines: Vec<Line> = sex
            .labels
            .iter()
            .zip(sex.series.iter())
            .map(|(label, &count)| {
                let share = if total == 0 {
                    0.0
                } else {
                    count as f64 / total as f64
                };
                let bar = "█".repeat((share * 12.0).round() as usize);
                Line::from(vec![
                    Span::raw(format!("{label:<12} ")),
                    Span::styled(bar, Style::default().fg(Color::Magenta)),
                    Span::raw(format!(" {count} ({:.0}%)", share * 100.0)),
                ])
            })
            .collect();

        let p = Paragraph::new(Text::from(lines)).block(block);
        frame.render_widget(p, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help =
            "Tab panel  ↑/↓ move  Space toggle  a all  ←/→ month  s search  x export  r reload  d debug  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}
