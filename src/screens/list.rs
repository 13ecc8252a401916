/// Vessel list screen
///
/// Holds the fetched collection for one activation plus the search, sort,
/// page and selection state. The visible rows are always recomputed from
/// the untouched collection through `derive_view`.
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
    Frame,
};

use super::Action;
use crate::domain::VesselSummary;
use crate::routes::Route;
use crate::services::{Activation, FetchState};
use crate::table::{derive_view, ListQuery, PageView, SortKey};
use crate::theme::Theme;
use crate::utils::{active_label, join_or_dash, or_na, text_or_na};

pub struct ListScreen {
    activation: Activation,
    pub fetch: FetchState<Vec<VesselSummary>>,
    pub query: ListQuery,
    /// Row index within the current page
    pub cursor: usize,
    /// Id of the vessel shown in the drawer
    pub drawer: Option<String>,
    pub search_focused: bool,
}

impl ListScreen {
    pub fn new(page_size: usize) -> Self {
        Self {
            activation: Activation::new(),
            fetch: FetchState::Idle,
            query: ListQuery::new(page_size),
            cursor: 0,
            drawer: None,
            search_focused: false,
        }
    }

    pub fn activation(&self) -> &Activation {
        &self.activation
    }

    /// Fetched vessels, empty until the fetch succeeds
    pub fn ships(&self) -> &[VesselSummary] {
        self.fetch.data().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn view(&self) -> PageView<'_> {
        derive_view(self.ships(), &self.query)
    }

    pub fn selected(&self) -> Option<&VesselSummary> {
        let id = self.drawer.as_deref()?;
        self.ships().iter().find(|v| v.id == id)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if self.search_focused {
            self.handle_search_key(key);
            return Action::None;
        }
        if self.drawer.is_some() {
            return self.handle_drawer_key(key);
        }

        let total_pages = self.view().total_pages;
        match key.code {
            KeyCode::Char('q') => return Action::Quit,
            KeyCode::Char('r') => return Action::Reload,
            KeyCode::Char('/') => self.search_focused = true,
            KeyCode::Char(c @ '1'..='4') => {
                let idx = c as usize - '1' as usize;
                self.query.apply_sort(SortKey::all()[idx]);
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.query.prev_page(total_pages);
                self.cursor = 0;
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.query.next_page(total_pages);
                self.cursor = 0;
            }
            KeyCode::Home => {
                self.query.go_to_page(1, total_pages);
                self.cursor = 0;
            }
            KeyCode::End => {
                self.query.last_page(total_pages);
                self.cursor = 0;
            }
            KeyCode::Up | KeyCode::Char('k') => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => self.cursor = self.cursor.saturating_add(1),
            KeyCode::Enter => self.drawer = self.row_under_cursor(),
            KeyCode::Esc if !self.query.search().is_empty() => {
                self.query.set_search("");
                self.cursor = 0;
            }
            _ => {}
        }
        self.clamp_cursor();
        Action::None
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => self.search_focused = false,
            KeyCode::Backspace => self.query.pop_search_char(),
            KeyCode::Char(c) => self.query.push_search_char(c),
            _ => return,
        }
        self.cursor = 0;
    }

    fn handle_drawer_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Enter => match self.drawer.take() {
                Some(id) => Action::Navigate(Route::ship(&id)),
                None => Action::None,
            },
            KeyCode::Esc => {
                self.drawer = None;
                Action::None
            }
            KeyCode::Char('q') => Action::Quit,
            _ => Action::None,
        }
    }

    fn row_under_cursor(&self) -> Option<String> {
        self.view().rows.get(self.cursor).map(|v| v.id.clone())
    }

    fn clamp_cursor(&mut self) {
        let rows = self.view().rows.len();
        self.cursor = self.cursor.min(rows.saturating_sub(1));
    }
}

/// Render the list screen
pub fn render_list(f: &mut Frame, screen: &ListScreen, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header + search
            Constraint::Min(8),    // Table (and drawer)
            Constraint::Length(3), // Pagination + keys
        ])
        .split(f.area());

    let view = screen.view();
    render_header(f, chunks[0], screen, &view, theme);

    match screen.selected() {
        Some(vessel) => {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
                .split(chunks[1]);
            render_table(f, cols[0], screen, &view, theme, true);
            render_drawer(f, cols[1], vessel, theme);
        }
        None => render_table(f, chunks[1], screen, &view, theme, false),
    }

    render_footer(f, chunks[2], screen, &view, theme);
}

fn render_header(f: &mut Frame, area: Rect, screen: &ListScreen, view: &PageView, theme: &Theme) {
    let status = match &screen.fetch {
        FetchState::Idle | FetchState::Loading => {
            Span::styled("[loading]", Style::default().fg(theme.warning))
        }
        FetchState::Ready { fetched_at, .. } => Span::styled(
            format!(
                "[{}/{} vessels, fetched {}]",
                view.matched,
                screen.ships().len(),
                fetched_at.format("%H:%M:%S")
            ),
            Style::default().fg(theme.healthy),
        ),
        FetchState::Failed { code, .. } => {
            Span::styled(format!("[unavailable: {code}]"), Style::default().fg(theme.critical))
        }
    };

    let search_style = if screen.search_focused {
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.muted)
    };
    let cursor = if screen.search_focused { "_" } else { "" };

    let title = Line::from(vec![
        Span::styled(
            "  SHIPS  ",
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
        status,
        Span::raw("  "),
        Span::styled(
            format!("Search: {}{}", screen.query.search(), cursor),
            search_style,
        ),
    ]);

    let header = Paragraph::new(title).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.muted)),
    );
    f.render_widget(header, area);
}

fn column_title(key: SortKey, screen: &ListScreen) -> String {
    match screen.query.sort() {
        Some(spec) if spec.key == key => format!("{} {}", key.title(), spec.direction.indicator()),
        _ => key.title().to_string(),
    }
}

fn render_table(
    f: &mut Frame,
    area: Rect,
    screen: &ListScreen,
    view: &PageView,
    theme: &Theme,
    dimmed: bool,
) {
    let titles = [
        column_title(SortKey::Name, screen),
        column_title(SortKey::Type, screen),
        "Roles".to_string(),
        "Home Port".to_string(),
        column_title(SortKey::YearBuilt, screen),
        column_title(SortKey::MissionCount, screen),
        "Status".to_string(),
    ];
    let header = Row::new(titles.into_iter().map(|h| {
        Cell::from(h).style(Style::default().fg(theme.muted).add_modifier(Modifier::BOLD))
    }))
    .height(1)
    .bottom_margin(1);

    let rows: Vec<Row> = if view.rows.is_empty() {
        let msg = match &screen.fetch {
            FetchState::Idle | FetchState::Loading => "Loading vessels...",
            FetchState::Ready { .. } if !screen.query.search().is_empty() => {
                "No vessels match the search"
            }
            _ => "No vessels to show",
        };
        vec![Row::new(vec![Cell::from(msg)]).style(Style::default().fg(theme.muted))]
    } else {
        view.rows
            .iter()
            .enumerate()
            .map(|(idx, v)| {
                let style = if idx == screen.cursor {
                    Style::default().fg(theme.text).bg(theme.bg_secondary)
                } else {
                    Style::default().fg(theme.text)
                };
                let status_color = if v.active { theme.healthy } else { theme.muted };

                Row::new(vec![
                    Cell::from(v.name.clone()),
                    Cell::from(text_or_na(Some(v.vessel_type.as_str()))),
                    Cell::from(join_or_dash(&v.roles)).style(Style::default().fg(theme.muted)),
                    Cell::from(text_or_na(Some(v.home_port.as_str()))),
                    Cell::from(or_na(v.year_built)),
                    Cell::from(v.mission_count().to_string()),
                    Cell::from(active_label(v.active)).style(Style::default().fg(status_color)),
                ])
                .style(style)
            })
            .collect()
    };

    let widths = [
        Constraint::Min(18),
        Constraint::Length(16),
        Constraint::Min(16),
        Constraint::Length(20),
        Constraint::Length(12),
        Constraint::Length(10),
        Constraint::Length(9),
    ];

    let mut table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.muted))
            .title(Span::styled(" Vessels ", Style::default().fg(theme.text))),
    );
    if dimmed {
        table = table.style(Style::default().add_modifier(Modifier::DIM));
    }

    f.render_widget(table, area);
}

fn render_drawer(f: &mut Frame, area: Rect, vessel: &VesselSummary, theme: &Theme) {
    let label = |s: &'static str| Span::styled(s, Style::default().fg(theme.muted));
    let value = |s: String| Span::styled(s, Style::default().fg(theme.text));

    let mut lines = vec![
        Line::from(vec![label("ID:        "), value(vessel.id.clone())]),
        Line::from(vec![label("Type:      "), value(text_or_na(Some(vessel.vessel_type.as_str())))]),
        Line::from(vec![label("Roles:     "), value(join_or_dash(&vessel.roles))]),
        Line::from(vec![label("Home port: "), value(text_or_na(Some(vessel.home_port.as_str())))]),
        Line::from(vec![label("Built:     "), value(or_na(vessel.year_built))]),
        Line::from(vec![label("Status:    "), value(active_label(vessel.active).to_string())]),
        Line::from(vec![label("Image:     "), value(text_or_na(vessel.image.as_deref()))]),
        Line::from(vec![label("Missions:  "), value(vessel.mission_count().to_string())]),
    ];
    lines.extend(vessel.missions.iter().map(|m| {
        Line::from(Span::styled(
            format!("  - {} (flight {})", m.name, or_na(m.flight)),
            Style::default().fg(theme.muted),
        ))
    }));
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        format!("Enter: open {}  Esc: close", Route::ship(&vessel.id)),
        Style::default().fg(theme.accent),
    )));

    let drawer = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .title(Span::styled(
                format!(" {} ", vessel.name),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(drawer, area);
}

fn render_footer(f: &mut Frame, area: Rect, screen: &ListScreen, view: &PageView, theme: &Theme) {
    let hints = if screen.search_focused {
        "type to filter  Enter/Esc: done"
    } else if screen.drawer.is_some() {
        "Enter: details  Esc: close  q: quit"
    } else {
        "/: search  1-4: sort  ←/→: page  ↑/↓: select  Enter: open  r: reload  q: quit"
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" Page {} of {} ", view.page, view.total_pages.max(1)),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(hints, Style::default().fg(theme.muted)),
    ]);

    let footer = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.muted)),
    );
    f.render_widget(footer, area);
}
