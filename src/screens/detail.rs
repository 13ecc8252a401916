/// Single vessel screen, addressed by `/ships/{id}`
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use super::Action;
use crate::domain::VesselDetail;
use crate::routes::Route;
use crate::services::{Activation, FetchState};
use crate::theme::Theme;
use crate::utils::{active_label, join_or_dash, landings, measure, or_na, text_or_na};

pub struct DetailScreen {
    activation: Activation,
    id: String,
    pub fetch: FetchState<VesselDetail>,
}

impl DetailScreen {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            activation: Activation::new(),
            id: id.into(),
            fetch: FetchState::Idle,
        }
    }

    pub fn activation(&self) -> &Activation {
        &self.activation
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc | KeyCode::Backspace => Action::Navigate(Route::ShipList),
            KeyCode::Char('r') => Action::Reload,
            KeyCode::Char('q') => Action::Quit,
            _ => Action::None,
        }
    }
}

/// Render the detail screen
pub fn render_detail(f: &mut Frame, screen: &DetailScreen, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(3)])
        .split(f.area());

    match &screen.fetch {
        FetchState::Ready { data, .. } => render_vessel(f, chunks[0], data, theme),
        FetchState::Idle | FetchState::Loading => {
            render_message(f, chunks[0], format!("Loading {}...", screen.id()), theme)
        }
        FetchState::Failed { .. } => render_message(
            f,
            chunks[0],
            format!("Vessel {} not found", screen.id()),
            theme,
        ),
    }

    let footer = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" {} ", Route::ship(screen.id())),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled("Esc: back to list  r: reload  q: quit", Style::default().fg(theme.muted)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.muted)),
    );
    f.render_widget(footer, chunks[1]);
}

fn render_message(f: &mut Frame, area: Rect, msg: String, theme: &Theme) {
    let panel = Paragraph::new(msg)
        .style(Style::default().fg(theme.muted))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(panel, area);
}

fn field(name: &'static str, value: String, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{name:<12}"), Style::default().fg(theme.muted)),
        Span::styled(value, Style::default().fg(theme.text)),
    ])
}

fn render_vessel(f: &mut Frame, area: Rect, vessel: &VesselDetail, theme: &Theme) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(12), Constraint::Length(4)])
        .split(cols[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(4)])
        .split(cols[1]);

    render_registry(f, left[0], vessel, theme);
    render_tracking(f, left[1], vessel, theme);
    render_telemetry(f, right[0], vessel, theme);
    render_missions(f, right[1], vessel, theme);
}

fn render_registry(f: &mut Frame, area: Rect, vessel: &VesselDetail, theme: &Theme) {
    let s = &vessel.summary;
    let status_color = if s.active { theme.healthy } else { theme.muted };

    let lines = vec![
        field("ID:", s.id.clone(), theme),
        field("Model:", text_or_na(vessel.model.as_deref()), theme),
        field("Type:", text_or_na(Some(s.vessel_type.as_str())), theme),
        field("Roles:", join_or_dash(&s.roles), theme),
        field("Home port:", text_or_na(Some(s.home_port.as_str())), theme),
        field("Year built:", or_na(s.year_built), theme),
        Line::from(vec![
            Span::styled(format!("{:<12}", "Status:"), Style::default().fg(theme.muted)),
            Span::styled(active_label(s.active), Style::default().fg(status_color)),
            Span::styled(
                match vessel.status.as_deref().map(str::trim) {
                    Some(text) if !text.is_empty() => format!(" ({text})"),
                    _ => String::new(),
                },
                Style::default().fg(theme.muted),
            ),
        ]),
        field("Weight:", weight(vessel), theme),
        field("IMO:", or_na(vessel.imo), theme),
        field("MMSI:", or_na(vessel.mmsi), theme),
        field("ABS:", or_na(vessel.abs), theme),
        field("Class:", or_na(vessel.class), theme),
        field("Image:", text_or_na(s.image.as_deref()), theme),
    ];

    let panel = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.muted))
            .title(Span::styled(
                format!(" {} ", s.name),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(panel, area);
}

fn weight(vessel: &VesselDetail) -> String {
    match (vessel.weight_kg, vessel.weight_lbs) {
        (Some(kg), Some(lbs)) => format!("{kg} kg ({lbs} lbs)"),
        (Some(kg), None) => format!("{kg} kg"),
        (None, Some(lbs)) => format!("{lbs} lbs"),
        (None, None) => or_na::<u64>(None),
    }
}

fn render_telemetry(f: &mut Frame, area: Rect, vessel: &VesselDetail, theme: &Theme) {
    let lines = vec![
        field("Latitude:", measure(vessel.position.latitude, 4, ""), theme),
        field("Longitude:", measure(vessel.position.longitude, 4, ""), theme),
        field("Speed:", measure(vessel.speed_kn, 1, "kn"), theme),
        field("Heading:", measure(vessel.course_deg, 0, "°"), theme),
        field(
            "Landings:",
            landings(vessel.successful_landings, vessel.attempted_landings),
            theme,
        ),
    ];

    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.muted))
            .title(Span::styled(" Telemetry ", Style::default().fg(theme.text))),
    );
    f.render_widget(panel, area);
}

fn render_missions(f: &mut Frame, area: Rect, vessel: &VesselDetail, theme: &Theme) {
    let missions = &vessel.summary.missions;
    let items: Vec<ListItem> = if missions.is_empty() {
        vec![ListItem::new(Span::styled(
            "  No missions",
            Style::default().fg(theme.muted),
        ))]
    } else {
        missions
            .iter()
            .map(|m| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!(" #{:<5}", or_na(m.flight)),
                        Style::default().fg(theme.accent),
                    ),
                    Span::styled(m.name.clone(), Style::default().fg(theme.text)),
                ]))
            })
            .collect()
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.muted))
            .title(Span::styled(
                format!(" Missions ({}) ", missions.len()),
                Style::default().fg(theme.text),
            )),
    );
    f.render_widget(list, area);
}

fn render_tracking(f: &mut Frame, area: Rect, vessel: &VesselDetail, theme: &Theme) {
    let link = Paragraph::new(Line::from(Span::styled(
        text_or_na(vessel.tracking_url.as_deref()),
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::UNDERLINED),
    )))
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.muted))
            .title(Span::styled(" Live tracking ", Style::default().fg(theme.text))),
    );
    f.render_widget(link, area);
}
