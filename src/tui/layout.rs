//! TUI layout and widget rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Gauge, Paragraph, Wrap};

use super::runtime::{App, Focus, SiteField};
use super::style;
use crate::catalog::{StarterType, scenario_info};
use crate::report::{BarKind, ProposalReport};

/// Renders the full TUI frame.
pub fn render(frame: &mut Frame, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(12),   // chart + side panels
            Constraint::Length(3), // coverage gauge
            Constraint::Min(8),    // proposal
            Constraint::Length(1), // footer
        ])
        .split(frame.area());

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[1]);
    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8),
            Constraint::Length(7),
            Constraint::Min(4),
        ])
        .split(middle[1]);

    render_header(frame, app, rows[0]);
    render_chart(frame, app, middle[0]);
    render_result(frame, app, side[0]);
    render_site(frame, app, side[1]);
    render_loads(frame, app, side[2]);
    render_coverage(frame, app, rows[2]);
    render_proposal(frame, app, rows[3]);
    render_footer(frame, app, rows[4]);
}

/// Header bar: site title and scenario.
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let info = scenario_info(app.site.scenario);
    let header = Line::from(vec![
        Span::styled(
            " BESS-SIZER ",
            Style::default()
                .fg(style::HEADER_FG)
                .bg(style::HEADER_BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(app.title.as_str(), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format!(" │ {}: {} ", info.scenario.code(), info.label)),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

/// Load profile bars against the supply ceiling.
fn render_chart(frame: &mut Frame, app: &App, area: Rect) {
    let ceiling = app.result.effective_grid_limit_kw;
    let profile = app.profile();
    let bars: Vec<Bar> = profile
        .iter()
        .map(|b| {
            let color = style::bar_color(b.kind == BarKind::Base, b.peak_kw, ceiling);
            Bar::default()
                .value(b.peak_kw.max(0.0).round() as u64)
                .text_value(format!("{:.0}", b.peak_kw))
                .label(Line::from(b.label.clone()))
                .style(Style::default().fg(color))
        })
        .collect();

    let tallest = profile.iter().map(|b| b.peak_kw).fold(ceiling, f64::max);

    let chart = BarChart::default()
        .block(
            Block::default()
                .title(format!(" Load Profile (kW) │ ceiling {ceiling:.0} kW "))
                .borders(Borders::ALL),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(9)
        .bar_gap(2)
        .max(tallest.max(1.0).round() as u64);
    frame.render_widget(chart, area);
}

/// Sizing figures and the recommended unit.
fn render_result(frame: &mut Frame, app: &App, area: Rect) {
    let r = &app.result;
    let model = r
        .recommended_model
        .as_ref()
        .map_or_else(|| "-".to_string(), |m| m.name.to_string());

    let mut lines = vec![
        Line::from(format!(
            "  physical {:>8.1} kW   effective {:>8.1} kW",
            r.physical_limit_kw, r.effective_grid_limit_kw
        )),
        Line::from(format!(
            "  peak     {:>8.1} kW   rated     {:>8.1} kW",
            r.total_peak_load_kw, r.total_rated_load_kw
        )),
        Line::from(format!("  shortfall {:>7.1} kW", r.shortfall_kw)),
        Line::from(format!(
            "  BESS     {:>8.1} kW   {:>8.1} kWh",
            r.required_bess_power_kw, r.required_bess_energy_kwh
        )),
        Line::from(vec![
            Span::raw(format!("  unit: {model}  ")),
            Span::styled(
                r.fit_status.to_string(),
                Style::default()
                    .fg(style::fit_color(r.fit_status))
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
    ];
    if let Some(fuel) = &r.fuel_savings {
        lines.push(Line::from(format!(
            "  diesel {:.1} L/day   saving {:.0}/month",
            fuel.daily_liters, fuel.monthly_currency
        )));
    }

    let block = Block::default().title(" Result ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn focus_title(label: &str, focused: bool) -> String {
    if focused {
        format!(" {label} * ")
    } else {
        format!(" {label} ")
    }
}

/// Supply and economic fields, the focused one highlighted.
fn render_site(frame: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = SiteField::ALL
        .iter()
        .map(|field| {
            let text = format!(
                "  {:<20} {:>8.1}",
                field.label(),
                field.get(&app.config.site)
            );
            if app.focus == Focus::Site(*field) {
                Line::from(Span::styled(
                    text,
                    Style::default()
                        .fg(style::SELECTED)
                        .add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(text)
            }
        })
        .collect();

    let focused = matches!(app.focus, Focus::Site(_));
    let block = Block::default()
        .title(focus_title("Site", focused))
        .borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Editable equipment list with the selection marker.
fn render_loads(frame: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = app
        .config
        .loads
        .iter()
        .enumerate()
        .map(|(i, load)| {
            let multiplier = load.resolved_multiplier();
            let starter = match load.multiplier {
                Some(m) => StarterType::from_multiplier(m),
                None => Some(load.starter.unwrap_or_default()),
            }
            .map_or_else(|| format!("x{multiplier}"), |s| s.to_string());
            let cursor = if app.renaming && app.selected == Some(i) {
                "_"
            } else {
                ""
            };
            let name = format!("{}{cursor}", load.name);
            let text = format!(
                "  {:<18} {:>6.1} kW  {}",
                name,
                load.kw.unwrap_or(0.0),
                starter
            );
            if app.selected == Some(i) {
                Line::from(Span::styled(
                    text,
                    Style::default()
                        .fg(style::SELECTED)
                        .add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(text)
            }
        })
        .collect();

    let block = Block::default()
        .title(focus_title("Loads", app.focus == Focus::Loads))
        .borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Gauge showing how much of the peak the supply covers unaided.
fn render_coverage(frame: &mut Frame, app: &App, area: Rect) {
    let r = &app.result;
    let ratio = style::coverage_ratio(r.effective_grid_limit_kw, r.total_peak_load_kw);
    let color = if r.shortfall_kw > 0.0 {
        style::SHORT
    } else {
        style::COVERED
    };
    let gauge = Gauge::default()
        .block(Block::default().title(" Supply Coverage ").borders(Borders::ALL))
        .gauge_style(Style::default().fg(color))
        .ratio(ratio)
        .label(format!("{:.0}%", ratio * 100.0));
    frame.render_widget(gauge, area);
}

/// Client proposal text for the current result.
fn render_proposal(frame: &mut Frame, app: &App, area: Rect) {
    let text = ProposalReport::new(&app.site, &app.result).to_string();
    let block = Block::default().title(" Proposal ").borders(Borders::ALL);
    let paragraph = Paragraph::new(text)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

/// Footer with keybinding hints.
fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let hint = if app.renaming {
        " Renaming: type to edit  Backspace:Delete  Enter/Esc:Done"
    } else {
        " q:Quit  1-4:Scenario  Tab:Focus  ↑/↓:Select  +/-:Adjust  a:Add  d:Delete  r:Rename  s:Starter  p:Preset"
    };
    let footer = Paragraph::new(Line::from(Span::styled(
        hint,
        Style::default().fg(style::FOOTER_FG),
    )));
    frame.render_widget(footer, area);
}
