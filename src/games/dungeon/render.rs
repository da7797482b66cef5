/// ASCII Dungeon rendering: grid, status panels, legend and touch controls.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction as LayoutDir, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::ClickableList;

use super::actions::*;
use super::state::{Cell, DungeonState, GamePhase, ItemKind, Pos};

/// Legend entries in display order.
const LEGEND: &[(Cell, &str)] = &[
    (Cell::Player, "Player"),
    (Cell::Npc, "NPC"),
    (Cell::Enemy, "Enemy"),
    (Cell::Wall, "Wall"),
    (Cell::Door, "Door"),
    (Cell::Teleporter, "Teleporter"),
    (Cell::Switch, "Switch"),
    (Cell::Item(ItemKind::Generic), "Item"),
    (Cell::Item(ItemKind::Key), "Key"),
    (Cell::Item(ItemKind::Potion), "Potion"),
    (Cell::Item(ItemKind::Weapon), "Weapon"),
    (Cell::Item(ItemKind::Treasure), "Treasure"),
];

pub fn render(
    state: &DungeonState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    if is_narrow_layout(area.width) {
        render_narrow(state, f, area, click_state);
    } else {
        render_wide(state, f, area, click_state);
    }
}

fn render_wide(
    state: &DungeonState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let grid_cols = (state.board.size as u16 * 2 + 2).max(32);
    let h_chunks = Layout::default()
        .direction(LayoutDir::Horizontal)
        .constraints([Constraint::Length(grid_cols), Constraint::Min(26)])
        .split(area);

    let msg_h = message_height(&state.message, grid_cols.saturating_sub(2));
    let left_chunks = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([
            Constraint::Length(4),                                // Header
            Constraint::Length(state.board.size as u16 + 2),      // Grid + border
            Constraint::Length(msg_h),                            // Message
            Constraint::Length(banner_height(state)),             // Game Over / Victory
            Constraint::Min(0),
        ])
        .split(h_chunks[0]);

    let inventory_h = state.inventory.len().max(1) as u16 + 2;
    let right_chunks = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([
            Constraint::Length(7),           // Stats
            Constraint::Length(inventory_h), // Inventory
            Constraint::Length(status_lines(state).len() as u16 + 2), // Status
            Constraint::Length(6),           // Legend
            Constraint::Min(8),              // Controls
        ])
        .split(h_chunks[1]);

    render_header(state, f, left_chunks[0], false);
    render_grid(state, f, left_chunks[1]);
    render_message(state, f, left_chunks[2]);
    render_banner(state, f, left_chunks[3]);
    render_stats(state, f, right_chunks[0]);
    render_inventory(state, f, right_chunks[1]);
    render_status(state, f, right_chunks[2]);
    render_legend(f, right_chunks[3]);
    render_controls(f, right_chunks[4], click_state);
}

fn render_narrow(
    state: &DungeonState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let msg_h = message_height(&state.message, area.width.saturating_sub(2));
    let chunks = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([
            Constraint::Length(4),                           // Header
            Constraint::Length(state.board.size as u16 + 2), // Grid
            Constraint::Length(msg_h),                       // Message
            Constraint::Length(banner_height(state)),        // Banner
            Constraint::Length(5),                           // Compact stats
            Constraint::Min(8),                              // Controls
        ])
        .split(area);

    render_header(state, f, chunks[0], true);
    render_grid(state, f, chunks[1]);
    render_message(state, f, chunks[2]);
    render_banner(state, f, chunks[3]);
    render_compact_stats(state, f, chunks[4]);
    render_controls(f, chunks[5], click_state);
}

// ── Header / grid ─────────────────────────────────────────────

fn render_header(state: &DungeonState, f: &mut Frame, area: Rect, is_narrow: bool) {
    let spec = state.level_spec();
    let borders = if is_narrow {
        Borders::TOP | Borders::BOTTOM
    } else {
        Borders::ALL
    };

    let lines = vec![
        Line::from(Span::styled(
            format!("Level {}/{}: {}", state.level, state.max_level(), spec.name),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            spec.objective.clone(),
            Style::default().fg(Color::Gray),
        )),
    ];

    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(borders)
                .border_style(Style::default().fg(Color::Yellow))
                .title(" ASCII Dungeon "),
        )
        .alignment(Alignment::Center);
    f.render_widget(widget, area);
}

/// Glyph and colour for one occupant tag.
pub fn glyph(cell: Cell) -> (char, Color) {
    match cell {
        Cell::Empty => (' ', Color::Reset),
        Cell::Wall => ('#', Color::DarkGray),
        Cell::Player => ('@', Color::LightBlue),
        Cell::Npc => ('&', Color::Green),
        Cell::Enemy => ('E', Color::Red),
        Cell::Door => ('D', Color::Rgb(205, 133, 63)),
        Cell::Teleporter => ('T', Color::Magenta),
        Cell::Switch => ('S', Color::Cyan),
        Cell::Item(ItemKind::Generic) => ('*', Color::Gray),
        Cell::Item(ItemKind::Key) => ('K', Color::Yellow),
        Cell::Item(ItemKind::Potion) => ('P', Color::LightMagenta),
        Cell::Item(ItemKind::Weapon) => ('W', Color::LightRed),
        Cell::Item(ItemKind::Treasure) => ('$', Color::LightGreen),
    }
}

/// One line per grid row, each cell two columns wide.
pub fn grid_lines(state: &DungeonState) -> Vec<Line<'static>> {
    let board = &state.board;
    board
        .grid
        .iter()
        .enumerate()
        .map(|(y, row)| {
            let spans: Vec<Span> = row
                .iter()
                .enumerate()
                .map(|(x, &cell)| {
                    let (ch, color) = glyph(cell);
                    let mut style = Style::default().fg(color);
                    if cell == Cell::Player {
                        style = style.add_modifier(Modifier::BOLD);
                    }
                    // Active switches are highlighted.
                    if cell == Cell::Switch {
                        let active = board
                            .switch_at(Pos::new(x, y))
                            .map(|i| board.switches[i].active)
                            .unwrap_or(false);
                        if active {
                            style = style.add_modifier(Modifier::REVERSED);
                        }
                    }
                    Span::styled(format!("{} ", ch), style)
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

fn render_grid(state: &DungeonState, f: &mut Frame, area: Rect) {
    let border_color = match state.phase {
        GamePhase::Dead => Color::Red,
        GamePhase::Victory => Color::LightBlue,
        GamePhase::Playing => Color::DarkGray,
    };
    let widget = Paragraph::new(grid_lines(state)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color)),
    );
    f.render_widget(widget, area);
}

// ── Message / banner ──────────────────────────────────────────

/// Rows needed for the message panel, borders included.
pub fn message_height(message: &str, inner_width: u16) -> u16 {
    if inner_width == 0 {
        return 3;
    }
    let lines = Paragraph::new(message)
        .wrap(Wrap { trim: true })
        .line_count(inner_width);
    (lines.max(1) as u16).saturating_add(2)
}

fn render_message(state: &DungeonState, f: &mut Frame, area: Rect) {
    let widget = Paragraph::new(state.message.as_str())
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Message "),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(widget, area);
}

fn banner_height(state: &DungeonState) -> u16 {
    if state.is_dead() || state.phase == GamePhase::Victory {
        3
    } else {
        0
    }
}

fn render_banner(state: &DungeonState, f: &mut Frame, area: Rect) {
    let (text, color) = match state.phase {
        GamePhase::Playing => return,
        GamePhase::Dead => ("Game Over! Press R to restart.", Color::Red),
        GamePhase::Victory => ("Victory! All levels conquered!", Color::LightBlue),
    };
    let widget = Paragraph::new(Line::from(Span::styled(
        text,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)),
    )
    .alignment(Alignment::Center);
    f.render_widget(widget, area);
}

// ── Side panels ───────────────────────────────────────────────

/// `m:ss`.
pub fn format_time(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

fn label_value(label: &str, value: String, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {:<8}", label), Style::default().fg(Color::DarkGray)),
        Span::styled(value, Style::default().fg(color)),
    ])
}

fn health_color(state: &DungeonState) -> Color {
    if state.health * 10 <= state.max_health * 3 {
        Color::Red
    } else if state.health * 2 <= state.max_health {
        Color::Yellow
    } else {
        Color::Green
    }
}

fn render_stats(state: &DungeonState, f: &mut Frame, area: Rect) {
    let mut lines = vec![
        label_value(
            "Level",
            format!("{}/{}", state.level, state.max_level()),
            Color::White,
        ),
        label_value(
            "Grid",
            format!("{}x{}", state.board.size, state.board.size),
            Color::White,
        ),
        label_value(
            "Health",
            format!("{}/{}", state.health, state.max_health),
            health_color(state),
        ),
        label_value("Score", state.score.to_string(), Color::Yellow),
        label_value("Time", format_time(state.elapsed_secs()), Color::White),
    ];
    if let Some(weapon) = &state.weapon {
        lines.push(label_value("Weapon", weapon.clone(), Color::LightRed));
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Stats "),
    );
    f.render_widget(widget, area);
}

fn render_inventory(state: &DungeonState, f: &mut Frame, area: Rect) {
    let lines: Vec<Line> = if state.inventory.is_empty() {
        vec![Line::from(Span::styled(
            " Empty",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        state
            .inventory
            .iter()
            .map(|(id, count)| {
                Line::from(Span::styled(
                    format!(" {}: {}", id, count),
                    Style::default().fg(Color::Yellow),
                ))
            })
            .collect()
    };

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Inventory "),
    );
    f.render_widget(widget, area);
}

/// Remaining counts, then one line per switch with its wiring tag.
fn status_lines(state: &DungeonState) -> Vec<Line<'static>> {
    let mut lines = vec![
        label_value("Enemies", state.enemies_remaining().to_string(), Color::Red),
        label_value(
            "Treasure",
            state.treasures_remaining().to_string(),
            Color::LightGreen,
        ),
        label_value("Items", state.other_items_remaining().to_string(), Color::Gray),
    ];
    for switch in &state.board.switches {
        let (value, color) = if switch.active {
            ("on", Color::Cyan)
        } else {
            ("off", Color::DarkGray)
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {}: ", switch.affects),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(value, Style::default().fg(color)),
        ]));
    }
    lines
}

fn render_status(state: &DungeonState, f: &mut Frame, area: Rect) {
    let widget = Paragraph::new(status_lines(state)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Status "),
    );
    f.render_widget(widget, area);
}

fn render_compact_stats(state: &DungeonState, f: &mut Frame, area: Rect) {
    let inventory = if state.inventory.is_empty() {
        "Empty".to_string()
    } else {
        state
            .inventory
            .iter()
            .map(|(id, count)| format!("{}x{}", id, count))
            .collect::<Vec<_>>()
            .join(" ")
    };
    let lines = vec![
        Line::from(vec![
            Span::styled(
                format!(" HP {}/{}", state.health, state.max_health),
                Style::default().fg(health_color(state)),
            ),
            Span::styled(
                format!("  Score {}", state.score),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw(format!("  {}", format_time(state.elapsed_secs()))),
        ]),
        Line::from(Span::styled(
            format!(
                " Enemies {}  Treasure {}  Items {}",
                state.enemies_remaining(),
                state.treasures_remaining(),
                state.other_items_remaining()
            ),
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            format!(
                " {}  Inv: {}",
                state.weapon.as_deref().unwrap_or("No weapon"),
                inventory
            ),
            Style::default().fg(Color::Gray),
        )),
    ];
    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::TOP | Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(widget, area);
}

fn render_legend(f: &mut Frame, area: Rect) {
    let lines: Vec<Line> = LEGEND
        .chunks(3)
        .map(|row| {
            let spans: Vec<Span> = row
                .iter()
                .flat_map(|&(cell, name)| {
                    let (ch, color) = glyph(cell);
                    [
                        Span::styled(format!(" {}", ch), Style::default().fg(color)),
                        Span::styled(format!(" {:<10}", name), Style::default().fg(Color::Gray)),
                    ]
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Legend "),
    );
    f.render_widget(widget, area);
}

fn render_controls(f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(Color::Gray);
    let control = |key: &'static str, label: &'static str| {
        Line::from(vec![
            Span::styled(key, key_style),
            Span::styled(label, text_style),
        ])
    };

    let mut cl = ClickableList::new();
    cl.push_clickable(control(" [W] ", "Move up"), MOVE_UP);
    cl.push_clickable(control(" [S] ", "Move down"), MOVE_DOWN);
    cl.push_clickable(control(" [A] ", "Move left"), MOVE_LEFT);
    cl.push_clickable(control(" [D] ", "Move right"), MOVE_RIGHT);
    cl.push_clickable(control(" [R] ", "Restart"), RESTART);
    cl.push(Line::from(Span::styled(
        " Walk into enemies to attack",
        Style::default().fg(Color::DarkGray),
    )));

    let mut cs = click_state.borrow_mut();
    cl.register_targets(area, &mut cs, 1, 1);
    drop(cs);

    let widget = Paragraph::new(cl.into_lines()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Controls "),
    );
    f.render_widget(widget, area);
}
