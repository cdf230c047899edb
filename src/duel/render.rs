//! Loop Duel rendering.
//!
//! Layout (in progress): status + action queue + planning controls + log.
//! Title, stage select and the result screens are single panels. Every
//! scene dims while its crossfade is in the darker half.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::ClickableList;

use super::actions::*;
use super::combat::CombatPhase;
use super::editor::is_locked;
use super::effects::Side;
use super::host::{AssetId, Assets};
use super::logic::can_edit;
use super::ring::{ActionKind, ActionRing, ACTION_CAPACITY};
use super::stage::{Actor, StageId};
use super::state::{DuelState, Scene};

/// Keyboard shortcut shown next to each action in the palette.
pub const ACTION_KEYS: [char; 4] = ['Z', 'X', 'C', 'V'];

// ── Assets ──────────────────────────────────────────────────

/// Terminal glyphs standing in for textures.
pub struct GlyphAtlas {
    glyphs: HashMap<AssetId, char>,
}

impl GlyphAtlas {
    pub fn new() -> Self {
        let glyphs = ActionKind::ALL
            .into_iter()
            .map(|kind| (AssetId::ActionIcon(kind), kind.glyph()))
            .collect();
        Self { glyphs }
    }

    pub fn glyph(&self, asset: AssetId) -> Option<char> {
        self.glyphs.get(&asset).copied()
    }
}

impl Assets for GlyphAtlas {
    fn texture_available(&self, asset: AssetId) -> bool {
        self.glyphs.contains_key(&asset)
    }
}

// ── Entry ───────────────────────────────────────────────────

pub fn render(
    state: &DuelState,
    atlas: &GlyphAtlas,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    match state.scene.current() {
        Scene::TitleScreen => render_title(state, f, area, click_state),
        Scene::StageSelect => render_stage_select(state, f, area, click_state),
        Scene::GameInProgress => render_duel(state, atlas, f, area, click_state),
        Scene::GameOver | Scene::GameClear => render_result(state, f, area, click_state),
    }
}

// ── Helpers ─────────────────────────────────────────────────

fn hp_bar(current: i32, max: i32, width: usize) -> (String, Color) {
    let ratio = if max > 0 { current.max(0) as f64 / max as f64 } else { 0.0 };
    let filled = (ratio * width as f64).round() as usize;
    let bar = "\u{2588}".repeat(filled) + &"\u{2591}".repeat(width.saturating_sub(filled));
    let color = if ratio > 0.5 { Color::Green } else if ratio > 0.25 { Color::Yellow } else { Color::Red };
    (bar, color)
}

fn borders_for(area_width: u16) -> Borders {
    if is_narrow_layout(area_width) { Borders::TOP | Borders::BOTTOM } else { Borders::ALL }
}

/// Dim the whole scene while it is mostly faded out.
fn scene_style(state: &DuelState) -> Style {
    if state.scene.progress() < 0.5 {
        Style::default().add_modifier(Modifier::DIM)
    } else {
        Style::default()
    }
}

fn panel<'a>(title: &'a str, area: Rect) -> Block<'a> {
    Block::default()
        .borders(borders_for(area.width))
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(title, Style::default().fg(Color::DarkGray)))
}

/// ` [K] label` with the key in yellow; reversed when hovered.
fn hint(key: &str, label: String, id: u16, state: &DuelState, enabled: bool) -> Line<'static> {
    let (key_color, label_color) = if enabled {
        (Color::Yellow, Color::White)
    } else {
        (Color::DarkGray, Color::DarkGray)
    };
    let line = Line::from(vec![
        Span::styled(format!(" {key} "), Style::default().fg(key_color)),
        Span::styled(label, Style::default().fg(label_color)),
    ]);
    if enabled && state.hovered == Some(id) {
        line.style(Style::default().add_modifier(Modifier::REVERSED))
    } else {
        line
    }
}

fn finish(
    cl: ClickableList<'static>,
    block: Block,
    f: &mut Frame,
    area: Rect,
    style: Style,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let mut cs = click_state.borrow_mut();
    cl.register_targets_with_block(area, &block, &mut cs, 0, 0);
    drop(cs);
    f.render_widget(Paragraph::new(cl.into_lines()).block(block).style(style), area);
}

// ── Title ───────────────────────────────────────────────────

fn render_title(
    state: &DuelState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let mut cl = ClickableList::new();
    cl.push(Line::from(""));
    cl.push(Line::from(Span::styled(
        "  L O O P   D U E L",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )));
    cl.push(Line::from(""));
    cl.push(Line::from("  Queue up to ten actions. They replay in a loop,"));
    cl.push(Line::from("  one per turn, against each enemy's own loop."));
    cl.push(Line::from(""));
    for (kind, note) in [
        (ActionKind::Slash, "blocked by Parry"),
        (ActionKind::Tackle, "blocked by Evade"),
        (ActionKind::Parry, "stops Slash"),
        (ActionKind::Evade, "stops Tackle"),
    ] {
        cl.push(Line::from(vec![
            Span::styled(format!("   {} ", kind.glyph()), Style::default().fg(Color::Yellow)),
            Span::styled(format!("{:<7}", kind.name()), Style::default().fg(Color::White)),
            Span::styled(note, Style::default().fg(Color::DarkGray)),
        ]));
    }
    cl.push(Line::from(""));
    cl.push_clickable(hint("[Enter]", "Begin".into(), CONFIRM, state, true), CONFIRM);

    let block = panel(" Loop Duel ", area);
    finish(cl, block, f, area, scene_style(state), click_state);
}

// ── Stage select ────────────────────────────────────────────

fn render_stage_select(
    state: &DuelState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let mut cl = ClickableList::new();
    cl.push(Line::from(""));
    cl.push(Line::from(Span::styled(" Choose a stage:", Style::default().fg(Color::White))));
    cl.push(Line::from(""));
    for stage in StageId::ALL {
        let id = STAGE_BASE + stage.index() as u16;
        cl.push_clickable(hint(&format!("[{}]", stage.index() + 1), stage_summary(stage), id, state, true), id);
    }

    let block = panel(" Stage Select ", area);
    finish(cl, block, f, area, scene_style(state), click_state);
}

fn stage_summary(stage: StageId) -> String {
    let waves = stage.waves();
    let enemies: usize = waves.iter().map(|w| w.len()).sum();
    let plural = |n: usize| if n == 1 { "" } else { "s" };
    format!(
        "{:<10} {} wave{}, {} enem{}",
        stage.name(),
        waves.len(),
        plural(waves.len()),
        enemies,
        if enemies == 1 { "y" } else { "ies" }
    )
}

// ── Duel ────────────────────────────────────────────────────

fn render_duel(
    state: &DuelState,
    atlas: &GlyphAtlas,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let queue_height = ACTION_CAPACITY as u16 + 3;
    let (status, queue, controls, log) = if is_narrow_layout(area.width) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(7),
                Constraint::Length(queue_height),
                Constraint::Length(9),
                Constraint::Min(3),
            ])
            .split(area);
        (chunks[0], chunks[1], chunks[2], chunks[3])
    } else {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);
        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(7), Constraint::Min(queue_height)])
            .split(columns[0]);
        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(9), Constraint::Min(3)])
            .split(columns[1]);
        (left[0], left[1], right[0], right[1])
    };

    render_status(state, atlas, f, status);
    render_queue(state, f, queue, click_state);
    render_controls(state, f, controls, click_state);
    render_log(state, f, log);
}

fn render_status(state: &DuelState, atlas: &GlyphAtlas, f: &mut Frame, area: Rect) {
    let combat = &state.combat;
    let progression = &combat.progression;
    let phase_style = if combat.phase.progress() < 0.5 {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    };
    let wave_count = combat.waves.len();
    let enemy_count = combat.current_wave().map_or(0, |w| w.len());

    let mut lines = vec![Line::from(vec![
        Span::styled(format!(" {} ", state.stage.name()), Style::default().fg(Color::White)),
        Span::styled(
            format!(
                "wave {}/{}  enemy {}/{}  ",
                (progression.chain_index + 1).min(wave_count),
                wave_count,
                (progression.enemy_index + 1).min(enemy_count),
                enemy_count,
            ),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(combat.phase.next().label(), phase_style),
    ])];
    lines.push(turn_timer(state));

    let last = combat.last_turn;
    lines.push(actor_line("You  ", &combat.player, last.map(|t| t.player), Side::Player, state, atlas));
    if let Some(enemy) = combat.current_enemy() {
        lines.push(actor_line("Enemy", enemy, last.map(|t| t.enemy), Side::Enemy, state, atlas));
        lines.push(Line::from(vec![
            Span::styled("  loop  ", Style::default().fg(Color::DarkGray)),
            ring_strip(&enemy.actions, None),
        ]));
    }

    let block = panel(" Duel ", area);
    f.render_widget(
        Paragraph::new(lines).block(block).style(scene_style(state)),
        area,
    );
}

/// Countdown to the next turn while fighting; wave state otherwise.
fn turn_timer(state: &DuelState) -> Line<'static> {
    let combat = &state.combat;
    if combat.phase.is_settled_in(CombatPhase::RunningTurn) {
        let filled = (combat.turn_progress() * 10.0).round() as usize;
        return Line::from(vec![
            Span::styled(" turn  ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                "\u{25b8}".repeat(filled) + &"\u{00b7}".repeat(10 - filled.min(10)),
                Style::default().fg(Color::Cyan),
            ),
        ]);
    }
    match combat.current_wave() {
        Some(wave) if wave.is_exhausted() => Line::from(Span::styled(
            " wave cleared",
            Style::default().fg(Color::Yellow),
        )),
        _ => Line::from(""),
    }
}

fn actor_line(
    label: &'static str,
    actor: &Actor,
    last: Option<ActionKind>,
    side: Side,
    state: &DuelState,
    atlas: &GlyphAtlas,
) -> Line<'static> {
    let (bar, color) = hp_bar(actor.health, actor.max_health, 10);
    let mut spans = vec![
        Span::styled(format!(" {label} "), Style::default().fg(Color::White)),
        Span::styled(bar, Style::default().fg(color)),
        Span::styled(
            format!(" {}/{}", actor.health.max(0), actor.max_health),
            Style::default().fg(Color::DarkGray),
        ),
    ];
    if let Some(kind) = last {
        spans.push(Span::styled(
            format!("  {} {}", kind.glyph(), kind.name()),
            Style::default().fg(Color::White),
        ));
    }
    for effect in state.effects.iter().filter(|e| e.target == side) {
        let Some(glyph) = atlas.glyph(effect.asset) else {
            continue;
        };
        let color = match effect.strength() {
            s if s > 0.66 => Color::LightRed,
            s if s > 0.33 => Color::Red,
            _ => Color::DarkGray,
        };
        spans.push(Span::styled(format!(" {glyph}"), Style::default().fg(color).add_modifier(Modifier::BOLD)));
    }
    Line::from(spans)
}

/// Glyphs of a ring, `>` before the replay cursor and `.` after each
/// committed slot.
fn ring_strip(ring: &ActionRing, locked: Option<usize>) -> Span<'static> {
    if ring.is_empty() {
        return Span::styled("-", Style::default().fg(Color::DarkGray));
    }
    let text: String = ring
        .as_slice()
        .iter()
        .enumerate()
        .map(|(i, kind)| {
            let mark = if i == ring.cursor() { '>' } else { ' ' };
            let lock = if locked.is_some_and(|b| i < b) { '.' } else { ' ' };
            format!("{mark}{}{lock}", kind.glyph())
        })
        .collect();
    Span::styled(text, Style::default().fg(Color::Yellow))
}

fn render_queue(
    state: &DuelState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let combat = &state.combat;
    let ring = &combat.player.actions;
    let editable = can_edit(state);
    let mut cl = ClickableList::new();

    let mut header = vec![
        Span::styled(" loop ", Style::default().fg(Color::DarkGray)),
        ring_strip(ring, combat.progression.locked_in),
    ];
    if let Some(next) = ring.peek() {
        header.push(Span::styled(
            format!("  next: {}", next.name()),
            Style::default().fg(Color::DarkGray),
        ));
    }
    cl.push(Line::from(header));
    if ring.is_empty() {
        cl.push(Line::from(Span::styled(
            "  (empty: add actions below)",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for (i, kind) in ring.as_slice().iter().enumerate() {
        let locked = is_locked(&combat.progression, i);
        let id = DELETE_BASE + i as u16;
        let mut spans = vec![
            Span::styled(format!(" {:>2}. ", i + 1), Style::default().fg(Color::DarkGray)),
            Span::styled(format!("{} {:<7}", kind.glyph(), kind.name()), Style::default().fg(Color::White)),
        ];
        if i == ring.cursor() {
            spans.push(Span::styled(" <- next", Style::default().fg(Color::Yellow)));
        }
        if locked {
            spans.push(Span::styled(" locked", Style::default().fg(Color::DarkGray)));
        } else if editable {
            spans.push(Span::styled(" (tap to remove)", Style::default().fg(Color::DarkGray)));
        }
        let line = Line::from(spans);
        if editable && !locked {
            let line = if state.hovered == Some(id) {
                line.style(Style::default().add_modifier(Modifier::REVERSED))
            } else {
                line
            };
            cl.push_clickable(line, id);
        } else {
            cl.push(line);
        }
    }

    let block = panel(" Queue ", area);
    finish(cl, block, f, area, scene_style(state), click_state);
}

fn render_controls(
    state: &DuelState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let combat = &state.combat;
    let editable = can_edit(state);
    let ring = &combat.player.actions;
    let mut cl = ClickableList::new();

    for (kind, key) in ActionKind::ALL.into_iter().zip(ACTION_KEYS) {
        let id = push_id(kind);
        let label = format!("{} {}", kind.glyph(), kind.name());
        cl.push_clickable(hint(&format!("[{key}]"), label, id, state, editable && !ring.is_full()), id);
    }
    cl.push_clickable(hint("[D]", "Delete last".into(), DELETE_LAST, state, editable), DELETE_LAST);
    cl.push_clickable(hint("[P]", "Lock in".into(), LOCK_IN, state, editable && !ring.is_empty()), LOCK_IN);
    let resets = combat.progression.resets_left;
    cl.push_clickable(hint("[R]", format!("Reset ({resets} left)"), RESET, state, editable && resets > 0), RESET);

    let title = if combat.phase.next() == CombatPhase::PlayerPlanning { " Plan " } else { " Actions " };
    let block = panel(title, area);
    finish(cl, block, f, area, scene_style(state), click_state);
}

fn render_log(state: &DuelState, f: &mut Frame, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;
    let skip = state.log.len().saturating_sub(visible);
    let lines: Vec<Line> = state
        .log
        .iter()
        .skip(skip)
        .map(|entry| Line::from(Span::styled(format!(" {entry}"), Style::default().fg(Color::Gray))))
        .collect();
    let block = panel(" Log ", area);
    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }).style(scene_style(state)),
        area,
    );
}

// ── Result ──────────────────────────────────────────────────

fn render_result(
    state: &DuelState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let cleared = state.scene.current() == Scene::GameClear;
    let (headline, color) = if cleared {
        ("  STAGE CLEAR", Color::Yellow)
    } else {
        ("  DEFEAT", Color::Red)
    };

    let mut cl = ClickableList::new();
    cl.push(Line::from(""));
    cl.push(Line::from(Span::styled(
        headline,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )));
    cl.push(Line::from(Span::styled(
        format!("  {}", state.stage.name()),
        Style::default().fg(Color::White),
    )));
    if let Some(entry) = state.log.last() {
        cl.push(Line::from(Span::styled(format!("  {entry}"), Style::default().fg(Color::DarkGray))));
    }
    cl.push(Line::from(""));
    cl.push_clickable(hint("[Enter]", "Stage select".into(), CONFIRM, state, true), CONFIRM);
    cl.push_clickable(hint("[R]", "Retry".into(), RETRY, state, true), RETRY);

    let block = panel(if cleared { " Victory " } else { " Game Over " }, area);
    finish(cl, block, f, area, scene_style(state), click_state);
}
