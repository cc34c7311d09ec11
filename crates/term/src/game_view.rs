//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Layout, left to right: the board frame, a side panel (next piece, session
//! stats, key help) and, when there is room, the ranking panel. Phase
//! overlays (press enter, paused, game over with the name prompt) are drawn
//! on top of the board.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::leaderboard::Record;
use crate::types::{Mode, Phase, LINES_PER_LEVEL};

const SIDE_W: u16 = 22;
const RANK_W: u16 = 42;
const RANK_NAME_W: usize = 14;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Ranking rows to list, already filtered and ordered.
#[derive(Debug, Clone, Copy)]
pub struct RankingPanel<'a> {
    /// `None` means all modes.
    pub filter: Option<Mode>,
    pub records: &'a [&'a Record],
}

/// Score-entry prompt state.
#[derive(Debug, Clone, Copy)]
pub struct NamePrompt<'a> {
    pub text: &'a str,
    /// Validation message from the last rejected submit.
    pub message: Option<&'a str>,
}

/// Everything drawn besides the game itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct Panels<'a> {
    pub ranking: Option<RankingPanel<'a>>,
    pub prompt: Option<NamePrompt<'a>>,
    /// One status line shown in the game-over overlay.
    pub notice: Option<&'a str>,
}

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

struct Layout {
    start_x: u16,
    start_y: u16,
    frame_w: u16,
    frame_h: u16,
    side_x: Option<u16>,
    rank_x: Option<u16>,
}

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const LABEL: CellStyle = CellStyle::fg(Rgb::new(220, 220, 220)).bold();
const VALUE: CellStyle = CellStyle::fg(Rgb::new(200, 200, 200));
const HINT: CellStyle = CellStyle::fg(Rgb::new(150, 150, 160)).dim();
const WARN: CellStyle = CellStyle::fg(Rgb::new(255, 110, 110)).bold();

impl GameView {
    fn layout(&self, snap: &GameSnapshot, panels: &Panels<'_>, viewport: Viewport) -> Layout {
        let frame_w = snap.width * self.cell_w + 2;
        let frame_h = snap.height * self.cell_h + 2;

        let mut total = frame_w;
        let show_side = viewport.width >= total + 2 + SIDE_W;
        if show_side {
            total += 2 + SIDE_W;
        }
        let show_rank =
            show_side && panels.ranking.is_some() && viewport.width >= total + 2 + RANK_W;
        if show_rank {
            total += 2 + RANK_W;
        }

        let start_x = viewport.width.saturating_sub(total) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;
        let side_x = show_side.then(|| start_x + frame_w + 2);
        let rank_x = side_x.filter(|_| show_rank).map(|x| x + SIDE_W + 2);

        Layout {
            start_x,
            start_y,
            frame_w,
            frame_h,
            side_x,
            rank_x,
        }
    }

    /// Render into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        panels: &Panels<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let layout = self.layout(snap, panels, viewport);
        let (start_x, start_y) = (layout.start_x, layout.start_y);

        // Background for play area.
        fb.fill_rect(
            start_x + 1,
            start_y + 1,
            snap.width * self.cell_w,
            snap.height * self.cell_h,
            ' ',
            CellStyle::fg(Rgb::new(80, 80, 90)).on(PLAY_BG),
        );
        fb.draw_box(
            start_x,
            start_y,
            layout.frame_w,
            layout.frame_h,
            CellStyle::fg(Rgb::new(200, 200, 200)),
        );

        // Settled cells.
        for y in 0..snap.height {
            for x in 0..snap.width {
                match snap.cell(x, y) {
                    Some(color) => self.draw_block(fb, &layout, x, y, Rgb::from(color)),
                    None => {
                        let dot = CellStyle::fg(Rgb::new(90, 90, 100)).on(PLAY_BG).dim();
                        self.fill_cell_rect(fb, &layout, x, y, '·', dot);
                    }
                }
            }
        }

        if let Some(active) = snap.active {
            // Ghost first so the active piece wins where they overlap.
            if let Some(ghost_y) = snap.ghost_y {
                let ghost = CellStyle::fg(Rgb::from(active.color)).on(PLAY_BG).dim();
                for (x, y) in active.cells() {
                    if let Some((x, y)) = self.on_board(snap, x, y - active.y + ghost_y) {
                        self.fill_cell_rect(fb, &layout, x, y, '░', ghost);
                    }
                }
            }
            for (x, y) in active.cells() {
                if let Some((x, y)) = self.on_board(snap, x, y) {
                    self.draw_block(fb, &layout, x, y, Rgb::from(active.color));
                }
            }
        }

        if let Some(side_x) = layout.side_x {
            self.draw_side_panel(fb, snap, viewport, side_x, start_y);
        }
        if let (Some(rank_x), Some(ranking)) = (layout.rank_x, panels.ranking) {
            draw_ranking_panel(fb, &ranking, viewport, rank_x, start_y);
        }

        self.draw_phase_overlay(fb, snap, panels, &layout);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &GameSnapshot,
        panels: &Panels<'_>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, panels, viewport, &mut fb);
        fb
    }

    fn on_board(&self, snap: &GameSnapshot, x: i16, y: i16) -> Option<(u16, u16)> {
        if x >= 0 && y >= 0 && (x as u16) < snap.width && (y as u16) < snap.height {
            Some((x as u16, y as u16))
        } else {
            None
        }
    }

    fn draw_block(&self, fb: &mut FrameBuffer, layout: &Layout, x: u16, y: u16, color: Rgb) {
        let style = CellStyle::fg(color).on(PLAY_BG).bold();
        self.fill_cell_rect(fb, layout, x, y, '█', style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        layout: &Layout,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = layout.start_x + 1 + cell_x * self.cell_w;
        let py = layout.start_y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        x: u16,
        start_y: u16,
    ) {
        let mut y = start_y;
        fb.put_str(x, y, "NEXT", LABEL);
        y += 1;

        // Preview area: every rotation-0 shape is at most 2 rows tall.
        if let Some(next) = snap.next {
            let style = CellStyle::fg(Rgb::from(next.color)).bold();
            for (dx, dy) in next.shape.minos() {
                let px = x + dx as u16 * self.cell_w;
                let py = y + dy as u16 * self.cell_h;
                fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
            }
        } else {
            fb.put_str(x, y, "-", VALUE);
        }
        y += 2 * self.cell_h + 1;

        let target = snap.start_level.saturating_mul(LINES_PER_LEVEL);
        let stats: [(&str, Stat); 7] = [
            ("MODE", Stat::Text(snap.mode.as_str())),
            ("START LV", Stat::Num(snap.start_level)),
            ("SCORE", Stat::Num(snap.score)),
            ("LEVEL", Stat::Num(snap.level)),
            ("LINES", Stat::Num(snap.lines)),
            ("TARGET", Stat::Num(target)),
            ("SPEED ms", Stat::Num(snap.drop_interval_ms)),
        ];
        for (label, stat) in stats {
            if y >= viewport.height {
                return;
            }
            fb.put_str(x, y, label, LABEL);
            match stat {
                Stat::Text(s) => fb.put_str(x + 10, y, s, VALUE),
                Stat::Num(n) => fb.put_u32(x + 10, y, n, VALUE),
            };
            y += 1;
        }

        y += 1;
        let help = [
            "←→ move   ↑ rotate",
            "↓ soft    ␣ hard drop",
            "Enter start  P pause",
            "R restart    Q quit",
            "Tab ranking filter",
        ];
        for line in help {
            if y >= viewport.height {
                return;
            }
            fb.put_str(x, y, line, HINT);
            y += 1;
        }
    }

    fn draw_phase_overlay(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        panels: &Panels<'_>,
        layout: &Layout,
    ) {
        let title = CellStyle::fg(Rgb::new(255, 255, 255)).bold();
        let mut lines: Vec<(String, CellStyle)> = Vec::new();

        match snap.phase {
            Phase::Running => return,
            Phase::Idle => {
                lines.push(("PRESS ENTER".to_string(), title));
                lines.push(("to start".to_string(), VALUE));
            }
            Phase::Paused => {
                lines.push(("PAUSED".to_string(), title));
                lines.push(("P to resume".to_string(), VALUE));
            }
            Phase::GameOver => {
                lines.push(("GAME OVER".to_string(), title));
                lines.push((format!("score {}  lines {}", snap.score, snap.lines), VALUE));
                if let Some(prompt) = panels.prompt {
                    lines.push((String::new(), VALUE));
                    lines.push((format!("NAME: {}_", prompt.text), LABEL));
                    if let Some(message) = prompt.message {
                        lines.push((message.to_string(), WARN));
                    }
                    lines.push(("Enter save  Esc skip".to_string(), HINT));
                }
            }
        }
        if let Some(notice) = panels.notice {
            lines.push((notice.to_string(), HINT));
        }

        let inner_w = lines
            .iter()
            .map(|(s, _)| s.chars().count() as u16)
            .max()
            .unwrap_or(0)
            + 4;
        let box_h = lines.len() as u16 + 2;
        let center_x = layout.start_x + layout.frame_w / 2;
        let box_x = center_x.saturating_sub(inner_w / 2 + 1);
        let box_y = (layout.start_y + layout.frame_h / 2).saturating_sub(box_h / 2);

        let panel = CellStyle::fg(Rgb::new(200, 200, 200));
        fb.fill_rect(box_x, box_y, inner_w + 2, box_h, ' ', panel);
        fb.draw_box(box_x, box_y, inner_w + 2, box_h, panel);
        for (i, (text, style)) in lines.iter().enumerate() {
            fb.put_str_centered(box_x + 1, box_y + 1 + i as u16, inner_w, text, *style);
        }
    }
}

enum Stat<'a> {
    Text(&'a str),
    Num(u32),
}

fn filter_label(filter: Option<Mode>) -> &'static str {
    filter.map_or("All", |m| m.as_str())
}

/// Write at most `max` characters of `s`.
fn put_str_max(fb: &mut FrameBuffer, x: u16, y: u16, s: &str, max: usize, style: CellStyle) {
    let mut cx = x;
    for ch in s.chars().take(max) {
        fb.put_char(cx, y, ch, style);
        cx = cx.saturating_add(1);
    }
}

fn draw_ranking_panel(
    fb: &mut FrameBuffer,
    ranking: &RankingPanel<'_>,
    viewport: Viewport,
    x: u16,
    start_y: u16,
) {
    let mut y = start_y;
    let end = fb.put_str(x, y, "RANKING ", LABEL);
    fb.put_str(end, y, filter_label(ranking.filter), VALUE);
    y += 2;

    let name_x = x + 4;
    let mode_x = name_x + RANK_NAME_W as u16 + 1;
    let score_x = mode_x + 7;
    let level_x = score_x + 7;
    let lines_x = level_x + 4;

    fb.put_str(x, y, "#", HINT);
    fb.put_str(name_x, y, "NAME", HINT);
    fb.put_str(mode_x, y, "MODE", HINT);
    fb.put_str(score_x, y, "SCORE", HINT);
    fb.put_str(level_x, y, "LV", HINT);
    fb.put_str(lines_x, y, "LN", HINT);
    y += 1;

    if ranking.records.is_empty() {
        fb.put_str(x, y, "no scores yet", HINT);
        return;
    }

    for (i, record) in ranking.records.iter().enumerate() {
        if y >= viewport.height {
            return;
        }
        let style = if i == 0 { VALUE.bold() } else { VALUE };
        fb.put_u32(x, y, i as u32 + 1, style);
        put_str_max(fb, name_x, y, &record.name, RANK_NAME_W, style);
        fb.put_str(mode_x, y, record.mode.as_str(), style);
        fb.put_u32(score_x, y, record.score, style);
        fb.put_u32(level_x, y, record.level, style);
        fb.put_u32(lines_x, y, record.lines, style);
        y += 1;
    }

    if y + 1 < viewport.height {
        fb.put_str(x, y + 1, "Tab: All/Easy/Normal/Hard", HINT);
    }
}
