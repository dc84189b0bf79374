use crate::geometry::{Direction, Vec2};
use crate::session::{Session, Summary};
use ratatui::{
    prelude::*,
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Circle, Context, Line as CanvasLine, Rectangle},
        Block, Borders, Clear, Paragraph,
    },
};

const BACKGROUND: [u8; 3] = [0, 0, 0];
const GRID_LINE: Color = Color::Rgb(0x18, 0x18, 0x25);
const GAME_OVER_TEXT: Color = Color::Rgb(0x4c, 0xff, 0xd7);

/// Screen regions that react to mouse clicks, refreshed on every draw.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HitAreas {
    pad: Vec<(Direction, Rect)>,
    restart: Option<Rect>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Hit {
    Steer(Direction),
    Restart,
}

impl HitAreas {
    pub fn hit(&self, column: u16, row: u16) -> Option<Hit> {
        let pos = Position::new(column, row);
        if let Some(restart) = self.restart {
            if restart.contains(pos) {
                return Some(Hit::Restart);
            }
        }
        self.pad
            .iter()
            .find(|(_, rect)| rect.contains(pos))
            .map(|&(dir, _)| Hit::Steer(dir))
    }
}

/// Draws a whole frame. With a `summary` the board gives way to the
/// game-over screen and the pad to a restart button.
pub fn draw(frame: &mut Frame, session: &Session, summary: Option<&Summary>) -> HitAreas {
    let layout = Layout::default()
        .direction(layout::Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Score header
            Constraint::Min(0),    // Board
            Constraint::Length(3), // Buttons
        ])
        .split(frame.area());

    frame.render_widget(header(session), layout[0]);

    let block = Block::default().title(" snake ").borders(Borders::ALL);
    let board_area = fit_square(block.inner(layout[1]));
    frame.render_widget(block, layout[1]);

    let mut hits = HitAreas::default();
    match summary {
        Some(summary) => {
            frame.render_widget(GameOverScreen(summary), board_area);
            hits.restart = Some(render_restart(frame, layout[2]));
        }
        None => {
            frame.render_widget(Board { session }, board_area);
            hits.pad = render_pad(frame, layout[2]);
        }
    }
    hits
}

fn header(session: &Session) -> Paragraph<'static> {
    let line = Line::from(vec![
        Span::styled("SNAKE", Style::default().bold()),
        Span::raw("    Score: "),
        Span::styled(format!("{:02}", session.score()), Style::default().fg(Color::Yellow)),
        Span::raw("    Max: "),
        Span::styled(format!("{:02}", session.max_score()), Style::default().fg(Color::Yellow)),
    ]);
    Paragraph::new(line)
        .alignment(Alignment::Left)
        .block(Block::default().borders(Borders::ALL))
}

/// Largest square (in character aspect, two columns per row) centred in `area`.
pub fn fit_square(area: Rect) -> Rect {
    let height = area.height.min(area.width / 2);
    let width = height * 2;
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn button_row(area: Rect, buttons: usize, width: u16) -> Vec<Rect> {
    let mut constraints = vec![Constraint::Fill(1)];
    constraints.extend(std::iter::repeat(Constraint::Length(width)).take(buttons));
    constraints.push(Constraint::Fill(1));
    let cells = Layout::horizontal(constraints).split(area);
    cells[1..=buttons].to_vec()
}

fn render_pad(frame: &mut Frame, area: Rect) -> Vec<(Direction, Rect)> {
    let order = [Direction::Left, Direction::Up, Direction::Down, Direction::Right];
    let rects = button_row(area, order.len(), 7);
    order
        .into_iter()
        .zip(rects)
        .map(|(dir, rect)| {
            let label = match dir {
                Direction::Up => "▲",
                Direction::Down => "▼",
                Direction::Left => "◀",
                Direction::Right => "▶",
            };
            frame.render_widget(
                Paragraph::new(label)
                    .alignment(Alignment::Center)
                    .block(Block::default().borders(Borders::ALL)),
                rect,
            );
            (dir, rect)
        })
        .collect()
}

fn render_restart(frame: &mut Frame, area: Rect) -> Rect {
    let rect = button_row(area, 1, 13)[0];
    frame.render_widget(
        Paragraph::new("Restart")
            .alignment(Alignment::Center)
            .style(Style::default().fg(GAME_OVER_TEXT))
            .block(Block::default().borders(Borders::ALL)),
        rect,
    );
    rect
}

fn blend(base: [u8; 3], over: [u8; 3], alpha: f32) -> Color {
    let alpha = alpha.clamp(0.0, 1.0);
    let mix = |b: u8, o: u8| (b as f32 + (o as f32 - b as f32) * alpha).round() as u8;
    Color::Rgb(
        mix(base[0], over[0]),
        mix(base[1], over[1]),
        mix(base[2], over[2]),
    )
}

/// Painter for the field. Holds the field extent (to flip y, the canvas
/// grows upwards) and the logical distance between two pixel rows.
struct Pen {
    extent: f64,
    row_step: f64,
}

impl Pen {
    /// Canvas rectangle for a field rectangle with top-left corner `(x, y)`.
    fn rect(&self, x: f64, y: f64, size: f64, color: Color) -> Rectangle {
        Rectangle {
            x,
            y: self.extent - y - size,
            width: size,
            height: size,
            color,
        }
    }

    fn fill(&self, ctx: &mut Context, x: f64, y: f64, size: f64, color: Color) {
        let bottom = self.extent - y - size;
        let rows = ((size / self.row_step).ceil() as usize).max(1);
        for i in 0..=rows {
            let yy = (bottom + i as f64 * self.row_step).min(bottom + size);
            ctx.draw(&CanvasLine::new(x, yy, x + size, yy, color));
        }
    }

    fn fill_circle(&self, ctx: &mut Context, cx: f64, cy: f64, radius: f64, color: Color) {
        let cy = self.extent - cy;
        let rows = ((2.0 * radius / self.row_step).ceil() as usize).max(1);
        for i in 0..=rows {
            let dy = (-radius + i as f64 * self.row_step).min(radius);
            let half = (radius * radius - dy * dy).max(0.0).sqrt();
            ctx.draw(&CanvasLine::new(cx - half, cy + dy, cx + half, cy + dy, color));
        }
    }

    fn label(&self, ctx: &mut Context, center: Vec2<f64>, text: &'static str, style: Style) {
        ctx.print(center.x, self.extent - center.y, Span::styled(text, style));
    }
}

struct Board<'a> {
    session: &'a Session,
}

impl Widget for Board<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let session = self.session;
        let grid = session.grid();
        let extent = grid.extent() as f64;
        let cell = grid.cell_size as f64;
        let sprites = session.settings().sprites;
        let pen = Pen {
            extent,
            row_step: (extent / (area.height.max(1) as f64 * 2.0)) * 0.9,
        };

        let background = match session.flash() {
            Some(flash) => blend(BACKGROUND, flash.color, flash.alpha),
            None => Color::Black,
        };

        Canvas::default()
            .marker(Marker::HalfBlock)
            .background_color(background)
            .x_bounds([0.0, extent])
            .y_bounds([0.0, extent])
            .paint(|ctx| {
                for i in 1..grid.cells {
                    let f = (grid.cell_size * i) as f64;
                    ctx.draw(&CanvasLine::new(f, 0.0, f, extent, GRID_LINE));
                    ctx.draw(&CanvasLine::new(0.0, f, extent, f, GRID_LINE));
                }
                ctx.layer();

                let snake = session.snake();
                for seg in snake.history() {
                    let (x, y) = (seg.x as f64, seg.y as f64);
                    pen.fill(ctx, x, y, cell, Color::LightGreen);
                    ctx.draw(&pen.rect(x, y, cell, Color::Black));
                }

                let head = snake.head();
                let (hx, hy) = (head.x as f64, head.y as f64);
                let head_center = Vec2::new(hx + cell / 2.0, hy + cell / 2.0);
                if sprites {
                    pen.fill(ctx, hx, hy, cell, Color::Green);
                    let glyph = match snake.heading() {
                        Direction::Right => "▶",
                        Direction::Left => "◀",
                        Direction::Down => "▼",
                        Direction::Up => "▲",
                    };
                    pen.label(ctx, head_center, glyph, Style::default().fg(Color::Black).bold());
                } else {
                    pen.fill(ctx, hx, hy, cell, Color::LightGreen);
                }

                let food = session.food();
                let size = food.size() as f64;
                let food_center = Vec2::new(
                    food.pos().x as f64 + size / 2.0,
                    food.pos().y as f64 + size / 2.0,
                );
                if sprites {
                    ctx.draw(&Circle {
                        x: food_center.x,
                        y: extent - food_center.y,
                        radius: size / 2.0,
                        color: Color::Red,
                    });
                    pen.label(ctx, food_center, "●", Style::default().fg(Color::LightRed).bold());
                } else {
                    pen.fill_circle(ctx, food_center.x, food_center.y, size / 2.0, Color::Red);
                }
                ctx.layer();

                for p in session.particles().iter() {
                    pen.fill(ctx, p.pos.x as f64, p.pos.y as f64, p.size as f64, Color::White);
                }
            })
            .render(area, buf);
    }
}

struct GameOverScreen<'a>(&'a Summary);

impl Widget for GameOverScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);
        let style = Style::default().fg(GAME_OVER_TEXT);
        let lines = vec![
            Line::styled("GAME OVER", style.bold()),
            Line::raw(""),
            Line::styled(format!("SCORE {}", self.0.score), style),
            Line::styled(format!("MAXSCORE {}", self.0.max_score), style),
            Line::raw(""),
            Line::raw("R or click Restart to play again, Q to quit"),
        ];
        let top = area.height.saturating_sub(lines.len() as u16) / 2;
        let text_area = Rect {
            y: area.y + top,
            height: area.height - top,
            ..area
        };
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(text_area, buf);
    }
}
