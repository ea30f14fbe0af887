//! Drawing view: grid, scene, marks and cursor on a braille canvas
//!
//! Canvas units map straight onto the ratatui canvas bounds, which are y-up
//! with the origin at the bottom-left, so nothing is flipped here.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    text::Span,
    widgets::{
        canvas::{Canvas, Context, Line, Rectangle},
        Block, Borders,
    },
    Frame,
};

use super::colors;
use crate::coords::Point;
use crate::editor::scene::SQUARE_SIZE;
use crate::editor::Editor;

/// Half the length of a cursor crosshair arm
const CURSOR_ARM: f64 = 6.0;

pub fn render(frame: &mut Frame, area: Rect, editor: &Editor) {
    let size = editor.canvas();
    let (w, h) = (f64::from(size.width), f64::from(size.height));
    let cursor = editor.cursor();

    let block = Block::default()
        .title(format!(" victor {} ", cursor))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .background_color(colors::paper())
        .x_bounds([0.0, w])
        .y_bounds([0.0, h])
        .paint(|ctx| {
            draw_grid(ctx, editor, w, h);
            ctx.layer();
            draw_scene(ctx, editor);
            ctx.layer();
            draw_marks(ctx, editor);
            draw_cursor(ctx, cursor);
        });

    frame.render_widget(canvas, area);
}

fn point(p: Point) -> (f64, f64) {
    (f64::from(p.x), f64::from(p.y))
}

fn line(ctx: &mut Context, a: Point, b: Point, color: Color) {
    let (x1, y1) = point(a);
    let (x2, y2) = point(b);
    ctx.draw(&Line::new(x1, y1, x2, y2, color));
}

fn draw_grid(ctx: &mut Context, editor: &Editor, w: f64, h: f64) {
    let grid = editor.grid();
    if !grid.is_visible() {
        return;
    }
    let color = colors::on_paper(editor.options.gridcolor);
    let size = grid.size();

    for x in grid.lines(size.width) {
        let x = f64::from(x);
        ctx.draw(&Line::new(x, 0.0, x, h, color));
    }
    for y in grid.lines(size.height) {
        let y = f64::from(y);
        ctx.draw(&Line::new(0.0, y, w, y, color));
    }
}

fn draw_scene(ctx: &mut Context, editor: &Editor) {
    let scene = editor.scene();

    for (_, corner) in scene.squares() {
        let (x, y) = point(corner);
        ctx.draw(&Rectangle {
            x,
            y,
            width: f64::from(SQUARE_SIZE),
            height: f64::from(SQUARE_SIZE),
            color: colors::SQUARE,
        });
    }

    for segment in scene.segments() {
        line(ctx, segment.start, segment.end, colors::on_paper(segment.color));
    }

    for path in scene.paths() {
        let color = colors::on_paper(path.color());
        for (a, b) in path.segments() {
            line(ctx, a, b, color);
        }
    }
}

fn draw_marks(ctx: &mut Context, editor: &Editor) {
    for (name, p) in editor.marks() {
        let (x, y) = point(*p);
        ctx.print(x, y, Span::styled(name.to_string(), Style::default().fg(colors::MARK)));
    }
}

fn draw_cursor(ctx: &mut Context, cursor: Point) {
    let (x, y) = point(cursor);
    ctx.draw(&Line::new(x - CURSOR_ARM, y, x + CURSOR_ARM, y, colors::CURSOR));
    ctx.draw(&Line::new(x, y - CURSOR_ARM, x, y + CURSOR_ARM, colors::CURSOR));
}
