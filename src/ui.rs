pub mod hud;
pub mod viewport;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::Span,
    widgets::{
        canvas::{Canvas, Circle, Line as CanvasLine, Rectangle},
        Block, Borders, Paragraph,
    },
    Frame,
};

use dingding::world::{WORLD_HEIGHT, WORLD_WIDTH};

use crate::App;

const HORIZONTAL_MARGIN: u16 = 1;

const SPARK_COLORS: [Color; 7] = [
    Color::Yellow,
    Color::Magenta,
    Color::Cyan,
    Color::Green,
    Color::Red,
    Color::Blue,
    Color::LightYellow,
];

pub struct Areas {
    pub hud: Rect,
    /// Bordered board around the play field
    pub board: Rect,
    pub field: Rect,
    pub status: Rect,
    pub legend: Option<Rect>,
}

/// Split the screen into hud, play field (inside its border), status and legend
pub fn areas(area: Rect, show_legend: bool) -> Areas {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(if show_legend { 1 } else { 0 }),
        ])
        .split(area);

    Areas {
        hud: chunks[0],
        board: chunks[1],
        field: field_block().inner(chunks[1]),
        status: chunks[2],
        legend: show_legend.then_some(chunks[3]),
    }
}

fn field_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(" dingding ")
        .title_alignment(Alignment::Center)
}

pub fn draw(app: &mut App, f: &mut Frame) {
    let areas = areas(f.area(), app.settings.show_legend);
    app.field = areas.field;

    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let dim_style = Style::default().add_modifier(Modifier::DIM);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let countdown_style = if app.game.display.is_masked() {
        Style::default().patch(bold_style).fg(Color::Red)
    } else {
        bold_style
    };

    let hud_line = hud::spread(
        areas.hud.width as usize,
        &app.game.display.to_string(),
        &hud::score_label(&app.game.session, app.game.best_score),
        &format!("mode: {}", app.game.input.mode()),
    );
    f.render_widget(Paragraph::new(Span::styled(hud_line, countdown_style)), areas.hud);

    render_field(app, f, areas.board);

    let status = Paragraph::new(Span::styled(hud::status_message(&app.game.session), bold_style))
        .alignment(Alignment::Center);
    f.render_widget(status, areas.status);

    if let Some(legend_area) = areas.legend {
        let legend = Paragraph::new(Span::styled(
            format!(
                "(space) start / (r)estart / (m)ode: {} / (esc)ape",
                app.game.input.mode()
            ),
            italic_style.patch(dim_style),
        ))
        .alignment(Alignment::Center);
        f.render_widget(legend, legend_area);
    }
}

fn render_field(app: &App, f: &mut Frame, area: Rect) {
    let world = &app.game.world;
    let drag = app.game.input.drag();
    let effect = &app.game.effect;

    let canvas = Canvas::default()
        .block(field_block())
        .marker(Marker::Braille)
        .x_bounds([0.0, WORLD_WIDTH])
        .y_bounds([0.0, WORLD_HEIGHT])
        .paint(|ctx| {
            let bell = world.bell;
            let (bx, by) = viewport::world_to_canvas(bell.pos);
            ctx.draw(&Rectangle {
                x: bx - bell.half_extents.x,
                y: by - bell.half_extents.y,
                width: bell.half_extents.x * 2.0,
                height: bell.half_extents.y * 2.0,
                color: Color::Yellow,
            });

            let (sx, sy) = viewport::world_to_canvas(world.striker.pos);
            if let Some(drag) = drag {
                let (ox, oy) = viewport::world_to_canvas(drag.origin);
                ctx.draw(&CanvasLine {
                    x1: ox,
                    y1: oy,
                    x2: sx,
                    y2: sy,
                    color: Color::DarkGray,
                });
            }

            ctx.draw(&Circle {
                x: sx,
                y: sy,
                radius: world.striker.radius,
                color: Color::Red,
            });

            if effect.is_active {
                ctx.layer();
                for spark in &effect.sparks {
                    let (px, py) = viewport::world_to_canvas(spark.pos);
                    if !(0.0..=WORLD_WIDTH).contains(&px) || !(0.0..=WORLD_HEIGHT).contains(&py) {
                        continue;
                    }

                    let color = SPARK_COLORS[spark.color_index % SPARK_COLORS.len()];
                    let style = if spark.is_text || spark.brightness() > 0.5 {
                        Style::default().fg(color).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(color).add_modifier(Modifier::DIM)
                    };
                    ctx.print(px, py, Span::styled(spark.symbol.to_string(), style));
                }
            }
        });

    f.render_widget(canvas, area);
}
