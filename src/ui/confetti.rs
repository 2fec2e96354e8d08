use ratatui::{
    symbols::Marker,
    widgets::canvas::{Canvas, Circle},
    Frame,
};

use crate::confetti::Confetti;

/// Paints the particles over whatever is already on screen. Particle `y` grows
/// downwards while the canvas grows upwards, hence the flip.
pub fn draw_confetti(f: &mut Frame, confetti: &Confetti) {
    if confetti.is_finished() {
        return;
    }
    let height = confetti.height();
    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([0.0, confetti.width()])
        .y_bounds([0.0, height])
        .paint(|ctx| {
            for p in confetti.particles() {
                if p.y < 0.0 {
                    continue;
                }
                ctx.draw(&Circle {
                    x: p.x,
                    y: height - p.y,
                    radius: p.radius,
                    color: p.color,
                });
            }
        });
    let area = f.area();
    f.render_widget(canvas, area);
}
