use crate::eval_engine::{evaluate, Binding};

/// Pixel surface and math window for one plot. The scale is uniform: the
/// tighter of the two axes wins, so a unit is square on screen.
#[derive(Debug, Clone, Copy)]
pub struct PlotArea {
    pub width: u16,
    pub height: u16,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl PlotArea {
    /// A surface over the default [-10, 10] x [-10, 10] window.
    pub fn new(width: u16, height: u16) -> Self {
        PlotArea {
            width,
            height,
            x_min: -10.0,
            x_max: 10.0,
            y_min: -10.0,
            y_max: 10.0,
        }
    }

    pub fn pixels_per_unit(&self) -> f64 {
        let x_scale = self.width as f64 / (self.x_max - self.x_min);
        let y_scale = self.height as f64 / (self.y_max - self.y_min);
        x_scale.min(y_scale)
    }
}

/// One drawing step for a sampled curve, in pixel coordinates with the
/// row axis growing downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotCommand {
    /// Isolated sample: the first after a gap, or a likely discontinuity.
    Point { x: u16, y: u16 },
    /// Connects the previous visible sample to this one.
    Segment { x0: u16, y0: u16, x1: u16, y1: u16 },
}

/// Evaluates `expr` once per pixel column, left to right, and resolves
/// each sample into a draw command. A failed evaluation, a non-finite
/// value or an off-screen row is a gap: it emits nothing and the next
/// valid sample starts a new disconnected run. Consecutive samples whose
/// row delta reaches half the plot height are treated as a discontinuity
/// rather than a near-vertical line.
pub fn sample(expr: &str, area: &PlotArea) -> Vec<PlotCommand> {
    let ppu = area.pixels_per_unit();
    let center_x = (area.width / 2) as i32;
    let center_y = (area.height / 2) as i32;

    let mut commands = Vec::new();
    let mut prev: Option<(i32, i32)> = None;

    for px in 0..area.width as i32 {
        let math_x = (px - center_x) as f64 / ppu;
        let binding = Binding {
            name: 'x',
            value: math_x,
        };

        let math_y = match evaluate(expr, Some(binding)) {
            Ok(eval) if eval.warnings.is_empty() && eval.value.is_finite() => eval.value,
            _ => {
                prev = None;
                continue;
            }
        };

        let py = center_y - (math_y * ppu) as i32;
        if py < 0 || py >= area.height as i32 {
            prev = None;
            continue;
        }

        match prev {
            Some((prev_px, prev_py)) if (py - prev_py).abs() < area.height as i32 / 2 => {
                commands.push(PlotCommand::Segment {
                    x0: prev_px as u16,
                    y0: prev_py as u16,
                    x1: px as u16,
                    y1: py as u16,
                });
            }
            _ => {
                commands.push(PlotCommand::Point {
                    x: px as u16,
                    y: py as u16,
                });
            }
        }
        prev = Some((px, py));
    }

    commands
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(commands: &[PlotCommand]) -> Vec<u16> {
        commands
            .iter()
            .map(|cmd| match *cmd {
                PlotCommand::Point { x, .. } => x,
                PlotCommand::Segment { x1, .. } => x1,
            })
            .collect()
    }

    #[test]
    fn square_scale_uses_the_tighter_axis() {
        let area = PlotArea::new(40, 20);
        assert_eq!(area.pixels_per_unit(), 1.0);

        let area = PlotArea::new(20, 20);
        assert_eq!(area.pixels_per_unit(), 1.0);
    }

    #[test]
    fn straight_line_connects_consecutive_columns() {
        let area = PlotArea::new(20, 20);
        let commands = sample("x", &area);
        assert!(!commands.is_empty());

        // First visible sample opens a run, the rest extend it.
        assert!(matches!(commands[0], PlotCommand::Point { .. }));
        for cmd in &commands[1..] {
            assert!(matches!(cmd, PlotCommand::Segment { .. }));
        }

        // Segments step one column at a time, in ascending order.
        for cmd in &commands[1..] {
            if let PlotCommand::Segment { x0, x1, .. } = cmd {
                assert_eq!(*x1, x0 + 1);
            }
        }
    }

    #[test]
    fn division_by_zero_column_is_a_gap() {
        let area = PlotArea::new(20, 20);
        let commands = sample("1/x", &area);
        let cols = columns(&commands);

        // x = 0 lands on column 10; no command may touch it.
        assert!(!cols.contains(&10));
        for cmd in &commands {
            if let PlotCommand::Segment { x0, x1, .. } = cmd {
                assert_ne!(*x0, 10);
                assert_ne!(*x1, 10);
            }
        }

        // Both branches stay connected among themselves.
        assert!(commands.iter().any(|cmd| matches!(
            cmd,
            PlotCommand::Segment { x1, .. } if *x1 < 10
        )));
        assert!(commands.iter().any(|cmd| matches!(
            cmd,
            PlotCommand::Segment { x0, .. } if *x0 > 10
        )));

        // The run right of the gap starts fresh, not joined across it.
        let first_right = commands
            .iter()
            .find(|cmd| columns(&[**cmd])[0] > 10)
            .unwrap();
        assert!(matches!(first_right, PlotCommand::Point { .. }));
    }

    #[test]
    fn off_screen_samples_are_gaps() {
        let area = PlotArea::new(20, 20);
        let commands = sample("x^2", &area);
        assert!(!commands.is_empty());

        for cmd in &commands {
            match *cmd {
                PlotCommand::Point { y, .. } => assert!(y < area.height),
                PlotCommand::Segment { y0, y1, .. } => {
                    assert!(y0 < area.height);
                    assert!(y1 < area.height);
                }
            }
        }
    }

    #[test]
    fn unparseable_formula_yields_no_commands() {
        let area = PlotArea::new(20, 20);
        assert!(sample("2+&", &area).is_empty());
    }

    #[test]
    fn constant_formula_spans_the_full_width() {
        let area = PlotArea::new(20, 20);
        let commands = sample("3", &area);
        let cols = columns(&commands);
        assert_eq!(cols.len(), area.width as usize);
        assert_eq!(cols[0], 0);
        assert_eq!(*cols.last().unwrap(), area.width - 1);
    }
}
