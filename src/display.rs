//! What the operator sees: quadrant layout and frame rendering.
//!
//! ```text
//! row 0: kP: 10.00  kD: 3.00
//! row 1: kI: 0.00   L: 24.00
//! row 2: Y: 11.87
//! ```

use crate::config::{LCD_COLUMNS, QUADRANT_WIDTH};
use crate::error::TuneResult;
use crate::gains::{Axis, Gain};
use crate::motion::Pose;
use crate::session::SessionSnapshot;

/// Text display the session is rendered on.
///
/// Both calls block until the hardware has accepted the command.
pub trait DisplaySink {
    fn clear_line(&mut self, row: u8) -> TuneResult<()>;
    fn write_text(&mut self, row: u8, col: u8, text: &str) -> TuneResult<()>;
}

/// A fixed region of the display: one half of one row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Quadrant {
    pub row: u8,
    pub col: u8,
}

impl Quadrant {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// First display column of the quadrant.
    pub fn column_offset(&self) -> u8 {
        self.col * QUADRANT_WIDTH
    }
}

/// Text of every quadrant for one display refresh, in row order.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub cells: Vec<(Quadrant, String)>,
}

impl Frame {
    pub fn text_at(&self, quadrant: Quadrant) -> Option<&str> {
        self.cells
            .iter()
            .find(|(q, _)| *q == quadrant)
            .map(|(_, text)| text.as_str())
    }

    /// Rows covered by the frame, in order and without repeats.
    fn rows(&self) -> Vec<u8> {
        let mut rows: Vec<u8> = self.cells.iter().map(|(q, _)| q.row).collect();
        rows.dedup();
        rows
    }

    /// Writes the frame. Each row is cleared once, then its quadrants are written.
    pub fn draw(&self, sink: &mut impl DisplaySink) -> TuneResult<()> {
        for row in self.rows() {
            sink.clear_line(row)?;
            for (quadrant, text) in self.cells.iter().filter(|(q, _)| q.row == row) {
                sink.write_text(row, quadrant.column_offset(), text)?;
            }
        }
        Ok(())
    }
}

/// Most decimals a value is ever shown with.
const MAX_DECIMALS: usize = 6;

/// Decimal places that make an edit of `step` visible, never fewer than two.
fn step_decimals(step: f64) -> usize {
    let places = (-step.log10() - 1e-9).ceil();
    if places.is_finite() {
        places.clamp(2.0, MAX_DECIMALS as f64) as usize
    } else {
        MAX_DECIMALS
    }
}

/// Formats `label: value` in at most `width` characters.
///
/// Decimals are dropped first. If the integer part alone is too wide the
/// value switches to exponent notation, so leading digits are never cut.
fn cell(label: &str, value: f64, decimals: usize, width: usize) -> String {
    for precision in (0..=decimals).rev() {
        let text = format!("{}: {:.*}", label, precision, value);
        if text.len() <= width {
            return text;
        }
    }
    for precision in (0..=decimals).rev() {
        let text = format!("{}: {:.*e}", label, precision, value);
        if text.len() <= width {
            return text;
        }
    }
    let mut text = format!("{}: {:.0e}", label, value);
    text.truncate(width);
    text
}

/// Builds the frame for a session snapshot and the chassis pose.
///
/// Gains and the target take one quadrant each. The feedback value is alone
/// on its row and may use all of it.
pub fn render(snapshot: &SessionSnapshot, pose: Pose) -> Frame {
    let quadrant = QUADRANT_WIDTH as usize;
    let decimals = step_decimals(snapshot.step);

    let mut cells: Vec<(Quadrant, String)> = [
        (Quadrant::new(0, 0), Gain::P),
        (Quadrant::new(0, 1), Gain::D),
        (Quadrant::new(1, 0), Gain::I),
    ]
    .into_iter()
    .map(|(q, gain)| {
        let label = gain.to_string();
        (q, cell(&label, snapshot.gains.get(gain), decimals, quadrant))
    })
    .collect();

    let (target, feedback) = match snapshot.active {
        Axis::Lateral => (
            cell("L", snapshot.target, 2, quadrant),
            cell("Y", pose.y, 2, LCD_COLUMNS as usize),
        ),
        Axis::Angular => (
            cell("H", snapshot.target, 2, quadrant),
            cell("Theta", pose.theta, 2, LCD_COLUMNS as usize),
        ),
    };
    cells.push((Quadrant::new(1, 1), target));
    cells.push((Quadrant::new(2, 0), feedback));

    Frame { cells }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gains::GainSet;
    use crate::mocks::mock_display::RecordingDisplay;

    fn lateral_snapshot() -> SessionSnapshot {
        SessionSnapshot {
            active: Axis::Lateral,
            gains: GainSet::new(10.0, 0.5, 3.0),
            target: 24.0,
            step: 1.0,
        }
    }

    #[test]
    fn test_lateral_frame() {
        let pose = Pose {
            x: 0.0,
            y: 11.874,
            theta: 45.0,
        };
        let frame = render(&lateral_snapshot(), pose);

        assert_eq!(frame.text_at(Quadrant::new(0, 0)), Some("kP: 10.00"));
        assert_eq!(frame.text_at(Quadrant::new(0, 1)), Some("kD: 3.00"));
        assert_eq!(frame.text_at(Quadrant::new(1, 0)), Some("kI: 0.50"));
        assert_eq!(frame.text_at(Quadrant::new(1, 1)), Some("L: 24.00"));
        assert_eq!(frame.text_at(Quadrant::new(2, 0)), Some("Y: 11.87"));
    }

    #[test]
    fn test_angular_frame() {
        let snapshot = SessionSnapshot {
            active: Axis::Angular,
            gains: GainSet::new(2.0, 0.0, 10.0),
            target: 90.0,
            step: 0.1,
        };
        let pose = Pose {
            x: 0.0,
            y: 5.0,
            theta: 87.5,
        };
        let frame = render(&snapshot, pose);

        assert_eq!(frame.text_at(Quadrant::new(1, 1)), Some("H: 90.00"));
        assert_eq!(frame.text_at(Quadrant::new(2, 0)), Some("Theta: 87.50"));
    }

    #[test]
    fn test_render_is_pure() {
        let pose = Pose::default();
        assert_eq!(
            render(&lateral_snapshot(), pose),
            render(&lateral_snapshot(), pose)
        );
    }

    #[test]
    fn test_cells_fit_their_quadrant() {
        let snapshot = SessionSnapshot {
            gains: GainSet::new(12345.678, -0.001, 0.0),
            ..lateral_snapshot()
        };
        let pose = Pose {
            x: 0.0,
            y: -12345.678,
            theta: 0.0,
        };
        let frame = render(&snapshot, pose);

        for (quadrant, text) in &frame.cells {
            let width = if quadrant.row == 2 {
                LCD_COLUMNS
            } else {
                QUADRANT_WIDTH
            };
            assert!(text.len() <= width as usize, "{} too long", text);
        }
        assert_eq!(frame.text_at(Quadrant::new(0, 0)), Some("kP: 12346"));
        assert_eq!(frame.text_at(Quadrant::new(2, 0)), Some("Y: -12345.68"));
    }

    #[test]
    fn test_large_gain_uses_exponent() {
        let snapshot = SessionSnapshot {
            gains: GainSet::new(12_345_678.0, 0.0, -4_000_000.0),
            ..lateral_snapshot()
        };
        let frame = render(&snapshot, Pose::default());

        assert_eq!(frame.text_at(Quadrant::new(0, 0)), Some("kP: 1.23e7"));
        assert_eq!(frame.text_at(Quadrant::new(0, 1)), Some("kD: -4.0e6"));
    }

    #[test]
    fn test_fine_step_shows_more_decimals() {
        let snapshot = SessionSnapshot {
            gains: GainSet::new(10.004, 0.003, 3.0),
            step: 0.001,
            ..lateral_snapshot()
        };
        let frame = render(&snapshot, Pose::default());

        assert_eq!(frame.text_at(Quadrant::new(0, 0)), Some("kP: 10.004"));
        assert_eq!(frame.text_at(Quadrant::new(1, 0)), Some("kI: 0.003"));
        assert_eq!(frame.text_at(Quadrant::new(0, 1)), Some("kD: 3.000"));
        // targets keep two decimals whatever the step
        assert_eq!(frame.text_at(Quadrant::new(1, 1)), Some("L: 24.00"));
    }

    #[test]
    fn test_step_decimals() {
        assert_eq!(step_decimals(10.0), 2);
        assert_eq!(step_decimals(1.0), 2);
        assert_eq!(step_decimals(0.01), 2);
        assert_eq!(step_decimals(0.001), 3);
        assert_eq!(step_decimals(0.0001), 4);
        assert_eq!(step_decimals(0.0), MAX_DECIMALS);
    }

    #[test]
    fn test_full_heading_on_feedback_row() {
        let snapshot = SessionSnapshot {
            active: Axis::Angular,
            ..lateral_snapshot()
        };
        let pose = Pose {
            x: 0.0,
            y: 0.0,
            theta: 359.99,
        };
        let frame = render(&snapshot, pose);
        assert_eq!(frame.text_at(Quadrant::new(2, 0)), Some("Theta: 359.99"));
    }

    #[test]
    fn test_draw_clears_each_row_once() -> TuneResult<()> {
        let frame = render(&lateral_snapshot(), Pose::default());
        let mut display = RecordingDisplay::default();
        frame.draw(&mut display)?;

        assert_eq!(
            display.calls(),
            vec![
                "clear 0",
                "write 0 0 kP: 10.00",
                "write 0 10 kD: 3.00",
                "clear 1",
                "write 1 0 kI: 0.50",
                "write 1 10 L: 24.00",
                "clear 2",
                "write 2 0 Y: 0.00",
            ]
        );
        Ok(())
    }

    #[test]
    fn test_column_offset() {
        assert_eq!(Quadrant::new(0, 0).column_offset(), 0);
        assert_eq!(Quadrant::new(3, 1).column_offset(), QUADRANT_WIDTH);
    }
}
