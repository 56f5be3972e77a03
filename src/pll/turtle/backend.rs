//! Backend interface and the program interpreter

use super::instr::{Instr, Program};

/// The primitive operations a turtle renderer provides.
pub trait TurtleBackend {
    fn move_forward(&mut self, distance: f64);
    /// Turn clockwise by `degrees`.
    fn turn(&mut self, degrees: f64);
    fn move_to(&mut self, x: f64, y: f64);
    fn save_state(&mut self);
    fn restore_state(&mut self);
    fn center_view(&mut self);
    /// Back to the initial position and heading.
    fn reset(&mut self);
}

/// Run instructions against a backend. Loop bodies run `n` times.
pub fn execute<B: TurtleBackend + ?Sized>(instrs: &[Instr], backend: &mut B) {
    for instr in instrs {
        match instr {
            Instr::MoveForward(d) => backend.move_forward(*d),
            Instr::Turn(a) => backend.turn(*a),
            Instr::MoveTo(x, y) => backend.move_to(*x, *y),
            Instr::SaveState => backend.save_state(),
            Instr::RestoreState => backend.restore_state(),
            Instr::CenterView => backend.center_view(),
            Instr::Repeat(n, body) => {
                for _ in 0..*n {
                    execute(body, backend);
                }
            }
        }
    }
}

impl Program {
    pub fn run<B: TurtleBackend + ?Sized>(&self, backend: &mut B) {
        execute(self.instrs(), backend);
    }
}

/// A primitive call seen by a [`RecordingBackend`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    MoveForward(f64),
    Turn(f64),
    MoveTo(f64, f64),
    SaveState,
    RestoreState,
    CenterView,
    Reset,
}

/// Backend that only records the calls it receives.
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    pub calls: Vec<Call>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TurtleBackend for RecordingBackend {
    fn move_forward(&mut self, distance: f64) {
        self.calls.push(Call::MoveForward(distance));
    }

    fn turn(&mut self, degrees: f64) {
        self.calls.push(Call::Turn(degrees));
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.calls.push(Call::MoveTo(x, y));
    }

    fn save_state(&mut self) {
        self.calls.push(Call::SaveState);
    }

    fn restore_state(&mut self) {
        self.calls.push(Call::RestoreState);
    }

    fn center_view(&mut self) {
        self.calls.push(Call::CenterView);
    }

    fn reset(&mut self) {
        self.calls.push(Call::Reset);
    }
}
