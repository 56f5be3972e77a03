//! The instruction AST produced by the compiler

use serde::{Deserialize, Serialize};

/// One primitive operation, or a counted loop over a body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Instr {
    MoveForward(f64),
    Turn(f64),
    MoveTo(f64, f64),
    SaveState,
    RestoreState,
    CenterView,
    Repeat(u32, Vec<Instr>),
}

impl Instr {
    /// Number of instructions in this one, counting loop bodies once.
    pub fn size(&self) -> usize {
        match self {
            Instr::Repeat(_, body) => 1 + body.iter().map(Instr::size).sum::<usize>(),
            _ => 1,
        }
    }
}

/// A compiled turtle program.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Program {
    instrs: Vec<Instr>,
}

impl Program {
    pub fn new(instrs: Vec<Instr>) -> Self {
        Self { instrs }
    }

    pub fn instrs(&self) -> &[Instr] {
        &self.instrs
    }

    pub fn into_instrs(self) -> Vec<Instr> {
        self.instrs
    }

    pub fn is_empty(&self) -> bool {
        self.instrs.is_empty()
    }

    /// Total instruction count, including nested loop bodies.
    pub fn instruction_count(&self) -> usize {
        self.instrs.iter().map(Instr::size).sum()
    }
}

impl From<Vec<Instr>> for Program {
    fn from(instrs: Vec<Instr>) -> Self {
        Self::new(instrs)
    }
}
