use std::io::{self, IsTerminal};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Operator,
    Agent,
}

impl Mode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Mode::Operator => "operator",
            Mode::Agent => "agent",
        }
    }
}

pub fn detect_mode(output_json: bool) -> Mode {
    if output_json || !io::stdout().is_terminal() {
        Mode::Agent
    } else {
        Mode::Operator
    }
}
