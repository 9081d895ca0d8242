//! Keyboard command dispatch
//!
//! Normalized key tokens map to `Command` values through a table built once
//! at startup. Every command reports the key as handled so the host can
//! suppress the browser's default key behavior.

use std::collections::HashMap;

use super::direction::Direction;
use super::skier::Skier;
use crate::error::InputError;

/// Whether the simulation is allowed to advance, plus a pending restart request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayGate {
    playing: bool,
    restart_requested: bool,
}

impl PlayGate {
    pub fn new(playing: bool) -> Self {
        Self {
            playing,
            restart_requested: false,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    pub fn toggle(&mut self) {
        self.playing = !self.playing;
    }

    pub fn request_restart(&mut self) {
        self.restart_requested = true;
    }

    /// Consume a pending restart request
    pub fn take_restart_request(&mut self) -> bool {
        std::mem::take(&mut self.restart_requested)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    TurnLeft,
    TurnRight,
    Up,
    Down,
    Jump,
    StartPause,
    Restart,
}

impl Command {
    pub const ALL: [Command; 7] = [
        Command::TurnLeft,
        Command::TurnRight,
        Command::Up,
        Command::Down,
        Command::Jump,
        Command::StartPause,
        Command::Restart,
    ];

    /// Apply the command. Skier commands do nothing while play is gated off
    /// or once the skier is dead.
    pub fn execute(self, skier: &mut Skier, gate: &mut PlayGate) -> bool {
        match self {
            Command::StartPause => gate.toggle(),
            Command::Restart => gate.request_restart(),
            _ if !gate.is_playing() || skier.is_dead() => {}
            Command::TurnLeft => turn(skier, Direction::Left),
            Command::TurnRight => turn(skier, Direction::Right),
            Command::Up => {
                if !skier.is_crashed() && skier.direction().is_horizontal() {
                    skier.move_up();
                }
            }
            Command::Down => {
                if !skier.is_crashed() {
                    skier.set_direction(Direction::Down);
                }
            }
            Command::Jump => skier.jump(),
        }
        true
    }
}

/// Left/right handling: a crashed skier first recovers facing `side`. Then
/// step sideways when facing `side`, otherwise rotate one heading toward it.
fn turn(skier: &mut Skier, side: Direction) {
    if skier.is_crashed() {
        skier.recover_from_crash(side);
    }

    if skier.direction() == side {
        match side {
            Direction::Left => skier.move_left(),
            _ => skier.move_right(),
        }
    } else {
        let heading = skier.direction();
        let turned = match side {
            Direction::Left => heading.turn_left(),
            _ => heading.turn_right(),
        };
        skier.set_direction(turned);
    }
}

/// Key token -> command table
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<String, Command>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = Self::new();
        bindings.bind("ArrowLeft", Command::TurnLeft);
        bindings.bind("ArrowRight", Command::TurnRight);
        bindings.bind("ArrowUp", Command::Up);
        bindings.bind("ArrowDown", Command::Down);
        bindings.bind("32", Command::Jump); // space
        bindings.bind("115", Command::StartPause); // s
        bindings.bind("114", Command::Restart); // r
        bindings
    }
}

impl KeyBindings {
    /// Empty table
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    pub fn bind(&mut self, token: &str, command: Command) {
        self.bindings.insert(token.to_string(), command);
    }

    pub fn lookup(&self, token: &str) -> Result<Command, InputError> {
        self.bindings
            .get(token)
            .copied()
            .ok_or_else(|| InputError::UnmappedKey {
                token: token.to_string(),
            })
    }

    /// Commands no key reaches
    pub fn unbound_commands(&self) -> Vec<Command> {
        Command::ALL
            .iter()
            .copied()
            .filter(|command| !self.bindings.values().any(|bound| bound == command))
            .collect()
    }

    /// Look up and execute; returns whether the key was handled
    pub fn dispatch(
        &self,
        token: &str,
        skier: &mut Skier,
        gate: &mut PlayGate,
    ) -> Result<bool, InputError> {
        let command = self.lookup(token)?;
        Ok(command.execute(skier, gate))
    }
}
