use core::fmt;

use crate::rules::SpellKind;
use crate::state::{CreatureKind, EntityId, Location, StructureKind};

/// One intent for one actor.
///
/// At most one command is issued per unit or portal per turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum Command {
    MoveTo { unit: EntityId, to: Location },
    Attack { unit: EntityId, target: EntityId },
    Build { unit: EntityId, structure: StructureKind },
    Summon { portal: EntityId, creature: CreatureKind },
    Cast { unit: EntityId, spell: SpellKind },
}

impl Command {
    /// Unit or portal that carries out the command.
    pub fn actor(&self) -> EntityId {
        match *self {
            Command::MoveTo { unit, .. }
            | Command::Attack { unit, .. }
            | Command::Build { unit, .. }
            | Command::Cast { unit, .. } => unit,
            Command::Summon { portal, .. } => portal,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::MoveTo { unit, to } => write!(f, "{unit} move_to {to}"),
            Command::Attack { unit, target } => write!(f, "{unit} attack {target}"),
            Command::Build { unit, structure } => write!(f, "{unit} build {structure}"),
            Command::Summon { portal, creature } => write!(f, "{portal} summon {creature}"),
            Command::Cast { unit, spell } => write!(f, "{unit} cast {spell}"),
        }
    }
}

/// Receives commands from the tactical layer.
pub trait CommandSink {
    fn issue(&mut self, command: Command);
}

/// Sink that keeps commands in issue order until drained.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandBuffer {
    commands: Vec<Command>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Removes and returns all buffered commands.
    pub fn drain(&mut self) -> Vec<Command> {
        core::mem::take(&mut self.commands)
    }

    /// Forwards all buffered commands to `sink`, emptying the buffer.
    pub fn flush_into<S: CommandSink + ?Sized>(&mut self, sink: &mut S) -> usize {
        let commands = self.drain();
        let count = commands.len();
        for command in commands {
            sink.issue(command);
        }
        count
    }
}

impl CommandSink for CommandBuffer {
    fn issue(&mut self, command: Command) {
        self.commands.push(command);
    }
}

impl CommandSink for Vec<Command> {
    fn issue(&mut self, command: Command) {
        self.push(command);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flush_preserves_order_and_empties() {
        let mut buffer = CommandBuffer::new();
        buffer.issue(Command::MoveTo { unit: EntityId(1), to: Location::new(3, 4) });
        buffer.issue(Command::Summon { portal: EntityId(7), creature: CreatureKind::IceTroll });

        let mut sink = Vec::new();
        assert_eq!(buffer.flush_into(&mut sink), 2);
        assert!(buffer.is_empty());
        assert_eq!(sink[0].actor(), EntityId(1));
        assert_eq!(sink[1].actor(), EntityId(7));
    }

    #[test]
    fn display_is_compact() {
        let command = Command::Cast { unit: EntityId(2), spell: SpellKind::SpeedUp };
        assert_eq!(command.to_string(), "#2 cast speed_up");
    }
}
