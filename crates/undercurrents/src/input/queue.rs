use super::command::Command;

/// Input event types the simulation understands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A key was pressed (browser `keyCode`).
    KeyDown { key_code: u32 },
    /// The canvas was resized.
    Resize { width: i32, height: i32 },
    /// The host asked the simulation to stop.
    Quit,
}

impl InputEvent {
    /// The command this event triggers, if any.
    pub fn command(&self) -> Option<Command> {
        match *self {
            InputEvent::KeyDown { key_code } => Command::from_key_code(key_code),
            InputEvent::Resize { width, height } => Some(Command::Resize { width, height }),
            InputEvent::Quit => Some(Command::Quit),
        }
    }
}

/// Key and window events collected between two frames.
///
/// The bridge pushes events as the browser reports them; the simulation drains
/// the whole batch before its timers run, so every event of a frame applies to
/// that frame.
#[derive(Debug, Default)]
pub struct InputQueue {
    pending: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            pending: Vec::with_capacity(16),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.pending.push(event);
    }

    /// Take this frame's events in arrival order, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.pending)
    }

    /// Like [`drain`](Self::drain), mapped to commands. Unbound keys are dropped.
    pub fn drain_commands(&mut self) -> Vec<Command> {
        self.pending.drain(..).filter_map(|event| event.command()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.pending.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::KeyDown { key_code: 80 });
        q.push(InputEvent::Resize { width: 640, height: 480 });
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn drain_commands_skips_unmapped_keys() {
        let mut q = InputQueue::new();
        q.push(InputEvent::KeyDown { key_code: 32 });
        q.push(InputEvent::KeyDown { key_code: 77 });
        q.push(InputEvent::Resize { width: 640, height: 480 });
        q.push(InputEvent::Quit);
        assert_eq!(q.iter().count(), 4);

        let commands = q.drain_commands();
        assert_eq!(
            commands,
            vec![
                Command::CycleColorMode,
                Command::Resize { width: 640, height: 480 },
                Command::Quit,
            ]
        );
        assert!(q.is_empty());
    }
}
