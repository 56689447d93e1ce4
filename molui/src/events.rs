//! Command bus between the orchestrator and the host loop

use std::sync::{Arc, Mutex};

use crossbeam_channel::{Receiver, Sender, unbounded};

use crate::model::UiCommand;

/// Fan-out bus for [`UiCommand`]s.
///
/// Subscribers that dropped their receiver are pruned on the next
/// broadcast.
#[derive(Clone, Default)]
pub struct UiCommandBus {
    subscribers: Arc<Mutex<Vec<Sender<UiCommand>>>>,
}

impl UiCommandBus {
    pub fn new() -> Self {
        Self {
            subscribers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn subscribe(&self) -> Receiver<UiCommand> {
        let (tx, rx) = unbounded::<UiCommand>();
        {
            let mut subscribers = self.subscribers.lock().unwrap();
            subscribers.push(tx);
        }
        rx
    }

    pub fn broadcast(&self, command: UiCommand) {
        let mut subscribers = self.subscribers.lock().unwrap();
        subscribers.retain(|tx| tx.send(command.clone()).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broadcast_reaches_all_subscribers() {
        let bus = UiCommandBus::new();
        let rx1 = bus.subscribe();
        let rx2 = bus.subscribe();

        bus.broadcast(UiCommand::Stop);

        assert_eq!(rx1.try_recv().unwrap(), UiCommand::Stop);
        assert_eq!(rx2.try_recv().unwrap(), UiCommand::Stop);
    }

    #[test]
    fn test_dropped_subscriber_is_pruned() {
        let bus = UiCommandBus::new();
        let rx = bus.subscribe();
        drop(bus.subscribe());

        bus.broadcast(UiCommand::SetVolume(40));
        bus.broadcast(UiCommand::SetVolume(45));

        assert_eq!(rx.try_recv().unwrap(), UiCommand::SetVolume(40));
        assert_eq!(rx.try_recv().unwrap(), UiCommand::SetVolume(45));
    }
}
