//! Bounded FIFO between producers and the writer thread.
//!
//! Full queues block the sender; nothing is ever dropped once accepted. Closing drops
//! the only `Sender`, which lets the writer drain what is left and then stop.

use crate::Error;
use crossbeam_channel::{Receiver, Sender, bounded};
use parking_lot::RwLock;

/// Producer half of the message queue.
#[derive(Debug)]
pub struct MessageQueue {
    sender: RwLock<Option<Sender<String>>>,
    capacity: usize,
}

impl MessageQueue {
    /// Creates the queue and the receiver the writer drains.
    ///
    /// # Errors
    /// `capacity` must be non-zero; a rendezvous queue would serialize every producer
    /// with the writer's disk I/O.
    pub fn bounded(capacity: usize) -> Result<(Self, Receiver<String>), Error> {
        if capacity == 0 {
            return Err(Error::InvalidConfig(
                "queue capacity must be non-zero".to_string(),
            ));
        }
        let (tx, rx) = bounded(capacity);
        let queue = Self {
            sender: RwLock::new(Some(tx)),
            capacity,
        };
        Ok((queue, rx))
    }

    /// Appends a line, blocking while the queue is full.
    ///
    /// # Errors
    /// Returns [`Error::Closed`] once [`MessageQueue::close`] has run.
    pub fn push(&self, line: String) -> Result<(), Error> {
        // The read guard stays held while blocked on a full queue; `close` waits for
        // in-flight sends to land instead of racing them.
        let guard = self.sender.read();
        match guard.as_ref() {
            Some(tx) => tx.send(line).map_err(|_| Error::Closed),
            None => Err(Error::Closed),
        }
    }

    /// Stops accepting lines. Already queued lines stay available to the receiver.
    pub fn close(&self) {
        self.sender.write().take();
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.sender.read().is_none()
    }

    /// Lines waiting for the writer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sender.read().as_ref().map_or(0, Sender::len)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;

    #[test]
    fn zero_capacity_is_rejected() {
        assert!(matches!(
            MessageQueue::bounded(0),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn preserves_submission_order() {
        let (queue, rx) = MessageQueue::bounded(8).unwrap();
        for i in 0..5 {
            queue.push(format!("line {i}")).unwrap();
        }
        assert_eq!(queue.len(), 5);
        let drained: Vec<String> = rx.try_iter().collect();
        assert_eq!(drained, (0..5).map(|i| format!("line {i}")).collect::<Vec<_>>());
    }

    #[test]
    fn full_queue_blocks_until_drained() {
        let (queue, rx) = MessageQueue::bounded(2).unwrap();
        let queue = Arc::new(queue);
        let sent = Arc::new(AtomicUsize::new(0));

        let producer = {
            let queue = Arc::clone(&queue);
            let sent = Arc::clone(&sent);
            thread::spawn(move || {
                for i in 0..3 {
                    queue.push(format!("m{i}")).unwrap();
                    sent.fetch_add(1, Ordering::SeqCst);
                }
            })
        };

        thread::sleep(Duration::from_millis(100));
        assert_eq!(sent.load(Ordering::SeqCst), 2, "third push must block");

        assert_eq!(rx.recv().unwrap(), "m0");
        producer.join().unwrap();
        assert_eq!(sent.load(Ordering::SeqCst), 3);
        assert_eq!(rx.try_iter().collect::<Vec<_>>(), vec!["m1", "m2"]);
    }

    #[test]
    fn close_rejects_new_lines_but_keeps_queued_ones() {
        let (queue, rx) = MessageQueue::bounded(4).unwrap();
        queue.push("kept".to_string()).unwrap();
        queue.close();

        assert!(queue.is_closed());
        assert!(matches!(queue.push("late".to_string()), Err(Error::Closed)));
        assert_eq!(rx.recv().unwrap(), "kept");
        assert!(rx.recv().is_err(), "receiver disconnects after drain");
    }
}
