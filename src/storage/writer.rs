use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use super::{CollectionKey, CollectionStore};
use crate::shared::errors::StorageError;

enum WriteCommand {
    Write { key: CollectionKey, payload: String },
    Flush(Sender<()>),
}

/// Background writer that applies collection snapshots in the order they were
/// queued. Pending snapshots for the same key are coalesced so only the latest
/// one reaches disk.
pub struct PersistWriter {
    tx: Option<Sender<WriteCommand>>,
    handle: Option<JoinHandle<()>>,
}

impl PersistWriter {
    /// Spawn the writer thread for `store`.
    pub fn spawn(store: CollectionStore) -> Result<Self, StorageError> {
        let (tx, rx) = mpsc::channel::<WriteCommand>();

        let handle = thread::Builder::new()
            .name("nexus-persist".to_string())
            .spawn(move || writer_loop(store, rx))?;

        Ok(Self {
            tx: Some(tx),
            handle: Some(handle),
        })
    }

    /// Queue a serialized snapshot (fire-and-forget).
    pub fn enqueue(&self, key: CollectionKey, payload: String) -> Result<(), StorageError> {
        self.send(WriteCommand::Write { key, payload })
    }

    /// Block until every snapshot queued before this call has been written.
    pub fn flush(&self) -> Result<(), StorageError> {
        let (ack_tx, ack_rx) = mpsc::channel();
        self.send(WriteCommand::Flush(ack_tx))?;
        ack_rx.recv().map_err(|_| StorageError::WriterClosed)
    }

    fn send(&self, command: WriteCommand) -> Result<(), StorageError> {
        self.tx
            .as_ref()
            .ok_or(StorageError::WriterClosed)?
            .send(command)
            .map_err(|_| StorageError::WriterClosed)
    }
}

impl Drop for PersistWriter {
    fn drop(&mut self) {
        // Closing the channel lets the loop drain what is left and exit
        self.tx.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::error!(target: "storage", "Persistence writer thread panicked");
            }
        }
    }
}

fn writer_loop(store: CollectionStore, rx: Receiver<WriteCommand>) {
    let mut pending: Vec<(CollectionKey, String)> = Vec::new();

    while let Ok(first) = rx.recv() {
        let mut next = Some(first);

        while let Some(command) = next {
            match command {
                WriteCommand::Write { key, payload } => queue(&mut pending, key, payload),
                WriteCommand::Flush(ack) => {
                    write_pending(&store, &mut pending);
                    let _ = ack.send(());
                }
            }
            next = rx.try_recv().ok();
        }

        write_pending(&store, &mut pending);
    }

    write_pending(&store, &mut pending);
    tracing::debug!(target: "storage", "Persistence writer stopped");
}

fn queue(pending: &mut Vec<(CollectionKey, String)>, key: CollectionKey, payload: String) {
    if let Some(slot) = pending.iter_mut().find(|(queued, _)| *queued == key) {
        tracing::trace!(target: "storage", collection = %key, "Coalesced pending write");
        slot.1 = payload;
    } else {
        pending.push((key, payload));
    }
}

fn write_pending(store: &CollectionStore, pending: &mut Vec<(CollectionKey, String)>) {
    for (key, payload) in pending.drain(..) {
        if let Err(e) = store.write_raw(key, &payload) {
            tracing::error!(
                target: "storage",
                collection = %key,
                error = %e,
                "Failed to persist collection"
            );
        }
    }
}
