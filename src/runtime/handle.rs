//! Single-writer runtime loop over the store, with an optional advisory
//! mirror worker.

use hashbrown::HashSet;
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::warn;

use crate::{
    core::store::{RsvpStore, StoreError, UpsertOutcome},
    export,
    mirror::{MirrorRow, MirrorSink},
    rsvp::{DraftError, RsvpDraft, RsvpRecord},
    types::{AttendanceFilter, RsvpId},
    view::projector::{self, RsvpStats},
};

use super::events::RsvpEvent;

/// Errors surfaced through the runtime handle.
#[derive(Debug)]
pub enum RuntimeError {
    /// Store-level failure, i.e. persistence unavailable.
    Store(StoreError),
    /// The submission was rejected before reaching the store.
    Draft(DraftError),
    /// The runtime task is gone.
    ChannelClosed,
}

impl From<StoreError> for RuntimeError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<DraftError> for RuntimeError {
    fn from(value: DraftError) -> Self {
        Self::Draft(value)
    }
}

/// Queue bounds for the runtime loop.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Command channel capacity.
    pub command_queue_bound: usize,
    /// Advisory mirror queue capacity; overflowing rows are dropped with a
    /// warning, never back-pressuring the commit path.
    pub mirror_queue_bound: usize,
    /// Broadcast buffer size for event subscribers.
    pub events_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            command_queue_bound: 256,
            mirror_queue_bound: 64,
            events_capacity: 1024,
        }
    }
}

/// Receipt returned to the form layer after a committed submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReceipt {
    /// Id assigned to the committed record.
    pub id: RsvpId,
    /// True when this submission replaced an earlier one for the same email.
    pub replaced: bool,
}

/// Cloneable handle to the single-writer runtime.
pub struct RsvpLogHandle {
    cmd_tx: mpsc::Sender<Command>,
    events_tx: broadcast::Sender<RsvpEvent>,
}

impl Clone for RsvpLogHandle {
    fn clone(&self) -> Self {
        Self {
            cmd_tx: self.cmd_tx.clone(),
            events_tx: self.events_tx.clone(),
        }
    }
}

enum Command {
    Submit {
        draft: RsvpDraft,
        resp: oneshot::Sender<Result<SubmitReceipt, RuntimeError>>,
    },
    LoadAll {
        resp: oneshot::Sender<Vec<RsvpRecord>>,
    },
    View {
        filter: AttendanceFilter,
        search: String,
        resp: oneshot::Sender<Vec<RsvpRecord>>,
    },
    Stats {
        resp: oneshot::Sender<RsvpStats>,
    },
    DeleteSelected {
        ids: HashSet<RsvpId>,
        resp: oneshot::Sender<Result<usize, RuntimeError>>,
    },
    DeleteAll {
        resp: oneshot::Sender<Result<(), RuntimeError>>,
    },
    ExportCsv {
        filter: AttendanceFilter,
        search: String,
        resp: oneshot::Sender<String>,
    },
    Shutdown {
        resp: oneshot::Sender<Result<(), RuntimeError>>,
    },
}

enum MirrorMsg {
    Row { id: RsvpId, row: MirrorRow },
    Shutdown { resp: oneshot::Sender<()> },
}

/// Spawns the runtime loop over `store`, with an optional advisory mirror
/// sink drained by its own worker task.
pub fn spawn_rsvplog(
    store: RsvpStore,
    mirror: Option<Box<dyn MirrorSink>>,
    config: RuntimeConfig,
) -> RsvpLogHandle {
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<Command>(config.command_queue_bound);
    let (events_tx, _) = broadcast::channel::<RsvpEvent>(config.events_capacity);

    let mirror_tx = mirror.map(|sink| {
        let (mirror_tx, mirror_rx) = mpsc::channel::<MirrorMsg>(config.mirror_queue_bound);
        spawn_mirror_worker(sink, mirror_rx, events_tx.clone());
        mirror_tx
    });

    let events_tx_loop = events_tx.clone();

    tokio::spawn(async move {
        let mut store = store;
        while let Some(cmd) = cmd_rx.recv().await {
            let done = handle_command(cmd, &mut store, &events_tx_loop, mirror_tx.as_ref()).await;
            if done {
                break;
            }
        }
    });

    RsvpLogHandle { cmd_tx, events_tx }
}

impl RsvpLogHandle {
    /// Subscribes to runtime events.
    pub fn subscribe(&self) -> broadcast::Receiver<RsvpEvent> {
        self.events_tx.subscribe()
    }

    /// Validates and commits a submission, then queues its advisory mirror
    /// row. The mirror never blocks or fails this call.
    pub async fn submit(&self, draft: RsvpDraft) -> Result<SubmitReceipt, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Submit { draft, resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    /// Cloned snapshot of every stored record.
    pub async fn load_all(&self) -> Result<Vec<RsvpRecord>, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::LoadAll { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Filtered, newest-first view of the collection.
    pub async fn view(
        &self,
        filter: AttendanceFilter,
        search: impl Into<String>,
    ) -> Result<Vec<RsvpRecord>, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::View {
                filter,
                search: search.into(),
                resp: tx,
            })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Aggregate attendance counts.
    pub async fn stats(&self) -> Result<RsvpStats, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Stats { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Removes the records whose ids are in `ids`, returning how many were
    /// removed. Unknown ids are ignored.
    pub async fn delete_selected(&self, ids: HashSet<RsvpId>) -> Result<usize, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::DeleteSelected { ids, resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    /// Clears the whole collection.
    pub async fn delete_all(&self) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::DeleteAll { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    /// Serializes the currently filtered, sorted view as CSV text.
    pub async fn export_csv(
        &self,
        filter: AttendanceFilter,
        search: impl Into<String>,
    ) -> Result<String, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::ExportCsv {
                filter,
                search: search.into(),
                resp: tx,
            })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Stops the runtime after draining queued mirror rows.
    pub async fn shutdown(&self) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Shutdown { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }
}

async fn handle_command(
    cmd: Command,
    store: &mut RsvpStore,
    events_tx: &broadcast::Sender<RsvpEvent>,
    mirror_tx: Option<&mpsc::Sender<MirrorMsg>>,
) -> bool {
    match cmd {
        Command::Submit { draft, resp } => {
            let _ = resp.send(submit(store, draft, events_tx, mirror_tx));
        }
        Command::LoadAll { resp } => {
            let _ = resp.send(store.load_all());
        }
        Command::View {
            filter,
            search,
            resp,
        } => {
            let _ = resp.send(view(store, filter, &search));
        }
        Command::Stats { resp } => {
            let _ = resp.send(projector::compute_stats(store.records()));
        }
        Command::DeleteSelected { ids, resp } => {
            let res = store.delete_by_ids(&ids).map_err(RuntimeError::from);
            if let Ok(removed) = &res {
                let _ = events_tx.send(RsvpEvent::Deleted { removed: *removed });
            }
            let _ = resp.send(res);
        }
        Command::DeleteAll { resp } => {
            let res = store.delete_all().map_err(RuntimeError::from);
            if res.is_ok() {
                let _ = events_tx.send(RsvpEvent::Cleared);
            }
            let _ = resp.send(res);
        }
        Command::ExportCsv {
            filter,
            search,
            resp,
        } => {
            let _ = resp.send(export::to_delimited_text(&view(store, filter, &search)));
        }
        Command::Shutdown { resp } => {
            let out = if let Some(tx) = mirror_tx {
                let (done_tx, done_rx) = oneshot::channel();
                if tx.send(MirrorMsg::Shutdown { resp: done_tx }).await.is_err() {
                    Err(RuntimeError::ChannelClosed)
                } else {
                    done_rx.await.map_err(|_| RuntimeError::ChannelClosed)
                }
            } else {
                Ok(())
            };
            let _ = resp.send(out);
            return true;
        }
    }

    false
}

// Local commit first, mirror enqueue second, never the reverse.
fn submit(
    store: &mut RsvpStore,
    draft: RsvpDraft,
    events_tx: &broadcast::Sender<RsvpEvent>,
    mirror_tx: Option<&mpsc::Sender<MirrorMsg>>,
) -> Result<SubmitReceipt, RuntimeError> {
    let record = draft.into_record()?;
    let row = MirrorRow::from_record(&record);
    let UpsertOutcome { id, replaced } = store.upsert(record)?;

    if let Some(tx) = mirror_tx {
        let msg = MirrorMsg::Row {
            id: id.clone(),
            row,
        };
        if tx.try_send(msg).is_err() {
            warn!(%id, "mirror queue full, dropping row");
        }
    }

    let _ = events_tx.send(RsvpEvent::Submitted {
        id: id.clone(),
        replaced,
    });
    Ok(SubmitReceipt { id, replaced })
}

fn view(store: &RsvpStore, filter: AttendanceFilter, search: &str) -> Vec<RsvpRecord> {
    let mut records = projector::filter_records(store.records(), filter, search);
    projector::sort_by_submitted_desc(&mut records);
    records
}

fn spawn_mirror_worker(
    mut sink: Box<dyn MirrorSink>,
    mut rx: mpsc::Receiver<MirrorMsg>,
    events_tx: broadcast::Sender<RsvpEvent>,
) {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            match msg {
                MirrorMsg::Row { id, row } => match sink.deliver(&row).await {
                    Ok(()) => {
                        let _ = events_tx.send(RsvpEvent::Mirrored { id });
                    }
                    Err(err) => warn!(%id, ?err, "mirror delivery failed"),
                },
                MirrorMsg::Shutdown { resp } => {
                    let _ = resp.send(());
                    break;
                }
            }
        }
    });
}
