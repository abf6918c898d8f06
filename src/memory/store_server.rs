// src/memory/store_server.rs — Async message passing for Store

use crate::core::types::LogRecord;
use crate::memory::store::Store;
use tokio::sync::{mpsc, oneshot};

#[derive(Debug)]
pub enum StoreCommand {
    Append {
        record: LogRecord,
        resp: oneshot::Sender<anyhow::Result<()>>,
    },
    Recent {
        limit: u32,
        resp: oneshot::Sender<anyhow::Result<Vec<LogRecord>>>,
    },
    Count {
        resp: oneshot::Sender<anyhow::Result<usize>>,
    },
}

/// A handle to the Store that uses message passing.
#[derive(Clone)]
pub struct StoreHandle {
    tx: mpsc::Sender<StoreCommand>,
}

impl StoreHandle {
    pub fn new(tx: mpsc::Sender<StoreCommand>) -> Self {
        Self { tx }
    }

    pub async fn append(&self, record: LogRecord) -> anyhow::Result<()> {
        let (resp_tx, resp_rx) = oneshot::channel();
        self.tx
            .send(StoreCommand::Append {
                record,
                resp: resp_tx,
            })
            .await?;
        resp_rx.await?
    }

    pub async fn recent(&self, limit: u32) -> anyhow::Result<Vec<LogRecord>> {
        let (resp_tx, resp_rx) = oneshot::channel();
        self.tx
            .send(StoreCommand::Recent {
                limit,
                resp: resp_tx,
            })
            .await?;
        resp_rx.await?
    }

    pub async fn count(&self) -> anyhow::Result<usize> {
        let (resp_tx, resp_rx) = oneshot::channel();
        self.tx.send(StoreCommand::Count { resp: resp_tx }).await?;
        resp_rx.await?
    }
}

/// Helper to spawn the store server and return a handle.
pub fn spawn_store_server(store: Store) -> (StoreHandle, tokio::task::JoinHandle<()>) {
    let (tx, rx) = mpsc::channel(100);
    let handle = StoreHandle::new(tx);
    let join_handle = tokio::spawn(run_store_server(store, rx));
    (handle, join_handle)
}

/// Serve commands until every handle is dropped. Writes are applied one at a
/// time in arrival order.
pub async fn run_store_server(store: Store, mut rx: mpsc::Receiver<StoreCommand>) {
    while let Some(cmd) = rx.recv().await {
        match cmd {
            StoreCommand::Append { record, resp } => {
                let res = store.append_record(&record);
                let _ = resp.send(res);
            }
            StoreCommand::Recent { limit, resp } => {
                let res = store.recent_records(limit);
                let _ = resp.send(res);
            }
            StoreCommand::Count { resp } => {
                let _ = resp.send(store.count_records());
            }
        }
    }
    tracing::debug!("Store server stopped");
}
