// Background dispatch service: a worker thread owning the TabHost, reached
// through request/reply channel envelopes. The reply sender stays open for
// the whole sequence and is used exactly once per request.

use std::thread;

use crossbeam_channel::{bounded, unbounded, Receiver, Sender};

use super::dispatcher::{handle_request, TabHost};
use super::{DispatchRequest, DispatchResponse};

/// Transport failures between the engine side and the dispatch service.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("dispatch service is not running")]
    Disconnected,
}

struct Envelope {
    req: DispatchRequest,
    reply: Sender<DispatchResponse>,
}

enum Msg {
    Request(Envelope),
    Shutdown,
}

/// Client handle held by the page side. Cheap to clone; requests from any
/// number of clients are serviced sequentially in arrival order.
#[derive(Clone)]
pub struct DispatchClient {
    tx: Sender<Msg>,
}

impl DispatchClient {
    /// Send a request and block until its single terminal response arrives.
    /// There is no cancellation: once sent, the effect runs to completion.
    pub fn request(&self, req: DispatchRequest) -> Result<DispatchResponse, TransportError> {
        let (reply_tx, reply_rx) = bounded(1);
        self.tx
            .send(Msg::Request(Envelope {
                req,
                reply: reply_tx,
            }))
            .map_err(|_| TransportError::Disconnected)?;
        reply_rx.recv().map_err(|_| TransportError::Disconnected)
    }
}

/// Owns the worker thread. Dropping the service drains queued requests,
/// stops the worker, and joins it.
pub struct DispatchService {
    tx: Sender<Msg>,
    thread: Option<thread::JoinHandle<()>>,
}

impl DispatchService {
    /// Spawn the service around a host. The host lives on the worker thread;
    /// all side effects run there, one request at a time.
    pub fn spawn(host: impl TabHost + Send + 'static) -> Self {
        let (tx, rx) = unbounded::<Msg>();
        let thread = thread::Builder::new()
            .name("dispatch".to_string())
            .spawn(move || run(rx, host))
            .ok();
        if thread.is_none() {
            log::error!("failed to spawn dispatch worker thread");
        }
        Self { tx, thread }
    }

    pub fn client(&self) -> DispatchClient {
        DispatchClient {
            tx: self.tx.clone(),
        }
    }
}

impl Drop for DispatchService {
    fn drop(&mut self) {
        let _ = self.tx.send(Msg::Shutdown);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

fn run(rx: Receiver<Msg>, mut host: impl TabHost) {
    while let Ok(msg) = rx.recv() {
        match msg {
            Msg::Request(env) => {
                let resp = handle_request(&env.req, &mut host);
                // The one terminal response. A requester that gave up waiting
                // is not an error worth more than a log line.
                if env.reply.send(resp).is_err() {
                    log::warn!("dispatch requester went away before the response was delivered");
                }
            }
            Msg::Shutdown => break,
        }
    }
}
