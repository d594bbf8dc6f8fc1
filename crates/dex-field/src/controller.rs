//! Async field controller
//!
//! One task owns the [`SearchSession`] and processes commands in arrival
//! order, so the session is never touched concurrently. Debounce timers and
//! lookups run as their own tasks and report back through the same channel.
//! Observable state is published on a `watch` channel after every command.

use crate::config::FieldConfig;
use crate::debounce::DebounceTicket;
use crate::error::FieldError;
use crate::host::HostField;
use crate::observer::FieldObserver;
use crate::session::{CommitOutcome, Completion, FieldSnapshot, InputEffect, SearchSession};
use dex_lookup::{LookupError, LookupOutcome, PokemonLookup};
use dex_model::Pokemon;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

/// Messages processed by the controller task
#[derive(Debug)]
enum Command {
    /// Raw text edit
    Input(String),
    /// Debounce window elapsed
    Quiesced(DebounceTicket),
    /// Lookup finished
    LookupDone {
        generation: u64,
        result: Result<LookupOutcome, LookupError>,
    },
    /// Commit a candidate
    Select {
        candidate: Pokemon,
        reply: oneshot::Sender<CommitOutcome>,
    },
    /// Remove the field value
    Clear { reply: oneshot::Sender<CommitOutcome> },
    /// Stop the controller
    Shutdown,
}

/// Handle to a running field controller
///
/// Cloneable; the controller stops once every handle is dropped or
/// [`FieldHandle::shutdown`] is called.
#[derive(Debug, Clone)]
pub struct FieldHandle {
    sender: mpsc::UnboundedSender<Command>,
    state: watch::Receiver<FieldSnapshot>,
}

impl FieldHandle {
    /// Feed a raw text edit
    ///
    /// # Errors
    /// `FieldError::Closed` if the controller has stopped
    pub fn input(&self, raw: impl Into<String>) -> Result<(), FieldError> {
        self.send(Command::Input(raw.into()))
    }

    /// Commit a candidate to the host field
    ///
    /// # Errors
    /// `FieldError::Closed` if the controller has stopped; write failures are
    /// reported through [`CommitOutcome::Failed`]
    pub async fn select(&self, candidate: Pokemon) -> Result<CommitOutcome, FieldError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Select { candidate, reply })?;
        rx.await.map_err(|_| FieldError::Closed)
    }

    /// Remove the host field's value
    ///
    /// # Errors
    /// `FieldError::Closed` if the controller has stopped
    pub async fn clear(&self) -> Result<CommitOutcome, FieldError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Clear { reply })?;
        rx.await.map_err(|_| FieldError::Closed)
    }

    /// Latest published state
    #[must_use]
    pub fn snapshot(&self) -> FieldSnapshot {
        self.state.borrow().clone()
    }

    /// Receiver for state changes
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<FieldSnapshot> {
        self.state.clone()
    }

    /// Wait until the published state satisfies `pred`
    ///
    /// # Errors
    /// `FieldError::Closed` if the controller stops first
    pub async fn wait_until<F>(&self, mut pred: F) -> Result<FieldSnapshot, FieldError>
    where
        F: FnMut(&FieldSnapshot) -> bool,
    {
        let mut rx = self.state.clone();
        let snapshot = rx.wait_for(|s| pred(s)).await.map_err(|_| FieldError::Closed)?;
        Ok(snapshot.clone())
    }

    /// Ask the controller to stop
    ///
    /// # Errors
    /// `FieldError::Closed` if it already has
    pub fn shutdown(&self) -> Result<(), FieldError> {
        self.send(Command::Shutdown)
    }

    fn send(&self, command: Command) -> Result<(), FieldError> {
        self.sender.send(command).map_err(|_| FieldError::Closed)
    }
}

/// Start a controller task for one field
///
/// Must be called inside a tokio runtime.
pub fn spawn_field(
    config: &FieldConfig,
    lookup: Arc<dyn PokemonLookup>,
    host: Arc<dyn HostField>,
    observer: Arc<dyn FieldObserver>,
) -> (FieldHandle, JoinHandle<()>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let session = SearchSession::new(config.debounce(), observer);
    let (state_tx, state_rx) = watch::channel(session.snapshot());

    let controller = FieldController {
        session,
        lookup,
        host,
        commands: tx.downgrade(),
        timer: None,
        state: state_tx,
    };
    let task = tokio::spawn(controller.run(rx));

    tracing::debug!("Field controller started (debounce {:?})", config.debounce());
    (
        FieldHandle {
            sender: tx,
            state: state_rx,
        },
        task,
    )
}

struct FieldController {
    session: SearchSession,
    lookup: Arc<dyn PokemonLookup>,
    host: Arc<dyn HostField>,
    commands: mpsc::WeakUnboundedSender<Command>,
    timer: Option<JoinHandle<()>>,
    state: watch::Sender<FieldSnapshot>,
}

impl FieldController {
    async fn run(mut self, mut rx: mpsc::UnboundedReceiver<Command>) {
        while let Some(command) = rx.recv().await {
            if matches!(command, Command::Shutdown) {
                break;
            }
            self.handle(command);
            self.publish();
        }
        self.cancel_timer();
        tracing::debug!("Field controller stopped");
    }

    fn handle(&mut self, command: Command) {
        match command {
            Command::Input(raw) => match self.session.input(raw) {
                InputEffect::Schedule(ticket) => self.schedule(ticket),
                InputEffect::Cleared => self.cancel_timer(),
            },
            Command::Quiesced(ticket) => {
                self.timer = None;
                if let Some(request) = self.session.quiesce(ticket) {
                    tracing::debug!("Looking up '{}' (gen {})", request.term, request.generation);
                    self.spawn_lookup(request.generation, request.term);
                }
            }
            Command::LookupDone { generation, result } => {
                if self.session.complete(generation, result) == Completion::Applied {
                    tracing::debug!(
                        "Applied gen {}: {} candidate(s)",
                        generation,
                        self.session.candidates().len()
                    );
                }
            }
            Command::Select { candidate, reply } => {
                let outcome = self.session.select(self.host.as_ref(), &candidate);
                if outcome.is_committed() {
                    self.cancel_timer();
                    tracing::info!("Selected #{} {}", candidate.id, candidate.name);
                }
                self.publish();
                let _ = reply.send(outcome);
            }
            Command::Clear { reply } => {
                let outcome = self.session.clear(self.host.as_ref());
                if outcome.is_committed() {
                    self.cancel_timer();
                    tracing::info!("Cleared field");
                }
                self.publish();
                let _ = reply.send(outcome);
            }
            Command::Shutdown => {}
        }
    }

    fn schedule(&mut self, ticket: DebounceTicket) {
        self.cancel_timer();
        let commands = self.commands.clone();
        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(ticket.delay()).await;
            if let Some(tx) = commands.upgrade() {
                let _ = tx.send(Command::Quiesced(ticket));
            }
        }));
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }

    fn spawn_lookup(&self, generation: u64, term: dex_lookup::SearchTerm) {
        let lookup = Arc::clone(&self.lookup);
        let commands = self.commands.clone();
        tokio::spawn(async move {
            let result = lookup.lookup(&term).await;
            if let Some(tx) = commands.upgrade() {
                let _ = tx.send(Command::LookupDone { generation, result });
            }
        });
    }

    fn publish(&self) {
        let next = self.session.snapshot();
        self.state.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MockHostField;
    use crate::observer::NoopObserver;
    use crate::phase::Phase;
    use async_trait::async_trait;
    use dex_lookup::SearchTerm;
    use dex_model::PokemonType;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct CountingLookup {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PokemonLookup for CountingLookup {
        async fn lookup(&self, term: &SearchTerm) -> Result<LookupOutcome, LookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(50)).await;
            if term.as_str() == "pikachu" {
                Ok(LookupOutcome::Found(pikachu()))
            } else {
                Ok(LookupOutcome::NotFound)
            }
        }
    }

    fn pikachu() -> Pokemon {
        Pokemon {
            id: 25,
            name: "pikachu".to_string(),
            types: vec![PokemonType::Electric],
            sprite_url: "https://example.test/25.png".to_string(),
            height: None,
            weight: None,
        }
    }

    fn start(host: MockHostField) -> (FieldHandle, JoinHandle<()>, Arc<CountingLookup>) {
        let lookup = Arc::new(CountingLookup {
            calls: AtomicUsize::new(0),
        });
        let (handle, task) = spawn_field(
            &FieldConfig::new(),
            lookup.clone(),
            Arc::new(host),
            Arc::new(NoopObserver),
        );
        (handle, task, lookup)
    }

    #[tokio::test(start_paused = true)]
    async fn burst_issues_one_lookup() {
        let (field, _task, lookup) = start(MockHostField::new());

        for raw in ["p", "pi", "pik", "pika", "pikachu"] {
            field.input(raw).unwrap();
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        let snap = field
            .wait_until(|s| s.phase == Phase::Settled)
            .await
            .unwrap();

        assert_eq!(lookup.calls.load(Ordering::SeqCst), 1);
        assert_eq!(snap.candidates, vec![pikachu()]);
    }

    #[tokio::test(start_paused = true)]
    async fn select_goes_through_host() {
        let mut host = MockHostField::new();
        host.expect_commit().times(1).returning(|_| Ok(()));
        let (field, _task, _) = start(host);

        field.input("pikachu").unwrap();
        let snap = field.wait_until(|s| !s.candidates.is_empty()).await.unwrap();

        let outcome = field.select(snap.candidates[0].clone()).await.unwrap();
        assert!(outcome.is_committed());
        assert_eq!(field.snapshot().search_term, "");
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_closes_handle() {
        let (field, task, _) = start(MockHostField::new());
        field.shutdown().unwrap();
        task.await.unwrap();

        assert!(matches!(field.input("mew"), Err(FieldError::Closed)));
        assert!(matches!(field.clear().await, Err(FieldError::Closed)));
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_handles_stops_controller() {
        let (field, task, _) = start(MockHostField::new());
        field.input("ditto").unwrap();
        drop(field);
        task.await.unwrap();
    }
}
