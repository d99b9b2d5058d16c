//! Debounced recipient resolution.
//!
//! Raw user input is debounced, then parsed in order: user-friendly
//! address → raw address → domain-name lookup. The first success wins;
//! every success also consults the known-accounts list to decide whether
//! a memo is required. Only the result of the most recent input is ever
//! surfaced: a new input aborts the in-flight task and bumps a generation
//! counter so a stale resolution can never overwrite a newer one.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures_util::future::BoxFuture;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tonkit_types::{Address, Recipient, ResolvedRecipient};

/// Default quiet period before a resolution attempt starts.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Name-service lookup collaborator.
pub trait DomainResolver: Send + Sync + 'static {
    /// Resolve a domain name to an address, `None` if it does not exist.
    fn resolve(&self, name: &str) -> BoxFuture<'_, Option<Address>>;
}

/// Known-accounts collaborator: which destinations require a memo.
pub trait KnownAccounts: Send + Sync + 'static {
    fn is_memo_required(&self, address: &Address) -> bool;
}

/// Observable state of the input field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecipientState {
    /// Empty input: no recipient.
    None,
    /// Input received, resolution pending.
    Resolving,
    /// Input matched none of the supported forms.
    Invalid,
    Valid(ResolvedRecipient),
}

struct Slot {
    generation: u64,
    task: Option<JoinHandle<()>>,
}

/// Debounced resolver for one recipient input field.
pub struct RecipientResolver<D, K> {
    domains: Arc<D>,
    known: Arc<K>,
    debounce: Duration,
    state: Arc<watch::Sender<RecipientState>>,
    slot: Arc<Mutex<Slot>>,
}

impl<D: DomainResolver, K: KnownAccounts> RecipientResolver<D, K> {
    pub fn new(domains: Arc<D>, known: Arc<K>) -> Self {
        Self::with_debounce(domains, known, DEFAULT_DEBOUNCE)
    }

    pub fn with_debounce(domains: Arc<D>, known: Arc<K>, debounce: Duration) -> Self {
        let (tx, _) = watch::channel(RecipientState::None);
        Self {
            domains,
            known,
            debounce,
            state: Arc::new(tx),
            slot: Arc::new(Mutex::new(Slot {
                generation: 0,
                task: None,
            })),
        }
    }

    /// Observe resolution state. The receiver always holds the latest value.
    pub fn subscribe(&self) -> watch::Receiver<RecipientState> {
        self.state.subscribe()
    }

    /// Feed a new input value. Must be called within a tokio runtime.
    ///
    /// Cancels any pending debounce timer and in-flight resolution before
    /// starting a new one. Empty input resets to `None` immediately,
    /// bypassing the debounce.
    pub fn input(&self, text: &str) {
        let mut slot = self.slot.lock().expect("resolver slot poisoned");
        slot.generation += 1;
        if let Some(task) = slot.task.take() {
            task.abort();
        }

        let text = text.trim().to_owned();
        if text.is_empty() {
            self.state.send_replace(RecipientState::None);
            return;
        }
        self.state.send_replace(RecipientState::Resolving);

        let generation = slot.generation;
        let domains = Arc::clone(&self.domains);
        let known = Arc::clone(&self.known);
        let state = Arc::clone(&self.state);
        let guard = Arc::clone(&self.slot);
        let debounce = self.debounce;

        slot.task = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            let result = resolve_input(&text, domains.as_ref(), known.as_ref()).await;
            // Abort covers most stale tasks; the generation check closes
            // the window between the last await and publication.
            let slot = guard.lock().expect("resolver slot poisoned");
            if slot.generation == generation {
                tracing::debug!(input = %text, valid = matches!(result, RecipientState::Valid(_)), "recipient resolved");
                state.send_replace(result);
            }
        }));
    }
}

/// Friendly address → raw address → domain lookup; first success wins.
async fn resolve_input<D: DomainResolver, K: KnownAccounts>(
    text: &str,
    domains: &D,
    known: &K,
) -> RecipientState {
    let recipient = if let Ok(address) = Address::from_friendly(text) {
        Some(Recipient::Friendly(address))
    } else if let Ok(address) = Address::from_raw(text) {
        Some(Recipient::Raw(address))
    } else {
        domains.resolve(text).await.map(|resolved| Recipient::Domain {
            name: text.to_owned(),
            resolved,
        })
    };

    match recipient {
        Some(recipient) => {
            let is_memo_required = known.is_memo_required(recipient.address());
            RecipientState::Valid(ResolvedRecipient {
                recipient,
                is_memo_required,
            })
        }
        None => RecipientState::Invalid,
    }
}
