//! A failed broadcast leaves exactly one error-level log entry

use async_trait::async_trait;
use bot_commands::broadcast::BroadcastApi;
use bot_commands::command::{Dispatch, Dispatcher, Messenger, Registry};
use bot_commands::core::config::CommandFeatures;
use bot_commands::core::error::{BotError, Result};
use bot_commands::core::types::{BroadcastCredentials, User};
use bot_commands::session::MemorySession;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

struct ErrorCounter(Arc<AtomicUsize>);

impl<S: tracing::Subscriber> Layer<S> for ErrorCounter {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == tracing::Level::ERROR {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

struct NullMessenger;

impl Messenger for NullMessenger {
    fn send_plain(&self, _to: &str, _text: &str) {}
}

struct FailingBroadcaster;

#[async_trait]
impl BroadcastApi for FailingBroadcaster {
    async fn post_broadcast(&self, _credentials: &BroadcastCredentials, _text: &str) -> Result<()> {
        Err(BotError::Broadcast("connection reset".into()))
    }
}

#[tokio::test]
async fn test_failed_broadcast_logs_one_error() {
    let errors = Arc::new(AtomicUsize::new(0));
    let subscriber = tracing_subscriber::registry().with(ErrorCounter(errors.clone()));
    let _guard = tracing::subscriber::set_default(subscriber);

    let dispatcher = Dispatcher::new(
        Registry::builtin(&CommandFeatures::default()).unwrap(),
        Arc::new(NullMessenger),
        Arc::new(FailingBroadcaster),
        Handle::current(),
    );
    let mut user = User::new("carol@example.org", "carol@example.org/desk");
    let mut session = MemorySession::new();

    let Dispatch::Deferred(handle) = dispatcher.dispatch("say hi", &mut user, &mut session) else {
        panic!("say should be deferred");
    };
    handle.await.unwrap();

    assert_eq!(errors.load(Ordering::SeqCst), 1);
}
