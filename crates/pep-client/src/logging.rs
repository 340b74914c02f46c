//! Installs the process-wide `tracing` sink described by a [`ClientOptions`]'s
//! `log_level`/`log_output`/`log_handler` fields.
//!
//! `tracing::subscriber::set_global_default` may only succeed once per
//! process, but each new `PepClient` handle is still expected to take over
//! the process-wide sink from its own options, last construction wins. The
//! first `PepClient::new` call installs a [`reload`]-wrapped layer and
//! stores its [`reload::Handle`] in a [`OnceLock`]; every later call swaps a
//! freshly built layer into that handle instead of trying (and failing) to
//! set a second global subscriber.

use std::fs::OpenOptions;
use std::sync::{Mutex, OnceLock};

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{reload, Layer, Registry};

use crate::options::{ClientOptions, LogHandler, LogOutput};

type DynLayer = Box<dyn Layer<Registry> + Send + Sync>;

static RELOAD_HANDLE: OnceLock<Mutex<reload::Handle<DynLayer, Registry>>> = OnceLock::new();

/// Install or, on every call after the first, reload the process-wide
/// logging sink from `options`.
pub(crate) fn install(options: &ClientOptions) {
    let layer = build_layer(options);
    match RELOAD_HANDLE.get() {
        Some(handle) => {
            if let Err(e) = handle.lock().unwrap().reload(layer) {
                eprintln!("pep-client: failed to reload logging sink: {e}");
            }
        }
        None => {
            let (reloadable, handle) = reload::Layer::new(layer);
            let subscriber = Registry::default().with(reloadable);
            // If another thread's PepClient::new won the race to install the
            // global default first, our layer is simply dropped here; that
            // thread's RELOAD_HANDLE is what later `install` calls reload.
            if tracing::subscriber::set_global_default(subscriber).is_ok() {
                let _ = RELOAD_HANDLE.set(Mutex::new(handle));
            }
        }
    }
}

fn build_layer(options: &ClientOptions) -> DynLayer {
    if let Some(handler) = options.log_handler.clone() {
        return Box::new(HandlerLayer { handler });
    }

    let filter = match options.log_level.as_tracing_level() {
        Some(level) => LevelFilter::from_level(level),
        None => LevelFilter::OFF,
    };

    match options.log_output.clone() {
        LogOutput::Stdout => Box::new(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stdout)
                .with_filter(filter),
        ),
        LogOutput::Stderr => Box::new(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(filter),
        ),
        LogOutput::File(path) => match OpenOptions::new().create(true).append(true).open(&path) {
            Ok(file) => Box::new(
                tracing_subscriber::fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_filter(filter),
            ),
            Err(e) => {
                eprintln!(
                    "pep-client: failed to open log-output file {}: {e}; falling back to stderr",
                    path.display()
                );
                Box::new(
                    tracing_subscriber::fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_filter(filter),
                )
            }
        },
    }
}

/// A `tracing_subscriber` layer that formats each event's message and hands
/// it to a [`LogHandler`] closure, replacing the default fmt sink entirely
/// per `log-handler`'s option contract.
struct HandlerLayer {
    handler: LogHandler,
}

impl<S> Layer<S> for HandlerLayer
where
    S: tracing::Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut message = String::new();
        event.record(&mut MessageVisitor(&mut message));
        (self.handler)(*event.metadata().level(), &message);
    }
}

struct MessageVisitor<'a>(&'a mut String);

impl tracing::field::Visit for MessageVisitor<'_> {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        use std::fmt::Write;
        if field.name() == "message" {
            let _ = write!(self.0, "{value:?}");
        } else {
            let _ = write!(self.0, " {}={value:?}", field.name());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::LogLevel;
    use std::sync::{Arc, Mutex as StdMutex};

    #[test]
    fn handler_layer_receives_formatted_events() {
        let captured: Arc<StdMutex<Vec<(tracing::Level, String)>>> = Arc::new(StdMutex::new(Vec::new()));
        let sink = captured.clone();
        let handler: LogHandler = Arc::new(move |level, message| {
            sink.lock().unwrap().push((level, message.to_string()));
        });

        let layer = HandlerLayer { handler };
        let subscriber = Registry::default().with(layer);
        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!("hand-rolled sink reached");
        });

        let events = captured.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].0, tracing::Level::WARN);
        assert!(events[0].1.contains("hand-rolled sink reached"));
    }

    #[test]
    fn log_level_off_maps_to_level_filter_off() {
        let options = ClientOptions::new().log_level(LogLevel::None);
        assert_eq!(options.log_level.as_tracing_level(), None);
    }
}
