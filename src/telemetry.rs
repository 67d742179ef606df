use tracing::{subscriber::set_global_default, Level, Subscriber};
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::{filter::Targets, fmt::MakeWriter, layer::SubscriberExt, Registry};

/// Our own spans at DEBUG, the HTTP client at INFO and everything else at WARN.
pub fn default_targets() -> Targets {
    Targets::new()
        .with_target("jerseygirl", Level::DEBUG)
        .with_target("reqwest", Level::INFO)
        .with_default(Level::WARN)
}

/// Create a subscriber writing bunyan-formatted JSON for `targets` to `sink`.
pub fn get_subscriber<Sink>(
    name: String,
    targets: Targets,
    sink: Sink,
) -> impl Subscriber + Send + Sync
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let formatting_layer = BunyanFormattingLayer::new(name, sink);

    Registry::default()
        .with(targets)
        .with(JsonStorageLayer)
        .with(formatting_layer)
}

/// Init a subscriber and set it as the global tracing subscription.
pub fn init_subscriber(subscriber: impl Subscriber + Send + Sync) -> anyhow::Result<()> {
    LogTracer::init()?;
    set_global_default(subscriber)?;
    Ok(())
}
