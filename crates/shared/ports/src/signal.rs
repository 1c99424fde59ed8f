use crate::error::SignalResult;

/// Callback run once when a subscribed topic fires
pub type SignalHandler = Box<dyn FnOnce() + Send + Sync + 'static>;

/// Port for the page's lifecycle publish/subscribe bus
///
/// Topics fire at most meaningfully once; subscribers may ask to be called
/// immediately if the topic has already been published, so a late
/// subscription never misses a completion.
pub trait SignalBus: Send + Sync {
    /// Run `handler` once, on the next publish of `topic`.
    ///
    /// With `replay_if_fired`, a topic that has already been published runs
    /// the handler immediately instead.
    fn subscribe_once(
        &self,
        topic: &str,
        handler: SignalHandler,
        replay_if_fired: bool,
    ) -> SignalResult<()>;

    /// Publish a topic, running every pending handler
    fn publish(&self, topic: &str) -> SignalResult<()>;

    /// Has the topic been published at least once?
    fn has_fired(&self, topic: &str) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_signal_bus_object_safe(_: &dyn SignalBus) {}
}
