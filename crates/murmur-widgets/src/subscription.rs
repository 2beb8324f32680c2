//! Subscription helpers for bridging sync channels to iced subscriptions
//!
//! The capture thread pushes power samples through a crossbeam channel;
//! this converts the receiving end into an iced `Subscription` so samples
//! arrive as ordinary messages.

use std::any::TypeId;
use std::hash::Hash;
use std::sync::Arc;

use crossbeam::channel::{Receiver, TryRecvError};
use iced::advanced::subscription::{self, EventStream, Hasher, Recipe};
use iced::futures::stream::BoxStream;
use iced::Subscription;

/// Recipe polling a crossbeam receiver as an iced subscription.
struct ChannelRecipe<T> {
    /// Unique ID for subscription identity (receiver pointer)
    id: u64,
    receiver: Arc<Receiver<T>>,
}

impl<T: Send + 'static> Recipe for ChannelRecipe<T> {
    type Output = T;

    fn hash(&self, state: &mut Hasher) {
        TypeId::of::<Self>().hash(state);
        self.id.hash(state);
    }

    fn stream(self: Box<Self>, _input: EventStream) -> BoxStream<'static, Self::Output> {
        let receiver = self.receiver;

        Box::pin(iced::futures::stream::unfold(receiver, |rx| async move {
            loop {
                match rx.try_recv() {
                    Ok(item) => return Some((item, rx)),
                    Err(TryRecvError::Empty) => {
                        // 1ms poll keeps latency invisible without busy-spinning
                        tokio::time::sleep(std::time::Duration::from_millis(1)).await;
                    }
                    Err(TryRecvError::Disconnected) => {
                        log::debug!("channel sender dropped, ending subscription");
                        return None;
                    }
                }
            }
        }))
    }
}

/// Create an iced subscription from a crossbeam channel receiver.
///
/// Yields items from the receiver; use `.map()` to convert to your message
/// type. The subscription's identity follows the receiver, so passing the
/// same `Arc` each call keeps one poll loop alive.
pub fn channel_subscription<T>(receiver: Arc<Receiver<T>>) -> Subscription<T>
where
    T: Send + 'static,
{
    let id = Arc::as_ptr(&receiver) as u64;
    subscription::from_recipe(ChannelRecipe { id, receiver })
}
