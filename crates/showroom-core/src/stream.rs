// ── List subscriptions ──
//
// A list screen renders three things at once: the rows, whether an
// operation is running, and the error banner. A subscription follows all
// three and hands them out together, so a renderer never pairs a fresh
// list with a stale spinner.

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::WatchStream;

use crate::controller::{Banner, OperationState};
use crate::store::Snapshot;

/// Everything a list screen shows at one instant.
#[derive(Debug, Clone)]
pub struct ListView<R> {
    pub items: Snapshot<R>,
    pub state: OperationState,
    pub banner: Option<Banner>,
}

impl<R> ListView<R> {
    /// An operation is running; actions should be disabled.
    pub fn is_busy(&self) -> bool {
        self.state != OperationState::Idle
    }
}

/// Subscription to one controller, vended by
/// [`ResourceController::subscribe`](crate::ResourceController::subscribe).
pub struct ListSubscription<R: Send + Sync + 'static> {
    items: watch::Receiver<Snapshot<R>>,
    state: watch::Receiver<OperationState>,
    banner: watch::Receiver<Option<Banner>>,
}

impl<R: Send + Sync + 'static> ListSubscription<R> {
    pub(crate) fn new(
        items: watch::Receiver<Snapshot<R>>,
        state: watch::Receiver<OperationState>,
        banner: watch::Receiver<Option<Banner>>,
    ) -> Self {
        Self {
            items,
            state,
            banner,
        }
    }

    /// Latest view, without consuming pending changes.
    pub fn view(&self) -> ListView<R> {
        ListView {
            items: self.items.borrow().clone(),
            state: *self.state.borrow(),
            banner: self.banner.borrow().clone(),
        }
    }

    /// Wait until the list, the state or the banner changes, then return
    /// the whole view. Returns `None` once the controller is dropped.
    pub async fn changed(&mut self) -> Option<ListView<R>> {
        tokio::select! {
            r = self.items.changed() => r.ok()?,
            r = self.state.changed() => r.ok()?,
            r = self.banner.changed() => r.ok()?,
        }

        Some(ListView {
            items: self.items.borrow_and_update().clone(),
            state: *self.state.borrow_and_update(),
            banner: self.banner.borrow_and_update().clone(),
        })
    }

    /// Convert into a `Stream` of views: the current one first, then one
    /// per observed change. Bursts of changes may coalesce.
    pub fn into_stream(self) -> impl Stream<Item = ListView<R>> + Send + 'static {
        let reader = Self {
            items: self.items.clone(),
            state: self.state.clone(),
            banner: self.banner.clone(),
        };

        WatchStream::new(self.items)
            .map(|_| ())
            .merge(WatchStream::from_changes(self.state).map(|_| ()))
            .merge(WatchStream::from_changes(self.banner).map(|_| ()))
            .map(move |()| reader.view())
    }
}
