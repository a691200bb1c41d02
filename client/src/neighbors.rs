use std::cell::RefCell;

use leptos::prelude::*;
use named_colors_shared::NeighborReport;
use wasm_bindgen_futures::spawn_local;
use web_sys::{AbortController, AbortSignal};

/// Last-request-wins bookkeeping for neighbor fetches.
///
/// Every `begin` supersedes whatever was in flight, even for the same keyword, since
/// the caller may be a freshly mounted view with its own target. Only the newest
/// request settles as deliverable.
pub(crate) struct RequestSlot<H> {
    next_id: u64,
    current: Option<(u64, Option<H>)>,
}

pub(crate) struct Started<H> {
    pub id: u64,
    /// Abort handle of the request this one replaced.
    pub superseded: Option<H>,
}

impl<H> RequestSlot<H> {
    pub(crate) const fn new() -> Self {
        Self {
            next_id: 0,
            current: None,
        }
    }

    pub(crate) fn begin(&mut self, handle: Option<H>) -> Started<H> {
        let id = self.next_id;
        self.next_id += 1;
        let superseded = self
            .current
            .replace((id, handle))
            .and_then(|(_, previous)| previous);
        Started { id, superseded }
    }

    /// Close out request `id`. Returns whether its result may be written.
    pub(crate) fn settle(&mut self, id: u64) -> bool {
        if self.current.as_ref().is_some_and(|(current, _)| *current == id) {
            self.current = None;
            true
        } else {
            false
        }
    }
}

thread_local! {
    static IN_FLIGHT: RefCell<RequestSlot<AbortController>> = const { RefCell::new(RequestSlot::new()) };
}

pub(crate) fn neighbors_url(keyword: &str) -> String {
    format!(
        "/api/colors/{}/neighbors",
        String::from(js_sys::encode_uri_component(keyword))
    )
}

/// Fetch the neighbor report for `keyword` into `target`.
///
/// A newer call aborts the one in flight, and the superseded request never writes.
/// Any other failure leaves an empty report. Writes after the owning view is gone
/// are dropped.
pub(crate) fn load_neighbors(keyword: String, target: RwSignal<NeighborReport>) {
    let controller = AbortController::new().ok();
    let Started { id, superseded } =
        IN_FLIGHT.with(|slot| slot.borrow_mut().begin(controller.clone()));
    if let Some(previous) = superseded {
        previous.abort();
    }

    spawn_local(async move {
        let signal = controller.as_ref().map(AbortController::signal);
        let result = fetch_neighbors(&keyword, signal.as_ref()).await;
        if !IN_FLIGHT.with(|slot| slot.borrow_mut().settle(id)) {
            return;
        }

        match result {
            Ok(report) => {
                target.try_set(report);
            }
            Err(e) => {
                web_sys::console::warn_1(&format!("Neighbor fetch failed for {keyword}: {e}").into());
                target.try_set(NeighborReport::empty());
            }
        }
    });
}

async fn fetch_neighbors(
    keyword: &str,
    signal: Option<&AbortSignal>,
) -> Result<NeighborReport, String> {
    let resp = gloo_net::http::Request::get(&neighbors_url(keyword))
        .abort_signal(signal)
        .send()
        .await
        .map_err(|e| format!("fetch error: {e}"))?;

    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }

    resp.json::<NeighborReport>()
        .await
        .map_err(|e| format!("parse error: {e}"))
}

#[cfg(test)]
mod tests {
    use super::RequestSlot;

    #[test]
    fn newer_request_aborts_and_outranks_older() {
        let mut slot = RequestSlot::new();
        let tan = slot.begin(Some("tan"));
        assert!(tan.superseded.is_none());

        let teal = slot.begin(Some("teal"));
        assert_eq!(teal.superseded, Some("tan"));

        assert!(!slot.settle(tan.id));
        assert!(slot.settle(teal.id));
    }

    #[test]
    fn remounted_view_for_same_keyword_gets_its_own_request() {
        let mut slot = RequestSlot::new();
        let first_mount = slot.begin(Some("tan#1"));
        let second_mount = slot.begin(Some("tan#2"));

        assert_eq!(second_mount.superseded, Some("tan#1"));
        assert_ne!(first_mount.id, second_mount.id);
        assert!(!slot.settle(first_mount.id));
        assert!(slot.settle(second_mount.id));
    }

    #[test]
    fn settled_request_clears_the_slot() {
        let mut slot: RequestSlot<&str> = RequestSlot::new();
        let only = slot.begin(None);
        assert!(slot.settle(only.id));
        assert!(!slot.settle(only.id));

        let next = slot.begin(Some("next"));
        assert!(next.superseded.is_none());
    }
}
