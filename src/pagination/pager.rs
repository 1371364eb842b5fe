//! Drives a `PaginatedList` against a `PageSource`

use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use super::state::{ListPhase, PageRequest, PaginatedList};
use crate::backend::PageSource;
use crate::errors::FetchError;

/// Result of a fetch started with `spawn_fetch`
#[derive(Debug)]
pub struct PageCompletion<T> {
    pub request: PageRequest,
    pub outcome: Result<Vec<T>, FetchError>,
}

/// Run one fetch on the runtime and deliver its outcome on `sender`.
///
/// The caller keeps ownership of the list and feeds the completion back
/// through `PaginatedList::complete`.
pub fn spawn_fetch<S>(
    source: Arc<S>,
    request: PageRequest,
    sender: mpsc::UnboundedSender<PageCompletion<S::Item>>,
) -> JoinHandle<()>
where
    S: PageSource + ?Sized + 'static,
{
    tokio::spawn(async move {
        let outcome = source.fetch_page(request).await;
        if sender.send(PageCompletion { request, outcome }).is_err() {
            debug!("List went away before page {} completed", request.page);
        }
    })
}

/// A list plus the source it pages through. Each operation awaits its fetch,
/// so `&mut self` keeps requests strictly sequential.
pub struct Pager<S: PageSource + ?Sized> {
    list: PaginatedList<S::Item>,
    source: Arc<S>,
}

impl<S: PageSource + ?Sized> Pager<S> {
    pub fn new(source: Arc<S>, page_size: u32) -> Self {
        Self {
            list: PaginatedList::new(page_size),
            source,
        }
    }

    /// Reset and load page 1. Returns whether a request was issued.
    pub async fn initialize(&mut self) -> bool {
        let request = self.list.initialize();
        self.run(request).await
    }

    pub async fn request_next_page(&mut self) -> bool {
        let request = self.list.request_next_page();
        self.run(request).await
    }

    /// Load page 1, then keep following next pages until `max_pages` pages
    /// have been requested, the list is exhausted or a fetch fails.
    pub async fn load_until(&mut self, max_pages: Option<u32>) -> ListPhase {
        if self.initialize().await {
            while max_pages.map_or(true, |max| self.list.current_page() < max) {
                if !self.request_next_page().await {
                    break;
                }
            }
        }
        self.list.phase()
    }

    async fn run(&mut self, request: Option<PageRequest>) -> bool {
        let Some(request) = request else {
            return false;
        };

        let outcome = self.source.fetch_page(request).await;
        self.list.complete(request, outcome);
        true
    }

    pub fn list(&self) -> &PaginatedList<S::Item> {
        &self.list
    }

    pub fn into_list(self) -> PaginatedList<S::Item> {
        self.list
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::testing::{GatedSource, ScriptedSource};
    use crate::pagination::{ListView, LoadMore, FETCH_ERROR_MESSAGE, LOADING_LABEL, LOAD_MORE_LABEL};

    #[tokio::test]
    async fn test_initialize_issues_one_request_for_page_one() {
        let source = Arc::new(ScriptedSource::new(vec![Ok(vec![1, 2])]));
        let mut pager = Pager::new(source.clone(), 5);

        assert!(pager.initialize().await);
        assert_eq!(source.requests(), vec![PageRequest { page: 1, limit: 5 }]);
        assert_eq!(pager.list().items(), &[1, 2]);
        assert_eq!(
            pager.list().view().load_more(),
            Some(LoadMore {
                label: LOAD_MORE_LABEL,
                enabled: true
            })
        );
    }

    #[tokio::test]
    async fn test_load_more_appends_second_page() {
        let source = Arc::new(ScriptedSource::new(vec![Ok(vec![1, 2]), Ok(vec![3, 4])]));
        let mut pager = Pager::new(source.clone(), 5);

        pager.initialize().await;
        assert!(pager.request_next_page().await);

        assert_eq!(
            source.requests().last(),
            Some(&PageRequest { page: 2, limit: 5 })
        );
        assert_eq!(source.requests().len(), 2);
        assert_eq!(pager.list().items(), &[1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_empty_first_page_exhausts() {
        let source = Arc::new(ScriptedSource::<u32>::new(vec![Ok(vec![])]));
        let mut pager = Pager::new(source.clone(), 5);

        pager.initialize().await;
        assert_eq!(pager.list().phase(), ListPhase::Exhausted);
        assert_eq!(pager.list().view().load_more(), None);

        assert!(!pager.request_next_page().await);
        assert_eq!(source.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_first_page_shows_error_only() {
        let source = Arc::new(ScriptedSource::<u32>::new(vec![Err(FetchError::Status {
            status_code: 500,
        })]));
        let mut pager = Pager::new(source.clone(), 5);

        pager.initialize().await;
        assert_eq!(pager.list().view(), ListView::Error(FETCH_ERROR_MESSAGE));
        assert!(!pager.request_next_page().await);
        assert_eq!(source.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_load_until_stops_at_exhaustion() {
        let source = Arc::new(ScriptedSource::new(vec![
            Ok(vec![1, 2]),
            Ok(vec![3]),
            Ok(vec![]),
        ]));
        let mut pager = Pager::new(source.clone(), 2);

        let phase = pager.load_until(None).await;
        assert_eq!(phase, ListPhase::Exhausted);
        assert_eq!(pager.list().items(), &[1, 2, 3]);
        let pages: Vec<u32> = source.requests().iter().map(|r| r.page).collect();
        assert_eq!(pages, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_load_until_respects_page_cap() {
        let source = Arc::new(ScriptedSource::new(vec![
            Ok(vec![1]),
            Ok(vec![2]),
            Ok(vec![3]),
        ]));
        let mut pager = Pager::new(source.clone(), 1);

        let phase = pager.load_until(Some(2)).await;
        assert_eq!(phase, ListPhase::Loaded);
        assert_eq!(pager.into_list().into_items(), vec![1, 2]);
        assert_eq!(source.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_next_page_stops_paging() {
        let source = Arc::new(ScriptedSource::new(vec![
            Ok(vec![1]),
            Err(FetchError::Status { status_code: 503 }),
            Ok(vec![3]),
        ]));
        let mut pager = Pager::new(source.clone(), 1);

        let phase = pager.load_until(None).await;
        assert_eq!(phase, ListPhase::Errored);
        assert!(!pager.request_next_page().await);
        let pages: Vec<u32> = source.requests().iter().map(|r| r.page).collect();
        assert_eq!(pages, vec![1, 2]);
        assert_eq!(pager.list().current_page(), 2);
    }

    #[tokio::test]
    async fn test_spawned_fetch_keeps_list_loading_until_completion() {
        let (source, release) = GatedSource::new();
        let source = Arc::new(source);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut list = PaginatedList::new(5);

        let request = list.initialize().unwrap();
        let handle = spawn_fetch(source, request, tx);

        assert_eq!(
            list.view().load_more(),
            Some(LoadMore {
                label: LOADING_LABEL,
                enabled: false
            })
        );
        assert_eq!(list.request_next_page(), None);

        release.send(vec![1u32]).unwrap();
        let completion = rx.recv().await.expect("completion");
        handle.await.unwrap();
        list.complete(completion.request, completion.outcome);

        assert_eq!(list.items(), &[1]);
        assert_eq!(
            list.view().load_more(),
            Some(LoadMore {
                label: LOAD_MORE_LABEL,
                enabled: true
            })
        );
    }
}
