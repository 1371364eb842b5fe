//! Pagination state machine

use tracing::{debug, error, info, warn};

use crate::errors::FetchError;

/// Message shown in place of the list once any fetch has failed
pub const FETCH_ERROR_MESSAGE: &str = "Error fetching applications. Please try again later.";

/// One outstanding fetch: page number (1-based) and page size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

/// Named states of the list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListPhase {
    /// Nothing requested or nothing received yet
    Idle,
    /// Exactly one fetch is outstanding
    Loading,
    /// At least one item arrived and more may follow
    Loaded,
    /// The backend returned an empty page
    Exhausted,
    /// A fetch failed; terminal for this session
    Errored,
}

/// Observable pagination state
#[derive(Debug, Clone, PartialEq)]
pub struct PageState<T> {
    pub current_page: u32,
    pub items: Vec<T>,
    pub is_loading: bool,
    pub has_more: bool,
    pub error: Option<String>,
}

impl<T> Default for PageState<T> {
    fn default() -> Self {
        Self {
            current_page: 1,
            items: Vec::new(),
            is_loading: false,
            has_more: true,
            error: None,
        }
    }
}

impl<T> PageState<T> {
    pub fn phase(&self) -> ListPhase {
        if self.error.is_some() {
            ListPhase::Errored
        } else if self.is_loading {
            ListPhase::Loading
        } else if !self.has_more {
            ListPhase::Exhausted
        } else if self.items.is_empty() {
            ListPhase::Idle
        } else {
            ListPhase::Loaded
        }
    }
}

/// Accumulating list driven by page fetches.
///
/// Only one request can be in flight: every method that would start a fetch
/// returns `None` while one is outstanding.
#[derive(Debug)]
pub struct PaginatedList<T> {
    state: PageState<T>,
    page_size: u32,
    in_flight: Option<PageRequest>,
}

impl<T> PaginatedList<T> {
    pub fn new(page_size: u32) -> Self {
        Self {
            state: PageState::default(),
            page_size: page_size.max(1),
            in_flight: None,
        }
    }

    /// Reset to defaults and start loading page 1.
    ///
    /// Refused while a fetch is outstanding, so a late completion can never
    /// land in the fresh session.
    pub fn initialize(&mut self) -> Option<PageRequest> {
        if self.state.is_loading {
            debug!("Ignoring initialize while page {} is loading", self.state.current_page);
            return None;
        }

        self.state = PageState::default();
        self.load_page(1)
    }

    /// Start loading page `page` and make it the current page. Only reached
    /// through `initialize` and `request_next_page`.
    fn load_page(&mut self, page: u32) -> Option<PageRequest> {
        if self.state.is_loading {
            debug!("Ignoring load of page {}: a fetch is already in flight", page);
            return None;
        }
        if !self.state.has_more || self.state.error.is_some() {
            debug!("Ignoring load of page {} in phase {:?}", page, self.phase());
            return None;
        }
        if page == 0 || page < self.state.current_page {
            warn!(
                "Ignoring load of page {}: pages are 1-based and never go back (current {})",
                page, self.state.current_page
            );
            return None;
        }

        let request = PageRequest {
            page,
            limit: self.page_size,
        };
        self.state.current_page = page;
        self.state.is_loading = true;
        self.in_flight = Some(request);
        debug!("Loading page {} (limit {})", page, self.page_size);
        Some(request)
    }

    /// Advance to the next page, unless loading, exhausted or errored.
    pub fn request_next_page(&mut self) -> Option<PageRequest> {
        if self.state.is_loading || !self.state.has_more || self.state.error.is_some() {
            debug!("Ignoring next-page request in phase {:?}", self.phase());
            return None;
        }

        self.load_page(self.state.current_page + 1)
    }

    /// Apply the outcome of the in-flight fetch.
    pub fn complete(&mut self, request: PageRequest, outcome: Result<Vec<T>, FetchError>) {
        if self.in_flight != Some(request) {
            warn!(
                "Dropping completion for page {} which is not in flight (in flight: {:?})",
                request.page, self.in_flight
            );
            return;
        }

        match outcome {
            Ok(items) if items.is_empty() => {
                info!("Page {} is empty, no more applications", request.page);
                self.state.has_more = false;
            }
            Ok(items) => {
                debug!("Page {} appended {} items", request.page, items.len());
                self.state.items.extend(items);
            }
            Err(e) if e.is_timeout() => {
                error!("Timed out fetching applications (page {}): {}", request.page, e);
                self.state.error = Some(FETCH_ERROR_MESSAGE.to_string());
            }
            Err(e) => {
                error!("Error fetching applications (page {}): {}", request.page, e);
                self.state.error = Some(FETCH_ERROR_MESSAGE.to_string());
            }
        }

        self.state.is_loading = false;
        self.in_flight = None;
    }

    pub fn state(&self) -> &PageState<T> {
        &self.state
    }

    pub fn phase(&self) -> ListPhase {
        self.state.phase()
    }

    pub fn items(&self) -> &[T] {
        &self.state.items
    }

    pub fn current_page(&self) -> u32 {
        self.state.current_page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading
    }

    pub fn has_more(&self) -> bool {
        self.state.has_more
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    pub fn in_flight(&self) -> Option<PageRequest> {
        self.in_flight
    }

    pub fn into_items(self) -> Vec<T> {
        self.state.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_error() -> FetchError {
        FetchError::Status { status_code: 500 }
    }

    fn decode_error() -> FetchError {
        FetchError::Decode(serde_json::from_str::<serde_json::Value>("{").unwrap_err())
    }

    #[test]
    fn test_defaults() {
        let list: PaginatedList<u32> = PaginatedList::new(5);
        let state = list.state();
        assert_eq!(state.current_page, 1);
        assert!(state.items.is_empty());
        assert!(!state.is_loading);
        assert!(state.has_more);
        assert!(state.error.is_none());
        assert_eq!(list.phase(), ListPhase::Idle);
    }

    #[test]
    fn test_initialize_requests_first_page() {
        let mut list: PaginatedList<u32> = PaginatedList::new(5);
        let request = list.initialize().expect("first page");
        assert_eq!(request, PageRequest { page: 1, limit: 5 });
        assert!(list.is_loading());
        assert_eq!(list.phase(), ListPhase::Loading);
        assert_eq!(list.in_flight(), Some(request));
    }

    #[test]
    fn test_pages_append_in_arrival_order() {
        let mut list = PaginatedList::new(5);
        let first = list.initialize().unwrap();
        list.complete(first, Ok(vec![1, 2]));
        assert_eq!(list.phase(), ListPhase::Loaded);

        let second = list.request_next_page().expect("second page");
        assert_eq!(second, PageRequest { page: 2, limit: 5 });
        list.complete(second, Ok(vec![3, 4]));

        assert_eq!(list.items(), &[1, 2, 3, 4]);
        assert_eq!(list.current_page(), 2);
        assert!(!list.is_loading());
        assert!(list.has_more());
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut list = PaginatedList::new(2);
        let first = list.initialize().unwrap();
        list.complete(first, Ok(vec![7, 8]));
        let second = list.request_next_page().unwrap();
        list.complete(second, Ok(vec![8, 9]));
        assert_eq!(list.items(), &[7, 8, 8, 9]);
    }

    #[test]
    fn test_single_flight_guard() {
        let mut list: PaginatedList<u32> = PaginatedList::new(5);
        let first = list.initialize().unwrap();

        assert_eq!(list.request_next_page(), None);
        assert_eq!(list.load_page(2), None);
        assert_eq!(list.initialize(), None);
        assert_eq!(list.current_page(), 1);
        assert_eq!(list.in_flight(), Some(first));
    }

    #[test]
    fn test_empty_page_exhausts_permanently() {
        let mut list = PaginatedList::new(5);
        let first = list.initialize().unwrap();
        list.complete(first, Ok(vec![1]));
        let second = list.request_next_page().unwrap();
        list.complete(second, Ok(vec![]));

        assert_eq!(list.phase(), ListPhase::Exhausted);
        assert!(!list.has_more());
        assert_eq!(list.items(), &[1]);
        assert_eq!(list.request_next_page(), None);
        assert_eq!(list.current_page(), 2);
    }

    #[test]
    fn test_status_failure_is_terminal() {
        let mut list = PaginatedList::new(5);
        let first = list.initialize().unwrap();
        list.complete(first, Ok(vec![1, 2]));
        let second = list.request_next_page().unwrap();
        list.complete(second, Err(status_error()));

        assert_eq!(list.phase(), ListPhase::Errored);
        assert_eq!(list.error(), Some(FETCH_ERROR_MESSAGE));
        assert_eq!(list.items(), &[1, 2]);
        assert!(list.has_more());
        assert!(!list.is_loading());
        assert_eq!(list.request_next_page(), None);
    }

    #[test]
    fn test_decode_failure_matches_status_failure() {
        let mut by_status: PaginatedList<u32> = PaginatedList::new(5);
        let request = by_status.initialize().unwrap();
        by_status.complete(request, Err(status_error()));

        let mut by_decode: PaginatedList<u32> = PaginatedList::new(5);
        let request = by_decode.initialize().unwrap();
        by_decode.complete(request, Err(decode_error()));

        assert_eq!(by_status.state(), by_decode.state());
    }

    #[test]
    fn test_stale_completion_is_dropped() {
        let mut list = PaginatedList::new(5);
        let first = list.initialize().unwrap();
        list.complete(PageRequest { page: 4, limit: 5 }, Ok(vec![99]));
        assert!(list.is_loading());
        assert!(list.items().is_empty());

        list.complete(first, Ok(vec![1]));
        list.complete(first, Ok(vec![1]));
        assert_eq!(list.items(), &[1]);
    }

    #[test]
    fn test_initialize_starts_a_fresh_session() {
        let mut list = PaginatedList::new(5);
        let first = list.initialize().unwrap();
        list.complete(first, Err(status_error()));
        assert_eq!(list.phase(), ListPhase::Errored);

        let again = list.initialize().expect("reinitialize");
        assert_eq!(again.page, 1);
        assert!(list.error().is_none());
        list.complete(again, Ok(vec![5]));
        assert_eq!(list.items(), &[5]);
        assert_eq!(list.phase(), ListPhase::Loaded);
    }

    #[test]
    fn test_page_zero_is_rejected() {
        let mut list: PaginatedList<u32> = PaginatedList::new(0);
        assert_eq!(list.load_page(0), None);
        assert!(!list.is_loading());
        assert_eq!(list.page_size(), 1);
    }

    #[test]
    fn test_load_page_moves_current_page_forward() {
        let mut list = PaginatedList::new(5);
        let first = list.initialize().unwrap();
        list.complete(first, Ok(vec![1]));

        let third = list.load_page(3).expect("page 3");
        assert_eq!(list.current_page(), 3);
        list.complete(third, Ok(vec![30]));

        let next = list.request_next_page().expect("page 4");
        assert_eq!(next.page, 4);
        list.complete(next, Ok(vec![40]));
        assert_eq!(list.items(), &[1, 30, 40]);

        assert_eq!(list.load_page(2), None);
        assert_eq!(list.current_page(), 4);
    }

    #[test]
    fn test_load_page_refused_once_exhausted_or_errored() {
        let mut exhausted: PaginatedList<u32> = PaginatedList::new(5);
        let first = exhausted.initialize().unwrap();
        exhausted.complete(first, Ok(vec![]));
        assert_eq!(exhausted.load_page(2), None);
        assert_eq!(exhausted.phase(), ListPhase::Exhausted);
        assert!(!exhausted.is_loading());

        let mut errored: PaginatedList<u32> = PaginatedList::new(5);
        let first = errored.initialize().unwrap();
        errored.complete(first, Err(status_error()));
        assert_eq!(errored.load_page(2), None);
        assert_eq!(errored.phase(), ListPhase::Errored);
        assert_eq!(errored.in_flight(), None);
    }
}
