//! What a renderer is allowed to show for a given `PageState`

use super::state::{PageState, PaginatedList};

pub const LOAD_MORE_LABEL: &str = "Load More";
pub const LOADING_LABEL: &str = "Loading...";

/// The load-more affordance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadMore {
    pub label: &'static str,
    pub enabled: bool,
}

/// Either the error message alone, or the items plus an optional load-more
/// control. The two are never shown together.
#[derive(Debug, PartialEq)]
pub enum ListView<'a, T> {
    Error(&'a str),
    Items {
        items: &'a [T],
        load_more: Option<LoadMore>,
    },
}

impl<'a, T> ListView<'a, T> {
    pub fn load_more(&self) -> Option<LoadMore> {
        match self {
            ListView::Error(_) => None,
            ListView::Items { load_more, .. } => *load_more,
        }
    }

    pub fn items(&self) -> &'a [T] {
        match self {
            ListView::Error(_) => &[],
            ListView::Items { items, .. } => *items,
        }
    }
}

impl<T> PageState<T> {
    pub fn view(&self) -> ListView<'_, T> {
        if let Some(message) = self.error.as_deref() {
            return ListView::Error(message);
        }

        let load_more = self.has_more.then(|| {
            if self.is_loading {
                LoadMore {
                    label: LOADING_LABEL,
                    enabled: false,
                }
            } else {
                LoadMore {
                    label: LOAD_MORE_LABEL,
                    enabled: true,
                }
            }
        });

        ListView::Items {
            items: &self.items,
            load_more,
        }
    }
}

impl<T> PaginatedList<T> {
    pub fn view(&self) -> ListView<'_, T> {
        self.state().view()
    }
}
