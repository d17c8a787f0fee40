use crate::types::{CardType, Tab};

/// A lightweight snapshot of the search/filter inputs.
///
/// `search_input` is the live text-box content; `submitted_search` is the
/// term last submitted, which is the one the view filter applies.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueryState {
    pub search_input: String,
    pub submitted_search: String,
    pub filter_type: Option<CardType>,
}

/// A lightweight snapshot of the pagination state.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageState {
    pub page: u32,
    pub loading: bool,
    pub has_more: bool,
}

/// A combined snapshot of everything the rendering surface needs besides the
/// card records themselves.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionState {
    pub tab: Tab,
    pub query: QueryState,
    pub page: PageState,
}
