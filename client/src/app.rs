use leptos::prelude::*;

use crate::config::{ClientConfig, Page};
use crate::lobby::Lobby;
use crate::match_view::MatchView;

/// Picks the page for the current path: the match view on the match route,
/// the lobby everywhere else.
#[component]
pub fn App(config: ClientConfig, pathname: String) -> impl IntoView {
    let page = Page::for_path(&pathname, &config.match_route);
    tracing::debug!(?page, %pathname, "mounting page");
    match page {
        Page::Match => view! { <MatchView config=config /> }.into_any(),
        Page::Lobby => view! { <Lobby config=config /> }.into_any(),
    }
}
