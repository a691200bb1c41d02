use std::sync::Arc;

use leptos::ev;
use leptos::prelude::*;
use named_colors_shared::game::{DebugOptions, Game};
use named_colors_shared::prefs::AppState;
use named_colors_shared::rng::Rng;
use named_colors_shared::{Catalog, ColorFilter};

use crate::browse::{BrowsePage, FavoritesPage};
use crate::detail::ColorDetailPage;
use crate::play::PlayPage;
use crate::storage::LocalStore;

/// Hash-routed pages (`#/`, `#/favorites`, `#/colors/{keyword}`, `#/play`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Page {
    Browse,
    Favorites,
    Color(String),
    Play,
}

impl Page {
    pub(crate) fn from_hash(hash: &str) -> Self {
        let path = hash.trim_start_matches('#').trim_start_matches('/');
        let mut parts = path.splitn(2, '/');
        match (parts.next(), parts.next()) {
            (Some("favorites"), _) => Self::Favorites,
            (Some("play"), _) => Self::Play,
            (Some("colors"), Some(keyword)) if !keyword.trim().is_empty() => {
                Self::Color(keyword.trim().to_string())
            }
            _ => Self::Browse,
        }
    }

    /// Page to switch to after the hash changed, or `None` when already there.
    pub(crate) fn after_hash_change(current: &Page, hash: &str) -> Option<Page> {
        let next = Self::from_hash(hash);
        (next != *current).then_some(next)
    }

    pub(crate) fn to_hash(&self) -> String {
        match self {
            Self::Browse => "#/".to_string(),
            Self::Favorites => "#/favorites".to_string(),
            Self::Color(keyword) => format!("#/colors/{keyword}"),
            Self::Play => "#/play".to_string(),
        }
    }
}

#[derive(Clone, Copy)]
pub(crate) struct CurrentPage(pub RwSignal<Page>);
#[derive(Clone, Copy)]
pub(crate) struct Prefs(pub RwSignal<AppState>);
#[derive(Clone, Copy)]
pub(crate) struct BrowseFilter(pub RwSignal<ColorFilter>);
#[derive(Clone, Copy)]
pub(crate) struct GameHandle(pub RwSignal<Game<LocalStore>>);
#[derive(Clone)]
pub(crate) struct CatalogContext(pub Arc<Catalog>);

pub(crate) fn navigate(page: RwSignal<Page>, to: Page) {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_hash(&to.to_hash());
    }
    page.set(to);
}

fn system_prefers_dark() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
        .is_some_and(|mq| mq.matches())
}

fn god_mode_requested() -> bool {
    if !cfg!(feature = "debug-tools") {
        return false;
    }
    web_sys::window()
        .and_then(|w| w.location().search().ok())
        .is_some_and(|search| search.contains("godmode"))
}

fn initial_page() -> Page {
    web_sys::window()
        .and_then(|w| w.location().hash().ok())
        .map(|hash| Page::from_hash(&hash))
        .unwrap_or(Page::Browse)
}

#[component]
pub fn App() -> impl IntoView {
    let catalog = match Catalog::builtin() {
        Ok(catalog) => Arc::new(catalog),
        Err(e) => {
            web_sys::console::error_1(&format!("Color catalog failed to load: {e}").into());
            return view! { <p style="padding: 24px;">"Color catalog unavailable."</p> }.into_any();
        }
    };

    let mut prefs = AppState::load(&LocalStore);
    prefs.god_mode = god_mode_requested();
    let debug = DebugOptions {
        unlimited: prefs.god_mode,
    };
    let prefs: RwSignal<AppState> = RwSignal::new(prefs);
    let page: RwSignal<Page> = RwSignal::new(initial_page());
    let filter: RwSignal<ColorFilter> = RwSignal::new(ColorFilter::default());
    let game: RwSignal<Game<LocalStore>> =
        RwSignal::new(Game::restore(LocalStore, Rng::from_entropy(), debug));

    provide_context(CatalogContext(catalog));
    provide_context(CurrentPage(page));
    provide_context(Prefs(prefs));
    provide_context(BrowseFilter(filter));
    provide_context(GameHandle(game));

    // Back/forward and hand-edited hashes. `navigate` has already set the page by the
    // time its own hash change arrives, so that one is a no-op.
    let _ = window_event_listener(ev::hashchange, move |_| {
        let Some(hash) = web_sys::window().and_then(|w| w.location().hash().ok()) else {
            return;
        };
        if let Some(next) = page.with_untracked(|current| Page::after_hash_change(current, &hash)) {
            page.set(next);
        }
    });

    // Reflect the theme on <html> whenever it changes.
    Effect::new(move || {
        let dark = prefs.with(|p| p.theme.is_dark(system_prefers_dark()));
        let Some(root) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
        else {
            return;
        };
        let classes = root.class_list();
        let (add, remove) = if dark { ("dark", "light") } else { ("light", "dark") };
        let _ = classes.remove_1(remove);
        let _ = classes.add_1(add);
        let _ = root.set_attribute("data-theme", add);
    });

    view! {
        <div style="min-height: 100vh; display: flex; flex-direction: column;">
            <Header />
            <main style="flex: 1; padding: 16px 24px;">
                {move || match page.get() {
                    Page::Browse => view! { <BrowsePage /> }.into_any(),
                    Page::Favorites => view! { <FavoritesPage /> }.into_any(),
                    Page::Color(keyword) => view! { <ColorDetailPage keyword=keyword /> }.into_any(),
                    Page::Play => view! { <PlayPage /> }.into_any(),
                }}
            </main>
        </div>
    }
    .into_any()
}

#[component]
fn Header() -> impl IntoView {
    let CurrentPage(page) = expect_context();
    let Prefs(prefs) = expect_context();

    let nav_link = move |label: &'static str, to: Page| {
        let target = to.clone();
        view! {
            <a
                href=to.to_hash()
                style="padding: 6px 10px; text-decoration: none;"
                style:font-weight=move || if page.get() == target { "700" } else { "400" }
                on:click=move |ev| {
                    ev.prevent_default();
                    navigate(page, to.clone());
                }
            >{label}</a>
        }
    };

    let on_theme = move |_| {
        let system_dark = system_prefers_dark();
        prefs.update(|p| p.toggle_theme(&mut LocalStore, system_dark));
    };
    let on_format = move |_| prefs.update(|p| p.cycle_format(&mut LocalStore));
    let theme_title = move || {
        if prefs.with(|p| p.theme.is_dark(system_prefers_dark())) {
            "Switch to light theme"
        } else {
            "Switch to dark theme"
        }
    };

    view! {
        <header style="display: flex; align-items: center; gap: 12px; padding: 12px 24px; border-bottom: 1px solid #d1d5db;">
            <strong style="font-size: 1.1rem; letter-spacing: 0.04em;">"Named Colors"</strong>
            <nav style="display: flex; gap: 4px; flex: 1;">
                {nav_link("Colors", Page::Browse)}
                {nav_link("Favorites", Page::Favorites)}
                {nav_link("Play", Page::Play)}
            </nav>
            <button type="button" title="Change color format" on:click=on_format>
                {move || prefs.with(|p| p.format.label())}
            </button>
            <button type="button" title=theme_title aria-live="polite" on:click=on_theme>
                {move || prefs.with(|p| p.theme.as_str())}
            </button>
        </header>
    }
}
