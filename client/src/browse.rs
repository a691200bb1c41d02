use leptos::prelude::*;
use named_colors_shared::ColorRecord;
use named_colors_shared::colors::value_for_format;
use named_colors_shared::prefs::GridSize;

use crate::app::{BrowseFilter, CatalogContext, CurrentPage, Page, Prefs, navigate};
use crate::storage::LocalStore;

fn grid_style(size: GridSize) -> &'static str {
    match size {
        GridSize::Small => {
            "display: grid; gap: 12px; grid-template-columns: repeat(auto-fill, minmax(140px, 1fr));"
        }
        GridSize::Large => {
            "display: grid; gap: 16px; grid-template-columns: repeat(auto-fill, minmax(240px, 1fr));"
        }
    }
}

#[component]
pub fn BrowsePage() -> impl IntoView {
    let CatalogContext(catalog) = expect_context();
    let BrowseFilter(filter) = expect_context();
    let Prefs(prefs) = expect_context();

    let level_tags = catalog.level_tags();
    let descriptive_tags = catalog.descriptive_tags();

    let visible = {
        let catalog = catalog.clone();
        Memo::new(move |_| {
            filter.with(|f| {
                catalog
                    .filter(f)
                    .into_iter()
                    .cloned()
                    .collect::<Vec<ColorRecord>>()
            })
        })
    };

    view! {
        <section>
            <div style="display: flex; flex-wrap: wrap; gap: 8px; align-items: center; margin-bottom: 12px;">
                <input
                    type="search"
                    placeholder="Search by name or hex"
                    aria-label="Search colors"
                    style="padding: 6px 10px; min-width: 220px;"
                    prop:value=move || filter.with(|f| f.search().to_string())
                    on:input=move |ev| {
                        let raw = event_target_value(&ev);
                        filter.update(|f| f.set_search(&raw));
                    }
                />
                <button
                    type="button"
                    title="Toggle card size"
                    on:click=move |_| prefs.update(|p| p.toggle_grid_size(&mut LocalStore))
                >
                    {move || prefs.with(|p| p.grid_size.as_str())}
                </button>
                <button
                    type="button"
                    disabled=move || filter.with(|f| f.active_tags().is_empty())
                    on:click=move |_| filter.update(|f| f.clear_tags())
                >
                    "Clear filters"
                </button>
            </div>
            <TagRow tags=level_tags />
            <TagRow tags=descriptive_tags />
            <p style="opacity: 0.7; margin: 8px 0;">
                {move || format!("{} of {} colors", visible.with(Vec::len), catalog.len())}
            </p>
            <ColorGrid colors=Signal::derive(move || visible.get()) />
        </section>
    }
}

#[component]
fn TagRow(tags: Vec<String>) -> impl IntoView {
    let BrowseFilter(filter) = expect_context();

    view! {
        <div style="display: flex; flex-wrap: wrap; gap: 6px; margin-bottom: 8px;">
            {tags
                .into_iter()
                .map(|tag| {
                    let pressed = {
                        let tag = tag.clone();
                        move || filter.with(|f| f.is_active(&tag))
                    };
                    let weight = pressed.clone();
                    let toggle = tag.clone();
                    view! {
                        <button
                            type="button"
                            aria-pressed=move || pressed().to_string()
                            style="padding: 2px 8px; border-radius: 999px; border: 1px solid #9ca3af;"
                            style:font-weight=move || if weight() { "700" } else { "400" }
                            on:click=move |_| filter.update(|f| f.toggle_tag(&toggle))
                        >
                            {tag}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}

#[component]
pub fn FavoritesPage() -> impl IntoView {
    let CatalogContext(catalog) = expect_context();
    let Prefs(prefs) = expect_context();

    let favorites = Memo::new(move |_| {
        prefs.with(|p| {
            catalog
                .favorites(&p.favorites)
                .into_iter()
                .cloned()
                .collect::<Vec<ColorRecord>>()
        })
    });

    view! {
        <section>
            <h2 style="margin-top: 0;">"Favorites"</h2>
            <Show
                when=move || favorites.with(|f| !f.is_empty())
                fallback=|| view! {
                    <p style="opacity: 0.7;">"No favorites yet. Use the star on any color to save it here."</p>
                }
            >
                <ColorGrid colors=Signal::derive(move || favorites.get()) />
            </Show>
        </section>
    }
}

#[component]
pub(crate) fn ColorGrid(#[prop(into)] colors: Signal<Vec<ColorRecord>>) -> impl IntoView {
    let Prefs(prefs) = expect_context();

    view! {
        <div style=move || prefs.with(|p| grid_style(p.grid_size))>
            <For
                each=move || colors.get()
                key=|color| color.keyword.clone()
                children=move |color| view! { <ColorCard color=color /> }
            />
        </div>
    }
}

#[component]
pub(crate) fn ColorCard(color: ColorRecord) -> impl IntoView {
    let CurrentPage(page) = expect_context();
    let Prefs(prefs) = expect_context();

    let keyword = color.keyword.clone();
    let swatch = format!(
        "height: 96px; border-radius: 8px 8px 0 0; background: {};",
        color.hex
    );
    let is_favorite = {
        let keyword = keyword.clone();
        move || prefs.with(|p| p.is_favorite(&keyword))
    };
    let toggle_favorite = {
        let keyword = keyword.clone();
        move |_| {
            prefs.update(|p| {
                if p.is_favorite(&keyword) {
                    p.remove_favorite(&mut LocalStore, &keyword);
                } else {
                    p.add_favorite(&mut LocalStore, &keyword);
                }
            });
        }
    };
    let open = {
        let keyword = keyword.clone();
        move |ev: web_sys::MouseEvent| {
            ev.prevent_default();
            navigate(page, Page::Color(keyword.clone()));
        }
    };
    let value = move || prefs.with(|p| value_for_format(p.format, &color));
    let star_label = {
        let is_favorite = is_favorite.clone();
        move || {
            if is_favorite() {
                "Remove from favorites"
            } else {
                "Add to favorites"
            }
        }
    };

    view! {
        <article style="border: 1px solid #d1d5db; border-radius: 8px; overflow: hidden;">
            <a href=Page::Color(keyword.clone()).to_hash() on:click=open style="display: block; text-decoration: none; color: inherit;">
                <div style=swatch></div>
                <div style="padding: 6px 8px; font-family: monospace;">{value}</div>
            </a>
            <button
                type="button"
                title=star_label.clone()
                aria-label=star_label
                style="margin: 0 8px 8px; border: none; background: none; cursor: pointer; font-size: 1.1rem;"
                on:click=toggle_favorite
            >
                {move || if is_favorite() { "\u{2605}" } else { "\u{2606}" }}
            </button>
        </article>
    }
}
