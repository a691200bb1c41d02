use leptos::prelude::*;
use named_colors_shared::colors::{Format, value_for_format};
use named_colors_shared::{Axis, ColorRecord, NeighborReport};
use wasm_bindgen_futures::{JsFuture, spawn_local};

use crate::app::{CatalogContext, CurrentPage, Page, Prefs, navigate};
use crate::neighbors::load_neighbors;
use crate::storage::LocalStore;

const FORMATS: [Format; 4] = [Format::Hex, Format::Keyword, Format::Rgb, Format::Hsl];

fn axis_title(axis: Axis) -> &'static str {
    match axis {
        Axis::Hue => "Similar hue",
        Axis::Saturation => "Similar saturation",
        Axis::Lightness => "Similar lightness",
    }
}

fn copy_to_clipboard(text: String) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let promise = window.navigator().clipboard().write_text(&text);
    spawn_local(async move {
        if let Err(e) = JsFuture::from(promise).await {
            web_sys::console::warn_2(&"clipboard write failed".into(), &e);
        }
    });
}

#[component]
pub fn ColorDetailPage(keyword: String) -> impl IntoView {
    let CatalogContext(catalog) = expect_context();
    let CurrentPage(page) = expect_context();

    let Some(color) = catalog.get(&keyword).cloned() else {
        return view! {
            <section>
                <h2>"Color not found"</h2>
                <p>{format!("There is no CSS named color called \"{keyword}\".")}</p>
                <a href="#/" on:click=move |ev| {
                    ev.prevent_default();
                    navigate(page, Page::Browse);
                }>"Back to all colors"</a>
            </section>
        }
        .into_any();
    };

    let report: RwSignal<NeighborReport> = RwSignal::new(NeighborReport::empty());
    {
        let keyword = color.keyword.clone();
        Effect::new(move || load_neighbors(keyword.clone(), report));
    }

    view! {
        <section style="display: flex; flex-direction: column; gap: 16px;">
            <ColorHeader color=color.clone() />
            {Axis::ALL
                .into_iter()
                .map(|axis| view! { <NeighborRow axis=axis report=report /> })
                .collect_view()}
            <p style="opacity: 0.7;">
                {color.tags.join(", ")}
            </p>
        </section>
    }
    .into_any()
}

#[component]
fn ColorHeader(color: ColorRecord) -> impl IntoView {
    let Prefs(prefs) = expect_context();
    let keyword = color.keyword.clone();
    let swatch = format!(
        "width: 160px; height: 160px; border-radius: 12px; border: 1px solid #d1d5db; background: {};",
        color.hex
    );
    let is_favorite = {
        let keyword = keyword.clone();
        move || prefs.with(|p| p.is_favorite(&keyword))
    };
    let toggle = {
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

    view! {
        <div style="display: flex; gap: 24px; align-items: center; flex-wrap: wrap;">
            <div style=swatch></div>
            <div>
                <h2 style="margin: 0 0 8px;">{keyword}</h2>
                <ul style="list-style: none; padding: 0; margin: 0; font-family: monospace;">
                    {FORMATS
                        .into_iter()
                        .map(|format| {
                            let value = value_for_format(format, &color);
                            let copied = value.clone();
                            view! {
                                <li style="display: flex; gap: 8px; align-items: center;">
                                    <span style="min-width: 160px;">{value}</span>
                                    <button
                                        type="button"
                                        title=format.copy_tooltip()
                                        aria-label=format.copy_tooltip()
                                        on:click=move |_| copy_to_clipboard(copied.clone())
                                    >
                                        "Copy"
                                    </button>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
                <button type="button" style="margin-top: 8px;" on:click=toggle>
                    {move || if is_favorite() { "\u{2605} Favorite" } else { "\u{2606} Add to favorites" }}
                </button>
            </div>
        </div>
    }
}

#[component]
fn NeighborRow(axis: Axis, report: RwSignal<NeighborReport>) -> impl IntoView {
    let CurrentPage(page) = expect_context();
    let Prefs(prefs) = expect_context();

    // Left neighbors are closest-first; reverse them so both sides grow outward.
    let row = move || {
        report.with(|r| {
            let side = r.axis(axis);
            side.left
                .iter()
                .rev()
                .chain(side.right.iter())
                .cloned()
                .collect::<Vec<ColorRecord>>()
        })
    };

    view! {
        <div>
            <h3 style="margin: 0 0 6px; font-size: 0.95rem;">{axis_title(axis)}</h3>
            <Show
                when=move || report.with(|r| {
                    let side = r.axis(axis);
                    !side.left.is_empty() || !side.right.is_empty()
                })
                fallback=|| view! { <p style="opacity: 0.6; margin: 0;">"No neighbors."</p> }
            >
                <div style="display: flex; gap: 8px; flex-wrap: wrap;">
                    <For
                        each=row
                        key=|color| color.keyword.clone()
                        children=move |color| {
                            let keyword = color.keyword.clone();
                            let target = Page::Color(keyword.clone());
                            let href = target.to_hash();
                            let swatch = format!(
                                "width: 56px; height: 56px; border-radius: 8px; background: {};",
                                color.hex
                            );
                            view! {
                                <a
                                    href=href
                                    title=keyword.clone()
                                    style="text-decoration: none; color: inherit; font-size: 0.75rem;"
                                    on:click=move |ev| {
                                        ev.prevent_default();
                                        navigate(page, target.clone());
                                    }
                                >
                                    <div style=swatch></div>
                                    <div>{move || prefs.with(|p| value_for_format(p.format, &color))}</div>
                                </a>
                            }
                        }
                    />
                </div>
            </Show>
        </div>
    }
}
