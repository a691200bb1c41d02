use leptos::prelude::*;
use named_colors_shared::Hsl;
use named_colors_shared::fuzzy::{HslHint, can_submit_name_guess, normalize_name_guess};
use named_colors_shared::game::{
    COLOR_COUNT_OPTIONS, ColorCount, GameMode, GameState, Guess, GuessResult, Hint,
};

use crate::app::{CatalogContext, GameHandle};

const SLIDER_START: Hsl = Hsl::new(180, 50, 50);

/// Letters of a name hint spaced out so the gaps are countable.
pub(crate) fn spaced_hint(hint: &str) -> String {
    hint.chars()
        .map(String::from)
        .collect::<Vec<_>>()
        .join(" ")
}

pub(crate) fn hsl_hint_text(hint: &HslHint) -> String {
    match (hint.h, hint.s, hint.l) {
        (Some(h), _, _) => format!("The hue is {h}."),
        (_, Some(s), _) => format!("The saturation is {s}%."),
        (_, _, Some(l)) => format!("The lightness is {l}%."),
        _ => String::new(),
    }
}

fn result_color(result: GuessResult) -> &'static str {
    match result {
        GuessResult::Correct | GuessResult::CloseEnough => "#15803d",
        GuessResult::Partial => "#b45309",
        GuessResult::Incorrect => "#b91c1c",
    }
}

#[component]
pub fn PlayPage() -> impl IntoView {
    let GameHandle(game) = expect_context();
    let state = Memo::new(move |_| game.with(|g| g.session().state));

    view! {
        <section style="max-width: 720px; margin: 0 auto;">
            {move || match state.get() {
                GameState::Menu => view! { <MenuScreen /> }.into_any(),
                GameState::NewGame => view! { <NewGameScreen /> }.into_any(),
                GameState::Playing => view! { <PlayingScreen /> }.into_any(),
                GameState::GameOver => view! { <GameOverScreen /> }.into_any(),
            }}
        </section>
    }
}

#[component]
fn MenuScreen() -> impl IntoView {
    let GameHandle(game) = expect_context();

    view! {
        <div style="text-align: center;">
            <h2>"Color memory game"</h2>
            <p>"Name the color you see, or dial in the color you are named."</p>
            <button type="button" on:click=move |_| game.update(|g| g.start_new_game())>
                "New game"
            </button>
        </div>
    }
}

#[component]
fn NewGameScreen() -> impl IntoView {
    let GameHandle(game) = expect_context();
    let CatalogContext(catalog) = expect_context();
    let mode = RwSignal::new(game.with_untracked(|g| g.session().mode));
    let count = RwSignal::new(ColorCount::default());

    let mode_button = move |value: GameMode, label: &'static str| {
        view! {
            <button
                type="button"
                aria-pressed=move || (mode.get() == value).to_string()
                style:font-weight=move || if mode.get() == value { "700" } else { "400" }
                on:click=move |_| mode.set(value)
            >
                {label}
            </button>
        }
    };

    let start = move |_| {
        let (mode, count) = (mode.get_untracked(), count.get_untracked());
        game.update(|g| g.select_mode(mode, count, catalog.colors()));
    };

    view! {
        <div style="display: flex; flex-direction: column; gap: 16px;">
            <h2 style="margin: 0;">"New game"</h2>
            <div style="display: flex; gap: 8px;">
                {mode_button(GameMode::Nametags, "Name the color")}
                {mode_button(GameMode::Sliders, "Match the color")}
            </div>
            <div style="display: flex; gap: 8px; align-items: center;">
                <span>"Colors:"</span>
                {COLOR_COUNT_OPTIONS
                    .into_iter()
                    .map(|option| view! {
                        <button
                            type="button"
                            aria-pressed=move || (count.get() == option).to_string()
                            style:font-weight=move || if count.get() == option { "700" } else { "400" }
                            on:click=move |_| count.set(option)
                        >
                            {option.to_string()}
                        </button>
                    })
                    .collect_view()}
            </div>
            <button type="button" on:click=start>"Start"</button>
        </div>
    }
}

#[component]
fn ScoreHeader() -> impl IntoView {
    let GameHandle(game) = expect_context();

    view! {
        <div style="display: flex; gap: 16px; font-variant-numeric: tabular-nums;">
            {move || game.with(|g| {
                let s = g.session();
                view! {
                    <span>{format!("Round {} / {}", (s.index + 1).min(s.set.len()), s.set.len())}</span>
                    <span>{format!("Score {}", s.score)}</span>
                    <span>{format!("Lives {}", s.lives)}</span>
                    <span>{format!("Hints {}", s.hints)}</span>
                }
            })}
        </div>
    }
}

#[component]
fn LastFeedback() -> impl IntoView {
    let GameHandle(game) = expect_context();

    move || {
        game.with(|g| g.session().last_feedback()).map(|feedback| {
            view! {
                <p style:color=result_color(feedback.result) style="margin: 0;">
                    <strong>{feedback.result.headline()}</strong>
                    " "
                    {feedback.message()}
                </p>
            }
        })
    }
}

#[component]
fn PlayingScreen() -> impl IntoView {
    let GameHandle(game) = expect_context();
    let mode = game.with_untracked(|g| g.session().mode);

    view! {
        <div style="display: flex; flex-direction: column; gap: 16px;">
            <ScoreHeader />
            <LastFeedback />
            {match mode {
                GameMode::Nametags => view! { <NametagsRound /> }.into_any(),
                GameMode::Sliders => view! { <SlidersRound /> }.into_any(),
            }}
            <InstaWinButton />
        </div>
    }
}

#[component]
fn NametagsRound() -> impl IntoView {
    let GameHandle(game) = expect_context();
    let current = Memo::new(move |_| game.with(|g| g.session().current_color().cloned()));
    let guess = RwSignal::new(String::new());
    let hint: RwSignal<Option<String>> = RwSignal::new(None);

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let text = guess.get_untracked();
        if !can_submit_name_guess(&text) {
            return;
        }
        let Some(color) = current.get_untracked() else {
            return;
        };
        game.update(|g| {
            g.guess(&color.keyword, Guess::Name(text));
        });
        guess.set(String::new());
        hint.set(None);
    };
    let ask_hint = move |_| {
        let Some(color) = current.get_untracked() else {
            return;
        };
        let mut revealed = None;
        game.update(|g| revealed = g.use_hint(&color.keyword));
        if let Some(Hint::Name(text)) = revealed {
            hint.set(Some(text));
        }
    };

    view! {
        <div
            style="height: 180px; border-radius: 12px; border: 1px solid #d1d5db;"
            style:background=move || current.with(|c| c.as_ref().map(|c| c.hex.clone()).unwrap_or_default())
        ></div>
        {move || hint.get().map(|text| view! {
            <p style="font-family: monospace; letter-spacing: 0.1em; margin: 0;">{spaced_hint(&text)}</p>
        })}
        <form style="display: flex; gap: 8px;" on:submit=submit>
            <input
                type="text"
                autocomplete="off"
                placeholder="Color name"
                aria-label="Color name"
                style="flex: 1; padding: 6px 10px;"
                prop:value=move || guess.get()
                on:input=move |ev| guess.set(normalize_name_guess(&event_target_value(&ev)))
            />
            <button type="submit" disabled=move || !can_submit_name_guess(&guess.get())>"Guess"</button>
            <button
                type="button"
                disabled=move || game.with(|g| g.session().hints == 0)
                on:click=ask_hint
            >
                "Hint"
            </button>
        </form>
    }
}

#[component]
fn SlidersRound() -> impl IntoView {
    let GameHandle(game) = expect_context();
    let current = Memo::new(move |_| game.with(|g| g.session().current_color().cloned()));
    let hsl = RwSignal::new(SLIDER_START);
    let hint: RwSignal<Option<HslHint>> = RwSignal::new(None);

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(color) = current.get_untracked() else {
            return;
        };
        let value = hsl.get_untracked();
        game.update(|g| {
            g.guess(&color.keyword, Guess::Hsl(value));
        });
        hsl.set(SLIDER_START);
        hint.set(None);
    };
    let ask_hint = move |_| {
        let Some(color) = current.get_untracked() else {
            return;
        };
        let mut revealed = None;
        game.update(|g| revealed = g.use_hint(&color.keyword));
        if let Some(Hint::Hsl(revealed)) = revealed {
            hsl.update(|value| revealed.apply_to(value));
            hint.set(Some(revealed));
        }
    };

    let slider = move |label: &'static str, max: i32, read: fn(&Hsl) -> i32, write: fn(&mut Hsl, i32)| {
        view! {
            <label style="display: flex; gap: 8px; align-items: center;">
                <span style="width: 90px;">{label}</span>
                <input
                    type="range"
                    min="0"
                    max=max.to_string()
                    style="flex: 1;"
                    prop:value=move || hsl.with(|v| read(v).to_string())
                    on:input=move |ev| {
                        let parsed = event_target_value(&ev).parse::<i32>().unwrap_or(0);
                        hsl.update(|v| write(v, parsed.clamp(0, max)));
                    }
                />
                <span style="width: 40px; text-align: right;">{move || hsl.with(|v| read(v))}</span>
            </label>
        }
    };

    view! {
        <h2 style="margin: 0; text-align: center;">
            {move || current.with(|c| c.as_ref().map(|c| c.keyword.clone()).unwrap_or_default())}
        </h2>
        <div
            style="height: 120px; border-radius: 12px; border: 1px solid #d1d5db;"
            style:background=move || hsl.with(|v| v.to_string())
        ></div>
        {move || hint.get().map(|h| view! { <p style="margin: 0;">{hsl_hint_text(&h)}</p> })}
        <form style="display: flex; flex-direction: column; gap: 8px;" on:submit=submit>
            {slider("Hue", 359, |v| v.h, |v, x| v.h = x)}
            {slider("Saturation", 100, |v| v.s, |v, x| v.s = x)}
            {slider("Lightness", 100, |v| v.l, |v, x| v.l = x)}
            <div style="display: flex; gap: 8px;">
                <button type="submit">"Guess"</button>
                <button
                    type="button"
                    disabled=move || game.with(|g| g.session().hints == 0)
                    on:click=ask_hint
                >
                    "Hint"
                </button>
            </div>
        </form>
    }
}

#[cfg(feature = "debug-tools")]
#[component]
fn InstaWinButton() -> impl IntoView {
    let GameHandle(game) = expect_context();
    let god_mode = expect_context::<crate::app::Prefs>().0;

    view! {
        <Show when=move || god_mode.with(|p| p.god_mode)>
            <button type="button" on:click=move |_| game.update(|g| g.insta_win(None))>
                "Insta-win"
            </button>
        </Show>
    }
}

#[cfg(not(feature = "debug-tools"))]
#[component]
fn InstaWinButton() -> impl IntoView {}

#[component]
fn GameOverScreen() -> impl IntoView {
    let GameHandle(game) = expect_context();
    let report = game.with_untracked(|g| g.game_over_report());
    let rows = game.with_untracked(|g| g.session().summary());

    view! {
        <div style="display: flex; flex-direction: column; gap: 12px;">
            <h2 style="margin: 0;">{report.headline}</h2>
            {report.high_score.map(|text| view! { <p style="margin: 0;">{text}</p> })}
            <p style="margin: 0;">{report.followup}</p>
            {report.suggestion.map(|text| view! { <p style="margin: 0; opacity: 0.8;">{text}</p> })}
            <table style="border-collapse: collapse; width: 100%;">
                <thead>
                    <tr>
                        <th style="text-align: left;">"Your guess"</th>
                        <th style="text-align: left;">"Answer"</th>
                        <th style="text-align: right;">"Points"</th>
                    </tr>
                </thead>
                <tbody>
                    {rows
                        .into_iter()
                        .map(|row| view! {
                            <tr style:color=result_color(row.result)>
                                <td>{row.guess}</td>
                                <td>{row.actual}</td>
                                <td style="text-align: right;">{row.points}</td>
                            </tr>
                        })
                        .collect_view()}
                </tbody>
            </table>
            <button type="button" on:click=move |_| game.update(|g| g.start_new_game())>
                "Play again"
            </button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_hint_is_spaced() {
        assert_eq!(spaced_hint("t_n"), "t _ n");
        assert_eq!(spaced_hint(""), "");
    }

    #[test]
    fn hsl_hint_names_the_revealed_channel() {
        let hue = HslHint {
            h: Some(34),
            ..HslHint::default()
        };
        let lightness = HslHint {
            l: Some(69),
            ..HslHint::default()
        };
        assert_eq!(hsl_hint_text(&hue), "The hue is 34.");
        assert_eq!(hsl_hint_text(&lightness), "The lightness is 69%.");
        assert_eq!(hsl_hint_text(&HslHint::default()), "");
    }
}
