pub mod config;
pub mod content;
pub mod session;
pub mod shuffle;

use crate::session::{Page, Session};
use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

const BUTTON_REVEAL_MS: u32 = 5_000;
const COMPLETION_SETTLE_MS: u32 = 500;

#[derive(PartialEq, Clone)]
enum FetchStatus {
    Idle,
    Loading,
    Error(String),
}

#[function_component(App)]
fn app() -> Html {
    let load_status = use_state(|| FetchStatus::Loading);
    let affirmations = use_state(|| None::<Vec<String>>);
    let session = use_state(Session::new);
    let show_buttons = use_state(|| false);

    {
        let load_status = load_status.clone();
        let affirmations = affirmations.clone();

        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    match content::resolve().await {
                        Ok(resolved) => {
                            log::info!(
                                "serving {} affirmations from the {} source",
                                resolved.affirmations.len(),
                                resolved.origin
                            );
                            affirmations.set(Some(resolved.affirmations));
                            load_status.set(FetchStatus::Idle);
                        }
                        Err(err) => {
                            load_status.set(FetchStatus::Error(err.to_string()));
                        }
                    }
                });

                || ()
            },
            (),
        );
    }

    // Reveal the home buttons after a quiet pause, independent of the fetch.
    {
        let show_buttons = show_buttons.clone();

        use_effect_with_deps(
            move |_| {
                let reveal = Timeout::new(BUTTON_REVEAL_MS, move || {
                    show_buttons.set(true);
                });
                move || drop(reveal)
            },
            (),
        );
    }

    // Once every affirmation has been seen, let the last one linger briefly,
    // then move to the completed page. Dropping the handle on cleanup keeps a
    // stale timer from firing after further navigation or unmount.
    {
        let session_handle = session.clone();

        use_effect_with_deps(
            move |(page, _viewed): &(Page, usize)| {
                let settle = if *page == Page::Takeout && session_handle.all_viewed() {
                    let completed = {
                        let mut next = (*session_handle).clone();
                        next.complete();
                        next
                    };
                    let session_handle = session_handle.clone();
                    Some(Timeout::new(COMPLETION_SETTLE_MS, move || {
                        session_handle.set(completed);
                    }))
                } else {
                    None
                };
                move || drop(settle)
            },
            (session.page(), session.viewed_count()),
        );
    }

    let on_takeout = {
        let session = session.clone();
        let affirmations = affirmations.clone();
        Callback::from(move |_| {
            let count = (*affirmations).as_ref().map_or(0, Vec::len);
            let mut next = (*session).clone();
            next.start(shuffle::random_order(count));
            session.set(next);
        })
    };

    let on_next = {
        let session = session.clone();
        Callback::from(move |_| {
            let mut next = (*session).clone();
            next.next();
            session.set(next);
        })
    };

    let on_back = {
        let session = session.clone();
        Callback::from(move |_| {
            let mut next = (*session).clone();
            next.back();
            session.set(next);
        })
    };

    let on_exit = {
        let session = session.clone();
        let show_buttons = show_buttons.clone();
        Callback::from(move |_| {
            let mut next = (*session).clone();
            next.exit();
            session.set(next);
            // No second wait after a full pass.
            show_buttons.set(true);
        })
    };

    let on_salad_mix = Callback::from(|_| gloo_dialogs::alert("Salad mix coming soon!"));
    let on_pick_adventure =
        Callback::from(|_| gloo_dialogs::alert("Pick your adventure coming soon!"));

    let body = match &*load_status {
        FetchStatus::Loading => render_loading(),
        FetchStatus::Error(message) => render_error(message),
        FetchStatus::Idle => match session.page() {
            Page::Home => render_home(
                *show_buttons,
                &on_takeout,
                &on_salad_mix,
                &on_pick_adventure,
            ),
            Page::Takeout => {
                render_takeout((*affirmations).as_deref(), &session, &on_back, &on_next)
            }
            Page::Completed => render_completed(&on_exit, &on_takeout),
        },
    };

    html! {
        <div class="app-container">
            { body }
        </div>
    }
}

fn render_loading() -> Html {
    html! {
        <div class="home-screen">
            <div class="initial-text">
                <p>{ "Loading affirmations…" }</p>
            </div>
        </div>
    }
}

fn render_error(message: &str) -> Html {
    html! {
        <div class="home-screen">
            <div class="initial-text error">
                <p>{ format!("Could not load any affirmations: {message}") }</p>
                <p>{ format!(
                    "Check your connection and that the backend is reachable at {}",
                    config::api_base_url()
                ) }</p>
            </div>
        </div>
    }
}

fn render_home(
    show_buttons: bool,
    on_takeout: &Callback<MouseEvent>,
    on_salad_mix: &Callback<MouseEvent>,
    on_pick_adventure: &Callback<MouseEvent>,
) -> Html {
    html! {
        <div class="home-screen">
            <div class="initial-text">
                <p>{ "May you be peaceful" }</p>
                <p>{ "May you be healthy" }</p>
                <p>{ "May you be happy" }</p>
                <p>{ "May you gift to the world" }</p>
            </div>
            {
                if show_buttons {
                    html! {
                        <div class="buttons-container">
                            <button class="option-button" onclick={on_takeout.clone()}>
                                { "Takeout" }
                            </button>
                            <button class="option-button" onclick={on_salad_mix.clone()}>
                                { "Salad mix" }
                            </button>
                            <button class="option-button" onclick={on_pick_adventure.clone()}>
                                { "Pick your adventure" }
                            </button>
                        </div>
                    }
                } else {
                    html! {}
                }
            }
        </div>
    }
}

fn render_takeout(
    affirmations: Option<&[String]>,
    session: &Session,
    on_back: &Callback<MouseEvent>,
    on_next: &Callback<MouseEvent>,
) -> Html {
    let Some(items) = affirmations else {
        return html! {};
    };
    let Some(progress) = session.progress() else {
        return html! {};
    };
    // An empty order means there is nothing to show yet.
    let Some(text) = progress.current().and_then(|index| items.get(index)) else {
        return html! {};
    };

    html! {
        <div class="takeout-screen">
            <h1 class="takeout-title">{ "Takeout" }</h1>
            <div class="affirmation-container">
                <button class="arrow-button left"
                    onclick={on_back.clone()}
                    disabled={!progress.has_prev()}>
                    { "←" }
                </button>
                <div class="affirmation-text">{ text }</div>
                <button class="arrow-button right"
                    onclick={on_next.clone()}
                    disabled={!progress.has_next()}>
                    { "→" }
                </button>
            </div>
        </div>
    }
}

fn render_completed(on_exit: &Callback<MouseEvent>, on_repeat: &Callback<MouseEvent>) -> Html {
    html! {
        <div class="takeout-screen">
            <h1 class="takeout-title">{ "Takeout" }</h1>
            <div class="completion-screen">
                <p class="completion-message">{ "Have a great day! Bye <3" }</p>
                <div class="action-buttons">
                    <button class="action-button" onclick={on_exit.clone()}>{ "Exit" }</button>
                    <button class="action-button" onclick={on_repeat.clone()}>{ "Repeat" }</button>
                </div>
            </div>
        </div>
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("affirmation endpoint: {}", config::sheet_data_url());
    yew::Renderer::<App>::new().render();
}
