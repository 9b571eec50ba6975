//! Profile page: identity, password, avatar, and the authoring tools.

use leptos::prelude::*;

use crate::state::auth::AuthState;
use crate::state::ui::UiState;
use crate::util::auth::require_session;
use crate::util::dark_mode;

#[component]
pub fn ProfilePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let ui = expect_context::<RwSignal<UiState>>();

    require_session(auth);

    let display_name = RwSignal::new(
        auth.get_untracked()
            .user
            .map(|u| u.display_name)
            .unwrap_or_default(),
    );
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_save_profile = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let name_value = display_name.get().trim().to_owned();
        if name_value.is_empty() {
            info.set("Display name cannot be empty.".to_owned());
            return;
        }
        busy.set(true);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::update_profile(&name_value, None).await {
                Ok(user) => {
                    auth.update(|a| a.user = Some(user));
                    info.set("Profile saved.".to_owned());
                }
                Err(e) => info.set(format!("Save failed: {e}")),
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (name_value, auth);
    };

    let on_avatar_change = move |ev: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen::JsCast;
            use wasm_bindgen::closure::Closure;

            let Some(input) = ev
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            else {
                return;
            };
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            let Ok(reader) = web_sys::FileReader::new() else {
                return;
            };

            let reader_for_load = reader.clone();
            let onloadend = Closure::once(move |_: web_sys::Event| {
                let Some(data_url) = reader_for_load.result().ok().and_then(|v| v.as_string())
                else {
                    return;
                };
                leptos::task::spawn_local(async move {
                    match crate::net::api::upload_avatar(&data_url).await {
                        Ok(user) => {
                            auth.update(|a| a.user = Some(user));
                            info.set("Avatar updated.".to_owned());
                        }
                        Err(e) => info.set(format!("Avatar upload failed: {e}")),
                    }
                });
            });
            reader.set_onloadend(Some(onloadend.as_ref().unchecked_ref()));
            onloadend.forget();
            let _ = reader.read_as_data_url(&file);
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (ev, auth, info);
    };

    let on_logout = move |_| {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            crate::net::api::logout().await;
            auth.update(|a| a.user = None);
            if let Some(window) = web_sys::window() {
                let _ = window.location().set_href("/login");
            }
        });
    };

    let on_toggle_dark = move |_| {
        ui.update(|u| u.dark_mode = dark_mode::toggle(u.dark_mode));
    };

    view! {
        <div class="profile-page">
            <header class="profile-header">
                <a href="/">"← Lobby"</a>
                <h1>"Profile"</h1>
                <button class="profile-header__dark" on:click=on_toggle_dark>
                    {move || if ui.get().dark_mode { "Light mode" } else { "Dark mode" }}
                </button>
                <button class="profile-header__logout" on:click=on_logout>"Log out"</button>
            </header>

            <Show when=move || !info.get().is_empty()>
                <p class="profile-message">{move || info.get()}</p>
            </Show>

            <section class="profile-identity">
                <h2>"Identity"</h2>
                {move || {
                    auth.get().user.and_then(|u| u.avatar_url).map(|url| view! {
                        <img class="profile-avatar" src=url alt="avatar"/>
                    })
                }}
                <form class="profile-form" on:submit=on_save_profile>
                    <input
                        class="profile-input"
                        type="text"
                        placeholder="Display name"
                        prop:value=move || display_name.get()
                        on:input=move |ev| display_name.set(event_target_value(&ev))
                    />
                    <button type="submit" disabled=move || busy.get()>"Save"</button>
                </form>
                <label class="profile-avatar-upload">
                    "Avatar"
                    <input type="file" accept="image/*" on:change=on_avatar_change/>
                </label>
            </section>

            <PasswordSection/>

            <Show when=move || auth.get().can_author()>
                <AuthoringSection/>
            </Show>
        </div>
    }
}

/// Change-password form.
#[component]
fn PasswordSection() -> impl IntoView {
    let current = RwSignal::new(String::new());
    let next = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        if next.get() != confirm.get() {
            info.set("Passwords do not match.".to_owned());
            return;
        }
        if next.get().len() < 8 {
            info.set("Use at least 8 characters.".to_owned());
            return;
        }
        busy.set(true);
        let current_value = current.get();
        let next_value = next.get();

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::change_password(&current_value, &next_value).await {
                Ok(()) => {
                    info.set("Password changed.".to_owned());
                    current.set(String::new());
                    next.set(String::new());
                    confirm.set(String::new());
                }
                Err(e) => info.set(format!("Change failed: {e}")),
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (current_value, next_value);
    };

    view! {
        <section class="profile-password">
            <h2>"Password"</h2>
            <form class="profile-form" on:submit=on_submit>
                <input
                    class="profile-input"
                    type="password"
                    placeholder="Current password"
                    prop:value=move || current.get()
                    on:input=move |ev| current.set(event_target_value(&ev))
                />
                <input
                    class="profile-input"
                    type="password"
                    placeholder="New password"
                    prop:value=move || next.get()
                    on:input=move |ev| next.set(event_target_value(&ev))
                />
                <input
                    class="profile-input"
                    type="password"
                    placeholder="Repeat new password"
                    prop:value=move || confirm.get()
                    on:input=move |ev| confirm.set(event_target_value(&ev))
                />
                <button type="submit" disabled=move || busy.get()>"Change password"</button>
            </form>
            <Show when=move || !info.get().is_empty()>
                <p class="profile-message">{move || info.get()}</p>
            </Show>
        </section>
    }
}

/// Admin-only authoring tools: AI question drafts per topic.
#[component]
fn AuthoringSection() -> impl IntoView {
    let topics = RwSignal::new(Vec::<crate::net::types::Topic>::new());
    let drafts = RwSignal::new(Vec::<crate::net::types::QuestionDraft>::new());
    let topic_id = RwSignal::new(None::<i64>);
    let count = RwSignal::new(5u32);
    let prompt = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match crate::net::api::list_topics().await {
            Ok(list) => topics.set(list),
            Err(e) => info.set(format!("Topics unavailable: {e}")),
        }
    });

    let on_generate = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let Some(topic) = topic_id.get() else {
            info.set("Pick a topic first.".to_owned());
            return;
        };
        busy.set(true);
        info.set("Generating...".to_owned());
        let count_value = count.get();
        let prompt_value = prompt.get();

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::generate_questions(topic, count_value, &prompt_value).await {
                Ok(generated) => {
                    info.set(format!("{} drafts ready.", generated.len()));
                    drafts.set(generated);
                }
                Err(e) => info.set(format!("Generation failed: {e}")),
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (topic, count_value, prompt_value);
    };

    view! {
        <section class="profile-authoring">
            <h2>"Question Authoring"</h2>
            <form class="profile-form" on:submit=on_generate>
                <select on:change=move |ev| topic_id.set(event_target_value(&ev).parse().ok())>
                    <option value="">"Pick a topic"</option>
                    <For each=move || topics.get() key=|t| t.id let:topic>
                        <option value=topic.id.to_string()>{topic.name.clone()}</option>
                    </For>
                </select>
                <label class="dialog-field">
                    "Drafts"
                    <input
                        type="number"
                        min="1"
                        max="20"
                        prop:value=move || count.get().to_string()
                        on:input=move |ev| {
                            if let Ok(n) = event_target_value(&ev).parse() {
                                count.set(n);
                            }
                        }
                    />
                </label>
                <input
                    class="profile-input"
                    type="text"
                    placeholder="Optional prompt (angle, difficulty, era...)"
                    prop:value=move || prompt.get()
                    on:input=move |ev| prompt.set(event_target_value(&ev))
                />
                <button type="submit" disabled=move || busy.get()>"Generate"</button>
            </form>
            <Show when=move || !info.get().is_empty()>
                <p class="profile-message">{move || info.get()}</p>
            </Show>
            <ol class="profile-drafts">
                <For
                    each=move || {
                        drafts.get().into_iter().enumerate().collect::<Vec<_>>()
                    }
                    key=|(i, _)| *i
                    let:entry
                >
                    {
                        let (_, draft) = entry;
                        let correct = usize::try_from(draft.correct_index).unwrap_or(0);
                        view! {
                            <li class="profile-drafts__item">
                                <p>{draft.text.clone()}</p>
                                <ul>
                                    {draft
                                        .options
                                        .iter()
                                        .enumerate()
                                        .map(|(i, option)| {
                                            view! {
                                                <li class:profile-drafts__correct=i == correct>
                                                    {option.clone()}
                                                </li>
                                            }
                                        })
                                        .collect::<Vec<_>>()}
                                </ul>
                            </li>
                        }
                    }
                </For>
            </ol>
        </section>
    }
}
