use leptos::prelude::*;

use crate::model::InterestList;

/// Tag box: Enter or comma turns the typed text into a chip.
#[component]
pub fn InterestEditor(interests: RwSignal<InterestList>) -> impl IntoView {
    let (pending, set_pending) = signal(String::new());

    let commit = move || {
        let text = pending.get_untracked();
        let mut added = false;
        interests.update(|list| added = list.add(&text));
        if added {
            set_pending.set(String::new());
        }
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        let key = ev.key();
        if key == "Enter" || key == "," {
            ev.prevent_default();
            commit();
        }
    };

    view! {
        <div class="interest-editor">
            <ul class="tag-list">
                {move || {
                    interests
                        .get()
                        .iter()
                        .cloned()
                        .enumerate()
                        .map(|(index, tag)| {
                            view! {
                                <li class="tag">
                                    <span class="tag-label">{tag.clone()}</span>
                                    <button
                                        type="button"
                                        class="tag-remove"
                                        aria-label=format!("Remove {}", tag)
                                        on:click=move |_| {
                                            interests.update(|list| {
                                                list.remove(index);
                                            });
                                        }
                                    >
                                        "\u{2715}"
                                    </button>
                                </li>
                            }
                        })
                        .collect_view()
                }}
            </ul>
            <input
                class="input tag-input"
                type="text"
                placeholder="Type an interest and press Enter"
                prop:value=move || pending.get()
                on:input=move |ev| set_pending.set(event_target_value(&ev))
                on:keydown=on_keydown
            />
        </div>
    }
}
