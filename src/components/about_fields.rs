//! Editable About fields shared by the About page and the dashboard card.

use js_sys::{ArrayBuffer, Uint8Array};
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};

use crate::components::field_error::FieldError;
use crate::form::{FormHandle, UpdateAboutOperation};
use crate::model::{ProfileDraft, ProfileImage, GENDER_OPTIONS};

#[component]
pub fn AboutFields(
    draft: RwSignal<ProfileDraft>,
    form: FormHandle<UpdateAboutOperation>,
    /// Offer the photo picker.
    #[prop(default = true)]
    with_photo: bool,
) -> impl IntoView {
    let state = form.state();

    // Validate on every change so errors track the input.
    let bind = move |apply: fn(&mut ProfileDraft, String)| {
        move |ev: web_sys::Event| {
            let value = event_target_value(&ev);
            draft.update(|d| apply(d, value));
            draft.with_untracked(|d| {
                let _ = form.check(d);
            });
        }
    };

    view! {
        <div class="about-fields">
            {with_photo.then(|| view! { <PhotoPicker draft=draft /> })}

            <div class="form-group">
                <label for="about-name">"Display name"</label>
                <input
                    id="about-name"
                    class="input"
                    type="text"
                    placeholder="Enter name"
                    prop:value=move || draft.with(|d| d.name.clone())
                    on:input=bind(|d, v| d.name = v)
                />
                <FieldError state=state field="name" />
            </div>

            <div class="form-group">
                <label for="about-gender">"Gender"</label>
                <select
                    id="about-gender"
                    class="input"
                    prop:value=move || draft.with(|d| d.gender.clone())
                    on:change=bind(|d, v| d.gender = v)
                >
                    <option value="">"Select Gender"</option>
                    {GENDER_OPTIONS
                        .iter()
                        .map(|g| view! { <option value=*g>{*g}</option> })
                        .collect_view()}
                </select>
                <FieldError state=state field="gender" />
            </div>

            <div class="form-group">
                <label for="about-birthday">"Birthday"</label>
                <input
                    id="about-birthday"
                    class="input"
                    type="date"
                    prop:value=move || draft.with(|d| d.birthday.clone())
                    on:input=bind(|d, v| d.birthday = v)
                />
                <FieldError state=state field="birthday" />
            </div>

            <div class="form-group">
                <label for="about-height">"Height (cm)"</label>
                <input
                    id="about-height"
                    class="input"
                    type="text"
                    inputmode="decimal"
                    placeholder="Add height"
                    prop:value=move || draft.with(|d| d.height.clone())
                    on:input=bind(|d, v| d.height = v)
                />
                <FieldError state=state field="height" />
            </div>

            <div class="form-group">
                <label for="about-weight">"Weight (kg)"</label>
                <input
                    id="about-weight"
                    class="input"
                    type="text"
                    inputmode="decimal"
                    placeholder="Add weight"
                    prop:value=move || draft.with(|d| d.weight.clone())
                    on:input=bind(|d, v| d.weight = v)
                />
                <FieldError state=state field="weight" />
            </div>
        </div>
    }
}

#[component]
fn PhotoPicker(draft: RwSignal<ProfileDraft>) -> impl IntoView {
    let file_input_id = "about-photo-input";
    let (preview, set_preview) = signal::<Option<String>>(None);
    let (is_loading, set_is_loading) = signal(false);

    let on_input_change = move |ev: web_sys::Event| {
        let input: web_sys::HtmlInputElement = event_target(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        set_is_loading.set(true);
        spawn_local(async move {
            match read_image(file).await {
                Ok(image) => {
                    let _ = set_preview.try_set(Some(image.data_url()));
                    let _ = draft.try_update(|d| d.profile_image = Some(image));
                }
                Err(e) => {
                    tracing::error!("Failed to read photo: {}", e);
                }
            }
            let _ = set_is_loading.try_set(false);
        });
    };

    let remove = move |_| {
        set_preview.set(None);
        draft.update(|d| d.profile_image = None);
    };

    view! {
        <div class="photo-picker">
            {move || match preview.get() {
                Some(url) => view! {
                    <div class="photo-preview">
                        <img src=url alt="Profile photo preview" class="photo-thumb" />
                        <button type="button" class="btn btn-delete" on:click=remove>
                            "Remove"
                        </button>
                    </div>
                }
                    .into_any(),
                None => view! {
                    <label for=file_input_id class="btn btn-secondary photo-add">
                        {move || if is_loading.get() { "Loading image..." } else { "+ Add image" }}
                    </label>
                }
                    .into_any(),
            }}
            <input
                type="file"
                id=file_input_id
                accept="image/*"
                style="display: none"
                on:change=on_input_change
            />
        </div>
    }
}

async fn read_image(file: web_sys::File) -> Result<ProfileImage, String> {
    let buffer: ArrayBuffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("Failed to read file: {:?}", e))?
        .dyn_into()
        .map_err(|_| "Failed to convert to ArrayBuffer".to_string())?;

    Ok(ProfileImage {
        file_name: file.name(),
        mime_type: file.type_(),
        bytes: Uint8Array::new(&buffer).to_vec(),
    })
}
