use leptos::prelude::*;
use listaria_shared::{Condition, TITLE_MAX_CHARS};

use super::wizard_state::WizardState;

#[component]
pub fn DetailsStep(state: WizardState) -> impl IntoView {
    let details = move || state.wizard.with(|w| w.draft().details.clone());
    let title_len = move || state.wizard.with(|w| w.draft().details.title.chars().count());

    view! {
        <div class="space-y-4">
            <div class="form-control">
                <label class="label" for="ad-title">
                    <span class="label-text">"Title *"</span>
                    <span class="label-text-alt opacity-60">
                        {move || format!("{}/{}", title_len(), TITLE_MAX_CHARS)}
                    </span>
                </label>
                <input
                    id="ad-title"
                    type="text"
                    maxlength=TITLE_MAX_CHARS.to_string()
                    placeholder="Enter a descriptive title (max 70 characters)"
                    class="input input-bordered w-full"
                    prop:value=move || details().title
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        state.update_details(|d| d.set_title(&value));
                    }
                />
            </div>

            <div class="form-control">
                <label class="label" for="ad-description">
                    <span class="label-text">"Description *"</span>
                </label>
                <textarea
                    id="ad-description"
                    rows="5"
                    placeholder="Describe your item in detail. Include condition, features, and any defects."
                    class="textarea textarea-bordered w-full"
                    prop:value=move || details().description
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        state.update_details(|d| d.description = value);
                    }
                ></textarea>
            </div>

            <div class="grid grid-cols-2 gap-4">
                <div class="form-control">
                    <label class="label" for="ad-price">
                        <span class="label-text">"Price *"</span>
                    </label>
                    <label class="input input-bordered flex items-center gap-2">
                        <span class="opacity-60">"₹"</span>
                        <input
                            id="ad-price"
                            type="text"
                            inputmode="decimal"
                            placeholder="0"
                            class="grow min-w-0"
                            prop:value=move || details().price
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                state.update_details(|d| d.price = value);
                            }
                        />
                    </label>
                </div>

                <div class="form-control">
                    <label class="label" for="ad-condition">
                        <span class="label-text">"Condition"</span>
                    </label>
                    <select
                        id="ad-condition"
                        class="select select-bordered w-full"
                        prop:value=move || details().condition.as_str()
                        on:change=move |ev| {
                            if let Some(condition) = Condition::parse(&event_target_value(&ev)) {
                                state.update_details(|d| d.condition = condition);
                            }
                        }
                    >
                        {Condition::ALL
                            .iter()
                            .map(|c| view! { <option value=c.as_str()>{c.label()}</option> })
                            .collect_view()}
                    </select>
                </div>
            </div>
        </div>
    }
}
