use leptos::prelude::*;

use super::wizard_state::WizardState;
use crate::components::icons::{MapPin, Phone};

#[component]
pub fn ContactStep(state: WizardState) -> impl IntoView {
    let contact = move || state.wizard.with(|w| w.draft().contact.clone());

    view! {
        <div class="space-y-4">
            <div class="form-control">
                <label class="label" for="ad-location">
                    <span class="label-text">"Location *"</span>
                </label>
                <label class="input input-bordered flex items-center gap-2">
                    <MapPin attr:class="h-4 w-4 opacity-60" />
                    <input
                        id="ad-location"
                        type="text"
                        placeholder="Enter your city or area"
                        class="grow"
                        prop:value=move || contact().location
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            state.update_contact(|c| c.location = value);
                        }
                    />
                </label>
            </div>

            <div class="form-control">
                <label class="label" for="ad-phone">
                    <span class="label-text">"Phone Number *"</span>
                </label>
                <label class="input input-bordered flex items-center gap-2">
                    <Phone attr:class="h-4 w-4 opacity-60" />
                    <input
                        id="ad-phone"
                        type="tel"
                        placeholder="Enter your phone number"
                        class="grow"
                        prop:value=move || contact().phone
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            state.update_contact(|c| c.phone = value);
                        }
                    />
                </label>
            </div>

            <label class="label cursor-pointer justify-start gap-2">
                <input
                    type="checkbox"
                    class="checkbox checkbox-primary checkbox-sm"
                    prop:checked=move || contact().show_phone
                    on:change=move |ev| {
                        let checked = event_target_checked(&ev);
                        state.update_contact(|c| c.show_phone = checked);
                    }
                />
                <span class="label-text">"Show my phone number in the ad"</span>
            </label>
        </div>
    }
}
