//! The four-step "post an ad" form.
//!
//! Shared by the `/sell` page and the sell modal. The form owns one
//! `WizardState`; unmounting it cancels pending photo work and releases
//! every preview URL.

mod category_step;
mod contact_step;
mod details_step;
mod photos_step;
mod wizard_state;

use leptos::prelude::*;
use listaria_shared::Ad;

use crate::components::icons::{ChevronLeft, ChevronRight};
use crate::notify::use_toaster;
use crate::services::use_services;
use crate::wizard::WizardStep;

use category_step::CategoryStep;
use contact_step::ContactStep;
use details_step::DetailsStep;
use photos_step::PhotosStep;
use wizard_state::WizardState;

#[component]
fn StepIndicator(state: WizardState) -> impl IntoView {
    view! {
        <div class="flex items-center justify-center gap-2 mb-6">
            {WizardStep::INPUT
                .iter()
                .copied()
                .map(|step| {
                    let reached = move || state.step().index() >= step.index();
                    let earlier = move || step.index() < state.step().index();
                    view! {
                        <button
                            type="button"
                            class="h-2 rounded-full"
                            class=("w-8", move || state.step() == step)
                            class=("w-2", move || state.step() != step)
                            class=("bg-primary", reached)
                            class=("bg-base-300", move || !reached())
                            aria-label=step.title()
                            disabled=move || !earlier()
                            on:click=move |_| state.jump_back_to(step)
                        ></button>
                    }
                })
                .collect_view()}
        </div>
    }
}

#[component]
pub fn SellForm(
    #[prop(into)] on_published: Callback<Ad>,
    /// Rendered as a heading above the steps when set.
    #[prop(optional)]
    show_title: bool,
) -> impl IntoView {
    let state = WizardState::new(use_services(), use_toaster());
    on_cleanup(move || state.dispose());

    let step = move || state.step();
    let can_continue = move || state.wizard.with(|w| w.draft().can_leave(w.step()));
    let busy = move || state.publishing.get() || state.is_processing();

    let on_submit = move |_| {
        state.submit(move |ad| on_published.run(ad));
    };

    view! {
        <div>
            <Show when=move || show_title>
                <h2 class="text-xl font-semibold mb-2">{move || step().title()}</h2>
            </Show>
            <StepIndicator state=state />

            <Show when=move || state.error.with(Option::is_some)>
                <div role="alert" class="alert alert-error text-sm py-2 mb-4">
                    <span>{move || state.error.get().unwrap_or_default()}</span>
                </div>
            </Show>

            {move || match step() {
                WizardStep::CategorySelect => view! { <CategoryStep state=state /> }.into_any(),
                WizardStep::Details => view! { <DetailsStep state=state /> }.into_any(),
                WizardStep::Photos => view! { <PhotosStep state=state /> }.into_any(),
                WizardStep::LocationContact | WizardStep::Submitted => {
                    view! { <ContactStep state=state /> }.into_any()
                }
            }}

            <div class="flex justify-between pt-6">
                <Show when=move || step() != WizardStep::CategorySelect fallback=|| view! { <span></span> }>
                    <button type="button" class="btn btn-outline gap-1" on:click=move |_| state.back()>
                        <ChevronLeft attr:class="h-4 w-4" />
                        "Back"
                    </button>
                </Show>
                <Show
                    when=move || step() == WizardStep::LocationContact
                    fallback=move || view! {
                        <button
                            type="button"
                            class="btn btn-primary gap-1"
                            disabled=move || !can_continue() || busy()
                            on:click=move |_| state.advance()
                        >
                            "Continue"
                            <ChevronRight attr:class="h-4 w-4" />
                        </button>
                    }
                >
                    <button
                        type="button"
                        class="btn btn-primary"
                        disabled=move || !can_continue() || busy()
                        on:click=on_submit
                    >
                        {move || if state.publishing.get() {
                            view! { <span class="loading loading-spinner"></span> "Publishing..." }.into_any()
                        } else {
                            "Publish Ad".into_any()
                        }}
                    </button>
                </Show>
            </div>
        </div>
    }
}
