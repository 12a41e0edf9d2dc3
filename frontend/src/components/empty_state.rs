use leptos::prelude::*;

pub const DEFAULT_EMPTY_TITLE: &str = "No Advertisement Found";
pub const DEFAULT_EMPTY_DESCRIPTION: &str =
    "We're sorry what you were looking for, please try another way";

#[component]
pub fn EmptyState(
    #[prop(optional, into)] title: Option<String>,
    #[prop(optional, into)] description: Option<String>,
    #[prop(optional)] children: Option<Children>,
) -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center py-16 px-4">
            <div class="relative w-48 h-48 mb-6">
                <svg viewBox="0 0 200 200" class="w-full h-full">
                    <circle cx="100" cy="100" r="80" fill="#f3f4f6" />
                    <circle cx="70" cy="90" r="30" fill="#B078C4" opacity="0.2" />
                    <path d="M60 110 Q 70 140, 90 130 T 120 120" stroke="#B078C4" stroke-width="3" fill="none" />
                    <rect x="80" y="60" width="60" height="80" rx="4" fill="white" stroke="#e5e7eb" stroke-width="2" />
                    <line x1="90" y1="80" x2="130" y2="80" stroke="#e5e7eb" stroke-width="2" />
                    <line x1="90" y1="95" x2="120" y2="95" stroke="#e5e7eb" stroke-width="2" />
                    <line x1="90" y1="110" x2="110" y2="110" stroke="#e5e7eb" stroke-width="2" />
                    <circle cx="145" cy="50" r="15" fill="#B078C4" />
                    <text x="145" y="55" text-anchor="middle" fill="white" font-size="14">"?"</text>
                </svg>
            </div>
            <h3 class="text-2xl font-semibold text-primary mb-2">
                {title.unwrap_or_else(|| DEFAULT_EMPTY_TITLE.to_string())}
            </h3>
            <p class="text-base-content/60 text-center max-w-md">
                {description.unwrap_or_else(|| DEFAULT_EMPTY_DESCRIPTION.to_string())}
            </p>
            {children.map(|children| view! { <div class="mt-6">{children()}</div> })}
        </div>
    }
}
