use leptos::prelude::*;

use crate::components::icons::{Mail, Phone};

const QUICK_LINKS: [(&str, &str); 5] = [
    ("About us", "/about"),
    ("Contact us", "/contact"),
    ("Subscription", "/subscription"),
    ("Our Blog", "/blog"),
    ("FAQs", "/faq"),
];

const SOCIAL_LINKS: [(&str, &str); 4] = [
    ("Facebook", "https://facebook.com"),
    ("Instagram", "https://instagram.com"),
    ("X", "https://x.com"),
    ("LinkedIn", "https://linkedin.com"),
];

#[component]
pub fn Logo() -> impl IntoView {
    view! {
        <svg width="32" height="32" viewBox="0 0 32 32" fill="none">
            <path d="M8 8C8 5.79086 9.79086 4 12 4H20C22.2091 4 24 5.79086 24 8V24C24 26.2091 22.2091 28 20 28H12C9.79086 28 8 26.2091 8 24V8Z" fill="#B078C4" />
            <path d="M12 12H20M12 16H18M12 20H16" stroke="white" stroke-width="2" stroke-linecap="round" />
        </svg>
    }
}

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer class="bg-neutral text-neutral-content">
            <div class="max-w-7xl mx-auto px-4 md:px-6 lg:px-8 py-12">
                <div class="grid grid-cols-1 md:grid-cols-3 gap-8">
                    <div>
                        <div class="text-2xl font-bold mb-4 flex items-center gap-2">
                            <Logo />
                            "Listaria"
                        </div>
                        <div class="flex flex-wrap gap-3 mt-6">
                            {SOCIAL_LINKS
                                .iter()
                                .map(|(label, href)| view! {
                                    <a
                                        href=*href
                                        target="_blank"
                                        rel="noopener noreferrer"
                                        class="btn btn-sm btn-circle btn-ghost"
                                        aria-label=*label
                                    >
                                        {label.chars().next().unwrap_or('?')}
                                    </a>
                                })
                                .collect_view()}
                        </div>
                    </div>

                    <div>
                        <h3 class="text-lg font-semibold mb-4">"Quick Links"</h3>
                        <ul class="space-y-3">
                            {QUICK_LINKS
                                .iter()
                                .map(|(label, href)| view! {
                                    <li>
                                        <a href=*href class="opacity-70 hover:text-primary hover:opacity-100">
                                            {*label}
                                        </a>
                                    </li>
                                })
                                .collect_view()}
                        </ul>
                    </div>

                    <div>
                        <h3 class="text-lg font-semibold mb-4">"Contact Us"</h3>
                        <ul class="space-y-3 opacity-70">
                            <li class="flex items-center gap-2">
                                <Mail attr:class="h-4 w-4" />
                                "listariaofficial@gmail.com"
                            </li>
                            <li class="flex items-center gap-2">
                                <Phone attr:class="h-4 w-4" />
                                "+91"
                            </li>
                        </ul>
                    </div>
                </div>

                <div class="border-t border-neutral-content/20 mt-8 pt-8 flex flex-col md:flex-row justify-between gap-4 text-sm opacity-70">
                    <p>"© 2026 Listaria. All rights reserved."</p>
                    <div class="flex gap-4">
                        <a href="/privacy" class="hover:text-primary">"Privacy Policy"</a>
                        <a href="/terms" class="hover:text-primary">"Terms & Conditions"</a>
                        <a href="/refund" class="hover:text-primary">"Refund Policy"</a>
                    </div>
                </div>
            </div>
        </footer>
    }
}
