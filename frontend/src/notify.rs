//! Transient notifications.
//!
//! Toasts stack in the top-right corner and dismiss themselves after
//! `TOAST_TTL_MS`.

use leptos::prelude::*;

use crate::error::AppError;

pub const TOAST_TTL_MS: u32 = 3_000;
/// Oldest toasts are dropped beyond this many.
pub const MAX_VISIBLE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

impl ToastKind {
    pub fn alert_class(&self) -> &'static str {
        match self {
            ToastKind::Info => "alert alert-info shadow-lg",
            ToastKind::Success => "alert alert-success shadow-lg",
            ToastKind::Error => "alert alert-error shadow-lg",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub kind: ToastKind,
}

/// Visible toasts, newest last.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToastStack {
    items: Vec<Toast>,
    next_id: u64,
}

impl ToastStack {
    pub fn push(&mut self, title: &str, description: &str, kind: ToastKind) -> u64 {
        self.next_id += 1;
        self.items.push(Toast {
            id: self.next_id,
            title: title.to_string(),
            description: description.to_string(),
            kind,
        });
        if self.items.len() > MAX_VISIBLE {
            let overflow = self.items.len() - MAX_VISIBLE;
            self.items.drain(..overflow);
        }
        self.next_id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|toast| toast.id != id);
    }

    pub fn items(&self) -> &[Toast] {
        &self.items
    }
}

/// Toast context shared by the whole tree.
#[derive(Clone, Copy)]
pub struct Toaster {
    stack: RwSignal<ToastStack>,
}

impl Toaster {
    pub fn new() -> Self {
        Self {
            stack: RwSignal::new(ToastStack::default()),
        }
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.stack.with(|stack| stack.items().to_vec())
    }

    pub fn show(&self, title: &str, description: &str, kind: ToastKind) {
        let id = self.stack.try_update(|stack| stack.push(title, description, kind));
        let Some(id) = id else {
            return;
        };
        let stack = self.stack;
        gloo_timers::callback::Timeout::new(TOAST_TTL_MS, move || {
            stack.try_update(|stack| stack.dismiss(id));
        })
        .forget();
    }

    pub fn success(&self, title: &str, description: &str) {
        self.show(title, description, ToastKind::Success);
    }

    pub fn info(&self, title: &str, description: &str) {
        self.show(title, description, ToastKind::Info);
    }

    pub fn error(&self, title: &str, description: &str) {
        self.show(title, description, ToastKind::Error);
    }

    /// Error toast carrying the error's user-facing message.
    pub fn failure(&self, title: &str, err: &AppError) {
        self.error(title, &err.user_message());
    }

    pub fn dismiss(&self, id: u64) {
        self.stack.update(|stack| stack.dismiss(id));
    }
}

impl Default for Toaster {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_toaster() -> Toaster {
    use_context::<Toaster>().expect("Toaster should be provided")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_dismiss() {
        let mut stack = ToastStack::default();
        let first = stack.push("Saved", "", ToastKind::Success);
        let second = stack.push("Oops", "try again", ToastKind::Error);
        assert_ne!(first, second);

        stack.dismiss(first);

        assert_eq!(stack.items().len(), 1);
        assert_eq!(stack.items()[0].title, "Oops");
    }

    #[test]
    fn test_oldest_dropped_beyond_cap() {
        let mut stack = ToastStack::default();
        for i in 0..MAX_VISIBLE + 2 {
            stack.push(&format!("t{i}"), "", ToastKind::Info);
        }
        let titles: Vec<_> = stack.items().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles.len(), MAX_VISIBLE);
        assert_eq!(titles[0], "t2");
    }
}
