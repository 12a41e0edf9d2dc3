//! Google Identity Services button.
//!
//! `index.html` loads `https://accounts.google.com/gsi/client`, which defines
//! `window.google.accounts.id`. The button hands back a Google ID token that
//! the identity service exchanges through `accounts:signInWithIdp`.

use js_sys::{Function, Object, Reflect};
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

fn get(target: &JsValue, key: &str) -> Option<JsValue> {
    Reflect::get(target, &JsValue::from_str(key))
        .ok()
        .filter(|value| !value.is_undefined() && !value.is_null())
}

fn method(target: &JsValue, key: &str) -> Option<Function> {
    get(target, key)?.dyn_into::<Function>().ok()
}

/// `window.google.accounts.id`, once the script has loaded.
fn gis() -> Option<JsValue> {
    let window: JsValue = web_sys::window()?.into();
    let google = get(&window, "google")?;
    let accounts = get(&google, "accounts")?;
    get(&accounts, "id")
}

fn object(entries: &[(&str, JsValue)]) -> Result<Object, JsValue> {
    let obj = Object::new();
    for (key, value) in entries {
        Reflect::set(&obj, &JsValue::from_str(key), value)?;
    }
    Ok(obj)
}

/// Renders the button into `container` and calls `on_credential` with each
/// ID token the user grants.
///
/// Returns `false` when the script is unavailable or rejects the call.
pub fn render_button<F>(container: &web_sys::HtmlElement, client_id: &str, on_credential: F) -> bool
where
    F: Fn(String) + 'static,
{
    let Some(id) = gis() else {
        debug!("google identity script not loaded");
        return false;
    };
    let (Some(initialize), Some(render)) = (method(&id, "initialize"), method(&id, "renderButton"))
    else {
        return false;
    };

    let callback = Closure::<dyn Fn(JsValue)>::new(move |response: JsValue| {
        match get(&response, "credential").and_then(|c| c.as_string()) {
            Some(token) => on_credential(token),
            None => warn!("google sign-in returned no credential"),
        }
    });

    let rendered = object(&[
        ("client_id", JsValue::from_str(client_id)),
        ("callback", callback.as_ref().clone()),
    ])
    .and_then(|config| initialize.call1(&id, &config))
    .and_then(|_| {
        object(&[
            ("theme", JsValue::from_str("outline")),
            ("size", JsValue::from_str("large")),
            ("text", JsValue::from_str("continue_with")),
            ("width", JsValue::from_f64(320.0)),
        ])
    })
    .and_then(|options| render.call2(&id, container, &options));

    // The script keeps calling back for the lifetime of the page.
    callback.forget();

    match rendered {
        Ok(_) => true,
        Err(err) => {
            warn!(error = ?err, "google sign-in button failed to render");
            false
        }
    }
}
