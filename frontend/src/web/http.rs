//! Browser `HttpClient` on top of `gloo-net`.

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder};
use js_sys::{Array, Uint8Array};
use wasm_bindgen::JsValue;
use web_sys::{Blob, BlobPropertyBag, FormData};

use crate::error::NetworkError;
use crate::http::{FilePart, HttpBody, HttpClient, HttpMethod, HttpRequest, HttpResponse};

#[derive(Debug, Clone, Copy, Default)]
pub struct GlooHttpClient;

fn js_message(value: JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{value:?}"))
}

/// `multipart/form-data` body; the browser sets the boundary header.
fn form_data(field: &str, files: &[FilePart]) -> Result<FormData, NetworkError> {
    let form = FormData::new().map_err(|e| NetworkError::unreachable(js_message(e)))?;
    for file in files {
        let parts = Array::of1(&Uint8Array::from(file.bytes.as_slice()));
        let options = BlobPropertyBag::new();
        options.set_type(&file.mime);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
            .map_err(|e| NetworkError::unreachable(js_message(e)))?;
        form.append_with_blob_and_filename(field, &blob, &file.name)
            .map_err(|e| NetworkError::unreachable(js_message(e)))?;
    }
    Ok(form)
}

fn builder(method: HttpMethod, url: &str) -> RequestBuilder {
    match method {
        HttpMethod::Get => Request::get(url),
        HttpMethod::Post => Request::post(url),
        HttpMethod::Put => Request::put(url),
        HttpMethod::Delete => Request::delete(url),
    }
}

#[async_trait(?Send)]
impl HttpClient for GlooHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, NetworkError> {
        let mut builder = builder(req.method, &req.url);
        for (key, value) in &req.headers {
            builder = builder.header(key, value);
        }
        if !req.query.is_empty() {
            builder = builder.query(req.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }

        let request = match req.body {
            None => builder.build(),
            Some(HttpBody::Json(json)) => builder.body(json),
            Some(HttpBody::Multipart { field, files }) => builder.body(form_data(&field, &files)?),
        }
        .map_err(|e| NetworkError::unreachable(e.to_string()))?;

        let res = request
            .send()
            .await
            .map_err(|e| NetworkError::unreachable(e.to_string()))?;
        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| NetworkError::malformed(Some(status), e.to_string()))?;
        Ok(HttpResponse { status, body })
    }
}
