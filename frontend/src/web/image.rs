//! Canvas-backed `ImageCodec`.
//!
//! Decodes through an `<img>`, rasterizes onto an off-screen canvas at the
//! fitted size and re-encodes with `canvas.toBlob`.

use async_trait::async_trait;
use js_sys::{Array, Function, Promise, Uint8Array};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Blob, BlobPropertyBag, CanvasRenderingContext2d, File, HtmlCanvasElement, HtmlImageElement,
    Url,
};

use crate::error::UploadError;
use crate::wizard::image::{
    ImageCodec, ImageSource, JPEG_QUALITY, MAX_DIMENSION, NormalizedImage, OUTPUT_MIME,
    fit_within, jpeg_name,
};

impl ImageSource for File {
    fn name(&self) -> String {
        File::name(self)
    }

    fn mime_type(&self) -> String {
        self.type_()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CanvasCodec;

fn js_reason(value: JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| "unknown browser error".to_string())
}

async fn decode(file: &File) -> Result<HtmlImageElement, JsValue> {
    let url = Url::create_object_url_with_blob(file)?;
    let img = HtmlImageElement::new()?;
    img.set_src(&url);
    let decoded = JsFuture::from(img.decode()).await;
    Url::revoke_object_url(&url)?;
    decoded.map(|_| img)
}

fn rasterize(img: &HtmlImageElement, width: u32, height: u32) -> Result<HtmlCanvasElement, JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
    canvas.set_width(width);
    canvas.set_height(height);
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into()?;
    ctx.draw_image_with_html_image_element_and_dw_and_dh(
        img,
        0.0,
        0.0,
        f64::from(width),
        f64::from(height),
    )?;
    Ok(canvas)
}

/// `canvas.toBlob` as a future.
async fn encode(canvas: &HtmlCanvasElement) -> Result<Vec<u8>, JsValue> {
    let promise = Promise::new(&mut |resolve: Function, reject: Function| {
        let on_blob = Closure::once_into_js(move |blob: JsValue| {
            let _ = resolve.call1(&JsValue::NULL, &blob);
        });
        if let Err(err) = canvas.to_blob_with_type_and_encoder_options(
            on_blob.unchecked_ref(),
            OUTPUT_MIME,
            &JsValue::from_f64(JPEG_QUALITY),
        ) {
            let _ = reject.call1(&JsValue::NULL, &err);
        }
    });
    let blob: Blob = JsFuture::from(promise)
        .await?
        .dyn_into()
        .map_err(|_| JsValue::from_str("encoder produced no image"))?;
    let buffer = JsFuture::from(blob.array_buffer()).await?;
    Ok(Uint8Array::new(&buffer).to_vec())
}

#[async_trait(?Send)]
impl ImageCodec for CanvasCodec {
    type Source = File;

    async fn normalize(&self, source: &File) -> Result<NormalizedImage, UploadError> {
        let name = File::name(source);
        let fail = |e: JsValue| UploadError::new(name.clone(), js_reason(e));

        let img = decode(source).await.map_err(fail)?;
        let (width, height) = fit_within(img.natural_width(), img.natural_height(), MAX_DIMENSION);
        if width == 0 || height == 0 {
            return Err(UploadError::new(name.clone(), "image has no pixels"));
        }
        let canvas = rasterize(&img, width, height).map_err(fail)?;
        let bytes = encode(&canvas).await.map_err(fail)?;

        Ok(NormalizedImage {
            name: jpeg_name(&name),
            width,
            height,
            bytes,
        })
    }

    fn preview_url(&self, image: &NormalizedImage) -> Result<String, UploadError> {
        let parts = Array::of1(&Uint8Array::from(image.bytes.as_slice()));
        let options = BlobPropertyBag::new();
        options.set_type(OUTPUT_MIME);
        Blob::new_with_u8_array_sequence_and_options(&parts, &options)
            .and_then(|blob| Url::create_object_url_with_blob(&blob))
            .map_err(|e| UploadError::new(image.name.clone(), js_reason(e)))
    }

    fn release_preview(&self, url: &str) {
        let _ = Url::revoke_object_url(url);
    }
}
