//! バックエンドAPIクライアント
//!
//! fetch API の薄いラッパ。エンドポイントごとに1関数で、
//! レスポンスは必ず明示的な型へデコードする

pub mod images;
pub mod vote;

use picvote_common::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

fn js_error(context: &str, err: JsValue) -> Error {
    Error::Network(format!("{}: {:?}", context, err))
}

async fn send(request: &Request) -> Result<JsValue> {
    let window = web_sys::window().ok_or_else(|| Error::Network("no window".to_string()))?;

    let resp_value = JsFuture::from(window.fetch_with_request(request))
        .await
        .map_err(|e| js_error("fetch", e))?;
    let resp: Response = resp_value.dyn_into().map_err(|e| js_error("response", e))?;

    if !resp.ok() {
        return Err(Error::Api(format!("HTTP {}", resp.status())));
    }

    JsFuture::from(resp.json().map_err(|e| js_error("json", e))?)
        .await
        .map_err(|e| js_error("json", e))
}

/// GETで呼び、JSONレスポンスをデコードする
pub(crate) async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T> {
    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);

    let request = Request::new_with_str_and_init(url, &opts).map_err(|e| js_error("request", e))?;

    let json = send(&request).await?;
    serde_wasm_bindgen::from_value(json).map_err(|e| Error::Api(format!("decode: {}", e)))
}

/// POST + JSONボディで呼び、JSONレスポンスをデコードする
pub(crate) async fn post_json<B: Serialize, T: DeserializeOwned>(url: &str, body: &B) -> Result<T> {
    let payload = serde_json::to_string(body)?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&JsValue::from_str(&payload));

    let request = Request::new_with_str_and_init(url, &opts).map_err(|e| js_error("request", e))?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(|e| js_error("headers", e))?;

    let json = send(&request).await?;
    serde_wasm_bindgen::from_value(json).map_err(|e| Error::Api(format!("decode: {}", e)))
}
