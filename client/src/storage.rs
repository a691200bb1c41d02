use gloo_storage::{LocalStorage, Storage};
use named_colors_shared::{KeyValueStore, StoreError};
use wasm_bindgen::JsValue;

/// `localStorage`-backed store. Values are stored as raw strings.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct LocalStore;

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        match LocalStorage::raw().get_item(key) {
            Ok(value) => value,
            Err(e) => {
                web_sys::console::warn_2(&JsValue::from_str("could not read local storage"), &e);
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        LocalStorage::raw().set_item(key, value).map_err(|e| {
            web_sys::console::warn_2(
                &JsValue::from_str(&format!("could not write local storage key {key}")),
                &e,
            );
            StoreError::WriteRejected {
                key: key.to_string(),
                reason: e.as_string().unwrap_or_else(|| "setItem failed".to_string()),
            }
        })
    }
}
