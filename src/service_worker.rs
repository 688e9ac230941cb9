//! Offline-caching worker control.
//!
//! The shell opts out of offline caching: any worker left behind by a
//! previous deployment is unregistered at startup. A no-op when none is
//! registered, and off the web entirely.

/// Unregister the page's service worker, if one exists.
#[cfg(target_arch = "wasm32")]
pub fn unregister() {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    let Some(window) = web_sys::window() else {
        return;
    };
    let container = window.navigator().service_worker();

    wasm_bindgen_futures::spawn_local(async move {
        // Resolves to undefined when nothing is registered
        let Ok(value) = JsFuture::from(container.get_registration()).await else {
            return;
        };
        if value.is_undefined() || value.is_null() {
            return;
        }
        let registration: web_sys::ServiceWorkerRegistration = value.unchecked_into();
        if JsFuture::from(registration.unregister()).await.is_ok() {
            log::info!("service worker unregistered");
        }
    });
}

#[cfg(not(target_arch = "wasm32"))]
pub fn unregister() {
    // Nothing to unregister off the web
}
