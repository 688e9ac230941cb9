//! Capability boundary to the compiled front-end application.
//!
//! The shell knows nothing about the app's rendering or todo logic. It can do
//! exactly two things with it: construct the single instance with optional
//! restored flags, and register one subscriber on its save-state channel.

use crate::bootstrap::BootError;
use crate::state::PersistedState;

/// Constructor side of the boundary.
pub trait Application {
    type Instance: AppInstance;

    /// Build the one instance per page load, attached to the document element
    /// named by `mount_id`. `flags` is the restored state, or `None` for a
    /// fresh start. A document without the mount element is an error, never a
    /// silent no-op.
    fn init(mount_id: &str, flags: Option<PersistedState>) -> Result<Self::Instance, BootError>;
}

/// A running instance.
pub trait AppInstance {
    /// Register the single save-state subscriber. The handler is invoked once
    /// per emitted state, in emission order, never overlapping itself.
    fn on_save_state(&self, handler: Box<dyn FnMut(&PersistedState)>);
}

#[cfg(target_arch = "wasm32")]
pub use web::ElmApp;

#[cfg(target_arch = "wasm32")]
mod web {
    use super::*;
    use wasm_bindgen::prelude::*;

    // JS bindings to the compiled app global. Flags and emissions cross the
    // boundary as JSON text so the Rust side only ever sees PersistedState.
    #[wasm_bindgen(inline_js = "
        export function init_app(node, flagsJson) {
            return Elm.Main.init({
                node: node,
                flags: flagsJson == null ? null : JSON.parse(flagsJson)
            });
        }

        export function subscribe_save(app, handler) {
            app.ports.setStorage.subscribe(state => handler(JSON.stringify(state)));
        }
    ")]
    extern "C" {
        fn init_app(node: &web_sys::Element, flags_json: Option<String>) -> JsValue;
        fn subscribe_save(app: &JsValue, handler: &JsValue);
    }

    /// The compiled front-end, reached through its page global.
    pub struct ElmApp {
        handle: JsValue,
    }

    impl Application for ElmApp {
        type Instance = ElmApp;

        fn init(mount_id: &str, flags: Option<PersistedState>) -> Result<ElmApp, BootError> {
            let node = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id(mount_id))
                .ok_or_else(|| BootError::MountMissing(mount_id.to_string()))?;

            let flags_json = match flags {
                Some(state) => Some(state.to_json().map_err(BootError::Serialize)?),
                None => None,
            };

            let handle = init_app(&node, flags_json);
            Ok(ElmApp { handle })
        }
    }

    impl AppInstance for ElmApp {
        fn on_save_state(&self, mut handler: Box<dyn FnMut(&PersistedState)>) {
            let closure = Closure::<dyn FnMut(String)>::new(move |json: String| {
                match PersistedState::from_json(&json) {
                    Ok(state) => handler(&state),
                    // JSON.stringify output failing to parse means the app
                    // emitted something unserializable upstream
                    Err(e) => log::error!("dropping unreadable save emission: {e}"),
                }
            });
            subscribe_save(&self.handle, closure.as_ref());
            // Subscription lives for the page lifetime, never unsubscribed
            closure.forget();
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use scripted::ScriptedApp;

/// Native stand-in, used by the smoke demo and the bootstrap tests.
#[cfg(not(target_arch = "wasm32"))]
mod scripted {
    use super::*;
    use crate::consts;
    use crate::signal::SaveSignal;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Scripted application: records the flags it was constructed with and
    /// exposes its save-state channel so a driver can emit on its behalf.
    /// Mounts only on the real mount id, simulating a document that contains
    /// exactly that element.
    #[derive(Debug)]
    pub struct ScriptedApp {
        pub flags: Option<PersistedState>,
        pub signal: SaveSignal,
    }

    impl Application for ScriptedApp {
        type Instance = Rc<RefCell<ScriptedApp>>;

        fn init(
            mount_id: &str,
            flags: Option<PersistedState>,
        ) -> Result<Self::Instance, BootError> {
            if mount_id != consts::MOUNT_ID {
                return Err(BootError::MountMissing(mount_id.to_string()));
            }
            Ok(Rc::new(RefCell::new(ScriptedApp {
                flags,
                signal: SaveSignal::new(),
            })))
        }
    }

    impl AppInstance for Rc<RefCell<ScriptedApp>> {
        fn on_save_state(&self, handler: Box<dyn FnMut(&PersistedState)>) {
            self.borrow().signal.subscribe(handler);
        }
    }
}
