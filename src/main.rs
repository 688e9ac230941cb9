//! Todo shell entry point.
//!
//! Handles platform-specific initialization and runs the bootstrap sequence.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_shell {
    use todo_shell::app::ElmApp;
    use todo_shell::consts;
    use todo_shell::storage::LocalStorage;
    use todo_shell::Bootstrap;

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Todo shell starting...");

        let boot = Bootstrap::new(LocalStorage, consts::STORAGE_KEY, consts::MOUNT_ID);
        match boot.run::<ElmApp>() {
            Ok(instance) => {
                // The instance owns the page for its whole lifetime; there is
                // no teardown path, so dropping it here would be wrong
                std::mem::forget(instance);
                log::info!("Todo shell running");
            }
            Err(e) => {
                // Corrupt state or a missing mount point aborts startup; the
                // panic hook carries it to the console
                panic!("bootstrap failed: {e}");
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_shell::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Todo shell (native) starting...");
    log::info!("Native mode has no document to mount into - build for wasm32 to run the web shell");

    // Exercise the full wiring against in-memory storage
    println!("\nRunning bootstrap smoke test...");
    smoke_test_bootstrap();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn smoke_test_bootstrap() {
    use serde_json::json;
    use todo_shell::app::ScriptedApp;
    use todo_shell::consts;
    use todo_shell::storage::StorageAdapter;
    use todo_shell::{Bootstrap, MemoryStorage, PersistedState};

    let storage = MemoryStorage::new();
    let saved = PersistedState(json!({
        "entries": [{ "description": "ship it", "completed": false, "id": 0 }],
        "field": "",
        "uid": 1,
        "visibility": "All",
    }));
    storage
        .set(consts::STORAGE_KEY, &saved.to_json().unwrap())
        .unwrap();

    let boot = Bootstrap::new(storage.clone(), consts::STORAGE_KEY, consts::MOUNT_ID);
    let instance = boot.run::<ScriptedApp>().expect("bootstrap should succeed");
    assert_eq!(instance.borrow().flags.as_ref(), Some(&saved));

    let updated = PersistedState(json!({ "entries": [], "field": "", "uid": 1, "visibility": "All" }));
    instance.borrow().signal.emit(&updated);
    assert_eq!(
        storage.get(consts::STORAGE_KEY).unwrap(),
        Some(updated.to_json().unwrap())
    );

    println!("✓ Bootstrap smoke test passed!");
}
