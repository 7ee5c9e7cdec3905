//! Full-screen animated dot grid drawn with a single WebGL2 fragment shader.
//!
//! The platform-independent pieces (uniform set, trail buffer, shading math,
//! key and panel bindings) build everywhere so they can be tested natively;
//! the DOM and GL glue only exists on wasm32.

pub mod clock;
pub mod color;
pub mod config;
pub mod error;
pub mod keys;
pub mod mode;
pub mod panel;
pub mod scene;
pub mod shader;
pub mod shading;
pub mod trail;
pub mod uniforms;

pub use config::{DotConfig, TrailConfig};
pub use error::DotError;
pub use mode::OutputMode;
pub use uniforms::{DotUniforms, Resolution};

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::RefCell;

    use wasm_bindgen::prelude::*;

    use crate::config::DotConfig;
    use crate::error::DotError;

    mod header;
    mod listener;
    mod page;
    mod panel;
    mod render;
    mod surface;

    pub use page::Page;
    pub use surface::DotScreen;

    thread_local! {
        static MOUNTED: RefCell<Option<Page>> = const { RefCell::new(None) };
    }

    /// Mounts the header and the effect into `#root`, if the page has one.
    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();

        let window = web_sys::window().ok_or(DotError::NoWindow)?;
        let document = window.document().ok_or(DotError::NoDocument)?;
        let Some(root) = document.get_element_by_id("root") else {
            log::info!("no #root element; waiting for DotScreen.mount");
            return Ok(());
        };

        let config = DotConfig::from_json(&root.get_attribute("data-config").unwrap_or_default())?;

        let page = Page::mount(&document, &root, &config)?;
        MOUNTED.with(|slot| *slot.borrow_mut() = Some(page));
        Ok(())
    }

    /// Tears down whatever `start` mounted, header and container included.
    #[wasm_bindgen]
    pub fn unmount() {
        drop(MOUNTED.with(|slot| slot.borrow_mut().take()));
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::{DotScreen, Page};
