use web_sys::{Document, Element};

use crate::config::DotConfig;
use crate::error::Result;

use super::header;
use super::surface::DotScreen;

/// Everything `start` adds under `#root`: the header, the `#webgl`
/// container and the effect inside it. Dropping it removes all three.
pub struct Page {
    screen: DotScreen,
    header: Element,
    container: Element,
}

impl Page {
    pub fn mount(document: &Document, root: &Element, config: &DotConfig) -> Result<Self> {
        let header = header::mount(document, root)?;
        let container = match document.create_element("div") {
            Ok(container) => container,
            Err(err) => {
                header.remove();
                return Err(err.into());
            }
        };
        container.set_id("webgl");
        let mounted = root
            .append_child(&container)
            .map_err(Into::into)
            .and_then(|_| DotScreen::mount_into(&container, config));
        match mounted {
            Ok(screen) => Ok(Self {
                screen,
                header,
                container,
            }),
            Err(err) => {
                container.remove();
                header.remove();
                Err(err)
            }
        }
    }

    pub fn screen(&self) -> &DotScreen {
        &self.screen
    }
}

impl Drop for Page {
    fn drop(&mut self) {
        self.screen.destroy();
        self.container.remove();
        self.header.remove();
    }
}
