use std::cell::{Cell, RefCell};
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::{closure::Closure, prelude::*, JsCast};
use web_sys::{Element, HtmlCanvasElement, HtmlElement, KeyboardEvent, PointerEvent};

use crate::config::DotConfig;
use crate::error::{DotError, Result};
use crate::keys;
use crate::mode::OutputMode;
use crate::panel::ControlId;
use crate::scene::Scene;
use crate::trail::surface_uv;
use crate::uniforms::Resolution;

use super::listener::Listener;
use super::panel::Panel;
use super::render::Renderer;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn request_frame(callback: &FrameCallback) -> Result<i32> {
    let window = web_sys::window().ok_or(DotError::NoWindow)?;
    let slot = callback.borrow();
    let Some(closure) = slot.as_ref() else {
        return Err(DotError::Js("frame loop stopped".into()));
    };
    Ok(window.request_animation_frame(closure.as_ref().unchecked_ref())?)
}

/// Backing-store size for the canvas' current CSS box.
fn measure(canvas: &HtmlCanvasElement) -> Result<Resolution> {
    let window = web_sys::window().ok_or(DotError::NoWindow)?;
    let dpr = window.device_pixel_ratio();
    let (mut width, mut height) = (canvas.client_width() as f64, canvas.client_height() as f64);
    if width <= 0.0 || height <= 0.0 {
        width = window.inner_width()?.as_f64().unwrap_or(1.0);
        height = window.inner_height()?.as_f64().unwrap_or(1.0);
    }
    Ok(Resolution::from_css(width, height, dpr))
}

fn apply_size(canvas: &HtmlCanvasElement, scene: &RefCell<Scene>) -> Result<()> {
    let resolution = measure(canvas)?;
    canvas.set_width(resolution.width() as u32);
    canvas.set_height(resolution.height() as u32);
    scene.borrow_mut().resized(resolution);
    Ok(())
}

struct Mounted {
    canvas: HtmlCanvasElement,
    renderer: Rc<Renderer>,
    scene: Rc<RefCell<Scene>>,
    panel: Option<Rc<Panel>>,
    frame: FrameCallback,
    frame_id: Rc<Cell<Option<i32>>>,
    listeners: Vec<Listener>,
}

impl Mounted {
    fn release(self) {
        if let (Some(window), Some(id)) = (web_sys::window(), self.frame_id.take()) {
            let _ = window.cancel_animation_frame(id);
        }
        // breaks the closure's reference to itself
        self.frame.borrow_mut().take();
        drop(self.listeners);
        drop(self.panel);
        self.renderer.release();
        self.canvas.remove();
        log::info!("dot screen released");
    }
}

/// Handle to one mounted effect. Everything it acquired is released by
/// [`DotScreen::destroy`] or when the handle is dropped.
#[wasm_bindgen]
pub struct DotScreen {
    inner: Option<Mounted>,
}

impl DotScreen {
    pub fn mount_into(container: &Element, config: &DotConfig) -> Result<Self> {
        let window = web_sys::window().ok_or(DotError::NoWindow)?;
        let document = window.document().ok_or(DotError::NoDocument)?;

        let canvas: HtmlCanvasElement = document.create_element("canvas")?.unchecked_into();
        canvas.set_class_name("dot-screen");
        container.append_child(&canvas)?;

        let resolution = measure(&canvas)?;
        canvas.set_width(resolution.width() as u32);
        canvas.set_height(resolution.height() as u32);

        let scene = Rc::new(RefCell::new(Scene::new(config, resolution)?));
        let renderer = match Renderer::new(&canvas, &scene.borrow()) {
            Ok(renderer) => Rc::new(renderer),
            Err(err) => {
                canvas.remove();
                return Err(err);
            }
        };

        let (panel, listeners) =
            match Self::wire(&window, &document, container, config, &canvas, &scene) {
                Ok(wired) => wired,
                Err(err) => {
                    renderer.release();
                    canvas.remove();
                    return Err(err);
                }
            };

        let frame: FrameCallback = Rc::new(RefCell::new(None));
        let frame_id = Rc::new(Cell::new(None));
        {
            let next = frame.clone();
            let id = frame_id.clone();
            let scene = scene.clone();
            let renderer = renderer.clone();
            *frame.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
                let update = scene.borrow_mut().frame(now);
                if let Err(err) = renderer.draw(&scene.borrow(), update) {
                    log::warn!("draw failed: {err}");
                }
                id.set(request_frame(&next).ok());
            }) as Box<dyn FnMut(f64)>));
        }
        frame_id.set(Some(request_frame(&frame)?));

        log::info!(
            "dot screen mounted at {}x{}",
            resolution.width(),
            resolution.height()
        );

        Ok(Self {
            inner: Some(Mounted {
                canvas,
                renderer,
                scene,
                panel,
                frame,
                frame_id,
                listeners,
            }),
        })
    }

    /// Panel plus the resize, pointer and key listeners.
    fn wire(
        window: &web_sys::Window,
        document: &web_sys::Document,
        container: &Element,
        config: &DotConfig,
        canvas: &HtmlCanvasElement,
        scene: &Rc<RefCell<Scene>>,
    ) -> Result<(Option<Rc<Panel>>, Vec<Listener>)> {
        let panel = if config.show_panel {
            Some(Rc::new(Panel::build(document, container, scene)?))
        } else {
            None
        };

        let mut listeners = Vec::new();

        {
            let canvas = canvas.clone();
            let scene = scene.clone();
            listeners.push(Listener::new(window, "resize", move |_| {
                if let Err(err) = apply_size(&canvas, &scene) {
                    log::warn!("resize failed: {err}");
                }
            })?);
        }

        {
            let target = canvas.clone();
            let scene = scene.clone();
            listeners.push(Listener::new(canvas, "pointermove", move |event| {
                let Some(event) = event.dyn_ref::<PointerEvent>() else {
                    return;
                };
                let rect = target.get_bounding_client_rect();
                let uv = surface_uv(
                    Vec2::new(event.client_x() as f32, event.client_y() as f32),
                    (
                        rect.left() as f32,
                        rect.top() as f32,
                        rect.width() as f32,
                        rect.height() as f32,
                    ),
                );
                scene.borrow_mut().pointer_moved(uv);
            })?);
        }

        {
            let scene = scene.clone();
            let panel = panel.clone();
            listeners.push(Listener::new(window, "keydown", move |event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                if event.ctrl_key() || event.meta_key() || event.alt_key() {
                    return;
                }
                let typing = event
                    .target()
                    .and_then(|t| t.dyn_into::<HtmlElement>().ok())
                    .map(|el| keys::is_text_target(&el.tag_name(), el.is_content_editable()))
                    .unwrap_or(false);
                if typing {
                    return;
                }
                if let Some(mode) = keys::mode_for_key(&event.key()) {
                    if scene.borrow_mut().select_mode(mode) {
                        log::debug!("output mode -> {mode:?}");
                    }
                    if let Some(panel) = &panel {
                        panel.show_mode(mode);
                    }
                }
            })?);
        }

        Ok((panel, listeners))
    }

    fn with_scene<R>(&self, f: impl FnOnce(&mut Scene) -> R) -> Option<R> {
        self.inner.as_ref().map(|m| f(&mut m.scene.borrow_mut()))
    }

    fn show_value(&self, id: ControlId, value: Option<f32>) {
        let panel = self.inner.as_ref().and_then(|m| m.panel.as_ref());
        if let (Some(panel), Some(value)) = (panel, value) {
            panel.show_value(id, value);
        }
    }
}

#[wasm_bindgen]
impl DotScreen {
    /// Mounts into the element with `container_id`, optionally configured by
    /// a JSON string.
    pub fn mount(container_id: &str, config_json: Option<String>) -> Result<DotScreen, JsValue> {
        let document = web_sys::window()
            .ok_or(DotError::NoWindow)?
            .document()
            .ok_or(DotError::NoDocument)?;
        let container = document
            .get_element_by_id(container_id)
            .ok_or_else(|| DotError::MissingElement(container_id.to_owned()))?;
        let config = DotConfig::from_json(config_json.as_deref().unwrap_or_default())?;
        Ok(Self::mount_into(&container, &config)?)
    }

    /// Returns false for an unknown index; the current mode stays.
    pub fn set_mode(&self, index: i32) -> bool {
        let Some(mode) = OutputMode::from_index(index) else {
            log::warn!("ignoring unknown output mode {index}");
            return false;
        };
        self.with_scene(|scene| scene.select_mode(mode));
        if let Some(panel) = self.inner.as_ref().and_then(|m| m.panel.as_ref()) {
            panel.show_mode(mode);
        }
        true
    }

    pub fn mode(&self) -> Option<i32> {
        self.with_scene(|scene| scene.uniforms.mode().index())
    }

    pub fn set_rotation(&self, radians: f32) {
        let shown = self.with_scene(|scene| {
            scene.uniforms.set_rotation(radians);
            scene.uniforms.rotation()
        });
        self.show_value(ControlId::Rotation, shown);
    }

    pub fn set_grid_size(&self, cells: f32) {
        let shown = self.with_scene(|scene| {
            scene.uniforms.set_grid_size(cells);
            scene.uniforms.grid_size()
        });
        self.show_value(ControlId::Cells, shown);
    }

    #[wasm_bindgen(getter)]
    pub fn canvas(&self) -> Option<HtmlCanvasElement> {
        self.inner.as_ref().map(|m| m.canvas.clone())
    }

    /// Stops the loop, detaches listeners and frees the GL context.
    pub fn destroy(&mut self) {
        if let Some(mounted) = self.inner.take() {
            mounted.release();
        }
    }
}

impl Drop for DotScreen {
    fn drop(&mut self) {
        self.destroy();
    }
}
