use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, HtmlSelectElement};

use crate::error::Result;
use crate::mode::OutputMode;
use crate::panel::{controls, Control, ControlId, ControlKind};
use crate::scene::Scene;

use super::listener::Listener;

struct Slider {
    control: Control,
    input: HtmlInputElement,
    readout: HtmlElement,
}

/// Fixed overlay with one row per control.
pub struct Panel {
    root: Element,
    output: Option<HtmlSelectElement>,
    sliders: Vec<Slider>,
    _listeners: Vec<Listener>,
}

fn format_value(control: &Control, value: f32) -> String {
    match control.id {
        ControlId::Rotation => format!("{value:.2}"),
        _ => format!("{value:.0}"),
    }
}

impl Panel {
    pub fn build(document: &Document, parent: &Element, scene: &Rc<RefCell<Scene>>) -> Result<Self> {
        let root = document.create_element("div")?;
        root.set_class_name("dot-panel");

        let mut output = None;
        let mut sliders = Vec::new();
        let mut listeners = Vec::new();

        for control in controls() {
            let row = document.create_element("label")?;
            row.set_class_name("dot-panel__row");
            let name = document.create_element("span")?;
            name.set_text_content(Some(control.label));
            row.append_child(&name)?;

            let current = control.value(&scene.borrow().uniforms);

            match &control.kind {
                ControlKind::Slider { min, max, step } => {
                    let input: HtmlInputElement =
                        document.create_element("input")?.unchecked_into();
                    input.set_type("range");
                    input.set_min(&min.to_string());
                    input.set_max(&max.to_string());
                    input.set_step(&step.to_string());
                    input.set_value(&current.to_string());
                    row.append_child(&input)?;

                    let readout: HtmlElement = document.create_element("output")?.unchecked_into();
                    readout.set_text_content(Some(&format_value(&control, current)));
                    row.append_child(&readout)?;

                    sliders.push(Slider {
                        control: control.clone(),
                        input: input.clone(),
                        readout: readout.clone(),
                    });

                    let scene = scene.clone();
                    let field = input.clone();
                    let control = control.clone();
                    listeners.push(Listener::new(&input, "input", move |_| {
                        let Ok(raw) = field.value().parse::<f32>() else {
                            return;
                        };
                        let mut scene = scene.borrow_mut();
                        if control.apply(&mut scene.uniforms, raw) {
                            let shown = control.value(&scene.uniforms);
                            readout.set_text_content(Some(&format_value(&control, shown)));
                        }
                    })?);
                }
                ControlKind::List { options } => {
                    let select: HtmlSelectElement =
                        document.create_element("select")?.unchecked_into();
                    for (label, value) in options {
                        let option = document.create_element("option")?;
                        option.set_attribute("value", &value.to_string())?;
                        option.set_text_content(Some(label));
                        select.append_child(&option)?;
                    }
                    select.set_value(&(current as i32).to_string());
                    row.append_child(&select)?;

                    let scene = scene.clone();
                    let field = select.clone();
                    let control = control.clone();
                    listeners.push(Listener::new(&select, "change", move |_| {
                        let Ok(raw) = field.value().parse::<f32>() else {
                            return;
                        };
                        if control.apply(&mut scene.borrow_mut().uniforms, raw) {
                            log::debug!("output mode -> {}", field.value());
                        }
                    })?);
                    output = Some(select);
                }
            }
            root.append_child(&row)?;
        }

        parent.append_child(&root)?;
        Ok(Self {
            root,
            output,
            sliders,
            _listeners: listeners,
        })
    }

    /// Keeps the list in step with modes picked from the keyboard.
    pub fn show_mode(&self, mode: OutputMode) {
        if let Some(select) = &self.output {
            select.set_value(&mode.index().to_string());
        }
    }

    /// Moves a slider and its readout to a value set from outside the panel.
    pub fn show_value(&self, id: ControlId, value: f32) {
        if let Some(slider) = self.sliders.iter().find(|s| s.control.id == id) {
            slider.input.set_value(&value.to_string());
            slider
                .readout
                .set_text_content(Some(&format_value(&slider.control, value)));
        }
    }
}

impl Drop for Panel {
    fn drop(&mut self) {
        self.root.remove();
    }
}
