use wasm_bindgen::JsCast;
use web_sys::{
    HtmlCanvasElement, WebGl2RenderingContext as GL, WebGlBuffer, WebGlContextAttributes,
    WebGlPowerPreference, WebGlProgram, WebGlShader, WebGlTexture, WebGlUniformLocation,
    WebGlVertexArrayObject, WebglLoseContext,
};

use crate::error::{DotError, Result};
use crate::scene::{FrameUpdate, Scene};
use crate::shader::{self, QUAD_VERTICES};

struct Locations {
    time: Option<WebGlUniformLocation>,
    mode: Option<WebGlUniformLocation>,
    resolution: Option<WebGlUniformLocation>,
    dot_color: Option<WebGlUniformLocation>,
    bg_color: Option<WebGlUniformLocation>,
    mouse_trail: Option<WebGlUniformLocation>,
    rotation: Option<WebGlUniformLocation>,
    grid_size: Option<WebGlUniformLocation>,
}

impl Locations {
    fn lookup(gl: &GL, program: &WebGlProgram) -> Self {
        let at = |name| gl.get_uniform_location(program, name);
        Self {
            time: at(shader::U_TIME),
            mode: at(shader::U_MODE),
            resolution: at(shader::U_RESOLUTION),
            dot_color: at(shader::U_DOT_COLOR),
            bg_color: at(shader::U_BG_COLOR),
            mouse_trail: at(shader::U_MOUSE_TRAIL),
            rotation: at(shader::U_ROTATION),
            grid_size: at(shader::U_GRID_SIZE),
        }
    }
}

/// GL objects for the one full-screen quad and its trail texture.
pub struct Renderer {
    gl: GL,
    program: WebGlProgram,
    vao: WebGlVertexArrayObject,
    buffer: WebGlBuffer,
    texture: WebGlTexture,
    texture_size: i32,
    locations: Locations,
}

/// Antialiased, high-performance WebGL2 context. There is no tone mapping
/// stage; the fragment shader encodes sRGB itself.
fn acquire_context(canvas: &HtmlCanvasElement) -> Result<GL> {
    let attrs = WebGlContextAttributes::new();
    attrs.set_antialias(true);
    attrs.set_power_preference(WebGlPowerPreference::HighPerformance);
    canvas
        .get_context_with_context_options("webgl2", &attrs)?
        .ok_or(DotError::ContextUnavailable)?
        .dyn_into::<GL>()
        .map_err(|_| DotError::ContextUnavailable)
}

fn compile(gl: &GL, kind: u32, source: &str) -> Result<WebGlShader> {
    let shader = gl.create_shader(kind).ok_or(DotError::Resource("shader"))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);
    let ok = gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false);
    if ok {
        Ok(shader)
    } else {
        let info = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        Err(DotError::ShaderCompile(info))
    }
}

fn link(gl: &GL, vertex: &WebGlShader, fragment: &WebGlShader) -> Result<WebGlProgram> {
    let program = gl.create_program().ok_or(DotError::Resource("program"))?;
    gl.attach_shader(&program, vertex);
    gl.attach_shader(&program, fragment);
    gl.link_program(&program);
    // shaders are owned by the program from here on
    gl.delete_shader(Some(vertex));
    gl.delete_shader(Some(fragment));
    let ok = gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false);
    if ok {
        Ok(program)
    } else {
        let info = gl.get_program_info_log(&program).unwrap_or_default();
        gl.delete_program(Some(&program));
        Err(DotError::ProgramLink(info))
    }
}

impl Renderer {
    pub fn new(canvas: &HtmlCanvasElement, scene: &Scene) -> Result<Self> {
        let gl = acquire_context(canvas)?;

        let vertex = compile(&gl, GL::VERTEX_SHADER, shader::VERTEX_SRC)?;
        let fragment = compile(&gl, GL::FRAGMENT_SHADER, shader::FRAGMENT_SRC)?;
        let program = link(&gl, &vertex, &fragment)?;

        let vao = gl
            .create_vertex_array()
            .ok_or(DotError::Resource("vertex array"))?;
        gl.bind_vertex_array(Some(&vao));

        let buffer = gl.create_buffer().ok_or(DotError::Resource("vertex buffer"))?;
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));
        let vertices = js_sys::Float32Array::from(&QUAD_VERTICES[..]);
        gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &vertices, GL::STATIC_DRAW);

        let position = gl.get_attrib_location(&program, shader::ATTR_POSITION);
        if position < 0 {
            return Err(DotError::Resource("position attribute"));
        }
        gl.enable_vertex_attrib_array(position as u32);
        gl.vertex_attrib_pointer_with_i32(position as u32, 2, GL::FLOAT, false, 0, 0);
        gl.bind_vertex_array(None);

        let texture_size = scene.texture.size() as i32;
        let texture = gl.create_texture().ok_or(DotError::Resource("trail texture"))?;
        gl.bind_texture(GL::TEXTURE_2D, Some(&texture));
        gl.pixel_storei(GL::UNPACK_ALIGNMENT, 1);
        gl.tex_image_2d_with_i32_and_i32_and_i32_and_format_and_type_and_opt_u8_array(
            GL::TEXTURE_2D,
            0,
            GL::R8 as i32,
            texture_size,
            texture_size,
            0,
            GL::RED,
            GL::UNSIGNED_BYTE,
            Some(scene.texture.bytes()),
        )?;
        gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MIN_FILTER, GL::LINEAR as i32);
        gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MAG_FILTER, GL::LINEAR as i32);
        gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_S, GL::CLAMP_TO_EDGE as i32);
        gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_T, GL::CLAMP_TO_EDGE as i32);

        let locations = Locations::lookup(&gl, &program);

        Ok(Self {
            gl,
            program,
            vao,
            buffer,
            texture,
            texture_size,
            locations,
        })
    }

    /// Pushes the uniform set (and the trail texture when it changed) and
    /// draws the quad.
    pub fn draw(&self, scene: &Scene, update: FrameUpdate) -> Result<()> {
        let gl = &self.gl;
        let u = &scene.uniforms;
        let loc = &self.locations;

        gl.viewport(
            0,
            0,
            u.resolution.width() as i32,
            u.resolution.height() as i32,
        );
        gl.use_program(Some(&self.program));

        gl.active_texture(GL::TEXTURE0 + shader::TRAIL_TEXTURE_UNIT as u32);
        gl.bind_texture(GL::TEXTURE_2D, Some(&self.texture));
        if update.upload_trail {
            gl.pixel_storei(GL::UNPACK_ALIGNMENT, 1);
            gl.tex_sub_image_2d_with_i32_and_i32_and_u32_and_type_and_opt_u8_array(
                GL::TEXTURE_2D,
                0,
                0,
                0,
                self.texture_size,
                self.texture_size,
                GL::RED,
                GL::UNSIGNED_BYTE,
                Some(scene.texture.bytes()),
            )?;
        }

        gl.uniform1f(loc.time.as_ref(), u.time);
        gl.uniform1i(loc.mode.as_ref(), u.mode().index());
        gl.uniform2f(
            loc.resolution.as_ref(),
            u.resolution.width(),
            u.resolution.height(),
        );
        gl.uniform3f(loc.dot_color.as_ref(), u.dot_color.x, u.dot_color.y, u.dot_color.z);
        gl.uniform3f(loc.bg_color.as_ref(), u.bg_color.x, u.bg_color.y, u.bg_color.z);
        gl.uniform1i(loc.mouse_trail.as_ref(), shader::TRAIL_TEXTURE_UNIT);
        gl.uniform1f(loc.rotation.as_ref(), u.rotation());
        gl.uniform1f(loc.grid_size.as_ref(), u.grid_size());

        gl.bind_vertex_array(Some(&self.vao));
        gl.draw_arrays(GL::TRIANGLES, 0, (QUAD_VERTICES.len() / 2) as i32);
        gl.bind_vertex_array(None);
        Ok(())
    }

    /// Frees every GL object and hands the context back to the browser.
    pub fn release(&self) {
        let gl = &self.gl;
        gl.delete_texture(Some(&self.texture));
        gl.delete_buffer(Some(&self.buffer));
        gl.delete_vertex_array(Some(&self.vao));
        gl.delete_program(Some(&self.program));
        if let Ok(Some(ext)) = gl.get_extension("WEBGL_lose_context") {
            ext.unchecked_into::<WebglLoseContext>().lose_context();
        }
    }
}
