use std::mem;
use std::sync::Arc;

use glow::*;

use crate::background::Background;
use crate::error::AppError;
use crate::transform::FrameUniforms;

const VERTEX_SHADER_SRC: &str = r#"#version 330 core
layout (location = 0) in vec2 aCorner;

uniform mat4 view_projection;

out vec2 vTexCoord;

void main() {
    vTexCoord = aCorner;
    gl_Position = view_projection * vec4(aCorner, 0.0, 1.0);
}
"#;

const FRAGMENT_SHADER_SRC: &str = r#"#version 330 core
in vec2 vTexCoord;

uniform mat4 uv_transform;
uniform sampler2D background;

out vec4 FragColor;

void main() {
    vec2 uv = (uv_transform * vec4(vTexCoord, 0.0, 1.0)).xy;
    FragColor = texture(background, uv);
}
"#;

/// Draws one full-viewport quad sampling the background through the UV
/// transform.
pub struct Renderer {
    gl: Arc<glow::Context>,
    program: Program,
    vao: VertexArray,
    vbo: Buffer,
    view_projection_loc: UniformLocation,
    uv_transform_loc: UniformLocation,
    background_loc: UniformLocation,
}

impl Renderer {
    pub fn new(gl: Arc<glow::Context>) -> Result<Self, AppError> {
        unsafe {
            let program = compile_program(&gl, VERTEX_SHADER_SRC, FRAGMENT_SHADER_SRC)?;

            let view_projection_loc = uniform_location(&gl, program, "view_projection")?;
            let uv_transform_loc = uniform_location(&gl, program, "uv_transform")?;
            let background_loc = uniform_location(&gl, program, "background")?;

            // Unit quad (0,0 to 1,1); the projection stretches it over the viewport
            let vertices: [f32; 12] = [
                0.0, 0.0, // top-left
                1.0, 0.0, // top-right
                1.0, 1.0, // bottom-right
                0.0, 0.0, // top-left
                1.0, 1.0, // bottom-right
                0.0, 1.0, // bottom-left
            ];

            let vao = gl
                .create_vertex_array()
                .map_err(|e| AppError::Gl(format!("Failed to create VAO: {}", e)))?;
            gl.bind_vertex_array(Some(vao));

            let vbo = gl
                .create_buffer()
                .map_err(|e| AppError::Gl(format!("Failed to create VBO: {}", e)))?;
            gl.bind_buffer(ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(ARRAY_BUFFER, as_u8_slice(&vertices), STATIC_DRAW);

            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(0, 2, FLOAT, false, 8, 0);

            gl.bind_vertex_array(None);

            gl.clear_color(0.0, 0.0, 0.0, 1.0);

            Ok(Self {
                gl,
                program,
                vao,
                vbo,
                view_projection_loc,
                uv_transform_loc,
                background_loc,
            })
        }
    }

    pub fn resize(&self, width: i32, height: i32) {
        unsafe {
            self.gl.viewport(0, 0, width, height);
        }
    }

    pub fn render(&self, uniforms: &FrameUniforms, background: &Background) {
        puffin::profile_function!();

        unsafe {
            self.gl.clear(COLOR_BUFFER_BIT);

            self.gl.use_program(Some(self.program));
            self.gl.bind_vertex_array(Some(self.vao));

            background.bind(0);
            self.gl.uniform_1_i32(Some(&self.background_loc), 0);

            self.gl.uniform_matrix_4_f32_slice(
                Some(&self.view_projection_loc),
                false,
                uniforms.view_projection.as_ref(),
            );
            self.gl.uniform_matrix_4_f32_slice(
                Some(&self.uv_transform_loc),
                false,
                uniforms.uv_transform.as_ref(),
            );

            self.gl.draw_arrays(TRIANGLES, 0, 6);

            self.gl.bind_vertex_array(None);
        }
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_program(self.program);
            self.gl.delete_vertex_array(self.vao);
            self.gl.delete_buffer(self.vbo);
        }
    }
}

unsafe fn compile_shader(gl: &glow::Context, kind: u32, source: &str) -> Result<Shader, AppError> {
    let shader = gl
        .create_shader(kind)
        .map_err(|e| AppError::Gl(format!("Failed to create shader: {}", e)))?;
    gl.shader_source(shader, source);
    gl.compile_shader(shader);
    if !gl.get_shader_compile_status(shader) {
        let log = gl.get_shader_info_log(shader);
        gl.delete_shader(shader);
        return Err(AppError::Gl(log));
    }
    Ok(shader)
}

unsafe fn compile_program(
    gl: &glow::Context,
    vertex_src: &str,
    fragment_src: &str,
) -> Result<Program, AppError> {
    let vertex_shader = compile_shader(gl, VERTEX_SHADER, vertex_src)?;
    let fragment_shader = compile_shader(gl, FRAGMENT_SHADER, fragment_src)?;

    let program = gl
        .create_program()
        .map_err(|e| AppError::Gl(format!("Failed to create program: {}", e)))?;
    gl.attach_shader(program, vertex_shader);
    gl.attach_shader(program, fragment_shader);
    gl.link_program(program);

    gl.delete_shader(vertex_shader);
    gl.delete_shader(fragment_shader);

    if !gl.get_program_link_status(program) {
        let log = gl.get_program_info_log(program);
        gl.delete_program(program);
        return Err(AppError::Gl(log));
    }

    Ok(program)
}

unsafe fn uniform_location(
    gl: &glow::Context,
    program: Program,
    name: &str,
) -> Result<UniformLocation, AppError> {
    gl.get_uniform_location(program, name)
        .ok_or_else(|| AppError::Gl(format!("Failed to get {} uniform location", name)))
}

fn as_u8_slice<T>(data: &[T]) -> &[u8] {
    unsafe {
        std::slice::from_raw_parts(
            data.as_ptr() as *const u8,
            data.len() * mem::size_of::<T>(),
        )
    }
}
