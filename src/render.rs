use bytemuck::{Pod, Zeroable};
use std::num::NonZeroU64;

use crate::config::Config;

/// Uniforms the cell shader needs to map framebuffer pixels to cells.
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub struct RenderParams {
    pub grid_width: u32,
    pub grid_height: u32,
    pub cell_size_px: u32,
    pub cell_border_px: u32,
}

impl From<&Config> for RenderParams {
    fn from(config: &Config) -> Self {
        Self {
            grid_width: config.grid_width(),
            grid_height: config.grid_height(),
            cell_size_px: config.cell_size_px,
            cell_border_px: config.cell_border_px,
        }
    }
}

/// Fullscreen pass: every fragment looks up the cell it falls inside and
/// paints it white (alive), dark blue (dead) or black (border / off-grid).
pub const CELL_SHADER: &str = r#"
struct Params {
    grid_width: u32,
    grid_height: u32,
    cell_size_px: u32,
    cell_border_px: u32,
};

@group(0) @binding(0) var<uniform> params: Params;
@group(0) @binding(1) var<storage, read> cells: array<u32>;

@vertex
fn vs_main(@builtin(vertex_index) vi: u32) -> @builtin(position) vec4<f32> {
    // Single triangle covering the whole surface
    var positions = array<vec2<f32>, 3>(
        vec2<f32>(-1.0, -3.0),
        vec2<f32>( 3.0,  1.0),
        vec2<f32>(-1.0,  1.0)
    );
    return vec4<f32>(positions[vi], 0.0, 1.0);
}

@fragment
fn fs_main(@builtin(position) frag: vec4<f32>) -> @location(0) vec4<f32> {
    let background = vec4<f32>(0.0, 0.0, 0.0, 1.0);
    let px = vec2<u32>(frag.xy);
    let cx = px.x / params.cell_size_px;
    let cy = px.y / params.cell_size_px;
    if (cx >= params.grid_width || cy >= params.grid_height) {
        return background;
    }
    // Inset each cell by the border so neighbors stay separated
    let lx = px.x % params.cell_size_px;
    let ly = px.y % params.cell_size_px;
    let lo = params.cell_border_px;
    let hi = params.cell_size_px - params.cell_border_px;
    if (lx < lo || lx >= hi || ly < lo || ly >= hi) {
        return background;
    }
    if (cells[cy * params.grid_width + cx] != 0u) {
        return vec4<f32>(1.0, 1.0, 1.0, 1.0);
    }
    return vec4<f32>(6.0 / 255.0, 7.0 / 255.0, 66.0 / 255.0, 1.0);
}
"#;

pub fn create_render_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Render Bind Group Layout"),
        entries: &[
            // RenderParams uniform (binding 0)
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: NonZeroU64::new(std::mem::size_of::<RenderParams>() as u64),
                },
                count: None,
            },
            // Cell state buffer (binding 1)
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Storage { read_only: true },
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
        ],
    })
}

pub fn create_render_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    render_param_buffer: &wgpu::Buffer,
    cell_buffer: &wgpu::Buffer,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Render Bind Group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: render_param_buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: cell_buffer.as_entire_binding(),
            },
        ],
    })
}

pub fn create_render_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    surface_format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    let shader_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("Cell Shader"),
        source: wgpu::ShaderSource::Wgsl(CELL_SHADER.into()),
    });

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Render Pipeline Layout"),
        bind_group_layouts: &[layout],
        push_constant_ranges: &[],
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Render Pipeline"),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader_module,
            entry_point: "vs_main",
            buffers: &[],
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader_module,
            entry_point: "fs_main",
            targets: &[Some(surface_format.into())],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
    })
}
