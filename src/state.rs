use std::sync::Arc;

use wgpu::util::DeviceExt;
use winit::{dpi::PhysicalSize, window::Window};

use crate::config::Config;
use crate::controller::{CellSink, FrameOutcome, InputSnapshot, InteractionController};
use crate::grid::Grid;
use crate::render::{
    create_render_bind_group, create_render_bind_group_layout, create_render_pipeline,
    RenderParams,
};

/// Writes the controller's cell snapshot into the staging buffer that is
/// uploaded to the GPU, one u32 per cell in row-major order.
struct CellBufferSink<'a> {
    data: &'a mut [u32],
    width: u32,
}

impl CellSink for CellBufferSink<'_> {
    fn draw_cell(&mut self, x: u32, y: u32, alive: bool) {
        self.data[(y * self.width + x) as usize] = alive as u32;
    }
}

pub struct State {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub surface_config: wgpu::SurfaceConfiguration,
    pub size: PhysicalSize<u32>,
    pub window: Arc<Window>,

    grid_width: u32,
    cell_buffer: wgpu::Buffer,
    render_pipeline: wgpu::RenderPipeline,
    render_bind_group: wgpu::BindGroup,

    controller: InteractionController,
    cell_staging: Vec<u32>,
}

impl State {
    pub async fn new(window: Arc<Window>, config: Config) -> Self {
        let size = window.inner_size();

        log::info!("Initializing wgpu...");

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window.clone()).unwrap();

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                force_fallback_adapter: false,
                compatible_surface: Some(&surface),
            })
            .await
            .expect("Failed to find an appropriate adapter");

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await
            .expect("Failed to create device");

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps.formats[0];

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![surface_format],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);

        let grid_width = config.grid_width();
        let grid_height = config.grid_height();
        let grid = Grid::new(grid_width, grid_height).expect("Config guarantees non-zero grid");
        let controller = InteractionController::new(grid, config.cell_size_px);
        log::info!("Grid: {}x{} cells of {}px", grid_width, grid_height, config.cell_size_px);

        let cell_count = (grid_width * grid_height) as usize;
        let cell_staging = vec![0u32; cell_count];
        let cell_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Cell State Buffer"),
            size: (cell_count * std::mem::size_of::<u32>()) as u64,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let render_param_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Render Parameters"),
            contents: bytemuck::bytes_of(&RenderParams::from(&config)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let render_bind_group_layout = create_render_bind_group_layout(&device);
        let render_pipeline =
            create_render_pipeline(&device, &render_bind_group_layout, surface_format);
        let render_bind_group = create_render_bind_group(
            &device,
            &render_bind_group_layout,
            &render_param_buffer,
            &cell_buffer,
        );

        log::info!("wgpu initialized successfully.");

        Self {
            surface,
            device,
            queue,
            surface_config,
            size,
            window,
            grid_width,
            cell_buffer,
            render_pipeline,
            render_bind_group,
            controller,
            cell_staging,
        }
    }

    /// The grid never resizes with the window; only the surface follows.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.surface_config.width = new_size.width;
            self.surface_config.height = new_size.height;
            self.surface.configure(&self.device, &self.surface_config);
            log::info!("Reconfigured surface to {}x{}", new_size.width, new_size.height);
        } else {
            log::warn!(
                "Ignoring resize to zero dimensions: {}x{}",
                new_size.width,
                new_size.height
            );
        }
    }

    /// Run one frame: feed the input snapshot to the controller, upload the
    /// resulting cell states and draw them.
    pub fn process_frame(
        &mut self,
        input: &InputSnapshot,
    ) -> Result<FrameOutcome, wgpu::SurfaceError> {
        let mut sink = CellBufferSink {
            data: &mut self.cell_staging,
            width: self.grid_width,
        };
        if self.controller.process_frame(input, &mut sink) == FrameOutcome::Quit {
            return Ok(FrameOutcome::Quit);
        }

        self.queue
            .write_buffer(&self.cell_buffer, 0, bytemuck::cast_slice(&self.cell_staging));

        let output_frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost) => {
                log::warn!("Surface lost, recreating...");
                self.resize(self.size);
                return Err(wgpu::SurfaceError::Lost);
            }
            Err(e) => {
                log::error!("Failed to acquire next swap chain texture: {:?}", e);
                return Err(e);
            }
        };

        let output_view = output_frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Cell Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &output_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            render_pass.set_pipeline(&self.render_pipeline);
            render_pass.set_bind_group(0, &self.render_bind_group, &[]);
            render_pass.draw(0..3, 0..1);
        }
        self.queue.submit(Some(encoder.finish()));
        output_frame.present();

        Ok(FrameOutcome::Continue)
    }
}
