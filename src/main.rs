pub mod config;
pub mod controller;
pub mod grid;
pub mod input;
pub mod render;
pub mod rules;
pub mod state;

use std::sync::Arc;
use std::time::{Duration, Instant};

use winit::{
    dpi::PhysicalSize,
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::Window,
};

use crate::config::Config;
use crate::controller::FrameOutcome;
use crate::input::InputCollector;
use crate::state::State;

const DISPLAY_WIDTH_PX: u32 = 800;
const DISPLAY_HEIGHT_PX: u32 = 800;
const CELL_SIZE_PX: u32 = 10;
const CELL_BORDER_PX: u32 = 1;

// ~30 simulation updates per second
const FRAME_INTERVAL: Duration = Duration::from_millis(33);

async fn run(event_loop: EventLoop<()>, window: Arc<Window>, config: Config) {
    let mut state = State::new(window, config).await;
    let mut collector = InputCollector::new();
    let mut last_frame = Instant::now();

    event_loop
        .run(move |event, window_target| {
            match event {
                Event::WindowEvent { window_id, ref event }
                    if window_id == state.window.id() =>
                {
                    match event {
                        WindowEvent::CloseRequested => {
                            collector.request_quit();
                        }
                        WindowEvent::Resized(new_size) => {
                            state.resize(*new_size);
                        }
                        WindowEvent::KeyboardInput { event: key_event, .. } => {
                            collector.on_key(
                                &key_event.logical_key,
                                key_event.state,
                                key_event.repeat,
                            );
                        }
                        WindowEvent::MouseInput { state: element_state, button, .. } => {
                            collector.on_mouse_button(*button, *element_state);
                        }
                        WindowEvent::CursorMoved { position, .. } => {
                            collector.on_cursor_moved(*position);
                        }
                        WindowEvent::RedrawRequested => {
                            let snapshot = collector.take_snapshot();
                            last_frame = Instant::now();
                            match state.process_frame(&snapshot) {
                                Ok(FrameOutcome::Quit) => {
                                    log::info!("Quit requested, exiting.");
                                    window_target.exit();
                                }
                                Ok(FrameOutcome::Continue) => {}
                                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                                    // resize/reconfigure happened inside; retry next frame
                                    log::warn!("Skipping frame due to surface error.");
                                    state.window.request_redraw();
                                }
                                Err(e) => {
                                    log::error!("Unrecoverable surface error: {:?}", e);
                                    window_target.exit();
                                }
                            }
                        }
                        _ => (),
                    }
                }
                Event::AboutToWait => {
                    // Pace redraws to the frame interval instead of spinning
                    let elapsed = last_frame.elapsed();
                    if elapsed >= FRAME_INTERVAL {
                        state.window.request_redraw();
                    } else {
                        window_target
                            .set_control_flow(ControlFlow::WaitUntil(last_frame + FRAME_INTERVAL));
                    }
                }
                _ => (),
            }
        })
        .unwrap();
}

fn main() {
    env_logger::init();

    let config = Config::new(DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX, CELL_SIZE_PX, CELL_BORDER_PX)
        .expect("Invalid display configuration");

    let event_loop = EventLoop::new().unwrap();
    let window = Arc::new(
        winit::window::WindowBuilder::new()
            .with_title("Conway's Game of Life")
            .with_inner_size(PhysicalSize::new(config.display_width_px, config.display_height_px))
            .with_resizable(false)
            .build(&event_loop)
            .unwrap(),
    );

    pollster::block_on(run(event_loop, window, config));
}
