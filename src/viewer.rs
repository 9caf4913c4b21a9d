//! Application event loop and per-frame driver.
//!
//! One thread owns everything: input polling, camera update, reload and
//! rendering, invoked once per display refresh. A requested reload runs on
//! this thread between the camera update and the draw, and blocks the frame
//! until the query, the distance filter and the GPU upload are done — the
//! accepted tradeoff of this design. The instance set and its GPU buffer are
//! only ever touched here, so there is nothing to lock.
//!
//! # Frame lifecycle
//!
//! 1. Collect window/device events into the camera controller
//! 2. On redraw: apply accumulated input to the camera, upload the uniform
//! 3. Execute a pending reload at the current camera position
//! 4. Draw the instance buffer built by the last reload and present

use std::sync::Arc;

use anyhow::Result;
use instant::Instant;
use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::Window,
};

use crate::{config::Config, context::Context, store::SqliteStore, world::World};

const SKY_COLOUR: wgpu::Color = wgpu::Color {
    r: 0.53,
    g: 0.77,
    b: 0.92,
    a: 1.0,
};

/// Everything that exists once the window and GPU are up.
struct ViewerState {
    ctx: Context,
    world: World<SqliteStore>,
    is_surface_configured: bool,
    mouse_look: bool,
    reload_requested: bool,
}

impl ViewerState {
    fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.ctx.config.width = width;
            self.ctx.config.height = height;
            self.is_surface_configured = true;
            self.ctx.projection.resize(width, height);
            self.ctx
                .surface
                .configure(&self.ctx.device, &self.ctx.config);
            self.ctx.depth_texture = crate::data_structures::texture::Texture::create_depth_texture(
                &self.ctx.device,
                [self.ctx.config.width, self.ctx.config.height],
                "depth_texture",
            );
        }
    }

    fn render(&mut self) -> std::result::Result<(), wgpu::SurfaceError> {
        // invoke main render loop
        self.ctx.window.request_redraw();

        // Rendering requires the surface to be configured
        if !self.is_surface_configured {
            return Ok(());
        }

        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder: wgpu::CommandEncoder =
            self.ctx
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("Render Encoder"),
                });
        {
            let mut render_pass: wgpu::RenderPass<'_> =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Block Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(SKY_COLOUR),
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                        view: &self.ctx.depth_texture.view,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    }),
                    occlusion_query_set: None,
                    timestamp_writes: None,
                });

            // An empty world view is a valid, silent state; skip the draw
            // instead of issuing a zero-instance call.
            let amount = self.world.buffer().count();
            if amount > 0 {
                render_pass.set_pipeline(&self.ctx.pipelines.block);
                render_pass.set_bind_group(0, &self.ctx.camera.bind_group, &[]);
                render_pass.set_bind_group(1, &self.ctx.light.bind_group, &[]);
                render_pass.set_vertex_buffer(0, self.ctx.cube.vertex_buffer.slice(..));
                render_pass.set_vertex_buffer(1, self.world.buffer().buffer.slice(..));
                render_pass.draw(0..self.ctx.cube.num_vertices, 0..amount);
            }
        }

        self.ctx.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

/// The application: owns the config, the store until the window exists, and
/// the running state afterwards.
pub struct Viewer {
    config: Config,
    // Opened before the event loop starts; taken by `resumed`.
    store: Option<SqliteStore>,
    state: Option<ViewerState>,
    async_runtime: tokio::runtime::Runtime,
    last_time: Instant,
}

impl Viewer {
    fn new(config: Config, store: SqliteStore) -> Result<Self> {
        Ok(Self {
            config,
            store: Some(store),
            state: None,
            async_runtime: tokio::runtime::Runtime::new()?,
            last_time: Instant::now(),
        })
    }
}

impl ApplicationHandler for Viewer {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes().with_title("voxelview");
        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => panic!("Viewer initialization failed. Cannot create a window: {}", e),
        };

        let ctx = self
            .async_runtime
            .block_on(Context::new(window, &self.config));
        let ctx = match ctx {
            Ok(ctx) => ctx,
            Err(e) => panic!(
                "Viewer initialization failed. Cannot create the main context: {}",
                e
            ),
        };

        let store = self.store.take().expect("store consumed by an earlier resume");
        let mut world = World::new(&ctx.device, store);

        // The initial load happens before the first frame; a store that
        // cannot be queried is a startup failure, not a runtime one.
        if let Err(e) = world.reload(&ctx.device, &ctx.camera.camera, &self.config) {
            panic!(
                "Viewer initialization failed. Cannot query the block store: {}",
                e
            );
        }

        let size = ctx.window.inner_size();
        let mut state = ViewerState {
            ctx,
            world,
            is_surface_configured: false,
            mouse_look: false,
            reload_requested: false,
        };
        state.resize(size.width, size.height);
        state.ctx.window.request_redraw();
        self.last_time = Instant::now();
        self.state = Some(state);
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };
        // Mouse-look only while the right button is held, so the cursor can
        // still reach the window decorations.
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            if state.mouse_look {
                state.ctx.camera.controller.handle_mouse(dx, dy);
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        // Movement key state goes straight to the controller.
        state.ctx.camera.controller.handle_window_events(&event);

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => state.resize(size.width, size.height),
            WindowEvent::KeyboardInput { event: key, .. } => {
                if let PhysicalKey::Code(code) = key.physical_key {
                    match code {
                        KeyCode::Escape if key.state.is_pressed() => event_loop.exit(),
                        // The reload itself waits for the next frame, where
                        // input has been applied to the camera.
                        KeyCode::KeyR if key.state.is_pressed() && !key.repeat => {
                            state.reload_requested = true;
                        }
                        _ => (),
                    }
                }
            }
            WindowEvent::MouseInput {
                state: button_state,
                button: MouseButton::Right,
                ..
            } => {
                state.mouse_look = button_state.is_pressed();
            }
            WindowEvent::RedrawRequested => {
                let dt = self.last_time.elapsed();
                self.last_time = Instant::now();

                // Apply the input accumulated since the last frame.
                state
                    .ctx
                    .camera
                    .controller
                    .update(&mut state.ctx.camera.camera, dt);
                state
                    .ctx
                    .camera
                    .uniform
                    .update_view_proj(&state.ctx.camera.camera, &state.ctx.projection);
                state.ctx.queue.write_buffer(
                    &state.ctx.camera.buffer,
                    0,
                    bytemuck::cast_slice(&[state.ctx.camera.uniform]),
                );

                // A pending reload runs here, on the frame thread, blocking
                // the frame until the new set is uploaded.
                if state.reload_requested {
                    state.reload_requested = false;
                    let reloaded = state.world.reload(
                        &state.ctx.device,
                        &state.ctx.camera.camera,
                        &self.config,
                    );
                    if let Err(e) = reloaded {
                        log::error!("reload failed, keeping the previous block set: {}", e);
                    }
                }

                match state.render() {
                    Ok(_) => (),
                    // Reconfigure the surface if it's lost or outdated
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let size = state.ctx.window.inner_size();
                        state.resize(size.width, size.height);
                    }
                    Err(e) => {
                        log::error!("Unable to render {}", e);
                    }
                }
            }
            _ => {}
        }
    }
}

/// Open the store, create the window and run the viewer until exit.
///
/// The store opens before the event loop starts so a bad path fails fast
/// with a clear diagnostic instead of a dead window. GPU resources and the
/// store connection are released by drop on every exit path.
pub fn run(config: Config) -> Result<()> {
    let store = SqliteStore::open(&config.store_path)?;

    let event_loop = EventLoop::new()?;
    let mut viewer = Viewer::new(config, store)?;
    event_loop.run_app(&mut viewer)?;
    Ok(())
}
