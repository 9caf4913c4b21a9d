use std::sync::Arc;

use anyhow::Result;
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::{
    camera::{self, CameraResources, CameraUniform},
    config::Config,
    data_structures::{cube::CubeMesh, texture},
    pipelines::{
        self, Pipelines,
        light::{LightResources, LightUniform},
    },
};

/// Central GPU and window context: device, queue, surface, the camera and
/// light GPU resources, the cube mesh and the block pipeline. Built once at
/// startup; any failure here is fatal and happens before the frame loop.
pub struct Context {
    pub window: Arc<Window>,
    pub depth_texture: texture::Texture,
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub camera: CameraResources,
    pub projection: camera::Projection,
    pub light: LightResources,
    pub pipelines: Pipelines,
    pub cube: CubeMesh,
}

impl Context {
    pub async fn new(window: Arc<Window>, config: &Config) -> Result<Self> {
        let size = window.inner_size();

        // The instance is a handle to our GPU
        // BackendBit::PRIMARY => Vulkan + Metal + DX12 + Browser WebGPU
        log::warn!("WGPU setup");
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        log::warn!("device and queue");
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
                experimental_features: Default::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        log::warn!("Surface");
        let surface_caps = surface.get_capabilities(&adapter);
        // The shader assumes an Srgb surface texture; on a non-Srgb-capable
        // surface the first reported format is used and colors come out
        // slightly darker.
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);
        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        // Start a little above the grid looking along -Z; reloads center on
        // wherever the camera has flown since.
        let camera = camera::Camera::new((0.0, 4.0, 12.0), cgmath::Deg(-90.0), cgmath::Deg(-15.0));
        let projection = camera::Projection::new(
            surface_config.width,
            surface_config.height,
            config.fovy,
            config.znear,
            config.zfar,
        );
        let camera_controller = camera::CameraController::new(config.speed, config.sensitivity);

        let mut camera_uniform = CameraUniform::new();
        camera_uniform.update_view_proj(&camera, &projection);

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[camera_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
                label: Some("camera_bind_group_layout"),
            });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
            label: Some("camera_bind_group"),
        });

        let camera = CameraResources {
            camera,
            controller: camera_controller,
            uniform: camera_uniform,
            buffer: camera_buffer,
            bind_group: camera_bind_group,
            bind_group_layout: camera_bind_group_layout,
        };

        let depth_texture = texture::Texture::create_depth_texture(
            &device,
            [surface_config.width, surface_config.height],
            "depth_texture",
        );

        // Fixed single-direction light, slightly off vertical so adjacent
        // faces separate visually.
        let light = LightResources::new(
            &device,
            LightUniform::new(
                cgmath::Vector3::new(-0.5, -1.0, -0.3),
                [1.0, 0.98, 0.9],
                [0.25, 0.25, 0.28],
            ),
        );

        let pipelines = Pipelines {
            block: pipelines::block::mk_block_pipeline(
                &device,
                &surface_config,
                &camera.bind_group_layout,
                &light.bind_group_layout,
            ),
        };

        let cube = CubeMesh::new(&device, config.block_size);

        Ok(Self {
            window,
            depth_texture,
            surface,
            device,
            queue,
            config: surface_config,
            camera,
            projection,
            light,
            pipelines,
            cube,
        })
    }
}
