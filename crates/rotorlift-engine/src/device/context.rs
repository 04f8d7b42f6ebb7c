use anyhow::{Context, Result};
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::paint::Colour;

use super::GpuInit;
use super::surface::{self, SurfaceErrorAction};

/// The game window's swapchain plus the device that renders into it.
///
/// Borrows the window for `'w`; the runtime keeps both in one self-referencing
/// entry so the surface can never outlive its window.
pub struct Gpu<'w> {
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: wgpu::Surface<'w>,
    config: wgpu::SurfaceConfiguration,
    /// Last size reported by the window; may be zero while minimized.
    size: PhysicalSize<u32>,
}

/// One acquired swapchain image, already cleared, with an open encoder.
pub struct GpuFrame {
    pub encoder: wgpu::CommandEncoder,
    pub view: wgpu::TextureView,
    texture: wgpu::SurfaceTexture,
}

impl<'w> Gpu<'w> {
    /// Opens a device on an adapter that can present to `window`.
    pub async fn new(window: &'w Window, init: GpuInit) -> Result<Self> {
        let size = window.inner_size();
        anyhow::ensure!(size.width > 0 && size.height > 0, "window has zero size");

        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(window)
            .context("failed to create wgpu surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no adapter can present to this window")?;

        let info = adapter.get_info();
        log::info!("adapter: {} ({:?}, {:?})", info.name, info.backend, info.device_type);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("rotorlift device"),
                required_features: init.required_features,
                required_limits: init.required_limits.clone(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to open wgpu device")?;

        let config = swapchain_config(&surface.get_capabilities(&adapter), size, &init)?;
        surface.configure(&device, &config);
        log::debug!("swapchain {:?} {}x{}", config.format, config.width, config.height);

        Ok(Self {
            device,
            queue,
            surface,
            config,
            size,
        })
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        surface::apply_resize(
            &self.surface,
            &self.device,
            &mut self.config,
            &mut self.size,
            new_size,
        );
    }

    /// Acquires the next swapchain image and clears it to `clear`.
    ///
    /// `Ok(None)` means this frame should be skipped (surface lost, outdated
    /// or timed out); only an out-of-memory surface is an error.
    pub fn acquire(&mut self, clear: Colour) -> Result<Option<GpuFrame>> {
        let texture = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(err) => {
                return match surface::map_surface_error(
                    &self.surface,
                    &self.device,
                    &self.config,
                    self.size,
                    err.clone(),
                ) {
                    SurfaceErrorAction::Fatal => Err(anyhow::anyhow!("surface lost: {err:?}")),
                    SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => Ok(None),
                };
            }
        };

        let view = texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("rotorlift frame encoder"),
            });

        // Scene passes load on top of this.
        {
            let _clear = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("rotorlift clear"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear.to_wgpu()),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
        }

        Ok(Some(GpuFrame {
            encoder,
            view,
            texture,
        }))
    }

    /// Submits the frame's commands and presents its image.
    pub fn present(&self, frame: GpuFrame) {
        let GpuFrame {
            encoder,
            view,
            texture,
        } = frame;
        self.queue.submit(std::iter::once(encoder.finish()));
        drop(view);
        texture.present();
    }
}

/// Swapchain configuration for a freshly opened surface.
fn swapchain_config(
    caps: &wgpu::SurfaceCapabilities,
    size: PhysicalSize<u32>,
    init: &GpuInit,
) -> Result<wgpu::SurfaceConfiguration> {
    let format = surface::choose_surface_format(&caps.formats, init.prefer_srgb)
        .context("surface reports no formats")?;

    Ok(wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format,
        width: size.width.max(1),
        height: size.height.max(1),
        present_mode: init.present_mode,
        alpha_mode: surface::choose_alpha_mode(caps, init.alpha_mode),
        view_formats: vec![],
        desired_maximum_frame_latency: init.desired_maximum_frame_latency,
    })
}
