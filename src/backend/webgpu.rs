//! WebGPU device acquisition.

use crate::error::BenchError;

/// GPU execution context with device and queue.
///
/// Owned by a single benchmark run; dropping it releases the device once
/// all buffers created from it are gone.
pub struct GpuContext {
    /// WebGPU device handle
    pub device: wgpu::Device,
    /// WebGPU command queue
    pub queue: wgpu::Queue,
}

impl GpuContext {
    /// Acquire a compute-capable device and queue.
    ///
    /// Asynchronous and fallible: hosts without a compatible adapter get
    /// [`BenchError::NoAdapter`]. The failure is fatal for the run and is
    /// not retried.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use matmul_bench::backend::webgpu::GpuContext;
    ///
    /// pollster::block_on(async {
    ///     let ctx = GpuContext::acquire().await.expect("WebGPU not available");
    ///     drop(ctx);
    /// });
    /// ```
    pub async fn acquire() -> Result<Self, BenchError> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .ok_or(BenchError::NoAdapter)?;

        let info = adapter.get_info();
        log::info!("using adapter: {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("matmul-bench device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        Ok(Self { device, queue })
    }
}
