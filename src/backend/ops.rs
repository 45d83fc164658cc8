//! GPU matrix-multiplication pipeline.

use std::time::Instant;

use wgpu::util::DeviceExt;

use crate::backend::shaders;
use crate::backend::webgpu::GpuContext;
use crate::error::BenchError;
use crate::matrix::Matrix;

/// Multiply `a x b` on the GPU.
///
/// Semantically identical to [`crate::cpu::multiply`]: the kernel runs the
/// same reduction loop, one invocation per output cell, dispatched as
/// `ceil(dim/local_size)^2` workgroups of `local_size x local_size`.
///
/// Returns the product and the elapsed milliseconds. The timing window
/// opens immediately before command submission and closes when the result
/// is mapped into host memory; buffer upload, bind-group setup, and kernel
/// compilation are excluded (the CPU path times its whole loop, so the two
/// windows are only loosely comparable).
///
/// Device buffers live until this function returns; nothing is retained
/// across runs.
///
/// # Errors
///
/// [`BenchError::OutOfMemory`] if device allocation fails,
/// [`BenchError::Kernel`] if the device rejects the shader or pipeline,
/// [`BenchError::Readback`] if the result copy to host memory fails. All
/// are fatal for the run; there is no automatic fallback to the CPU path.
pub async fn gpu_matmul(
    ctx: &GpuContext,
    a: &Matrix,
    b: &Matrix,
    local_size: u32,
) -> Result<(Matrix, f64), BenchError> {
    assert_eq!(
        a.dimension(),
        b.dimension(),
        "operands must share a dimension"
    );
    let dimension = a.dimension();
    let byte_len = (dimension * dimension * std::mem::size_of::<f32>()) as u64;

    // Upload inputs and allocate the output and staging regions. Any
    // device OOM inside this scope surfaces through pop_error_scope.
    ctx.device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);

    let buffer_a = ctx
        .device
        .create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("matmul matrix A"),
            contents: bytemuck::cast_slice(a.as_slice()),
            usage: wgpu::BufferUsages::STORAGE,
        });

    let buffer_b = ctx
        .device
        .create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("matmul matrix B"),
            contents: bytemuck::cast_slice(b.as_slice()),
            usage: wgpu::BufferUsages::STORAGE,
        });

    let buffer_c = ctx.device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("matmul matrix C"),
        size: byte_len,
        usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_SRC,
        mapped_at_creation: false,
    });

    let staging = ctx.device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("matmul staging"),
        size: byte_len,
        usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    if let Some(error) = ctx.device.pop_error_scope().await {
        return Err(BenchError::OutOfMemory(error.to_string()));
    }

    // Compile the kernel with dimension and local_size baked in. A shader
    // or pipeline the device rejects surfaces as a validation error.
    ctx.device.push_error_scope(wgpu::ErrorFilter::Validation);

    let shader_code = shaders::matmul_shader(dimension, local_size);
    let shader = ctx
        .device
        .create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("matmul_shader"),
            source: wgpu::ShaderSource::Wgsl(shader_code.into()),
        });

    let bind_group_layout =
        ctx.device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("matmul_bind_group_layout"),
                entries: &[
                    // Matrix A (read-only)
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::COMPUTE,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Storage { read_only: true },
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    },
                    // Matrix B (read-only)
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::COMPUTE,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Storage { read_only: true },
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    },
                    // Matrix C (read-write)
                    wgpu::BindGroupLayoutEntry {
                        binding: 2,
                        visibility: wgpu::ShaderStages::COMPUTE,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Storage { read_only: false },
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    },
                ],
            });

    let pipeline_layout =
        ctx.device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("matmul_pipeline_layout"),
                bind_group_layouts: &[&bind_group_layout],
                push_constant_ranges: &[],
            });

    let pipeline = ctx
        .device
        .create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("matmul_pipeline"),
            layout: Some(&pipeline_layout),
            module: &shader,
            entry_point: "main",
            compilation_options: Default::default(),
            cache: None,
        });

    if let Some(error) = ctx.device.pop_error_scope().await {
        return Err(BenchError::Kernel(error.to_string()));
    }

    let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("matmul_bind_group"),
        layout: &bind_group_layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer_a.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: buffer_b.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: buffer_c.as_entire_binding(),
            },
        ],
    });

    // Encode the compute pass and the readback copy in one submission.
    let workgroups = shaders::workgroup_count(dimension, local_size);
    log::debug!("dispatching {workgroups}x{workgroups} workgroups for dim {dimension}");

    let mut encoder = ctx
        .device
        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("matmul_encoder"),
        });

    {
        let mut cpass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
            label: Some("matmul_pass"),
            timestamp_writes: None,
        });
        cpass.set_pipeline(&pipeline);
        cpass.set_bind_group(0, &bind_group, &[]);
        cpass.dispatch_workgroups(workgroups, workgroups, 1);
    }

    encoder.copy_buffer_to_buffer(&buffer_c, 0, &staging, 0, byte_len);

    let start = Instant::now();
    ctx.queue.submit(Some(encoder.finish()));

    let slice = staging.slice(..);
    let (tx, rx) = futures::channel::oneshot::channel();
    slice.map_async(wgpu::MapMode::Read, move |result| {
        let _ = tx.send(result);
    });
    ctx.device.poll(wgpu::Maintain::Wait);
    rx.await
        .map_err(|_| BenchError::Readback("map callback dropped".into()))?
        .map_err(|e| BenchError::Readback(e.to_string()))?;

    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    let data = slice.get_mapped_range();
    let result: Vec<f32> = bytemuck::cast_slice(&data).to_vec();
    drop(data);
    staging.unmap();

    Ok((Matrix::from_vec(result, dimension), elapsed_ms))
}
