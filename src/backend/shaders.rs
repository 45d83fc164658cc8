//! WGSL shader source for the matrix-multiplication kernel.

/// Default side length of a workgroup tile.
///
/// Each workgroup covers a `LOCAL_SIZE x LOCAL_SIZE` block of output
/// cells. A tile side of 1 would leave most of a fixed-size dispatch
/// block idle on hardware that schedules invocations in groups.
pub const LOCAL_SIZE: u32 = 8;

/// Number of workgroups per grid axis: `ceil(dimension / local_size)`.
///
/// The dispatch is square, so the total workgroup count is this value
/// squared.
///
/// # Examples
///
/// ```
/// # use matmul_bench::backend::shaders::workgroup_count;
/// assert_eq!(workgroup_count(1024, 8), 128);
/// ```
pub fn workgroup_count(dimension: usize, local_size: u32) -> u32 {
    (dimension as u32).div_ceil(local_size)
}

/// Generate the WGSL matmul kernel for a fixed `dimension` and
/// `local_size`.
///
/// Both values are baked into the source as compile-time constants. Each
/// invocation computes exactly one output cell with the same reduction
/// loop and row-major index arithmetic as [`crate::cpu::multiply`]:
/// `a[i + x*dim] * b[y + i*dim]` accumulated into `c[y + x*dim]`. The
/// bounds guard covers the rounded-up grid when `dimension` is not a
/// multiple of `local_size`.
pub fn matmul_shader(dimension: usize, local_size: u32) -> String {
    format!(
        r#"@group(0) @binding(0)
var<storage, read> matrix_a: array<f32>;

@group(0) @binding(1)
var<storage, read> matrix_b: array<f32>;

@group(0) @binding(2)
var<storage, read_write> matrix_c: array<f32>;

const DIM: u32 = {dimension}u;

@compute @workgroup_size({local_size}, {local_size}, 1)
fn main(@builtin(global_invocation_id) global_id: vec3<u32>) {{
    let x = global_id.x;
    let y = global_id.y;
    if (x >= DIM || y >= DIM) {{
        return;
    }}

    var sum = 0.0;
    for (var i = 0u; i < DIM; i = i + 1u) {{
        sum = sum + matrix_a[i + x * DIM] * matrix_b[y + i * DIM];
    }}
    matrix_c[y + x * DIM] = sum;
}}
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shader_embeds_constants() {
        let shader = matmul_shader(1024, 8);
        assert!(shader.contains("const DIM: u32 = 1024u;"));
        assert!(shader.contains("@workgroup_size(8, 8, 1)"));
    }

    #[test]
    fn shader_has_three_bindings() {
        let shader = matmul_shader(16, 8);
        assert!(shader.contains("var<storage, read> matrix_a"));
        assert!(shader.contains("var<storage, read> matrix_b"));
        assert!(shader.contains("var<storage, read_write> matrix_c"));
    }

    #[test]
    fn workgroup_count_rounds_up() {
        assert_eq!(workgroup_count(1024, 8), 128);
        assert_eq!(workgroup_count(8, 8), 1);
        assert_eq!(workgroup_count(9, 8), 2);
        assert_eq!(workgroup_count(1, 8), 1);
    }
}
