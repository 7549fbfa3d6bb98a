//! Mutable render-state primitives owned by the simulation and read by
//! the renderer: material opacity/color pairs and flat particle buffers.
//!
//! Particle buffers are allocated once at construction and mutated in
//! place; the renderer uploads them when `needs_upload` is set. Lengths
//! are fixed (positions/velocities/colors are 3N, ages are N) and cannot
//! drift because only `ParticleBuffer::new` allocates.

/// Opacity + packed color for one visual layer.
#[derive(Debug, Clone, Copy)]
pub struct MaterialState {
    pub opacity: f32,
    pub color: u32,
    pub visible: bool,
}

impl MaterialState {
    pub fn new(color: u32) -> Self {
        Self {
            opacity: 0.0,
            color,
            visible: false,
        }
    }

    pub fn set_hex(&mut self, color: u32) {
        self.color = color;
    }

    /// Hide the layer and zero its opacity.
    pub fn extinguish(&mut self) {
        self.opacity = 0.0;
        self.visible = false;
    }
}

/// Parallel particle arrays for one point cloud.
#[derive(Debug, Clone)]
pub struct ParticleBuffer {
    positions: Vec<f32>,
    velocities: Vec<f32>,
    ages: Vec<f32>,
    colors: Vec<f32>,
    count: usize,
    pub max_age: f32,
    pub needs_upload: bool,
}

impl ParticleBuffer {
    pub fn new(count: usize, max_age: f32) -> Self {
        Self {
            positions: vec![0.0; count * 3],
            velocities: vec![0.0; count * 3],
            ages: vec![0.0; count],
            colors: vec![0.0; count * 3],
            count,
            max_age,
            needs_upload: false,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn positions_mut(&mut self) -> &mut [f32] {
        &mut self.positions
    }

    pub fn velocities_mut(&mut self) -> &mut [f32] {
        &mut self.velocities
    }

    pub fn ages_mut(&mut self) -> &mut [f32] {
        &mut self.ages
    }

    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    pub fn colors_mut(&mut self) -> &mut [f32] {
        &mut self.colors
    }

    /// Split borrow for the physics tail update, which walks all four
    /// arrays in one pass.
    pub fn arrays_mut(&mut self) -> (&mut [f32], &mut [f32], &mut [f32], &mut [f32]) {
        (
            &mut self.positions,
            &mut self.velocities,
            &mut self.ages,
            &mut self.colors,
        )
    }

    /// Raw pointer for zero-copy reads from the WASM host.
    pub fn positions_ptr(&self) -> *const f32 {
        self.positions.as_ptr()
    }

    pub fn colors_ptr(&self) -> *const f32 {
        self.colors.as_ptr()
    }
}

/// Unpack 0xRRGGBB into normalized (r, g, b).
pub fn unpack_color(color: u32) -> (f32, f32, f32) {
    let r = ((color >> 16) & 0xFF) as f32 / 255.0;
    let g = ((color >> 8) & 0xFF) as f32 / 255.0;
    let b = (color & 0xFF) as f32 / 255.0;
    (r, g, b)
}
