use bytemuck::{Pod, Zeroable};

/// Per-body render data written to a flat buffer for the renderer.
/// Must match the TypeScript protocol: 12 floats = 48 bytes stride.
///
/// The buffer slot index is the body's render handle: it is assigned at
/// registration and stays stable for the process lifetime.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct BodyInstance {
    /// World-space position.
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Euler rotation in radians (axial spin on y, tumble on x).
    pub rot_x: f32,
    pub rot_y: f32,
    pub rot_z: f32,
    /// Display radius in render units.
    pub radius: f32,
    /// BodyKind::as_index() as f32.
    pub kind: f32,
    /// Base color packed 0xRRGGBB.
    pub color: f32,
    /// Cloud-layer rotation in radians (Earth), 0 otherwise.
    pub cloud_rot: f32,
    /// 1.0 when a ring system should be drawn (Saturn), 0 otherwise.
    pub rings: f32,
    /// Visibility (0.0 = hidden layer, 1.0 = shown).
    pub alpha: f32,
}

impl BodyInstance {
    pub const FLOATS: usize = 12;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Flat buffer of body instances, rebuilt each frame in registration
/// order so slot indices are stable.
pub struct BodyBuffer {
    pub instances: Vec<BodyInstance>,
}

impl BodyBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: BodyInstance) {
        self.instances.push(instance);
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer for zero-copy reads from the WASM host.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for BodyBuffer {
    fn default() -> Self {
        Self::with_capacity(64)
    }
}

/// Per-comet layer data published each frame alongside the body buffer.
/// 16 floats = 64 bytes stride. Particle positions/colors travel through
/// the per-comet `ParticleBuffer` pointers instead.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct CometInstance {
    /// Slot of the owning body in the body buffer.
    pub body_slot: f32,
    pub activity: f32,
    /// Unit direction away from the Sun; tails extend along it.
    pub dir_x: f32,
    pub dir_y: f32,
    pub dir_z: f32,
    pub coma_opacity: f32,
    pub coma_diameter: f32,
    pub glow_opacity: f32,
    pub ion_tail_opacity: f32,
    /// Scaled tail length (the cylinder's y scale).
    pub ion_tail_len: f32,
    pub dust_tail_opacity: f32,
    pub dust_tail_len: f32,
    pub ion_cloud_opacity: f32,
    pub dust_cloud_opacity: f32,
    pub _pad0: f32,
    pub _pad1: f32,
}

impl CometInstance {
    pub const FLOATS: usize = 16;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Flat buffer of comet layer instances, rebuilt each frame in
/// registration order.
pub struct CometBuffer {
    pub instances: Vec<CometInstance>,
}

impl CometBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: CometInstance) {
        self.instances.push(instance);
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for CometBuffer {
    fn default() -> Self {
        Self::with_capacity(8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_instance_is_12_floats() {
        assert_eq!(std::mem::size_of::<BodyInstance>(), 48);
        assert_eq!(BodyInstance::FLOATS, 12);
    }

    #[test]
    fn buffer_push_and_count() {
        let mut buf = BodyBuffer::default();
        buf.push(BodyInstance::default());
        buf.push(BodyInstance::default());
        assert_eq!(buf.instance_count(), 2);
    }

    #[test]
    fn comet_instance_is_16_floats() {
        assert_eq!(std::mem::size_of::<CometInstance>(), 64);
        assert_eq!(CometInstance::FLOATS, 16);
    }
}
