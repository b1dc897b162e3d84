use cgmath::Vector3;

/// The single point light of a frame. Replace it wholesale between frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Vector3<f32>,
    pub colour: Vector3<f32>,
}

impl Light {
    pub fn new(position: Vector3<f32>, colour: Vector3<f32>) -> Self {
        Self { position, colour }
    }
}

impl Default for Light {
    fn default() -> Self {
        Self {
            position: Vector3::new(8.0, 80.0, 50.0),
            // change when it's evening
            colour: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}
