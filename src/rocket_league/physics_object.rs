use glam::Vec3A;

const MIRROR: Vec3A = Vec3A::new(-1.0, -1.0, 1.0);

/// Kinematics of a single body, either as seen by blue or mirrored for orange.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicsObject {
    pub position: Vec3A,
    pub linear_velocity: Vec3A,
    pub angular_velocity: Vec3A,
    pub forward: Vec3A,
    pub up: Vec3A,
}

impl Default for PhysicsObject {
    fn default() -> Self {
        PhysicsObject {
            position: Vec3A::ZERO,
            linear_velocity: Vec3A::ZERO,
            angular_velocity: Vec3A::ZERO,
            forward: Vec3A::X,
            up: Vec3A::Z,
        }
    }
}

impl PhysicsObject {
    pub fn new(position: Vec3A, linear_velocity: Vec3A, angular_velocity: Vec3A) -> Self {
        PhysicsObject {
            position,
            linear_velocity,
            angular_velocity,
            ..Default::default()
        }
    }

    pub fn with_orientation(self, forward: Vec3A, up: Vec3A) -> Self {
        PhysicsObject {
            forward,
            up,
            ..self
        }
    }

    /// Rotates the object 180 degrees about the vertical axis through the field center.
    pub fn inverted(&self) -> Self {
        PhysicsObject {
            position: self.position * MIRROR,
            linear_velocity: self.linear_velocity * MIRROR,
            angular_velocity: self.angular_velocity * MIRROR,
            forward: self.forward * MIRROR,
            up: self.up * MIRROR,
        }
    }
}
