use glam::Vec3A;

/// Distance between two points projected onto the ground (XY) plane.
pub fn planar_distance(a: Vec3A, b: Vec3A) -> f32 {
    (a - b).truncate().length()
}

pub fn extend_scaled(obs: &mut Vec<f32>, v: Vec3A, coef: f32) {
    obs.extend_from_slice(&(v * coef).to_array());
}

pub fn extend_vec3(obs: &mut Vec<f32>, v: Vec3A) {
    obs.extend_from_slice(&v.to_array());
}

pub fn flag(v: bool) -> f32 {
    if v {
        1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planar_distance_ignores_height() {
        let a = Vec3A::new(0.0, 0.0, 0.0);
        let b = Vec3A::new(3.0, 4.0, 1000.0);
        assert_eq!(planar_distance(a, b), 5.0);
    }

    #[test]
    fn extend_scaled_appends_three_components() {
        let mut obs = vec![1.0];
        extend_scaled(&mut obs, Vec3A::new(2.0, -4.0, 8.0), 0.5);
        assert_eq!(obs, vec![1.0, 1.0, -2.0, 4.0]);
    }
}
