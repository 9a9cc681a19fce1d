//! Scene lights to shader light slots
//!
//! Light positions are resolved to view space on the CPU once per frame, the
//! way fixed-function lighting stored them when the position was set.

use runway_core::{CoordinateSpace, LightTemplate};
use runway_math::{mat4, Mat4, Vec3};

use crate::pipeline::{GpuLight, LIGHT_SLOTS, NO_SPOT_CONE};

/// Fill the light slots from scene lights
///
/// Lights beyond [`LIGHT_SLOTS`] are dropped; unused slots stay disabled.
pub fn frame_lights(lights: &[LightTemplate], view: Mat4, airplane: Mat4) -> [GpuLight; LIGHT_SLOTS] {
    let mut slots = [GpuLight::default(); LIGHT_SLOTS];
    for (slot, light) in slots.iter_mut().zip(lights.iter()) {
        *slot = view_space_light(light, view, airplane);
    }
    slots
}

/// Resolve one light to view space
pub fn view_space_light(light: &LightTemplate, view: Mat4, airplane: Mat4) -> GpuLight {
    let to_view = if light.attach_to_airplane {
        mat4::mul(view, airplane)
    } else {
        match light.space {
            CoordinateSpace::View => mat4::IDENTITY,
            CoordinateSpace::World => view,
        }
    };

    let position = mat4::transform_point(to_view, Vec3::from_array(light.position));
    let direction = mat4::transform_direction(to_view, Vec3::from_array(light.direction)).normalized();

    let cutoff = light.effective_cutoff();
    let cone = if cutoff >= 180.0 {
        NO_SPOT_CONE
    } else {
        cutoff.to_radians().cos()
    };

    let rgba = |c: [f32; 3], w: f32| [c[0], c[1], c[2], w];
    GpuLight {
        position: [position.x, position.y, position.z, 1.0],
        direction: [direction.x, direction.y, direction.z, cone],
        ambient: rgba(light.ambient, 1.0),
        diffuse: rgba(light.diffuse, 1.0),
        specular: rgba(light.specular, 1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use runway_core::default_lights;

    #[test]
    fn test_view_space_light_is_untouched() {
        let view = mat4::translation(0.0, 0.0, -5.0);
        let light = view_space_light(&LightTemplate::point([0.0, 500.0, -250.0]), view, mat4::IDENTITY);
        assert_eq!(light.position, [0.0, 500.0, -250.0, 1.0]);
        assert_eq!(light.direction[3], NO_SPOT_CONE);
        assert!(light.is_enabled());
    }

    #[test]
    fn test_world_space_light_follows_view() {
        let view = mat4::translation(0.0, 0.0, -5.0);
        let template = LightTemplate::point([1.0, 2.0, 3.0]).in_space(CoordinateSpace::World);
        let light = view_space_light(&template, view, mat4::IDENTITY);
        assert_eq!(light.position, [1.0, 2.0, -2.0, 1.0]);
    }

    #[test]
    fn test_attached_spot_follows_airplane() {
        let view = mat4::translation(0.0, 0.0, -5.0);
        let airplane = mat4::mul(mat4::translation(4.0, 0.0, 0.0), mat4::rotation_y(90.0));
        let spot = &default_lights()[1];
        let light = view_space_light(spot, view, airplane);

        // Local (5, 0, 0) -> rotated to (0, 0, -5) -> moved to (4, 0, -5) -> view (4, 0, -10)
        let p = light.position;
        assert!((p[0] - 4.0).abs() < 1e-4 && p[1].abs() < 1e-4 && (p[2] + 10.0).abs() < 1e-4, "{:?}", p);
        // Direction +x rotated to -z
        assert!((light.direction[2] + 1.0).abs() < 1e-5);
        assert!((light.direction[3] - 30f32.to_radians().cos()).abs() < 1e-6);
    }

    #[test]
    fn test_frame_lights_fills_slots_in_order() {
        let slots = frame_lights(&default_lights(), mat4::IDENTITY, mat4::IDENTITY);
        assert!(slots.iter().all(GpuLight::is_enabled));
        assert_eq!(slots[1].diffuse, [0.0, 0.0, 1.0, 1.0]);

        let one = frame_lights(&default_lights()[..1], mat4::IDENTITY, mat4::IDENTITY);
        assert!(one[0].is_enabled());
        assert!(!one[1].is_enabled());
    }
}
