//! Rotation conventions for placed lights.
//!
//! Rotations are stored as world-frame XYZ Euler angles (R = Rz * Ry * Rx).
//! A light faces along its local -Z axis, so "facing back toward a target"
//! means rotating +Z onto the direction from the target to the light.

use glam::{Mat3, Quat, Vec3};

use crate::constants::{EPSILON, EULER_TIE_TOLERANCE};

/// Matrix entries this small are treated as zero when detecting gimbal lock.
const GIMBAL_EPSILON: f32 = 16.0 * f32::EPSILON;

/// Build a quaternion from XYZ Euler angles.
pub fn euler_to_quat(euler: Vec3) -> Quat {
    Quat::from_rotation_z(euler.z) * Quat::from_rotation_y(euler.y) * Quat::from_rotation_x(euler.x)
}

/// Decompose a quaternion into XYZ Euler angles.
pub fn quat_to_euler(rotation: Quat) -> Vec3 {
    matrix_to_euler(&Mat3::from_quat(rotation.normalize()))
}

/// Decompose a rotation matrix into XYZ Euler angles.
///
/// Every rotation has two Euler solutions; the one with the smaller sum of
/// absolute angles is returned, the first one on a tie.
pub fn matrix_to_euler(m: &Mat3) -> Vec3 {
    let cy = m.x_axis.x.hypot(m.x_axis.y);

    if cy <= GIMBAL_EPSILON {
        return Vec3::new(
            (-m.z_axis.y).atan2(m.y_axis.y),
            (-m.x_axis.z).atan2(cy),
            0.0,
        );
    }

    let first = Vec3::new(
        m.y_axis.z.atan2(m.z_axis.z),
        (-m.x_axis.z).atan2(cy),
        m.x_axis.y.atan2(m.x_axis.x),
    );
    let second = Vec3::new(
        (-m.y_axis.z).atan2(-m.z_axis.z),
        (-m.x_axis.z).atan2(-cy),
        (-m.x_axis.y).atan2(-m.x_axis.x),
    );

    if first.abs().element_sum() > second.abs().element_sum() + EULER_TIE_TOLERANCE {
        second
    } else {
        first
    }
}

/// A vector orthogonal to `v`, built from its dominant axis.
pub fn orthogonal(v: Vec3) -> Vec3 {
    let a = v.abs();
    if a.x > a.y && a.x > a.z {
        Vec3::new(-v.y - v.z, v.x, v.x)
    } else if a.y > a.z {
        Vec3::new(v.y, -v.x - v.z, v.y)
    } else {
        Vec3::new(v.z, v.z, -v.x - v.y)
    }
}

/// Shortest-arc rotation taking `from` onto `to`.
///
/// Opposite vectors rotate half a turn about [`orthogonal`]`(from)`.
pub fn rotation_between(from: Vec3, to: Vec3) -> Quat {
    let from = from.normalize();
    let to = to.normalize();
    let axis = from.cross(to);
    let dot = from.dot(to);

    if axis.length() > EPSILON {
        return Quat::from_axis_angle(axis.normalize(), dot.clamp(-1.0, 1.0).acos());
    }
    if dot > 0.0 {
        return Quat::IDENTITY;
    }

    let half_turn = orthogonal(from).normalize();
    Quat::from_xyzw(half_turn.x, half_turn.y, half_turn.z, 0.0)
}

/// Euler rotation whose local +Z points along `outward`, so the local -Z
/// (the light's forward axis) looks back the other way.
pub fn facing_rotation(outward: Vec3) -> Vec3 {
    quat_to_euler(rotation_between(Vec3::Z, outward))
}
