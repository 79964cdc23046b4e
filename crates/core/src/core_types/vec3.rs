//! Vector type alias for node positions and display offsets.

use nalgebra::Vector3;

/// 3D vector type for corner-node positions.
///
/// Reservoir coordinates are real-world UTM eastings/northings and depths,
/// so this is `nalgebra::Vector3<f64>` rather than single precision.
pub type Vec3d = Vector3<f64>;
