//! Geometrical shapes of substrates, thin films and holder slots.

use crate::measurement::Measurement;
use serde::{Deserialize, Serialize};

/// A six-faced polyhedron with each pair of opposite faces parallel and equal in size.
///
/// Lengths in meter, angles in degree, `surface_area` is the product of length and
/// width (the primary surface).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Parallelepiped {
    pub volume: Option<Measurement>,
    /// The z dimension.
    pub height: Option<Measurement>,
    /// The x dimension.
    pub width: Option<Measurement>,
    /// The y dimension.
    pub length: Option<Measurement>,
    /// The angle between the y and z sides.
    pub alpha: Option<Measurement>,
    /// The angle between the x and z sides.
    pub beta: Option<Measurement>,
    /// The angle between the x and y sides.
    pub gamma: Option<Measurement>,
    pub surface_area: Option<Measurement>,
}

fn right_angle() -> Option<Measurement> {
    Some(Measurement::new(90.0, "deg"))
}

/// A cuboid with a square base (`width` is the side, x = y).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SquareCuboid {
    pub volume: Option<Measurement>,
    pub height: Option<Measurement>,
    pub width: Option<Measurement>,
    #[serde(default = "right_angle")]
    pub alpha: Option<Measurement>,
    #[serde(default = "right_angle")]
    pub beta: Option<Measurement>,
    #[serde(default = "right_angle")]
    pub gamma: Option<Measurement>,
    pub surface_area: Option<Measurement>,
}

/// A parallelepiped whose angles between adjacent faces are all right angles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectangleCuboid {
    pub volume: Option<Measurement>,
    pub height: Option<Measurement>,
    pub width: Option<Measurement>,
    pub length: Option<Measurement>,
    #[serde(default = "right_angle")]
    pub alpha: Option<Measurement>,
    #[serde(default = "right_angle")]
    pub beta: Option<Measurement>,
    #[serde(default = "right_angle")]
    pub gamma: Option<Measurement>,
    pub surface_area: Option<Measurement>,
}

/// A cone with the top cut off parallel to the bottom.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TruncatedCone {
    pub volume: Option<Measurement>,
    pub height: Option<Measurement>,
    pub lower_cap_radius: Option<Measurement>,
    pub upper_cap_radius: Option<Measurement>,
    pub lower_cap_surface_area: Option<Measurement>,
    pub upper_cap_surface_area: Option<Measurement>,
    pub lateral_surface_area: Option<Measurement>,
}

/// A prism with a circular base.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Cylinder {
    pub volume: Option<Measurement>,
    pub height: Option<Measurement>,
    pub radius: Option<Measurement>,
    pub lower_cap_surface_area: Option<Measurement>,
    pub cap_surface_area: Option<Measurement>,
    pub lateral_surface_area: Option<Measurement>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CylinderSector {
    #[serde(flatten)]
    pub cylinder: Cylinder,
    /// The angle at the center of the base circle spanning the sector's arc.
    pub central_angle: Option<Measurement>,
}

/// A shape that does not fit into any of the other geometries.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IrregularParallelSurfaces {
    pub volume: Option<Measurement>,
    pub height: Option<Measurement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Geometry {
    Parallelepiped(Parallelepiped),
    SquareCuboid(SquareCuboid),
    RectangleCuboid(RectangleCuboid),
    TruncatedCone(TruncatedCone),
    Cylinder(Cylinder),
    CylinderSector(CylinderSector),
    IrregularParallelSurfaces(IrregularParallelSurfaces),
}

impl Geometry {
    /// The measure of the amount of space occupied in 3D space.
    pub fn volume(&self) -> Option<&Measurement> {
        match self {
            Geometry::Parallelepiped(g) => g.volume.as_ref(),
            Geometry::SquareCuboid(g) => g.volume.as_ref(),
            Geometry::RectangleCuboid(g) => g.volume.as_ref(),
            Geometry::TruncatedCone(g) => g.volume.as_ref(),
            Geometry::Cylinder(g) => g.volume.as_ref(),
            Geometry::CylinderSector(g) => g.cylinder.volume.as_ref(),
            Geometry::IrregularParallelSurfaces(g) => g.volume.as_ref(),
        }
    }
}
