/// Number of points generated for the cloud.
pub const PARTICLE_COUNT: usize = 700;

/// Side length of the cube the points are scattered in, centred at the origin.
pub const PARTICLE_SPREAD: f32 = 15.0;

/// World-space size of a single rendered point.
pub const POINT_SIZE: f32 = 0.02;

/// Material opacity for the cloud.
pub const POINT_OPACITY: f32 = 0.8;

/// Radians per second of base rotation about the Y axis.
pub const DRIFT_SPEED: f32 = 0.05;

/// Radians of tilt per unit of normalised pointer offset.
pub const PARALLAX_STRENGTH: f32 = 0.5;

/// Vertices emitted per point (octahedron tips).
pub const VERTICES_PER_POINT: usize = 6;

/// Triangles emitted per point (octahedron faces).
pub const TRIANGLES_PER_POINT: usize = 8;
