pub mod boundary;
pub mod classify;
pub mod displace;
pub mod falloff;
pub mod redistribute;

pub use boundary::boundary_of;
pub use classify::{classify_point, classify_vertices, is_inside, PointClassification};
pub use displace::{Depress, DisplacementOutcome, RadiusSearch};
pub use falloff::{indent_function, volume_function, Distribution, IndentProfile};
pub use redistribute::{
    maximum_distance, minimum_distances, IndentRange, Redistribute, RedistributionOutcome,
};
