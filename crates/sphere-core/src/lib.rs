pub mod collision;
pub mod config;
pub mod constants;
pub mod error;
pub mod frame;
pub mod input;
pub mod layout;
pub mod node;
pub mod projection;
pub mod rotation;
pub mod sphere;

pub use collision::{CollisionResolver, CollisionStats};
pub use config::ViewportConfig;
pub use constants::*;
pub use error::SphereError;
pub use frame::FrameClock;
pub use input::{InputController, InputEvent, Release};
pub use layout::{count_from_signed, fibonacci_directions, fibonacci_sphere};
pub use node::{ImageNode, ImageSource, RenderNode};
pub use projection::{depth_opacity, perspective_scale, project_nodes, project_point, Projected};
pub use rotation::{RotationMode, RotationState};
pub use sphere::Sphere;
