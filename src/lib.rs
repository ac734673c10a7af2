pub mod attributes;
pub mod colors;
pub mod constants;
pub mod params;
pub mod pipeline;
pub mod positions;
pub mod post_process;
pub mod resample;
pub mod scene;
pub mod scene_errors;
pub mod time_grid;

pub use params::SceneParams;
pub use pipeline::{build_scene, ScenePipeline};
pub use scene::Scene;
pub use scene_errors::SceneError;
