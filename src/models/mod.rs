pub mod event;
pub mod light_state;
pub mod scene;
