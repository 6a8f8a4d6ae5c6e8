pub mod app;
pub mod event;
pub mod input;
pub mod region;
pub mod widgets;

pub use app::App;
pub use region::RenderedRegion;
