pub mod app;
pub mod event;
pub mod input;
pub mod scroll;
pub mod story;
pub mod theme;
pub mod widgets;

pub use app::App;
pub use story::Story;
pub use theme::Theme;
