mod app;
mod dom;
mod logger;
mod surface;

pub use app::run;
