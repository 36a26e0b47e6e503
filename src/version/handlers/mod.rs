//! Source handler implementations

pub mod docker;
pub mod haio;
pub mod local;
pub mod pypi;
pub mod supervised;

pub use docker::DockerHandler;
pub use haio::HaioHandler;
pub use local::LocalHandler;
pub use pypi::PypiHandler;
pub use supervised::SupervisedHandler;
