pub mod app;
pub mod factory;
pub mod failing;

#[allow(unused_imports)]
pub use app::{failing_server, TestApp};
pub use factory::Factory;
#[allow(unused_imports)]
pub use failing::STORE_FAILURE;
