pub mod http;
pub mod konst;
pub mod model;
pub mod traced;
