pub mod declare;
pub mod macros;
pub mod model;
pub mod require;

pub use model::{ComponentCtx, SlashCtx};
