pub mod diagnostics;
pub mod paths;
pub mod pipeline;
pub mod stage;
pub mod toolchain;
