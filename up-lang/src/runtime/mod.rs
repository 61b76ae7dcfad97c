pub mod console;
pub mod environment;
pub mod executor;
pub mod expr;
pub mod value;

pub use console::{Console, StreamConsole};
pub use environment::Environment;
pub use executor::Executor;
pub use value::{Value, VarKind};
