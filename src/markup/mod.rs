mod locate;
mod node;

pub use locate::*;
pub use node::*;
