pub mod highlight;
pub mod line;
pub mod phrase;

pub use highlight::*;
pub use line::*;
pub use phrase::*;
