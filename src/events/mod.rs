pub mod pointer;
pub mod visibility;
