pub mod input;
pub mod pointer_interaction;
